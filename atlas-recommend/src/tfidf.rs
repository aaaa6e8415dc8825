// ---------------------------------------------------------------------------
// TF-IDF Model -- per-document term frequencies and corpus document
// frequencies
// ---------------------------------------------------------------------------
//
// Documents are addressed by their position in the corpus they were built
// from. Term frequency is the share of a document's tokens that are the
// term; inverse document frequency uses the smoothed form
// `ln((1 + N) / (1 + df)) + 1` and is zero for terms no document contains,
// so every weight is finite and non-negative.
// ---------------------------------------------------------------------------

use std::collections::{BTreeSet, HashMap};

use crate::text::tokenize;

/// Term-weighting model over a fixed, ordered set of documents.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
	/// term -> number of documents containing it
	doc_freqs: HashMap<String, usize>,
	/// document position -> (term -> occurrences)
	term_counts: Vec<HashMap<String, usize>>,
	/// document position -> token count
	doc_lengths: Vec<usize>,
}

impl TfIdfModel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a model from documents, in order.
	pub fn build<I, S>(documents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut model = Self::new();
		for doc in documents {
			model.add_document(doc.as_ref());
		}
		model
	}

	/// Tokenize `text` and append it as the next document. Returns its
	/// position.
	pub fn add_document(&mut self, text: &str) -> usize {
		let tokens = tokenize(text);
		let mut counts: HashMap<String, usize> = HashMap::new();
		for token in tokens.iter() {
			*counts.entry(token.clone()).or_insert(0) += 1;
		}
		for term in counts.keys() {
			*self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
		}

		self.doc_lengths.push(tokens.len());
		self.term_counts.push(counts);
		self.doc_lengths.len() - 1
	}

	/// Number of documents in the model.
	pub fn document_count(&self) -> usize {
		self.doc_lengths.len()
	}

	/// Number of documents containing `term`.
	pub fn document_frequency(&self, term: &str) -> usize {
		self.doc_freqs.get(term).copied().unwrap_or(0)
	}

	/// Number of distinct terms across all documents.
	pub fn vocabulary_size(&self) -> usize {
		self.doc_freqs.len()
	}

	pub fn idf(&self, term: &str) -> f64 {
		let df = self.document_frequency(term);
		if df == 0 {
			return 0.0;
		}
		let n = self.document_count() as f64;
		((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
	}

	/// Relative frequency of `term` in the document at `doc`. Zero for an
	/// empty document or an out-of-range position.
	///
	/// Dividing by the document length is deliberate: with raw counts a
	/// single match in a short document ties with the same match in a long
	/// one, and the denser match must rank first.
	pub fn tf(&self, doc: usize, term: &str) -> f64 {
		let len = match self.doc_lengths.get(doc) {
			Some(&len) if len > 0 => len,
			_ => return 0.0,
		};
		let count = self.term_counts[doc].get(term).copied().unwrap_or(0);
		count as f64 / len as f64
	}

	pub fn tfidf(&self, doc: usize, term: &str) -> f64 {
		let tf = self.tf(doc, term);
		if tf == 0.0 {
			return 0.0;
		}
		tf * self.idf(term)
	}

	/// Sum of the TF-IDF weights of every query term in the document at
	/// `doc`.
	pub fn score(&self, doc: usize, query: &BTreeSet<String>) -> f64 {
		query.iter().map(|term| self.tfidf(doc, term)).sum()
	}

	/// Scores for every document, indexed by position.
	pub fn score_all(&self, query: &BTreeSet<String>) -> Vec<f64> {
		(0..self.document_count())
			.map(|doc| self.score(doc, query))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn terms(words: &[&str]) -> BTreeSet<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn build_counts_documents_and_frequencies() {
		let model = TfIdfModel::build(["hello world", "hello rust", "goodbye"]);
		assert_eq!(model.document_count(), 3);
		assert_eq!(model.document_frequency("hello"), 2);
		assert_eq!(model.document_frequency("rust"), 1);
		assert_eq!(model.document_frequency("missing"), 0);
		assert_eq!(model.vocabulary_size(), 4);
	}

	#[test]
	fn repeated_term_counts_once_for_document_frequency() {
		let model = TfIdfModel::build(["rust rust rust", "python"]);
		assert_eq!(model.document_frequency("rust"), 1);
	}

	#[test]
	fn add_document_returns_position() {
		let mut model = TfIdfModel::new();
		assert_eq!(model.add_document("one"), 0);
		assert_eq!(model.add_document("two"), 1);
	}

	#[test]
	fn tf_is_relative_frequency() {
		let model = TfIdfModel::build(["rust rust go java"]);
		assert!((model.tf(0, "rust") - 0.5).abs() < 1e-12);
		assert!((model.tf(0, "go") - 0.25).abs() < 1e-12);
		assert_eq!(model.tf(0, "c"), 0.0);
	}

	#[test]
	fn tf_of_empty_or_missing_document_is_zero() {
		let model = TfIdfModel::build(["", "word"]);
		assert_eq!(model.tf(0, "word"), 0.0);
		assert_eq!(model.tf(7, "word"), 0.0);
	}

	#[test]
	fn idf_smoothed_values() {
		let model = TfIdfModel::build(["a b", "a c", "a d"]);
		// Present everywhere: ln(4/4) + 1
		assert!((model.idf("a") - 1.0).abs() < 1e-12);
		// Present once: ln(4/2) + 1
		assert!((model.idf("b") - (2.0f64.ln() + 1.0)).abs() < 1e-12);
	}

	#[test]
	fn idf_of_unseen_term_is_zero() {
		let model = TfIdfModel::build(["a b"]);
		assert_eq!(model.idf("zzz"), 0.0);
		let empty = TfIdfModel::new();
		assert_eq!(empty.idf("a"), 0.0);
	}

	#[test]
	fn rarer_terms_weigh_more() {
		let model = TfIdfModel::build(["common rare", "common", "common"]);
		assert!(model.idf("rare") > model.idf("common"));
	}

	#[test]
	fn score_sums_per_term_weights() {
		let model = TfIdfModel::build(["lake forest", "lake", "desert"]);
		let query = terms(&["lake", "forest"]);
		let expected = model.tfidf(0, "lake") + model.tfidf(0, "forest");
		assert!((model.score(0, &query) - expected).abs() < 1e-12);
	}

	#[test]
	fn score_without_shared_vocabulary_is_zero() {
		let model = TfIdfModel::build(["lake forest", "desert dunes"]);
		let query = terms(&["lake", "unknown"]);
		assert_eq!(model.score(1, &query), 0.0);
	}

	#[test]
	fn score_all_is_finite_and_ordered_by_position() {
		let model = TfIdfModel::build(["lake", "", "lake lake river"]);
		let scores = model.score_all(&terms(&["lake", "nowhere"]));
		assert_eq!(scores.len(), 3);
		assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
		assert_eq!(scores[1], 0.0);
		assert!(scores[0] > scores[2]);
	}

	#[test]
	fn same_match_in_shorter_document_scores_higher() {
		let model = TfIdfModel::build([
			"old mission church colonial stone church history north",
			"river cave underground river cave hiking south",
			"cloud forest north",
			"market south",
		]);
		let query = terms(&["north", "south"]);
		assert!(model.score(2, &query) > model.score(0, &query));
		assert!(model.score(3, &query) > model.score(1, &query));
	}

	#[test]
	fn score_all_on_empty_model() {
		let model = TfIdfModel::new();
		assert!(model.score_all(&terms(&["lake"])).is_empty());
	}
}
