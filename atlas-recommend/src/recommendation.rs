// ---------------------------------------------------------------------------
// Similarity Recommender
// ---------------------------------------------------------------------------
//
// Ranks catalog items by TF-IDF relevance to the text of the items a user
// already likes and returns the best ones the user has not liked yet.
// Pure functions: no I/O, no shared state, inputs are only borrowed.
// ---------------------------------------------------------------------------

use std::collections::HashSet;

use crate::text::{document, query_terms};
use crate::tfidf::TfIdfModel;
use crate::types::{Item, ScoredItem};

/// Number of recommendations returned when the caller does not ask for a
/// specific amount.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Map a signed result-count request onto a usable limit. Zero and negative
/// requests mean "no results".
pub fn clamp_max_results(requested: i64) -> usize {
	if requested <= 0 {
		return 0;
	}
	usize::try_from(requested).unwrap_or(usize::MAX)
}

/// Build the TF-IDF model for `corpus`, one document per item in order.
pub fn build_model(corpus: &[Item]) -> TfIdfModel {
	TfIdfModel::build(corpus.iter().map(document))
}

/// Up to `max_results` items from `corpus`, most relevant to `liked` first,
/// never including an item whose id appears in `liked`.
pub fn recommend(corpus: &[Item], liked: &[Item], max_results: usize) -> Vec<Item> {
	rank(corpus, liked, max_results)
		.into_iter()
		.map(|scored| scored.item)
		.collect()
}

/// Same as [`recommend`], keeping the relevance score of each item.
pub fn rank(corpus: &[Item], liked: &[Item], max_results: usize) -> Vec<ScoredItem> {
	if nothing_to_rank(corpus, liked, max_results) {
		return Vec::new();
	}
	let model = build_model(corpus);
	rank_with_model(&model, corpus, liked, max_results)
}

/// Rank against a model previously built from exactly this `corpus`.
///
/// Equal scores keep their relative corpus order.
pub fn rank_with_model(
	model: &TfIdfModel,
	corpus: &[Item],
	liked: &[Item],
	max_results: usize,
) -> Vec<ScoredItem> {
	if nothing_to_rank(corpus, liked, max_results) {
		return Vec::new();
	}
	debug_assert_eq!(model.document_count(), corpus.len());

	let query = query_terms(liked);
	let liked_ids: HashSet<&str> = liked.iter().map(|item| item.id.as_str()).collect();

	let mut scored: Vec<(usize, f64)> = corpus
		.iter()
		.enumerate()
		.filter(|(_, item)| !liked_ids.contains(item.id.as_str()))
		.map(|(pos, _)| (pos, model.score(pos, &query)))
		.collect();

	// Stable: ties stay in corpus order.
	scored.sort_by(|a, b| b.1.total_cmp(&a.1));
	scored.truncate(max_results);

	tracing::debug!(
		corpus = corpus.len(),
		liked = liked_ids.len(),
		query_terms = query.len(),
		returned = scored.len(),
		"ranked recommendations"
	);

	scored
		.into_iter()
		.map(|(pos, score)| ScoredItem {
			item: corpus[pos].clone(),
			score,
		})
		.collect()
}

fn nothing_to_rank(corpus: &[Item], liked: &[Item], max_results: usize) -> bool {
	liked.is_empty() || corpus.is_empty() || max_results == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
