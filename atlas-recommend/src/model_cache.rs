// ---------------------------------------------------------------------------
// LRU Model Cache
// ---------------------------------------------------------------------------
//
// Keeps recently used TF-IDF models keyed by a fingerprint of the corpus
// they were built from, so repeated recommendations over an unchanged
// catalog skip the rebuild. A changed catalog hashes to a new fingerprint;
// the old model is never hit again and ages out.
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::recommendation::build_model;
use crate::tfidf::TfIdfModel;
use crate::types::Item;

pub const DEFAULT_CAPACITY: usize = 8;

/// Hex SHA-256 over the scoring fields of every item, in corpus order.
///
/// Each field is length-prefixed so shifting text between adjacent fields
/// changes the digest. Extra attributes do not take part.
pub fn corpus_fingerprint(corpus: &[Item]) -> String {
	let mut hasher = Sha256::new();
	hasher.update((corpus.len() as u64).to_le_bytes());
	for item in corpus {
		for field in [&item.id, &item.name, &item.description, &item.region] {
			hasher.update((field.len() as u64).to_le_bytes());
			hasher.update(field.as_bytes());
		}
	}
	hasher
		.finalize()
		.iter()
		.map(|b| format!("{:02x}", b))
		.collect()
}

// ---------------------------------------------------------------------------
// ModelCache
// ---------------------------------------------------------------------------

/// An LRU cache of TF-IDF models bounded by entry count.
///
/// Internally uses a `Vec<(String, Arc<TfIdfModel>)>` for ordering (oldest
/// first) and a `HashMap<String, usize>` for lookups by fingerprint.
pub struct ModelCache {
	capacity: usize,
	/// Oldest first, newest last.
	entries: Vec<(String, Arc<TfIdfModel>)>,
	/// fingerprint -> index in `entries`
	index: HashMap<String, usize>,
	hits: u64,
	misses: u64,
}

impl ModelCache {
	/// A capacity of zero disables caching: every lookup builds a fresh
	/// model and nothing is retained.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			entries: Vec::new(),
			index: HashMap::new(),
			hits: 0,
			misses: 0,
		}
	}

	fn rebuild_index(&mut self) {
		self.index.clear();
		for (i, (key, _)) in self.entries.iter().enumerate() {
			self.index.insert(key.clone(), i);
		}
	}

	fn evict(&mut self) {
		if self.entries.len() <= self.capacity {
			return;
		}
		let excess = self.entries.len() - self.capacity;
		for (key, _) in self.entries.drain(..excess) {
			tracing::debug!(fingerprint = %key, "evicting cached model");
		}
		self.rebuild_index();
	}

	/// Look up a model by fingerprint, promoting it to most-recently-used.
	pub fn get(&mut self, fingerprint: &str) -> Option<Arc<TfIdfModel>> {
		let idx = self.index.get(fingerprint).copied()?;
		let entry = self.entries.remove(idx);
		let model = Arc::clone(&entry.1);
		self.entries.push(entry);
		self.rebuild_index();
		Some(model)
	}

	/// Insert a model, replacing any previous one under the same fingerprint.
	pub fn put(&mut self, fingerprint: &str, model: Arc<TfIdfModel>) {
		if let Some(idx) = self.index.remove(fingerprint) {
			self.entries.remove(idx);
		}
		self.entries.push((fingerprint.to_string(), model));
		self.rebuild_index();
		self.evict();
	}

	/// The model for `corpus`, built and cached on a miss.
	pub fn get_or_build(&mut self, corpus: &[Item]) -> Arc<TfIdfModel> {
		let fingerprint = corpus_fingerprint(corpus);
		if let Some(model) = self.get(&fingerprint) {
			self.hits += 1;
			return model;
		}

		self.misses += 1;
		let model = Arc::new(build_model(corpus));
		tracing::debug!(
			fingerprint = %fingerprint,
			documents = model.document_count(),
			vocabulary = model.vocabulary_size(),
			"built model"
		);
		self.put(&fingerprint, Arc::clone(&model));
		model
	}

	pub fn remove(&mut self, fingerprint: &str) -> bool {
		match self.index.remove(fingerprint) {
			Some(idx) => {
				self.entries.remove(idx);
				self.rebuild_index();
				true
			}
			None => false,
		}
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.index.clear();
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn hits(&self) -> u64 {
		self.hits
	}

	pub fn misses(&self) -> u64 {
		self.misses
	}
}

impl Default for ModelCache {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	fn corpus(tag: &str) -> Vec<Item> {
		vec![
			Item::new(format!("{tag}-1"), "Lake", "calm water", "North"),
			Item::new(format!("{tag}-2"), "Forest", "tall pines", "East"),
		]
	}

	#[test]
	fn fingerprint_is_stable() {
		assert_eq!(corpus_fingerprint(&corpus("a")), corpus_fingerprint(&corpus("a")));
		assert_eq!(corpus_fingerprint(&corpus("a")).len(), 64);
	}

	#[test]
	fn fingerprint_tracks_scoring_fields() {
		let base = corpus("a");
		let mut edited = base.clone();
		edited[1].description.push_str(" and moss");
		assert_ne!(corpus_fingerprint(&base), corpus_fingerprint(&edited));
	}

	#[test]
	fn fingerprint_tracks_order() {
		let base = corpus("a");
		let reversed: Vec<Item> = base.iter().rev().cloned().collect();
		assert_ne!(corpus_fingerprint(&base), corpus_fingerprint(&reversed));
	}

	#[test]
	fn fingerprint_separates_adjacent_fields() {
		let a = vec![Item::new("1", "ab", "c", "")];
		let b = vec![Item::new("1", "a", "bc", "")];
		assert_ne!(corpus_fingerprint(&a), corpus_fingerprint(&b));
	}

	#[test]
	fn fingerprint_ignores_attributes() {
		let base = corpus("a");
		let mut decorated = base.clone();
		decorated[0]
			.attributes
			.insert("imageUrl".into(), serde_json::json!("lake.jpg"));
		assert_eq!(corpus_fingerprint(&base), corpus_fingerprint(&decorated));
	}

	#[test]
	fn get_or_build_reuses_model() {
		let mut cache = ModelCache::new(4);
		let first = cache.get_or_build(&corpus("a"));
		let second = cache.get_or_build(&corpus("a"));
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.hits(), 1);
		assert_eq!(cache.misses(), 1);
	}

	#[test]
	fn changed_corpus_builds_new_model() {
		let mut cache = ModelCache::new(4);
		let first = cache.get_or_build(&corpus("a"));
		let second = cache.get_or_build(&corpus("b"));
		assert!(!Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 2);
	}

	#[test]
	fn evicts_least_recently_used() {
		let mut cache = ModelCache::new(2);
		let a = corpus("a");
		let b = corpus("b");
		let c = corpus("c");
		cache.get_or_build(&a);
		cache.get_or_build(&b);
		// Touch "a" so "b" becomes the oldest
		cache.get_or_build(&a);
		cache.get_or_build(&c);

		assert_eq!(cache.len(), 2);
		assert!(cache.get(&corpus_fingerprint(&a)).is_some());
		assert!(cache.get(&corpus_fingerprint(&b)).is_none());
		assert!(cache.get(&corpus_fingerprint(&c)).is_some());
	}

	#[test]
	fn zero_capacity_retains_nothing() {
		let mut cache = ModelCache::new(0);
		let model = cache.get_or_build(&corpus("a"));
		assert_eq!(model.document_count(), 2);
		assert!(cache.is_empty());
	}

	#[test]
	fn put_replaces_existing() {
		let mut cache = ModelCache::new(4);
		cache.put("k", Arc::new(TfIdfModel::build(["one"])));
		cache.put("k", Arc::new(TfIdfModel::build(["one", "two"])));
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.get("k").unwrap().document_count(), 2);
	}

	#[test]
	fn remove_and_clear() {
		let mut cache = ModelCache::new(4);
		cache.put("k1", Arc::new(TfIdfModel::new()));
		cache.put("k2", Arc::new(TfIdfModel::new()));
		assert!(cache.remove("k1"));
		assert!(!cache.remove("k1"));
		assert_eq!(cache.len(), 1);
		cache.clear();
		assert!(cache.is_empty());
		assert!(cache.get("k2").is_none());
	}

	#[test]
	fn default_capacity() {
		assert_eq!(ModelCache::default().capacity(), DEFAULT_CAPACITY);
	}
}
