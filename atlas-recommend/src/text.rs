// ---------------------------------------------------------------------------
// Text preparation
// ---------------------------------------------------------------------------
//
// Turns catalog items into the plain-text documents the TF-IDF model is
// built from, and liked items into the set of query terms scored against
// them.
// ---------------------------------------------------------------------------

use std::collections::BTreeSet;

use crate::types::Item;

/// Split text into lowercased word tokens, treating punctuation as a
/// separator.
///
/// No stemming or stop-word removal, so the output depends only on the
/// input text.
pub fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.chars()
		.map(|c| if c.is_alphanumeric() { c } else { ' ' })
		.collect::<String>()
		.split_whitespace()
		.map(|t| t.to_string())
		.collect()
}

/// The scoring document of an item: name, description and region joined by
/// single spaces, always in that order.
pub fn document(item: &Item) -> String {
	format!("{} {} {}", item.name, item.description, item.region)
}

/// Distinct terms of the concatenated documents of `liked`.
///
/// A set, so neither the order of `liked` nor repeated entries change the
/// result.
pub fn query_terms(liked: &[Item]) -> BTreeSet<String> {
	let query = liked.iter().map(document).collect::<Vec<_>>().join(" ");
	tokenize(&query).into_iter().collect()
}
