// ---------------------------------------------------------------------------
// Catalog -- the place list plus per-user favorites
// ---------------------------------------------------------------------------
//
// Holds what the host application hands over: the full item catalog and
// each user's favorite item ids. Resolves a user into the (corpus, liked)
// pair the recommender works on.
// ---------------------------------------------------------------------------

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::RecommendError;
use crate::types::Item;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
	Items(Vec<Item>),
	Wrapped { items: Vec<Item> },
}

#[derive(Debug, Default)]
pub struct Catalog {
	items: Vec<Item>,
	/// item id -> position in `items`
	positions: HashMap<String, usize>,
	/// user id -> favorite item ids
	favorites: HashMap<String, HashSet<String>>,
}

impl Catalog {
	/// Build a catalog. Fails on the first repeated item id.
	pub fn from_items(items: Vec<Item>) -> Result<Self, RecommendError> {
		let positions = index_items(&items)?;
		Ok(Self {
			items,
			positions,
			favorites: HashMap::new(),
		})
	}

	/// Read a catalog from a JSON file holding either an array of items or an
	/// object with an `items` array.
	pub fn load_file(path: impl AsRef<Path>) -> Result<Self, RecommendError> {
		let path = path.as_ref();
		let data = std::fs::read_to_string(path)?;
		let items = match serde_json::from_str::<CatalogFile>(&data)? {
			CatalogFile::Items(items) => items,
			CatalogFile::Wrapped { items } => items,
		};
		tracing::info!(path = %path.display(), count = items.len(), "loaded catalog file");
		Self::from_items(items)
	}

	/// Swap in a new item list. Favorites are kept; ones pointing at items
	/// that are no longer listed are ignored until the item returns.
	pub fn replace_items(&mut self, items: Vec<Item>) -> Result<(), RecommendError> {
		self.positions = index_items(&items)?;
		self.items = items;
		Ok(())
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn get(&self, id: &str) -> Option<&Item> {
		self.positions.get(id).map(|&pos| &self.items[pos])
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	// ── Favorites ─────────────────────────────────────────────────────────

	/// Returns `true` if the item was not already a favorite.
	pub fn add_favorite(&mut self, user_id: &str, item_id: &str) -> Result<bool, RecommendError> {
		if !self.positions.contains_key(item_id) {
			return Err(RecommendError::ItemNotFound(item_id.to_string()));
		}
		Ok(self
			.favorites
			.entry(user_id.to_string())
			.or_default()
			.insert(item_id.to_string()))
	}

	/// Returns `true` if the item was a favorite.
	pub fn remove_favorite(&mut self, user_id: &str, item_id: &str) -> bool {
		let Some(set) = self.favorites.get_mut(user_id) else {
			return false;
		};
		let removed = set.remove(item_id);
		if set.is_empty() {
			self.favorites.remove(user_id);
		}
		removed
	}

	pub fn clear_favorites(&mut self, user_id: &str) {
		self.favorites.remove(user_id);
	}

	/// The user's favorite items that are currently listed, in catalog order.
	pub fn favorites(&self, user_id: &str) -> Vec<Item> {
		let Some(ids) = self.favorites.get(user_id) else {
			return Vec::new();
		};
		self.items
			.iter()
			.filter(|item| ids.contains(&item.id))
			.cloned()
			.collect()
	}

	/// The full catalog and the user's listed favorites. Unknown users have no
	/// favorites.
	pub fn resolve(&self, user_id: &str) -> (&[Item], Vec<Item>) {
		(self.items(), self.favorites(user_id))
	}
}

fn index_items(items: &[Item]) -> Result<HashMap<String, usize>, RecommendError> {
	let mut positions = HashMap::with_capacity(items.len());
	for (pos, item) in items.iter().enumerate() {
		if positions.insert(item.id.clone(), pos).is_some() {
			tracing::warn!(id = %item.id, "rejecting catalog with duplicate item id");
			return Err(RecommendError::DuplicateItem(item.id.clone()));
		}
	}
	Ok(positions)
}
