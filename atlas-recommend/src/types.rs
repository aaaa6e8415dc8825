use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A place in the catalog.
///
/// The text fields are always present: records arriving with a missing or
/// `null` name, description or region are normalized to empty strings when
/// they are decoded (see [`RawItem`]). Any other fields of the incoming record
/// are kept in `attributes` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem")]
pub struct Item {
	pub id: String,
	pub name: String,
	pub description: String,
	pub region: String,
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl Item {
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		description: impl Into<String>,
		region: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: description.into(),
			region: region.into(),
			attributes: Map::new(),
		}
	}
}

/// Wire shape of an item before normalization.
#[derive(Debug, Deserialize)]
pub struct RawItem {
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub region: Option<String>,
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl From<RawItem> for Item {
	fn from(raw: RawItem) -> Self {
		Self {
			id: raw.id,
			name: raw.name.unwrap_or_default(),
			description: raw.description.unwrap_or_default(),
			region: raw.region.unwrap_or_default(),
			attributes: raw.attributes,
		}
	}
}

/// A recommended item together with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
	pub item: Item,
	pub score: f64,
}
