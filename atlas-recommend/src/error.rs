use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
	#[error("Catalog not loaded: call catalog/load first")]
	CatalogNotLoaded,
	#[error("Item not found: {0}")]
	ItemNotFound(String),
	#[error("Duplicate item id in catalog: {0}")]
	DuplicateItem(String),
	#[error("Invalid params: {0}")]
	InvalidParams(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl RecommendError {
	pub fn code(&self) -> &str {
		match self {
			Self::CatalogNotLoaded => "CATALOG_NOT_LOADED",
			Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
			Self::DuplicateItem(_) => "DUPLICATE_ITEM",
			Self::InvalidParams(_) => "INVALID_PARAMS",
			Self::Io(_) => "IO",
			Self::Serialization(_) => "SERIALIZATION",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"code": self.code(),
			"message": self.to_string(),
		})
	}
}

impl From<serde_json::Error> for RecommendError {
	fn from(e: serde_json::Error) -> Self {
		Self::Serialization(e.to_string())
	}
}
