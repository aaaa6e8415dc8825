use serde::Deserialize;

use crate::types::Item;

// ── JSON-RPC 2.0 error codes ────────────────────────────────────────────────

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const RECOMMEND_ERROR: i32 = -32000;

// ── Incoming request ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
	pub id: u64,
	pub method: String,
	#[serde(default)]
	pub params: serde_json::Value,
}

// ── Params ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLoadParams {
	pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdParams {
	pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
	pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteParams {
	pub user_id: String,
	pub item_id: String,
}

/// `maxResults` is signed so zero and negative requests decode and yield an
/// empty result instead of a params error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecommendParams {
	pub user_id: String,
	pub max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsRecommendParams {
	pub corpus: Vec<Item>,
	#[serde(default)]
	pub liked: Vec<Item>,
	pub max_results: Option<i64>,
}
