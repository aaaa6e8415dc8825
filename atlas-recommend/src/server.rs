// ---------------------------------------------------------------------------
// RecommendServer -- JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to catalog,
// favorites and recommendation operations: a main `run()` loop, an
// `execute()` match, `with_catalog` / `with_catalog_mut` helpers, and
// free-standing handler functions for each method.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::RecommendError;
use crate::model_cache::ModelCache;
use crate::protocol::*;
use crate::recommendation::{clamp_max_results, rank_with_model};
use crate::transport::NdjsonTransport;
use crate::types::{Item, ScoredItem};

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// JSON-RPC server wrapping the catalog and the recommender.
pub struct RecommendServer {
	transport: NdjsonTransport,
	config: EngineConfig,
	catalog: Option<Catalog>,
	cache: ModelCache,
}

impl RecommendServer {
	/// Create a server with no catalog. The catalog arrives through
	/// `catalog/load` or [`RecommendServer::preload_catalog`].
	pub fn new(transport: NdjsonTransport, config: EngineConfig) -> Self {
		let cache = ModelCache::new(config.model_cache_size);
		Self {
			transport,
			config,
			catalog: None,
			cache,
		}
	}

	/// Start the server with an already loaded catalog.
	pub fn preload_catalog(mut self, catalog: Catalog) -> Self {
		self.catalog = Some(catalog);
		self
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), RecommendError> {
		let stdin = io::stdin();
		let reader = stdin.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	// ── Dispatch ──────────────────────────────────────────────────────────

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;
		let Some(result) = self.execute(&req.method, req.params) else {
			self.transport.write_error(
				id,
				METHOD_NOT_FOUND,
				format!("Unknown method: {}", req.method),
				None,
			);
			return;
		};

		match result {
			Ok(value) => self.transport.write_response(id, value),
			Err(e) => {
				tracing::warn!(method = %req.method, code = e.code(), "request failed: {}", e);
				self.transport.write_error(
					id,
					RECOMMEND_ERROR,
					e.to_string(),
					Some(e.to_json_rpc_error()),
				)
			}
		}
	}

	/// Run one method. `None` means the method is unknown.
	pub fn execute(
		&mut self,
		method: &str,
		params: serde_json::Value,
	) -> Option<Result<serde_json::Value, RecommendError>> {
		let result = match method {
			// -- Catalog -------------------------------------------------
			"catalog/load" => self.handle_catalog_load(params),
			"catalog/get" => self.with_catalog(|c| handle_catalog_get(c, params)),
			"catalog/size" => {
				self.with_catalog(|c| Ok(serde_json::json!({ "count": c.len() })))
			}

			// -- Favorites -----------------------------------------------
			"favorites/add" => self.with_catalog_mut(|c| handle_favorite_add(c, params)),
			"favorites/remove" => {
				self.with_catalog_mut(|c| handle_favorite_remove(c, params))
			}
			"favorites/list" => self.with_catalog(|c| handle_favorite_list(c, params)),
			"favorites/clear" => self.with_catalog_mut(|c| {
				let p: UserParams = parse_params(params)?;
				c.clear_favorites(&p.user_id);
				Ok(serde_json::json!({}))
			}),

			// -- Recommendation ------------------------------------------
			"recommend/user" => self.handle_recommend_user(params),
			"recommend/items" => self.handle_recommend_items(params),

			// -- Cache ---------------------------------------------------
			"cache/stats" => Ok(serde_json::json!({
				"entries": self.cache.len(),
				"capacity": self.cache.capacity(),
				"hits": self.cache.hits(),
				"misses": self.cache.misses(),
			})),

			_ => return None,
		};
		Some(result)
	}

	// ── Catalog accessors ─────────────────────────────────────────────────

	fn with_catalog<F>(&self, f: F) -> Result<serde_json::Value, RecommendError>
	where
		F: FnOnce(&Catalog) -> Result<serde_json::Value, RecommendError>,
	{
		match &self.catalog {
			Some(c) => f(c),
			None => Err(RecommendError::CatalogNotLoaded),
		}
	}

	fn with_catalog_mut<F>(&mut self, f: F) -> Result<serde_json::Value, RecommendError>
	where
		F: FnOnce(&mut Catalog) -> Result<serde_json::Value, RecommendError>,
	{
		match &mut self.catalog {
			Some(c) => f(c),
			None => Err(RecommendError::CatalogNotLoaded),
		}
	}

	fn max_results(&self, requested: Option<i64>) -> usize {
		match requested {
			Some(n) => clamp_max_results(n),
			None => self.config.default_max_results,
		}
	}

	// ── Stateful handlers ─────────────────────────────────────────────────

	fn handle_catalog_load(
		&mut self,
		params: serde_json::Value,
	) -> Result<serde_json::Value, RecommendError> {
		let p: CatalogLoadParams = parse_params(params)?;
		let count = p.items.len();

		match &mut self.catalog {
			Some(catalog) => catalog.replace_items(p.items)?,
			None => self.catalog = Some(Catalog::from_items(p.items)?),
		}

		tracing::info!(count, "catalog loaded");
		Ok(serde_json::json!({ "count": count }))
	}

	fn handle_recommend_user(
		&mut self,
		params: serde_json::Value,
	) -> Result<serde_json::Value, RecommendError> {
		let p: UserRecommendParams = parse_params(params)?;
		let max_results = self.max_results(p.max_results);
		let catalog = self.catalog.as_ref().ok_or(RecommendError::CatalogNotLoaded)?;

		let (corpus, liked) = catalog.resolve(&p.user_id);
		let ranked = rank_cached(&mut self.cache, corpus, &liked, max_results);
		tracing::debug!(
			user = %p.user_id,
			favorites = liked.len(),
			returned = ranked.len(),
			"recommended for user"
		);
		Ok(serde_json::json!({ "recommendations": ranked }))
	}

	fn handle_recommend_items(
		&mut self,
		params: serde_json::Value,
	) -> Result<serde_json::Value, RecommendError> {
		let p: ItemsRecommendParams = parse_params(params)?;
		let max_results = self.max_results(p.max_results);
		let ranked = rank_cached(&mut self.cache, &p.corpus, &p.liked, max_results);
		Ok(serde_json::json!({ "recommendations": ranked }))
	}
}

/// Rank through the model cache, skipping the model entirely when there is
/// nothing to rank.
fn rank_cached(
	cache: &mut ModelCache,
	corpus: &[Item],
	liked: &[Item],
	max_results: usize,
) -> Vec<ScoredItem> {
	if liked.is_empty() || corpus.is_empty() || max_results == 0 {
		return Vec::new();
	}
	let model = cache.get_or_build(corpus);
	rank_with_model(&model, corpus, liked, max_results)
}

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

fn parse_params<T: serde::de::DeserializeOwned>(
	params: serde_json::Value,
) -> Result<T, RecommendError> {
	serde_json::from_value(params).map_err(|e| RecommendError::InvalidParams(e.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_catalog_get(
	catalog: &Catalog,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommendError> {
	let p: IdParams = parse_params(params)?;
	let item = catalog
		.get(&p.id)
		.ok_or_else(|| RecommendError::ItemNotFound(p.id.clone()))?;
	Ok(serde_json::json!({ "item": item }))
}

fn handle_favorite_add(
	catalog: &mut Catalog,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommendError> {
	let p: FavoriteParams = parse_params(params)?;
	let added = catalog.add_favorite(&p.user_id, &p.item_id)?;
	Ok(serde_json::json!({ "added": added }))
}

fn handle_favorite_remove(
	catalog: &mut Catalog,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommendError> {
	let p: FavoriteParams = parse_params(params)?;
	let removed = catalog.remove_favorite(&p.user_id, &p.item_id);
	Ok(serde_json::json!({ "removed": removed }))
}

fn handle_favorite_list(
	catalog: &Catalog,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommendError> {
	let p: UserParams = parse_params(params)?;
	Ok(serde_json::json!({ "items": catalog.favorites(&p.user_id) }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
