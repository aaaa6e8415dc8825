use std::path::PathBuf;

use clap::Parser;

use crate::model_cache::DEFAULT_CAPACITY;
use crate::recommendation::DEFAULT_MAX_RESULTS;

#[derive(Parser, Debug)]
#[command(
	name = "atlas-recommend",
	about = "Points-of-interest recommender over JSON-RPC 2.0 / NDJSON stdio"
)]
pub struct CliArgs {
	/// JSON catalog to load at startup (array of items, or `{ "items": [...] }`)
	#[arg(long, env = "ATLAS_CATALOG")]
	pub catalog: Option<PathBuf>,

	/// Recommendations returned when a request does not set `maxResults`
	#[arg(long, default_value_t = DEFAULT_MAX_RESULTS, env = "ATLAS_DEFAULT_MAX_RESULTS")]
	pub default_max_results: usize,

	/// Number of TF-IDF models kept in memory (0 disables caching)
	#[arg(long, default_value_t = DEFAULT_CAPACITY, env = "ATLAS_MODEL_CACHE_SIZE")]
	pub model_cache_size: usize,

	/// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
	#[arg(long, default_value = "info", env = "ATLAS_LOG_LEVEL")]
	pub log_level: String,
}

/// Runtime settings of the engine, independent of how they were supplied.
#[derive(Debug, Clone)]
pub struct EngineConfig {
	pub catalog_path: Option<PathBuf>,
	pub default_max_results: usize,
	pub model_cache_size: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			catalog_path: None,
			default_max_results: DEFAULT_MAX_RESULTS,
			model_cache_size: DEFAULT_CAPACITY,
		}
	}
}

impl From<&CliArgs> for EngineConfig {
	fn from(args: &CliArgs) -> Self {
		Self {
			catalog_path: args.catalog.clone(),
			default_max_results: args.default_max_results,
			model_cache_size: args.model_cache_size,
		}
	}
}
