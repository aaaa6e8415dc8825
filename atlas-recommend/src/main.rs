use atlas_recommend::catalog::Catalog;
use atlas_recommend::config::{CliArgs, EngineConfig};
use atlas_recommend::server::RecommendServer;
use atlas_recommend::transport::NdjsonTransport;
use clap::Parser;

fn main() {
	let args = CliArgs::parse();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	let config = EngineConfig::from(&args);
	let mut server = RecommendServer::new(NdjsonTransport::new(), config.clone());

	if let Some(path) = &config.catalog_path {
		match Catalog::load_file(path) {
			Ok(catalog) => server = server.preload_catalog(catalog),
			Err(e) => {
				tracing::error!("Failed to load catalog {}: {}", path.display(), e);
				std::process::exit(1);
			}
		}
	}

	tracing::info!("atlas-recommend ready");

	if let Err(e) = server.run() {
		tracing::error!("Server error: {}", e);
		std::process::exit(1);
	}
}
