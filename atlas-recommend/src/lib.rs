//! Content-based recommender for a points-of-interest catalog.
//!
//! [`recommendation::recommend`] ranks the places a user has not favorited
//! by TF-IDF similarity to the ones they have. The rest of the crate wraps it
//! in a stdio JSON-RPC engine that keeps the catalog and per-user favorites
//! handed over by the host application.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model_cache;
pub mod protocol;
pub mod recommendation;
pub mod server;
pub mod text;
pub mod tfidf;
pub mod transport;
pub mod types;

pub use error::RecommendError;
pub use recommendation::{rank, recommend, DEFAULT_MAX_RESULTS};
pub use types::{Item, ScoredItem};
