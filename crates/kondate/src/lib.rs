//! # Kondate
//!
//! Semantic recipe search: natural-language queries over a fixed
//! catalog, ranked by embedding similarity instead of keyword match.
//!
//! This facade re-exports the core pipeline from [`kondate_core`] and
//! the vector index from [`kondate_vecdb`], and adds the process-wide
//! [`Service`] that owns startup sequencing and the async request
//! boundary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kondate::{Service, ServiceConfig};
//!
//! # async fn run() -> kondate::Result<()> {
//! let service = Service::new();
//! service.initialize(&ServiceConfig::from_data_dir("data"))?;
//!
//! let page = service.search("quick pasta dinner", 0, 20).await?;
//! for hit in &page.results {
//!     println!("{} ({:.3})", hit.id, hit.score);
//! }
//! # Ok(())
//! # }
//! ```
pub mod service;

// Re-export primary API
pub use kondate_core::{
    CatalogStore, ErrorKind, KondateError, MiniLmEmbedder, Recipe, RecipeCard, RecipeDetail,
    Result, SearchConfig, SearchEngine, SearchHit, SearchPage, TextEmbedder, TextNormalizer,
    DEFAULT_LIMIT,
};
pub use kondate_vecdb::{ScoredId, VectorIndex};
pub use service::{Service, ServiceConfig};
