//! # Kondate Core
//!
//! The heart of the Kondate semantic recipe search engine. Provides
//! deterministic text normalization, MiniLM sentence embedding, vector
//! retrieval orchestration, and the catalog/result data types.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kondate_core::{CatalogStore, Recipe, SearchConfig, SearchEngine, TextEmbedder};
//! use kondate_vecdb::VectorIndex;
//!
//! struct FixedEmbedder(Vec<f32>);
//!
//! impl TextEmbedder for FixedEmbedder {
//!     fn embed(&self, _text: &str) -> kondate_core::Result<Vec<f32>> {
//!         Ok(self.0.clone())
//!     }
//!     fn dimension(&self) -> usize {
//!         self.0.len()
//!     }
//! }
//!
//! let mut recipe = Recipe::new(123);
//! recipe.name = Some("Quick Pasta Carbonara".into());
//!
//! let index = VectorIndex::build(vec![(123, vec![1.0, 0.0])], 2).unwrap();
//! let catalog = CatalogStore::from_recipes(vec![recipe]).unwrap();
//! let engine = SearchEngine::new(
//!     SearchConfig::default(),
//!     Arc::new(FixedEmbedder(vec![1.0, 0.0])),
//!     index,
//!     catalog,
//! )
//! .unwrap();
//!
//! let page = engine.search("quick pasta dinner", 0, 20).unwrap();
//! assert_eq!(page.results[0].id, 123);
//! ```
pub mod catalog;
pub mod embedding;
pub mod error;
pub mod search;
pub mod text;
pub mod types;

// Re-export primary API
pub use catalog::CatalogStore;
pub use embedding::{MiniLmEmbedder, TextEmbedder};
pub use error::{ErrorKind, KondateError, Result};
pub use search::{SearchConfig, SearchEngine, DEFAULT_LIMIT};
pub use text::TextNormalizer;
pub use types::{Recipe, RecipeCard, RecipeDetail, SearchHit, SearchPage};
