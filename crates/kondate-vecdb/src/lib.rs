//! # Kondate VecDB
//!
//! Embedded vector index for semantic recipe retrieval. Holds one
//! unit-normalized embedding per catalog recipe, answers top-k cosine
//! queries by brute-force dot product, and persists the `(ids,
//! embeddings)` artifact as a safetensors file.
//!
//! ## Quick Start
//!
//! ```rust
//! use kondate_vecdb::VectorIndex;
//!
//! let entries = vec![(1, vec![1.0, 0.0]), (2, vec![0.0, 1.0])];
//! let index = VectorIndex::build(entries, 2).unwrap();
//!
//! let hits = index.query(&[1.0, 0.0], 1).unwrap();
//! assert_eq!(hits[0].id, 1);
//! ```
pub mod error;
pub mod index;
pub mod store;

// Re-export primary API
pub use error::{Result, VecdbError};
pub use index::{l2_normalize, ScoredId, VectorIndex};
