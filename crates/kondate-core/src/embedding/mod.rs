//! # Embedding
//!
//! Maps normalized text to fixed-length dense vectors. The trait seam
//! lets the orchestrator run against deterministic fakes in tests while
//! production wires in the MiniLM encoder.

pub mod minilm;

pub use minilm::MiniLmEmbedder;

/// A sentence embedder producing unit-normalized vectors.
///
/// Implementations must return a vector of [`dimension`](Self::dimension)
/// components with L2 norm 1, except for degenerate empty input where
/// the all-zero vector is returned instead of dividing by zero.
pub trait TextEmbedder: Send + Sync {
    /// Embed one text into a unit-normalized vector.
    ///
    /// Must accept the empty string (it yields a low-information vector
    /// of valid dimensionality, never an error).
    fn embed(&self, text: &str) -> crate::error::Result<Vec<f32>>;

    /// Dimensionality of every vector this embedder produces.
    fn dimension(&self) -> usize;
}
