//! # Core Types
//!
//! Boundary data structures for the search pipeline: the catalog recipe
//! with its two projections, and the paginated result shapes.

pub mod page;
pub mod recipe;

pub use page::{SearchHit, SearchPage};
pub use recipe::{Recipe, RecipeCard, RecipeDetail};
