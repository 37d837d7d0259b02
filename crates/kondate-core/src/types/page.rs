use serde::{Deserialize, Serialize};

use super::recipe::RecipeCard;

/// One ranked search result: identifier, raw similarity score and the
/// compact card projection of the resolved recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Catalog identifier of the matched recipe.
    pub id: i64,

    /// Cosine similarity against the query (practically `[0, 1]` for
    /// this domain).
    pub score: f32,

    /// Compact projection for list presentation.
    pub card: RecipeCard,
}

/// A window over the ranked, resolved result sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Hits in rank order, sliced at `[offset, offset + limit)`.
    pub results: Vec<SearchHit>,

    /// Number of resolved hits before windowing. Invariant across
    /// different `offset`/`limit` values for the same query.
    pub total: usize,

    /// Offset this page was sliced at.
    pub offset: usize,

    /// Requested page size (the page may hold fewer hits).
    pub limit: usize,
}

impl SearchPage {
    /// Number of hits on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if this page holds no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
