//! # Search Engine
//!
//! The orchestrator composing normalizer, embedder, vector index and
//! catalog store into the query→results pipeline. The engine owns
//! pagination and result shaping; it holds read-only handles and never
//! mutates shared state, so one instance serves all concurrent
//! requests.

use std::sync::Arc;

use tracing::{debug, error};

use kondate_vecdb::VectorIndex;

use crate::catalog::CatalogStore;
use crate::embedding::TextEmbedder;
use crate::error::{KondateError, Result};
use crate::search::config::SearchConfig;
use crate::text::TextNormalizer;
use crate::types::{RecipeDetail, SearchHit, SearchPage};

/// Read-only search pipeline over an immutable handle bundle.
pub struct SearchEngine {
    config: SearchConfig,
    normalizer: TextNormalizer,
    embedder: Arc<dyn TextEmbedder>,
    index: VectorIndex,
    catalog: CatalogStore,
}

impl SearchEngine {
    /// Create an engine from the loaded handle bundle.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::DimensionMismatch` if the embedder and
    /// the index disagree on vector dimensionality.
    pub fn new(
        config: SearchConfig,
        embedder: Arc<dyn TextEmbedder>,
        index: VectorIndex,
        catalog: CatalogStore,
    ) -> Result<Self> {
        if embedder.dimension() != index.dimension() {
            return Err(KondateError::DimensionMismatch {
                embedder: embedder.dimension(),
                index: index.dimension(),
            });
        }
        let normalizer = TextNormalizer::new()?;
        Ok(Self {
            config,
            normalizer,
            embedder,
            index,
            catalog,
        })
    }

    /// Run the full search pipeline and return the requested page.
    ///
    /// A blank query and an out-of-bounds limit are rejected before any
    /// embedding call. A query that merely normalizes to empty text is
    /// processed normally and yields a low-quality ranking. Candidates
    /// whose id is absent from the catalog are skipped without failing
    /// the request and do not count toward `total`.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::BlankQuery` or `KondateError::InvalidLimit`
    /// for usage errors, and propagates embedding/index failures.
    pub fn search(&self, query: &str, offset: usize, limit: usize) -> Result<SearchPage> {
        if query.trim().is_empty() {
            return Err(KondateError::BlankQuery);
        }
        if limit == 0 || limit > self.config.max_limit {
            return Err(KondateError::InvalidLimit {
                max: self.config.max_limit,
                actual: limit,
            });
        }

        let cleaned = self.normalizer.normalize(query);
        debug!(cleaned = %cleaned, "normalized query");

        let vector = self.embedder.embed(&cleaned).inspect_err(|e| {
            error!(query_len = query.len(), stage = "embed", "search failed: {e}");
        })?;
        let candidates = self
            .index
            .query(&vector, self.config.candidate_pool)
            .inspect_err(|e| {
                error!(query_len = query.len(), stage = "index", "search failed: {e}");
            })?;

        // Ranked hydration: a missing id must never fail the request.
        let mut resolved = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.catalog.get(candidate.id) {
                Some(recipe) => resolved.push((candidate, recipe)),
                None => debug!(id = candidate.id, "candidate absent from catalog, skipped"),
            }
        }

        let total = resolved.len();
        let results: Vec<SearchHit> = resolved
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(candidate, recipe)| SearchHit {
                id: candidate.id,
                score: candidate.score,
                card: recipe.card(),
            })
            .collect();

        debug!(total, returned = results.len(), offset, limit, "search completed");
        Ok(SearchPage {
            results,
            total,
            offset,
            limit,
        })
    }

    /// Full-detail lookup by identifier.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::RecipeNotFound` if the id is absent.
    pub fn detail(&self, id: i64) -> Result<RecipeDetail> {
        self.catalog
            .get(id)
            .map(|recipe| recipe.detail())
            .ok_or(KondateError::RecipeNotFound(id))
    }

    /// Number of recipes the engine can serve.
    #[must_use]
    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
