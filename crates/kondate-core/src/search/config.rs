/// Default page size, exported for boundary collaborators.
pub const DEFAULT_LIMIT: usize = 20;

/// Configuration for the search engine.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How many candidates to over-fetch from the vector index before
    /// hydration, so a page survives candidates dropped during the
    /// catalog join without a second round trip.
    pub candidate_pool: usize,
    /// Largest page size a caller may request.
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_pool: 100,
            max_limit: 100,
        }
    }
}

impl SearchConfig {
    /// Create a new search configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate over-fetch size (clamped to at least 1).
    #[must_use]
    pub fn with_candidate_pool(mut self, pool: usize) -> Self {
        self.candidate_pool = pool.max(1);
        self
    }

    /// Set the largest accepted page size (clamped to at least 1).
    #[must_use]
    pub fn with_max_limit(mut self, max: usize) -> Self {
        self.max_limit = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.candidate_pool, 100);
        assert_eq!(config.max_limit, 100);
    }

    #[test]
    fn builders_set_values() {
        let config = SearchConfig::new()
            .with_candidate_pool(500)
            .with_max_limit(50);
        assert_eq!(config.candidate_pool, 500);
        assert_eq!(config.max_limit, 50);
    }

    #[test]
    fn builders_clamp_zero_to_one() {
        let config = SearchConfig::new().with_candidate_pool(0).with_max_limit(0);
        assert_eq!(config.candidate_pool, 1);
        assert_eq!(config.max_limit, 1);
    }
}
