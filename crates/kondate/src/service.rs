//! # Service Bootstrap
//!
//! One-time startup sequencing and the async boundary the HTTP
//! collaborator calls. The engine handle is set exactly once; requests
//! arriving before readiness are rejected with a retryable "not ready"
//! error, distinct from failures after readiness. Embedding inference
//! is CPU-bound, so the async wrappers run the synchronous pipeline on
//! the blocking thread pool instead of stalling the scheduler.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::task;
use tracing::{info, warn};

use kondate_core::{
    catalog, KondateError, MiniLmEmbedder, RecipeDetail, Result, SearchConfig, SearchEngine,
    SearchPage,
};
use kondate_vecdb::store;

/// Filesystem locations of the artifacts loaded at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding `tokenizer.json`, `config.json` and
    /// `model.safetensors`.
    pub model_dir: PathBuf,
    /// SQLite catalog database.
    pub catalog_path: PathBuf,
    /// Precomputed `(ids, embeddings)` safetensors file.
    pub vectors_path: PathBuf,
    /// Engine configuration.
    pub search: SearchConfig,
}

impl ServiceConfig {
    /// Conventional layout under a single data directory:
    /// `<root>/model`, `<root>/recipes.db`, `<root>/vectors.safetensors`.
    #[must_use]
    pub fn from_data_dir(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            model_dir: root.join("model"),
            catalog_path: root.join("recipes.db"),
            vectors_path: root.join("vectors.safetensors"),
            search: SearchConfig::default(),
        }
    }
}

/// Process-wide search service holding the immutable engine handle.
///
/// The handle is installed once; afterwards the service is shared
/// freely across tasks, since every request only reads.
#[derive(Default)]
pub struct Service {
    engine: OnceLock<Arc<SearchEngine>>,
}

impl Service {
    /// Creates a service with no engine installed. [`readiness`] is
    /// `false` until [`initialize`] or [`install`] completes.
    ///
    /// [`readiness`]: Self::readiness
    /// [`initialize`]: Self::initialize
    /// [`install`]: Self::install
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: OnceLock::new(),
        }
    }

    /// Runs the startup sequence: load model, load catalog, load
    /// vectors, build the engine, flip readiness.
    ///
    /// # Errors
    ///
    /// Propagates any artifact load or engine construction failure; the
    /// service stays not-ready in that case.
    pub fn initialize(&self, config: &ServiceConfig) -> Result<()> {
        let started = Instant::now();

        info!(model_dir = %config.model_dir.display(), "loading embedding model");
        let embedder = MiniLmEmbedder::load(&config.model_dir)?;

        info!(path = %config.catalog_path.display(), "loading catalog");
        let catalog = catalog::sqlite::load(&config.catalog_path)?;

        info!(path = %config.vectors_path.display(), "loading vector index");
        let index = store::load(&config.vectors_path)?;

        let engine = SearchEngine::new(
            config.search.clone(),
            Arc::new(embedder),
            index,
            catalog,
        )?;
        self.install(engine);

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "service ready"
        );
        Ok(())
    }

    /// Installs a pre-built engine (explicit handle bundle). Used by
    /// tests and embedding callers that assemble the pieces themselves.
    ///
    /// Startup is one-time: if an engine is already installed the call
    /// is ignored with a warning, so racing initializers cannot swap
    /// handles mid-flight.
    pub fn install(&self, engine: SearchEngine) {
        if self.engine.set(Arc::new(engine)).is_err() {
            warn!("service already initialized, keeping the existing engine");
        }
    }

    /// `true` only after startup sequencing completed.
    #[must_use]
    pub fn readiness(&self) -> bool {
        self.engine.get().is_some()
    }

    fn engine(&self) -> Result<Arc<SearchEngine>> {
        self.engine.get().cloned().ok_or(KondateError::NotReady)
    }

    /// Async search wrapper. The pipeline runs on the blocking thread
    /// pool.
    ///
    /// # Errors
    ///
    /// `KondateError::NotReady` before initialization; otherwise the
    /// engine's own errors.
    pub async fn search(&self, query: &str, offset: usize, limit: usize) -> Result<SearchPage> {
        let engine = self.engine()?;
        let query = query.to_string();
        task::spawn_blocking(move || engine.search(&query, offset, limit))
            .await
            .map_err(|e| KondateError::TaskFailed(e.to_string()))?
    }

    /// Async detail wrapper.
    ///
    /// # Errors
    ///
    /// `KondateError::NotReady` before initialization,
    /// `KondateError::RecipeNotFound` for unknown ids.
    pub async fn detail(&self, id: i64) -> Result<RecipeDetail> {
        let engine = self.engine()?;
        task::spawn_blocking(move || engine.detail(id))
            .await
            .map_err(|e| KondateError::TaskFailed(e.to_string()))?
    }
}
