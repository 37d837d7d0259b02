//! Catalog Sync Tool
//!
//! Builds the artifacts the Kondate runtime consumes: downloads the
//! sentence encoder, embeds every catalog recipe into the vector file,
//! and verifies that the artifacts agree with each other.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use kondate_core::{catalog, MiniLmEmbedder, TextEmbedder, TextNormalizer};
use kondate_vecdb::{store, VectorIndex};

/// Hugging Face location of the bundled sentence encoder.
const MODEL_BASE_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main";

/// Artifacts the encoder needs at load time.
const MODEL_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// CLI arguments
#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(about = "Build and verify the Kondate catalog artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite catalog database
    #[arg(short, long, env = "KONDATE_CATALOG_DB", default_value = "data/recipes.db")]
    catalog: PathBuf,

    /// Precomputed vector file
    #[arg(short, long, env = "KONDATE_VECTORS", default_value = "data/vectors.safetensors")]
    vectors: PathBuf,

    /// Directory holding the encoder files
    #[arg(short, long, env = "KONDATE_MODEL_DIR", default_value = "data/model")]
    model_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed every catalog recipe and write the vector file
    Build {
        /// Overwrite an existing vector file
        #[arg(short, long)]
        force: bool,
    },
    /// Download the sentence encoder files
    FetchModel {
        /// Re-download files that already exist
        #[arg(short, long)]
        force: bool,
    },
    /// Check that the vector file agrees with the catalog
    Verify,
    /// Show artifact paths and counts
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build { force } => build(&cli.catalog, &cli.vectors, &cli.model_dir, force),
        Commands::FetchModel { force } => fetch_model(&cli.model_dir, force),
        Commands::Verify => verify(&cli.catalog, &cli.vectors),
        Commands::Status => status(&cli.catalog, &cli.vectors, &cli.model_dir),
    }
}

/// Embed each recipe's composed document, normalized exactly like live
/// queries, and write the `(ids, embeddings)` vector file.
fn build(catalog_path: &Path, vectors_path: &Path, model_dir: &Path, force: bool) -> Result<()> {
    if vectors_path.exists() && !force {
        bail!(
            "vector file already exists at {} (use --force to rebuild)",
            vectors_path.display()
        );
    }

    let store_handle =
        catalog::sqlite::load(catalog_path).context("failed to load catalog database")?;
    if store_handle.is_empty() {
        bail!("catalog at {} holds no recipes", catalog_path.display());
    }

    info!(model_dir = %model_dir.display(), "loading embedding model");
    let embedder =
        MiniLmEmbedder::load(model_dir).context("failed to load embedding model")?;
    let embedder: Arc<dyn TextEmbedder> = Arc::new(embedder);
    let normalizer = TextNormalizer::new().context("failed to build text normalizer")?;

    // Stable artifact: embed in ascending id order.
    let mut recipes: Vec<_> = store_handle.recipes().collect();
    recipes.sort_by_key(|recipe| recipe.id);

    info!(recipes = recipes.len(), "embedding catalog documents");
    let mut entries = Vec::with_capacity(recipes.len());
    for (n, recipe) in recipes.iter().enumerate() {
        let document = normalizer.normalize(&recipe.embedding_document());
        let vector = embedder
            .embed(&document)
            .with_context(|| format!("failed to embed recipe {}", recipe.id))?;
        entries.push((recipe.id, vector));
        if (n + 1) % 1000 == 0 {
            info!(embedded = n + 1, total = recipes.len(), "embedding progress");
        }
    }

    let index = VectorIndex::build(entries, embedder.dimension())
        .context("failed to build vector index")?;
    if let Some(parent) = vectors_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    store::save(&index, vectors_path).context("failed to write vector file")?;

    info!(
        path = %vectors_path.display(),
        vectors = index.len(),
        dimension = index.dimension(),
        "vector file written"
    );
    Ok(())
}

/// Download `config.json`, `tokenizer.json` and `model.safetensors`
/// into the model directory.
fn fetch_model(model_dir: &Path, force: bool) -> Result<()> {
    std::fs::create_dir_all(model_dir)
        .with_context(|| format!("failed to create {}", model_dir.display()))?;

    for file in MODEL_FILES {
        let target = model_dir.join(file);
        if target.exists() && !force {
            info!(file, "already present, skipping");
            continue;
        }

        let url = format!("{MODEL_BASE_URL}/{file}");
        info!(%url, "downloading");
        let response = reqwest::blocking::get(&url)
            .with_context(|| format!("failed to download {url}"))?
            .error_for_status()
            .with_context(|| format!("server rejected {url}"))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("failed to read body of {url}"))?;

        // Write to a temp name first so a partial download never
        // masquerades as a complete artifact.
        let partial = model_dir.join(format!("{file}.part"));
        std::fs::write(&partial, &bytes)
            .with_context(|| format!("failed to write {}", partial.display()))?;
        std::fs::rename(&partial, &target)
            .with_context(|| format!("failed to move {} into place", partial.display()))?;

        info!(file, bytes = bytes.len(), "downloaded");
    }

    info!(model_dir = %model_dir.display(), "model ready");
    Ok(())
}

/// Check that every vector id exists in the catalog and report the
/// dimensionality.
fn verify(catalog_path: &Path, vectors_path: &Path) -> Result<()> {
    let store_handle =
        catalog::sqlite::load(catalog_path).context("failed to load catalog database")?;
    let index = store::load(vectors_path).context("failed to load vector file")?;

    let missing: Vec<i64> = index
        .entries()
        .map(|(id, _)| id)
        .filter(|&id| !store_handle.contains(id))
        .collect();

    info!(
        recipes = store_handle.len(),
        vectors = index.len(),
        dimension = index.dimension(),
        "artifacts loaded"
    );

    if !missing.is_empty() {
        for id in missing.iter().take(10) {
            warn!(id, "vector id absent from catalog");
        }
        bail!(
            "{} vector id(s) are not present in the catalog",
            missing.len()
        );
    }
    if index.len() < store_handle.len() {
        warn!(
            unindexed = store_handle.len() - index.len(),
            "some catalog recipes have no vector and will never be retrieved"
        );
    }

    println!("ok: {} vectors ({}-dim) over {} recipes", index.len(), index.dimension(), store_handle.len());
    Ok(())
}

/// Print artifact paths and counts without failing on missing pieces.
fn status(catalog_path: &Path, vectors_path: &Path, model_dir: &Path) -> Result<()> {
    println!("catalog:  {}", catalog_path.display());
    match catalog::sqlite::load(catalog_path) {
        Ok(store_handle) => println!("          {} recipes", store_handle.len()),
        Err(e) => println!("          unavailable ({e})"),
    }

    println!("vectors:  {}", vectors_path.display());
    match store::load(vectors_path) {
        Ok(index) => println!(
            "          {} vectors, {} dimensions",
            index.len(),
            index.dimension()
        ),
        Err(e) => println!("          unavailable ({e})"),
    }

    println!("model:    {}", model_dir.display());
    for file in MODEL_FILES {
        let present = if model_dir.join(file).exists() {
            "present"
        } else {
            "missing"
        };
        println!("          {file}: {present}");
    }
    Ok(())
}
