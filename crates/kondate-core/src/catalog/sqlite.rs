//! # SQLite Catalog Source
//!
//! Loads the static recipe table into a [`CatalogStore`] exactly once.
//! List columns (keywords, ingredients, instructions) are stored as JSON
//! arrays; legacy rows may carry instructions as a plain text block,
//! which is split on newlines. All conversion happens here so that
//! downstream code only ever sees the typed [`Recipe`].

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::catalog::CatalogStore;
use crate::error::{KondateError, Result};
use crate::types::Recipe;

const SELECT_RECIPES: &str = "SELECT recipe_id, name, description, recipe_category, keywords, \
     ingredients, recipe_instructions, n_ingredients, total_time_minutes, calories, \
     fat_content, protein_content, sugar_content, carbohydrate_content, aggregated_rating \
     FROM recipes";

/// Opens the database read-only and loads the full catalog.
///
/// # Errors
///
/// Returns `KondateError::SqliteError` on storage failures and
/// `KondateError::CatalogLoadError` on malformed rows.
pub fn load(path: &Path) -> Result<CatalogStore> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let store = from_connection(&conn)?;
    info!(path = %path.display(), recipes = store.len(), "loaded catalog");
    Ok(store)
}

/// Loads the catalog from an already open connection. Test seam.
pub fn from_connection(conn: &Connection) -> Result<CatalogStore> {
    let mut stmt = conn.prepare(SELECT_RECIPES)?;
    let mut rows = stmt.query([])?;

    let mut recipes = Vec::new();
    while let Some(row) = rows.next()? {
        recipes.push(recipe_from_row(row)?);
    }
    CatalogStore::from_recipes(recipes)
}

fn recipe_from_row(row: &rusqlite::Row<'_>) -> Result<Recipe> {
    let mut recipe = Recipe::new(row.get(0)?);
    recipe.name = row.get(1)?;
    recipe.description = row.get(2)?;
    recipe.category = row.get(3)?;
    recipe.keywords = parse_json_list(recipe.id, "keywords", row.get(4)?)?;
    recipe.ingredients = parse_json_list(recipe.id, "ingredients", row.get(5)?)?;
    recipe.instructions = parse_instructions(recipe.id, row.get(6)?)?;
    recipe.ingredient_count = row.get::<_, Option<i64>>(7)?.map(|n| n as u32);
    recipe.total_time_minutes = row.get::<_, Option<i64>>(8)?.map(|n| n as u32);
    recipe.calories = row.get(9)?;
    recipe.fat_g = row.get(10)?;
    recipe.protein_g = row.get(11)?;
    recipe.sugar_g = row.get(12)?;
    recipe.carbs_g = row.get(13)?;
    recipe.rating = row.get(14)?;
    Ok(recipe)
}

/// Decodes a JSON array column. NULL becomes the empty list; malformed
/// JSON is a load error, not a silent null.
fn parse_json_list(id: i64, column: &str, value: Option<String>) -> Result<Vec<String>> {
    match value {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            KondateError::CatalogLoadError(format!(
                "recipe {id}: malformed {column} column: {e}"
            ))
        }),
    }
}

/// Instructions are a JSON array in current rows; legacy rows store a
/// single text block, accepted and split on newlines.
fn parse_instructions(id: i64, value: Option<String>) -> Result<Vec<String>> {
    match value {
        None => Ok(Vec::new()),
        Some(raw) if raw.trim_start().starts_with('[') => {
            serde_json::from_str(&raw).map_err(|e| {
                KondateError::CatalogLoadError(format!(
                    "recipe {id}: malformed recipe_instructions column: {e}"
                ))
            })
        }
        Some(raw) => Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
    }
}
