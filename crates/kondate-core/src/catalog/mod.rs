//! # Catalog Store
//!
//! In-memory table of recipes keyed by identifier. Built once at
//! startup from the static source and never mutated afterwards; every
//! lookup is a direct keyed read. Absence of an id is an expected
//! condition, not an error.

pub mod sqlite;

use std::collections::HashMap;

use crate::error::{KondateError, Result};
use crate::types::Recipe;

/// Read-only recipe table with O(1) lookup by identifier.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    recipes: HashMap<i64, Recipe>,
}

impl CatalogStore {
    /// Builds a store from fully converted recipes.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::CatalogLoadError` if the same identifier
    /// appears more than once.
    pub fn from_recipes<I>(recipes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Recipe>,
    {
        let mut map = HashMap::new();
        for recipe in recipes {
            let id = recipe.id;
            if map.insert(id, recipe).is_some() {
                return Err(KondateError::CatalogLoadError(format!(
                    "duplicate recipe id {id}"
                )));
            }
        }
        Ok(Self { recipes: map })
    }

    /// Looks up a recipe by identifier. `None` means the id is absent,
    /// which callers handle as a normal condition.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    /// Returns `true` if the identifier exists in the catalog.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.recipes.contains_key(&id)
    }

    /// Number of recipes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns `true` if the catalog holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate all recipes in unspecified order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: i64, name: &str) -> Recipe {
        let mut recipe = Recipe::new(id);
        recipe.name = Some(name.into());
        recipe
    }

    #[test]
    fn get_returns_loaded_recipe() {
        let store = CatalogStore::from_recipes(vec![named(1, "Miso Soup")]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name.as_deref(), Some("Miso Soup"));
    }

    #[test]
    fn get_absent_id_is_none_not_error() {
        let store = CatalogStore::from_recipes(vec![named(1, "Miso Soup")]).unwrap();
        assert!(store.get(999).is_none());
        assert!(!store.contains(999));
    }

    #[test]
    fn duplicate_ids_are_a_load_error() {
        let result = CatalogStore::from_recipes(vec![named(1, "A"), named(1, "B")]);
        assert!(matches!(result, Err(KondateError::CatalogLoadError(_))));
    }

    #[test]
    fn empty_store() {
        let store = CatalogStore::from_recipes(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.get(1).is_none());
    }
}
