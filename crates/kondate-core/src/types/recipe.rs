use serde::{Deserialize, Serialize};

/// Reference daily values in grams for the derived nutrient
/// percentages.
const DAILY_FAT_G: f64 = 78.0;
const DAILY_PROTEIN_G: f64 = 50.0;
const DAILY_SUGAR_G: f64 = 50.0;
const DAILY_CARBS_G: f64 = 275.0;

/// A catalog recipe, converted once at load time from the raw source
/// row.
///
/// The identifier is the only mandatory field. Every other field may be
/// absent in the source data; absence propagates as `None`, never as
/// zero, so downstream code can tell "unknown" apart from a real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, stable catalog identifier.
    pub id: i64,

    /// Recipe name.
    pub name: Option<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Category (e.g., "Dessert", "One Dish Meal").
    pub category: Option<String>,

    /// Ordered keyword tags.
    pub keywords: Vec<String>,

    /// Ordered ingredient strings.
    pub ingredients: Vec<String>,

    /// Ordered instruction steps.
    pub instructions: Vec<String>,

    /// Number of distinct ingredients.
    pub ingredient_count: Option<u32>,

    /// Total preparation plus cooking time in minutes.
    pub total_time_minutes: Option<u32>,

    /// Energy in kilocalories.
    pub calories: Option<f64>,

    /// Fat content in grams.
    pub fat_g: Option<f64>,

    /// Protein content in grams.
    pub protein_g: Option<f64>,

    /// Sugar content in grams.
    pub sugar_g: Option<f64>,

    /// Carbohydrate content in grams.
    pub carbs_g: Option<f64>,

    /// Aggregated user rating.
    pub rating: Option<f64>,
}

impl Recipe {
    /// Creates a new `Recipe` with every optional field absent.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            description: None,
            category: None,
            keywords: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            ingredient_count: None,
            total_time_minutes: None,
            calories: None,
            fat_g: None,
            protein_g: None,
            sugar_g: None,
            carbs_g: None,
            rating: None,
        }
    }

    /// Composes the text embedded for this recipe: name, category,
    /// keywords and description in that order, skipping absent fields,
    /// joined with single spaces.
    ///
    /// The catalog build tool and any future re-index must use this
    /// single definition so that document and query vectors stay
    /// comparable.
    #[must_use]
    pub fn embedding_document(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(ref name) = self.name {
            parts.push(name);
        }
        if let Some(ref category) = self.category {
            parts.push(category);
        }
        for keyword in &self.keywords {
            parts.push(keyword);
        }
        if let Some(ref description) = self.description {
            parts.push(description);
        }
        parts.join(" ")
    }

    /// Compact projection for search result lists.
    #[must_use]
    pub fn card(&self) -> RecipeCard {
        RecipeCard {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            keywords: self.keywords.clone(),
            ingredient_count: self.ingredient_count,
            total_time_minutes: self.total_time_minutes,
            calories: self.calories,
            rating: self.rating,
        }
    }

    /// Full projection for the single-recipe detail view, including the
    /// derived percentage-of-daily-value fields.
    #[must_use]
    pub fn detail(&self) -> RecipeDetail {
        RecipeDetail {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            keywords: self.keywords.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            ingredient_count: self.ingredient_count,
            total_time_minutes: self.total_time_minutes,
            calories: self.calories,
            fat_g: self.fat_g,
            protein_g: self.protein_g,
            sugar_g: self.sugar_g,
            carbs_g: self.carbs_g,
            rating: self.rating,
            fat_pct: daily_value_pct(self.fat_g, DAILY_FAT_G),
            protein_pct: daily_value_pct(self.protein_g, DAILY_PROTEIN_G),
            sugar_pct: daily_value_pct(self.sugar_g, DAILY_SUGAR_G),
            carbs_pct: daily_value_pct(self.carbs_g, DAILY_CARBS_G),
        }
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recipe(id={}", self.id)?;
        if let Some(ref name) = self.name {
            write!(f, ", name={name:?}")?;
        }
        write!(f, ")")
    }
}

/// Percentage of the reference daily value, present only when the gram
/// value is present.
fn daily_value_pct(grams: Option<f64>, reference: f64) -> Option<f64> {
    grams.map(|g| g / reference * 100.0)
}

/// Compact recipe projection returned in search result lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCard {
    /// Catalog identifier.
    pub id: i64,
    /// Recipe name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Ordered keyword tags.
    pub keywords: Vec<String>,
    /// Number of distinct ingredients.
    pub ingredient_count: Option<u32>,
    /// Total time in minutes.
    pub total_time_minutes: Option<u32>,
    /// Energy in kilocalories.
    pub calories: Option<f64>,
    /// Aggregated user rating.
    pub rating: Option<f64>,
}

/// Full recipe projection returned by the detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Catalog identifier.
    pub id: i64,
    /// Recipe name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Ordered keyword tags.
    pub keywords: Vec<String>,
    /// Ordered ingredient strings.
    pub ingredients: Vec<String>,
    /// Ordered instruction steps.
    pub instructions: Vec<String>,
    /// Number of distinct ingredients.
    pub ingredient_count: Option<u32>,
    /// Total time in minutes.
    pub total_time_minutes: Option<u32>,
    /// Energy in kilocalories.
    pub calories: Option<f64>,
    /// Fat content in grams.
    pub fat_g: Option<f64>,
    /// Protein content in grams.
    pub protein_g: Option<f64>,
    /// Sugar content in grams.
    pub sugar_g: Option<f64>,
    /// Carbohydrate content in grams.
    pub carbs_g: Option<f64>,
    /// Aggregated user rating.
    pub rating: Option<f64>,
    /// Fat as a percentage of the reference daily value.
    pub fat_pct: Option<f64>,
    /// Protein as a percentage of the reference daily value.
    pub protein_pct: Option<f64>,
    /// Sugar as a percentage of the reference daily value.
    pub sugar_pct: Option<f64>,
    /// Carbohydrate as a percentage of the reference daily value.
    pub carbs_pct: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        let mut recipe = Recipe::new(123);
        recipe.name = Some("Quick Pasta Carbonara".into());
        recipe.description = Some("Weeknight carbonara in 20 minutes".into());
        recipe.category = Some("One Dish Meal".into());
        recipe.keywords = vec!["pasta".into(), "quick".into()];
        recipe.ingredients = vec!["spaghetti".into(), "eggs".into(), "pancetta".into()];
        recipe.instructions = vec!["Boil pasta".into(), "Toss with sauce".into()];
        recipe.ingredient_count = Some(3);
        recipe.total_time_minutes = Some(20);
        recipe.calories = Some(620.0);
        recipe.fat_g = Some(39.0);
        recipe.protein_g = Some(25.0);
        recipe.sugar_g = Some(5.0);
        recipe.carbs_g = Some(55.0);
        recipe.rating = Some(4.5);
        recipe
    }

    #[test]
    fn new_recipe_has_no_values() {
        let recipe = Recipe::new(7);
        assert_eq!(recipe.id, 7);
        assert!(recipe.name.is_none());
        assert!(recipe.keywords.is_empty());
        assert!(recipe.calories.is_none());
    }

    #[test]
    fn embedding_document_joins_present_fields_in_order() {
        let recipe = sample();
        assert_eq!(
            recipe.embedding_document(),
            "Quick Pasta Carbonara One Dish Meal pasta quick Weeknight carbonara in 20 minutes"
        );
    }

    #[test]
    fn embedding_document_skips_absent_fields() {
        let mut recipe = Recipe::new(1);
        recipe.name = Some("Plain Rice".into());
        assert_eq!(recipe.embedding_document(), "Plain Rice");

        let empty = Recipe::new(2);
        assert_eq!(empty.embedding_document(), "");
    }

    #[test]
    fn card_is_the_compact_subset() {
        let card = sample().card();
        assert_eq!(card.id, 123);
        assert_eq!(card.name.as_deref(), Some("Quick Pasta Carbonara"));
        assert_eq!(card.ingredient_count, Some(3));
        assert_eq!(card.calories, Some(620.0));
        assert_eq!(card.rating, Some(4.5));
    }

    #[test]
    fn detail_derives_daily_value_percentages() {
        let detail = sample().detail();
        assert!((detail.fat_pct.unwrap() - 50.0).abs() < 1e-9);
        assert!((detail.protein_pct.unwrap() - 50.0).abs() < 1e-9);
        assert!((detail.sugar_pct.unwrap() - 10.0).abs() < 1e-9);
        assert!((detail.carbs_pct.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn absent_grams_yield_absent_percentages() {
        let detail = Recipe::new(1).detail();
        assert!(detail.fat_pct.is_none());
        assert!(detail.protein_pct.is_none());
        assert!(detail.sugar_pct.is_none());
        assert!(detail.carbs_pct.is_none());
    }

    #[test]
    fn recipe_display() {
        let recipe = sample();
        let display = recipe.to_string();
        assert!(display.contains("123"));
        assert!(display.contains("Quick Pasta Carbonara"));
    }

    #[test]
    fn recipe_serialization_roundtrip() {
        let recipe = sample();
        let json = serde_json::to_string_pretty(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, back);
    }
}
