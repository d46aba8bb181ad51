// Shopping list types returned to clients

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::trace;

use crate::error::RecommendError;

pub const MIN_CATEGORIES: usize = 3;
pub const MAX_CATEGORIES: usize = 10;
pub const MAX_ITEMS_PER_CATEGORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub summary: Summary,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Short description of the situation the list was built for.
    pub due_date: String,
    pub budget: String,
    pub key_prefs: Vec<String>,
    pub disclaimers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Essential,
    NiceToHave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    pub priority: Priority,
    /// Ranked by importance, most important first.
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub why: String,
    pub eco_friendly: bool,
    // Kept as a raw JSON number so `25` is echoed back as `25`, not `25.0`.
    pub est_price_usd: Number,
    pub url: String,
}

impl ShoppingList {
    /// Check the invariants the prompt asks the model to respect.
    ///
    /// Links and prices are not verified; only the shape is.
    pub fn validate(&self) -> Result<(), RecommendError> {
        let count = self.categories.len();
        if !(MIN_CATEGORIES..=MAX_CATEGORIES).contains(&count) {
            return Err(RecommendError::SchemaMismatch(format!(
                "expected {MIN_CATEGORIES}-{MAX_CATEGORIES} categories, got {count}"
            )));
        }

        for category in &self.categories {
            trace!(category = %category.category, items = category.items.len(), "Validating category");
            if category.items.len() > MAX_ITEMS_PER_CATEGORY {
                return Err(RecommendError::SchemaMismatch(format!(
                    "category '{}' has {} items, at most {MAX_ITEMS_PER_CATEGORY} allowed",
                    category.category,
                    category.items.len()
                )));
            }
            for item in &category.items {
                match item.est_price_usd.as_f64() {
                    Some(price) if price.is_finite() && price >= 0.0 => {}
                    _ => {
                        return Err(RecommendError::SchemaMismatch(format!(
                            "item '{}' has an invalid price {}",
                            item.name, item.est_price_usd
                        )))
                    }
                }
            }
        }

        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

/// Body returned whenever a list could not be produced.
///
/// Keeps the success shape so clients can render it the same way, and adds a
/// stable `error` code plus the underlying `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackList {
    pub error: String,
    pub details: String,
    pub summary: Summary,
    pub categories: Vec<Category>,
}

impl From<&RecommendError> for FallbackList {
    fn from(err: &RecommendError) -> Self {
        let details = err.to_string();
        Self {
            error: err.code().to_string(),
            summary: Summary {
                due_date: "Error occurred".to_string(),
                budget: "unknown".to_string(),
                key_prefs: Vec::new(),
                disclaimers: vec![format!("Could not generate a list: {details}")],
            },
            details,
            categories: Vec::new(),
        }
    }
}
