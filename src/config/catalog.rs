//! Item category catalog loaded from the `[catalog]` table of config.toml.
//!
//! The catalog lists the subcategories allowed under each main category. New items
//! are checked against it before they are submitted.

use crate::models::MainCategory;
use serde::Deserialize;

fn default_drinks() -> Vec<String> {
    ["Liquor", "Beer", "Soft Drink", "Wine", "Bitters", "Others"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_food() -> Vec<String> {
    ["Carbohydrate", "Protein", "Side"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Subcategories per main category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryCatalog {
    /// Subcategories allowed for drinks
    #[serde(default = "default_drinks")]
    pub drinks: Vec<String>,
    /// Subcategories allowed for food
    #[serde(default = "default_food")]
    pub food: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            drinks: default_drinks(),
            food: default_food(),
        }
    }
}

impl CategoryCatalog {
    /// Subcategories allowed under `category`, in display order.
    #[must_use]
    pub fn sub_categories(&self, category: MainCategory) -> &[String] {
        match category {
            MainCategory::Drinks => &self.drinks,
            MainCategory::Food => &self.food,
        }
    }

    /// Finds the catalog spelling of `sub_category` under `category`, ignoring case.
    #[must_use]
    pub fn resolve(&self, category: MainCategory, sub_category: &str) -> Option<&str> {
        let wanted = sub_category.trim();
        self.sub_categories(category)
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }

    /// First subcategory of `category`, used as the form default.
    #[must_use]
    pub fn default_sub_category(&self, category: MainCategory) -> Option<&str> {
        self.sub_categories(category).first().map(String::as_str)
    }
}
