//! Favorite Food model
//!
//! A food the care recipient enjoys, filed under a meal category.

use serde::{Deserialize, Serialize};

use super::ListKind;
use crate::preferences::ListEntry;

/// Meal category a favorite food belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MealCategory {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Dinner => "Dinner",
            MealCategory::Snacks => "Snacks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealCategory::Breakfast),
            "lunch" => Some(MealCategory::Lunch),
            "dinner" => Some(MealCategory::Dinner),
            "snacks" | "snack" => Some(MealCategory::Snacks),
            _ => None,
        }
    }
}

/// A favorite food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFood {
    pub id: i64,
    pub name: String,
    pub category: MealCategory,
}

/// Favorites that share one category, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: MealCategory,
    pub foods: Vec<FavoriteFood>,
}

impl CategoryGroup {
    /// True when the category has nothing in it yet (rendered as an empty marker)
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl ListEntry for FavoriteFood {
    type Extra = MealCategory;
    const LIST: ListKind = ListKind::Favorites;

    fn new(id: i64, name: String, category: MealCategory) -> Self {
        Self { id, name, category }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extra(&self) -> MealCategory {
        self.category
    }

    fn replace(&mut self, name: String, category: MealCategory) {
        self.name = name;
        self.category = category;
    }

    // Same name is allowed once per category
    fn same_scope(a: MealCategory, b: MealCategory) -> bool {
        a == b
    }

    fn duplicate_scope(category: MealCategory) -> String {
        format!("{} favorites", category.as_str().to_lowercase())
    }

    fn added_message(name: &str, category: MealCategory) -> String {
        format!("Added \"{}\" to {}", name, category.as_str().to_lowercase())
    }

    fn removed_message(name: &str) -> String {
        format!("Removed \"{}\" from favorites", name)
    }

    fn parse_extra(s: &str) -> Option<MealCategory> {
        MealCategory::from_str(s)
    }

    fn extra_str(category: MealCategory) -> &'static str {
        category.as_str()
    }
}
