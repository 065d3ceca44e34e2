//! Data models
//!
//! Records kept by the meal preferences form and the fixed choices they use.

mod allergy;
mod disliked_food;
mod favorite_food;
mod snapshot;

use serde::{Deserialize, Serialize};

pub use allergy::{Allergy, AllergySeverity};
pub use disliked_food::{DislikeSeverity, DislikedFood};
pub use favorite_food::{CategoryGroup, FavoriteFood, MealCategory};
pub use snapshot::PreferencesSnapshot;

/// Which of the three food lists an item lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Favorites,
    Dislikes,
    Allergies,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Favorites => "favorites",
            ListKind::Dislikes => "dislikes",
            ListKind::Allergies => "allergies",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "favorites" | "favorite" => Some(ListKind::Favorites),
            "dislikes" | "dislike" => Some(ListKind::Dislikes),
            "allergies" | "allergy" => Some(ListKind::Allergies),
            _ => None,
        }
    }
}
