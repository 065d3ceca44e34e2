//! Preferences snapshot
//!
//! The full form state handed to the persistence collaborator on save.

use serde::{Deserialize, Serialize};

use super::{Allergy, DislikedFood, FavoriteFood};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSnapshot {
    pub favorite_foods: Vec<FavoriteFood>,
    pub disliked_foods: Vec<DislikedFood>,
    pub allergies: Vec<Allergy>,
    pub special_instructions: String,
}
