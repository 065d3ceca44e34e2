//! Form-level tools
//!
//! Special instructions, the pending "add" rows, autocomplete, save and the
//! full state view.

use serde::Serialize;

use crate::catalog::CatalogSection;
use crate::models::{Allergy, DislikedFood, FavoriteFood, PreferencesSnapshot};
use crate::notify::Notifier;
use crate::persistence::Persistence;
use crate::preferences::{MealPreferences, PendingInputs};

/// Response for set_special_instructions
#[derive(Debug, Serialize)]
pub struct SetInstructionsResponse {
    pub truncated: bool,
    pub length: usize,
    pub max_length: usize,
    pub remaining: usize,
}

/// Response for suggest_foods
#[derive(Debug, Serialize)]
pub struct SuggestFoodsResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Response for browse_foods
#[derive(Debug, Serialize)]
pub struct BrowseFoodsResponse {
    pub section: Option<CatalogSection>,
    pub foods: Vec<String>,
}

/// Response for save_preferences
#[derive(Debug, Serialize)]
pub struct SavePreferencesResponse {
    pub success: bool,
    pub snapshot: PreferencesSnapshot,
}

/// Pending row values; any field left out keeps its current value
#[derive(Debug, Default)]
pub struct PendingUpdate {
    pub new_food: Option<String>,
    pub new_category: Option<String>,
    pub new_dislike: Option<String>,
    pub new_dislike_severity: Option<String>,
    pub new_allergy: Option<String>,
    pub new_allergy_severity: Option<String>,
}

/// Which pending row to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRow {
    Favorite,
    Dislike,
    Allergy,
}

impl PendingRow {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "favorite" | "favorites" => Some(PendingRow::Favorite),
            "dislike" | "dislikes" => Some(PendingRow::Dislike),
            "allergy" | "allergies" => Some(PendingRow::Allergy),
            _ => None,
        }
    }
}

/// The item added by submit_pending
#[derive(Debug, Serialize)]
#[serde(tag = "list", content = "item", rename_all = "lowercase")]
pub enum SubmittedItem {
    Favorites(FavoriteFood),
    Dislikes(DislikedFood),
    Allergies(Allergy),
}

pub fn set_special_instructions<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    text: &str,
) -> SetInstructionsResponse {
    let truncated = form.set_special_instructions(text);
    SetInstructionsResponse {
        truncated,
        length: form.instructions_len(),
        max_length: form.config().max_instructions,
        remaining: form.instructions_remaining(),
    }
}

pub fn suggest_foods<N: Notifier, P: Persistence>(
    form: &MealPreferences<N, P>,
    query: &str,
) -> SuggestFoodsResponse {
    SuggestFoodsResponse {
        query: query.to_string(),
        suggestions: form.suggest(query),
    }
}

/// List catalog names, either one section or the whole catalog
pub fn browse_foods<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    section: Option<&str>,
) -> Result<BrowseFoodsResponse, String> {
    let section = match section {
        Some(raw) => Some(
            CatalogSection::from_str(raw)
                .ok_or_else(|| form.reject_option("catalog section", raw).to_string())?,
        ),
        None => None,
    };
    let foods = match section {
        Some(section) => form.catalog().foods_in(section).to_vec(),
        None => form.catalog().all_foods().to_vec(),
    };
    Ok(BrowseFoodsResponse { section, foods })
}

pub fn set_pending<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    update: PendingUpdate,
) -> Result<PendingInputs, String> {
    // Parse everything first so a bad value changes nothing
    let category = match update.new_category.as_deref() {
        Some(raw) => Some(form.parse_choice::<FavoriteFood>(raw, "category").map_err(|e| e.to_string())?),
        None => None,
    };
    let dislike_severity = match update.new_dislike_severity.as_deref() {
        Some(raw) => Some(form.parse_choice::<DislikedFood>(raw, "severity").map_err(|e| e.to_string())?),
        None => None,
    };
    let allergy_severity = match update.new_allergy_severity.as_deref() {
        Some(raw) => Some(form.parse_choice::<Allergy>(raw, "severity").map_err(|e| e.to_string())?),
        None => None,
    };

    if let Some(name) = &update.new_food {
        form.set_new_food(name);
    }
    if let Some(category) = category {
        form.set_new_category(category);
    }
    if let Some(name) = &update.new_dislike {
        form.set_new_dislike(name);
    }
    if let Some(severity) = dislike_severity {
        form.set_new_dislike_severity(severity);
    }
    if let Some(name) = &update.new_allergy {
        form.set_new_allergy(name);
    }
    if let Some(severity) = allergy_severity {
        form.set_new_allergy_severity(severity);
    }
    Ok(form.pending().clone())
}

pub fn submit_pending<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    row: &str,
) -> Result<SubmittedItem, String> {
    let row = PendingRow::from_str(row)
        .ok_or_else(|| form.reject_option("row", row).to_string())?;
    let submitted = match row {
        PendingRow::Favorite => form.submit_favorite().map(SubmittedItem::Favorites),
        PendingRow::Dislike => form.submit_dislike().map(SubmittedItem::Dislikes),
        PendingRow::Allergy => form.submit_allergy().map(SubmittedItem::Allergies),
    };
    submitted.map_err(|e| e.to_string())
}

pub fn save_preferences<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
) -> Result<SavePreferencesResponse, String> {
    let snapshot = form.save().map_err(|e| e.to_string())?;
    Ok(SavePreferencesResponse {
        success: true,
        snapshot,
    })
}
