//! Food list tools
//!
//! Add, remove and update for favorites, dislikes and allergies, plus the
//! quick allergy pills. String choices from the client are parsed here.

use serde::Serialize;

use crate::models::{
    Allergy, AllergySeverity, DislikeSeverity, DislikedFood, FavoriteFood, MealCategory,
};
use crate::notify::Notifier;
use crate::persistence::Persistence;
use crate::preferences::{MealPreferences, PillToggle};

/// Response for remove_* tools
#[derive(Debug, Serialize)]
pub struct RemoveItemResponse<T: Serialize> {
    pub removed: bool,
    pub item: Option<T>,
}

/// Response for update_* tools
#[derive(Debug, Serialize)]
pub struct UpdateItemResponse<T: Serialize> {
    pub updated: bool,
    pub item: Option<T>,
}

/// Response for toggle_quick_allergy
#[derive(Debug, Serialize)]
pub struct ToggleQuickAllergyResponse {
    pub allergen: String,
    pub selected: bool,
    pub allergy_added: Option<Allergy>,
    pub allergies_removed: Vec<Allergy>,
    pub quick_allergies: Vec<String>,
}

fn parse_category<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    raw: &str,
) -> Result<MealCategory, String> {
    form.parse_choice::<FavoriteFood>(raw, "category")
        .map_err(|e| e.to_string())
}

fn parse_dislike_severity<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    raw: &str,
) -> Result<DislikeSeverity, String> {
    form.parse_choice::<DislikedFood>(raw, "severity")
        .map_err(|e| e.to_string())
}

fn parse_allergy_severity<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    raw: &str,
) -> Result<AllergySeverity, String> {
    form.parse_choice::<Allergy>(raw, "severity")
        .map_err(|e| e.to_string())
}

fn removed<T: Serialize>(item: Option<T>) -> RemoveItemResponse<T> {
    RemoveItemResponse {
        removed: item.is_some(),
        item,
    }
}

fn updated<T: Serialize>(item: Option<T>) -> UpdateItemResponse<T> {
    UpdateItemResponse {
        updated: item.is_some(),
        item,
    }
}

// --- Favorites ---

pub fn add_favorite<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    name: &str,
    category: &str,
) -> Result<FavoriteFood, String> {
    let category = parse_category(form, category)?;
    form.add_favorite(name, category).map_err(|e| e.to_string())
}

pub fn remove_favorite<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
) -> RemoveItemResponse<FavoriteFood> {
    removed(form.remove_favorite(id))
}

pub fn update_favorite<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
    name: &str,
    category: &str,
) -> Result<UpdateItemResponse<FavoriteFood>, String> {
    let category = parse_category(form, category)?;
    let item = form
        .update_favorite(id, name, category)
        .map_err(|e| e.to_string())?;
    Ok(updated(item))
}

// --- Dislikes ---

pub fn add_dislike<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    name: &str,
    severity: &str,
) -> Result<DislikedFood, String> {
    let severity = parse_dislike_severity(form, severity)?;
    form.add_dislike(name, severity).map_err(|e| e.to_string())
}

pub fn remove_dislike<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
) -> RemoveItemResponse<DislikedFood> {
    removed(form.remove_dislike(id))
}

pub fn update_dislike<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
    name: &str,
    severity: &str,
) -> Result<UpdateItemResponse<DislikedFood>, String> {
    let severity = parse_dislike_severity(form, severity)?;
    let item = form
        .update_dislike(id, name, severity)
        .map_err(|e| e.to_string())?;
    Ok(updated(item))
}

// --- Allergies ---

pub fn add_allergy<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    name: &str,
    severity: &str,
) -> Result<Allergy, String> {
    let severity = parse_allergy_severity(form, severity)?;
    form.add_allergy(name, severity).map_err(|e| e.to_string())
}

pub fn remove_allergy<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
) -> RemoveItemResponse<Allergy> {
    removed(form.remove_allergy(id))
}

pub fn update_allergy<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    id: i64,
    name: &str,
    severity: &str,
) -> Result<UpdateItemResponse<Allergy>, String> {
    let severity = parse_allergy_severity(form, severity)?;
    let item = form
        .update_allergy(id, name, severity)
        .map_err(|e| e.to_string())?;
    Ok(updated(item))
}

pub fn toggle_quick_allergy<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    name: &str,
) -> Result<ToggleQuickAllergyResponse, String> {
    let toggled = form.toggle_quick_allergy(name).map_err(|e| e.to_string())?;
    let (selected, allergy_added, allergies_removed) = match toggled {
        PillToggle::Selected(allergy) => (true, Some(allergy), Vec::new()),
        PillToggle::Deselected(removed) => (false, None, removed),
    };
    Ok(ToggleQuickAllergyResponse {
        allergen: name.to_string(),
        selected,
        allergy_added,
        allergies_removed,
        quick_allergies: form.quick_allergies().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::notify::{NotificationBuffer, NotificationKind};
    use crate::persistence::LogPersistence;

    fn form() -> MealPreferences<NotificationBuffer, LogPersistence> {
        MealPreferences::new(FormConfig::default(), NotificationBuffer::new(), LogPersistence::new())
    }

    #[test]
    fn test_add_favorite_parses_category() {
        let mut form = form();
        let item = add_favorite(&mut form, "Soup", "lunch").unwrap();
        assert_eq!(item.category, MealCategory::Lunch);

        let err = add_favorite(&mut form, "Soup", "brunch").unwrap_err();
        assert_eq!(err, "\"brunch\" is not a valid category");
        assert_eq!(form.favorites().len(), 1);
    }

    #[test]
    fn test_bad_severity_sends_error_notification() {
        let mut form = form();
        form.notifier_mut().drain();
        assert!(add_allergy(&mut form, "Latex", "deadly").is_err());
        assert!(form.allergies().is_empty());

        let notes = form.notifier_mut().drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].message, "\"deadly\" is not a valid severity");
    }

    #[test]
    fn test_duplicate_surfaces_message() {
        let mut form = form();
        add_dislike(&mut form, "Okra", "mild").unwrap();
        let err = add_dislike(&mut form, "okra", "absolute").unwrap_err();
        assert_eq!(err, "\"okra\" is already in your disliked foods");
    }

    #[test]
    fn test_remove_and_update_responses() {
        let mut form = form();
        let allergy = add_allergy(&mut form, "Latex", "severe").unwrap();

        let response = update_allergy(&mut form, allergy.id, "Latex gloves", "mild").unwrap();
        assert!(response.updated);
        assert_eq!(response.item.unwrap().severity, AllergySeverity::Mild);

        assert!(remove_allergy(&mut form, allergy.id).removed);
        assert!(!remove_allergy(&mut form, allergy.id).removed);
        assert!(!update_favorite(&mut form, 99, "Soup", "Lunch").unwrap().updated);
    }

    #[test]
    fn test_toggle_response_lists_pills() {
        let mut form = form();
        let on = toggle_quick_allergy(&mut form, "Eggs").unwrap();
        assert!(on.selected);
        assert_eq!(on.quick_allergies, vec!["Eggs"]);

        let off = toggle_quick_allergy(&mut form, "Eggs").unwrap();
        assert!(!off.selected);
        assert_eq!(off.allergies_removed.len(), 1);
        assert!(off.quick_allergies.is_empty());
    }
}
