//! Meal preferences form
//!
//! Owns the three lists, the pill selection, the edit cursor, the special
//! instructions and the pending "add" inputs. Every intent runs to completion
//! before returning and sends its notifications on the way out.

use serde::Serialize;

use super::collection::CollectionEditor;
use super::edit_session::{EditCursor, EditTarget, InlineEditSession};
use super::ids::{IdGenerator, SequentialIds};
use super::quick_allergy::{PillChanges, PillToggle, QuickAllergySync};
use super::ListEntry;
use crate::catalog::FoodCatalog;
use crate::config::FormConfig;
use crate::error::{PreferenceError, PreferenceResult};
use crate::models::{
    Allergy, AllergySeverity, CategoryGroup, DislikeSeverity, DislikedFood, FavoriteFood,
    ListKind, MealCategory, PreferencesSnapshot,
};
use crate::notify::{NotificationKind, Notifier};
use crate::persistence::Persistence;

/// Values typed into the "add" rows but not yet submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingInputs {
    pub new_food: String,
    pub new_category: MealCategory,
    pub new_dislike: String,
    pub new_dislike_severity: DislikeSeverity,
    pub new_allergy: String,
    pub new_allergy_severity: AllergySeverity,
}

/// Result of saving the edit cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub target: EditTarget,
    /// False when the target item no longer existed
    pub applied: bool,
}

/// Everything the presentation layer needs to draw the form
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesView {
    pub favorites_by_category: Vec<CategoryGroup>,
    pub disliked_foods: Vec<DislikedFood>,
    pub allergies: Vec<Allergy>,
    pub common_allergens: Vec<String>,
    pub quick_allergies: Vec<String>,
    pub editing: Option<EditCursor>,
    pub special_instructions: String,
    pub instructions_length: usize,
    pub max_instructions: usize,
    pub pending: PendingInputs,
}

pub struct MealPreferences<N: Notifier, P: Persistence> {
    config: FormConfig,
    catalog: FoodCatalog,
    favorites: CollectionEditor<FavoriteFood>,
    dislikes: CollectionEditor<DislikedFood>,
    allergies: CollectionEditor<Allergy>,
    pills: QuickAllergySync,
    session: InlineEditSession,
    special_instructions: String,
    pending: PendingInputs,
    ids: Box<dyn IdGenerator + Send>,
    notifier: N,
    persistence: P,
}

impl<N: Notifier, P: Persistence> MealPreferences<N, P> {
    pub fn new(config: FormConfig, notifier: N, persistence: P) -> Self {
        let pending = PendingInputs {
            new_category: config.categories.first().copied().unwrap_or_default(),
            ..Default::default()
        };
        Self {
            config,
            catalog: FoodCatalog::builtin(),
            favorites: CollectionEditor::new(),
            dislikes: CollectionEditor::new(),
            allergies: CollectionEditor::new(),
            pills: QuickAllergySync::new(),
            session: InlineEditSession::new(),
            special_instructions: String::new(),
            pending,
            ids: Box::new(SequentialIds::new()),
            notifier,
            persistence,
        }
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator + Send>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_catalog(mut self, catalog: FoodCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // --- Accessors ---

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn favorites(&self) -> &[FavoriteFood] {
        self.favorites.items()
    }

    pub fn dislikes(&self) -> &[DislikedFood] {
        self.dislikes.items()
    }

    pub fn allergies(&self) -> &[Allergy] {
        self.allergies.items()
    }

    /// Selected quick allergy pills
    pub fn quick_allergies(&self) -> &[String] {
        self.pills.selected()
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    pub fn pending(&self) -> &PendingInputs {
        &self.pending
    }

    pub fn session(&self) -> &InlineEditSession {
        &self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Favorites split by category in configured order. Empty categories
    /// are included.
    pub fn grouped_favorites(&self) -> Vec<CategoryGroup> {
        self.config
            .categories
            .iter()
            .map(|&category| CategoryGroup {
                category,
                foods: self
                    .favorites
                    .items()
                    .iter()
                    .filter(|f| f.category == category)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Autocomplete suggestions for a food name input
    pub fn suggest(&self, query: &str) -> Vec<String> {
        self.catalog.search(query, self.config.suggestion_limit)
    }

    // --- Favorites ---

    pub fn add_favorite(&mut self, name: &str, category: MealCategory) -> PreferenceResult<FavoriteFood> {
        // blank adds stay silent whatever the category
        if name.trim().is_empty() {
            return Err(PreferenceError::EmptyName);
        }
        self.ensure_category(category)?;
        self.favorites.add(name, category, self.ids.as_mut(), &mut self.notifier)
    }

    pub fn remove_favorite(&mut self, id: i64) -> Option<FavoriteFood> {
        let removed = self.favorites.remove(id, &mut self.notifier)?;
        self.drop_cursor_for(ListKind::Favorites, id);
        Some(removed)
    }

    pub fn update_favorite(
        &mut self,
        id: i64,
        name: &str,
        category: MealCategory,
    ) -> PreferenceResult<Option<FavoriteFood>> {
        self.ensure_category(category)?;
        let replaced = self.favorites.update(id, name, category, &mut self.notifier)?;
        Ok(replaced.map(|r| r.after))
    }

    // --- Dislikes ---

    pub fn add_dislike(&mut self, name: &str, severity: DislikeSeverity) -> PreferenceResult<DislikedFood> {
        self.dislikes.add(name, severity, self.ids.as_mut(), &mut self.notifier)
    }

    pub fn remove_dislike(&mut self, id: i64) -> Option<DislikedFood> {
        let removed = self.dislikes.remove(id, &mut self.notifier)?;
        self.drop_cursor_for(ListKind::Dislikes, id);
        Some(removed)
    }

    pub fn update_dislike(
        &mut self,
        id: i64,
        name: &str,
        severity: DislikeSeverity,
    ) -> PreferenceResult<Option<DislikedFood>> {
        let replaced = self.dislikes.update(id, name, severity, &mut self.notifier)?;
        Ok(replaced.map(|r| r.after))
    }

    // --- Allergies ---

    pub fn add_allergy(&mut self, name: &str, severity: AllergySeverity) -> PreferenceResult<Allergy> {
        let added = self
            .allergies
            .add(name, severity, self.ids.as_mut(), &mut self.notifier)?;
        let changes = self.reconcile_pills();
        self.announce_pill_changes(&changes);
        Ok(added)
    }

    pub fn remove_allergy(&mut self, id: i64) -> Option<Allergy> {
        let removed = self.allergies.take(id)?;
        let changes = self.reconcile_pills();
        let message = if changes.unchecked.contains(&removed.name) {
            format!("Removed \"{}\" allergy and unchecked pill", removed.name)
        } else {
            Allergy::removed_message(&removed.name)
        };
        self.notifier.notify(NotificationKind::Success, &message);
        self.drop_cursor_for(ListKind::Allergies, id);
        Some(removed)
    }

    /// Rename or re-grade an allergy. Renaming to or away from a common
    /// allergen checks or unchecks its pill.
    pub fn update_allergy(
        &mut self,
        id: i64,
        name: &str,
        severity: AllergySeverity,
    ) -> PreferenceResult<Option<Allergy>> {
        let Some(replaced) = self.allergies.update(id, name, severity, &mut self.notifier)? else {
            return Ok(None);
        };
        let changes = self.reconcile_pills();
        for unchecked in &changes.unchecked {
            self.notifier.notify(
                NotificationKind::Info,
                &format!("Unchecked \"{}\" pill since name was changed", unchecked),
            );
        }
        self.announce_pill_changes(&changes);
        Ok(Some(replaced.after))
    }

    pub fn toggle_quick_allergy(&mut self, name: &str) -> PreferenceResult<PillToggle> {
        let toggled = self.pills.toggle(
            name,
            &mut self.allergies,
            &self.config,
            self.ids.as_mut(),
            &mut self.notifier,
        )?;
        if let PillToggle::Deselected(removed) = &toggled {
            for allergy in removed {
                self.drop_cursor_for(ListKind::Allergies, allergy.id);
            }
        }
        Ok(toggled)
    }

    fn reconcile_pills(&mut self) -> PillChanges {
        self.pills
            .reconcile(self.allergies.items(), &self.config.common_allergens)
    }

    fn announce_pill_changes(&mut self, changes: &PillChanges) {
        for checked in &changes.checked {
            self.notifier.notify(
                NotificationKind::Info,
                &format!("Checked \"{}\" pill since name matches common allergy", checked),
            );
        }
    }

    // --- Inline editing ---

    /// Open the edit cursor on an item. Returns None if the item does not exist.
    pub fn start_edit(&mut self, list: ListKind, id: i64) -> Option<&EditCursor> {
        match list {
            ListKind::Favorites => {
                let item = self.favorites.get(id)?;
                Some(self.session.start_edit(item))
            }
            ListKind::Dislikes => {
                let item = self.dislikes.get(id)?;
                Some(self.session.start_edit(item))
            }
            ListKind::Allergies => {
                let item = self.allergies.get(id)?;
                Some(self.session.start_edit(item))
            }
        }
    }

    pub fn set_editing_name(&mut self, name: &str) -> bool {
        self.session.set_editing_name(name)
    }

    pub fn set_editing_extra(&mut self, extra: &str) -> bool {
        self.session.set_editing_extra(extra)
    }

    /// Apply the cursor to the list that owns it. On rejection the cursor
    /// stays open so the typed text is not lost.
    pub fn save_edit(&mut self) -> PreferenceResult<Option<EditOutcome>> {
        let mut session = std::mem::take(&mut self.session);
        let result = session.save_edit(|cursor| self.apply_edit(cursor));
        self.session = session;
        result
    }

    pub fn cancel_edit(&mut self) -> Option<EditCursor> {
        self.session.cancel_edit()
    }

    /// True once after each `start_edit`: the name input should take focus
    pub fn take_focus_request(&mut self) -> bool {
        self.session.take_focus_request()
    }

    fn apply_edit(&mut self, cursor: &EditCursor) -> PreferenceResult<EditOutcome> {
        let EditTarget { list, id } = cursor.target;
        let applied = match list {
            ListKind::Favorites => {
                let category = self.parse_choice::<FavoriteFood>(&cursor.extra, "category")?;
                self.update_favorite(id, &cursor.name, category)?.is_some()
            }
            ListKind::Dislikes => {
                let severity = self.parse_choice::<DislikedFood>(&cursor.extra, "severity")?;
                self.update_dislike(id, &cursor.name, severity)?.is_some()
            }
            ListKind::Allergies => {
                let severity = self.parse_choice::<Allergy>(&cursor.extra, "severity")?;
                self.update_allergy(id, &cursor.name, severity)?.is_some()
            }
        };
        Ok(EditOutcome {
            target: cursor.target,
            applied,
        })
    }

    /// Parse a category or severity as typed. Unknown values are rejected
    /// with an error notification.
    pub fn parse_choice<T: ListEntry>(&mut self, raw: &str, field: &'static str) -> PreferenceResult<T::Extra> {
        T::parse_extra(raw).ok_or_else(|| self.reject_option(field, raw))
    }

    /// Reject a value that is not one of the offered choices
    pub fn reject_option(&mut self, field: &'static str, value: &str) -> PreferenceError {
        let err = PreferenceError::UnknownOption {
            field,
            value: value.to_string(),
        };
        tracing::warn!(field, value = %value, "unknown option rejected");
        self.notifier.notify(NotificationKind::Error, &err.to_string());
        err
    }

    fn drop_cursor_for(&mut self, list: ListKind, id: i64) {
        if self.session.cursor().map(|c| c.target) == Some(EditTarget { list, id }) {
            self.session.cancel_edit();
        }
    }

    fn ensure_category(&mut self, category: MealCategory) -> PreferenceResult<()> {
        if self.config.categories.contains(&category) {
            return Ok(());
        }
        Err(self.reject_option("category", category.as_str()))
    }

    // --- Special instructions ---

    /// Store the instructions, cut to the configured limit.
    /// Returns true when the input had to be truncated.
    pub fn set_special_instructions(&mut self, text: &str) -> bool {
        let max = self.config.max_instructions;
        if text.chars().count() <= max {
            self.special_instructions = text.to_string();
            return false;
        }
        self.special_instructions = text.chars().take(max).collect();
        tracing::debug!(max, "special instructions truncated");
        true
    }

    pub fn instructions_len(&self) -> usize {
        self.special_instructions.chars().count()
    }

    pub fn instructions_remaining(&self) -> usize {
        self.config.max_instructions.saturating_sub(self.instructions_len())
    }

    // --- Pending inputs ---

    pub fn set_new_food(&mut self, name: &str) {
        self.pending.new_food = name.to_string();
    }

    pub fn set_new_category(&mut self, category: MealCategory) {
        self.pending.new_category = category;
    }

    pub fn set_new_dislike(&mut self, name: &str) {
        self.pending.new_dislike = name.to_string();
    }

    pub fn set_new_dislike_severity(&mut self, severity: DislikeSeverity) {
        self.pending.new_dislike_severity = severity;
    }

    pub fn set_new_allergy(&mut self, name: &str) {
        self.pending.new_allergy = name.to_string();
    }

    pub fn set_new_allergy_severity(&mut self, severity: AllergySeverity) {
        self.pending.new_allergy_severity = severity;
    }

    /// Add the pending favorite; the name field is cleared on success
    pub fn submit_favorite(&mut self) -> PreferenceResult<FavoriteFood> {
        let name = self.pending.new_food.clone();
        let added = self.add_favorite(&name, self.pending.new_category)?;
        self.pending.new_food.clear();
        Ok(added)
    }

    pub fn submit_dislike(&mut self) -> PreferenceResult<DislikedFood> {
        let name = self.pending.new_dislike.clone();
        let added = self.add_dislike(&name, self.pending.new_dislike_severity)?;
        self.pending.new_dislike.clear();
        Ok(added)
    }

    pub fn submit_allergy(&mut self) -> PreferenceResult<Allergy> {
        let name = self.pending.new_allergy.clone();
        let added = self.add_allergy(&name, self.pending.new_allergy_severity)?;
        self.pending.new_allergy.clear();
        Ok(added)
    }

    // --- Save ---

    /// True when at least one preference or instruction is recorded
    pub fn validate(&self) -> bool {
        !self.favorites.is_empty()
            || !self.dislikes.is_empty()
            || !self.allergies.is_empty()
            || !self.special_instructions.trim().is_empty()
    }

    pub fn snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            favorite_foods: self.favorites.items().to_vec(),
            disliked_foods: self.dislikes.items().to_vec(),
            allergies: self.allergies.items().to_vec(),
            special_instructions: self.special_instructions.clone(),
        }
    }

    /// Hand the snapshot to persistence. State is left as it is.
    pub fn save(&mut self) -> PreferenceResult<PreferencesSnapshot> {
        if !self.validate() {
            let err = PreferenceError::NothingToSave;
            self.notifier.notify(NotificationKind::Error, &err.to_string());
            return Err(err);
        }

        let snapshot = self.snapshot();
        if let Err(e) = self.persistence.persist(&snapshot) {
            tracing::error!(error = %e, "persisting meal preferences failed");
            let err = PreferenceError::Persist(e.to_string());
            self.notifier.notify(NotificationKind::Error, &err.to_string());
            return Err(err);
        }

        tracing::info!(
            favorites = snapshot.favorite_foods.len(),
            dislikes = snapshot.disliked_foods.len(),
            allergies = snapshot.allergies.len(),
            "meal preferences saved"
        );
        self.notifier
            .notify(NotificationKind::Success, "Meal preferences saved successfully!");
        Ok(snapshot)
    }

    pub fn view(&self) -> PreferencesView {
        PreferencesView {
            favorites_by_category: self.grouped_favorites(),
            disliked_foods: self.dislikes.items().to_vec(),
            allergies: self.allergies.items().to_vec(),
            common_allergens: self.config.common_allergens.clone(),
            quick_allergies: self.pills.selected().to_vec(),
            editing: self.session.cursor().cloned(),
            special_instructions: self.special_instructions.clone(),
            instructions_length: self.instructions_len(),
            max_instructions: self.config.max_instructions,
            pending: self.pending.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationBuffer;
    use crate::persistence::testing::RecordingPersistence;

    type TestForm = MealPreferences<NotificationBuffer, RecordingPersistence>;

    fn form() -> TestForm {
        MealPreferences::new(
            FormConfig::default(),
            NotificationBuffer::new(),
            RecordingPersistence::default(),
        )
    }

    fn assert_pills_consistent(form: &TestForm) {
        for pill in form.quick_allergies() {
            assert!(form.config().is_common_allergen(pill));
            assert!(form.allergies().iter().any(|a| &a.name == pill));
        }
        for allergy in form.allergies() {
            if form.config().is_common_allergen(&allergy.name) {
                assert!(form.quick_allergies().contains(&allergy.name));
            }
        }
    }

    #[test]
    fn test_grouped_view_places_item_at_end_of_bucket() {
        let mut form = form();
        form.add_favorite("Toast", MealCategory::Breakfast).unwrap();
        form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        form.add_favorite("Bagel", MealCategory::Breakfast).unwrap();

        let groups = form.grouped_favorites();
        let order: Vec<MealCategory> = groups.iter().map(|g| g.category).collect();
        assert_eq!(order, MealCategory::ALL.to_vec());

        let breakfast: Vec<&str> = groups[0].foods.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(breakfast, vec!["Toast", "Bagel"]);
        assert!(groups[2].is_empty());
        assert!(groups[3].is_empty());
    }

    #[test]
    fn test_duplicate_favorite_one_item_one_error() {
        let mut form = form();
        form.add_favorite("Pancakes", MealCategory::Breakfast).unwrap();
        let result = form.add_favorite(" pancakes ", MealCategory::Breakfast);

        assert!(matches!(result, Err(PreferenceError::Duplicate { .. })));
        assert_eq!(form.favorites().len(), 1);
        assert_eq!(form.notifier().count(NotificationKind::Error), 1);

        form.add_favorite("Pancakes", MealCategory::Dinner).unwrap();
        assert_eq!(form.favorites().len(), 2);
    }

    #[test]
    fn test_remove_missing_id_changes_nothing() {
        let mut form = form();
        form.add_dislike("Liver", DislikeSeverity::Absolute).unwrap();
        form.add_allergy("Latex", AllergySeverity::Mild).unwrap();
        form.notifier_mut().drain();

        assert!(form.remove_favorite(404).is_none());
        assert!(form.remove_dislike(404).is_none());
        assert!(form.remove_allergy(404).is_none());
        assert_eq!(form.dislikes().len(), 1);
        assert_eq!(form.allergies().len(), 1);
        assert!(form.notifier().pending().is_empty());
    }

    #[test]
    fn test_update_collision_keeps_original_values() {
        let mut form = form();
        let liver = form.add_dislike("Liver", DislikeSeverity::Absolute).unwrap();
        let okra = form.add_dislike("Okra", DislikeSeverity::Mild).unwrap();

        let result = form.update_dislike(okra.id, "liver", DislikeSeverity::Absolute);
        assert!(result.is_err());
        assert_eq!(form.dislikes(), &[liver, okra]);
    }

    #[test]
    fn test_edit_round_trip_is_identity() {
        let mut form = form();
        let food = form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        let allergy = form.add_allergy("Latex", AllergySeverity::Severe).unwrap();

        form.start_edit(ListKind::Favorites, food.id).unwrap();
        let outcome = form.save_edit().unwrap().unwrap();
        assert!(outcome.applied);
        assert_eq!(form.favorites(), &[food]);

        form.start_edit(ListKind::Allergies, allergy.id).unwrap();
        form.save_edit().unwrap();
        assert_eq!(form.allergies(), &[allergy]);
        assert!(!form.session().is_editing());
    }

    #[test]
    fn test_edit_applies_live_fields_to_owning_list() {
        let mut form = form();
        let food = form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        let dislike = form.add_dislike("Soup", DislikeSeverity::Mild).unwrap();

        form.start_edit(ListKind::Dislikes, dislike.id).unwrap();
        form.set_editing_name("Cold Soup");
        form.set_editing_extra("absolute");
        form.save_edit().unwrap();

        assert_eq!(form.favorites()[0], food);
        assert_eq!(form.dislikes()[0].name, "Cold Soup");
        assert_eq!(form.dislikes()[0].severity, DislikeSeverity::Absolute);
    }

    #[test]
    fn test_rejected_edit_keeps_cursor_open() {
        let mut form = form();
        form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        let salad = form.add_favorite("Salad", MealCategory::Lunch).unwrap();

        form.start_edit(ListKind::Favorites, salad.id).unwrap();
        form.set_editing_name("soup");
        assert!(form.save_edit().is_err());

        let cursor = form.session().cursor().unwrap();
        assert_eq!(cursor.name, "soup");
        assert_eq!(form.favorites()[1], salad);
    }

    #[test]
    fn test_edit_with_unknown_extra_rejected() {
        let mut form = form();
        let salad = form.add_favorite("Salad", MealCategory::Lunch).unwrap();
        form.notifier_mut().drain();

        form.start_edit(ListKind::Favorites, salad.id).unwrap();
        form.set_editing_extra("Brunch");
        let result = form.save_edit();

        assert!(matches!(result, Err(PreferenceError::UnknownOption { field: "category", .. })));
        assert_eq!(form.notifier().pending().len(), 1);
        assert!(form.session().is_editing());
    }

    #[test]
    fn test_start_edit_unknown_item() {
        let mut form = form();
        assert!(form.start_edit(ListKind::Dislikes, 3).is_none());
        assert!(!form.session().is_editing());
    }

    #[test]
    fn test_removing_edited_item_closes_cursor() {
        let mut form = form();
        let soup = form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        form.start_edit(ListKind::Favorites, soup.id).unwrap();
        form.remove_favorite(soup.id).unwrap();
        assert!(!form.session().is_editing());
        assert_eq!(form.save_edit(), Ok(None));
    }

    #[test]
    fn test_quick_allergy_toggle_three_times() {
        let mut form = form();

        form.toggle_quick_allergy("Nuts").unwrap();
        assert_eq!(form.allergies().len(), 1);
        assert_eq!(form.allergies()[0].name, "Nuts");
        assert_eq!(form.allergies()[0].severity, AllergySeverity::Severe);
        assert_eq!(form.quick_allergies(), &["Nuts".to_string()]);
        assert_pills_consistent(&form);

        form.toggle_quick_allergy("Nuts").unwrap();
        assert!(form.allergies().is_empty());
        assert!(form.quick_allergies().is_empty());

        form.toggle_quick_allergy("Nuts").unwrap();
        assert_eq!(form.allergies().len(), 1);
        assert_eq!(form.quick_allergies(), &["Nuts".to_string()]);
        assert_pills_consistent(&form);
    }

    #[test]
    fn test_rename_pill_allergy_to_uncommon_name() {
        let mut form = form();
        form.toggle_quick_allergy("Nuts").unwrap();
        let nuts = form.allergies()[0].clone();
        form.notifier_mut().drain();

        form.update_allergy(nuts.id, "Peanuts", AllergySeverity::Severe).unwrap();
        assert!(form.quick_allergies().is_empty());
        assert_eq!(form.allergies()[0].name, "Peanuts");
        assert_eq!(
            form.notifier().last().unwrap().message,
            "Unchecked \"Nuts\" pill since name was changed"
        );
        assert_pills_consistent(&form);
    }

    #[test]
    fn test_rename_to_common_allergen_checks_pill() {
        let mut form = form();
        let latex = form.add_allergy("Sesame seeds", AllergySeverity::Mild).unwrap();
        form.notifier_mut().drain();

        form.update_allergy(latex.id, "Sesame", AllergySeverity::Mild).unwrap();
        assert_eq!(form.quick_allergies(), &["Sesame".to_string()]);
        assert_eq!(form.notifier().count(NotificationKind::Info), 1);
        assert_pills_consistent(&form);
    }

    #[test]
    fn test_severity_change_keeps_pill() {
        let mut form = form();
        form.toggle_quick_allergy("Fish").unwrap();
        let fish = form.allergies()[0].clone();
        form.update_allergy(fish.id, "Fish", AllergySeverity::Mild).unwrap();
        assert_eq!(form.quick_allergies(), &["Fish".to_string()]);
        assert_eq!(form.notifier().count(NotificationKind::Info), 0);
    }

    #[test]
    fn test_remove_pill_allergy_unchecks_pill() {
        let mut form = form();
        form.toggle_quick_allergy("Soy").unwrap();
        let soy = form.allergies()[0].clone();

        form.remove_allergy(soy.id).unwrap();
        assert!(form.quick_allergies().is_empty());
        assert_eq!(
            form.notifier().last().unwrap().message,
            "Removed \"Soy\" allergy and unchecked pill"
        );
    }

    #[test]
    fn test_free_text_common_allergen_checks_pill() {
        let mut form = form();
        form.add_allergy("Gluten", AllergySeverity::Mild).unwrap();
        assert_eq!(form.quick_allergies(), &["Gluten".to_string()]);
        assert_pills_consistent(&form);

        // case variants are not the canonical spelling
        form.add_allergy("dairy", AllergySeverity::Mild).unwrap();
        assert!(!form.quick_allergies().contains(&"Dairy".to_string()));
        assert!(form.toggle_quick_allergy("Dairy").is_err());
    }

    #[test]
    fn test_instructions_truncated_to_limit() {
        let mut form = form();
        let long = "x".repeat(501);
        assert!(form.set_special_instructions(&long));
        assert_eq!(form.special_instructions().chars().count(), 500);
        assert_eq!(form.instructions_remaining(), 0);

        assert!(!form.set_special_instructions("Soft foods only"));
        assert_eq!(form.instructions_remaining(), 485);
    }

    #[test]
    fn test_instructions_limit_counts_characters() {
        let mut form = form();
        let accented = "é".repeat(500);
        assert!(!form.set_special_instructions(&accented));
        assert_eq!(form.instructions_len(), 500);
    }

    #[test]
    fn test_save_empty_form_rejected() {
        let mut form = form();
        form.set_special_instructions("   ");
        let result = form.save();

        assert_eq!(result, Err(PreferenceError::NothingToSave));
        assert!(form.persistence().calls.is_empty());
        assert_eq!(
            form.notifier().last().unwrap().message,
            "Please add at least one preference or instruction before saving."
        );
    }

    #[test]
    fn test_save_persists_snapshot_once() {
        let mut form = form();
        form.add_favorite("Oatmeal", MealCategory::Breakfast).unwrap();
        form.set_special_instructions("No spicy food");

        let snapshot = form.save().unwrap();
        assert_eq!(form.persistence().calls.len(), 1);
        assert_eq!(form.persistence().calls[0], snapshot);
        assert_eq!(snapshot.favorite_foods, form.favorites());
        assert_eq!(snapshot.special_instructions, "No spicy food");
        assert_eq!(form.favorites().len(), 1);
        assert_eq!(
            form.notifier().last().unwrap().message,
            "Meal preferences saved successfully!"
        );
    }

    #[test]
    fn test_save_reports_persistence_failure() {
        let mut form = MealPreferences::new(
            FormConfig::default(),
            NotificationBuffer::new(),
            RecordingPersistence {
                fail_with: Some("disk full".to_string()),
                ..Default::default()
            },
        );
        form.add_dislike("Okra", DislikeSeverity::Mild).unwrap();
        let result = form.save();
        assert!(matches!(result, Err(PreferenceError::Persist(_))));
        assert_eq!(form.notifier().last().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_submit_clears_pending_on_success_only() {
        let mut form = form();
        form.set_new_food("Waffles");
        form.set_new_category(MealCategory::Breakfast);
        form.submit_favorite().unwrap();
        assert_eq!(form.pending().new_food, "");

        form.set_new_food("waffles");
        assert!(form.submit_favorite().is_err());
        assert_eq!(form.pending().new_food, "waffles");

        form.set_new_allergy("Latex");
        form.set_new_allergy_severity(AllergySeverity::Severe);
        let latex = form.submit_allergy().unwrap();
        assert_eq!(latex.severity, AllergySeverity::Severe);
        assert_eq!(form.pending().new_allergy, "");

        form.set_new_dislike("Okra");
        form.set_new_dislike_severity(DislikeSeverity::Absolute);
        assert_eq!(form.submit_dislike().unwrap().severity, DislikeSeverity::Absolute);
    }

    #[test]
    fn test_ids_unique_across_lists() {
        let mut form = form();
        let a = form.add_favorite("Soup", MealCategory::Lunch).unwrap();
        let b = form.add_dislike("Soup", DislikeSeverity::Mild).unwrap();
        let c = form.add_allergy("Soup", AllergySeverity::Mild).unwrap();
        assert!(a.id != b.id && b.id != c.id && a.id != c.id);
    }

    #[test]
    fn test_category_outside_config_rejected() {
        let config = FormConfig {
            categories: vec![MealCategory::Lunch, MealCategory::Dinner],
            ..Default::default()
        };
        let mut form = MealPreferences::new(config, NotificationBuffer::new(), RecordingPersistence::default());
        assert!(form.add_favorite("Toast", MealCategory::Breakfast).is_err());
        assert_eq!(form.pending().new_category, MealCategory::Lunch);
        assert_eq!(form.grouped_favorites().len(), 2);
    }

    #[test]
    fn test_injected_ids_and_catalog() {
        let mut form = form()
            .with_id_generator(Box::new(SequentialIds::starting_at(100)))
            .with_catalog(FoodCatalog::from_names(["Congee", "Conch Fritters"]));

        let food = form.add_favorite("Congee", MealCategory::Breakfast).unwrap();
        assert_eq!(food.id, 100);
        assert_eq!(form.add_dislike("Tripe", DislikeSeverity::Mild).unwrap().id, 101);
        assert_eq!(form.suggest("con"), vec!["Conch Fritters", "Congee"]);
        assert!(form.suggest("toast").is_empty());
    }

    #[test]
    fn test_blank_favorite_silent_for_any_category() {
        let config = FormConfig {
            categories: vec![MealCategory::Lunch],
            ..Default::default()
        };
        let mut form = MealPreferences::new(config, NotificationBuffer::new(), RecordingPersistence::default());

        let result = form.add_favorite("   ", MealCategory::Breakfast);
        assert_eq!(result, Err(PreferenceError::EmptyName));
        assert!(form.notifier().pending().is_empty());

        form.set_new_category(MealCategory::Breakfast);
        assert_eq!(form.submit_favorite(), Err(PreferenceError::EmptyName));
        assert!(form.notifier().pending().is_empty());
        assert!(form.favorites().is_empty());
    }

    #[test]
    fn test_parse_choice_notifies_on_unknown_value() {
        let mut form = form();
        assert_eq!(form.parse_choice::<Allergy>("severe", "severity"), Ok(AllergySeverity::Severe));
        assert!(form.notifier().pending().is_empty());

        let result = form.parse_choice::<DislikedFood>("hate", "severity");
        assert!(matches!(result, Err(PreferenceError::UnknownOption { field: "severity", .. })));
        assert_eq!(
            form.notifier().last().unwrap().message,
            "\"hate\" is not a valid severity"
        );
    }

    #[test]
    fn test_suggest_uses_configured_limit() {
        let config = FormConfig {
            suggestion_limit: 3,
            ..Default::default()
        };
        let form = MealPreferences::new(config, NotificationBuffer::new(), RecordingPersistence::default());
        assert_eq!(form.suggest("a").len(), 3);
        assert_eq!(form.suggest("nuts"), vec!["Nuts"]);
    }
}
