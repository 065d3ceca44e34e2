//! Quick-select allergy pills
//!
//! One pill per common allergen. A pill is selected exactly when the allergy
//! list holds an entry spelled like that allergen, so the selection is
//! recomputed from the list after every allergy mutation.

use serde::Serialize;

use super::collection::CollectionEditor;
use super::ids::IdGenerator;
use crate::config::FormConfig;
use crate::error::{PreferenceError, PreferenceResult};
use crate::models::Allergy;
use crate::notify::{NotificationKind, Notifier};

/// Pills that flipped during a reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PillChanges {
    pub checked: Vec<String>,
    pub unchecked: Vec<String>,
}

impl PillChanges {
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.unchecked.is_empty()
    }
}

/// What a pill toggle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PillToggle {
    Selected(Allergy),
    Deselected(Vec<Allergy>),
}

#[derive(Debug, Clone, Default)]
pub struct QuickAllergySync {
    /// Selected allergens, in the configured pill order
    selected: Vec<String>,
}

impl QuickAllergySync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Recompute the selection from the allergy list
    pub fn reconcile(&mut self, allergies: &[Allergy], common_allergens: &[String]) -> PillChanges {
        let next: Vec<String> = common_allergens
            .iter()
            .filter(|allergen| allergies.iter().any(|a| &a.name == *allergen))
            .cloned()
            .collect();

        let changes = PillChanges {
            checked: next.iter().filter(|n| !self.is_selected(n)).cloned().collect(),
            unchecked: self
                .selected
                .iter()
                .filter(|s| !next.contains(s))
                .cloned()
                .collect(),
        };
        if !changes.is_empty() {
            tracing::debug!(checked = ?changes.checked, unchecked = ?changes.unchecked, "pills reconciled");
        }
        self.selected = next;
        changes
    }

    /// Flip a pill.
    ///
    /// Deselecting removes every allergy spelled exactly like the pill.
    /// Selecting adds an allergy at the configured quick severity, unless an
    /// allergy with that name (any case) already exists.
    pub fn toggle(
        &mut self,
        name: &str,
        allergies: &mut CollectionEditor<Allergy>,
        config: &FormConfig,
        ids: &mut dyn IdGenerator,
        notifier: &mut dyn Notifier,
    ) -> PreferenceResult<PillToggle> {
        if !config.is_common_allergen(name) {
            let err = PreferenceError::UnknownOption {
                field: "common allergen",
                value: name.to_string(),
            };
            notifier.notify(NotificationKind::Error, &err.to_string());
            return Err(err);
        }

        if self.is_selected(name) {
            let removed = allergies.take_where(|a| a.name == name);
            self.reconcile(allergies.items(), &config.common_allergens);
            tracing::info!(pill = %name, removed = removed.len(), "pill deselected");
            notifier.notify(NotificationKind::Success, &format!("Removed \"{}\" allergy", name));
            return Ok(PillToggle::Deselected(removed));
        }

        let added = allergies.add(name, config.quick_allergy_severity, ids, notifier)?;
        self.reconcile(allergies.items(), &config.common_allergens);
        tracing::info!(pill = %name, "pill selected");
        Ok(PillToggle::Selected(added))
    }
}
