//! Inline edit session
//!
//! The single "currently editing" cursor shared by all three lists. The
//! session does not know how to apply an edit; whoever saves it supplies the
//! update to run against the cursor's target.

use serde::Serialize;

use super::collection::ListEntry;
use crate::error::PreferenceResult;
use crate::models::ListKind;

/// The item an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditTarget {
    pub list: ListKind,
    pub id: i64,
}

/// Live edit state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditCursor {
    pub target: EditTarget,
    pub name: String,
    /// Category or severity, as typed
    pub extra: String,
}

#[derive(Debug, Clone, Default)]
pub struct InlineEditSession {
    cursor: Option<EditCursor>,
    focus_requested: bool,
}

impl InlineEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<&EditCursor> {
        self.cursor.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Put `item` in edit mode using its own category/severity
    pub fn start_edit<T: ListEntry>(&mut self, item: &T) -> &EditCursor {
        self.start_edit_with(item, |item| T::extra_str(item.extra()).to_string())
    }

    /// Put `item` in edit mode, reading the extra field with `extract`.
    /// Replaces any cursor already open; its unsaved text is dropped.
    pub fn start_edit_with<T, F>(&mut self, item: &T, extract: F) -> &EditCursor
    where
        T: ListEntry,
        F: FnOnce(&T) -> String,
    {
        if let Some(previous) = &self.cursor {
            tracing::debug!(
                list = previous.target.list.as_str(),
                id = previous.target.id,
                "edit switched, unsaved changes dropped"
            );
        }
        tracing::debug!(list = T::LIST.as_str(), id = item.id(), "edit started");

        self.focus_requested = true;
        self.cursor.insert(EditCursor {
            target: EditTarget {
                list: T::LIST,
                id: item.id(),
            },
            name: item.name().to_string(),
            extra: extract(item),
        })
    }

    /// Returns false when nothing is being edited
    pub fn set_editing_name(&mut self, name: &str) -> bool {
        match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Returns false when nothing is being edited
    pub fn set_editing_extra(&mut self, extra: &str) -> bool {
        match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.extra = extra.to_string();
                true
            }
            None => false,
        }
    }

    /// Apply the cursor through `on_save`.
    ///
    /// `Ok(None)` when idle. The cursor is cleared when `on_save` succeeds
    /// and stays open with the typed text when it fails.
    pub fn save_edit<R, F>(&mut self, on_save: F) -> PreferenceResult<Option<R>>
    where
        F: FnOnce(&EditCursor) -> PreferenceResult<R>,
    {
        let Some(cursor) = self.cursor.as_ref() else {
            return Ok(None);
        };
        let saved = on_save(cursor)?;
        self.clear();
        Ok(Some(saved))
    }

    /// Leave edit mode without saving
    pub fn cancel_edit(&mut self) -> Option<EditCursor> {
        let cursor = self.cursor.take();
        self.focus_requested = false;
        if let Some(cursor) = &cursor {
            tracing::debug!(list = cursor.target.list.as_str(), id = cursor.target.id, "edit cancelled");
        }
        cursor
    }

    /// Focus hint for the name input; true once per `start_edit`
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    fn clear(&mut self) {
        self.cursor = None;
        self.focus_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreferenceError;
    use crate::models::{Allergy, AllergySeverity, FavoriteFood, MealCategory};

    fn soup() -> FavoriteFood {
        FavoriteFood {
            id: 7,
            name: "Soup".to_string(),
            category: MealCategory::Lunch,
        }
    }

    #[test]
    fn test_start_edit_captures_item() {
        let mut session = InlineEditSession::new();
        let cursor = session.start_edit(&soup()).clone();
        assert_eq!(cursor.target, EditTarget { list: ListKind::Favorites, id: 7 });
        assert_eq!(cursor.name, "Soup");
        assert_eq!(cursor.extra, "Lunch");
        assert!(session.take_focus_request());
        assert!(!session.take_focus_request());
    }

    #[test]
    fn test_custom_extractor() {
        let mut session = InlineEditSession::new();
        let cursor = session.start_edit_with(&soup(), |f| f.category.as_str().to_uppercase());
        assert_eq!(cursor.extra, "LUNCH");
    }

    #[test]
    fn test_second_start_replaces_cursor() {
        let mut session = InlineEditSession::new();
        session.start_edit(&soup());
        session.set_editing_name("Chowder");

        let allergy = Allergy {
            id: 9,
            name: "Soy".to_string(),
            severity: AllergySeverity::Mild,
        };
        session.start_edit(&allergy);
        let cursor = session.cursor().unwrap();
        assert_eq!(cursor.target.list, ListKind::Allergies);
        assert_eq!(cursor.name, "Soy");
        assert_eq!(cursor.extra, "mild");
    }

    #[test]
    fn test_save_passes_live_fields_and_clears() {
        let mut session = InlineEditSession::new();
        session.start_edit(&soup());
        session.set_editing_name("Chowder");
        session.set_editing_extra("Dinner");

        let saved = session
            .save_edit(|c| Ok((c.target.id, c.name.clone(), c.extra.clone())))
            .unwrap();
        assert_eq!(saved, Some((7, "Chowder".to_string(), "Dinner".to_string())));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_failed_save_keeps_cursor() {
        let mut session = InlineEditSession::new();
        session.start_edit(&soup());
        session.set_editing_name("Salad");

        let result: PreferenceResult<Option<()>> = session.save_edit(|c| {
            Err(PreferenceError::Duplicate {
                name: c.name.clone(),
                scope: "lunch favorites".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(session.cursor().unwrap().name, "Salad");
    }

    #[test]
    fn test_idle_save_and_setters_are_noops() {
        let mut session = InlineEditSession::new();
        let mut called = false;
        let result = session.save_edit(|_| {
            called = true;
            Ok(())
        });
        assert_eq!(result, Ok(None));
        assert!(!called);
        assert!(!session.set_editing_name("x"));
        assert!(!session.set_editing_extra("y"));
    }

    #[test]
    fn test_cancel_discards() {
        let mut session = InlineEditSession::new();
        session.start_edit(&soup());
        session.set_editing_name("Chowder");
        let dropped = session.cancel_edit().unwrap();
        assert_eq!(dropped.name, "Chowder");
        assert!(session.cursor().is_none());
        assert!(session.cancel_edit().is_none());
    }
}
