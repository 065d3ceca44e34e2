//! Inline edit tools

use serde::Serialize;

use crate::error::PreferenceError;
use crate::models::ListKind;
use crate::notify::Notifier;
use crate::persistence::Persistence;
use crate::preferences::{EditCursor, EditOutcome, MealPreferences};

/// Response for the edit cursor tools
#[derive(Debug, Serialize)]
pub struct EditCursorResponse {
    pub editing: Option<EditCursor>,
}

/// Response for start_edit
#[derive(Debug, Serialize)]
pub struct StartEditResponse {
    pub editing: EditCursor,
    pub focus_name_input: bool,
}

/// Response for save_edit
#[derive(Debug, Serialize)]
pub struct SaveEditResponse {
    pub saved: Option<EditOutcome>,
    pub editing: Option<EditCursor>,
}

pub fn start_edit<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    list: &str,
    id: i64,
) -> Result<StartEditResponse, String> {
    let kind = ListKind::from_str(list)
        .ok_or_else(|| form.reject_option("list", list).to_string())?;
    let editing = form
        .start_edit(kind, id)
        .cloned()
        .ok_or_else(|| format!("No item with id {} in {}", id, kind.as_str()))?;
    Ok(StartEditResponse {
        editing,
        focus_name_input: form.take_focus_request(),
    })
}

pub fn set_editing_name<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    name: &str,
) -> Result<EditCursorResponse, String> {
    if !form.set_editing_name(name) {
        return Err(PreferenceError::NotEditing.to_string());
    }
    Ok(cursor_response(form))
}

pub fn set_editing_extra<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
    extra: &str,
) -> Result<EditCursorResponse, String> {
    if !form.set_editing_extra(extra) {
        return Err(PreferenceError::NotEditing.to_string());
    }
    Ok(cursor_response(form))
}

/// Save the cursor. A rejected save leaves the cursor open; the reply
/// still carries it so the client can show the typed text.
pub fn save_edit<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
) -> Result<SaveEditResponse, String> {
    let saved = form.save_edit().map_err(|e| e.to_string())?;
    Ok(SaveEditResponse {
        saved,
        editing: form.session().cursor().cloned(),
    })
}

pub fn cancel_edit<N: Notifier, P: Persistence>(
    form: &mut MealPreferences<N, P>,
) -> EditCursorResponse {
    form.cancel_edit();
    cursor_response(form)
}

fn cursor_response<N: Notifier, P: Persistence>(form: &MealPreferences<N, P>) -> EditCursorResponse {
    EditCursorResponse {
        editing: form.session().cursor().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::models::{DislikeSeverity, ListKind};
    use crate::notify::NotificationBuffer;
    use crate::persistence::LogPersistence;

    #[test]
    fn test_edit_flow() {
        let mut form =
            MealPreferences::new(FormConfig::default(), NotificationBuffer::new(), LogPersistence::new());
        let okra = form.add_dislike("Okra", DislikeSeverity::Mild).unwrap();

        form.notifier_mut().drain();
        assert_eq!(
            start_edit(&mut form, "spinach", okra.id).unwrap_err(),
            "\"spinach\" is not a valid list"
        );
        assert_eq!(form.notifier().pending().len(), 1);
        assert!(start_edit(&mut form, "dislikes", okra.id + 1).is_err());

        let started = start_edit(&mut form, "dislikes", okra.id).unwrap();
        assert_eq!(started.editing.target.list, ListKind::Dislikes);
        assert!(started.focus_name_input);

        set_editing_name(&mut form, "Fried Okra").unwrap();
        set_editing_extra(&mut form, "absolute").unwrap();
        let response = save_edit(&mut form).unwrap();
        assert!(response.saved.unwrap().applied);
        assert!(response.editing.is_none());
        assert_eq!(form.dislikes()[0].name, "Fried Okra");

        assert!(set_editing_name(&mut form, "x").is_err());
        assert!(cancel_edit(&mut form).editing.is_none());
    }
}
