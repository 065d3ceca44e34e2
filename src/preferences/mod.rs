//! Meal preferences state
//!
//! The three food list editors, the shared inline edit cursor, the allergy
//! pill sync and the form that ties them together.

mod collection;
mod edit_session;
mod form;
mod ids;
mod quick_allergy;

pub use collection::{normalize_name, CollectionEditor, ListEntry, Replaced};
pub use edit_session::{EditCursor, EditTarget, InlineEditSession};
pub use form::{EditOutcome, MealPreferences, PendingInputs, PreferencesView};
pub use ids::{IdGenerator, SequentialIds};
pub use quick_allergy::{PillChanges, PillToggle, QuickAllergySync};
