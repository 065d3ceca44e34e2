//! Status Tool
//!
//! Runtime status of the meal preferences service and the usage guide
//! returned to clients.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::notify::Notifier;
use crate::persistence::Persistence;
use crate::preferences::MealPreferences;

/// Usage guide for MCP clients
pub const FORM_INSTRUCTIONS: &str = r#"
# Meal Preferences Instructions

This server holds one meal preferences form for a care recipient. Nothing is
stored between sessions; `save_preferences` hands the current form to the
save endpoint and leaves it in place.

## Lists

| List | Extra field | Choices |
|------|-------------|---------|
| favorites | category | Breakfast, Lunch, Dinner, Snacks |
| dislikes | severity | mild, absolute |
| allergies | severity | mild, severe |

- Names are trimmed. A blank name is ignored.
- Names must be unique per list, ignoring case and surrounding spaces.
  Favorites may repeat a name across categories, not within one.
- Every reply carries `notifications`: the messages the user would see.

## Quick allergy pills

Common allergens: Nuts, Dairy, Gluten, Eggs, Soy, Fish, Shellfish, Sesame.

- `toggle_quick_allergy` on an unchecked pill adds a severe allergy with
  that exact name and checks the pill.
- On a checked pill it removes that allergy and unchecks the pill.
- A pill is checked whenever an allergy is spelled exactly like it, so
  adding, removing or renaming allergies moves the pills too.

## Editing

1. `start_edit` with list + id opens the single edit cursor (opening
   another item drops unsaved text on the current one).
2. `set_editing_name` / `set_editing_extra` change the cursor only.
3. `save_edit` applies it. If rejected (duplicate, blank name, bad choice)
   the cursor stays open. `cancel_edit` discards it.

## Food names

`suggest_foods` returns up to 8 known names for partial input, exact matches
first. `browse_foods` lists the catalog, optionally one section (breakfast,
lunch, dinner, snacks, general).

## Special instructions

Free text up to 500 characters. Longer input is cut to the limit.

## Saving

`save_preferences` needs at least one favorite, dislike, allergy or
non-blank instruction.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub favorites: usize,
    pub dislikes: usize,
    pub allergies: usize,
    pub quick_allergies: usize,
    pub editing: bool,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn get_status<N: Notifier, P: Persistence>(&self, form: &MealPreferences<N, P>) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            favorites: form.favorites().len(),
            dislikes: form.dislikes().len(),
            allergies: form.allergies().len(),
            quick_allergies: form.quick_allergies().len(),
            editing: form.session().is_editing(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
