//! Meal Preferences MCP Server Implementation
//!
//! Exposes every form intent as an MCP tool. Replies are JSON with the
//! result (or error) and the notifications the user would have seen.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::FormConfig;
use crate::notify::{Notification, NotificationBuffer};
use crate::persistence::LogPersistence;
use crate::preferences::MealPreferences;
use crate::tools::editing;
use crate::tools::food_lists;
use crate::tools::form::{self as form_tools, PendingUpdate};
use crate::tools::status::StatusTracker;

/// The form as held by the server
pub type SessionForm = MealPreferences<NotificationBuffer, LogPersistence>;

/// Meal Preferences MCP Service
#[derive(Clone)]
pub struct MealPrefsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    form: Arc<StdMutex<SessionForm>>,
    tool_router: ToolRouter<MealPrefsService>,
}

impl MealPrefsService {
    pub fn new(config: FormConfig) -> Self {
        let form = MealPreferences::new(config, NotificationBuffer::new(), LogPersistence::new());
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            form: Arc::new(StdMutex::new(form)),
            tool_router: Self::tool_router(),
        }
    }

    fn lock_form(&self) -> Result<MutexGuard<'_, SessionForm>, McpError> {
        self.form
            .lock()
            .map_err(|_| McpError::internal_error("Form state lock poisoned", None))
    }

    /// Run one intent against the form and package the reply
    fn with_form<T, F>(&self, f: F) -> Result<CallToolResult, McpError>
    where
        T: Serialize,
        F: FnOnce(&mut SessionForm) -> Result<T, String>,
    {
        let mut form = self.lock_form()?;
        let outcome = f(&mut *form);
        let notifications = form.notifier_mut().drain();

        let reply = match outcome {
            Ok(result) => ToolReply {
                ok: true,
                result: Some(result),
                error: None,
                notifications,
            },
            Err(error) => ToolReply {
                ok: false,
                result: None,
                error: Some(error),
                notifications,
            },
        };
        let json = serde_json::to_string_pretty(&reply)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[derive(Debug, Serialize)]
struct ToolReply<T: Serialize> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    notifications: Vec<Notification>,
}

// ============================================================================
// Food List Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFavoriteParams {
    /// Food name
    pub name: String,
    /// Breakfast, Lunch, Dinner or Snacks
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFavoriteParams {
    pub id: i64,
    pub name: String,
    /// Breakfast, Lunch, Dinner or Snacks
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddDislikeParams {
    pub name: String,
    /// mild or absolute (default mild)
    #[serde(default = "default_severity")]
    pub severity: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddAllergyParams {
    pub name: String,
    /// mild or severe (default mild)
    #[serde(default = "default_severity")]
    pub severity: String,
}

fn default_severity() -> String { "mild".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateSeverityItemParams {
    pub id: i64,
    pub name: String,
    /// mild/absolute for dislikes, mild/severe for allergies
    pub severity: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveItemParams {
    /// Item ID to remove
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleQuickAllergyParams {
    /// Common allergen name, spelled as listed (e.g. "Nuts")
    pub name: String,
}

// ============================================================================
// Edit Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartEditParams {
    /// favorites, dislikes or allergies
    pub list: String,
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetEditingNameParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetEditingExtraParams {
    /// Category for favorites, severity for dislikes and allergies
    pub extra: String,
}

// ============================================================================
// Form Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetSpecialInstructionsParams {
    /// Free text, cut to the configured limit (500 characters by default)
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestFoodsParams {
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BrowseFoodsParams {
    /// breakfast, lunch, dinner, snacks or general; omit for the whole catalog
    pub section: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetPendingParams {
    pub new_food: Option<String>,
    pub new_category: Option<String>,
    pub new_dislike: Option<String>,
    pub new_dislike_severity: Option<String>,
    pub new_allergy: Option<String>,
    pub new_allergy_severity: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SubmitPendingParams {
    /// favorite, dislike or allergy
    pub row: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealPrefsService {
    // --- Status ---

    #[tool(description = "Get the current status of the meal preferences service including build info, item counts and process information")]
    async fn mealprefs_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let form = self.lock_form()?;
        let status = tracker.get_status(&form);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for filling in the meal preferences form. Call this before recording preferences.")]
    fn form_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::FORM_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(FORM_INSTRUCTIONS)]))
    }

    #[tool(description = "Get the whole form: favorites grouped by category, dislikes, allergies, quick allergy pills, edit cursor, special instructions and pending inputs")]
    fn get_preferences(&self) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(form.view()))
    }

    // --- Favorites ---

    #[tool(description = "Add a favorite food under a meal category")]
    fn add_favorite(&self, Parameters(p): Parameters<AddFavoriteParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::add_favorite(form, &p.name, &p.category))
    }

    #[tool(description = "Remove a favorite food by ID")]
    fn remove_favorite(&self, Parameters(p): Parameters<RemoveItemParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(food_lists::remove_favorite(form, p.id)))
    }

    #[tool(description = "Rename a favorite food or move it to another category")]
    fn update_favorite(&self, Parameters(p): Parameters<UpdateFavoriteParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::update_favorite(form, p.id, &p.name, &p.category))
    }

    // --- Dislikes ---

    #[tool(description = "Add a disliked food with severity mild or absolute")]
    fn add_dislike(&self, Parameters(p): Parameters<AddDislikeParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::add_dislike(form, &p.name, &p.severity))
    }

    #[tool(description = "Remove a disliked food by ID")]
    fn remove_dislike(&self, Parameters(p): Parameters<RemoveItemParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(food_lists::remove_dislike(form, p.id)))
    }

    #[tool(description = "Rename a disliked food or change its severity")]
    fn update_dislike(&self, Parameters(p): Parameters<UpdateSeverityItemParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::update_dislike(form, p.id, &p.name, &p.severity))
    }

    // --- Allergies ---

    #[tool(description = "Add an allergy or intolerance with severity mild or severe")]
    fn add_allergy(&self, Parameters(p): Parameters<AddAllergyParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::add_allergy(form, &p.name, &p.severity))
    }

    #[tool(description = "Remove an allergy by ID. Unchecks its quick allergy pill if it had one.")]
    fn remove_allergy(&self, Parameters(p): Parameters<RemoveItemParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(food_lists::remove_allergy(form, p.id)))
    }

    #[tool(description = "Rename an allergy or change its severity. Renaming to or from a common allergen checks or unchecks its pill.")]
    fn update_allergy(&self, Parameters(p): Parameters<UpdateSeverityItemParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::update_allergy(form, p.id, &p.name, &p.severity))
    }

    #[tool(description = "Toggle a common allergen pill (Nuts, Dairy, Gluten, Eggs, Soy, Fish, Shellfish, Sesame). Checking adds a severe allergy; unchecking removes it.")]
    fn toggle_quick_allergy(&self, Parameters(p): Parameters<ToggleQuickAllergyParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| food_lists::toggle_quick_allergy(form, &p.name))
    }

    // --- Inline Editing ---

    #[tool(description = "Put one item in edit mode. Replaces any item already being edited.")]
    fn start_edit(&self, Parameters(p): Parameters<StartEditParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| editing::start_edit(form, &p.list, p.id))
    }

    #[tool(description = "Change the name on the edit cursor without saving")]
    fn set_editing_name(&self, Parameters(p): Parameters<SetEditingNameParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| editing::set_editing_name(form, &p.name))
    }

    #[tool(description = "Change the category or severity on the edit cursor without saving")]
    fn set_editing_extra(&self, Parameters(p): Parameters<SetEditingExtraParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| editing::set_editing_extra(form, &p.extra))
    }

    #[tool(description = "Apply the edit cursor to its item. If rejected the cursor stays open.")]
    fn save_edit(&self) -> Result<CallToolResult, McpError> {
        self.with_form(|form| editing::save_edit(form))
    }

    #[tool(description = "Leave edit mode without saving")]
    fn cancel_edit(&self) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(editing::cancel_edit(form)))
    }

    // --- Form ---

    #[tool(description = "Set the special instructions text (cut to 500 characters)")]
    fn set_special_instructions(&self, Parameters(p): Parameters<SetSpecialInstructionsParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(form_tools::set_special_instructions(form, &p.text)))
    }

    #[tool(description = "Suggest food names for a partial name (exact matches first, up to 8)")]
    fn suggest_foods(&self, Parameters(p): Parameters<SuggestFoodsParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| Ok::<_, String>(form_tools::suggest_foods(form, &p.query)))
    }

    #[tool(description = "List known food names, optionally for one catalog section")]
    fn browse_foods(&self, Parameters(p): Parameters<BrowseFoodsParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| form_tools::browse_foods(form, p.section.as_deref()))
    }

    #[tool(description = "Set values in the pending add rows (new food + category, new dislike + severity, new allergy + severity)")]
    fn set_pending(&self, Parameters(p): Parameters<SetPendingParams>) -> Result<CallToolResult, McpError> {
        let update = PendingUpdate {
            new_food: p.new_food,
            new_category: p.new_category,
            new_dislike: p.new_dislike,
            new_dislike_severity: p.new_dislike_severity,
            new_allergy: p.new_allergy,
            new_allergy_severity: p.new_allergy_severity,
        };
        self.with_form(|form| form_tools::set_pending(form, update))
    }

    #[tool(description = "Add the item in a pending row (favorite, dislike or allergy); clears the row's name on success")]
    fn submit_pending(&self, Parameters(p): Parameters<SubmitPendingParams>) -> Result<CallToolResult, McpError> {
        self.with_form(|form| form_tools::submit_pending(form, &p.row))
    }

    #[tool(description = "Save the meal preferences. Requires at least one preference or instruction.")]
    fn save_preferences(&self) -> Result<CallToolResult, McpError> {
        self.with_form(|form| form_tools::save_preferences(form))
    }
}

#[tool_handler]
impl ServerHandler for MealPrefsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealprefs".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meal Preferences".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Meal Preferences - favorite foods, disliked foods, allergies and special instructions for a care recipient. \
                 IMPORTANT: Call form_instructions first. \
                 Favorites: add/remove/update_favorite. Dislikes: add/remove/update_dislike. \
                 Allergies: add/remove/update_allergy, toggle_quick_allergy. \
                 Editing: start_edit, set_editing_name, set_editing_extra, save_edit, cancel_edit. \
                 Form: get_preferences, set_special_instructions, suggest_foods, browse_foods, set_pending, submit_pending, save_preferences."
                    .into(),
            ),
        }
    }
}
