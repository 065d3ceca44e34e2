//! Meal preferences tools module
//!
//! MCP tool implementations over the meal preferences form.

pub mod editing;
pub mod food_lists;
pub mod form;
pub mod status;
