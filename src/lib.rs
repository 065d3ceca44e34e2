//! Meal Preferences Library
//!
//! Favorite foods, disliked foods, allergies and special instructions for a
//! care recipient, with the editing rules the form enforces.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod notify;
pub mod persistence;
pub mod preferences;
pub mod tools;
