//! Meal Preferences (mealprefs)
//!
//! An MCP server for recording a care recipient's meal preferences.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod build_info;
mod catalog;
mod config;
mod error;
mod mcp;
mod models;
mod notify;
mod persistence;
mod preferences;
mod tools;

use config::FormConfig;
use mcp::MealPrefsService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealprefs=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = FormConfig::from_env()?;
    eprintln!(
        "Categories: {} | Common allergens: {} | Instructions limit: {}",
        config.categories.len(),
        config.common_allergens.len(),
        config.max_instructions
    );

    // Create the meal preferences service
    let service = MealPrefsService::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
