//! Build metadata
//!
//! Build number and timestamp come from `build.rs`; both fall back when the
//! crate is built without it.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the status tool and the startup banner report about this binary
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: parse_build_number(option_env!("MEALPREFS_BUILD_NUMBER")),
            build_timestamp: option_env!("MEALPREFS_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Meal Preferences (mealprefs)");
    eprintln!("  Version: {} | Build: {}", info.version, info.build_number);
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}
