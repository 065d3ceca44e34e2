//! Embeds a build counter and compile time for the startup banner and the
//! status tool.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn next_build_number(path: &Path) -> u64 {
    let previous = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    previous + 1
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter = Path::new(COUNTER_FILE);
    let build_number = next_build_number(counter);
    if let Err(e) = fs::write(counter, build_number.to_string()) {
        println!("cargo:warning=could not record build number: {}", e);
    }

    let compiled_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=MEALPREFS_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=MEALPREFS_BUILD_TIMESTAMP={}", compiled_at);
}
