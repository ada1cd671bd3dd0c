//! Runtime configuration
//!
//! Everything comes from the environment; there are no flags or config files.

use std::path::PathBuf;

/// Environment variable naming the database file
pub const DATABASE_PATH_VAR: &str = "SHOPPING_CENTRE_DATABASE_PATH";

/// File used when the variable is unset
pub const DEFAULT_DATABASE_FILE: &str = "shopping_centre.db";

/// Default log directive, extended by `RUST_LOG`
pub const DEFAULT_LOG_DIRECTIVE: &str = "shopping_centre=info";

/// Get the database path from environment or use the default
pub fn database_path() -> PathBuf {
    database_path_from(std::env::var(DATABASE_PATH_VAR).ok())
}

fn database_path_from(value: Option<String>) -> PathBuf {
    value
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
}
