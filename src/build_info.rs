//! Build metadata
//!
//! `build.rs` stamps each compile with a number and UTC timestamp; the demo
//! logs them once at startup as a JSON record.

use serde::Serialize;

/// Metadata describing this build of the crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(
            option_env!("SHOPPING_CENTRE_BUILD_NUMBER"),
            option_env!("SHOPPING_CENTRE_BUILD_TIMESTAMP"),
        )
    }

    fn from_stamp(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }
}

/// Emit the build record through `tracing`
pub fn log_startup() {
    let info = BuildInfo::current();
    match serde_json::to_string(&info) {
        Ok(json) => tracing::info!(build = %json, "{} {} starting", info.name, info.version),
        Err(e) => tracing::warn!(error = %e, "could not serialize build info"),
    }
}
