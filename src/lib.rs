//! # TPGKit
//!
//! Tool path generators (TPGs) for CAM hosts:
//! - A uniform `Tpg` interface: describe, list actions, describe settings, run
//! - Declarative settings schemas grouped by action, built once on first use
//! - Host-owned toolpath sinks receiving structured rapid/feed primitives
//!
//! ## Architecture
//!
//! TPGKit is organized as a workspace with multiple crates:
//!
//! 1. **tpgkit-core** - Errors, units, motion primitives, toolpath sink
//! 2. **tpgkit-settings** - Setting definitions, schema, values, persistence
//! 3. **tpgkit-tpg** - The `Tpg` trait, registry, example generator
//! 4. **tpgkit** - Host helpers and the `tpgkit` binary

pub mod host;

pub use tpgkit_core::{
    ConfigurationError, LengthUnit, MotionKind, MotionPrimitive, Result, Toolpath, ToolpathError,
    ToolpathSink, TpgError,
};

pub use tpgkit_settings::{
    Definition, SettingOption, SettingType, SettingsPersistence, SettingsSchema, SettingsValues,
    ValidationState,
};

pub use tpgkit_tpg::{
    check_action_coverage, SchemaState, SecondTpg, SecondTpgAction, Tpg, TpgDescriptor,
    TpgRegistry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Filter from `RUST_LOG`-style directives, `info` when absent or unparsable
fn log_filter(directives: Option<String>) -> tracing_subscriber::EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| tracing_subscriber::EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays free for toolpath output
/// - RUST_LOG environment variable support
/// - Optional JSON formatting for machine consumption
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_directives() {
        let filter = log_filter(Some("debug".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        let filter = log_filter(Some("tpgkit_tpg=trace,warn".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_log_filter_rejects_garbage() {
        let filter = log_filter(Some("tpgkit=loudest".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("  ".to_string())).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
