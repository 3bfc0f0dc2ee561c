//! Error handling for TPGKit
//!
//! Provides error types for every layer a tool path generator touches:
//! - Configuration errors (settings schema construction)
//! - Action dispatch errors (unknown or unimplemented actions)
//! - Settings value errors (host passed values the schema rejects)
//! - Toolpath errors (text-form motion primitive parsing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Raised while a settings schema is being built. These fail fast at
/// schema-build time so that `run` never sees an inconsistent schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The same setting key was declared twice within one action group
    #[error("Duplicate setting '{name}' in action '{action}'")]
    DuplicateSetting {
        /// The action group the duplicate was added to.
        action: String,
        /// The duplicated setting key.
        name: String,
    },

    /// A widget tag did not name a known setting type
    #[error("Unknown widget kind '{kind}' for setting '{name}'")]
    UnknownWidgetKind {
        /// The setting being defined.
        name: String,
        /// The unrecognised widget tag.
        kind: String,
    },

    /// Action names and setting keys must be non-empty
    #[error("Empty {what} name")]
    EmptyName {
        /// Which name was empty ("action" or "setting").
        what: &'static str,
    },

    /// Minimum is greater than maximum on a ranged setting
    #[error("Invalid range for setting '{name}': {minimum} > {maximum}")]
    InvalidRange {
        /// The setting key.
        name: String,
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
    },
}

/// Toolpath error type
///
/// Represents failures decoding the text form of a motion primitive,
/// e.g. `feed(1,0,-0.5)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolpathError {
    /// The motion kind before the parenthesis is not `rapid` or `feed`
    #[error("Unknown motion kind '{kind}'")]
    UnknownMotionKind {
        /// The unrecognised kind.
        kind: String,
    },

    /// The text is not of the form `kind(x,y,z)`
    #[error("Malformed motion primitive '{input}': {reason}")]
    Malformed {
        /// The text that failed to parse.
        input: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Main error type for TPGKit
///
/// A unified error type covering every layer. This is the error type used
/// in public APIs.
#[derive(Error, Debug)]
pub enum TpgError {
    /// Settings schema could not be built
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// `run` was invoked with an action the plugin does not recognise
    #[error("Unknown action '{action}'")]
    UnknownAction {
        /// The action name that was requested.
        action: String,
    },

    /// The action is declared in the schema but has no behavior yet
    #[error("Action '{action}' is declared but not implemented")]
    NotImplemented {
        /// The declared action.
        action: String,
    },

    /// Settings values handed in by the host violate the schema
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSettings {
        /// Fully qualified key (`<action>::<name>`).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Toolpath error
    #[error(transparent)]
    Toolpath(#[from] ToolpathError),

    /// File extension is not one we know how to read or write
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl TpgError {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        TpgError::Other(msg.into())
    }

    /// Create an unknown action error
    pub fn unknown_action(action: impl Into<String>) -> Self {
        TpgError::UnknownAction {
            action: action.into(),
        }
    }

    /// Check if this is a schema configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TpgError::Configuration(_))
    }

    /// Check if this is an unknown action error
    pub fn is_unknown_action(&self) -> bool {
        matches!(self, TpgError::UnknownAction { .. })
    }

    /// Check if this is a not-implemented error
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, TpgError::NotImplemented { .. })
    }

    /// Check if the host passed invalid settings
    pub fn is_invalid_settings(&self) -> bool {
        matches!(self, TpgError::InvalidSettings { .. })
    }
}

/// Result type using TpgError
pub type Result<T> = std::result::Result<T, TpgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::DuplicateSetting {
            action: "default".to_string(),
            name: "geometry".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate setting 'geometry' in action 'default'"
        );

        let err = ConfigurationError::UnknownWidgetKind {
            name: "depth".to_string(),
            kind: "Cam::Slider".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown widget kind 'Cam::Slider' for setting 'depth'"
        );
    }

    #[test]
    fn test_tpg_error_display() {
        assert_eq!(
            TpgError::unknown_action("pocket").to_string(),
            "Unknown action 'pocket'"
        );
        let err = TpgError::NotImplemented {
            action: "finish".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Action 'finish' is declared but not implemented"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: TpgError = ConfigurationError::EmptyName { what: "action" }.into();
        assert!(err.is_configuration_error());
        assert_eq!(err.to_string(), "Empty action name");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TpgError = io_err.into();
        assert!(matches!(err, TpgError::Io(_)));
    }

    #[test]
    fn test_classification() {
        assert!(TpgError::unknown_action("x").is_unknown_action());
        assert!(!TpgError::other("x").is_unknown_action());
        let err = TpgError::InvalidSettings {
            key: "default::tolerance".to_string(),
            reason: "not a number".to_string(),
        };
        assert!(err.is_invalid_settings());
    }
}
