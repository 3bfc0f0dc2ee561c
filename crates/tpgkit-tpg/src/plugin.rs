//! Tool path generator interface
//!
//! Defines the capability surface a host uses to discover, configure and
//! execute interchangeable toolpath strategies without knowing their internals.

use serde::Serialize;
use tpgkit_core::{Result, ToolpathSink, TpgError};
use tpgkit_settings::{SettingsSchema, SettingsValues};
use uuid::Uuid;

/// Static identity of a tool path generator.
///
/// The id must be unique across every generator a host knows about. Nothing
/// checks this at definition time; generate a fresh UUID for each new generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TpgDescriptor {
    pub id: Uuid,
    /// Human label, conventionally the implementing type's name
    pub name: &'static str,
    pub description: &'static str,
}

/// Trait implemented by every tool path generator
///
/// Implementations build their settings schema lazily on first use of
/// [`describe_settings`](Tpg::describe_settings) or
/// [`list_actions`](Tpg::list_actions) and never rebuild it.
pub trait Tpg: Send + Sync {
    /// Static identity; constant for the lifetime of the generator
    fn describe(&self) -> &TpgDescriptor;

    /// The settings schema, grouped by action
    fn describe_settings(&self) -> Result<&SettingsSchema>;

    /// Action names in declaration order, `default` first by convention
    fn list_actions(&self) -> Result<Vec<String>> {
        Ok(self.describe_settings()?.action_names())
    }

    /// Actions that [`run`](Tpg::run) has a branch for
    fn supported_actions(&self) -> &[&'static str];

    /// Run `action`, appending motion primitives to `sink`.
    ///
    /// Unrecognised actions fail with [`TpgError::UnknownAction`] and leave
    /// the sink untouched.
    fn run(
        &self,
        settings: &SettingsValues,
        sink: &mut dyn ToolpathSink,
        action: &str,
    ) -> Result<()>;
}

/// Every action declared in the schema must have a `run` branch.
///
/// Returns [`TpgError::NotImplemented`] naming the first declared action
/// without one.
pub fn check_action_coverage(tpg: &dyn Tpg) -> Result<()> {
    let supported = tpg.supported_actions();
    for action in tpg.describe_settings()?.actions() {
        if !supported.iter().any(|s| *s == action) {
            return Err(TpgError::NotImplemented {
                action: action.to_string(),
            });
        }
    }
    Ok(())
}
