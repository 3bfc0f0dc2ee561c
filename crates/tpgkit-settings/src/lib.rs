//! TPGKit Settings Crate
//!
//! Declarative settings for tool path generators: typed setting
//! definitions, the per-action schema a generator publishes, the values a
//! host hands back to `run`, and their persistence.

pub mod definition;
pub mod persistence;
pub mod schema;
pub mod values;

pub use definition::{Definition, SettingOption, SettingType, ValidationState};
pub use persistence::SettingsPersistence;
pub use schema::{qualified_key, split_key, ActionGroup, SettingsSchema, SettingsSchemaBuilder};
pub use values::SettingsValues;
