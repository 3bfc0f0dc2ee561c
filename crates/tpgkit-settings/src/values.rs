//! Settings values
//!
//! The values an operator entered for a tool path generator, keyed by
//! qualified `<action>::<name>`, plus the currently selected action.
//! Values are owned by the host and checked against a [`SettingsSchema`].

use crate::definition::ValidationState;
use crate::schema::{qualified_key, split_key, SettingsSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tpgkit_core::{LengthUnit, Result, TpgError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl SettingsValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values holding every definition's default, with the first action selected
    pub fn with_defaults(schema: &SettingsSchema) -> Self {
        let mut values = Self::new();
        values.add_defaults(schema);
        values.action = schema.actions().next().map(str::to_string);
        values
    }

    /// Fill in defaults for every setting that has no value yet
    pub fn add_defaults(&mut self, schema: &SettingsSchema) {
        for (action, definition) in schema.definitions() {
            self.values
                .entry(qualified_key(action, &definition.name))
                .or_insert_with(|| definition.default_value.clone());
        }
    }

    pub fn selected_action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Change the selected action. The action must be declared in `schema`.
    pub fn set_action(&mut self, schema: &SettingsSchema, action: &str) -> Result<()> {
        if !schema.contains_action(action) {
            return Err(undeclared_action(action));
        }
        self.action = Some(action.to_string());
        Ok(())
    }

    pub fn get_value(&self, action: &str, name: &str) -> Option<&str> {
        self.values
            .get(&qualified_key(action, name))
            .map(String::as_str)
    }

    /// Value of `name` in the selected action
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get_value(self.action.as_deref()?, name)
    }

    /// Store a value after checking it against its definition
    pub fn set_value(
        &mut self,
        schema: &SettingsSchema,
        action: &str,
        name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = qualified_key(action, name);
        let value = value.into();
        check_value(schema, &key, &value)?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Store a value without consulting a schema.
    ///
    /// Hosts restoring values from a document use this; call
    /// [`validate_against`](Self::validate_against) before handing them to a plugin.
    pub fn set_raw_value(&mut self, action: &str, name: &str, value: impl Into<String>) {
        self.values.insert(qualified_key(action, name), value.into());
    }

    pub fn remove_value(&mut self, action: &str, name: &str) -> Option<String> {
        self.values.remove(&qualified_key(action, name))
    }

    /// Interpret a length setting in the requested units
    pub fn length(
        &self,
        schema: &SettingsSchema,
        action: &str,
        name: &str,
        requested: LengthUnit,
    ) -> Result<f64> {
        let key = qualified_key(action, name);
        let definition = schema
            .definition(action, name)
            .ok_or_else(|| undeclared(&key))?;
        let raw = self
            .get_value(action, name)
            .unwrap_or(definition.default_value.as_str());
        definition
            .length_value(raw, requested)
            .ok_or_else(|| TpgError::InvalidSettings {
                key,
                reason: format!("'{}' is not a length", raw),
            })
    }

    /// Check every value and the selected action against `schema`
    pub fn validate_against(&self, schema: &SettingsSchema) -> Result<()> {
        if let Some(action) = &self.action {
            if !schema.contains_action(action) {
                return Err(undeclared_action(action));
            }
        }
        self.validate_values(schema)
    }

    /// Check every stored value against `schema`, ignoring the selected action
    pub fn validate_values(&self, schema: &SettingsSchema) -> Result<()> {
        for (key, value) in &self.values {
            check_value(schema, key, value)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn undeclared(key: &str) -> TpgError {
    TpgError::InvalidSettings {
        key: key.to_string(),
        reason: "not declared in the settings schema".to_string(),
    }
}

fn undeclared_action(action: &str) -> TpgError {
    TpgError::InvalidSettings {
        key: action.to_string(),
        reason: "selected action is not declared in the settings schema".to_string(),
    }
}

fn check_value(schema: &SettingsSchema, key: &str, value: &str) -> Result<()> {
    let definition = split_key(key)
        .and_then(|(action, name)| schema.definition(action, name))
        .ok_or_else(|| undeclared(key))?;
    match definition.validate(value) {
        ValidationState::Acceptable => Ok(()),
        state => Err(TpgError::InvalidSettings {
            key: key.to_string(),
            reason: format!(
                "'{}' is not acceptable for a {} setting ({:?})",
                value, definition.setting_type, state
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;

    fn schema() -> SettingsSchema {
        SettingsSchema::builder()
            .add_setting_definition(
                "rough",
                Definition::length("depth", "Depth", "", 2.0, LengthUnit::Metric),
            )
            .add_setting_definition(
                "rough",
                Definition::integer("passes", "Passes", 3, "", "").with_range(1.0, 20.0),
            )
            .add_setting_definition("finish", Definition::text("note", "Note", "", "", ""))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let schema = schema();
        let values = SettingsValues::with_defaults(&schema);
        assert_eq!(values.selected_action(), Some("rough"));
        assert_eq!(values.value("passes"), Some("3"));
        assert_eq!(values.get_value("finish", "note"), Some(""));
        assert_eq!(values.len(), 3);
        values.validate_against(&schema).unwrap();
    }

    #[test]
    fn test_add_defaults_keeps_existing() {
        let schema = schema();
        let mut values = SettingsValues::new();
        values.set_value(&schema, "rough", "passes", "7").unwrap();
        values.add_defaults(&schema);
        assert_eq!(values.get_value("rough", "passes"), Some("7"));
        assert_eq!(values.get_value("rough", "depth"), Some("2"));
    }

    #[test]
    fn test_set_value_validates() {
        let schema = schema();
        let mut values = SettingsValues::with_defaults(&schema);
        assert!(values.set_value(&schema, "rough", "passes", "50").is_err());
        assert!(values.set_value(&schema, "rough", "speed", "1").is_err());
        assert_eq!(values.get_value("rough", "passes"), Some("3"));
    }

    #[test]
    fn test_set_action() {
        let schema = schema();
        let mut values = SettingsValues::with_defaults(&schema);
        values.set_action(&schema, "finish").unwrap();
        assert_eq!(values.value("note"), Some(""));
        let err = values.set_action(&schema, "drill").unwrap_err();
        assert!(err.is_invalid_settings());
        assert_eq!(values.selected_action(), Some("finish"));
    }

    #[test]
    fn test_validate_against_rejects_raw_values() {
        let schema = schema();
        let mut values = SettingsValues::with_defaults(&schema);
        values.set_raw_value("rough", "passes", "many");
        let err = values.validate_against(&schema).unwrap_err();
        assert!(err.is_invalid_settings());

        let mut values = SettingsValues::with_defaults(&schema);
        values.set_raw_value("pocket", "stepover", "1");
        assert!(values.validate_against(&schema).is_err());
    }

    #[test]
    fn test_validate_values_ignores_selected_action() {
        let schema = schema();
        let values: SettingsValues =
            serde_json::from_str(r#"{ "action": "drill", "values": { "rough::passes": "4" } }"#)
                .unwrap();
        assert!(values.validate_against(&schema).is_err());
        values.validate_values(&schema).unwrap();

        let mut values = values;
        values.set_raw_value("rough", "passes", "0");
        assert!(values.validate_values(&schema).unwrap_err().is_invalid_settings());
    }

    #[test]
    fn test_length_lookup() {
        let schema = schema();
        let mut values = SettingsValues::with_defaults(&schema);
        values.set_value(&schema, "rough", "depth", "25.4").unwrap();
        let inches = values.length(&schema, "rough", "depth", LengthUnit::Imperial).unwrap();
        assert!((inches - 1.0).abs() < 1e-9);
        assert!(values.length(&schema, "rough", "width", LengthUnit::Metric).is_err());
    }
}
