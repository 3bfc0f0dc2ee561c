//! Settings schema
//!
//! Named groups of [`Definition`]s, one group per action, in the order the
//! plugin author declared them. A schema is immutable once built.

use crate::definition::Definition;
use serde::Serialize;
use std::collections::HashSet;
use tpgkit_core::ConfigurationError;

/// Separator between action and setting name in a qualified key
pub const KEY_SEPARATOR: &str = "::";

/// Qualified `<action>::<name>` key for a setting
pub fn qualified_key(action: &str, name: &str) -> String {
    format!("{}{}{}", action, KEY_SEPARATOR, name)
}

/// Split a qualified key into `(action, name)`
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
}

/// The settings belonging to one action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionGroup {
    pub action: String,
    pub definitions: Vec<Definition>,
}

/// Settings of a tool path generator grouped by action
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SettingsSchema {
    groups: Vec<ActionGroup>,
}

impl SettingsSchema {
    pub fn builder() -> SettingsSchemaBuilder {
        SettingsSchemaBuilder::default()
    }

    /// Action names in declaration order
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.action.as_str())
    }

    pub fn action_names(&self) -> Vec<String> {
        self.actions().map(str::to_string).collect()
    }

    pub fn contains_action(&self, action: &str) -> bool {
        self.groups.iter().any(|g| g.action == action)
    }

    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    /// Definitions of one action, in display order
    pub fn group(&self, action: &str) -> Option<&[Definition]> {
        self.groups
            .iter()
            .find(|g| g.action == action)
            .map(|g| g.definitions.as_slice())
    }

    pub fn definition(&self, action: &str, name: &str) -> Option<&Definition> {
        self.group(action)?.iter().find(|d| d.name == name)
    }

    /// Look up by qualified `<action>::<name>` key
    pub fn definition_by_key(&self, key: &str) -> Option<&Definition> {
        let (action, name) = split_key(key)?;
        self.definition(action, name)
    }

    /// Every `(action, definition)` pair in declaration order
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.groups
            .iter()
            .flat_map(|g| g.definitions.iter().map(move |d| (g.action.as_str(), d)))
    }

    /// Number of action groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Accumulates definitions and checks them when [`build`](Self::build) is called.
#[derive(Debug, Default)]
pub struct SettingsSchemaBuilder {
    entries: Vec<(String, Definition)>,
}

impl SettingsSchemaBuilder {
    /// Add a setting to an action group, creating the group on first use
    pub fn add_setting_definition(mut self, action: impl Into<String>, definition: Definition) -> Self {
        self.entries.push((action.into(), definition));
        self
    }

    /// Same as [`add_setting_definition`](Self::add_setting_definition) but
    /// parses the host widget tag first.
    pub fn add_widget(
        self,
        action: impl Into<String>,
        definition: Result<Definition, ConfigurationError>,
    ) -> Result<Self, ConfigurationError> {
        Ok(self.add_setting_definition(action, definition?))
    }

    pub fn build(self) -> Result<SettingsSchema, ConfigurationError> {
        let mut groups: Vec<ActionGroup> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (action, definition) in self.entries {
            if action.is_empty() {
                return Err(ConfigurationError::EmptyName { what: "action" });
            }
            if definition.name.is_empty() {
                return Err(ConfigurationError::EmptyName { what: "setting" });
            }
            if let (Some(minimum), Some(maximum)) = (definition.minimum, definition.maximum) {
                if minimum > maximum {
                    return Err(ConfigurationError::InvalidRange {
                        name: definition.name,
                        minimum,
                        maximum,
                    });
                }
            }
            if !seen.insert(qualified_key(&action, &definition.name)) {
                return Err(ConfigurationError::DuplicateSetting {
                    action,
                    name: definition.name,
                });
            }

            match groups.iter_mut().find(|g| g.action == action) {
                Some(group) => group.definitions.push(definition),
                None => groups.push(ActionGroup {
                    action,
                    definitions: vec![definition],
                }),
            }
        }

        Ok(SettingsSchema { groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str) -> Definition {
        Definition::text(name, name, "", "", "")
    }

    #[test]
    fn test_groups_keep_insertion_order() {
        let schema = SettingsSchema::builder()
            .add_setting_definition("rough", text("a"))
            .add_setting_definition("finish", text("b"))
            .add_setting_definition("rough", text("c"))
            .build()
            .unwrap();
        assert_eq!(schema.action_names(), vec!["rough", "finish"]);
        let names: Vec<&str> = schema.group("rough").unwrap().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(schema.definitions().count(), 3);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = SettingsSchema::builder()
            .add_setting_definition("default", text("tolerance"))
            .add_setting_definition("default", text("tolerance"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateSetting {
                action: "default".to_string(),
                name: "tolerance".to_string(),
            }
        );
    }

    #[test]
    fn test_same_key_in_different_actions() {
        let schema = SettingsSchema::builder()
            .add_setting_definition("rough", text("depth"))
            .add_setting_definition("finish", text("depth"))
            .build()
            .unwrap();
        assert!(schema.definition_by_key("finish::depth").is_some());
        assert!(schema.definition_by_key("finish-depth").is_none());
    }

    #[test]
    fn test_empty_names_and_ranges() {
        let err = SettingsSchema::builder()
            .add_setting_definition("", text("a"))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyName { what: "action" });

        let err = SettingsSchema::builder()
            .add_setting_definition(
                "default",
                Definition::integer("n", "N", 1, "", "").with_range(5.0, 1.0),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRange { .. }));
    }

    #[test]
    fn test_add_widget_propagates_unknown_kind() {
        let result = SettingsSchema::builder().add_widget(
            "default",
            Definition::new("x", "X", "Cam::Knob", "", "", ""),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_key_helpers() {
        assert_eq!(qualified_key("default", "geometry"), "default::geometry");
        assert_eq!(split_key("default::geometry"), Some(("default", "geometry")));
    }
}
