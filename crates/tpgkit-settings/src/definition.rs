//! Setting definitions
//!
//! A [`Definition`] is reference information about one configurable parameter
//! of an action: how the host should render it, its default, units and help
//! text. Values are not stored here; see [`crate::SettingsValues`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tpgkit_core::{parse_length, ConfigurationError, LengthUnit};

/// Option id that carries the delimiter characters of an object-names setting
pub const DELIMITERS_OPTION: &str = "Delimiters";
/// Option id that carries an accepted object type of an object-names setting
pub const TYPE_ID_OPTION: &str = "TypeId";

/// How the host should render and edit a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    /// Free text
    Text,
    /// One of a group of radio buttons
    Radio,
    /// Names of document objects restricted to the listed types
    ObjectNamesForType,
    /// Combo box; the value is the option id
    Enumeration,
    /// Length with units of `mm` or `inch`
    Length,
    Filename,
    Directory,
    /// `red,green,blue,alpha`
    Color,
    Integer,
    /// Floating point value with free-format units
    Double,
}

impl SettingType {
    /// Host widget tag, e.g. `Cam::Textbox`
    pub fn widget_tag(self) -> &'static str {
        match self {
            Self::Text => "Cam::Textbox",
            Self::Radio => "Cam::Radio",
            Self::ObjectNamesForType => "Cam::ObjectNamesForType",
            Self::Enumeration => "Cam::Enumeration",
            Self::Length => "Cam::Length",
            Self::Filename => "Cam::Filename",
            Self::Directory => "Cam::Directory",
            Self::Color => "Cam::Color",
            Self::Integer => "Cam::Integer",
            Self::Double => "Cam::Double",
        }
    }

    /// Parse a host widget tag. The `Cam::` prefix is optional and case is ignored.
    pub fn from_widget_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let bare = tag.strip_prefix("Cam::").unwrap_or(tag);
        let kind = match bare.to_ascii_lowercase().as_str() {
            "textbox" | "text" => Self::Text,
            "radio" => Self::Radio,
            "objectnamesfortype" => Self::ObjectNamesForType,
            "enumeration" | "combobox" => Self::Enumeration,
            "length" => Self::Length,
            "filename" => Self::Filename,
            "directory" => Self::Directory,
            "color" | "colour" => Self::Color,
            "integer" => Self::Integer,
            "double" => Self::Double,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.widget_tag())
    }
}

/// Result of checking an entered value against its definition.
///
/// Mirrors the three states of an input validator so that a UI can tell
/// "not yet valid" apart from "never valid".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Invalid,
    Intermediate,
    Acceptable,
}

/// Reference data attached to a definition (enumeration entries, delimiters, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOption {
    pub id: String,
    pub label: String,
}

impl SettingOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One configurable parameter of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    pub label: String,
    pub setting_type: SettingType,
    pub default_value: String,
    pub units: String,
    pub help_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SettingOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl Definition {
    fn with_type(
        name: impl Into<String>,
        label: impl Into<String>,
        setting_type: SettingType,
        default_value: impl Into<String>,
        units: impl Into<String>,
        help_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            setting_type,
            default_value: default_value.into(),
            units: units.into(),
            help_text: help_text.into(),
            options: Vec::new(),
            minimum: None,
            maximum: None,
        }
    }

    /// Creates a definition from a host widget tag.
    ///
    /// Field order is `(name, label, widget, default, units, help)`.
    pub fn new(
        name: &str,
        label: &str,
        widget_tag: &str,
        default_value: &str,
        units: &str,
        help_text: &str,
    ) -> Result<Self, ConfigurationError> {
        let setting_type = SettingType::from_widget_tag(widget_tag).ok_or_else(|| {
            ConfigurationError::UnknownWidgetKind {
                name: name.to_string(),
                kind: widget_tag.to_string(),
            }
        })?;
        Ok(Self::with_type(
            name,
            label,
            setting_type,
            default_value,
            units,
            help_text,
        ))
    }

    pub fn text(name: &str, label: &str, default_value: &str, units: &str, help_text: &str) -> Self {
        Self::with_type(name, label, SettingType::Text, default_value, units, help_text)
    }

    pub fn radio(name: &str, label: &str, default_value: &str, help_text: &str) -> Self {
        Self::with_type(name, label, SettingType::Radio, default_value, "", help_text)
    }

    pub fn integer(name: &str, label: &str, default_value: i64, units: &str, help_text: &str) -> Self {
        Self::with_type(
            name,
            label,
            SettingType::Integer,
            default_value.to_string(),
            units,
            help_text,
        )
    }

    pub fn double(name: &str, label: &str, help_text: &str, default_value: f64, units: &str) -> Self {
        Self::with_type(
            name,
            label,
            SettingType::Double,
            default_value.to_string(),
            units,
            help_text,
        )
    }

    pub fn length(name: &str, label: &str, help_text: &str, default_value: f64, unit: LengthUnit) -> Self {
        Self::with_type(
            name,
            label,
            SettingType::Length,
            default_value.to_string(),
            unit.label(),
            help_text,
        )
    }

    /// Enumeration setting. The value is always the option id; add entries
    /// with [`Definition::with_option`].
    pub fn enumeration(name: &str, label: &str, default_value: i64, units: &str, help_text: &str) -> Self {
        Self::with_type(
            name,
            label,
            SettingType::Enumeration,
            default_value.to_string(),
            units,
            help_text,
        )
    }

    pub fn filename(name: &str, label: &str, default_value: &str, units: &str, help_text: &str) -> Self {
        Self::with_type(name, label, SettingType::Filename, default_value, units, help_text)
    }

    pub fn directory(name: &str, label: &str, default_value: &str, units: &str, help_text: &str) -> Self {
        Self::with_type(name, label, SettingType::Directory, default_value, units, help_text)
    }

    /// Colour setting, defaults to opaque black
    pub fn color(name: &str, label: &str, help_text: &str) -> Self {
        Self::with_type(name, label, SettingType::Color, "0,0,0,255", "", help_text)
    }

    /// Object names whose types are listed as [`TYPE_ID_OPTION`] options
    pub fn object_names_for_type(
        name: &str,
        label: &str,
        help_text: &str,
        delimiters: &str,
        object_type: &str,
    ) -> Self {
        Self::with_type(name, label, SettingType::ObjectNamesForType, "", "", help_text)
            .with_option(DELIMITERS_OPTION, delimiters)
            .with_option(TYPE_ID_OPTION, object_type)
    }

    pub fn with_option(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SettingOption::new(id, label));
        self
    }

    /// Restrict numeric settings to `minimum..=maximum`
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Key this definition is stored under when it belongs to `action`
    pub fn full_name(&self, action: &str) -> String {
        crate::schema::qualified_key(action, &self.name)
    }

    /// Search for an option by id alone, ignoring case
    pub fn option(&self, id: &str) -> Option<&SettingOption> {
        self.options.iter().find(|o| o.id.eq_ignore_ascii_case(id))
    }

    /// Units of a length setting, metric when unspecified
    pub fn length_unit(&self) -> LengthUnit {
        self.units.parse().unwrap_or_default()
    }

    /// Object types accepted by an object-names setting
    pub fn object_types(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.id.eq_ignore_ascii_case(TYPE_ID_OPTION))
            .map(|o| o.label.as_str())
            .collect()
    }

    /// Split an object-names value on the configured delimiters
    pub fn object_names<'a>(&self, value: &'a str) -> Vec<&'a str> {
        let delimiters: Vec<char> = self
            .option(DELIMITERS_OPTION)
            .map(|o| o.label.chars().collect())
            .unwrap_or_else(|| vec![' ', ',']);
        value
            .split(|c| delimiters.contains(&c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Interpret a length value entered in this setting's units in `requested` units
    pub fn length_value(&self, input: &str, requested: LengthUnit) -> Option<f64> {
        let unit = self.length_unit();
        parse_length(input, unit)
            .ok()
            .map(|v| unit.convert(v, requested))
    }

    fn check_range(&self, value: f64) -> ValidationState {
        let below = self.minimum.is_some_and(|min| value < min);
        let above = self.maximum.is_some_and(|max| value > max);
        if below || above {
            ValidationState::Intermediate
        } else {
            ValidationState::Acceptable
        }
    }

    /// Check an entered value against this definition
    pub fn validate(&self, input: &str) -> ValidationState {
        let input = input.trim();
        match self.setting_type {
            SettingType::Text
            | SettingType::Radio
            | SettingType::Filename
            | SettingType::Directory
            | SettingType::ObjectNamesForType => ValidationState::Acceptable,
            SettingType::Integer => match input {
                "" | "-" | "+" => ValidationState::Intermediate,
                _ => match input.parse::<i64>() {
                    Ok(v) => self.check_range(v as f64),
                    Err(_) => ValidationState::Invalid,
                },
            },
            SettingType::Double => match input {
                "" | "-" | "+" | "." => ValidationState::Intermediate,
                _ => match input.parse::<f64>() {
                    Ok(v) => self.check_range(v),
                    Err(_) => ValidationState::Invalid,
                },
            },
            SettingType::Length => {
                if input.is_empty() {
                    return ValidationState::Intermediate;
                }
                match parse_length(input, self.length_unit()) {
                    Ok(v) => self.check_range(v),
                    Err(_) => ValidationState::Invalid,
                }
            }
            SettingType::Enumeration => {
                if input.is_empty() {
                    ValidationState::Intermediate
                } else if self.options.is_empty() || self.option(input).is_some() {
                    ValidationState::Acceptable
                } else {
                    ValidationState::Invalid
                }
            }
            SettingType::Color => {
                let parts: Vec<&str> = input.split(',').map(str::trim).collect();
                let valid = parts.len() == 4 && parts.iter().all(|p| p.parse::<u8>().is_ok());
                if valid {
                    ValidationState::Acceptable
                } else {
                    ValidationState::Invalid
                }
            }
        }
    }

    /// Decode a colour value into `(red, green, blue, alpha)`
    pub fn color_components(value: &str) -> Option<(u8, u8, u8, u8)> {
        let parts = value
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        match parts.as_slice() {
            [r, g, b, a] => Some((*r, *g, *b, *a)),
            _ => None,
        }
    }
}
