//! Analysis Configuration Options
//!
//! Declarative configuration surface an analysis exposes to its host. The
//! host renders the options (checkboxes and free-text fields) and hands the
//! edited set back through `configure`.

use serde::{Deserialize, Serialize};

/// Kind of widget the host renders for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Boolean checkbox
    Checkbox,
    /// Free-text field
    Text,
}

/// One user-configurable option of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationOption {
    /// Display name of the option
    pub name: String,
    /// Widget kind
    pub kind: OptionKind,
    /// Current value, `None` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ConfigurationOption {
    /// Create a checkbox option with a default state
    pub fn checkbox(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::Checkbox,
            value: Some(default.to_string()),
        }
    }

    /// Create an unset free-text option
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::Text,
            value: None,
        }
    }

    /// Set the option value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Interpret the value as a boolean; unset or non-"true" reads false
    pub fn value_as_bool(&self) -> bool {
        matches!(self.value.as_deref(), Some(v) if v.eq_ignore_ascii_case("true"))
    }
}
