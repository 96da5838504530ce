//! Config schema declarations advertised to the host.

use serde::{Deserialize, Serialize};

/// Widget kind the host should render for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
}

/// Validation rule attached to a config field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FieldValidation {
    PositiveInteger { message: String },
}

impl FieldValidation {
    /// Checks `value` against the rule, returning the rule's message on failure.
    ///
    /// Hosts often hand back form input as strings, so numeric strings are accepted.
    pub fn check(&self, value: &serde_json::Value) -> Result<(), String> {
        match self {
            FieldValidation::PositiveInteger { message } => {
                let n = match value {
                    serde_json::Value::Number(n) => n.as_u64(),
                    serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
                    _ => None,
                };
                match n {
                    Some(n) if n > 0 => Ok(()),
                    _ => Err(message.clone()),
                }
            }
        }
    }
}

/// One recognized config option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub default: serde_json::Value,
    pub required: bool,
    pub message: String,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<FieldValidation>,
}
