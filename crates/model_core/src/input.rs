//! Presence and number checks shared by every entity kind.
//!
//! Presence is decided by `Option` alone, never by truthiness: `0` is a value,
//! `None` (absent or `null`) is not.

use serde::Deserialize;

use crate::{EntityKind, ModelError, ModelResult};

/// A numeric field as sent by a client: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// Finite value, if the input holds one.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            NumberInput::Number(value) => *value,
            NumberInput::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    fn is_blank(&self) -> bool {
        matches!(self, NumberInput::Text(text) if text.trim().is_empty())
    }
}

/// Free text sent either whole or as parts (joined with `", "`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Parts(Vec<String>),
}

impl TextInput {
    pub fn into_text(self) -> String {
        match self {
            TextInput::Text(text) => text,
            TextInput::Parts(parts) => parts
                .iter()
                .map(|part| part.trim())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub fn required_text(kind: EntityKind, field: &str, value: Option<String>) -> ModelResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing(kind, field)),
    }
}

pub fn required_joined_text(
    kind: EntityKind,
    field: &str,
    value: Option<TextInput>,
) -> ModelResult<String> {
    required_text(kind, field, value.map(TextInput::into_text))
}

pub fn required_number(
    kind: EntityKind,
    field: &str,
    value: Option<NumberInput>,
) -> ModelResult<f64> {
    let Some(value) = value else {
        return Err(missing(kind, field));
    };
    value.parse().ok_or_else(|| not_a_number(kind, field))
}

/// Absent, `null` and blank strings all mean "unset".
pub fn optional_number(
    kind: EntityKind,
    field: &str,
    value: Option<NumberInput>,
) -> ModelResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .ok_or_else(|| not_a_number(kind, field)),
    }
}

fn missing(kind: EntityKind, field: &str) -> ModelError {
    ModelError::validation(format!("{} {field} is required", kind.label()))
}

fn not_a_number(kind: EntityKind, field: &str) -> ModelError {
    ModelError::validation(format!("{} {field} must be a number", kind.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_present_number() {
        let value = required_number(EntityKind::Parameter, "value", Some(NumberInput::Number(0.0)));
        assert_eq!(value.expect("zero"), 0.0);
        let text = NumberInput::Text("0".to_string());
        assert_eq!(
            required_number(EntityKind::Constraint, "rhs", Some(text)).expect("zero text"),
            0.0
        );
    }

    #[test]
    fn absent_number_is_missing() {
        let err = required_number(EntityKind::Parameter, "value", None).expect_err("missing");
        assert_eq!(err.message(), "Parameter value is required");
    }

    #[test]
    fn unparseable_numbers_are_rejected() {
        for raw in ["", "abc", "NaN", "inf"] {
            let err = required_number(
                EntityKind::Constraint,
                "rhs",
                Some(NumberInput::Text(raw.to_string())),
            )
            .expect_err("not a number");
            assert_eq!(err.message(), "Constraint rhs must be a number");
        }
    }

    #[test]
    fn optional_number_treats_blank_as_unset() {
        let kind = EntityKind::DecisionVariable;
        assert_eq!(optional_number(kind, "value", None).expect("none"), None);
        let blank = Some(NumberInput::Text("  ".to_string()));
        assert_eq!(optional_number(kind, "value", blank).expect("blank"), None);
        let text = Some(NumberInput::Text("2.5".to_string()));
        assert_eq!(optional_number(kind, "value", text).expect("text"), Some(2.5));
        let bad = Some(NumberInput::Text("x".to_string()));
        assert!(optional_number(kind, "value", bad).is_err());
    }

    #[test]
    fn blank_text_is_missing() {
        assert!(required_text(EntityKind::Set, "set_name", Some("   ".into())).is_err());
        assert!(required_text(EntityKind::Set, "set_name", None).is_err());
        assert_eq!(
            required_text(EntityKind::Set, "set_name", Some("Suppliers".into())).expect("ok"),
            "Suppliers"
        );
    }

    #[test]
    fn text_parts_are_joined() {
        let parts: TextInput = serde_json::from_str(r#"["x + y", " ", "z"]"#).expect("parts");
        assert_eq!(parts.into_text(), "x + y, z");
    }
}
