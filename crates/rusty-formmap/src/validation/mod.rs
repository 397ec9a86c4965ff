// File: src/validation/mod.rs
// Purpose: Validation failures keyed by field path, as consumed by the mapper

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod messages;

#[cfg(feature = "garde")]
pub mod garde;

/// Looks up the error message for a field path.
///
/// This is all the mapper knows about validation. Both methods are total:
/// a path without a recorded failure yields `""` / `false`.
pub trait ErrorLookup {
    /// Message for `path`, or an empty string
    fn message_for(&self, path: &str) -> String;

    fn has_error(&self, path: &str) -> bool;
}

impl<L: ErrorLookup + ?Sized> ErrorLookup for &L {
    fn message_for(&self, path: &str) -> String {
        (**self).message_for(path)
    }

    fn has_error(&self, path: &str) -> bool {
        (**self).has_error(path)
    }
}

/// No validation result means no errors
impl<L: ErrorLookup> ErrorLookup for Option<L> {
    fn message_for(&self, path: &str) -> String {
        self.as_ref().map(|l| l.message_for(path)).unwrap_or_default()
    }

    fn has_error(&self, path: &str) -> bool {
        self.as_ref().is_some_and(|l| l.has_error(path))
    }
}

/// One failed rule on one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationField {
    /// Rule tag, e.g. `min` or `required`
    pub tag: String,
    /// Rule parameter, e.g. `5` for `min=5`
    #[serde(default)]
    pub param: String,
    /// Name of the field as the validator reported it
    #[serde(default)]
    pub field: String,
    /// Ready-made text from validators that already render messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationField {
    pub fn new(tag: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            param: param.into(),
            ..Self::default()
        }
    }

    /// A failure whose message text is already known
    pub fn with_message(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// User-facing message
    pub fn msg(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => messages::message(&self.tag, &self.param),
        }
    }
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg())
    }
}

/// Validation failures keyed by normalized field path (`items[0].price`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, ValidationField>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, field: ValidationField) -> Option<ValidationField> {
        self.0.insert(path.into(), field)
    }

    pub fn get(&self, path: &str) -> Option<&ValidationField> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failures in path order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValidationField)> {
        self.0.iter()
    }
}

impl ErrorLookup for ValidationErrors {
    fn message_for(&self, path: &str) -> String {
        self.0.get(path).map(ValidationField::msg).unwrap_or_default()
    }

    fn has_error(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }
}

impl<P: Into<String>> FromIterator<(P, ValidationField)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (P, ValidationField)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(path, field)| (path.into(), field)).collect())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a String, &'a ValidationField);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ValidationField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of validating a domain value; an `Error` so handlers can `?` it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub errors: ValidationErrors,
}

impl ValidationError {
    pub fn new(errors: ValidationErrors) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        Self { errors }
    }
}

impl ErrorLookup for ValidationError {
    fn message_for(&self, path: &str) -> String {
        self.errors.message_for(path)
    }

    fn has_error(&self, path: &str) -> bool {
        self.errors.has_error(path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("validation error");
        }

        let msgs: Vec<String> = self
            .errors
            .iter()
            .map(|(path, field)| format!("{}: {}", path, field.msg()))
            .collect();
        write!(f, "validation failed: {}", msgs.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample_errors() -> ValidationErrors {
        [
            ("name", ValidationField::new("required", "")),
            ("email", ValidationField::new("email", "")),
            ("age", ValidationField::new("gte", "18")),
            ("password", ValidationField::new("min", "8")),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    #[case("name", "This field is required")]
    #[case("email", "Invalid email address")]
    #[case("age", "Value must be at least 18")]
    #[case("password", "Minimum length is 8")]
    #[case("nonexistent", "")]
    fn test_message_for(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(sample_errors().message_for(path), expected);
    }

    #[rstest]
    #[case("name", true)]
    #[case("email", true)]
    #[case("age_limit", false)]
    #[case("", false)]
    fn test_has_error(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(sample_errors().has_error(path), expected);
    }

    #[test]
    fn test_explicit_message_wins_over_tag() {
        let field = ValidationField {
            tag: "min".to_string(),
            param: "3".to_string(),
            field: "name".to_string(),
            message: Some("length is lower than 3".to_string()),
        };
        assert_eq!(field.msg(), "length is lower than 3");
        assert_eq!(field.to_string(), "length is lower than 3");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::default().to_string(), "validation error");

        let err = ValidationError::new(
            [
                ("name", ValidationField::new("required", "")),
                ("email", ValidationField::new("email", "")),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            err.to_string(),
            "validation failed: email: Invalid email address; name: This field is required"
        );
    }

    #[test]
    fn test_validation_error_lookup() {
        let err = ValidationError::from(sample_errors());
        assert!(!err.is_empty());
        assert!(err.has_error("name"));
        assert!(!err.has_error("phone"));
        assert_eq!(err.message_for("name"), "This field is required");
        assert_eq!(err.message_for("phone"), "");
    }

    #[test]
    fn test_absent_result_has_no_errors() {
        let none: Option<ValidationError> = None;
        assert_eq!(none.message_for("name"), "");
        assert!(!none.has_error("name"));

        let some = Some(ValidationError::from(sample_errors()));
        assert!(some.has_error("name"));
    }

    #[test]
    fn test_errors_round_trip_as_json_map() {
        let errors = sample_errors();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["age"]["tag"], "gte");
        assert_eq!(json["age"]["param"], "18");
        let back: ValidationErrors = serde_json::from_value(json).unwrap();
        assert_eq!(back, errors);
    }
}
