//! Field validation rules.
//!
//! Request types derive [`validator::Validate`]; the custom rules below plug
//! into it, and [`field_errors`] flattens the outcome into the per-field
//! failures listed in an error envelope.

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// Characters accepted as the "special" class of a strong password.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>?/\\`~";

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Rule codes as they appear in rendered messages.
pub const REQUIRED: &str = "required";
pub const STRONG_PASSWORD: &str = "strongPassword";
pub const NOT_EMPTY: &str = "not_empty";

/// A single field failure: the field name and the code of the rule it broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }

    /// Human readable rendering used in the `errors` list of an envelope.
    pub fn message(&self) -> String {
        if self.rule == REQUIRED {
            format!("Field {} is required", self.field)
        } else {
            format!("Fields {} is invalid due to {}", self.field, self.rule)
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// One failure per field, ordered by field name.
///
/// A field that broke several rules reports `required` when it is among them,
/// otherwise the first recorded rule.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, failures)| {
            let failure = failures
                .iter()
                .find(|e| e.code == REQUIRED)
                .or_else(|| failures.first())?;
            Some(FieldError::new(field.as_ref(), failure.code.as_ref()))
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Rejects empty and whitespace-only values as `required`.
pub fn validate_present(value: &str) -> Result<(), ValidationError> {
    if is_present(value) {
        Ok(())
    } else {
        Err(ValidationError::new(REQUIRED))
    }
}

/// Rejects whitespace-only replacements of an optional field.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_present(value) {
        Ok(())
    } else {
        Err(ValidationError::new(NOT_EMPTY))
    }
}

/// `required` for an empty password, `strongPassword` for a weak one.
pub fn validate_strong_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::new(REQUIRED))
    } else if !is_strong_password(password) {
        Err(ValidationError::new(STRONG_PASSWORD))
    } else {
        Ok(())
    }
}

/// Minimum length plus one character from each of four classes.
pub fn is_strong_password(password: &str) -> bool {
    if password.len() < PASSWORD_MIN_LENGTH {
        return false;
    }

    let (mut upper, mut lower, mut digit, mut special) = (false, false, false, false);
    for c in password.chars() {
        match c {
            'A'..='Z' => upper = true,
            'a'..='z' => lower = true,
            '0'..='9' => digit = true,
            c if PASSWORD_SPECIAL_CHARS.contains(c) => special = true,
            _ => {}
        }
    }

    upper && lower && digit && special
}

/// 24 hexadecimal characters encoding a 12 byte document identifier.
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == 24
        && value.bytes().all(|b| b.is_ascii_hexdigit())
        && ObjectId::parse_str(value).is_ok()
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
