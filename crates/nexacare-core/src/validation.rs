//! Field-level validation, run before any write is attempted.
//!
//! Pure functions, no I/O. Each failure carries the user-facing message
//! for that field; the storage layer's CHECK constraints are never the
//! first line of defense.

use thiserror::Error;

use crate::models::Role;

/// Minimum length for first/last/full name fields.
pub const MIN_NAME_LENGTH: usize = 2;
/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Required email domain suffix for all accounts.
pub const EMAIL_DOMAIN: &str = "@nexacare.med";

/// Validation failures, one variant per user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be at least {MIN_NAME_LENGTH} characters long")]
    NameTooShort { field: &'static str },

    #[error("Email must end with {EMAIL_DOMAIN}")]
    InvalidEmailDomain,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    PasswordTooShort,

    #[error("Invalid role selected: {0}")]
    InvalidRole(String),

    #[error("Invalid {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("No fields to update")]
    EmptyUpdate,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reject a name field whose trimmed length is below the minimum.
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().len() < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort { field });
    }
    Ok(())
}

/// Reject an email outside the clinic domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if !email.ends_with(EMAIL_DOMAIN) {
        return Err(ValidationError::InvalidEmailDomain);
    }
    Ok(())
}

/// Reject a password below the minimum length.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Parse a role string, rejecting anything outside {Doctor, HR, Admin}.
pub fn validate_role(role: &str) -> ValidationResult<Role> {
    Role::parse(role).ok_or_else(|| ValidationError::InvalidRole(role.to_string()))
}

/// Reject a blank required field.
pub fn require_field(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Parse an enum-valued field against its fixed vocabulary.
pub fn parse_enum<T>(
    field: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> ValidationResult<T> {
    parse(value).ok_or_else(|| ValidationError::InvalidEnumValue {
        field,
        value: value.to_string(),
    })
}
