//! Reusable field validators
//!
//! A validator inspects a field's value and returns the user-facing error
//! to show next to it. Validators only ever see non-empty values; the
//! required check runs before them.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Prefix every Tailscale auth key starts with
pub const TAILSCALE_KEY_PREFIX: &str = "tskey-";

/// Prefix every Anthropic API key starts with
pub const ANTHROPIC_KEY_PREFIX: &str = "sk-ant-";

/// Inline validation failure attached to a form field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("value cannot be empty")]
    Empty,

    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must start with \"{prefix}\"")]
    MissingPrefix { prefix: String },

    #[error("{0}")]
    Custom(String),
}

type ValidateFn = dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync;

/// Shareable validation predicate
#[derive(Clone)]
pub struct Validator(Arc<ValidateFn>);

impl Validator {
    /// Wrap a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the predicate
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Rejects empty or whitespace-only values
pub fn not_empty() -> Validator {
    Validator::new(|value| {
        if value.trim().is_empty() {
            Err(ValidationError::Empty)
        } else {
            Ok(())
        }
    })
}

/// Requires at least `min` characters
pub fn min_length(min: usize) -> Validator {
    Validator::new(move |value| {
        let actual = value.chars().count();
        if actual < min {
            Err(ValidationError::TooShort { min, actual })
        } else {
            Ok(())
        }
    })
}

/// Requires the value to start with `prefix`
pub fn has_prefix(prefix: &'static str) -> Validator {
    Validator::new(move |value| {
        if value.starts_with(prefix) {
            Ok(())
        } else {
            Err(ValidationError::MissingPrefix {
                prefix: prefix.to_string(),
            })
        }
    })
}

/// Tailscale auth keys look like `tskey-auth-...`
pub fn tailscale_auth_key() -> Validator {
    has_prefix(TAILSCALE_KEY_PREFIX)
}

/// Anthropic API keys look like `sk-ant-...`
pub fn anthropic_api_key() -> Validator {
    has_prefix(ANTHROPIC_KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert_eq!(not_empty().validate("   "), Err(ValidationError::Empty));
        assert!(not_empty().validate("x").is_ok());
    }

    #[test]
    fn test_min_length_counts_chars() {
        let validator = min_length(3);
        assert_eq!(
            validator.validate("ab"),
            Err(ValidationError::TooShort { min: 3, actual: 2 })
        );
        assert!(validator.validate("名字好").is_ok());
    }

    #[test]
    fn test_key_prefixes() {
        assert!(tailscale_auth_key().validate("tskey-auth-abc").is_ok());
        assert!(anthropic_api_key().validate("sk-ant-api03-xyz").is_ok());

        let err = tailscale_auth_key().validate("sk-ant-123").unwrap_err();
        assert_eq!(err.to_string(), "must start with \"tskey-\"");
        assert!(anthropic_api_key().validate("tskey-1").is_err());
    }

    #[test]
    fn test_error_messages() {
        let required = ValidationError::Required {
            field: "Hostname".to_string(),
        };
        assert_eq!(required.to_string(), "Hostname is required");
        assert_eq!(
            ValidationError::TooShort { min: 8, actual: 2 }.to_string(),
            "must be at least 8 characters (got 2)"
        );
    }
}
