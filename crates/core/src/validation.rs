//! Configuration and input validation
//!
//! Field-level validation with collected errors and warnings, so a
//! `validate` run can report every defect at once instead of stopping at
//! the first.
//!
//! # Example
//!
//! ```rust,ignore
//! use apkforge_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("signing.upload.store_file", &identity.store_file)
//!     .min_value("sdk.version_code", sdk.version_code as u64, 1)
//!     .validate();
//!
//! if !result.is_valid() {
//!     for error in result.errors() {
//!         eprintln!("Validation error: {}", error);
//!     }
//! }
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Android package names: dot-separated letter-led identifiers,
/// at least two segments.
static PACKAGE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+$").unwrap()
});

/// Check whether a string is a well-formed Android package name
pub fn is_valid_package_name(value: &str) -> bool {
    PACKAGE_NAME_RE.is_match(value)
}

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate that a numeric field meets a minimum
    pub fn min_value(mut self, field: &str, value: u64, min: u64) -> Self {
        if value < min {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at least {}", min),
                code: "MIN_VALUE".to_string(),
                expected: Some(format!(">= {}", min)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that one numeric field does not exceed another
    pub fn ordered(mut self, field: &str, lower: u64, upper: u64, description: &str) -> Self {
        if lower > upper {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: description.to_string(),
                code: "ORDERING".to_string(),
                expected: Some(format!("<= {}", upper)),
                actual: Some(lower.to_string()),
            });
        }
        self
    }

    /// Validate an Android package name field
    pub fn package_name(mut self, field: &str, value: &str) -> Self {
        if !is_valid_package_name(value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Not a valid Android package name".to_string(),
                code: "PACKAGE_NAME".to_string(),
                expected: Some("dot-separated identifiers, e.g. com.example.app".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a warning when a condition holds
    pub fn warn_if(mut self, condition: bool, field: &str, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Finish and return the collected result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_patterns() {
        assert!(is_valid_package_name("com.example.app"));
        assert!(is_valid_package_name("com.acme.shop_app"));
        assert!(!is_valid_package_name("app"));
        assert!(!is_valid_package_name("com..app"));
        assert!(!is_valid_package_name("com.1app"));
        assert!(!is_valid_package_name(""));
    }

    #[test]
    fn test_required_field() {
        let result = Validator::new()
            .required("signing.upload.store_password", "")
            .validate();

        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_ordered_fields() {
        let result = Validator::new()
            .ordered("sdk.min", 34, 21, "min SDK must not exceed target SDK")
            .validate();

        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "ORDERING");
    }

    #[test]
    fn test_warnings_do_not_fail_validation() {
        let result = Validator::new()
            .warn_if(true, "signing.upload", "store_password is inline plaintext")
            .validate();

        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_to_result_collects_messages() {
        let result = Validator::new()
            .required("project.namespace", "")
            .min_value("sdk.version_code", 0, 1)
            .validate();

        let err = result.to_result().unwrap_err();
        assert!(err.to_string().contains("project.namespace"));
        assert!(err.to_string().contains("sdk.version_code"));
    }
}
