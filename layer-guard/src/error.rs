//! Error types for the layer-guard validation engine.
//!
//! Everything in this module describes a *misconfigured* validator: an
//! unknown property, an unregistered check name, a malformed severity, a
//! type mismatch at a non-generic entry point. Data that fails a check is
//! never reported through [`GuardError`]; it becomes a
//! [`ValidationFailure`](crate::core::ValidationFailure) inside a
//! [`ValidationResult`](crate::core::ValidationResult).

use thiserror::Error;

/// The main error type for the layer-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A rule set names a property the target type does not expose.
    #[error("Property '{property}' not found on type '{type_name}'")]
    PropertyNotFound {
        /// Name of the target type
        type_name: String,
        /// Property name as written in the rule set
        property: String,
    },

    /// A rule definition names a check that is not in the registry.
    #[error("Unknown validator type '{name}' on property '{property}'")]
    UnknownValidatorType {
        /// Property the rule was declared on
        property: String,
        /// The unregistered validator name
        name: String,
    },

    /// A severity string is not one of the wire spellings.
    #[error("Invalid severity '{value}'")]
    InvalidSeverity {
        /// The rejected string
        value: String,
    },

    /// A check factory received missing or malformed parameters.
    #[error("Invalid parameter for '{validator}': {message}")]
    InvalidParameter {
        /// Name of the check being built
        validator: String,
        /// What was wrong with the parameters
        message: String,
    },

    /// A pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A pattern was rejected before compilation.
    #[error("Security error: {0}")]
    SecurityError(String),

    /// A non-generic entry point received an instance of the wrong type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A required argument was absent or empty.
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for `Result<T, GuardError>`.
///
/// ```rust
/// use layer_guard::error::Result;
///
/// fn compile_rules() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new invalid parameter error.
    pub fn invalid_parameter(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            validator: validator.into(),
            message: message.into(),
        }
    }

    /// Creates a new property-not-found error.
    pub fn property_not_found(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_property_not_found() {
        let err = GuardError::property_not_found("Customer", "Emial");
        assert_eq!(
            err.to_string(),
            "Property 'Emial' not found on type 'Customer'"
        );
    }

    #[test]
    fn test_unknown_validator_type() {
        let err = GuardError::UnknownValidatorType {
            property: "Email".to_string(),
            name: "doesNotExist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown validator type 'doesNotExist' on property 'Email'"
        );
    }

    #[test]
    fn test_type_mismatch() {
        let err = GuardError::type_mismatch("alloc::string::String", "i32");
        assert_eq!(
            err.to_string(),
            "Type mismatch: expected alloc::string::String, found i32"
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("[unclosed").unwrap_err();
        let err = GuardError::InvalidPattern {
            pattern: "[unclosed".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GuardError = json_err.into();
        assert!(matches!(err, GuardError::Serialization(_)));
    }
}
