//! Prelude for commonly used types and traits in layer-guard.

pub use crate::core::{
    CascadeMode, ErasedValidator, InstanceValidator, Severity, TypeLayers, ValidationContext,
    ValidationFailure, ValidationResult, Validator, ValidatorConfig, ValueValidator,
};
pub use crate::error::{GuardError, Result};
pub use crate::json::{Property, Reflect, RuleSetCompiler, RuleSetDocument, ValidatorTypeRegistry};
pub use crate::logging::LogConfig;
