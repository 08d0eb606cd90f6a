//! Core validation types for layer-guard.
//!
//! ## Overview
//!
//! - **[`Validator`]**: the ordered rules for one type, with a validator-level
//!   cascade mode and an optional default layer
//! - **[`Rule`]**: the ordered checks bound to one property, built with a
//!   [`RuleBuilder`]
//! - **[`CheckEntry`]**: one compiled check with its message, error code,
//!   default [`Severity`] and per-layer overrides
//! - **[`ValidationResult`]**: the ordered [`ValidationFailure`] list of one
//!   evaluation
//!
//! ## Architecture
//!
//! ```text
//! Validator (cascade, layer)
//!     ├── Rule "Email" (cascade)
//!     │   ├── CheckEntry notEmpty   (Forbidden)
//!     │   └── CheckEntry email      (AtOwnRisk, entity => NotRecommended)
//!     └── Rule "Phone" (cascade)
//!         └── CheckEntry phone      (Forbidden)
//! ```
//!
//! ## Severity resolution
//!
//! A failing entry reports the severity mapped to the active layer if it has
//! one, and its default severity otherwise. The active layer is the one
//! named by the [`ValidationContext`], or the validator's own layer when the
//! context names none.
//!
//! ## Example
//!
//! ```rust
//! use layer_guard::core::{CascadeMode, Severity, ValidationContext, Validator};
//!
//! struct SignUp {
//!     email: String,
//!     age: u32,
//! }
//!
//! # fn main() -> layer_guard::error::Result<()> {
//! let validator = Validator::<SignUp>::builder()
//!     .cascade(CascadeMode::StopOnFirstFailure)
//!     .rule_for("Email", |s: &SignUp| s.email.clone(), |r| r.not_empty().email_address())
//!     .rule_for("Age", |s: &SignUp| s.age, |r| {
//!         r.greater_than_or_equal(18).with_severity(Severity::AtOwnRisk)
//!     })
//!     .build()?;
//!
//! let result = validator.validate_with(
//!     &SignUp { email: "a@b.io".into(), age: 16 },
//!     &ValidationContext::for_layer("api"),
//! );
//! assert!(!result.has_forbidden());
//! assert!(result.has_at_own_risk());
//! # Ok(())
//! # }
//! ```

mod cascade;
mod config;
mod context;
mod entry;
mod layers;
mod result;
mod rule;
mod severity;
mod validator;
mod value;

pub use cascade::CascadeMode;
pub use config::ValidatorConfig;
pub use context::ValidationContext;
pub use entry::{render_message, CheckEntry, Condition, Predicate, PropertyAccessor};
pub use layers::TypeLayers;
pub use result::{ValidationFailure, ValidationResult};
pub use rule::{Rule, RuleBuilder};
pub use severity::Severity;
pub use validator::{ErasedValidator, InstanceValidator, Validator, ValidatorBuilder};
pub use value::{ValueValidator, ValueValidatorBuilder, DEFAULT_VALUE_NAME};
