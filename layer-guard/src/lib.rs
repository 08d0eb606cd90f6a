//! # layer-guard - Declarative validation with severity tiers
//!
//! layer-guard evaluates per-property rules against a value or an object and
//! returns a severity-classified list of failures instead of a plain
//! pass/fail answer. The same check can be `Forbidden` at the API boundary
//! and merely `NotRecommended` deep inside the domain layer; the caller
//! decides what to do with each tier.
//!
//! ## Quick Start
//!
//! ```rust
//! use layer_guard::prelude::*;
//!
//! struct Customer {
//!     email: String,
//!     phone: String,
//! }
//!
//! # fn main() -> layer_guard::error::Result<()> {
//! let validator = Validator::<Customer>::builder()
//!     .rule_for("Email", |c: &Customer| c.email.clone(), |r| {
//!         r.not_empty()
//!             .with_message("Email is required.")
//!             .email_address()
//!     })
//!     .rule_for("Phone", |c: &Customer| c.phone.clone(), |r| {
//!         r.phone()
//!             .with_severity(Severity::AtOwnRisk)
//!             .with_layer_severity("entity", Severity::NotRecommended)
//!     })
//!     .build()?;
//!
//! let customer = Customer { email: "jane@example.com".into(), phone: "12".into() };
//!
//! let api = validator.validate_with(&customer, &ValidationContext::for_layer("api"));
//! assert!(!api.has_forbidden());
//! assert!(api.has_at_own_risk());
//!
//! let entity = validator.validate_with(&customer, &ValidationContext::for_layer("entity"));
//! assert!(entity.has_not_recommended());
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! - **Severity tiers**: `Forbidden`, `AtOwnRisk` and `NotRecommended`, with
//!   per-layer overrides on every check
//! - **Two cascade levels**: rules stop at their first failing check, and
//!   validators stop after their first failing rule, independently
//! - **Conditions**: `when`/`unless` gates on the checks that follow them
//! - **JSON rule sets**: the same rules as a portable document, compiled
//!   against a [`json::ValidatorTypeRegistry`] of named checks
//! - **Property-scoped evaluation**: `validate_property` runs only the rules
//!   of one property
//!
//! ## Architecture
//!
//! - **`core`**: validators, rules, check entries, contexts and results
//! - **`checks`**: the built-in value checks shared by both rule compilers
//! - **`json`**: rule-set documents, the registry and the compiler
//! - **`security`**: validation of caller-supplied patterns
//! - **`logging`**: `tracing` configuration and subscriber setup

pub mod checks;
pub mod core;
pub mod error;
pub mod json;
pub mod logging;
pub mod prelude;
pub mod security;
