//! JSON rule sets.
//!
//! A [`RuleSetDocument`] declares rules per property by validator name. The
//! [`RuleSetCompiler`] binds each property by name through [`Reflect`],
//! resolves each validator name through a [`ValidatorTypeRegistry`] and
//! produces an ordinary [`Validator`](crate::core::Validator).
//!
//! ## Built-in validator names
//!
//! | Name | Params |
//! |---|---|
//! | `notNull`, `null`, `notEmpty`, `empty` | none |
//! | `maxLength` / `maximumLength` | `max` |
//! | `minLength` / `minimumLength` | `min` |
//! | `length` | `min`, `max` |
//! | `email` / `emailAddress`, `phone` | none |
//! | `matches` / `pattern` / `regex` | `pattern` |
//! | `equal`, `notEqual` | `value` |
//! | `greaterThan`, `greaterThanOrEqual`, `lessThan`, `lessThanOrEqual` | `value` |
//! | `inclusiveBetween` | `from`, `to` |

mod compiler;
mod document;
mod reflect;
mod registry;

pub use compiler::{compile, RuleSetCompiler};
pub use document::{PropertyRuleSet, PropertyRules, RuleDefinition, RuleSetDocument};
pub use reflect::{Property, Reflect};
pub use registry::{string_param, usize_param, value_param, CheckFactory, ValidatorTypeRegistry};
