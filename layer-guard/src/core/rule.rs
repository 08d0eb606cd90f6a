//! Rules and the fluent rule builder.
//!
//! A [`Rule`] binds an ordered list of [`CheckEntry`] values to one property.
//! Rules are assembled with a [`RuleBuilder`]: every check method appends one
//! entry, and every modifier (`with_message`, `with_severity`, ...) edits the
//! entry appended most recently.
//!
//! ```rust
//! use layer_guard::core::{CascadeMode, RuleBuilder, Severity};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! # fn main() -> layer_guard::error::Result<()> {
//! let rule = RuleBuilder::<Value>::new("Email", Arc::new(|v: &Value| v["email"].clone()))
//!     .not_empty()
//!     .with_message("Email is required.")
//!     .email_address()
//!     .with_severity(Severity::AtOwnRisk)
//!     .with_layer_severity("entity", Severity::NotRecommended)
//!     .build()?;
//!
//! assert_eq!(rule.entries().len(), 2);
//! assert_eq!(rule.cascade_mode(), CascadeMode::Continue);
//!
//! let result = rule.evaluate(&json!({ "email": "" }), &Default::default());
//! assert_eq!(result.errors().len(), 2);
//! # Ok(())
//! # }
//! ```

use super::entry::{CheckEntry, Condition, Predicate, PropertyAccessor};
use super::{CascadeMode, Severity, ValidationContext, ValidationFailure, ValidationResult};
use crate::checks::{self, Check};
use crate::error::{GuardError, Result};
use crate::log_check;
use crate::logging::LogConfig;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The ordered checks bound to one property.
pub struct Rule<T> {
    property_name: String,
    accessor: PropertyAccessor<T>,
    entries: Vec<CheckEntry<T>>,
    cascade: CascadeMode,
}

impl<T: 'static> Rule<T> {
    /// Returns the property name used in failures.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns the compiled entries in registration order.
    pub fn entries(&self) -> &[CheckEntry<T>] {
        &self.entries
    }

    /// Returns the rule-level cascade mode.
    pub fn cascade_mode(&self) -> CascadeMode {
        self.cascade
    }

    /// Returns true if this rule is bound to `property` (case-insensitive).
    pub fn matches_property(&self, property: &str) -> bool {
        self.property_name.eq_ignore_ascii_case(property)
    }

    /// Evaluates the rule on its own against `owner`.
    pub fn evaluate(&self, owner: &T, ctx: &ValidationContext) -> ValidationResult {
        let mut failures = Vec::new();
        self.evaluate_into(owner, ctx, ctx.layer(), &LogConfig::default(), &mut failures);
        ValidationResult::new(failures)
    }

    /// Runs every entry whose gate is open, appending failures to `failures`.
    /// Severities resolve against `layer`. Returns the number of failures
    /// emitted.
    pub(crate) fn evaluate_into(
        &self,
        owner: &T,
        ctx: &ValidationContext,
        layer: Option<&str>,
        log: &LogConfig,
        failures: &mut Vec<ValidationFailure>,
    ) -> usize {
        let value = (self.accessor)(owner);
        let mut emitted = 0;

        for entry in &self.entries {
            if !entry.is_active(owner) {
                log_check!(
                    log,
                    rule.property = %self.property_name,
                    check.name = entry.name(),
                    "Check skipped by condition"
                );
                continue;
            }

            if entry.passes(owner, &value, ctx) {
                continue;
            }

            let failure = entry.failure(&self.property_name, &value, layer);
            log_check!(
                log,
                rule.property = %self.property_name,
                check.name = entry.name(),
                check.severity = %failure.severity,
                check.value = %log.loggable_value(&value),
                "Check failed"
            );
            failures.push(failure);
            emitted += 1;

            if self.cascade.stops_on_failure() {
                log_check!(
                    log,
                    rule.property = %self.property_name,
                    "Rule cascade stopped after first failure"
                );
                break;
            }
        }

        emitted
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("property_name", &self.property_name)
            .field("entries", &self.entries)
            .field("cascade", &self.cascade)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for a [`Rule`].
///
/// The builder tracks the index of the most recently appended entry; all
/// modifiers act on that entry only. A modifier called before any check, an
/// invalid pattern or an inverted range is recorded and reported by
/// [`RuleBuilder::build`].
pub struct RuleBuilder<T> {
    property_name: String,
    accessor: PropertyAccessor<T>,
    entries: Vec<CheckEntry<T>>,
    cascade: Option<CascadeMode>,
    condition: Option<Condition<T>>,
    current_entry: Option<usize>,
    error: Option<GuardError>,
}

impl<T: 'static> RuleBuilder<T> {
    /// Creates a builder for the property read by `accessor`.
    pub fn new(property_name: impl Into<String>, accessor: PropertyAccessor<T>) -> Self {
        let property_name = property_name.into();
        let error = property_name
            .trim()
            .is_empty()
            .then(|| GuardError::MissingArgument("property name".to_string()));
        Self {
            property_name,
            accessor,
            entries: Vec::new(),
            cascade: None,
            condition: None,
            current_entry: None,
            error,
        }
    }

    /// Returns the property name.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns the index of the entry modifiers currently target.
    pub fn current_entry_index(&self) -> Option<usize> {
        self.current_entry
    }

    /// Sets the rule-level cascade mode.
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.cascade = Some(mode);
        self
    }

    /// Gates every check appended from now on behind `condition`.
    ///
    /// Checks appended earlier keep the gate they were appended under.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Gates every check appended from now on behind the negation of
    /// `condition`.
    pub fn unless<F>(self, condition: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.when(move |owner| !condition(owner))
    }

    /// Appends a check.
    pub fn check(self, check: Check) -> Self {
        self.append(CheckEntry::from_check(&check))
    }

    /// Appends a check that may have failed to build.
    pub fn try_check(mut self, check: Result<Check>) -> Self {
        match check {
            Ok(check) => self.check(check),
            Err(err) => {
                self.record(err);
                self
            }
        }
    }

    fn append(mut self, mut entry: CheckEntry<T>) -> Self {
        entry.set_condition(self.condition.clone());
        self.entries.push(entry);
        self.current_entry = Some(self.entries.len() - 1);
        self
    }

    fn record(&mut self, err: GuardError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn modify<F>(mut self, modifier: &str, apply: F) -> Self
    where
        F: FnOnce(&mut CheckEntry<T>),
    {
        match self.current_entry {
            Some(index) => apply(&mut self.entries[index]),
            None => {
                let err = GuardError::Configuration(format!(
                    "{modifier} called on rule '{}' before any check was added",
                    self.property_name
                ));
                self.record(err);
            }
        }
        self
    }

    /// Value must not be `null`.
    pub fn not_null(self) -> Self {
        self.check(checks::not_null())
    }

    /// Value must be `null`.
    pub fn null(self) -> Self {
        self.check(checks::null())
    }

    /// Value must not be empty.
    pub fn not_empty(self) -> Self {
        self.check(checks::not_empty())
    }

    /// Value must be empty.
    pub fn empty(self) -> Self {
        self.check(checks::empty())
    }

    /// At most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        self.check(checks::max_length(max))
    }

    /// At least `min` characters.
    pub fn min_length(self, min: usize) -> Self {
        self.check(checks::min_length(min))
    }

    /// Between `min` and `max` characters.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.try_check(checks::length(min, max))
    }

    /// Value must be an email address.
    pub fn email_address(self) -> Self {
        self.check(checks::email())
    }

    /// Value must be a phone number.
    pub fn phone(self) -> Self {
        self.check(checks::phone())
    }

    /// Value must match `pattern`.
    pub fn matches(self, pattern: &str) -> Self {
        self.try_check(checks::matches(pattern))
    }

    /// Value must equal `expected` (compared as strings).
    pub fn equal(self, expected: impl Into<Value>) -> Self {
        self.check(checks::equal(expected))
    }

    /// Value must differ from `unexpected` (compared as strings).
    pub fn not_equal(self, unexpected: impl Into<Value>) -> Self {
        self.check(checks::not_equal(unexpected))
    }

    /// Value must be greater than `operand`.
    pub fn greater_than(self, operand: impl Into<Value>) -> Self {
        self.check(checks::greater_than(operand))
    }

    /// Value must be greater than or equal to `operand`.
    pub fn greater_than_or_equal(self, operand: impl Into<Value>) -> Self {
        self.check(checks::greater_than_or_equal(operand))
    }

    /// Value must be less than `operand`.
    pub fn less_than(self, operand: impl Into<Value>) -> Self {
        self.check(checks::less_than(operand))
    }

    /// Value must be less than or equal to `operand`.
    pub fn less_than_or_equal(self, operand: impl Into<Value>) -> Self {
        self.check(checks::less_than_or_equal(operand))
    }

    /// Value must lie within `from..=to`.
    pub fn inclusive_between(self, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.try_check(checks::inclusive_between(from, to))
    }

    /// Value must satisfy `predicate`.
    pub fn must<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.must_with_context(move |_, value, _| predicate(value))
    }

    /// Value must satisfy `predicate`, which also sees the owner.
    pub fn must_with<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &Value) -> bool + Send + Sync + 'static,
    {
        self.must_with_context(move |owner, value, _| predicate(owner, value))
    }

    /// Value must satisfy `predicate`, which sees the owner and the active
    /// context.
    pub fn must_with_context<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &Value, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate<T> = Arc::new(predicate);
        self.append(CheckEntry::new(
            "must",
            "The specified condition was not met for '{PropertyName}'.",
            predicate,
        ))
    }

    /// Replaces the message of the most recent check.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.modify("with_message", |entry| entry.set_message(message))
    }

    /// Sets the error code of the most recent check.
    pub fn with_error_code(self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.modify("with_error_code", |entry| entry.set_error_code(code))
    }

    /// Sets the default severity of the most recent check.
    pub fn with_severity(self, severity: Severity) -> Self {
        self.modify("with_severity", |entry| entry.set_severity(severity))
    }

    /// Overrides the severity of the most recent check for one layer.
    pub fn with_layer_severity(mut self, layer: impl Into<String>, severity: Severity) -> Self {
        let layer = layer.into();
        if layer.trim().is_empty() {
            self.record(GuardError::MissingArgument("layer name".to_string()));
            return self;
        }
        self.modify("with_layer_severity", |entry| {
            entry.set_layer_severity(layer, severity)
        })
    }

    /// Builds the rule with [`CascadeMode::Continue`] unless a cascade mode
    /// was set.
    pub fn build(self) -> Result<Rule<T>> {
        self.finish(CascadeMode::default())
    }

    /// Builds the rule, using `default_cascade` unless a cascade mode was
    /// set on this builder.
    pub(crate) fn finish(self, default_cascade: CascadeMode) -> Result<Rule<T>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Rule {
            property_name: self.property_name,
            accessor: self.accessor,
            entries: self.entries,
            cascade: self.cascade.unwrap_or(default_cascade),
        })
    }
}

impl<T> fmt::Debug for RuleBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBuilder")
            .field("property_name", &self.property_name)
            .field("entries", &self.entries)
            .field("current_entry", &self.current_entry)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
