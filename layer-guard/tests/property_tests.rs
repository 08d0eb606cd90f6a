//! Property-based tests for rule evaluation.
//!
//! ## Test Categories
//!
//! ### 1. Rule cascade
//! - `Continue` emits one failure per active, failing entry
//! - `StopOnFirstFailure` emits at most one failure: the first active, failing
//!   entry in registration order
//!
//! ### 2. Severity resolution
//! - A matching layer override always wins; every other layer, and no layer,
//!   falls back to the default severity
//!
//! ### 3. Result aggregation
//! - `combine` and `merge` are order-preserving concatenation
//!
//! ## Test Data Generation
//!
//! Rules are generated as lists of [`EntryCase`]: whether the entry's gate is
//! open and whether its predicate passes. The owner carries nothing; the
//! outcome of every entry is fixed by its case.

use layer_guard::core::{RuleBuilder, Rule};
use layer_guard::prelude::*;
use proptest::prelude::*;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct EntryCase {
    active: bool,
    passes: bool,
}

fn entry_case() -> impl Strategy<Value = EntryCase> {
    (any::<bool>(), any::<bool>()).prop_map(|(active, passes)| EntryCase { active, passes })
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::NotRecommended),
        Just(Severity::AtOwnRisk),
        Just(Severity::Forbidden),
    ]
}

fn layer_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn build_rule(cases: &[EntryCase], cascade: CascadeMode) -> Rule<()> {
    let mut builder = RuleBuilder::<()>::new("Field", Arc::new(|_: &()| Value::Null)).cascade(cascade);
    for (index, case) in cases.iter().copied().enumerate() {
        builder = builder
            .when(move |_: &()| case.active)
            .must(move |_| case.passes)
            .with_message(format!("entry {index}"));
    }
    builder.build().unwrap()
}

fn failure(property: &str, message: &str, severity: Severity) -> ValidationFailure {
    ValidationFailure::new(property, message, severity, Value::Null)
}

fn result_strategy() -> impl Strategy<Value = ValidationResult> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", "[a-z ]{0,12}", severity()), 0..6).prop_map(
        |items| {
            ValidationResult::new(
                items
                    .iter()
                    .map(|(property, message, severity)| failure(property, message, *severity))
                    .collect(),
            )
        },
    )
}

proptest! {
    #[test]
    fn continue_reports_every_active_failure(cases in prop::collection::vec(entry_case(), 0..12)) {
        let rule = build_rule(&cases, CascadeMode::Continue);
        let result = rule.evaluate(&(), &ValidationContext::new());

        let expected: Vec<String> = cases
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active && !s.passes)
            .map(|(i, _)| format!("entry {i}"))
            .collect();
        let actual: Vec<String> = result.errors().iter().map(|f| f.error_message.clone()).collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn stop_on_first_failure_reports_first_active_failure(cases in prop::collection::vec(entry_case(), 0..12)) {
        let rule = build_rule(&cases, CascadeMode::StopOnFirstFailure);
        let result = rule.evaluate(&(), &ValidationContext::new());

        let expected = cases
            .iter()
            .position(|s| s.active && !s.passes)
            .map(|i| format!("entry {i}"));

        prop_assert!(result.errors().len() <= 1);
        prop_assert_eq!(result.errors().first().map(|f| f.error_message.clone()), expected);
    }

    #[test]
    fn layer_override_resolution(
        default in severity(),
        mapped in severity(),
        layer in layer_name(),
        other in layer_name(),
    ) {
        let rule = RuleBuilder::<()>::new("Field", Arc::new(|_: &()| Value::Null))
            .must(|_| false)
            .with_severity(default)
            .with_layer_severity(layer.clone(), mapped)
            .build()
            .unwrap();

        let matched = rule.evaluate(&(), &ValidationContext::for_layer(layer.as_str()));
        prop_assert_eq!(matched.errors()[0].severity, mapped);

        let unlayered = rule.evaluate(&(), &ValidationContext::new());
        prop_assert_eq!(unlayered.errors()[0].severity, default);

        if other != layer {
            let elsewhere = rule.evaluate(&(), &ValidationContext::for_layer(other.as_str()));
            prop_assert_eq!(elsewhere.errors()[0].severity, default);
        }
    }

    #[test]
    fn combine_is_concatenation(a in result_strategy(), b in result_strategy()) {
        let combined = ValidationResult::combine([a.clone(), b.clone()]);

        let mut expected = a.errors().to_vec();
        expected.extend_from_slice(b.errors());
        prop_assert_eq!(combined.errors(), expected.as_slice());
        prop_assert_eq!(a.merge(&b), combined);
    }

    #[test]
    fn severity_queries_match_by_severity(result in result_strategy()) {
        for severity in Severity::ALL {
            prop_assert_eq!(result.has_severity(severity), !result.by_severity(severity).is_empty());
        }
        prop_assert_eq!(result.has_forbidden(), result.has_severity(Severity::Forbidden));
        prop_assert_eq!(result.is_valid(), result.errors().is_empty());
    }

    #[test]
    fn severity_parses_any_case(severity in severity(), upper in any::<bool>()) {
        let text = if upper {
            severity.as_str().to_uppercase()
        } else {
            severity.as_str().to_string()
        };
        prop_assert_eq!(text.parse::<Severity>().unwrap(), severity);
    }
}

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_empty_rule_is_valid() {
        let rule = build_rule(&[], CascadeMode::StopOnFirstFailure);
        assert!(rule.evaluate(&(), &ValidationContext::new()).is_valid());
    }

    #[test]
    fn test_combine_nothing() {
        assert!(ValidationResult::combine(Vec::new()).is_valid());
    }
}
