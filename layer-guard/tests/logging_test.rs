//! Logging setup and verbose evaluation.

use layer_guard::logging::setup::{init_logging, LoggingConfig};
use layer_guard::prelude::*;
use tracing::Level;

struct Order {
    reference: String,
}

#[test]
fn test_init_logging_and_verbose_evaluation() {
    let config = LoggingConfig::development()
        .with_guard_level(Level::TRACE)
        .with_json_format(true);
    assert_eq!(config.env_filter(), "debug,layer_guard=trace");

    init_logging(config).expect("first subscriber installs");
    assert!(
        init_logging(LoggingConfig::default()).is_err(),
        "a second global subscriber must be rejected"
    );

    let validator = Validator::<Order>::builder()
        .config(ValidatorConfig::verbose())
        .rule_for("Reference", |o: &Order| o.reference.clone(), |r| {
            r.not_empty()
                .when(|o: &Order| o.reference.starts_with('#'))
                .matches(r"^#\d+$")
        })
        .build()
        .unwrap();

    let result = validator.validate(&Order {
        reference: "#12a".to_string(),
    });
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.to_string(), "'Reference' is not in the correct format.");
}
