//! Validator configuration.

use super::CascadeMode;
use crate::logging::LogConfig;

/// Defaults applied when a validator is built.
///
/// `cascade_mode` is the validator-level setting; `rule_cascade_mode` is the
/// starting cascade of every rule declared on the builder, which individual
/// rules may still override.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::{CascadeMode, ValidatorConfig};
///
/// let config = ValidatorConfig::fail_fast();
/// assert_eq!(config.cascade_mode, CascadeMode::StopOnFirstFailure);
/// assert_eq!(config.rule_cascade_mode, CascadeMode::StopOnFirstFailure);
///
/// let config = ValidatorConfig::default().with_rule_cascade_mode(CascadeMode::StopOnFirstFailure);
/// assert_eq!(config.cascade_mode, CascadeMode::Continue);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Whether rules after a failing rule still run
    pub cascade_mode: CascadeMode,
    /// Initial cascade mode of newly declared rules
    pub rule_cascade_mode: CascadeMode,
    /// Logging behaviour during evaluation
    pub log: LogConfig,
}

impl ValidatorConfig {
    /// Stops at the first failing check and the first failing rule.
    pub fn fail_fast() -> Self {
        Self {
            cascade_mode: CascadeMode::StopOnFirstFailure,
            rule_cascade_mode: CascadeMode::StopOnFirstFailure,
            log: LogConfig::default(),
        }
    }

    /// Default cascading with verbose per-check logging.
    pub fn verbose() -> Self {
        Self {
            log: LogConfig::verbose(),
            ..Self::default()
        }
    }

    /// Sets the validator-level cascade mode.
    pub fn with_cascade_mode(mut self, mode: CascadeMode) -> Self {
        self.cascade_mode = mode;
        self
    }

    /// Sets the initial cascade mode of new rules.
    pub fn with_rule_cascade_mode(mut self, mode: CascadeMode) -> Self {
        self.rule_cascade_mode = mode;
        self
    }

    /// Sets the logging configuration.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}
