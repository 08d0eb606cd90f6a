//! Fail-fast behaviour for rules and validators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether evaluation continues after the first failure.
///
/// The same enum is used at two independent levels: a [`Rule`](super::Rule)
/// decides whether its remaining checks run after one fails, and a
/// [`Validator`](super::Validator) decides whether its remaining rules run
/// after a rule has produced failures. A fail-fast validator still reports
/// every failure of the rule that tripped it when that rule uses
/// [`CascadeMode::Continue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CascadeMode {
    /// Evaluate everything
    #[default]
    Continue,
    /// Stop after the first failure
    StopOnFirstFailure,
}

impl CascadeMode {
    /// Returns true if evaluation stops at the first failure.
    pub fn stops_on_failure(&self) -> bool {
        matches!(self, CascadeMode::StopOnFirstFailure)
    }
}

impl fmt::Display for CascadeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CascadeMode::Continue => write!(f, "continue"),
            CascadeMode::StopOnFirstFailure => write!(f, "stopOnFirstFailure"),
        }
    }
}
