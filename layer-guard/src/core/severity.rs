//! Failure severity tiers.

use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How serious a failing check is.
///
/// Severity drives the caller's policy, not the engine's control flow: the
/// engine reports every failure it finds and the caller decides, usually via
/// [`ValidationResult::has_forbidden`](super::ValidationResult::has_forbidden),
/// whether to stop.
///
/// - **Forbidden**: the value must not be accepted
///   - Missing required fields
///   - Malformed identifiers that break downstream systems
///
/// - **AtOwnRisk**: the value may be accepted, but the caller takes
///   responsibility for it
///   - Contact details that cannot be verified
///
/// - **NotRecommended**: the value is acceptable but discouraged
///   - Deprecated formats, soft style guidance
///
/// The discriminants exist for stable serialization only. Severities are
/// compared for equality, never ordered.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::Severity;
///
/// let severity: Severity = "atOwnRisk".parse().unwrap();
/// assert_eq!(severity, Severity::AtOwnRisk);
/// assert_eq!(severity.ordinal(), 1);
/// assert_eq!(Severity::default(), Severity::Forbidden);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// Discouraged but acceptable
    NotRecommended = 0,
    /// Acceptable at the caller's risk
    AtOwnRisk = 1,
    /// Must not be accepted. Unannotated checks get this severity.
    #[default]
    Forbidden = 2,
}

impl Severity {
    /// All severities in ordinal order.
    pub const ALL: [Severity; 3] = [
        Severity::NotRecommended,
        Severity::AtOwnRisk,
        Severity::Forbidden,
    ];

    /// Returns the wire spelling of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::NotRecommended => "notRecommended",
            Severity::AtOwnRisk => "atOwnRisk",
            Severity::Forbidden => "forbidden",
        }
    }

    /// Returns the stable serialization ordinal.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Looks a severity up by its serialization ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.ordinal() == ordinal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GuardError::InvalidSeverity {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::NotRecommended.to_string(), "notRecommended");
        assert_eq!(Severity::AtOwnRisk.to_string(), "atOwnRisk");
        assert_eq!(Severity::Forbidden.to_string(), "forbidden");
    }

    #[test]
    fn test_severity_default_is_forbidden() {
        assert_eq!(Severity::default(), Severity::Forbidden);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("forbidden".parse::<Severity>().unwrap(), Severity::Forbidden);
        assert_eq!("AtOwnRisk".parse::<Severity>().unwrap(), Severity::AtOwnRisk);
        assert_eq!(
            "notrecommended".parse::<Severity>().unwrap(),
            Severity::NotRecommended
        );
    }

    #[test]
    fn test_severity_parse_rejects_unknown() {
        let err = "critical".parse::<Severity>().unwrap_err();
        assert!(matches!(err, GuardError::InvalidSeverity { value } if value == "critical"));
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_ordinals() {
        assert_eq!(Severity::NotRecommended.ordinal(), 0);
        assert_eq!(Severity::AtOwnRisk.ordinal(), 1);
        assert_eq!(Severity::Forbidden.ordinal(), 2);
        assert_eq!(Severity::from_ordinal(1), Some(Severity::AtOwnRisk));
        assert_eq!(Severity::from_ordinal(3), None);
    }

    #[test]
    fn test_severity_serde() {
        let json = serde_json::to_string(&Severity::AtOwnRisk).unwrap();
        assert_eq!(json, "\"atOwnRisk\"");

        let severity: Severity = serde_json::from_str("\"notRecommended\"").unwrap();
        assert_eq!(severity, Severity::NotRecommended);
    }
}
