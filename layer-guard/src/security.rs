//! Hardening for caller-supplied patterns.
//!
//! Patterns reach the engine from fluent `matches` calls and from JSON rule
//! sets, so they are treated as untrusted input. The `regex` engine matches
//! in time linear in the input, which bounds matching time; the checks here
//! bound compilation cost and reject obviously hostile patterns early.

use crate::error::{GuardError, Result};
use regex::{Regex, RegexBuilder};

/// Longest pattern accepted, in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1000;

/// Upper bound on the compiled program size.
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// Pattern validation and compilation.
pub struct PatternSecurity;

impl PatternSecurity {
    /// Validates and compiles a pattern.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layer_guard::security::PatternSecurity;
    ///
    /// let regex = PatternSecurity::compile(r"^[A-Z]{2}\d{4}$").unwrap();
    /// assert!(regex.is_match("AB1234"));
    /// assert!(PatternSecurity::compile("[unclosed").is_err());
    /// ```
    pub fn compile(pattern: &str) -> Result<Regex> {
        Self::validate_pattern(pattern)?;

        RegexBuilder::new(pattern)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build()
            .map_err(|source| GuardError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Rejects patterns that are too long, contain NUL bytes or carry a
    /// classic catastrophic-backtracking shape.
    pub fn validate_pattern(pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            return Err(GuardError::MissingArgument("pattern".to_string()));
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(GuardError::SecurityError(format!(
                "Regex pattern too long (max {MAX_PATTERN_LENGTH} characters)"
            )));
        }

        if pattern.contains('\0') {
            return Err(GuardError::SecurityError(
                "Regex pattern cannot contain null bytes".to_string(),
            ));
        }

        Self::check_redos_patterns(pattern)
    }

    fn check_redos_patterns(pattern: &str) -> Result<()> {
        // Only the unmistakable shapes; the engine itself cannot backtrack.
        let dangerous_patterns = &["(.*)*", "(.*)+", "(.+)+", "(a+)+", "(a*)*"];

        for dangerous in dangerous_patterns {
            if pattern.contains(dangerous) {
                return Err(GuardError::SecurityError(format!(
                    "Regex pattern contains nested quantifier '{dangerous}'"
                )));
            }
        }

        Ok(())
    }
}
