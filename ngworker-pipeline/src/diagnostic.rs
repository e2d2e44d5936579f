//! Diagnostic types for bundler output.

use std::fmt;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A compile error inside a bundle. Printed, never fatal to the run.
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message reported by the bundler for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Bundle that produced the message (`main`, `app-worker`), when known.
    pub target: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(target: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            target,
            message: message.into(),
        }
    }

    pub fn warning(target: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            target,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} [{}]: {}", self.severity, target, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(Some("main".to_string()), "Module not found");
        assert_eq!(diag.to_string(), "error [main]: Module not found");

        let diag = Diagnostic::warning(None, "big bundle");
        assert_eq!(diag.to_string(), "warning: big bundle");
    }
}
