use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category tags raised by the integrity detectors
pub mod categories {
    pub const INTERLEAVED_TEXT_CORRUPTION: &str = "INTERLEAVED_TEXT_CORRUPTION";
    pub const TEXT_FRAGMENTATION: &str = "TEXT_FRAGMENTATION";
    pub const NON_CONTIGUOUS_FLOW: &str = "NON_CONTIGUOUS_FLOW";
    pub const MISSING_SECTIONS: &str = "MISSING_SECTIONS";
    pub const REPEATED_CONTENT: &str = "REPEATED_CONTENT";
    pub const CHARACTER_CORRUPTION: &str = "CHARACTER_CORRUPTION";
    pub const PAGE_ORDER_ISSUE: &str = "PAGE_ORDER_ISSUE";
    pub const LOW_OCR_QUALITY: &str = "LOW_OCR_QUALITY";
    pub const GPT4O_VISUAL_DETECTION: &str = "GPT4O_VISUAL_DETECTION";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeverityError {
    #[error("Invalid severity: {0}. Must be one of CRITICAL, WARNING, INFO")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Confidence penalty applied per issue of this severity
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::Critical => 0.15,
            Severity::Warning => 0.05,
            Severity::Info => 0.01,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRITICAL" => Ok(Severity::Critical),
            "WARNING" => Ok(Severity::Warning),
            "INFO" => Ok(Severity::Info),
            other => Err(SeverityError::Invalid(other.to_string())),
        }
    }
}

/// A single detected integrity problem.
///
/// Evidence is stored in full; it is only truncated when the issue is
/// rendered into an [`IssueRecord`](crate::IssueRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub evidence: String,
    pub page_number: Option<u32>,
}

impl IntegrityIssue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        description: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            description: description.into(),
            evidence: evidence.into(),
            page_number: None,
        }
    }

    pub fn critical(
        category: impl Into<String>,
        description: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Critical, category, description, evidence)
    }

    pub fn warning(
        category: impl Into<String>,
        description: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, category, description, evidence)
    }

    /// Build an issue from an untyped severity label, rejecting unknown labels
    pub fn parse(
        severity: &str,
        category: impl Into<String>,
        description: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Result<Self, SeverityError> {
        let severity = severity.parse()?;
        Ok(Self::new(severity, category, description, evidence))
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parses_known_labels() {
        assert_eq!("CRITICAL".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!("WARNING".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("INFO".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn test_severity_rejects_unknown_labels() {
        assert!("critical".parse::<Severity>().is_err());
        assert!("FATAL".parse::<Severity>().is_err());
        assert!(IntegrityIssue::parse("ERROR", "X", "d", "e").is_err());
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
    }

    #[test]
    fn test_issue_keeps_full_evidence() {
        let evidence = "x".repeat(500);
        let issue = IntegrityIssue::critical(categories::MISSING_SECTIONS, "d", evidence.clone());
        assert_eq!(issue.evidence, evidence);
        assert!(issue.is_critical());
        assert_eq!(issue.page_number, None);
    }
}
