use crate::issue::{IntegrityIssue, Severity};
use crate::vision::VisionJudgment;
use serde::{Deserialize, Serialize};

/// Maximum number of evidence characters carried into a report
pub const EVIDENCE_LIMIT: usize = 200;

/// Serialized form of an [`IntegrityIssue`] with evidence truncated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub evidence: String,
    pub page_number: Option<u32>,
}

impl From<&IntegrityIssue> for IssueRecord {
    fn from(issue: &IntegrityIssue) -> Self {
        Self {
            severity: issue.severity,
            category: issue.category.clone(),
            description: issue.description.clone(),
            evidence: issue.evidence.chars().take(EVIDENCE_LIMIT).collect(),
            page_number: issue.page_number,
        }
    }
}

/// Outcome of one integrity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub is_valid: bool,
    pub confidence: f64,
    pub issues: Vec<IssueRecord>,
    pub summary: String,
    pub critical_count: usize,
    pub warning_count: usize,
    pub gpt4o_verified: bool,
    pub gpt4o_verification_details: Option<VisionJudgment>,
}

impl IntegrityReport {
    pub fn issues_in(&self, category: &str) -> impl Iterator<Item = &IssueRecord> {
        let category = category.to_string();
        self.issues.iter().filter(move |i| i.category == category)
    }
}
