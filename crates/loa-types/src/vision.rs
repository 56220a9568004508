//! Wire types exchanged with the external vision-verification service

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_confidence() -> f64 {
    1.0
}

/// One problem reported by the vision service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionIssue {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_numbers: Vec<u32>,
}

impl VisionIssue {
    pub fn new(description: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            kind: None,
            description: description.into(),
            evidence: evidence.into(),
            page_numbers: Vec::new(),
        }
    }
}

/// Raw reply from a vision delegate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionResponse {
    pub success: bool,
    #[serde(default = "default_true")]
    pub is_valid: bool,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub issues: Vec<VisionIssue>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl VisionResponse {
    pub fn verdict(is_valid: bool, confidence: f64, issues: Vec<VisionIssue>) -> Self {
        Self {
            success: true,
            is_valid,
            confidence,
            issues,
            reasoning: String::new(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            is_valid: true,
            confidence: 0.5,
            issues: Vec::new(),
            reasoning: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Layer-2 judgment retained on the report when the delegate succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionJudgment {
    pub is_valid: bool,
    pub confidence: f64,
    pub issues: Vec<VisionIssue>,
    pub reasoning: String,
}

impl VisionJudgment {
    /// Returns `None` for unsuccessful responses
    pub fn from_response(response: VisionResponse) -> Option<Self> {
        if !response.success {
            return None;
        }
        Some(Self {
            is_valid: response.is_valid,
            confidence: response.confidence,
            issues: response.issues,
            reasoning: response.reasoning,
        })
    }
}
