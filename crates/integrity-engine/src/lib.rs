//! Document integrity checking for scanned Letters of Authorization
//!
//! Two layers:
//! - Layer 1: fast text heuristics over the extracted text (always runs)
//! - Layer 2: an optional vision delegate that can override the Layer-1
//!   verdict when it judges the source document invalid

pub mod config;
pub mod detectors;
pub mod error;
pub mod initials;
pub mod jurisdiction;
pub mod patterns;
pub mod retry;
pub mod scoring;
pub mod selection;
pub mod vision;

pub use config::CheckerConfig;
pub use error::{IntegrityError, VisionError};
pub use initials::{EnhancedInitialDetector, InitialDetection};
pub use jurisdiction::{Jurisdiction, Region};
pub use retry::{RetryPolicy, RetryingVerifier};
pub use selection::{EnhancedSelectionValidator, SelectionValidation};
pub use vision::{parse_vision_reply, VisionVerifier};

use loa_types::{
    categories, IntegrityIssue, IntegrityReport, IssueRecord, OcrResult, Severity, VisionJudgment,
};
use tracing::{error, info, warn};

/// DocumentIntegrityChecker entry point
pub struct DocumentIntegrityChecker {
    min_confidence: f64,
    vision: Option<Box<dyn VisionVerifier>>,
}

impl DocumentIntegrityChecker {
    pub fn new(min_confidence: f64) -> Result<Self, IntegrityError> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(IntegrityError::InvalidMinConfidence(min_confidence));
        }
        Ok(Self {
            min_confidence,
            vision: None,
        })
    }

    pub fn from_config(
        config: &CheckerConfig,
        vision: Option<Box<dyn VisionVerifier>>,
    ) -> Result<Self, IntegrityError> {
        config.validate()?;
        let mut checker = Self::new(config.min_confidence)?;
        checker.vision = vision;
        Ok(checker)
    }

    /// Attach a Layer-2 vision delegate
    pub fn with_vision(mut self, vision: impl VisionVerifier + 'static) -> Self {
        self.vision = Some(Box::new(vision));
        self
    }

    /// Advisory threshold; the checker itself never gates on it
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }

    pub fn check_document_integrity(
        &self,
        extracted_text: &str,
        ocr_result: Option<&OcrResult>,
        document_path: Option<&str>,
    ) -> Result<IntegrityReport, IntegrityError> {
        if extracted_text.trim().is_empty() {
            return Err(IntegrityError::EmptyText);
        }

        info!("Starting document integrity check (Layer 1: text heuristics)");
        let mut issues = detectors::run_layer_one(extracted_text, ocr_result);

        let warning_count = count_severity(&issues, Severity::Warning);
        let mut is_valid = count_severity(&issues, Severity::Critical) == 0;
        let mut confidence = scoring::confidence_score(&issues);

        let judgment = match (&self.vision, document_path) {
            (Some(vision), Some(path)) => {
                info!(
                    "Layer 1 complete (confidence={:.2}, warnings={}), running Layer 2 via {}",
                    confidence,
                    warning_count,
                    vision.name()
                );
                verify_with_vision(&**vision, path)
            }
            _ => None,
        };

        if let Some(judgment) = judgment.as_ref().filter(|j| !j.is_valid) {
            warn!("Vision verification detected issues that text heuristics missed");
            is_valid = false;
            confidence = scoring::round2(confidence.min(judgment.confidence.clamp(0.0, 1.0)));
            issues.extend(vision_issues(judgment));
        }

        let critical: Vec<&IntegrityIssue> = issues.iter().filter(|i| i.is_critical()).collect();
        let warnings: Vec<&IntegrityIssue> = issues.iter().filter(|i| i.is_warning()).collect();

        let report = IntegrityReport {
            is_valid,
            confidence,
            issues: issues.iter().map(IssueRecord::from).collect(),
            summary: scoring::generate_summary(&critical, &warnings),
            critical_count: critical.len(),
            warning_count: warnings.len(),
            gpt4o_verified: judgment.is_some(),
            gpt4o_verification_details: judgment,
        };

        info!(
            "Integrity check complete: valid={}, confidence={:.2}, {} critical, {} warnings, vision verified={}",
            report.is_valid,
            report.confidence,
            report.critical_count,
            report.warning_count,
            report.gpt4o_verified
        );

        Ok(report)
    }
}

impl Default for DocumentIntegrityChecker {
    fn default() -> Self {
        Self {
            min_confidence: config::DEFAULT_MIN_CONFIDENCE,
            vision: None,
        }
    }
}

fn count_severity(issues: &[IntegrityIssue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

/// Single delegate round-trip; every failure collapses to `None`
fn verify_with_vision(vision: &dyn VisionVerifier, path: &str) -> Option<VisionJudgment> {
    match vision.verify_document_integrity(path) {
        Ok(response) if response.success => VisionJudgment::from_response(response),
        Ok(response) => {
            warn!(
                "Vision verification failed: {}",
                response.error.as_deref().unwrap_or("unknown error")
            );
            None
        }
        Err(err) => {
            error!("Vision verification error: {}", err);
            None
        }
    }
}

/// One CRITICAL issue per delegate finding, or one carrying the reasoning
/// when the delegate gave none
fn vision_issues(judgment: &VisionJudgment) -> Vec<IntegrityIssue> {
    if judgment.issues.is_empty() {
        return vec![IntegrityIssue::critical(
            categories::GPT4O_VISUAL_DETECTION,
            "Vision verification judged the document invalid",
            judgment.reasoning.clone(),
        )];
    }

    judgment
        .issues
        .iter()
        .map(|issue| {
            IntegrityIssue::critical(
                categories::GPT4O_VISUAL_DETECTION,
                issue.description.clone(),
                issue.evidence.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loa_types::{OcrPage, VisionIssue, VisionResponse};
    use pretty_assertions::assert_eq;

    const CLEAN_LOA: &str = "LETTER OF AUTHORIZATION\n\
        Customer Name: Jane Doe\n\
        Account Number: 1234567890\n\
        I authorize the release of my historical usage information.\n";

    struct FixedVision(VisionResponse);

    impl VisionVerifier for FixedVision {
        fn verify_document_integrity(&self, _: &str) -> Result<VisionResponse, VisionError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenVision;

    impl VisionVerifier for BrokenVision {
        fn verify_document_integrity(&self, _: &str) -> Result<VisionResponse, VisionError> {
            Err(VisionError::Transport("connection reset".into()))
        }
    }

    #[test]
    fn test_clean_document_passes() {
        let checker = DocumentIntegrityChecker::default();
        let report = checker.check_document_integrity(CLEAN_LOA, None, None).unwrap();

        assert!(report.is_valid);
        assert_eq!(report.confidence, 1.0);
        assert!(report.issues.is_empty());
        assert_eq!(report.summary, "Document integrity verified - no issues detected");
        assert!(!report.gpt4o_verified);
        assert_eq!(report.gpt4o_verification_details, None);
    }

    #[test]
    fn test_rejects_blank_text() {
        let checker = DocumentIntegrityChecker::default();
        assert_eq!(
            checker.check_document_integrity("   \n\t", None, None),
            Err(IntegrityError::EmptyText)
        );
        assert_eq!(
            checker.check_document_integrity("", None, None),
            Err(IntegrityError::EmptyText)
        );
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        assert!(DocumentIntegrityChecker::new(1.01).is_err());
        assert!(DocumentIntegrityChecker::new(-0.1).is_err());
        assert!(DocumentIntegrityChecker::new(f64::NAN).is_err());
        assert_eq!(DocumentIntegrityChecker::new(0.0).unwrap().min_confidence(), 0.0);
    }

    #[test]
    fn test_missing_sections_scenario() {
        let checker = DocumentIntegrityChecker::default();
        let report = checker
            .check_document_integrity("Lorem ipsum dolor sit amet.", None, None)
            .unwrap();

        assert!(!report.is_valid);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.issues[0].category, categories::MISSING_SECTIONS);
        assert!(report.confidence <= 0.85);
        assert!(report.summary.starts_with("DOCUMENT INTEGRITY COMPROMISED: 1 critical issue(s) (MISSING_SECTIONS)"));
    }

    #[test]
    fn test_page_order_scenario() {
        let ocr = OcrResult::from_pages(
            [1, 2, 2, 4].iter().map(|n| OcrPage::numbered(*n)).collect(),
        );
        let report = DocumentIntegrityChecker::default()
            .check_document_integrity(CLEAN_LOA, Some(&ocr), None)
            .unwrap();

        let page_issues: Vec<_> = report.issues_in(categories::PAGE_ORDER_ISSUE).collect();
        assert_eq!(page_issues.len(), 2);
        assert_eq!(page_issues[0].severity, Severity::Critical);
        assert_eq!(page_issues[1].severity, Severity::Warning);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.confidence, 0.8);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_vision_override() {
        let response = VisionResponse::verdict(false, 0.2, vec![VisionIssue::new("d", "e")]);
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();

        assert!(!report.is_valid);
        assert!(report.gpt4o_verified);
        assert_eq!(report.confidence, 0.2);
        assert_eq!(report.critical_count, 1);
        let last = report.issues.last().unwrap();
        assert_eq!(last.category, categories::GPT4O_VISUAL_DETECTION);
        assert_eq!(last.description, "d");
        assert_eq!(last.evidence, "e");
        assert!(report.gpt4o_verification_details.is_some());
    }

    #[test]
    fn test_vision_cannot_raise_confidence() {
        let response = VisionResponse::verdict(false, 0.95, vec![VisionIssue::new("d", "e")]);
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker
            .check_document_integrity("Lorem ipsum dolor sit amet.", None, Some("loa.pdf"))
            .unwrap();

        assert_eq!(report.confidence, 0.85);
        assert_eq!(report.critical_count, 2);
    }

    #[test]
    fn test_vision_agreeing_leaves_layer_one_result() {
        let response = VisionResponse::verdict(true, 0.99, vec![]);
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();

        assert!(report.is_valid);
        assert!(report.gpt4o_verified);
        assert_eq!(report.confidence, 1.0);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_invalid_verdict_without_findings_keeps_counts_consistent() {
        let mut response = VisionResponse::verdict(false, 0.4, vec![]);
        response.reasoning = "pages from two customers".into();
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();

        assert!(!report.is_valid);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.issues[0].evidence, "pages from two customers");
    }

    #[test]
    fn test_vision_failure_is_swallowed() {
        let checker = DocumentIntegrityChecker::default().with_vision(BrokenVision);
        let with_vision = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();
        let without = DocumentIntegrityChecker::default()
            .check_document_integrity(CLEAN_LOA, None, None)
            .unwrap();

        assert!(!with_vision.gpt4o_verified);
        assert_eq!(with_vision.gpt4o_verification_details, None);
        assert_eq!(with_vision, without);
    }

    #[test]
    fn test_unsuccessful_vision_response_is_ignored() {
        let checker = DocumentIntegrityChecker::default()
            .with_vision(FixedVision(VisionResponse::failure("Failed to extract image from PDF")));
        let report = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();
        assert!(!report.gpt4o_verified);
        assert!(report.is_valid);
    }

    #[test]
    fn test_vision_needs_a_document_path() {
        let response = VisionResponse::verdict(false, 0.1, vec![VisionIssue::new("d", "e")]);
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker.check_document_integrity(CLEAN_LOA, None, None).unwrap();
        assert!(report.is_valid);
        assert!(!report.gpt4o_verified);
    }

    #[test]
    fn test_evidence_truncated_in_report() {
        let long = "x".repeat(400);
        let response = VisionResponse::verdict(false, 0.5, vec![VisionIssue::new("d", long)]);
        let checker = DocumentIntegrityChecker::default().with_vision(FixedVision(response));
        let report = checker
            .check_document_integrity(CLEAN_LOA, None, Some("loa.pdf"))
            .unwrap();
        assert_eq!(report.issues[0].evidence.len(), loa_types::EVIDENCE_LIMIT);
    }

    #[test]
    fn test_from_config() {
        let config = CheckerConfig::default().with_min_confidence(0.5);
        let checker = DocumentIntegrityChecker::from_config(&config, None).unwrap();
        assert_eq!(checker.min_confidence(), 0.5);
        assert!(!checker.has_vision());
    }
}
