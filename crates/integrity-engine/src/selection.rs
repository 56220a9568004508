//! Selection mark and initial box validation
//!
//! Counts selected/unselected boxes, X marks written where initials belong,
//! and letter initials. Whether X marks are a defect depends on the
//! jurisdiction implied by the configured region.

use crate::config::CheckerConfig;
use crate::jurisdiction::{Jurisdiction, Region};
use lazy_static::lazy_static;
use loa_types::{MarkState, SelectionMark};
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref X_MARK_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)[Xx]\s+(?:Account|Interval|Historical)").unwrap(),
        Regex::new(r"(?i):selected:\s*[Xx]").unwrap(),
        Regex::new(r"(?i)Initial\s+Box[^:]*:\s*[Xx]").unwrap(),
    ];

    static ref INITIAL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"Initial\s+Box[^:]*:\s*([A-Za-z]{1,3})\s").unwrap(),
        Regex::new(r"(?m)^([A-Za-z]{1,3})\s+(?:Account|Interval|Historical)").unwrap(),
    ];
}

/// Short words that look like initials but are not
const NOT_INITIALS: &[&str] = &["An", "By", "In", "On", "At", "To"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionValidation {
    pub jurisdiction: Jurisdiction,
    pub total_marks: usize,
    pub selected_marks: usize,
    pub x_marks_found: usize,
    pub valid_initials_found: usize,
    pub empty_boxes_found: usize,
    pub issues: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone)]
pub struct EnhancedSelectionValidator {
    region: Region,
    jurisdiction: Jurisdiction,
}

impl EnhancedSelectionValidator {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            jurisdiction: region.default_jurisdiction(),
        }
    }

    /// Build from a region display name such as "New England"
    pub fn for_region_name(name: &str) -> Self {
        Self::new(Region::from_name(name))
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.region)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn validate_selection_marks(
        &self,
        marks: &[SelectionMark],
        extracted_text: &str,
    ) -> SelectionValidation {
        let selected = marks
            .iter()
            .filter(|m| m.state == MarkState::Selected)
            .count();
        let unselected = marks
            .iter()
            .filter(|m| m.state == MarkState::Unselected)
            .count();

        let x_marks = count_x_marks(extracted_text);
        let initials = count_valid_initials(extracted_text);

        let mut issues = Vec::new();
        if x_marks > 0 {
            if self.jurisdiction.rejects_x_marks() {
                issues.push(format!(
                    "Found {} X marks (invalid for {} documents)",
                    x_marks, self.jurisdiction
                ));
            } else {
                issues.push(format!("Found {} X marks in initial boxes", x_marks));
            }
        }
        if unselected > 0 {
            issues.push(format!("Found {} empty/unselected boxes", unselected));
        }
        if initials == 0 && !marks.is_empty() {
            issues.push("No valid letter initials detected".to_string());
        }

        let analysis = [
            format!("Total selection marks: {}", marks.len()),
            format!("Selected marks: {}", selected),
            format!("Unselected marks: {}", unselected),
            format!("X marks detected: {}", x_marks),
            format!("Valid initials detected: {}", initials),
        ]
        .join("; ");

        SelectionValidation {
            jurisdiction: self.jurisdiction,
            total_marks: marks.len(),
            selected_marks: selected,
            x_marks_found: x_marks,
            valid_initials_found: initials,
            empty_boxes_found: unselected,
            issues,
            analysis,
        }
    }
}

impl Default for EnhancedSelectionValidator {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

fn count_x_marks(text: &str) -> usize {
    X_MARK_PATTERNS
        .iter()
        .map(|p| p.find_iter(text).count())
        .sum()
}

fn count_valid_initials(text: &str) -> usize {
    INITIAL_PATTERNS
        .iter()
        .flat_map(|p| p.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|initial| !initial.eq_ignore_ascii_case("X") && !NOT_INITIALS.contains(initial))
        .count()
}
