//! Handwritten initial detection from OCR text
//!
//! Finds empty initial boxes (underscores), filled boxes carrying short letter
//! groups, and textual hints that a document carries handwriting.

use crate::patterns::{ceil_boundary, floor_boundary};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMPTY_BOX_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?mi)Initial[^:]*:\s*_{1,}").unwrap(),
        Regex::new(r"(?mi)_{3,}\s*(?:Initial|Initials)").unwrap(),
    ];

    static ref FILLED_BOX_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?m)Initial\s+[Bb]ox[^:]*:\s*\n?\s*([A-Za-z]{1,3})\s").unwrap(),
        Regex::new(r"(?m)^([A-Za-z]{1,3})\s+(?:Account|Interval|Historical|Energy|Usage|Data|Release)").unwrap(),
        Regex::new(r"(?m)[\[\]☐☑✓✗]\s*([A-Za-z]{1,3})\s").unwrap(),
        Regex::new(r"(?m)^([A-Za-z]{1,3})\s+(?:Account/SDI|Number Release|Interval Historical)").unwrap(),
        Regex::new(r"(?m)^([A-Z]{1,3})\s+Account/SDI\s+Number\s+Release").unwrap(),
        Regex::new(r"(?m)^([A-Z][+\-]?)\s+Interval\s+Historical").unwrap(),
        Regex::new(r"\n([A-Za-z0-9]{1,3})\nAccount/SDI").unwrap(),
        Regex::new(r"\n([A-Za-z0-9]{1,3})\nResidential").unwrap(),
    ];
}

const FALSE_POSITIVES: &[&str] = &[
    "An", "By", "In", "On", "At", "To", "Of", "Or", "If", "As", "Is", "It", "We", "ID",
];

const HANDWRITTEN_INDICATORS: &[&str] = &[
    "signature",
    "initials",
    "initial here",
    "signed by",
    "authorized signature",
    "handwritten",
    "written by hand",
];

pub const DETECTION_METHOD: &str = "enhanced_pattern_matching";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    EmptyBox,
    FilledBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialBox {
    pub kind: BoxKind,
    pub text: String,
    pub context: String,
    pub is_filled: bool,
    pub is_likely_initial: bool,
    pub detection_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialInitial {
    pub text: String,
    pub is_likely_initial: bool,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandwrittenIndicator {
    pub text: String,
    pub detection_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialDetection {
    pub initial_boxes: Vec<InitialBox>,
    pub potential_initials: Vec<PotentialInitial>,
    pub handwritten_indicators: Vec<HandwrittenIndicator>,
    pub detection_method: String,
}

impl InitialDetection {
    pub fn filled_boxes(&self) -> impl Iterator<Item = &InitialBox> {
        self.initial_boxes.iter().filter(|b| b.is_filled)
    }

    pub fn empty_boxes(&self) -> impl Iterator<Item = &InitialBox> {
        self.initial_boxes.iter().filter(|b| !b.is_filled)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancedInitialDetector;

impl EnhancedInitialDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect_handwritten_initials(&self, text: &str) -> InitialDetection {
        let mut initial_boxes = Vec::new();
        let mut potential_initials = Vec::new();

        for pattern in EMPTY_BOX_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                initial_boxes.push(InitialBox {
                    kind: BoxKind::EmptyBox,
                    text: String::new(),
                    context: m.as_str().to_string(),
                    is_filled: false,
                    is_likely_initial: false,
                    detection_method: "underscore_pattern".to_string(),
                });
            }
        }

        for (idx, pattern) in FILLED_BOX_PATTERNS.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let initial = caps
                    .get(1)
                    .map_or(whole.as_str(), |m| m.as_str())
                    .trim()
                    .to_string();
                if FALSE_POSITIVES.contains(&initial.as_str()) {
                    continue;
                }

                let context = surrounding(text, whole.start(), whole.end());
                let is_likely_initial = initial.chars().count() <= 3;

                potential_initials.push(PotentialInitial {
                    text: initial.clone(),
                    is_likely_initial,
                    context: context.clone(),
                });
                initial_boxes.push(InitialBox {
                    kind: BoxKind::FilledBox,
                    text: initial,
                    context,
                    is_filled: true,
                    is_likely_initial,
                    detection_method: format!("pattern_{}", idx + 1),
                });
            }
        }

        let lower = text.to_lowercase();
        let handwritten_indicators = HANDWRITTEN_INDICATORS
            .iter()
            .filter(|indicator| lower.contains(*indicator))
            .map(|indicator| HandwrittenIndicator {
                text: indicator.to_string(),
                detection_method: "text_pattern_match".to_string(),
            })
            .collect();

        InitialDetection {
            initial_boxes,
            potential_initials,
            handwritten_indicators,
            detection_method: DETECTION_METHOD.to_string(),
        }
    }
}

/// 50 characters before to 100 after the match, flattened onto one line
fn surrounding(text: &str, start: usize, end: usize) -> String {
    let before: usize = text[..start]
        .chars()
        .rev()
        .take(50)
        .map(char::len_utf8)
        .sum();
    let after: usize = text[end..].chars().take(100).map(char::len_utf8).sum();
    let from = floor_boundary(text, start - before);
    let to = ceil_boundary(text, end + after);
    text[from..to].replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_empty_boxes() {
        let detection =
            EnhancedInitialDetector::new().detect_handwritten_initials("Initial here: ______\n");
        let empty: Vec<_> = detection.empty_boxes().collect();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].detection_method, "underscore_pattern");
        assert!(detection
            .handwritten_indicators
            .iter()
            .any(|i| i.text == "initial here"));
    }

    #[test]
    fn test_finds_filled_boxes_and_skips_false_positives() {
        let text = "Header\nJD Account/SDI Number Release\nIn Account terms\nB+ Interval Historical";
        let detection = EnhancedInitialDetector::new().detect_handwritten_initials(text);
        let texts: Vec<_> = detection.filled_boxes().map(|b| b.text.as_str()).collect();

        assert!(texts.contains(&"JD"));
        assert!(texts.contains(&"B+"));
        assert!(!texts.contains(&"In"));
        assert_eq!(detection.potential_initials.len(), detection.filled_boxes().count());
        assert!(detection
            .filled_boxes()
            .all(|b| b.detection_method.starts_with("pattern_")));
    }

    #[test]
    fn test_context_is_single_line_and_char_safe() {
        let text = format!("{}\nJD Account\n{}", "é".repeat(80), "ü".repeat(150));
        let detection = EnhancedInitialDetector::new().detect_handwritten_initials(&text);
        let jd = detection.filled_boxes().find(|b| b.text == "JD").unwrap();
        assert!(!jd.context.contains('\n'));
        assert!(jd.context.contains("JD Account"));
    }

    #[test]
    fn test_reports_detection_method() {
        let detection = EnhancedInitialDetector::new().detect_handwritten_initials("plain text");
        assert_eq!(detection.detection_method, DETECTION_METHOD);
        assert!(detection.initial_boxes.is_empty());
    }
}
