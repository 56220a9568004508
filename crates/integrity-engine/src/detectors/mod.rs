//! Layer-1 text heuristics
//!
//! Each detector is a pure function over its input and returns the issues it
//! raised. Detectors never fail; missing optional data is skipped.

pub mod characters;
pub mod continuity;
pub mod fragmentation;
pub mod interleaving;
pub mod pages;
pub mod repetition;
pub mod sections;

use loa_types::{IntegrityIssue, OcrResult};

/// Run the text detectors in their fixed order, then the page detectors when
/// OCR page data is available
pub fn run_layer_one(text: &str, ocr: Option<&OcrResult>) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    issues.extend(interleaving::check_interleaved_text(text));
    issues.extend(fragmentation::check_text_fragmentation(text));
    issues.extend(continuity::check_sentence_continuity(text));
    issues.extend(sections::check_required_sections(text));
    issues.extend(repetition::check_repeated_fragments(text));
    issues.extend(characters::check_character_corruption(text));

    if let Some(ocr) = ocr {
        issues.extend(pages::check_page_continuity(ocr));
        issues.extend(pages::check_page_confidence(ocr));
    }

    issues
}
