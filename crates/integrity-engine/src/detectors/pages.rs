// Page-level checks over the OCR page structure
use loa_types::{categories, IntegrityIssue, OcrResult};
use std::collections::HashSet;

const LOW_CONFIDENCE_THRESHOLD: f64 = 0.3;
const MIN_LOW_CONFIDENCE_PAGES: usize = 3;

/// Duplicate and missing page numbers
pub fn check_page_continuity(ocr: &OcrResult) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    if ocr.pages.len() < 2 {
        return issues;
    }

    let page_numbers: Vec<i64> = ocr.pages.iter().filter_map(|p| p.page_number).collect();
    if page_numbers.is_empty() {
        return issues;
    }

    let distinct: HashSet<i64> = page_numbers.iter().copied().collect();
    if distinct.len() != page_numbers.len() {
        issues.push(IntegrityIssue::critical(
            categories::PAGE_ORDER_ISSUE,
            "Duplicate page numbers detected - possible interleaved pages",
            format!("Page numbers: {:?}", page_numbers),
        ));
    }

    let mut sorted = page_numbers;
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[1].saturating_sub(pair[0]) > 1 {
            issues.push(IntegrityIssue::warning(
                categories::PAGE_ORDER_ISSUE,
                format!("Gap in page sequence: {} to {}", pair[0], pair[1]),
                "Pages may be missing or out of order",
            ));
        }
    }

    issues
}

/// Flags documents where several pages were read with very low OCR confidence
pub fn check_page_confidence(ocr: &OcrResult) -> Vec<IntegrityIssue> {
    let low_pages: Vec<(usize, f64)> = ocr
        .pages
        .iter()
        .enumerate()
        .filter_map(|(idx, page)| page.average_confidence().map(|avg| (idx + 1, avg)))
        .filter(|(_, avg)| *avg < LOW_CONFIDENCE_THRESHOLD)
        .collect();

    if low_pages.len() < MIN_LOW_CONFIDENCE_PAGES {
        return Vec::new();
    }

    let listed: Vec<String> = low_pages
        .iter()
        .take(3)
        .map(|(page, avg)| format!("Page {}:{:.2}", page, avg))
        .collect();

    vec![IntegrityIssue::warning(
        categories::LOW_OCR_QUALITY,
        format!(
            "{} pages have extremely low OCR confidence",
            low_pages.len()
        ),
        format!("Pages: {}", listed.join(", ")),
    )]
}
