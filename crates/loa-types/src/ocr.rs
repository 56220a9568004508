//! Page-level OCR structures produced by the upstream extraction pipeline.
//!
//! Every field is optional on the wire; detectors skip missing data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub lines: Option<Vec<OcrLine>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl OcrResult {
    pub fn from_pages(pages: Vec<OcrPage>) -> Self {
        Self { pages }
    }
}

impl OcrPage {
    pub fn numbered(page_number: i64) -> Self {
        Self {
            page_number: Some(page_number),
            lines: None,
        }
    }

    pub fn with_confidences(mut self, confidences: &[f64]) -> Self {
        self.lines = Some(
            confidences
                .iter()
                .map(|c| OcrLine {
                    content: None,
                    confidence: Some(*c),
                })
                .collect(),
        );
        self
    }

    /// Mean confidence over the lines that report one
    pub fn average_confidence(&self) -> Option<f64> {
        let confidences: Vec<f64> = self
            .lines
            .as_ref()?
            .iter()
            .filter_map(|line| line.confidence)
            .collect();

        if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        }
    }
}
