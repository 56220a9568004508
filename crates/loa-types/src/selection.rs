use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkState {
    Selected,
    Unselected,
    #[serde(other)]
    Unknown,
}

/// A checkbox-like mark reported by OCR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMark {
    pub state: MarkState,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub page_number: Option<u32>,
}

impl SelectionMark {
    pub fn selected() -> Self {
        Self {
            state: MarkState::Selected,
            confidence: None,
            page_number: None,
        }
    }

    pub fn unselected() -> Self {
        Self {
            state: MarkState::Unselected,
            confidence: None,
            page_number: None,
        }
    }
}
