pub mod issue;
pub mod ocr;
pub mod report;
pub mod selection;
pub mod vision;

pub use issue::{categories, IntegrityIssue, Severity, SeverityError};
pub use ocr::{OcrLine, OcrPage, OcrResult};
pub use report::{IntegrityReport, IssueRecord, EVIDENCE_LIMIT};
pub use selection::{MarkState, SelectionMark};
pub use vision::{VisionIssue, VisionJudgment, VisionResponse};
