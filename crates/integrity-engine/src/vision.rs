//! Layer-2 vision verification seam
//!
//! The checker depends only on [`VisionVerifier`]; concrete clients live with
//! the embedding application.

use crate::error::VisionError;
use loa_types::VisionResponse;

/// Judges a document's integrity from its source path
pub trait VisionVerifier: Send + Sync {
    fn verify_document_integrity(&self, document_path: &str) -> Result<VisionResponse, VisionError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "vision"
    }
}

impl<V: VisionVerifier + ?Sized> VisionVerifier for Box<V> {
    fn verify_document_integrity(&self, document_path: &str) -> Result<VisionResponse, VisionError> {
        (**self).verify_document_integrity(document_path)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Parse a model reply into a successful [`VisionResponse`].
///
/// Replies wrapped in a ```json fence are unwrapped first.
pub fn parse_vision_reply(raw: &str) -> Result<VisionResponse, VisionError> {
    let body = extract_json_block(raw);
    let mut value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| VisionError::MalformedResponse(e.to_string()))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| VisionError::MalformedResponse("expected a JSON object".to_string()))?;
    object.insert("success".to_string(), serde_json::Value::Bool(true));

    serde_json::from_value(value).map_err(|e| VisionError::MalformedResponse(e.to_string()))
}

fn extract_json_block(raw: &str) -> &str {
    const FENCE: &str = "```json";
    match raw.find(FENCE) {
        Some(pos) => {
            let start = pos + FENCE.len();
            let rest = &raw[start..];
            let end = rest.find("```").unwrap_or(rest.len());
            rest[..end].trim()
        }
        None => raw.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_fence_keeps_remainder() {
        let raw = "```json\n{\"is_valid\": true, \"confidence\": 0.95}";
        let response = parse_vision_reply(raw).unwrap();
        assert!(response.is_valid);
        assert_eq!(response.confidence, 0.95);
    }

    #[test]
    fn test_parses_fenced_reply() {
        let raw = "Here is my analysis:\n```json\n{\"is_valid\": false, \"confidence\": 0.3, \"issues\": [{\"type\": \"INTERLEAVED_PAGES\", \"description\": \"names differ\", \"evidence\": \"Acme vs Beta\", \"page_numbers\": [1, 2]}], \"reasoning\": \"two customers\"}\n```\nDone.";
        let response = parse_vision_reply(raw).unwrap();
        assert!(response.success);
        assert!(!response.is_valid);
        assert_eq!(response.confidence, 0.3);
        assert_eq!(response.issues[0].description, "names differ");
        assert_eq!(response.reasoning, "two customers");
    }

    #[test]
    fn test_parses_bare_reply_with_defaults() {
        let response = parse_vision_reply("  {\"reasoning\": \"looks fine\"}  ").unwrap();
        assert!(response.is_valid);
        assert_eq!(response.confidence, 1.0);
        assert!(response.issues.is_empty());
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_vision_reply("I cannot read this document"),
            Err(VisionError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_vision_reply("[1, 2]"),
            Err(VisionError::MalformedResponse(_))
        ));
    }
}
