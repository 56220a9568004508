//! Checker configuration
//!
//! Loaded from JSON; every field has a default so partial documents work.

use crate::error::IntegrityError;
use crate::jurisdiction::Region;
use crate::retry::RetryPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Advisory threshold for callers gating on the returned confidence
    pub min_confidence: f64,
    /// Region used by the selection-mark validator
    pub region: Region,
    /// Backoff applied when wrapping a vision delegate in a retrying verifier
    pub retry: RetryPolicy,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            region: Region::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl CheckerConfig {
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), IntegrityError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(IntegrityError::InvalidMinConfidence(self.min_confidence));
        }
        if !self.retry.backoff_multiplier.is_finite() || self.retry.backoff_multiplier < 1.0 {
            return Err(IntegrityError::Config(format!(
                "backoff_multiplier must be at least 1.0, got {}",
                self.retry.backoff_multiplier
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, IntegrityError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| IntegrityError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading checker config {}", path.display()))?;
        Ok(Self::from_json_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CheckerConfig::from_json_str(r#"{"region": "New England"}"#).unwrap();
        assert_eq!(config.min_confidence, DEFAULT_MIN_CONFIDENCE);
        assert_eq!(config.region, Region::NewEngland);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_rejects_out_of_range_min_confidence() {
        let err = CheckerConfig::from_json_str(r#"{"min_confidence": 1.5}"#).unwrap_err();
        assert_eq!(err, IntegrityError::InvalidMinConfidence(1.5));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CheckerConfig::from_json_str("{not json"),
            Err(IntegrityError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_shrinking_backoff() {
        let config = CheckerConfig::default().with_retry(RetryPolicy {
            backoff_multiplier: 0.5,
            ..RetryPolicy::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CheckerConfig::from_json_file("/nonexistent/checker.json").is_err());
    }
}
