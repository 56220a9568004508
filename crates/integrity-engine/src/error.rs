use loa_types::SeverityError;
use thiserror::Error;

/// Precondition violations surfaced to callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    #[error("extracted_text cannot be empty or blank")]
    EmptyText,

    #[error("min_confidence must be between 0.0 and 1.0, got {0}")]
    InvalidMinConfidence(f64),

    #[error(transparent)]
    InvalidSeverity(#[from] SeverityError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failures of the external vision-verification delegate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisionError {
    #[error("Vision service rejected the request (400): {0}")]
    BadRequest(String),

    #[error("Vision service rate limited the request: {0}")]
    RateLimited(String),

    #[error("Vision service error: {0}")]
    Server(String),

    #[error("Vision transport failure: {0}")]
    Transport(String),

    #[error("Could not parse vision reply: {0}")]
    MalformedResponse(String),

    #[error("Vision verification unsuccessful: {0}")]
    Unsuccessful(String),

    #[error("Vision verification failed after {attempts} attempts. Last error: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl VisionError {
    /// Classify a free-form service error message
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if message.contains("400")
            || lower.contains("invalid_type")
            || lower.contains("invalid_request")
        {
            VisionError::BadRequest(message)
        } else if message.contains("429") || lower.contains("rate") {
            VisionError::RateLimited(message)
        } else if message.contains("500") || lower.contains("internal") {
            VisionError::Server(message)
        } else {
            VisionError::Unsuccessful(message)
        }
    }

    /// Promote a delegate error whose message reads as a 400 or a rate limit
    pub fn classified(self) -> Self {
        if self.is_bad_request() {
            match self {
                VisionError::BadRequest(_) => self,
                other => VisionError::BadRequest(other.message().to_string()),
            }
        } else if self.is_rate_limited() {
            match self {
                VisionError::RateLimited(_) => self,
                other => VisionError::RateLimited(other.message().to_string()),
            }
        } else {
            self
        }
    }

    pub fn is_bad_request(&self) -> bool {
        match self {
            VisionError::BadRequest(_) => true,
            VisionError::Exhausted { .. } => false,
            other => matches!(
                VisionError::from_message(other.message()),
                VisionError::BadRequest(_)
            ),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            VisionError::RateLimited(_) => true,
            VisionError::Exhausted { .. } => false,
            other => matches!(
                VisionError::from_message(other.message()),
                VisionError::RateLimited(_)
            ),
        }
    }

    pub fn is_retryable(&self) -> bool {
        !self.is_bad_request() && !matches!(self, VisionError::Exhausted { .. })
    }

    fn message(&self) -> &str {
        match self {
            VisionError::BadRequest(m)
            | VisionError::RateLimited(m)
            | VisionError::Server(m)
            | VisionError::Transport(m)
            | VisionError::MalformedResponse(m)
            | VisionError::Unsuccessful(m) => m,
            VisionError::Exhausted { last, .. } => last,
        }
    }
}
