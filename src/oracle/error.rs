//! Remote move source errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// Substrings (matched case-insensitively) that mark a failure as a rate
/// limit.
pub const RATE_LIMIT_SIGNATURES: [&str; 4] = ["429", "RESOURCE_EXHAUSTED", "RATE LIMIT", "RATE_LIMIT"];

/// Why the remote move source did not produce a usable move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ResolverErrorKind {
    /// No reply before the deadline.
    #[display("no reply within {_0} ms")]
    Timeout(u64),
    /// The environment reports no connectivity.
    #[display("network unavailable")]
    Offline,
    /// Transport or provider failure.
    #[display("request failed: {_0}")]
    Network(String),
    /// The reply could not be read as a move.
    #[display("malformed reply: {_0}")]
    Malformed(String),
    /// The reply named a square outside 0-8 or an occupied square.
    #[display("illegal move {_0}")]
    IllegalMove(i64),
    /// The provider asked us to slow down.
    #[display("rate limited: {_0}")]
    RateLimited(String),
}

/// Remote move source error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Resolver error: {} at {}:{}", kind, file, line)]
pub struct ResolverError {
    /// Error kind.
    pub kind: ResolverErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ResolverError {
    /// Creates a new resolver error with caller location tracking.
    #[track_caller]
    #[instrument(level = "debug")]
    pub fn new(kind: ResolverErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Classifies a free-form failure message: rate limit if it carries a
    /// rate-limit signature, network failure otherwise.
    #[track_caller]
    pub fn from_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if has_rate_limit_signature(&message) {
            Self::new(ResolverErrorKind::RateLimited(message))
        } else {
            Self::new(ResolverErrorKind::Network(message))
        }
    }

    /// True if this failure should arm the cooldown.
    pub fn is_rate_limited(&self) -> bool {
        match &self.kind {
            ResolverErrorKind::RateLimited(_) => true,
            ResolverErrorKind::Network(msg) => has_rate_limit_signature(msg),
            // Model output, not a provider status.
            ResolverErrorKind::Malformed(_)
            | ResolverErrorKind::Timeout(_)
            | ResolverErrorKind::Offline
            | ResolverErrorKind::IllegalMove(_) => false,
        }
    }
}

/// True if `message` contains any of [`RATE_LIMIT_SIGNATURES`].
pub fn has_rate_limit_signature(message: &str) -> bool {
    let upper = message.to_uppercase();
    RATE_LIMIT_SIGNATURES.iter().any(|sig| upper.contains(sig))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_rate_limits() {
        assert!(ResolverError::from_failure("Gemini API error 429 Too Many Requests").is_rate_limited());
        assert!(ResolverError::from_failure("status: resource_exhausted").is_rate_limited());
        assert!(ResolverError::from_failure("Rate limit reached for gpt-4o-mini").is_rate_limited());
        assert!(!ResolverError::from_failure("connection refused").is_rate_limited());
    }

    #[test]
    fn test_illegal_move_never_rate_limited() {
        assert!(!ResolverError::new(ResolverErrorKind::IllegalMove(429)).is_rate_limited());
        assert!(!ResolverError::new(ResolverErrorKind::Timeout(429)).is_rate_limited());
    }

    #[test]
    fn test_reply_text_never_rate_limited() {
        let err = ResolverError::new(ResolverErrorKind::Malformed(r#"{"move":"429"}"#.to_string()));
        assert!(!err.is_rate_limited());
        let err = ResolverError::new(ResolverErrorKind::Malformed("rate limit? no idea".to_string()));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_records_location() {
        let err = ResolverError::new(ResolverErrorKind::Offline);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("network unavailable"));
    }
}
