use thiserror::Error;

/// Error for session binding operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown, invalidated or expired token.
    #[error("Session not found")]
    NotFound,

    #[error("Session token already bound")]
    DuplicateToken,

    /// Configured lifetime pushes the expiry past the representable range.
    #[error("Session lifetime out of range")]
    LifetimeOutOfRange,

    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),
}
