use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is required")]
    Missing,

    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    Missing,

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for credential store operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Stored user record is corrupt: {0}")]
    CorruptRecord(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Error for password hashing running on the blocking pool
#[derive(Debug, Clone, Error)]
pub enum HashingError {
    #[error("Password hashing failed: {0}")]
    Failed(String),

    #[error("Password hashing timed out after {0}ms")]
    TimedOut(u128),

    #[error("Password hashing worker lost: {0}")]
    WorkerLost(String),
}
