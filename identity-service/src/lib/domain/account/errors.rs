use thiserror::Error;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::session::errors::SessionError;
use crate::user::errors::HashingError;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::errors::UsernameError;

/// Error returned across the account service boundary
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Unknown username and wrong password are indistinguishable here.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<UsernameError> for AccountError {
    fn from(e: UsernameError) -> Self {
        AccountError::Validation(e.to_string())
    }
}

impl From<PasswordError> for AccountError {
    fn from(e: PasswordError) -> Self {
        AccountError::Validation(e.to_string())
    }
}

impl From<UserError> for AccountError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::DuplicateUsername(username) => AccountError::DuplicateUsername(username),
            UserError::StoreUnavailable(msg) => AccountError::StoreUnavailable(msg),
            UserError::CorruptRecord(_) => AccountError::StoreUnavailable(e.to_string()),
        }
    }
}

impl From<HashingError> for AccountError {
    fn from(e: HashingError) -> Self {
        AccountError::Hashing(e.to_string())
    }
}

impl From<SessionError> for AccountError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::StoreUnavailable(msg) => AccountError::StoreUnavailable(msg),
            SessionError::NotFound
            | SessionError::DuplicateToken
            | SessionError::LifetimeOutOfRange => {
                AccountError::StoreUnavailable(e.to_string())
            }
        }
    }
}

impl From<AuthenticationError> for AccountError {
    fn from(e: AuthenticationError) -> Self {
        match e {
            AuthenticationError::Store(e) => e.into(),
            AuthenticationError::Hashing(e) => e.into(),
        }
    }
}

impl From<IdentityError> for AccountError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::Session(e) => e.into(),
            IdentityError::User(e) => e.into(),
        }
    }
}
