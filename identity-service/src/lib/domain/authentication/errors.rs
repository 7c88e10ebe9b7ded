use thiserror::Error;

use crate::user::errors::HashingError;
use crate::user::errors::UserError;

/// Infrastructure failures while deciding a login.
///
/// A rejected login is not an error; see `AuthenticationOutcome`.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("Credential lookup failed: {0}")]
    Store(#[from] UserError),

    #[error(transparent)]
    Hashing(#[from] HashingError),
}
