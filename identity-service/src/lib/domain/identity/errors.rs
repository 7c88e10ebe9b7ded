use thiserror::Error;

use crate::domain::session::errors::SessionError;
use crate::user::errors::UserError;

/// Infrastructure failures while resolving an identity.
///
/// An absent or invalid token is not an error; it resolves to `Anonymous`.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Session lookup failed: {0}")]
    Session(#[from] SessionError),

    #[error("User lookup failed: {0}")]
    User(#[from] UserError),
}
