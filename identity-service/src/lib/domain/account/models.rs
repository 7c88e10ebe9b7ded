use auth::SessionToken;

use crate::domain::user::models::Principal;

/// Result of a successful login: the raw token for transport and who it
/// belongs to.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: SessionToken,
    pub principal: Principal,
}
