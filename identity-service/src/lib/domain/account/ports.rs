use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::LoginSuccess;
use crate::domain::identity::models::Identity;
use crate::domain::user::models::Principal;

/// Account operations exposed to inbound adapters.
///
/// Inputs arrive as raw strings; validation happens behind this port.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `Validation` - Username or password is malformed
    /// * `DuplicateUsername` - Username is already taken
    /// * `StoreUnavailable` - Credential store failed or timed out
    /// * `Hashing` - Password could not be hashed
    async fn register(&self, username: &str, password: &str) -> Result<Principal, AccountError>;

    /// Authenticate and open a session.
    ///
    /// # Errors
    /// * `Validation` - Username or password is missing
    /// * `AuthenticationFailed` - Unknown username or wrong password
    /// * `StoreUnavailable` - Credential or session store failed
    /// * `Hashing` - Password verification could not run
    async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AccountError>;

    /// Close the session behind `token`. Unknown or malformed tokens are Ok.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Session store failed
    async fn logout(&self, token: &str) -> Result<(), AccountError>;

    /// Resolve the identity behind an optional token.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Credential or session store failed
    async fn resolve_identity(&self, token: Option<&str>) -> Result<Identity, AccountError>;
}
