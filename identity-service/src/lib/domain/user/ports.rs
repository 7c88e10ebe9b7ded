use async_trait::async_trait;
use auth::HashedPassword;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Durable keyed store of user records.
///
/// Implementations own username uniqueness: `create` must check and insert
/// in one atomic step so that concurrent registrations of the same name
/// produce exactly one record.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user; the store assigns the id and creation time.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password_hash` - Hash produced by the password hasher
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `StoreUnavailable` - Store operation failed
    async fn create(
        &self,
        username: Username,
        password_hash: HashedPassword,
    ) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
