use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;

/// Storage for the token digest → session mapping.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Bind a new session under `digest`.
    ///
    /// # Errors
    /// * `DuplicateToken` - Digest is already bound
    /// * `StoreUnavailable` - Store operation failed
    async fn insert(&self, digest: &TokenDigest, session: &Session) -> Result<(), SessionError>;

    /// Look up the session bound to `digest`, expired or not.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find(&self, digest: &TokenDigest) -> Result<Option<Session>, SessionError>;

    /// Remove the binding for `digest`.
    ///
    /// # Returns
    /// Whether a binding existed
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn remove(&self, digest: &TokenDigest) -> Result<bool, SessionError>;

    /// Drop every session expired at `now`.
    ///
    /// # Returns
    /// Number of sessions removed
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError>;
}
