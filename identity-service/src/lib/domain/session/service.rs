use std::sync::Arc;
use std::time::Duration;

use auth::SessionToken;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionStore;
use crate::domain::timeout::bounded;
use crate::domain::user::models::UserId;

/// Attempts at binding a fresh token before giving up.
const MAX_BIND_ATTEMPTS: usize = 3;

/// Binds authenticated users to opaque tokens and resolves them later.
///
/// Only the keyed digest of a token reaches the store; the raw token exists
/// solely in the value returned from `create` and whatever the client sends
/// back.
pub struct SessionManager<SS>
where
    SS: SessionStore,
{
    store: Arc<SS>,
    issuer: TokenIssuer,
    ttl: Option<chrono::Duration>,
    store_timeout: Duration,
}

impl<SS> SessionManager<SS>
where
    SS: SessionStore,
{
    /// Create a new session manager.
    ///
    /// # Arguments
    /// * `store` - Session persistence implementation
    /// * `issuer` - Token generator keyed with the session secret
    /// * `ttl` - Session lifetime, `None` for sessions that never expire
    /// * `store_timeout` - Deadline for each store call
    pub fn new(
        store: Arc<SS>,
        issuer: TokenIssuer,
        ttl: Option<chrono::Duration>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            issuer,
            ttl,
            store_timeout,
        }
    }

    /// Bind a new session to `user_id` and return its token.
    ///
    /// # Errors
    /// * `DuplicateToken` - Repeated digest collisions (not expected in practice)
    /// * `LifetimeOutOfRange` - Configured TTL overflows the expiry instant
    /// * `StoreUnavailable` - Store operation failed or timed out
    pub async fn create(&self, user_id: UserId) -> Result<SessionToken, SessionError> {
        for attempt in 1..=MAX_BIND_ATTEMPTS {
            let token = self.issuer.issue();
            let digest = self.issuer.digest(&token);
            let session = Session::begin(user_id, Utc::now(), self.ttl)?;

            let inserted = bounded(
                self.store_timeout,
                "session_insert",
                self.store.insert(&digest, &session),
                SessionError::StoreUnavailable,
            )
            .await;

            match inserted {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user_id,
                        expires_at = ?session.expires_at,
                        "Session created"
                    );
                    return Ok(token);
                }
                Err(SessionError::DuplicateToken) => {
                    tracing::warn!(attempt, "Session token collision, reissuing");
                }
                Err(e) => return Err(e),
            }
        }

        Err(SessionError::DuplicateToken)
    }

    /// Resolve a token to the user it is bound to.
    ///
    /// Expired sessions are reported exactly like unknown ones and removed.
    ///
    /// # Errors
    /// * `NotFound` - Token unknown, invalidated or expired
    /// * `StoreUnavailable` - Store operation failed or timed out
    pub async fn resolve(&self, token: &SessionToken) -> Result<UserId, SessionError> {
        let digest = self.issuer.digest(token);

        let session = bounded(
            self.store_timeout,
            "session_find",
            self.store.find(&digest),
            SessionError::StoreUnavailable,
        )
        .await?;

        match session {
            None => Err(SessionError::NotFound),
            Some(session) if session.is_expired(Utc::now()) => {
                tracing::debug!(user_id = %session.user_id, "Session expired");
                let removed = bounded(
                    self.store_timeout,
                    "session_remove",
                    self.store.remove(&digest),
                    SessionError::StoreUnavailable,
                )
                .await;
                if let Err(e) = removed {
                    tracing::warn!(error = %e, "Failed to remove expired session");
                }
                Err(SessionError::NotFound)
            }
            Some(session) => Ok(session.user_id),
        }
    }

    /// Invalidate a token. Unknown tokens are not an error.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed or timed out
    pub async fn invalidate(&self, token: &SessionToken) -> Result<(), SessionError> {
        let digest = self.issuer.digest(token);

        let removed = bounded(
            self.store_timeout,
            "session_remove",
            self.store.remove(&digest),
            SessionError::StoreUnavailable,
        )
        .await?;

        tracing::debug!(removed, "Session invalidated");
        Ok(())
    }

    /// Remove all expired sessions from the store.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed or timed out
    pub async fn purge_expired(&self) -> Result<u64, SessionError> {
        let purged = bounded(
            self.store_timeout,
            "session_purge",
            self.store.purge_expired(Utc::now()),
            SessionError::StoreUnavailable,
        )
        .await?;

        if purged > 0 {
            tracing::info!(purged, "Expired sessions purged");
        }
        Ok(purged)
    }
}
