use std::sync::Arc;
use std::time::Duration;

use auth::SessionToken;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::session::errors::SessionError;
use crate::domain::session::ports::SessionStore;
use crate::domain::session::service::SessionManager;
use crate::domain::timeout::bounded;
use crate::domain::user::models::Principal;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;

/// Turns whatever session token a request carries into an `Identity`.
///
/// Never fails for a bad token; only store failures are errors.
pub struct IdentityResolver<CS, SS>
where
    CS: CredentialStore,
    SS: SessionStore,
{
    store: Arc<CS>,
    sessions: Arc<SessionManager<SS>>,
    store_timeout: Duration,
}

impl<CS, SS> IdentityResolver<CS, SS>
where
    CS: CredentialStore,
    SS: SessionStore,
{
    pub fn new(
        store: Arc<CS>,
        sessions: Arc<SessionManager<SS>>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            sessions,
            store_timeout,
        }
    }

    /// Resolve the identity behind an optional token.
    ///
    /// # Returns
    /// `User` for a live session whose user still exists, `Anonymous` otherwise
    ///
    /// # Errors
    /// * `Session` - Session store failed or timed out
    /// * `User` - Credential store failed or timed out
    pub async fn resolve(&self, token: Option<&SessionToken>) -> Result<Identity, IdentityError> {
        let Some(token) = token else {
            return Ok(Identity::Anonymous);
        };

        let user_id = match self.sessions.resolve(token).await {
            Ok(user_id) => user_id,
            Err(SessionError::NotFound) => return Ok(Identity::Anonymous),
            Err(e) => return Err(e.into()),
        };

        let user = bounded(
            self.store_timeout,
            "find_by_id",
            self.store.find_by_id(&user_id),
            UserError::StoreUnavailable,
        )
        .await?;

        match user {
            Some(user) => Ok(Identity::User(Principal::from(user))),
            None => {
                tracing::warn!(user_id = %user_id, "Session bound to missing user, invalidating");
                self.sessions.invalidate(token).await?;
                Ok(Identity::Anonymous)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::HashedPassword;
    use auth::TokenIssuer;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::outbound::repositories::memory::InMemoryCredentialStore;
    use crate::outbound::repositories::memory::InMemorySessionStore;

    const SECRET: &[u8] = b"test-secret-key-for-session-digests-32b";
    // Placeholder hash; these tests never verify passwords.
    const SOME_HASH: &str = "$argon2id$v=19$m=256,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA";

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn create(&self, username: Username, password_hash: HashedPassword) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn sessions() -> Arc<SessionManager<InMemorySessionStore>> {
        Arc::new(SessionManager::new(
            Arc::new(InMemorySessionStore::new()),
            TokenIssuer::new(SECRET).unwrap(),
            Some(chrono::Duration::hours(1)),
            Duration::from_secs(5),
        ))
    }

    async fn alice(store: &InMemoryCredentialStore) -> User {
        store
            .create(
                Username::new("alice".to_string()).unwrap(),
                HashedPassword::from_phc(SOME_HASH.to_string()).unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_token_is_anonymous() {
        let resolver = IdentityResolver::new(
            Arc::new(InMemoryCredentialStore::new()),
            sessions(),
            Duration::from_secs(5),
        );

        assert_eq!(resolver.resolve(None).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_live_session_resolves_to_user() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let user = alice(&store).await;
        let sessions = sessions();
        let token = sessions.create(user.id).await.unwrap();

        let resolver = IdentityResolver::new(store, sessions, Duration::from_secs(5));
        let identity = resolver.resolve(Some(&token)).await.unwrap();

        let principal = identity.principal().unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous() {
        let resolver = IdentityResolver::new(
            Arc::new(InMemoryCredentialStore::new()),
            sessions(),
            Duration::from_secs(5),
        );
        let stranger = TokenIssuer::new(SECRET).unwrap().issue();

        assert_eq!(resolver.resolve(Some(&stranger)).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_invalidated_token_is_anonymous() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let user = alice(&store).await;
        let sessions = sessions();
        let token = sessions.create(user.id).await.unwrap();
        sessions.invalidate(&token).await.unwrap();

        let resolver = IdentityResolver::new(store, sessions, Duration::from_secs(5));
        assert_eq!(resolver.resolve(Some(&token)).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_session_for_missing_user_is_dropped() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));

        let sessions = sessions();
        let token = sessions.create(UserId::new()).await.unwrap();

        let resolver = IdentityResolver::new(
            Arc::new(store),
            Arc::clone(&sessions),
            Duration::from_secs(5),
        );
        assert_eq!(resolver.resolve(Some(&token)).await.unwrap(), Identity::Anonymous);
        assert_eq!(sessions.resolve(&token).await, Err(SessionError::NotFound));
    }

    #[tokio::test]
    async fn test_credential_store_failure_is_an_error() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(UserError::StoreUnavailable("connection refused".into())));

        let sessions = sessions();
        let token = sessions.create(UserId::new()).await.unwrap();

        let resolver = IdentityResolver::new(Arc::new(store), sessions, Duration::from_secs(5));
        assert!(matches!(
            resolver.resolve(Some(&token)).await,
            Err(IdentityError::User(UserError::StoreUnavailable(_)))
        ));
    }
}
