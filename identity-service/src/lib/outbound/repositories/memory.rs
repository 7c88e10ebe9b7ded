use std::collections::HashMap;

use async_trait::async_trait;
use auth::HashedPassword;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionStore;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_username: HashMap<Username, UserId>,
}

/// Process-local credential store.
///
/// The username check and the insert happen under one write lock, which
/// gives the same uniqueness guarantee as the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<Users>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(
        &self,
        username: Username,
        password_hash: HashedPassword,
    ) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.by_username.contains_key(&username) {
            return Err(UserError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            id: UserId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        };

        users.by_username.insert(user.username.clone(), user.id);
        users.by_id.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.by_id.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users
            .by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }
}

/// Process-local session store keyed by token digest.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<TokenDigest, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, digest: &TokenDigest, session: &Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(digest) {
            return Err(SessionError::DuplicateToken);
        }
        sessions.insert(digest.clone(), session.clone());

        Ok(())
    }

    async fn find(&self, digest: &TokenDigest) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.read().await.get(digest).cloned())
    }

    async fn remove(&self, digest: &TokenDigest) -> Result<bool, SessionError> {
        Ok(self.sessions.write().await.remove(digest).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));

        Ok((before - sessions.len()) as u64)
    }
}
