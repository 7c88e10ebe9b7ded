use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionStore;
use crate::domain::user::models::UserId;

#[derive(sqlx::FromRow)]
struct SessionRow {
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            user_id: UserId(row.user_id),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Session store backed by the `sessions` table. Rows are keyed by token
/// digest; raw tokens never reach the database.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn insert(&self, digest: &TokenDigest, session: &Session) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_digest, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(digest.as_str())
        .bind(session.user_id.0)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return SessionError::DuplicateToken;
                }
            }
            SessionError::StoreUnavailable(e.to_string())
        })?;

        Ok(())
    }

    async fn find(&self, digest: &TokenDigest) -> Result<Option<Session>, SessionError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT user_id, created_at, expires_at
            FROM sessions
            WHERE token_digest = $1
            "#,
        )
        .bind(digest.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(row.map(Session::from))
    }

    async fn remove(&self, digest: &TokenDigest) -> Result<bool, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_digest = $1")
            .bind(digest.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
