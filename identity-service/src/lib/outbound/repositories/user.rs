use async_trait::async_trait;
use auth::HashedPassword;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

const USERNAME_CONSTRAINT: &str = "users_username_key";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| UserError::CorruptRecord(format!("user {}: {}", row.id, e)))?;
        let password_hash = HashedPassword::from_phc(row.password_hash)
            .map_err(|e| UserError::CorruptRecord(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId(row.id),
            username,
            password_hash,
            created_at: row.created_at,
        })
    }
}

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(
        &self,
        username: Username,
        password_hash: HashedPassword,
    ) -> Result<User, UserError> {
        let (id, created_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.as_phc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return UserError::DuplicateUsername(username.as_str().to_string());
                }
            }
            UserError::StoreUnavailable(e.to_string())
        })?;

        Ok(User {
            id: UserId(id),
            username,
            password_hash,
            created_at,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::StoreUnavailable(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::StoreUnavailable(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
