use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::SessionToken;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::LoginSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::authentication::models::AuthenticationOutcome;
use crate::domain::authentication::service::AuthenticationStrategy;
use crate::domain::identity::models::Identity;
use crate::domain::identity::service::IdentityResolver;
use crate::domain::session::ports::SessionStore;
use crate::domain::session::service::SessionManager;
use crate::domain::timeout::bounded;
use crate::domain::user::hashing::PasswordWorkers;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Password;
use crate::domain::user::models::Principal;
use crate::domain::user::models::Username;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::errors::UsernameError;
use crate::user::ports::CredentialStore;

/// Domain service implementation for account operations.
///
/// Wires the credential store, password workers and session manager into the
/// register/login/logout/resolve cycle.
pub struct AccountService<CS, SS>
where
    CS: CredentialStore,
    SS: SessionStore,
{
    store: Arc<CS>,
    sessions: Arc<SessionManager<SS>>,
    workers: PasswordWorkers,
    strategy: AuthenticationStrategy<CS>,
    resolver: IdentityResolver<CS, SS>,
    store_timeout: Duration,
}

impl<CS, SS> AccountService<CS, SS>
where
    CS: CredentialStore,
    SS: SessionStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `sessions` - Session manager shared with background maintenance
    /// * `workers` - Bounded password hashing pool
    /// * `store_timeout` - Deadline for each credential store call
    pub fn new(
        store: Arc<CS>,
        sessions: Arc<SessionManager<SS>>,
        workers: PasswordWorkers,
        store_timeout: Duration,
    ) -> Self {
        let strategy =
            AuthenticationStrategy::new(Arc::clone(&store), workers.clone(), store_timeout);
        let resolver =
            IdentityResolver::new(Arc::clone(&store), Arc::clone(&sessions), store_timeout);

        Self {
            store,
            sessions,
            workers,
            strategy,
            resolver,
            store_timeout,
        }
    }
}

/// Parse login input. Missing fields are validation errors; anything else
/// that could never have been registered is just a failed login.
fn login_credentials(username: &str, password: &str) -> Result<Credentials, AccountError> {
    let username = match Username::new(username.to_string()) {
        Ok(username) => username,
        Err(UsernameError::Missing) => return Err(UsernameError::Missing.into()),
        Err(_) => return Err(AccountError::AuthenticationFailed),
    };

    let password = match Password::new(password.to_string()) {
        Ok(password) => password,
        Err(PasswordError::Missing) => return Err(PasswordError::Missing.into()),
        Err(_) => return Err(AccountError::AuthenticationFailed),
    };

    Ok(Credentials::new(username, password))
}

#[async_trait]
impl<CS, SS> AccountServicePort for AccountService<CS, SS>
where
    CS: CredentialStore,
    SS: SessionStore,
{
    async fn register(&self, username: &str, password: &str) -> Result<Principal, AccountError> {
        let username = Username::new(username.to_string())?;
        let password = Password::new(password.to_string())?;

        let password_hash = self.workers.hash(password).await.map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed during registration");
            AccountError::from(e)
        })?;

        let created = bounded(
            self.store_timeout,
            "create_user",
            self.store.create(username, password_hash),
            UserError::StoreUnavailable,
        )
        .await;

        match created {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User registered");
                Ok(Principal::from(user))
            }
            Err(UserError::DuplicateUsername(username)) => {
                tracing::debug!(username = %username, "Registration rejected, username taken");
                Err(AccountError::DuplicateUsername(username))
            }
            Err(e) => {
                tracing::error!(error = %e, "Credential store failed during registration");
                Err(e.into())
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AccountError> {
        let credentials = login_credentials(username, password)?;
        let username = credentials.username.clone();

        let outcome = self.strategy.verify(credentials).await.map_err(|e| {
            tracing::error!(error = %e, "Authentication could not complete");
            AccountError::from(e)
        })?;

        match outcome {
            AuthenticationOutcome::Authenticated(principal) => {
                let token = self.sessions.create(principal.id).await.map_err(|e| {
                    tracing::error!(error = %e, user_id = %principal.id, "Failed to open session");
                    AccountError::from(e)
                })?;

                tracing::info!(user_id = %principal.id, "Login succeeded");
                Ok(LoginSuccess { token, principal })
            }
            AuthenticationOutcome::Rejected(reason) => {
                tracing::info!(username = %username, reason = reason.as_str(), "Login rejected");
                Err(AccountError::AuthenticationFailed)
            }
        }
    }

    async fn logout(&self, token: &str) -> Result<(), AccountError> {
        let Ok(token) = SessionToken::parse(token) else {
            tracing::debug!("Logout with malformed token ignored");
            return Ok(());
        };

        self.sessions.invalidate(&token).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to invalidate session");
            AccountError::from(e)
        })
    }

    async fn resolve_identity(&self, token: Option<&str>) -> Result<Identity, AccountError> {
        let token = token.and_then(|raw| SessionToken::parse(raw).ok());

        self.resolver.resolve(token.as_ref()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to resolve identity");
            AccountError::from(e)
        })
    }
}
