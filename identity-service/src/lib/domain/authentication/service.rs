use std::sync::Arc;
use std::time::Duration;

use auth::CredentialCheck;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::AuthenticationOutcome;
use crate::domain::authentication::models::RejectionReason;
use crate::domain::timeout::bounded;
use crate::domain::user::hashing::PasswordWorkers;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Principal;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;

/// Decides one login attempt: look the user up, verify the password.
///
/// Holds no state between calls. Unknown usernames still pay for a full
/// password verification so both rejection paths take comparable time.
pub struct AuthenticationStrategy<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    workers: PasswordWorkers,
    store_timeout: Duration,
}

impl<CS> AuthenticationStrategy<CS>
where
    CS: CredentialStore,
{
    pub fn new(store: Arc<CS>, workers: PasswordWorkers, store_timeout: Duration) -> Self {
        Self {
            store,
            workers,
            store_timeout,
        }
    }

    /// Verify credentials.
    ///
    /// # Returns
    /// `Authenticated` with the user's principal, or `Rejected` with the
    /// internal reason
    ///
    /// # Errors
    /// * `Store` - Credential lookup failed or timed out
    /// * `Hashing` - Password verification could not run
    pub async fn verify(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticationOutcome, AuthenticationError> {
        let Credentials { username, password } = credentials;

        let user = bounded(
            self.store_timeout,
            "find_by_username",
            self.store.find_by_username(&username),
            UserError::StoreUnavailable,
        )
        .await?;

        let outcome = match user {
            Some(user) => {
                let check = self
                    .workers
                    .check(password, Some(user.password_hash.clone()))
                    .await?;

                match check {
                    CredentialCheck::Match => {
                        AuthenticationOutcome::Authenticated(Principal::from(user))
                    }
                    CredentialCheck::Mismatch | CredentialCheck::UnknownAccount => {
                        AuthenticationOutcome::Rejected(RejectionReason::WrongPassword)
                    }
                }
            }
            None => {
                self.workers.check(password, None).await?;
                AuthenticationOutcome::Rejected(RejectionReason::UnknownUsername)
            }
        };

        Ok(outcome)
    }
}
