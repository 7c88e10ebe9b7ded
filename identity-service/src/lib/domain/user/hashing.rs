use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::CredentialCheck;
use auth::HashedPassword;
use tokio::sync::Semaphore;

use crate::domain::user::models::Password;
use crate::user::errors::HashingError;

/// Runs Argon2 work on Tokio's blocking pool.
///
/// At most `max_concurrent` hashes are in flight; further callers queue on the
/// semaphore. A permit is held until the hash actually finishes, even when the
/// caller has already given up on it.
#[derive(Clone)]
pub struct PasswordWorkers {
    authenticator: Arc<Authenticator>,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl PasswordWorkers {
    pub fn new(authenticator: Authenticator, max_concurrent: usize, timeout: Duration) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            timeout,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `Failed` - Argon2 rejected the input
    /// * `TimedOut` - No result within the configured deadline
    /// * `WorkerLost` - Blocking task panicked or was cancelled
    pub async fn hash(&self, password: Password) -> Result<HashedPassword, HashingError> {
        self.run(move |authenticator| authenticator.hash_password(password.expose()))
            .await
    }

    /// Check a password against a stored hash, or against the decoy when
    /// there is no account.
    pub async fn check(
        &self,
        password: Password,
        stored_hash: Option<HashedPassword>,
    ) -> Result<CredentialCheck, HashingError> {
        self.run(move |authenticator| authenticator.check(password.expose(), stored_hash.as_ref()))
            .await
    }

    async fn run<T, F>(&self, job: F) -> Result<T, HashingError>
    where
        T: Send + 'static,
        F: FnOnce(&Authenticator) -> Result<T, auth::PasswordError> + Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        let permits = Arc::clone(&self.permits);

        let work = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| HashingError::WorkerLost(e.to_string()))?;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job(authenticator.as_ref())
            })
            .await
            .map_err(|e| HashingError::WorkerLost(e.to_string()))?
            .map_err(|e| HashingError::Failed(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Password hashing timed out"
                );
                Err(HashingError::TimedOut(self.timeout.as_millis()))
            }
        }
    }

    /// Take every idle permit so further jobs queue until the guard drops.
    #[cfg(test)]
    pub(crate) async fn occupy_all(&self) -> tokio::sync::OwnedSemaphorePermit {
        let idle = self.permits.available_permits() as u32;
        Arc::clone(&self.permits)
            .acquire_many_owned(idle)
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use auth::HashingCost;

    use super::*;

    fn workers(timeout: Duration) -> PasswordWorkers {
        let authenticator = Authenticator::new(HashingCost {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        PasswordWorkers::new(authenticator, 2, timeout)
    }

    fn password(value: &str) -> Password {
        Password::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_check() {
        let workers = workers(Duration::from_secs(10));

        let hash = workers.hash(password("secret")).await.unwrap();
        assert_ne!(hash.as_phc(), "secret");

        let matched = workers
            .check(password("secret"), Some(hash.clone()))
            .await
            .unwrap();
        assert_eq!(matched, CredentialCheck::Match);

        let mismatched = workers.check(password("other"), Some(hash)).await.unwrap();
        assert_eq!(mismatched, CredentialCheck::Mismatch);
    }

    #[tokio::test]
    async fn test_check_without_account() {
        let workers = workers(Duration::from_secs(10));

        let result = workers.check(password("secret"), None).await.unwrap();
        assert_eq!(result, CredentialCheck::UnknownAccount);
    }

    #[tokio::test]
    async fn test_many_hashes_share_bounded_pool() {
        let workers = workers(Duration::from_secs(30));

        let jobs = (0..8).map(|i| {
            let workers = workers.clone();
            async move { workers.hash(password(&format!("secret-{}", i))).await }
        });
        let results = futures::future::join_all(jobs).await;

        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn test_saturated_pool_times_out() {
        let workers = workers(Duration::from_millis(50));
        let _held = workers.occupy_all().await;

        let result = workers.hash(password("secret")).await;
        assert!(matches!(result, Err(HashingError::TimedOut(50))));
    }
}
