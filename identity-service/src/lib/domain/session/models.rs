use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::UserId;

/// Server-held binding from a token digest to a user.
///
/// Holds only the user id, never anything derived from the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session at `now`, expiring after `ttl` if one is given.
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - `now + ttl` is not a representable instant
    pub fn begin(
        user_id: UserId,
        now: DateTime<Utc>,
        ttl: Option<Duration>,
    ) -> Result<Self, SessionError> {
        let expires_at = match ttl {
            Some(ttl) => Some(
                now.checked_add_signed(ttl)
                    .ok_or(SessionError::LifetimeOutOfRange)?,
            ),
            None => None,
        };

        Ok(Self {
            user_id,
            created_at: now,
            expires_at,
        })
    }

    /// A session is expired from its expiry instant onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_without_ttl_never_expires() {
        let now = Utc::now();
        let session = Session::begin(UserId::new(), now, None).unwrap();

        assert_eq!(session.expires_at, None);
        assert!(!session.is_expired(now + Duration::days(3650)));
    }

    #[test]
    fn test_session_expires_at_deadline() {
        let now = Utc::now();
        let session = Session::begin(UserId::new(), now, Some(Duration::hours(1))).unwrap();

        assert!(!session.is_expired(now + Duration::minutes(59)));
        assert!(session.is_expired(now + Duration::hours(1)));
        assert!(session.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn test_session_lifetime_past_calendar_range_is_rejected() {
        let ttl = Duration::hours(9_000_000_000);
        let result = Session::begin(UserId::new(), Utc::now(), Some(ttl));
        assert_eq!(result, Err(SessionError::LifetimeOutOfRange));
    }
}
