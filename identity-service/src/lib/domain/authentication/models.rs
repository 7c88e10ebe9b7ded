use crate::domain::user::models::Principal;

/// The single decision produced for one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    Authenticated(Principal),
    Rejected(RejectionReason),
}

/// Why a login was rejected. For audit logging only; callers outside the
/// service see one undifferentiated failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    UnknownUsername,
    WrongPassword,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::UnknownUsername => "unknown_username",
            RejectionReason::WrongPassword => "wrong_password",
        }
    }
}
