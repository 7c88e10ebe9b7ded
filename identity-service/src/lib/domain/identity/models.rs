use crate::domain::user::models::Principal;

/// Who is behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(Principal),
    Anonymous,
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Identity::User(principal) => Some(principal),
            Identity::Anonymous => None,
        }
    }
}
