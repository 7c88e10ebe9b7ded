use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use crate::password::HashedPassword;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Outcome of comparing a presented password with what the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Account exists and the password matches.
    Match,
    /// Account exists and the password does not match.
    Mismatch,
    /// No account under that name.
    UnknownAccount,
}

/// Password checking that costs the same whether or not the account exists.
///
/// When no stored hash is supplied the password is still verified, against a
/// decoy hash minted at construction with the same cost, so the two rejection
/// paths cannot be told apart by latency.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    decoy: HashedPassword,
}

impl Authenticator {
    /// Create a new authenticator with the given hashing cost.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost parameters rejected by Argon2
    /// * `HashingFailed` - Decoy hash could not be produced
    pub fn new(cost: HashingCost) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::with_cost(cost)?;

        let mut filler = [0u8; 24];
        OsRng.fill_bytes(&mut filler);
        let decoy = password_hasher.hash(&hex::encode(filler))?;

        Ok(Self {
            password_hasher,
            decoy,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Compare a presented password with the stored hash, if any.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash could not be evaluated
    pub fn check(
        &self,
        password: &str,
        stored_hash: Option<&HashedPassword>,
    ) -> Result<CredentialCheck, PasswordError> {
        match stored_hash {
            Some(hash) => match self.password_hasher.verify(password, hash)? {
                true => Ok(CredentialCheck::Match),
                false => Ok(CredentialCheck::Mismatch),
            },
            None => {
                self.password_hasher.verify(password, &self.decoy)?;
                Ok(CredentialCheck::UnknownAccount)
            }
        }
    }
}
