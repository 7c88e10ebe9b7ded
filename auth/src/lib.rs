//! Authentication utilities library
//!
//! Provides the credential primitives the identity service is built on:
//! - Password hashing (Argon2id, configurable cost)
//! - Session token issuing and keyed digests
//! - Credential checks that cost the same for unknown accounts
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue();
//! let digest = issuer.digest(&token);
//! assert_ne!(digest.as_str(), token.as_str());
//! ```
//!
//! ## Credential Check
//! ```
//! use auth::{Authenticator, CredentialCheck, HashingCost};
//!
//! let cost = HashingCost { memory_kib: 256, iterations: 1, parallelism: 1 };
//! let authenticator = Authenticator::new(cost).unwrap();
//!
//! let hash = authenticator.hash_password("password123").unwrap();
//! assert_eq!(
//!     authenticator.check("password123", Some(&hash)).unwrap(),
//!     CredentialCheck::Match
//! );
//! assert_eq!(
//!     authenticator.check("password123", None).unwrap(),
//!     CredentialCheck::UnknownAccount
//! );
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::CredentialCheck;
pub use password::HashedPassword;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionToken;
pub use token::TokenDigest;
pub use token::TokenError;
pub use token::TokenIssuer;
