use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of entropy in a session token.
const TOKEN_BYTES: usize = 32;

/// Length of a token once base64url-encoded without padding.
const TOKEN_ENCODED_LEN: usize = 43;

/// Opaque session token handed to the client.
///
/// Carries no user data. `Debug` is redacted so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Parse a token presented by a client.
    ///
    /// # Errors
    /// * `Malformed` - Not a token this issuer could have produced
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let well_formed = raw.len() == TOKEN_ENCODED_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if well_formed {
            Ok(Self(raw.to_string()))
        } else {
            Err(TokenError::Malformed)
        }
    }

    /// Token string for transport (cookie or response body).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Keyed digest of a session token; the only form that is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues unguessable session tokens and derives their storage digests.
///
/// Tokens are 256 bits from the OS CSPRNG. Digests are HMAC-SHA256 under the
/// session secret, so a leaked session table cannot be replayed as cookies.
#[derive(Clone)]
pub struct TokenIssuer {
    mac: HmacSha256,
}

impl TokenIssuer {
    /// Minimum secret length accepted, in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Create an issuer keyed with the session secret.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret {
                min: Self::MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        let mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::WeakSecret {
            min: Self::MIN_SECRET_LEN,
            actual: secret.len(),
        })?;

        Ok(Self { mac })
    }

    /// Generate a fresh token.
    pub fn issue(&self) -> SessionToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        SessionToken(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Storage digest of a token.
    pub fn digest(&self, token: &SessionToken) -> TokenDigest {
        let mut mac = self.mac.clone();
        mac.update(token.as_str().as_bytes());
        TokenDigest(hex::encode(mac.finalize().into_bytes()))
    }
}
