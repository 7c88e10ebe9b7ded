pub mod errors;
pub mod issuer;

pub use errors::TokenError;
pub use issuer::SessionToken;
pub use issuer::TokenDigest;
pub use issuer::TokenIssuer;
