//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;

use std::str::FromStr;

use jsonwebtoken::Algorithm;

use orderdesk_core::error::AppError;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder, TokenPair};

/// Parses the configured signing algorithm. Only the HMAC family is accepted
/// since tokens are signed with a shared secret.
pub(crate) fn signing_algorithm(name: &str) -> Result<Algorithm, AppError> {
    let algorithm = Algorithm::from_str(name)
        .map_err(|_| AppError::configuration(format!("Unknown JWT algorithm: {name}")))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(AppError::configuration(format!(
            "JWT algorithm {other:?} is not supported; use HS256, HS384 or HS512"
        ))),
    }
}
