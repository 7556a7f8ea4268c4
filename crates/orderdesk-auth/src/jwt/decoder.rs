//! JWT token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};

use orderdesk_core::config::AuthConfig;
use orderdesk_core::error::AppError;

use super::claims::{Claims, RawClaims};
use super::signing_algorithm;

/// Validates JWT signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let mut validation = Validation::new(signing_algorithm(&config.jwt_algorithm)?);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Fails with `Unauthorized` on a bad signature, an elapsed expiry, or a
    /// missing subject. Access and refresh tokens are both accepted.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<RawClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized("Could not validate credentials"),
                }
            })?;

        let raw = token_data.claims;
        let sub = raw
            .sub
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::unauthorized("Token has no subject"))?;

        Ok(Claims {
            sub,
            iat: raw.iat,
            exp: raw.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    use orderdesk_core::error::ErrorKind;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config("round-trip-secret");
        let encoder = JwtEncoder::new(&cfg).unwrap();
        let decoder = JwtDecoder::new(&cfg).unwrap();

        let issued = encoder.issue_access("ann@example.com").unwrap();
        let claims = decoder.verify(&issued.token).unwrap();
        assert_eq!(claims.subject(), "ann@example.com");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_refresh_outlives_access() {
        let cfg = config("pair-secret");
        let pair = JwtEncoder::new(&cfg).unwrap().issue_pair("bo@example.com").unwrap();
        assert!(pair.refresh_expires_at > pair.access_expires_at);

        let decoder = JwtDecoder::new(&cfg).unwrap();
        assert_eq!(decoder.verify(&pair.refresh_token).unwrap().sub, "bo@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("expiry-secret");
        let encoder = JwtEncoder::new(&cfg).unwrap();
        let decoder = JwtDecoder::new(&cfg).unwrap();

        let issued = encoder.issue("ann@example.com", Duration::seconds(-60)).unwrap();
        let err = decoder.verify(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_just_expired_token_rejected() {
        let cfg = config("expiry-secret");
        let encoder = JwtEncoder::new(&cfg).unwrap();
        let decoder = JwtDecoder::new(&cfg).unwrap();

        for secs in 1..=4 {
            let issued = encoder.issue("e@x.com", Duration::seconds(-secs)).unwrap();
            let err = decoder.verify(&issued.token).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized, "ttl -{secs}s");
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtEncoder::new(&config("secret-a"))
            .unwrap()
            .issue_access("ann@example.com")
            .unwrap();
        let err = JwtDecoder::new(&config("secret-b"))
            .unwrap()
            .verify(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_missing_subject_rejected() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let cfg = config("no-sub-secret");
        let token = encode(
            &Header::default(),
            &NoSubject {
                exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            },
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = JwtDecoder::new(&cfg).unwrap().verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_garbage_rejected() {
        let decoder = JwtDecoder::new(&config("garbage-secret")).unwrap();
        assert!(decoder.verify("not.a.jwt").is_err());
        assert!(decoder.verify("").is_err());
    }
}
