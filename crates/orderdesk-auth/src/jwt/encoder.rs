//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use orderdesk_core::config::AuthConfig;
use orderdesk_core::error::AppError;

use super::claims::Claims;
use super::signing_algorithm;

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Signing algorithm.
    algorithm: Algorithm,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm: signing_algorithm(&config.jwt_algorithm)?,
            access_ttl: i64::try_from(config.access_token_ttl_minutes)
                .ok()
                .and_then(Duration::try_minutes)
                .ok_or_else(|| AppError::configuration("Access token TTL is out of range"))?,
            refresh_ttl: i64::try_from(config.refresh_token_ttl_days)
                .ok()
                .and_then(Duration::try_days)
                .ok_or_else(|| AppError::configuration("Refresh token TTL is out of range"))?,
        })
    }

    /// Signs a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Signs a short-lived access token.
    pub fn issue_access(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue(subject, self.access_ttl)
    }

    /// Signs a long-lived refresh token.
    pub fn issue_refresh(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue(subject, self.refresh_ttl)
    }

    /// Generates a new access + refresh token pair for `subject`.
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AppError> {
        let access = self.issue_access(subject)?;
        let refresh = self.issue_refresh(subject)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }
}
