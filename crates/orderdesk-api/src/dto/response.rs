//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderdesk_entity::order::OrderDetail;
use orderdesk_service::SignedIn;

/// Token scheme reported to clients.
pub const TOKEN_TYPE: &str = "bearer";

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Wraps `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Signup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Confirmation text.
    pub message: String,
    /// ID of the new user.
    pub user_id: Uuid,
}

/// Identity echoed back with a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    /// User ID; only present on signin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Subject email.
    pub email: String,
}

/// Nested refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenBody {
    /// The refresh token itself.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

/// Token response for signin and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Identity the tokens were issued for.
    pub data: TokenData,
    /// Long-lived refresh token.
    pub refresh_token: RefreshTokenBody,
}

impl TokenResponse {
    /// Signin shape: `data` carries `user_id` and `email`.
    pub fn signin(signed_in: SignedIn) -> Self {
        let user_id = Some(signed_in.user.id);
        Self::build(signed_in, user_id)
    }

    /// Refresh shape: `data` carries only `email`.
    pub fn refresh(signed_in: SignedIn) -> Self {
        Self::build(signed_in, None)
    }

    fn build(signed_in: SignedIn, user_id: Option<Uuid>) -> Self {
        Self {
            access_token: signed_in.tokens.access_token,
            token_type: TOKEN_TYPE.to_string(),
            data: TokenData {
                user_id,
                email: signed_in.user.email,
            },
            refresh_token: RefreshTokenBody {
                access_token: signed_in.tokens.refresh_token,
                token_type: TOKEN_TYPE.to_string(),
            },
        }
    }
}

/// Cancel response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    /// Confirmation text.
    pub message: String,
    /// The cancelled order.
    pub order: OrderDetail,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Version.
    pub version: String,
}
