//! Auth handlers: signup, token, refresh.

use axum::extract::State;
use axum::{Form, Json};

use crate::dto::request::{SigninForm, SignupBody, validate_body};
use crate::dto::response::{SignupResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::BearerToken;
use crate::state::AppState;

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> ApiResult<Json<SignupResponse>> {
    validate_body(&body)?;
    let user = state.accounts.signup(body.into()).await?;

    Ok(Json(SignupResponse {
        message: "User registered successfully!".to_string(),
        user_id: user.id,
    }))
}

/// POST /auth/token
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<SigninForm>,
) -> ApiResult<Json<TokenResponse>> {
    validate_body(&form)?;
    let signed_in = state.accounts.signin(&form.username, &form.password).await?;

    Ok(Json(TokenResponse::signin(signed_in)))
}

/// GET /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<TokenResponse>> {
    let signed_in = state.accounts.refresh(&token).await?;

    Ok(Json(TokenResponse::refresh(signed_in)))
}
