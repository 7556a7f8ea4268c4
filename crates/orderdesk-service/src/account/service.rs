//! Account operations: registration, credential signin, and token refresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::ValidateEmail;

use orderdesk_auth::identity::IdentityResolver;
use orderdesk_auth::jwt::{JwtEncoder, TokenPair};
use orderdesk_auth::password::{PasswordHasher, PasswordValidator};
use orderdesk_core::error::{AppError, ErrorKind};
use orderdesk_database::UserStore;
use orderdesk_entity::user::{CreateUser, User};

/// Minimum display name length.
const NAME_MIN_LENGTH: usize = 3;

/// Data for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Email address; stored trimmed and lowercased.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// A user together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// The authenticated user.
    pub user: User,
    /// Access and refresh tokens for `user`.
    pub tokens: TokenPair,
}

/// Handles account registration and token issuance.
#[derive(Clone)]
pub struct AccountService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
    /// Token signer.
    encoder: JwtEncoder,
    /// Bearer token and credential resolver.
    identity: IdentityResolver,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("validator", &self.validator)
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        validator: PasswordValidator,
        encoder: JwtEncoder,
        identity: IdentityResolver,
    ) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator,
            encoder,
            identity,
        }
    }

    /// Registers a regular, active, non-admin user.
    ///
    /// Fails with `Validation` on bad input and with `Conflict` when the
    /// email is already registered.
    pub async fn signup(&self, req: SignupRequest) -> Result<User, AppError> {
        let name = req.name.trim().to_string();
        let email = normalize_email(&req.email);

        if name.chars().count() < NAME_MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Name must be at least {NAME_MIN_LENGTH} characters long"
            )));
        }
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser::regular(name, email, hash))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::conflict("Email already registered"),
                _ => e,
            })?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues an access/refresh pair.
    pub async fn signin(&self, email: &str, password: &str) -> Result<SignedIn, AppError> {
        let user = self
            .identity
            .authenticate(&normalize_email(email), password)
            .await?;
        let tokens = self.encoder.issue_pair(&user.email)?;

        info!(user_id = %user.id, "User signed in");
        Ok(SignedIn { user, tokens })
    }

    /// Exchanges a valid token for a new access/refresh pair.
    ///
    /// The account's active flag is not consulted.
    pub async fn refresh(&self, token: &str) -> Result<SignedIn, AppError> {
        let user = self
            .identity
            .resolve(token)
            .await
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;
        let tokens = self.encoder.issue_pair(&user.email)?;

        info!(user_id = %user.id, "Tokens refreshed");
        Ok(SignedIn { user, tokens })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
