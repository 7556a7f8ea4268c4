//! Identity resolution against the user store.

use std::sync::Arc;

use tracing::debug;

use orderdesk_core::error::AppError;
use orderdesk_database::UserStore;
use orderdesk_entity::user::User;

use crate::jwt::JwtDecoder;
use crate::password::PasswordHasher;

/// Turns a bearer token or an email/password pair into a [`User`].
#[derive(Clone)]
pub struct IdentityResolver {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    /// Creates a resolver over the given decoder and user store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self {
            decoder,
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Verifies `token` and loads the user named by its subject.
    pub async fn resolve(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decoder.verify(token)?;

        self.users
            .find_by_email(claims.subject())
            .await?
            .ok_or_else(|| {
                debug!("Token subject does not match any user");
                AppError::unauthorized("Could not validate credentials")
            })
    }

    /// Like [`resolve`](Self::resolve), but also rejects deactivated users.
    pub async fn resolve_active(&self, token: &str) -> Result<User, AppError> {
        let user = self.resolve(token).await?;
        if !user.is_active() {
            return Err(AppError::inactive_user("Inactive user"));
        }
        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use orderdesk_core::config::AuthConfig;
    use orderdesk_core::error::ErrorKind;
    use orderdesk_database::MemoryStore;
    use orderdesk_entity::user::CreateUser;

    use super::*;
    use crate::jwt::JwtEncoder;

    async fn setup() -> (IdentityResolver, JwtEncoder, MemoryStore) {
        let config = AuthConfig::default();
        let store = MemoryStore::new();
        let hash = PasswordHasher::new().hash_password("abcd1234").unwrap();
        UserStore::create(
            &store,
            &CreateUser::regular("Ann Smith".into(), "ann@example.com".into(), hash),
        )
        .await
        .unwrap();

        let resolver = IdentityResolver::new(
            JwtDecoder::new(&config).unwrap(),
            Arc::new(store.clone()),
        );
        (resolver, JwtEncoder::new(&config).unwrap(), store)
    }

    #[tokio::test]
    async fn test_resolve_token() {
        let (resolver, encoder, _) = setup().await;
        let token = encoder.issue_access("ann@example.com").unwrap().token;
        let user = resolver.resolve(&token).await.unwrap();
        assert_eq!(user.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (resolver, encoder, _) = setup().await;
        let token = encoder.issue_access("ghost@example.com").unwrap().token;
        let err = resolver.resolve(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_inactive_user() {
        let (resolver, encoder, store) = setup().await;
        let user = store.find_by_email("ann@example.com").await.unwrap().unwrap();
        store.set_active(user.id, false).await.unwrap();

        let token = encoder.issue_access("ann@example.com").unwrap().token;
        assert!(resolver.resolve(&token).await.is_ok());
        let err = resolver.resolve_active(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InactiveUser);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let (resolver, _, _) = setup().await;
        assert!(resolver.authenticate("ann@example.com", "abcd1234").await.is_ok());

        let wrong = resolver
            .authenticate("ann@example.com", "nope1234")
            .await
            .unwrap_err();
        let missing = resolver
            .authenticate("bob@example.com", "abcd1234")
            .await
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, missing.message);
    }
}
