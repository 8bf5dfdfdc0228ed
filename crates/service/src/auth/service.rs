use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::domain::{AuthSession, AuthUser, LoginInput, PasswordResetInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

/// Bearer token claims: subject username plus expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: None, token_ttl_hours: 12 });
    /// let input = RegisterInput { username: "reader".into(), email: "reader@example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "reader");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        let hash = hash_password(&input.password)?;
        // No pre-read: the unique indexes make this insert the duplicate check.
        let user = self.repo.create_user(&input.username, &input.email, &hash).await?;
        info!(user_id = user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: Some("secret".into()), token_ttl_hours: 12 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "u");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let stored = self
            .repo
            .get_password_hash(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&stored).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours))
                .timestamp() as usize;
            let claims = Claims { sub: user.username.clone(), exp };
            token = Some(
                encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
                    .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        Ok(AuthSession { user, token })
    }

    /// Overwrite the stored hash for the named user. No proof of identity is
    /// required; the wire contract only reports whether the user exists.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn reset_password(&self, input: PasswordResetInput) -> Result<(), AuthError> {
        let user = self
            .repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::NotFound)?;
        if input.new_password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        let hash = hash_password(&input.new_password)?;
        self.repo.set_password_hash(user.id, hash).await?;
        info!(user_id = user.id, username = %user.username, "password_reset");
        Ok(())
    }

    /// Resolve a bearer token back to the stored user it was issued for.
    pub async fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let secret = self
            .cfg
            .jwt_secret
            .as_ref()
            .ok_or_else(|| AuthError::TokenError("jwt secret not configured".into()))?;
        let key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data =
            decode::<Claims>(token, &key, &validation).map_err(|_| AuthError::Unauthorized)?;
        self.repo
            .find_user_by_username(&data.claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}
