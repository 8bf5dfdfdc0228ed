use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use common::types::Message;
use service::auth::domain::{AuthUser, LoginInput, PasswordResetInput, RegisterInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Serialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
}

/// Auth service wired to the request's store handle.
fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    let repo = Arc::new(SeaOrmAuthRepository { db: state.db.clone() });
    AuthService::new(
        repo,
        AuthConfig {
            jwt_secret: Some(state.auth.jwt_secret.clone()),
            token_ttl_hours: state.auth.token_ttl_hours,
        },
    )
}

/// Resolve the caller from the `Authorization: Bearer` header. Used by the
/// endpoints that enforce ownership.
pub async fn current_user(state: &ServerState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let authz = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;
    let token = authz
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("invalid authorization header (expect Bearer)"))?;
    Ok(auth_service(state).verify_token(token).await?)
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Username already registered")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, ApiError> {
    let user = auth_service(&state).register(input).await?;
    Ok(Json(RegisterOutput { username: user.username, email: user.email }))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Incorrect username or password")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    let session = auth_service(&state).login(input).await?;
    match session.token {
        Some(access_token) => Ok(Json(LoginOutput { access_token, token_type: "bearer".into() })),
        None => Err(ApiError::internal("token generation failed")),
    }
}

#[utoipa::path(post, path = "/reset-password", tag = "auth", request_body = crate::openapi::PasswordResetRequest, responses((status = 200, description = "Password reset"), (status = 404, description = "User not found")))]
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(input): Json<PasswordResetInput>,
) -> Result<Json<Message>, ApiError> {
    auth_service(&state).reset_password(input).await?;
    Ok(Json(Message { msg: "Password reset successful".into() }))
}

#[utoipa::path(get, path = "/users", tag = "auth", responses((status = 200, description = "All users")))]
pub async fn list_users(
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = models::user::list_all(&state.db)
        .await?
        .into_iter()
        .map(|u| UserSummary { username: u.username, email: u.email })
        .collect();
    Ok(Json(users))
}
