use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod auth;
pub mod catalog;
pub mod subscriptions;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome message")))]
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the Magazine Subscription Service" }))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service healthy")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: docs, liveness, and the REST surface.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/magazines", get(catalog::list_magazines))
        .route("/magazines/", post(catalog::create_magazine))
        .route("/plans/", post(catalog::create_plan))
        .route("/users", get(auth::list_users))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/reset-password", post(auth::reset_password))
        .route("/subscriptions/", post(subscriptions::create_subscription))
        // One pattern, three meanings: GET reads by user id, PUT/DELETE
        // address the subscription id.
        .route(
            "/subscriptions/:id",
            get(subscriptions::list_user_subscriptions)
                .put(subscriptions::update_subscription)
                .delete(subscriptions::delete_subscription),
        )
        .with_state(state);

    let swagger =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    Router::new()
        .merge(swagger)
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
