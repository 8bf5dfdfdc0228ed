use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use common::types::Message;
use models::subscription;
use service::subscription::{self as subscription_service, SubscriptionPatch};

use crate::errors::ApiError;
use crate::routes::auth::{self, ServerState};

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionInput {
    pub user_id: i32,
    pub plan_id: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update body; omitted and null fields leave the column unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubscriptionInput {
    pub plan_id: Option<i32>,
    pub active: Option<bool>,
}

#[utoipa::path(post, path = "/subscriptions/", tag = "subscriptions", request_body = crate::openapi::CreateSubscriptionRequest, responses((status = 200, description = "Created"), (status = 404, description = "User or plan not found")))]
pub async fn create_subscription(
    State(state): State<ServerState>,
    Json(input): Json<CreateSubscriptionInput>,
) -> Result<Json<subscription::Model>, ApiError> {
    let created = subscription_service::create_subscription(
        &state.db,
        input.user_id,
        input.plan_id,
        input.active,
    )
    .await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/subscriptions/{user_id}", tag = "subscriptions", params(("user_id" = i32, Path, description = "Owning user id")), responses((status = 200, description = "User subscriptions"), (status = 404, description = "No subscriptions found for this user")))]
pub async fn list_user_subscriptions(
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<subscription::Model>>, ApiError> {
    Ok(Json(subscription_service::list_user_subscriptions(&state.db, user_id).await?))
}

#[utoipa::path(put, path = "/subscriptions/{subscription_id}", tag = "subscriptions", params(("subscription_id" = i32, Path, description = "Subscription id")), request_body = crate::openapi::UpdateSubscriptionRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Subscription or plan not found")))]
pub async fn update_subscription(
    State(state): State<ServerState>,
    Path(subscription_id): Path<i32>,
    Json(input): Json<UpdateSubscriptionInput>,
) -> Result<Json<subscription::Model>, ApiError> {
    let patch = SubscriptionPatch { plan_id: input.plan_id, active: input.active };
    let updated =
        subscription_service::update_subscription(&state.db, subscription_id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/subscriptions/{subscription_id}", tag = "subscriptions", params(("subscription_id" = i32, Path, description = "Subscription id")), responses((status = 200, description = "Deleted"), (status = 401, description = "Missing or invalid bearer token"), (status = 403, description = "Subscription belongs to another user"), (status = 404, description = "Subscription not found")))]
pub async fn delete_subscription(
    State(state): State<ServerState>,
    Path(subscription_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<Message>, ApiError> {
    // Ownership is checked against the token's subject, not a request field
    let caller = auth::current_user(&state, &headers).await?;
    subscription_service::delete_subscription(&state.db, subscription_id, caller.id).await?;
    Ok(Json(Message { msg: "Subscription deleted successfully".into() }))
}
