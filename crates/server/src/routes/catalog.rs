use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use models::{magazine, plan};
use service::catalog;

#[derive(Debug, Deserialize)]
pub struct CreateMagazineInput {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanInput {
    pub magazine_id: i32,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
}

#[utoipa::path(get, path = "/magazines", tag = "catalog", responses((status = 200, description = "All magazines")))]
pub async fn list_magazines(
    State(state): State<ServerState>,
) -> Result<Json<Vec<magazine::Model>>, ApiError> {
    Ok(Json(catalog::list_magazines(&state.db).await?))
}

#[utoipa::path(post, path = "/magazines/", tag = "catalog", request_body = crate::openapi::CreateMagazineRequest, responses((status = 200, description = "Created"), (status = 400, description = "Magazine with this title already exists")))]
pub async fn create_magazine(
    State(state): State<ServerState>,
    Json(input): Json<CreateMagazineInput>,
) -> Result<Json<magazine::Model>, ApiError> {
    let created = catalog::create_magazine(&state.db, &input.title, &input.description).await?;
    Ok(Json(created))
}

#[utoipa::path(post, path = "/plans/", tag = "catalog", request_body = crate::openapi::CreatePlanRequest, responses((status = 200, description = "Created"), (status = 400, description = "Invalid price or discount"), (status = 404, description = "Magazine not found")))]
pub async fn create_plan(
    State(state): State<ServerState>,
    Json(input): Json<CreatePlanInput>,
) -> Result<Json<plan::Model>, ApiError> {
    let created = catalog::create_plan(
        &state.db,
        input.magazine_id,
        &input.name,
        input.price,
        input.discount,
    )
    .await?;
    Ok(Json(created))
}
