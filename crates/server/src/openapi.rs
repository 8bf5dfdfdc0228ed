use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct PasswordResetRequest {
    pub username: String,
    pub new_password: String,
}

#[derive(ToSchema)]
pub struct CreateMagazineRequest {
    pub title: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct CreatePlanRequest {
    pub magazine_id: i32,
    pub name: String,
    pub price: f64,
    pub discount: Option<f64>,
}

#[derive(ToSchema)]
pub struct CreateSubscriptionRequest {
    pub user_id: i32,
    pub plan_id: i32,
    pub active: Option<bool>,
}

#[derive(ToSchema)]
pub struct UpdateSubscriptionRequest {
    pub plan_id: Option<i32>,
    pub active: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::reset_password,
        crate::routes::auth::list_users,
        crate::routes::catalog::list_magazines,
        crate::routes::catalog::create_magazine,
        crate::routes::catalog::create_plan,
        crate::routes::subscriptions::create_subscription,
        crate::routes::subscriptions::list_user_subscriptions,
        crate::routes::subscriptions::update_subscription,
        crate::routes::subscriptions::delete_subscription,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            PasswordResetRequest,
            CreateMagazineRequest,
            CreatePlanRequest,
            CreateSubscriptionRequest,
            UpdateSubscriptionRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "subscriptions")
    )
)]
pub struct ApiDoc;
