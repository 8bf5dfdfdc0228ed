use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth};

async fn build_app() -> anyhow::Result<Router> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 12 },
    };
    Ok(routes::build_router(CorsLayer::very_permissive(), state))
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

/// Register a user and return (user_id, bearer token).
async fn register_and_login(app: &Router, username: &str) -> anyhow::Result<(i64, String)> {
    let email = format!("{username}@example.com");
    let (status, _) = request(
        app,
        "POST",
        "/register",
        Some(json!({"username": username, "email": email, "password": "S3curePass!"})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        app,
        "POST",
        "/login",
        Some(json!({"username": username, "password": "S3curePass!"})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    // /register does not return the id. On a fresh database ids are
    // assigned 1, 2, ... in registration order, which /users preserves.
    let (_, users) = request(app, "GET", "/users", None, None).await?;
    let user_id = users.as_array().unwrap().len() as i64;
    Ok((user_id, token))
}

/// Seed a magazine with one plan, returning (magazine_id, plan_id).
async fn seed_catalog(app: &Router, title: &str) -> anyhow::Result<(i64, i64)> {
    let (status, magazine) = request(
        app,
        "POST",
        "/magazines/",
        Some(json!({"title": title, "description": "A magazine"})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let magazine_id = magazine["id"].as_i64().unwrap();

    let (status, plan) = request(
        app,
        "POST",
        "/plans/",
        Some(json!({"magazine_id": magazine_id, "name": "Monthly Subscription", "price": 10.0})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let plan_id = plan["id"].as_i64().unwrap();
    Ok((magazine_id, plan_id))
}

#[tokio::test]
async fn root_and_health_respond() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = request(&app, "GET", "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Magazine Subscription Service");

    let (status, body) = request(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn magazine_creation_conflicts_on_title() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = request(&app, "GET", "/magazines", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    seed_catalog(&app, "Tech Monthly").await?;

    let (status, body) = request(
        &app,
        "POST",
        "/magazines/",
        Some(json!({"title": "Tech Monthly", "description": "Duplicate"})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (status, body) = request(&app, "GET", "/magazines", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn plan_requires_magazine_and_non_negative_numbers() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) = request(
        &app,
        "POST",
        "/plans/",
        Some(json!({"magazine_id": 42, "name": "Monthly", "price": 10.0})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (magazine_id, _) = seed_catalog(&app, "Science Weekly").await?;

    let (status, _) = request(
        &app,
        "POST",
        "/plans/",
        Some(json!({"magazine_id": magazine_id, "name": "Bad", "price": -5.0})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, plan) = request(
        &app,
        "POST",
        "/plans/",
        Some(json!({"magazine_id": magazine_id, "name": "Annual", "price": 99.0, "discount": 10.0})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["discount"], 10.0);
    Ok(())
}

#[tokio::test]
async fn subscription_creation_defaults_and_checks_references() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (user_id, _) = register_and_login(&app, "alice").await?;
    let (_, plan_id) = seed_catalog(&app, "History Digest").await?;

    let (status, _) = request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": user_id + 99, "plan_id": plan_id})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": user_id, "plan_id": plan_id + 99})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // `active` omitted: defaults to true
    let (status, sub) = request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": user_id, "plan_id": plan_id})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sub["active"], true);
    assert_eq!(sub["user_id"], user_id);
    assert_eq!(sub["plan_id"], plan_id);
    Ok(())
}

#[tokio::test]
async fn empty_subscription_listing_is_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (user_id, _) = register_and_login(&app, "bob").await?;
    let (_, plan_id) = seed_catalog(&app, "Nature Today").await?;

    let (status, _) = request(&app, "GET", &format!("/subscriptions/{user_id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": user_id, "plan_id": plan_id})),
        None,
    )
    .await?;

    let (status, body) = request(&app, "GET", &format!("/subscriptions/{user_id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn partial_update_leaves_omitted_fields_unchanged() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (user_id, _) = register_and_login(&app, "carol").await?;
    let (magazine_id, monthly_id) = seed_catalog(&app, "Cooking Weekly").await?;

    let (status, annual) = request(
        &app,
        "POST",
        "/plans/",
        Some(json!({"magazine_id": magazine_id, "name": "Annual", "price": 99.0})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let annual_id = annual["id"].as_i64().unwrap();

    let (_, sub) = request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": user_id, "plan_id": monthly_id})),
        None,
    )
    .await?;
    let sub_id = sub["id"].as_i64().unwrap();

    // Deactivate only; the plan must stay
    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/subscriptions/{sub_id}"),
        Some(json!({"active": false})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["plan_id"], monthly_id);
    assert_eq!(updated["active"], false);

    // Reassign the plan only; `active` must stay off. A null field counts
    // as omitted.
    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/subscriptions/{sub_id}"),
        Some(json!({"plan_id": annual_id, "active": null})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["plan_id"], annual_id);
    assert_eq!(updated["active"], false);

    let (status, _) = request(
        &app,
        "PUT",
        "/subscriptions/4242",
        Some(json!({"active": true})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/subscriptions/{sub_id}"),
        Some(json!({"plan_id": annual_id + 99})),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_requires_token_and_ownership() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (owner_id, owner_token) = register_and_login(&app, "dave").await?;
    let (_, intruder_token) = register_and_login(&app, "mallory").await?;
    let (_, plan_id) = seed_catalog(&app, "Travel Quarterly").await?;

    let (_, sub) = request(
        &app,
        "POST",
        "/subscriptions/",
        Some(json!({"user_id": owner_id, "plan_id": plan_id})),
        None,
    )
    .await?;
    let sub_id = sub["id"].as_i64().unwrap();

    // No token
    let (status, _) =
        request(&app, "DELETE", &format!("/subscriptions/{sub_id}"), None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/subscriptions/{sub_id}"),
        None,
        Some("not-a-token"),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Someone else's token: forbidden, row intact
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/subscriptions/{sub_id}"),
        None,
        Some(&intruder_token),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = request(&app, "GET", &format!("/subscriptions/{owner_id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);

    // Missing subscription with a valid token
    let (status, _) = request(
        &app,
        "DELETE",
        "/subscriptions/4242",
        None,
        Some(&owner_token),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Owner deletes
    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/subscriptions/{sub_id}"),
        None,
        Some(&owner_token),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Subscription deleted successfully");

    let (status, _) = request(&app, "GET", &format!("/subscriptions/{owner_id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
