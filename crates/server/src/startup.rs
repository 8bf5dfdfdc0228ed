use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(c) => (c.server.host.clone(), c.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate().ok();

    // DB connection; the pool is the one store handle every request borrows
    let db = match &cfg {
        Some(c) => models::db::connect_with_config(&c.database).await?,
        None => models::db::connect().await?,
    };

    // Bring the schema up before accepting traffic
    migration::Migrator::up(&db, None).await?;

    let jwt_secret = cfg
        .as_ref()
        .and_then(|c| c.auth.jwt_secret.clone())
        .or_else(|| env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| "dev-secret-change-me".to_string());
    let token_ttl_hours = cfg.as_ref().map(|c| c.auth.token_ttl_hours).unwrap_or(12);

    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret, token_ttl_hours },
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting subscription server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
