use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};


/// Fresh in-memory SQLite database with the full schema applied. A single
/// pool connection keeps the memory store alive for the test's duration.
pub async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
