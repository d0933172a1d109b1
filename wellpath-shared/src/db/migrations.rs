/// Embedded SQL migrations
///
/// Migrations live in the workspace-level `migrations/` directory and are
/// compiled into the binary with `sqlx::migrate!`, so a fresh database is
/// schema-complete after startup with no external tooling.
use sqlx::PgPool;
use tracing::info;

/// Runs all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}
