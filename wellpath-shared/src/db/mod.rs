/// Database layer
///
/// - [`pool`]: PostgreSQL connection pool with health check
/// - [`migrations`]: embedded SQL migrations

pub mod migrations;
pub mod pool;

pub use migrations::run_migrations;
pub use pool::{create_pool, health_check, DatabaseConfig};
