//! # WellPath API Server
//!
//! REST backend for healthcare wellness tracking: registration and login,
//! role-specific profiles (patient | provider), per-patient goal tracking,
//! and random wellness tips.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/wellpath \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p wellpath-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellpath_api::{
    app::{build_router, AppState},
    config::Config,
};
use wellpath_shared::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellpath_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "WellPath API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = db::create_pool(db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    db::run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
