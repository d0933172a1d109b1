/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use wellpath_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = wellpath_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use wellpath_shared::auth::{jwt, middleware::AuthContext};

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; Arc keeps the clone
/// cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router
///
/// # Routes
///
/// ```text
/// /
/// ├── /health                                  # public
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register                   # public
///     │   └── POST /login                      # public
///     ├── /patient/
///     │   └── POST /test                       # public (test seeding)
///     ├── /profile                             # bearer
///     │   ├── GET  /
///     │   └── PUT  /
///     ├── /goals                               # bearer
///     │   ├── POST /                           # patient
///     │   ├── GET  /                           # patient
///     │   ├── PUT  /:goal_id                   # patient
///     │   ├── GET  /patients                   # provider
///     │   └── PUT  /patient/:patient_id/:goal_id  # provider
///     └── /tips
///         └── GET  /                           # bearer, patient
/// ```
///
/// Protected routes share one JWT layer; role checks live in the
/// handlers.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Unauthenticated patient seeding route
    let patient_routes = Router::new().route("/test", post(routes::patients::create_test_patient));

    // Profile routes (require bearer token)
    let profile_routes = Router::new()
        .route(
            "/",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Goal routes (require bearer token; role checks in handlers)
    let goal_routes = Router::new()
        .route(
            "/",
            post(routes::goals::create_goal).get(routes::goals::list_goals),
        )
        .route("/patients", get(routes::goals::list_patient_goals))
        .route(
            "/patient/:patient_id/:goal_id",
            put(routes::goals::update_goal_status),
        )
        .route("/:goal_id", put(routes::goals::update_goal))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Tip routes (require bearer token, patient role)
    let tip_routes = Router::new()
        .route("/", get(routes::tips::random_tip))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/patient", patient_routes)
        .nest("/profile", profile_routes)
        .nest("/goals", goal_routes)
        .nest("/tips", tip_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authorization gate
///
/// Extracts and validates the bearer token, then injects [`AuthContext`]
/// into request extensions for handlers to consume.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Not authorized, no token".to_string())
        })?;

    let token = wellpath_shared::auth::middleware::extract_bearer(auth_header)?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
