/// Common test utilities for integration tests
///
/// Shared infrastructure for driving the router end-to-end:
/// - test database setup (set `TEST_DATABASE_URL`; suites skip without it)
/// - account creation helpers
/// - JWT token generation
/// - request/response helpers
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;
use wellpath_api::app::{build_router, AppState};
use wellpath_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use wellpath_shared::auth::jwt::{create_token, Claims};
use wellpath_shared::auth::password::hash_password;
use wellpath_shared::models::account::{Account, CreateAccount, Role};

pub const TEST_JWT_SECRET: &str = "wellpath-test-secret-key-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "password123";

/// Test context holding the app, pool, and accounts created by this test
pub struct TestContext {
    pub db: sqlx::PgPool,
    pub app: axum::Router,
    pub config: Config,
    created_accounts: Vec<Uuid>,
}

impl TestContext {
    /// Creates a test context against `TEST_DATABASE_URL`
    ///
    /// Returns None when the variable is unset so suites can run without
    /// a database.
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set, skipping integration test");
                return None;
            }
        };

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let db = sqlx::PgPool::connect(&url)
            .await
            .expect("Should connect to test database");

        // Path relative to the crate's Cargo.toml
        sqlx::migrate!("../migrations")
            .run(&db)
            .await
            .expect("Should run migrations");

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Some(TestContext {
            db,
            app,
            config,
            created_accounts: Vec::new(),
        })
    }

    /// Generates a unique email for this test run
    pub fn unique_email(prefix: &str) -> String {
        format!("{}-{}@example.com", prefix, Uuid::new_v4())
    }

    /// Creates a patient account directly in the store
    pub async fn create_patient(&mut self) -> Account {
        let account = Account::create(
            &self.db,
            CreateAccount {
                name: "Test Patient".to_string(),
                email: Self::unique_email("patient"),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role: Role::Patient,
                age: Some(30),
                allergies: vec!["peanuts".to_string()],
                medications: vec![],
                specialty: None,
            },
        )
        .await
        .expect("Should create patient");

        self.created_accounts.push(account.id);
        account
    }

    /// Creates a provider account directly in the store
    pub async fn create_provider(&mut self) -> Account {
        let account = Account::create(
            &self.db,
            CreateAccount {
                name: "Test Provider".to_string(),
                email: Self::unique_email("provider"),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role: Role::Provider,
                age: None,
                allergies: vec![],
                medications: vec![],
                specialty: Some("Cardiology".to_string()),
            },
        )
        .await
        .expect("Should create provider");

        self.created_accounts.push(account.id);
        account
    }

    /// Records an account created through the HTTP surface for cleanup
    pub async fn track_email(&mut self, email: &str) {
        if let Some(account) = Account::find_by_email(&self.db, email).await.unwrap() {
            self.created_accounts.push(account.id);
        }
    }

    /// Issues a bearer token for an account
    pub fn token_for(&self, account: &Account) -> String {
        let claims = Claims::new(account.id, account.role);
        create_token(&claims, &self.config.jwt.secret).expect("Should create token")
    }

    /// Sends a request through the router and returns (status, json body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Deletes every account this test created
    pub async fn cleanup(&self) {
        for id in &self.created_accounts {
            let _ = Account::delete(&self.db, *id).await;
        }
    }
}
