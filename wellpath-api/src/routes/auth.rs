/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register a new account (patient by default)
/// - `POST /api/auth/login` - Login and get a bearer token
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wellpath_shared::{
    auth::{jwt, password},
    models::account::{Account, CreateAccount, Role},
};

/// Register request
///
/// Role-specific fields are optional; which of them are honored depends
/// on the resolved role.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password (hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional role string; absent defaults to "patient".
    /// Unrecognized values are rejected rather than silently defaulted.
    pub role: Option<String>,

    /// Patient: age in years
    pub age: Option<i32>,

    /// Patient: allergy strings
    pub allergies: Option<Vec<String>>,

    /// Patient: current medication strings
    pub current_medications: Option<Vec<String>>,

    /// Provider: specialty
    pub specialty: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Resolves the optional role string from a register body
///
/// Absent means patient. Anything other than "patient"/"provider" is a
/// 400: the original silently defaulted unknown roles to patient, which
/// hid client typos behind the wrong account type.
fn resolve_role(role: Option<&str>) -> Result<Role, ApiError> {
    match role {
        None => Ok(Role::Patient),
        Some("patient") => Ok(Role::Patient),
        Some("provider") => Ok(Role::Provider),
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unrecognized role: {}",
            other
        ))),
    }
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "jane.doe@example.com",
///   "password": "password123",
///   "role": "provider",
///   "specialty": "Cardiology"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, unrecognized role, or email
///   already registered
/// - `500 Internal Server Error`: server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let role = resolve_role(req.role.as_deref())?;

    // Check first so the common case gets a clean message; the unique
    // index still catches the concurrent-register race.
    if Account::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            name: req.name,
            email: req.email,
            password_hash,
            role,
            age: match role {
                Role::Patient => req.age,
                Role::Provider => None,
            },
            allergies: match role {
                Role::Patient => req.allergies.unwrap_or_default(),
                Role::Provider => Vec::new(),
            },
            medications: match role {
                Role::Patient => req.current_medications.unwrap_or_default(),
                Role::Provider => Vec::new(),
            },
            specialty: match role {
                Role::Patient => None,
                Role::Provider => req.specialty,
            },
        },
    )
    .await?;

    let claims = jwt::Claims::new(account.id, account.role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(account_id = %account.id, role = role.as_str(), "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            token,
        }),
    ))
}

/// Login an existing account
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "jane.doe@example.com",
///   "password": "password123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid credentials
/// - `500 Internal Server Error`: server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    // Same response for unknown email and wrong password
    let account = Account::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&req.password, &account.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid credentials".to_string()));
    }

    let claims = jwt::Claims::new(account.id, account.role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_role_defaults_to_patient() {
        assert_eq!(resolve_role(None).unwrap(), Role::Patient);
    }

    #[test]
    fn test_resolve_role_known_values() {
        assert_eq!(resolve_role(Some("patient")).unwrap(), Role::Patient);
        assert_eq!(resolve_role(Some("provider")).unwrap(), Role::Provider);
    }

    #[test]
    fn test_resolve_role_rejects_unknown() {
        assert!(matches!(
            resolve_role(Some("admin")),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            resolve_role(Some("Patient")), // case-sensitive
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            name: "Jane".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: None,
            age: None,
            allergies: None,
            current_medications: None,
            specialty: None,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
