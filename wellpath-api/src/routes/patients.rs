/// Patient seeding endpoint
///
/// Unauthenticated helper for creating a patient account directly,
/// bypassing registration. Returns the created profile instead of a
/// token.
///
/// # Endpoints
///
/// - `POST /api/patient/test` - Create a patient account
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use wellpath_shared::{
    auth::password,
    models::account::{Account, CreateAccount, ProfileView, Role},
};

/// Patient creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub allergies: Option<Vec<String>>,
    pub current_medications: Option<Vec<String>>,
}

/// Patient creation response
#[derive(Debug, Serialize)]
pub struct CreatePatientResponse {
    pub message: String,
    pub patient: ProfileView,
}

/// Create a patient account directly
///
/// # Errors
///
/// - `400 Bad Request`: email already registered
/// - `500 Internal Server Error`: server error
pub async fn create_test_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientRequest>,
) -> ApiResult<(StatusCode, Json<CreatePatientResponse>)> {
    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            name: req.name,
            email: req.email,
            password_hash,
            role: Role::Patient,
            age: req.age,
            allergies: req.allergies.unwrap_or_default(),
            medications: req.current_medications.unwrap_or_default(),
            specialty: None,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePatientResponse {
            message: "Patient created successfully".to_string(),
            patient: ProfileView::from(account),
        }),
    ))
}
