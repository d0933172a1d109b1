/// Profile endpoints
///
/// The authenticated account's own record, minus the password hash and
/// the other role's columns.
///
/// # Endpoints
///
/// - `GET /api/profile` - Fetch the authenticated account's profile
/// - `PUT /api/profile` - Partially update the profile
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use wellpath_shared::{
    auth::middleware::AuthContext,
    models::account::{Account, ProfileView, UpdateProfile},
};

/// Profile update request
///
/// All fields optional. Role and password cannot be changed here, and a
/// field belonging to the other role is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,

    /// Patient only
    pub age: Option<i32>,

    /// Patient only
    pub allergies: Option<Vec<String>>,

    /// Patient only
    pub current_medications: Option<Vec<String>>,

    /// Provider only
    pub specialty: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        UpdateProfile {
            name: req.name,
            email: req.email,
            age: req.age,
            allergies: req.allergies,
            medications: req.current_medications,
            specialty: req.specialty,
        }
    }
}

/// Profile update response
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: ProfileView,
}

/// Get the authenticated account's profile
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: account no longer exists
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProfileView>> {
    let account = Account::find_by_id(&state.db, auth.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileView::from(account)))
}

/// Update the authenticated account's profile
///
/// # Endpoint
///
/// ```text
/// PUT /api/profile
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "name": "Jane Doe", "allergies": ["penicillin"] }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: field not legal for the account's role
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: account no longer exists
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let update = UpdateProfile::from(req);

    if update.violates_role(auth.role) {
        return Err(ApiError::BadRequest(format!(
            "Field not allowed for role {}",
            auth.role.as_str()
        )));
    }

    let account = Account::update_profile(&state.db, auth.account_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: ProfileView::from(account),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellpath_shared::models::account::Role;

    #[test]
    fn test_request_maps_to_update() {
        let req = UpdateProfileRequest {
            name: Some("Jane".to_string()),
            current_medications: Some(vec!["ibuprofen".to_string()]),
            ..Default::default()
        };

        let update = UpdateProfile::from(req);
        assert_eq!(update.name.as_deref(), Some("Jane"));
        assert_eq!(
            update.medications.as_deref(),
            Some(&["ibuprofen".to_string()][..])
        );
        assert!(update.specialty.is_none());
    }

    #[test]
    fn test_specialty_illegal_for_patient() {
        let update = UpdateProfile::from(UpdateProfileRequest {
            specialty: Some("Cardiology".to_string()),
            ..Default::default()
        });
        assert!(update.violates_role(Role::Patient));
        assert!(!update.violates_role(Role::Provider));
    }
}
