/// Wellness tip endpoint
///
/// # Endpoints
///
/// - `GET /api/tips` - One tip selected uniformly at random (patient role)
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Serialize;
use wellpath_shared::{auth::middleware::AuthContext, models::tip::Tip};

/// Random tip response
#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: Tip,
}

/// Get one random wellness tip
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a patient
/// - `404 Not Found`: no tips stored
pub async fn random_tip(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TipResponse>> {
    if !auth.is_patient() {
        return Err(ApiError::Forbidden(
            "Only patients can view tips".to_string(),
        ));
    }

    let tip = Tip::random(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("No tips found".to_string()))?;

    Ok(Json(TipResponse { tip }))
}
