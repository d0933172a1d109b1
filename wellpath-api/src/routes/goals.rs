/// Goal tracking endpoints
///
/// Goals live inside the owning patient row, so every operation here is a
/// row fetch, a linear scan of the embedded list by goal id, and a save.
///
/// # Endpoints
///
/// Patient role:
/// - `POST /api/goals` - Add a goal (status Pending, progress "0%")
/// - `GET /api/goals` - List own goals
/// - `PUT /api/goals/:goal_id` - Edit title/target date/progress
///
/// Provider role:
/// - `GET /api/goals/patients` - Goal lists of the provider's own patients
/// - `PUT /api/goals/patient/:patient_id/:goal_id` - Set a goal's status
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wellpath_shared::{
    auth::middleware::AuthContext,
    models::{
        account::{Account, Role},
        goal::{find_goal_mut, Goal, GoalStatus, GoalUpdate},
    },
};

/// Goal creation request
///
/// Fields are optional in the type so a missing one yields a 400 with a
/// useful message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: Option<String>,
    pub target_date: Option<NaiveDate>,
}

/// Patient-side goal edit request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub progress: Option<String>,
}

/// Provider-side status update request
#[derive(Debug, Deserialize)]
pub struct UpdateGoalStatusRequest {
    pub status: Option<String>,
}

/// Response carrying the full goal list
#[derive(Debug, Serialize)]
pub struct GoalListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub goals: Vec<Goal>,
}

/// Response carrying a single goal
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub message: String,
    pub goal: Goal,
}

/// One patient's goals in a provider listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientGoals {
    pub patient_id: Uuid,
    pub name: String,
    pub goals: Vec<Goal>,
}

/// Provider listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientGoalsResponse {
    pub patient_goals: Vec<PatientGoals>,
}

/// Loads the caller's patient row or maps the absence to a 404
async fn load_patient(state: &AppState, auth: &AuthContext) -> ApiResult<Account> {
    Account::find_by_id(&state.db, auth.account_id)
        .await?
        .filter(|a| a.role == Role::Patient)
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))
}

/// Parses a path id, treating malformed ids like unknown ones
///
/// Ids are taken as strings so a malformed one gets the same JSON 404 as
/// a well-formed id that matches nothing, instead of the path extractor's
/// plain-text rejection.
fn parse_id(raw: &str, not_found: &str) -> ApiResult<Uuid> {
    raw.parse::<Uuid>()
        .map_err(|_| ApiError::NotFound(not_found.to_string()))
}

/// Add a goal to the authenticated patient
///
/// # Endpoint
///
/// ```text
/// POST /api/goals
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Walk 10k steps", "targetDate": "2026-12-01" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: title or target date missing
/// - `403 Forbidden`: caller is not a patient
/// - `404 Not Found`: patient account no longer exists
pub async fn create_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalListResponse>)> {
    if !auth.is_patient() {
        return Err(ApiError::Forbidden(
            "Only patients can add goals".to_string(),
        ));
    }

    let (Some(title), Some(target_date)) = (req.title, req.target_date) else {
        return Err(ApiError::BadRequest(
            "Title and target date are required".to_string(),
        ));
    };

    let patient = load_patient(&state, &auth).await?;

    let mut goals = patient.goals.0;
    goals.push(Goal::new(title, target_date));
    Account::save_goals(&state.db, patient.id, &goals).await?;

    Ok((
        StatusCode::CREATED,
        Json(GoalListResponse {
            message: Some("Goal added successfully".to_string()),
            goals,
        }),
    ))
}

/// List the authenticated patient's goals
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a patient
/// - `404 Not Found`: patient account no longer exists
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<GoalListResponse>> {
    if !auth.is_patient() {
        return Err(ApiError::Forbidden(
            "Only patients can view their goals".to_string(),
        ));
    }

    let patient = load_patient(&state, &auth).await?;

    Ok(Json(GoalListResponse {
        message: None,
        goals: patient.goals.0,
    }))
}

/// Edit one of the authenticated patient's goals
///
/// Only title, target date, and progress are editable here; status
/// transitions belong to the provider endpoint.
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a patient
/// - `404 Not Found`: patient or goal not found
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(goal_id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    if !auth.is_patient() {
        return Err(ApiError::Forbidden(
            "Only patients can edit their goals".to_string(),
        ));
    }

    let goal_id = parse_id(&goal_id, "Goal not found")?;

    let patient = load_patient(&state, &auth).await?;

    let mut goals = patient.goals.0;
    let goal = find_goal_mut(&mut goals, goal_id)
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

    goal.apply(GoalUpdate {
        title: req.title,
        target_date: req.target_date,
        progress: req.progress,
    });
    let updated = goal.clone();

    Account::save_goals(&state.db, patient.id, &goals).await?;

    Ok(Json(GoalResponse {
        message: "Goal updated successfully".to_string(),
        goal: updated,
    }))
}

/// List goals for every patient assigned to the authenticated provider
///
/// Only accounts in the provider's own patient-reference list are
/// returned.
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a provider
/// - `404 Not Found`: provider account no longer exists
pub async fn list_patient_goals(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PatientGoalsResponse>> {
    if !auth.is_provider() {
        return Err(ApiError::Forbidden(
            "Only providers can view patient goals".to_string(),
        ));
    }

    let provider = Account::find_by_id(&state.db, auth.account_id)
        .await?
        .filter(|a| a.role == Role::Provider)
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    let patients = Account::find_patients(&state.db, &provider.patients).await?;

    let patient_goals = patients
        .into_iter()
        .map(|p| PatientGoals {
            patient_id: p.id,
            name: p.name,
            goals: p.goals.0,
        })
        .collect();

    Ok(Json(PatientGoalsResponse { patient_goals }))
}

/// Set the status of a goal on one of the provider's patients
///
/// # Endpoint
///
/// ```text
/// PUT /api/goals/patient/:patient_id/:goal_id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "status": "Completed" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: status outside {Pending, Completed, Missed}
/// - `403 Forbidden`: caller is not a provider, or the patient is not in
///   the provider's own list
/// - `404 Not Found`: patient or goal not found
pub async fn update_goal_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((patient_id, goal_id)): Path<(String, String)>,
    Json(req): Json<UpdateGoalStatusRequest>,
) -> ApiResult<Json<GoalResponse>> {
    if !auth.is_provider() {
        return Err(ApiError::Forbidden(
            "Only providers can update goal status".to_string(),
        ));
    }

    let patient_id = parse_id(&patient_id, "Patient not found")?;
    let goal_id = parse_id(&goal_id, "Goal not found")?;

    // Validate status before touching the store, so an invalid value can
    // never leave a half-applied write behind.
    let status = req
        .status
        .as_deref()
        .and_then(GoalStatus::parse)
        .ok_or_else(|| ApiError::BadRequest("Invalid status value".to_string()))?;

    let provider = Account::find_by_id(&state.db, auth.account_id)
        .await?
        .filter(|a| a.role == Role::Provider)
        .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))?;

    if !provider.patients.contains(&patient_id) {
        return Err(ApiError::Forbidden(
            "Patient is not assigned to this provider".to_string(),
        ));
    }

    let patient = Account::find_by_id(&state.db, patient_id)
        .await?
        .filter(|a| a.role == Role::Patient)
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;

    let mut goals = patient.goals.0;
    let goal = find_goal_mut(&mut goals, goal_id)
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

    goal.status = status;
    let updated = goal.clone();

    Account::save_goals(&state.db, patient.id, &goals).await?;

    Ok(Json(GoalResponse {
        message: "Goal status updated successfully".to_string(),
        goal: updated,
    }))
}
