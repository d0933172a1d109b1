/// Patient goal types
///
/// Goals are owned exclusively by a patient account and stored as an ordered
/// JSON list on the account row. They have no independent lifecycle: creating,
/// reading, or updating a goal is always a read-scan-save on the owning row.
///
/// # Example
///
/// ```
/// use wellpath_shared::models::goal::{Goal, GoalStatus, find_goal_mut};
/// use chrono::NaiveDate;
///
/// let mut goals = vec![Goal::new(
///     "Walk 10k steps".to_string(),
///     NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
/// )];
///
/// assert_eq!(goals[0].status, GoalStatus::Pending);
/// assert_eq!(goals[0].progress, "0%");
///
/// let id = goals[0].id;
/// let goal = find_goal_mut(&mut goals, id).unwrap();
/// goal.status = GoalStatus::Completed;
/// ```
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Goal completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    Pending,
    Completed,
    Missed,
}

impl GoalStatus {
    /// Parses a status from its wire representation
    ///
    /// Returns `None` for anything outside {Pending, Completed, Missed};
    /// callers map that to a 400 response.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(GoalStatus::Pending),
            "Completed" => Some(GoalStatus::Completed),
            "Missed" => Some(GoalStatus::Missed),
            _ => None,
        }
    }

    /// Gets status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "Pending",
            GoalStatus::Completed => "Completed",
            GoalStatus::Missed => "Missed",
        }
    }
}

/// A tracked objective embedded in a patient account
///
/// The id is assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Opaque goal identifier (UUID v4, assigned at creation)
    pub id: Uuid,

    /// Short description of the objective
    pub title: String,

    /// Completion status (defaults to Pending)
    pub status: GoalStatus,

    /// Date the goal should be reached by
    pub target_date: NaiveDate,

    /// Free-form progress indicator (defaults to "0%")
    pub progress: String,
}

/// Partial update applied by the owning patient
///
/// Only non-None fields are changed. Status is deliberately absent:
/// status transitions go through the provider endpoint.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub progress: Option<String>,
}

impl Goal {
    /// Creates a new goal with defaults (Pending, "0%")
    pub fn new(title: String, target_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            status: GoalStatus::Pending,
            target_date,
            progress: "0%".to_string(),
        }
    }

    /// Applies a partial update in place
    pub fn apply(&mut self, update: GoalUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(target_date) = update.target_date {
            self.target_date = target_date;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
    }
}

/// Locates a goal by id with a linear scan of the owned list
pub fn find_goal_mut(goals: &mut [Goal], id: Uuid) -> Option<&mut Goal> {
    goals.iter_mut().find(|g| g.id == id)
}
