// src/models/assignment.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A record that a specific user owes a specific course or track.
/// Exactly one of `course_id` / `track_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,

    pub client_id: String,

    pub user_id: String,

    pub course_id: Option<String>,

    pub track_id: Option<String>,

    /// User id of the admin who created the assignment.
    pub assigned_by: String,

    pub assigned_at: chrono::DateTime<chrono::Utc>,

    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Derived status of an assignment, computed entirely from progress rows.
/// The assignment itself is stateless once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// DTO for assigning one content item to a set of users.
/// Exactly one of `course_id` / `track_id` must be supplied.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentsRequest {
    #[validate(length(min = 1, message = "Client id is required."))]
    pub client_id: String,

    #[validate(length(min = 1, message = "At least one user must be selected."))]
    pub user_ids: Vec<String>,

    pub course_id: Option<String>,

    pub track_id: Option<String>,

    #[validate(length(min = 1, message = "Assigning admin id is required."))]
    pub assigned_by: String,
}

/// Assignment list row with the content title and derived status resolved.
/// Missing content degrades to an "Unknown" title rather than failing.
#[derive(Debug, Serialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub content_title: String,
    pub status: AssignmentStatus,
}
