// src/handlers/assignments.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    metrics,
    models::assignment::{Assignment, AssignmentView, CreateAssignmentsRequest},
    store::{SharedStore, Store},
};

/// Resolves the display title of an assignment's content. A dangling
/// course/track reference degrades to "Unknown" instead of failing the
/// whole list.
fn content_title(store: &Store, assignment: &Assignment) -> String {
    if let Some(course_id) = &assignment.course_id {
        if let Some(course) = store.course(course_id) {
            return course.title.clone();
        }
    }
    if let Some(track_id) = &assignment.track_id {
        if let Some(track) = store.track(track_id) {
            return track.title.clone();
        }
    }
    "Unknown".to_string()
}

fn to_view(store: &Store, assignment: &Assignment) -> AssignmentView {
    AssignmentView {
        content_title: content_title(store, assignment),
        status: metrics::assignment_status(store, assignment),
        assignment: assignment.clone(),
    }
}

/// Assigns one course or track to a set of users: one assignment row
/// per user, same content, same admin, same timestamp.
pub async fn create_assignments(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateAssignmentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let created = store.create_assignments(payload)?;
    tracing::info!("Created {} assignments", created.len());

    Ok((StatusCode::CREATED, Json(created)))
}

/// Removes an assignment by id. Progress rows are untouched.
pub async fn remove_assignment(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = store.write().await;
    store.remove_assignment(&id)?;
    tracing::info!("Removed assignment {}", id);

    Ok(StatusCode::OK)
}

/// Lists a user's assignments with resolved titles and derived status.
pub async fn list_user_assignments(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.user(&id).is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let views: Vec<AssignmentView> = store
        .assignments_of_user(&id)
        .into_iter()
        .map(|a| to_view(&store, a))
        .collect();
    Ok(Json(views))
}

/// Lists a client's assignments with resolved titles, derived status,
/// and the distinct-learner count across them.
pub async fn list_client_assignments(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.client(&id).is_none() {
        return Err(AppError::NotFound("Client not found".to_string()));
    }

    let assignments = store.assignments_of_client(&id);
    let unique_learners = metrics::unique_learner_count(&assignments);
    let views: Vec<AssignmentView> = assignments
        .into_iter()
        .map(|a| to_view(&store, a))
        .collect();

    Ok(Json(json!({
        "assignments": views,
        "unique_learners": unique_learners,
    })))
}
