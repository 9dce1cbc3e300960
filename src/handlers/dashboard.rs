// src/handlers/dashboard.rs
//
// Rollup views backing the three dashboards. Everything here is
// derived on the fly from the store; nothing is cached or stored.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    error::AppError,
    metrics,
    models::{
        assignment::AssignmentStatus,
        quiz::AttemptScope,
        user::{Role, User},
    },
    store::SharedStore,
};

/// Per-learner row in the client dashboard table.
#[derive(Debug, Serialize)]
pub struct LearnerRow {
    #[serde(flatten)]
    pub user: User,
    /// Completed share of this learner's progress rows, 0 when none.
    pub completion_rate: u32,
    pub assignment_count: usize,
    /// Mean over all attempts, pass or fail.
    pub quiz_average: u32,
}

#[derive(Debug, Serialize)]
pub struct ClientDashboardResponse {
    pub client_id: String,
    pub client_name: String,
    pub learner_count: usize,
    pub assignment_count: usize,
    pub unique_assigned_learners: usize,
    pub completion_rate: u32,
    pub learners: Vec<LearnerRow>,
}

/// One assigned item on the learner dashboard.
#[derive(Debug, Serialize)]
pub struct AssignedItem {
    pub assignment_id: String,
    pub content_title: String,
    /// For a course: its completion percent. For a track: the mean of
    /// its courses' completion percents.
    pub completion_percent: u32,
    pub status: AssignmentStatus,
}

#[derive(Debug, Serialize)]
pub struct LearnerDashboardResponse {
    pub user_id: String,
    pub items: Vec<AssignedItem>,
    /// Share of assigned items whose status is Completed.
    pub completion_rate: u32,
    /// Mean score over passed attempts (the certificates convention).
    pub quiz_average: u32,
}

#[derive(Debug, Serialize)]
pub struct ClientAnalyticsRow {
    pub client_id: String,
    pub client_name: String,
    pub learner_count: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub client_count: usize,
    pub learner_count: usize,
    pub course_count: usize,
    pub track_count: usize,
    /// Completed share of all progress rows platform-wide.
    pub avg_completion: u32,
    pub clients: Vec<ClientAnalyticsRow>,
}

/// Client-admin dashboard: learner table plus client-wide rollups.
pub async fn client_dashboard(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    let client = store
        .client(&id)
        .ok_or(AppError::NotFound("Client not found".to_string()))?;

    let learners = store.users_of_client(&id, Some(Role::Learner));
    let assignments = store.assignments_of_client(&id);

    let rows: Vec<LearnerRow> = learners
        .iter()
        .map(|user| {
            let progress: Vec<_> = store
                .progress
                .iter()
                .filter(|p| p.user_id == user.id)
                .collect();
            let completed = progress.iter().filter(|p| p.completed).count();
            let completion_rate = if progress.is_empty() {
                0
            } else {
                (completed as f64 / progress.len() as f64 * 100.0).round() as u32
            };
            LearnerRow {
                user: (*user).clone(),
                completion_rate,
                assignment_count: store.assignments_of_user(&user.id).len(),
                quiz_average: metrics::quiz_average_score(&store, &user.id, AttemptScope::All),
            }
        })
        .collect();

    Ok(Json(ClientDashboardResponse {
        client_id: client.id.clone(),
        client_name: client.name.clone(),
        learner_count: learners.len(),
        assignment_count: assignments.len(),
        unique_assigned_learners: metrics::unique_learner_count(&assignments),
        completion_rate: metrics::client_completion_rate(&store, &id),
        learners: rows,
    }))
}

/// Learner dashboard: assigned items with completion and status.
pub async fn learner_dashboard(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.user(&id).is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let assignments = store.assignments_of_user(&id);
    let items: Vec<AssignedItem> = assignments
        .iter()
        .map(|a| {
            let (title, percent) = if let Some(course_id) = &a.course_id {
                let title = store
                    .course(course_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                (
                    title,
                    metrics::course_completion_percent(&store, &id, course_id),
                )
            } else if let Some(track_id) = &a.track_id {
                let title = store
                    .track(track_id)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                let courses = store.courses_of_track(track_id);
                let percent = if courses.is_empty() {
                    0
                } else {
                    let sum: u32 = courses
                        .iter()
                        .map(|c| metrics::course_completion_percent(&store, &id, &c.id))
                        .sum();
                    (sum as f64 / courses.len() as f64).round() as u32
                };
                (title, percent)
            } else {
                ("Unknown".to_string(), 0)
            };
            AssignedItem {
                assignment_id: a.id.clone(),
                content_title: title,
                completion_percent: percent,
                status: metrics::assignment_status(&store, a),
            }
        })
        .collect();

    let completed_items = items
        .iter()
        .filter(|i| i.status == AssignmentStatus::Completed)
        .count();
    let completion_rate = if items.is_empty() {
        0
    } else {
        (completed_items as f64 / items.len() as f64 * 100.0).round() as u32
    };

    Ok(Json(LearnerDashboardResponse {
        user_id: id.clone(),
        items,
        completion_rate,
        quiz_average: metrics::quiz_average_score(&store, &id, AttemptScope::PassedOnly),
    }))
}

/// Platform analytics: totals plus per-client completion rates.
/// Super-admin view.
pub async fn analytics(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;

    let total = store.progress.len();
    let completed = store.progress.iter().filter(|p| p.completed).count();
    let avg_completion = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };

    let clients: Vec<ClientAnalyticsRow> = store
        .clients
        .iter()
        .map(|c| ClientAnalyticsRow {
            client_id: c.id.clone(),
            client_name: c.name.clone(),
            learner_count: store.users_of_client(&c.id, Some(Role::Learner)).len(),
            completion_rate: metrics::client_completion_rate(&store, &c.id),
        })
        .collect();

    Ok(Json(AnalyticsResponse {
        client_count: store.clients.len(),
        learner_count: store
            .users
            .iter()
            .filter(|u| u.role == Role::Learner)
            .count(),
        course_count: store.courses.len(),
        track_count: store.tracks.len(),
        avg_completion,
        clients,
    }))
}
