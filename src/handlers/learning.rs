// src/handlers/learning.rs
//
// Learner-facing operations: watching videos and taking quizzes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        progress::RecordProgressRequest,
        quiz::{PublicQuestion, SubmitQuizRequest},
    },
    store::SharedStore,
};

/// Records or updates watch progress for one video.
pub async fn record_progress(
    State(store): State<SharedStore>,
    Json(payload): Json<RecordProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let row = store.record_progress(payload)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Lists a user's progress rows for one course.
pub async fn get_progress(
    State(store): State<SharedStore>,
    Path((user_id, course_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.user(&user_id).is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let rows: Vec<_> = store
        .progress_of_user_course(&user_id, &course_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(rows))
}

/// Returns a course's quiz questions without the answer key.
pub async fn get_quiz(
    State(store): State<SharedStore>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.course(&course_id).is_none() {
        return Err(AppError::NotFound("Course not found".to_string()));
    }
    let quiz = store
        .quiz_of_course(&course_id)
        .ok_or(AppError::NotFound("This course has no quiz".to_string()))?;

    let questions: Vec<PublicQuestion> = store
        .questions_of_quiz(&quiz.id)
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(serde_json::json!({
        "quiz_id": quiz.id,
        "pass_threshold": quiz.pass_threshold,
        "questions": questions,
    })))
}

/// Grades a quiz submission against the answer key and records the
/// attempt. Pass/fail comes from the quiz's threshold.
pub async fn submit_quiz(
    State(store): State<SharedStore>,
    Path(course_id): Path<String>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = store.write().await;
    let result = store.submit_quiz_attempt(&course_id, payload)?;
    tracing::info!(
        "Quiz attempt for course {}: {}% ({})",
        course_id,
        result.score_percent,
        if result.passed { "passed" } else { "failed" }
    );

    Ok(Json(result))
}
