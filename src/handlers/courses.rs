// src/handlers/courses.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::course::{CourseDetailResponse, CreateCourseRequest},
    store::SharedStore,
};

/// Lists all courses in catalog order.
pub async fn list_courses(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    Ok(Json(store.courses.clone()))
}

/// Creates a course with its videos and, when questions are supplied,
/// its quiz. Video positions are assigned 1..n in input order.
pub async fn create_course(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let course = store.create_course(payload)?;
    tracing::info!("Created course '{}' ({})", course.title, course.id);

    Ok((StatusCode::CREATED, Json(course)))
}

/// Retrieves a course with its ordered videos and quiz summary.
pub async fn get_course(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    let course = store
        .course(&id)
        .ok_or(AppError::NotFound("Course not found".to_string()))?;

    let videos: Vec<_> = store.videos_of_course(&id).into_iter().cloned().collect();
    let quiz = store.quiz_of_course(&id);
    let question_count = quiz
        .map(|q| store.questions_of_quiz(&q.id).len())
        .unwrap_or(0);

    Ok(Json(CourseDetailResponse {
        course: course.clone(),
        videos,
        question_count,
        pass_threshold: quiz.map(|q| q.pass_threshold),
    }))
}
