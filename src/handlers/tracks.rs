// src/handlers/tracks.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::track::{CreateTrackRequest, TrackDetailResponse},
    store::SharedStore,
};

/// Lists all tracks.
pub async fn list_tracks(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    Ok(Json(store.tracks.clone()))
}

/// Creates a track from an ordered course selection.
pub async fn create_track(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateTrackRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let track = store.create_track(payload)?;
    tracing::info!("Created track '{}' ({})", track.title, track.id);

    Ok((StatusCode::CREATED, Json(track)))
}

/// Retrieves a track with its courses in position order.
pub async fn get_track(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    let track = store
        .track(&id)
        .ok_or(AppError::NotFound("Track not found".to_string()))?;

    let courses: Vec<_> = store.courses_of_track(&id).into_iter().cloned().collect();

    Ok(Json(TrackDetailResponse {
        track: track.clone(),
        courses,
    }))
}
