// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{BulkCreateUsersRequest, CreateUserRequest},
    store::SharedStore,
};

/// Creates a single user with an explicit role. The role/client
/// consistency invariant is enforced by the store.
pub async fn create_user(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let user = store.create_user(payload)?;
    tracing::info!("Created user '{}' ({})", user.email, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Bulk-adds learners from a newline-separated email list.
/// Blank lines are dropped. Client-admin flow; role is always learner.
pub async fn bulk_create_users(
    State(store): State<SharedStore>,
    Json(payload): Json<BulkCreateUsersRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let users = store.bulk_create_learners(payload)?;
    tracing::info!("Bulk-created {} learners", users.len());

    Ok((StatusCode::CREATED, Json(users)))
}

/// Deactivates a user. Soft operation: progress and assignment history
/// are kept.
pub async fn deactivate_user(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = store.write().await;
    let user = store.deactivate_user(&id)?;
    tracing::info!("Deactivated user {}", user.id);

    Ok(Json(user))
}
