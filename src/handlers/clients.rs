// src/handlers/clients.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{client::CreateClientRequest, user::UserListParams},
    store::SharedStore,
};

/// Lists all client organizations. Super-admin view.
pub async fn list_clients(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    Ok(Json(store.clients.clone()))
}

/// Creates a new client organization.
pub async fn create_client(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut store = store.write().await;
    let client = store.create_client(payload);
    tracing::info!("Created client '{}' ({})", client.name, client.id);

    Ok((StatusCode::CREATED, Json(client)))
}

/// Removes a client outright. The client's users, assignments and
/// progress are retained.
pub async fn delete_client(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut store = store.write().await;
    store.delete_client(&id)?;
    tracing::info!("Deleted client {}", id);

    Ok(StatusCode::OK)
}

/// Lists users belonging to a client, optionally filtered by role
/// (e.g. `?role=learner`).
pub async fn list_client_users(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    if store.client(&id).is_none() {
        return Err(AppError::NotFound("Client not found".to_string()));
    }

    let users: Vec<_> = store
        .users_of_client(&id, params.role)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(users))
}
