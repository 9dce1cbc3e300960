// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{assignments, clients, courses, dashboard, learning, tracks, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (clients, users, courses, tracks,
///   assignments, progress, analytics).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (shared store + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route("/{id}", delete(clients::delete_client))
        .route("/{id}/users", get(clients::list_client_users))
        .route("/{id}/assignments", get(assignments::list_client_assignments))
        .route("/{id}/dashboard", get(dashboard::client_dashboard));

    let user_routes = Router::new()
        .route("/", post(users::create_user))
        .route("/bulk", post(users::bulk_create_users))
        .route("/{id}/deactivate", put(users::deactivate_user))
        .route("/{id}/assignments", get(assignments::list_user_assignments))
        .route("/{id}/dashboard", get(dashboard::learner_dashboard))
        .route(
            "/{id}/courses/{course_id}/progress",
            get(learning::get_progress),
        );

    let course_routes = Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route("/{id}", get(courses::get_course))
        .route("/{id}/quiz", get(learning::get_quiz))
        .route("/{id}/quiz/submit", post(learning::submit_quiz));

    let track_routes = Router::new()
        .route("/", get(tracks::list_tracks).post(tracks::create_track))
        .route("/{id}", get(tracks::get_track));

    let assignment_routes = Router::new()
        .route("/", post(assignments::create_assignments))
        .route(
            "/{id}",
            delete(assignments::remove_assignment),
        );

    Router::new()
        .nest("/api/clients", client_routes)
        .nest("/api/users", user_routes)
        .nest("/api/courses", course_routes)
        .nest("/api/tracks", track_routes)
        .nest("/api/assignments", assignment_routes)
        .route("/api/progress", post(learning::record_progress))
        .route("/api/analytics", get(dashboard::analytics))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
