// src/models/progress.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-video watch record. One row per (user, video); course-level
/// completion is always derived from these, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub id: String,

    pub user_id: String,

    pub course_id: String,

    pub video_id: Option<String>,

    pub watched_seconds: u32,

    pub completed: bool,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for recording watch progress against a video. Upserts the
/// (user, video) row. When `completed` is omitted it is derived from
/// watched_seconds reaching the video duration.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordProgressRequest {
    #[validate(length(min = 1, message = "User id is required."))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Video id is required."))]
    pub video_id: String,

    pub watched_seconds: u32,

    pub completed: Option<bool>,
}
