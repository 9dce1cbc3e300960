// src/models/track.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::course::Course;

/// An ordered bundle of courses forming a learning path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,

    pub title: String,

    pub description: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Join row tying a course into a track. Position defines consumption
/// order within the track; (track_id, course_id) pairs are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCourse {
    pub track_id: String,

    pub course_id: String,

    pub position: u32,
}

/// DTO for creating a track from an ordered course selection.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrackRequest {
    #[validate(length(min = 1, max = 200, message = "Track title is required."))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Track description is required."))]
    pub description: String,

    /// Course ids in consumption order; positions are assigned 1..n.
    #[validate(length(min = 1, message = "A track needs at least one course."))]
    pub course_ids: Vec<String>,
}

/// Track detail view: the track with its courses in position order.
#[derive(Debug, Serialize)]
pub struct TrackDetailResponse {
    #[serde(flatten)]
    pub track: Track,
    pub courses: Vec<Course>,
}
