// src/models/course.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::NewQuiz;

/// A course: an ordered sequence of videos, optionally closed by a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,

    pub title: String,

    pub description: String,

    pub thumbnail_url: String,

    /// User id of the creating admin.
    pub created_by: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A video within a course. Position is 1-based and unique per course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,

    pub course_id: String,

    pub title: String,

    pub url: String,

    pub position: u32,

    pub duration_seconds: u32,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for one video in a course-creation request. Positions are not
/// supplied by the caller; they are assigned 1..n in input order.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewVideo {
    #[validate(length(min = 1, max = 200, message = "Video title is required."))]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[validate(range(min = 1, message = "Video duration is required."))]
    pub duration_seconds: u32,
}

/// DTO for creating a course together with its videos and optional quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course title is required."))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Course description is required."))]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: String,

    #[validate(length(min = 1, message = "Creator user id is required."))]
    pub created_by: String,

    #[validate(nested, length(min = 1, message = "A course needs at least one video."))]
    pub videos: Vec<NewVideo>,

    #[validate(nested)]
    pub quiz: Option<NewQuiz>,
}

/// Course detail view: the course with its ordered videos and quiz summary.
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub videos: Vec<Video>,
    pub question_count: usize,
    pub pass_threshold: Option<u32>,
}
