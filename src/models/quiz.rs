// src/models/quiz.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A course's quiz. At most one quiz exists per course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,

    pub course_id: String,

    /// Minimum score_percent required to pass, 0-100.
    pub pass_threshold: u32,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A multiple-choice question belonging to a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    pub quiz_id: String,

    pub prompt: String,

    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    pub correct_index: usize,

    pub explanation: String,
}

/// DTO for sending a question to a learner (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            prompt: q.prompt.clone(),
            options: q.options.clone(),
        }
    }
}

/// A scored, pass/fail evaluation of a quiz by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,

    pub quiz_id: String,

    pub user_id: String,

    /// 0-100.
    pub score_percent: u32,

    /// Derived at grading time: score_percent >= quiz.pass_threshold.
    pub passed: bool,

    pub attempted_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for one question in a course-creation request.
/// Questions with a blank prompt are skipped; blank options are filtered
/// out before the correct_index bounds check.
#[derive(Debug, Deserialize, Validate)]
pub struct NewQuestion {
    #[serde(default)]
    pub prompt: String,

    pub options: Vec<String>,

    pub correct_index: usize,

    #[serde(default)]
    pub explanation: String,
}

/// DTO for the optional quiz inside a course-creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct NewQuiz {
    #[serde(default = "default_pass_threshold")]
    #[validate(range(max = 100, message = "Pass threshold must be between 0 and 100."))]
    pub pass_threshold: u32,

    pub questions: Vec<NewQuestion>,
}

fn default_pass_threshold() -> u32 {
    70
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub user_id: String,

    /// Key: question id. Value: selected option index.
    pub answers: HashMap<String, usize>,
}

/// Per-question grading detail returned after a submission.
#[derive(Debug, Serialize)]
pub struct GradedQuestion {
    pub question_id: String,
    pub correct: bool,
    pub correct_index: usize,
    pub explanation: String,
}

/// DTO for the result of a graded attempt.
#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub attempt_id: String,
    pub score_percent: u32,
    pub passed: bool,
    pub questions: Vec<GradedQuestion>,
}

/// Which attempts feed a user's quiz average. The learner certificates
/// view averages passed attempts only; admin rollups average everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptScope {
    PassedOnly,
    All,
}
