// src/store/mod.rs

pub mod seed;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{
    assignment::{Assignment, CreateAssignmentsRequest},
    client::{Client, CreateClientRequest},
    course::{Course, CreateCourseRequest, Video},
    progress::{Progress, RecordProgressRequest},
    quiz::{GradedQuestion, Question, Quiz, QuizAttempt, QuizResultResponse, SubmitQuizRequest},
    track::{CreateTrackRequest, Track, TrackCourse},
    user::{BulkCreateUsersRequest, CreateUserRequest, Role, User},
};

/// Store handle shared across handlers. Queries take a read guard,
/// mutations a write guard, so every mutation is atomic.
pub type SharedStore = Arc<RwLock<Store>>;

pub fn shared(store: Store) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// In-process repository owning all entity collections.
///
/// Single-writer discipline: all writes go through the methods below,
/// which validate the full request before touching any collection so a
/// rejected request never leaves partial state behind.
#[derive(Debug, Default)]
pub struct Store {
    pub clients: Vec<Client>,
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub videos: Vec<Video>,
    pub quizzes: Vec<Quiz>,
    pub questions: Vec<Question>,
    pub tracks: Vec<Track>,
    pub track_courses: Vec<TrackCourse>,
    pub assignments: Vec<Assignment>,
    pub progress: Vec<Progress>,
    pub quiz_attempts: Vec<QuizAttempt>,

    next_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    // ---------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn quiz_of_course(&self, course_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.course_id == course_id)
    }

    pub fn questions_of_quiz(&self, quiz_id: &str) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .collect()
    }

    pub fn quiz_attempts_of_user(&self, user_id: &str) -> Vec<&QuizAttempt> {
        self.quiz_attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    // ---------------------------------------------------------------
    // Scoped queries
    // ---------------------------------------------------------------

    /// Users belonging to a client, optionally narrowed to one role.
    /// Preserves insertion order.
    pub fn users_of_client(&self, client_id: &str, role: Option<Role>) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.client_id.as_deref() == Some(client_id))
            .filter(|u| role.is_none_or(|r| u.role == r))
            .collect()
    }

    pub fn assignments_of_user(&self, user_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    pub fn assignments_of_client(&self, client_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.client_id == client_id)
            .collect()
    }

    /// Videos of a course in position order. The sort is stable, so
    /// rows sharing a position fall back to insertion order.
    pub fn videos_of_course(&self, course_id: &str) -> Vec<&Video> {
        let mut videos: Vec<&Video> = self
            .videos
            .iter()
            .filter(|v| v.course_id == course_id)
            .collect();
        videos.sort_by_key(|v| v.position);
        videos
    }

    /// Courses of a track, resolved through the join rows in position
    /// order. Join rows pointing at a removed course are skipped.
    pub fn courses_of_track(&self, track_id: &str) -> Vec<&Course> {
        let mut joins: Vec<&TrackCourse> = self
            .track_courses
            .iter()
            .filter(|tc| tc.track_id == track_id)
            .collect();
        joins.sort_by_key(|tc| tc.position);
        joins
            .into_iter()
            .filter_map(|tc| self.course(&tc.course_id))
            .collect()
    }

    pub fn progress_of_user_course(&self, user_id: &str, course_id: &str) -> Vec<&Progress> {
        self.progress
            .iter()
            .filter(|p| p.user_id == user_id && p.course_id == course_id)
            .collect()
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    pub fn create_client(&mut self, req: CreateClientRequest) -> Client {
        let client = Client {
            id: self.next_id("client"),
            name: req.name,
            logo_url: req.logo_url,
            primary_color: req.primary_color,
            is_active: true,
            created_at: Utc::now(),
        };
        self.clients.push(client.clone());
        client
    }

    /// Removes the client row. Users, assignments and progress scoped to
    /// the client are deliberately left in place (history retention).
    pub fn delete_client(&mut self, id: &str) -> Result<(), AppError> {
        let len_before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        if self.clients.len() == len_before {
            return Err(AppError::NotFound("Client not found".to_string()));
        }
        Ok(())
    }

    pub fn create_user(&mut self, req: CreateUserRequest) -> Result<User, AppError> {
        match (req.role, &req.client_id) {
            (Role::SuperAdmin, Some(_)) => {
                return Err(AppError::InvalidReference(
                    "Super admins cannot belong to a client".to_string(),
                ));
            }
            (Role::Learner | Role::ClientAdmin, None) => {
                return Err(AppError::InvalidReference(
                    "Learners and client admins must belong to a client".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(client_id) = &req.client_id {
            if self.client(client_id).is_none() {
                return Err(AppError::InvalidReference(format!(
                    "Client '{}' does not exist",
                    client_id
                )));
            }
        }

        if self.users.iter().any(|u| u.email == req.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' already exists",
                req.email
            )));
        }

        let user = User {
            id: self.next_id("user"),
            client_id: req.client_id,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            is_active: true,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Bulk-adds learners from a newline-separated email list. Blank
    /// lines are dropped; whatever remains becomes one active learner
    /// per address.
    pub fn bulk_create_learners(
        &mut self,
        req: BulkCreateUsersRequest,
    ) -> Result<Vec<User>, AppError> {
        if self.client(&req.client_id).is_none() {
            return Err(AppError::InvalidReference(format!(
                "Client '{}' does not exist",
                req.client_id
            )));
        }

        let emails: Vec<String> = req
            .emails
            .lines()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();

        if emails.is_empty() {
            return Err(AppError::MissingField(
                "At least one email is required".to_string(),
            ));
        }

        // Same duplicate rule as single creation, checked for the whole
        // batch up front so a rejection creates nobody.
        let mut seen = HashSet::new();
        for email in &emails {
            if !seen.insert(email.as_str()) {
                return Err(AppError::Conflict(format!(
                    "Email '{}' appears more than once",
                    email
                )));
            }
            if self.users.iter().any(|u| u.email == *email) {
                return Err(AppError::Conflict(format!(
                    "Email '{}' already exists",
                    email
                )));
            }
        }

        let mut created = Vec::with_capacity(emails.len());
        for email in emails {
            let first_name = email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string();
            let user = User {
                id: self.next_id("user"),
                client_id: Some(req.client_id.clone()),
                email,
                first_name,
                last_name: String::new(),
                role: Role::Learner,
                is_active: true,
                created_at: Utc::now(),
            };
            self.users.push(user.clone());
            created.push(user);
        }
        Ok(created)
    }

    /// Soft-deactivation: flips is_active only. Progress and assignment
    /// history must survive this.
    pub fn deactivate_user(&mut self, id: &str) -> Result<User, AppError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound("User not found".to_string()))?;
        user.is_active = false;
        Ok(user.clone())
    }

    pub fn create_course(&mut self, req: CreateCourseRequest) -> Result<Course, AppError> {
        // Validate the quiz payload fully before creating anything.
        let quiz_rows = match &req.quiz {
            Some(new_quiz) => {
                let mut rows = Vec::new();
                for q in &new_quiz.questions {
                    if q.prompt.trim().is_empty() {
                        continue;
                    }
                    let options: Vec<String> = q
                        .options
                        .iter()
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect();
                    if q.correct_index >= options.len() {
                        return Err(AppError::InvalidReference(format!(
                            "correct_index {} is out of bounds for {} options",
                            q.correct_index,
                            options.len()
                        )));
                    }
                    rows.push((q.prompt.clone(), options, q.correct_index, q.explanation.clone()));
                }
                rows
            }
            None => Vec::new(),
        };

        let course = Course {
            id: self.next_id("course"),
            title: req.title,
            description: req.description,
            thumbnail_url: req.thumbnail_url,
            created_by: req.created_by,
            created_at: Utc::now(),
        };
        self.courses.push(course.clone());

        // Positions are assigned 1..n in input order.
        for (i, v) in req.videos.into_iter().enumerate() {
            let video = Video {
                id: self.next_id("video"),
                course_id: course.id.clone(),
                title: v.title,
                url: v.url,
                position: i as u32 + 1,
                duration_seconds: v.duration_seconds,
                created_at: Utc::now(),
            };
            self.videos.push(video);
        }

        if !quiz_rows.is_empty() {
            let pass_threshold = req.quiz.as_ref().map(|q| q.pass_threshold).unwrap_or(70);
            let quiz = Quiz {
                id: self.next_id("quiz"),
                course_id: course.id.clone(),
                pass_threshold,
                created_at: Utc::now(),
            };
            let quiz_id = quiz.id.clone();
            self.quizzes.push(quiz);

            for (prompt, options, correct_index, explanation) in quiz_rows {
                let question = Question {
                    id: self.next_id("question"),
                    quiz_id: quiz_id.clone(),
                    prompt,
                    options,
                    correct_index,
                    explanation,
                };
                self.questions.push(question);
            }
        }

        Ok(course)
    }

    pub fn create_track(&mut self, req: CreateTrackRequest) -> Result<Track, AppError> {
        let mut seen = HashSet::new();
        for course_id in &req.course_ids {
            if self.course(course_id).is_none() {
                return Err(AppError::InvalidReference(format!(
                    "Course '{}' does not exist",
                    course_id
                )));
            }
            if !seen.insert(course_id.clone()) {
                return Err(AppError::InvalidReference(format!(
                    "Course '{}' selected more than once",
                    course_id
                )));
            }
        }

        let track = Track {
            id: self.next_id("track"),
            title: req.title,
            description: req.description,
            created_at: Utc::now(),
        };
        self.tracks.push(track.clone());

        for (i, course_id) in req.course_ids.into_iter().enumerate() {
            self.track_courses.push(TrackCourse {
                track_id: track.id.clone(),
                course_id,
                position: i as u32 + 1,
            });
        }

        Ok(track)
    }

    /// Creates one assignment per target user, all referencing the same
    /// content item and the same assigning admin, stamped with the same
    /// time. Exactly one of course_id / track_id must be set.
    pub fn create_assignments(
        &mut self,
        req: CreateAssignmentsRequest,
    ) -> Result<Vec<Assignment>, AppError> {
        match (&req.course_id, &req.track_id) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidReference(
                    "An assignment references a course or a track, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(AppError::MissingField(
                    "Select a course or a track to assign".to_string(),
                ));
            }
            _ => {}
        }

        if self.client(&req.client_id).is_none() {
            return Err(AppError::InvalidReference(format!(
                "Client '{}' does not exist",
                req.client_id
            )));
        }
        if let Some(course_id) = &req.course_id {
            if self.course(course_id).is_none() {
                return Err(AppError::InvalidReference(format!(
                    "Course '{}' does not exist",
                    course_id
                )));
            }
        }
        if let Some(track_id) = &req.track_id {
            if self.track(track_id).is_none() {
                return Err(AppError::InvalidReference(format!(
                    "Track '{}' does not exist",
                    track_id
                )));
            }
        }
        for user_id in &req.user_ids {
            if self.user(user_id).is_none() {
                return Err(AppError::InvalidReference(format!(
                    "User '{}' does not exist",
                    user_id
                )));
            }
        }

        let assigned_at = Utc::now();
        let mut created = Vec::with_capacity(req.user_ids.len());
        for user_id in req.user_ids {
            let assignment = Assignment {
                id: self.next_id("assignment"),
                client_id: req.client_id.clone(),
                user_id,
                course_id: req.course_id.clone(),
                track_id: req.track_id.clone(),
                assigned_by: req.assigned_by.clone(),
                assigned_at,
                due_at: None,
            };
            self.assignments.push(assignment.clone());
            created.push(assignment);
        }
        Ok(created)
    }

    /// Deletes the assignment row only. Progress is keyed by user and
    /// course, independent of the assignment record, so nothing else
    /// changes.
    pub fn remove_assignment(&mut self, id: &str) -> Result<(), AppError> {
        let len_before = self.assignments.len();
        self.assignments.retain(|a| a.id != id);
        if self.assignments.len() == len_before {
            return Err(AppError::NotFound("Assignment not found".to_string()));
        }
        Ok(())
    }

    /// Upserts the (user, video) progress row. Completion defaults to
    /// "watched the whole video" unless the caller says otherwise.
    pub fn record_progress(&mut self, req: RecordProgressRequest) -> Result<Progress, AppError> {
        if self.user(&req.user_id).is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        let video = self
            .video(&req.video_id)
            .ok_or(AppError::NotFound("Video not found".to_string()))?;
        let course_id = video.course_id.clone();
        let completed = req
            .completed
            .unwrap_or(req.watched_seconds >= video.duration_seconds);

        if let Some(row) = self
            .progress
            .iter_mut()
            .find(|p| p.user_id == req.user_id && p.video_id.as_deref() == Some(&req.video_id))
        {
            row.watched_seconds = req.watched_seconds;
            row.completed = completed;
            row.updated_at = Utc::now();
            return Ok(row.clone());
        }

        let row = Progress {
            id: self.next_id("progress"),
            user_id: req.user_id,
            course_id,
            video_id: Some(req.video_id),
            watched_seconds: req.watched_seconds,
            completed,
            updated_at: Utc::now(),
        };
        self.progress.push(row.clone());
        Ok(row)
    }

    /// Grades a quiz submission against the answer key and records one
    /// attempt. Score is the rounded percentage of correct answers over
    /// all questions in the quiz; pass/fail comes from the threshold.
    pub fn submit_quiz_attempt(
        &mut self,
        course_id: &str,
        req: SubmitQuizRequest,
    ) -> Result<QuizResultResponse, AppError> {
        if self.user(&req.user_id).is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        let quiz = self
            .quiz_of_course(course_id)
            .ok_or(AppError::NotFound("This course has no quiz".to_string()))?;
        let quiz_id = quiz.id.clone();
        let pass_threshold = quiz.pass_threshold;

        if req.answers.is_empty() {
            return Err(AppError::MissingField("No answers submitted".to_string()));
        }

        let questions = self.questions_of_quiz(&quiz_id);
        let mut correct_count = 0usize;
        let mut graded = Vec::with_capacity(questions.len());
        for q in &questions {
            let correct = req.answers.get(&q.id) == Some(&q.correct_index);
            if correct {
                correct_count += 1;
            }
            graded.push(GradedQuestion {
                question_id: q.id.clone(),
                correct,
                correct_index: q.correct_index,
                explanation: q.explanation.clone(),
            });
        }

        let total = questions.len();
        let score_percent = if total > 0 {
            (correct_count as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        let passed = score_percent >= pass_threshold;

        let attempt = QuizAttempt {
            id: self.next_id("attempt"),
            quiz_id,
            user_id: req.user_id,
            score_percent,
            passed,
            attempted_at: Utc::now(),
        };
        let attempt_id = attempt.id.clone();
        self.quiz_attempts.push(attempt);

        Ok(QuizResultResponse {
            attempt_id,
            score_percent,
            passed,
            questions: graded,
        })
    }
}
