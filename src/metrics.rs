// src/metrics.rs
//
// Derived metrics: percentages and counts that are never stored,
// always recomputed from the entity collections. All functions here
// are pure reads over the store.

use std::collections::HashSet;

use crate::models::{
    assignment::{Assignment, AssignmentStatus},
    quiz::AttemptScope,
    user::Role,
};
use crate::store::Store;

/// Percentage of a course's videos the user has completed, rounded to
/// the nearest integer. A course with zero videos is 0% complete for
/// everyone (no division by zero).
pub fn course_completion_percent(store: &Store, user_id: &str, course_id: &str) -> u32 {
    let video_count = store.videos_of_course(course_id).len();
    if video_count == 0 {
        return 0;
    }
    let completed = store
        .progress_of_user_course(user_id, course_id)
        .iter()
        .filter(|p| p.completed)
        .count();
    (completed as f64 / video_count as f64 * 100.0).round() as u32
}

/// Mean score over a user's quiz attempts, rounded. The scope decides
/// whether failed attempts count: the learner certificates view averages
/// passed attempts only, admin rollups average everything.
pub fn quiz_average_score(store: &Store, user_id: &str, scope: AttemptScope) -> u32 {
    let attempts: Vec<_> = store
        .quiz_attempts_of_user(user_id)
        .into_iter()
        .filter(|a| scope == AttemptScope::All || a.passed)
        .collect();
    if attempts.is_empty() {
        return 0;
    }
    let sum: u32 = attempts.iter().map(|a| a.score_percent).sum();
    (sum as f64 / attempts.len() as f64).round() as u32
}

/// Share of completed progress rows among all progress rows belonging
/// to the client's learners; 0 when they have no progress at all.
pub fn client_completion_rate(store: &Store, client_id: &str) -> u32 {
    let learner_ids: HashSet<&str> = store
        .users_of_client(client_id, Some(Role::Learner))
        .into_iter()
        .map(|u| u.id.as_str())
        .collect();
    let rows: Vec<_> = store
        .progress
        .iter()
        .filter(|p| learner_ids.contains(p.user_id.as_str()))
        .collect();
    if rows.is_empty() {
        return 0;
    }
    let completed = rows.iter().filter(|p| p.completed).count();
    (completed as f64 / rows.len() as f64 * 100.0).round() as u32
}

/// Status of one user+course pair: Pending with no progress rows,
/// Completed when every row is completed, In Progress otherwise.
fn course_status(store: &Store, user_id: &str, course_id: &str) -> AssignmentStatus {
    let rows = store.progress_of_user_course(user_id, course_id);
    if rows.is_empty() {
        AssignmentStatus::Pending
    } else if rows.iter().all(|p| p.completed) {
        AssignmentStatus::Completed
    } else {
        AssignmentStatus::InProgress
    }
}

/// Derived status of an assignment. Course assignments resolve directly
/// from the user's progress on that course. Track assignments aggregate
/// over the track's courses: Completed only when every course is
/// Completed, Pending only when every course is Pending (or the track
/// is empty), In Progress otherwise.
pub fn assignment_status(store: &Store, assignment: &Assignment) -> AssignmentStatus {
    if let Some(course_id) = &assignment.course_id {
        return course_status(store, &assignment.user_id, course_id);
    }
    if let Some(track_id) = &assignment.track_id {
        let statuses: Vec<AssignmentStatus> = store
            .courses_of_track(track_id)
            .iter()
            .map(|c| course_status(store, &assignment.user_id, &c.id))
            .collect();
        if statuses.is_empty() || statuses.iter().all(|s| *s == AssignmentStatus::Pending) {
            return AssignmentStatus::Pending;
        }
        if statuses.iter().all(|s| *s == AssignmentStatus::Completed) {
            return AssignmentStatus::Completed;
        }
        return AssignmentStatus::InProgress;
    }
    AssignmentStatus::Pending
}

/// Number of distinct users across a set of assignments.
pub fn unique_learner_count(assignments: &[&Assignment]) -> usize {
    assignments
        .iter()
        .map(|a| a.user_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn seeded() -> Store {
        seed::demo_store()
    }

    #[test]
    fn completion_is_zero_for_course_without_videos() {
        let store = seeded();
        // No such course, hence no videos.
        assert_eq!(course_completion_percent(&store, "user-3", "course-99"), 0);
    }

    #[test]
    fn lee_is_halfway_through_foundations() {
        // Seed: 2 videos, one completed row, one incomplete.
        let store = seeded();
        assert_eq!(course_completion_percent(&store, "user-3", "course-1"), 50);
    }

    #[test]
    fn completion_hits_100_only_when_every_video_is_done() {
        let mut store = seeded();
        assert_ne!(course_completion_percent(&store, "user-3", "course-1"), 100);
        for p in store.progress.iter_mut().filter(|p| p.user_id == "user-3") {
            p.completed = true;
        }
        assert_eq!(course_completion_percent(&store, "user-3", "course-1"), 100);
    }

    #[test]
    fn course_assignment_status_follows_progress() {
        let store = seeded();
        let lee = store
            .assignments_of_user("user-3")
            .into_iter()
            .next()
            .cloned()
            .unwrap();
        assert_eq!(assignment_status(&store, &lee), AssignmentStatus::InProgress);
    }

    #[test]
    fn track_assignment_without_progress_is_pending() {
        let store = seeded();
        let pat = store
            .assignments_of_user("user-4")
            .into_iter()
            .next()
            .cloned()
            .unwrap();
        assert!(pat.track_id.is_some());
        assert_eq!(assignment_status(&store, &pat), AssignmentStatus::Pending);
    }

    #[test]
    fn track_assignment_aggregates_course_statuses() {
        let mut store = seeded();
        let pat = store
            .assignments_of_user("user-4")
            .into_iter()
            .next()
            .cloned()
            .unwrap();

        // One course started: the whole track is in progress.
        store
            .record_progress(crate::models::progress::RecordProgressRequest {
                user_id: "user-4".to_string(),
                video_id: "video-1".to_string(),
                watched_seconds: 300,
                completed: None,
            })
            .unwrap();
        assert_eq!(assignment_status(&store, &pat), AssignmentStatus::InProgress);

        // Every video of every course completed: the track is completed.
        for video_id in ["video-2", "video-3"] {
            store
                .record_progress(crate::models::progress::RecordProgressRequest {
                    user_id: "user-4".to_string(),
                    video_id: video_id.to_string(),
                    watched_seconds: 1000,
                    completed: Some(true),
                })
                .unwrap();
        }
        assert_eq!(assignment_status(&store, &pat), AssignmentStatus::Completed);
    }

    #[test]
    fn quiz_average_scopes_differ() {
        let mut store = seeded();
        // Seed has one passed attempt at 100 for Lee; add a failed one at 40.
        store.quiz_attempts.push(crate::models::quiz::QuizAttempt {
            id: "attempt-x".to_string(),
            quiz_id: "quiz-1".to_string(),
            user_id: "user-3".to_string(),
            score_percent: 40,
            passed: false,
            attempted_at: chrono::Utc::now(),
        });
        assert_eq!(
            quiz_average_score(&store, "user-3", AttemptScope::PassedOnly),
            100
        );
        assert_eq!(quiz_average_score(&store, "user-3", AttemptScope::All), 70);
    }

    #[test]
    fn quiz_average_is_zero_without_attempts() {
        let store = seeded();
        assert_eq!(
            quiz_average_score(&store, "user-4", AttemptScope::All),
            0
        );
    }

    #[test]
    fn client_rate_counts_only_its_learners() {
        let store = seeded();
        // Seed: Lee has 2 progress rows, 1 completed. 50%.
        assert_eq!(client_completion_rate(&store, "client-1"), 50);
        assert_eq!(client_completion_rate(&store, "client-99"), 0);
    }

    #[test]
    fn unique_learners_collapse_duplicates() {
        let store = seeded();
        let a = store.assignments_of_client("client-1");
        assert_eq!(unique_learner_count(&a), 2);

        let doubled: Vec<_> = a.iter().chain(a.iter()).copied().collect();
        assert_eq!(unique_learner_count(&doubled), 2);
    }
}
