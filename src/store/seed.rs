// src/store/seed.rs
//
// Demo dataset: one tenant (Acme Corp) with an admin and three
// learners, two courses with quizzes, one track bundling both, and
// enough assignments/progress to light up every dashboard.

use chrono::Utc;

use crate::models::{
    assignment::Assignment,
    client::Client,
    course::{Course, Video},
    progress::Progress,
    quiz::{Question, Quiz, QuizAttempt},
    track::{Track, TrackCourse},
    user::{Role, User},
};

use super::Store;

pub fn demo_store() -> Store {
    let now = Utc::now();
    let mut store = Store::new();

    store.clients.push(Client {
        id: "client-1".to_string(),
        name: "Acme Corp".to_string(),
        logo_url: String::new(),
        primary_color: "#1E3A8A".to_string(),
        is_active: true,
        created_at: now,
    });

    let users = [
        ("user-1", None, "super@airx.app", "Super", "Admin", Role::SuperAdmin),
        ("user-2", Some("client-1"), "admin@acme.com", "Alex", "Admin", Role::ClientAdmin),
        ("user-3", Some("client-1"), "lee@acme.com", "Lee", "Learner", Role::Learner),
        ("user-4", Some("client-1"), "pat@acme.com", "Pat", "Learner", Role::Learner),
        ("user-5", Some("client-1"), "sam@acme.com", "Sam", "Learner", Role::Learner),
    ];
    for (id, client_id, email, first, last, role) in users {
        store.users.push(User {
            id: id.to_string(),
            client_id: client_id.map(str::to_string),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
            is_active: true,
            created_at: now,
        });
    }

    store.courses.push(Course {
        id: "course-1".to_string(),
        title: "AI Risk Foundations".to_string(),
        description: "Basics of AI risk, governance, and safety.".to_string(),
        thumbnail_url: "/ai-risk-foundations.jpg".to_string(),
        created_by: "user-1".to_string(),
        created_at: now,
    });
    store.courses.push(Course {
        id: "course-2".to_string(),
        title: "Responsible AI in Practice".to_string(),
        description: "Everyday usage guidelines and controls.".to_string(),
        thumbnail_url: "/responsible-ai-practice.jpg".to_string(),
        created_by: "user-1".to_string(),
        created_at: now,
    });

    let videos = [
        ("video-1", "course-1", "Intro to AI Risks", 1u32, 300u32),
        ("video-2", "course-1", "Risk Categories", 2, 420),
        ("video-3", "course-2", "Golden Rule: Purpose-Data-Review", 1, 360),
    ];
    for (id, course_id, title, position, duration) in videos {
        store.videos.push(Video {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{}.mp4", id),
            position,
            duration_seconds: duration,
            created_at: now,
        });
    }

    store.quizzes.push(Quiz {
        id: "quiz-1".to_string(),
        course_id: "course-1".to_string(),
        pass_threshold: 70,
        created_at: now,
    });
    store.quizzes.push(Quiz {
        id: "quiz-2".to_string(),
        course_id: "course-2".to_string(),
        pass_threshold: 80,
        created_at: now,
    });

    store.questions.push(Question {
        id: "question-1".to_string(),
        quiz_id: "quiz-1".to_string(),
        prompt: "Which is NOT an AI risk category?".to_string(),
        options: vec![
            "Bias".to_string(),
            "Hallucination".to_string(),
            "Gravity".to_string(),
        ],
        correct_index: 2,
        explanation: "Gravity isn't an AI risk.".to_string(),
    });
    store.questions.push(Question {
        id: "question-2".to_string(),
        quiz_id: "quiz-2".to_string(),
        prompt: "What are the 3 steps in the daily check?".to_string(),
        options: vec![
            "Purpose-Data-Review".to_string(),
            "Plan-Do-Check".to_string(),
            "Collect-Share-Skip".to_string(),
        ],
        correct_index: 0,
        explanation: "Purpose-Data-Review is the golden rule.".to_string(),
    });

    store.tracks.push(Track {
        id: "track-1".to_string(),
        title: "AI Risk Awareness Track".to_string(),
        description: "Foundational awareness for all employees.".to_string(),
        created_at: now,
    });
    store.track_courses.push(TrackCourse {
        track_id: "track-1".to_string(),
        course_id: "course-1".to_string(),
        position: 1,
    });
    store.track_courses.push(TrackCourse {
        track_id: "track-1".to_string(),
        course_id: "course-2".to_string(),
        position: 2,
    });

    // Lee owes course 1 directly; Pat owes the whole track.
    store.assignments.push(Assignment {
        id: "assignment-1".to_string(),
        client_id: "client-1".to_string(),
        user_id: "user-3".to_string(),
        course_id: Some("course-1".to_string()),
        track_id: None,
        assigned_by: "user-2".to_string(),
        assigned_at: now,
        due_at: None,
    });
    store.assignments.push(Assignment {
        id: "assignment-2".to_string(),
        client_id: "client-1".to_string(),
        user_id: "user-4".to_string(),
        course_id: None,
        track_id: Some("track-1".to_string()),
        assigned_by: "user-2".to_string(),
        assigned_at: now,
        due_at: None,
    });

    // Lee finished the first video and is partway through the second.
    store.progress.push(Progress {
        id: "progress-1".to_string(),
        user_id: "user-3".to_string(),
        course_id: "course-1".to_string(),
        video_id: Some("video-1".to_string()),
        watched_seconds: 300,
        completed: true,
        updated_at: now,
    });
    store.progress.push(Progress {
        id: "progress-2".to_string(),
        user_id: "user-3".to_string(),
        course_id: "course-1".to_string(),
        video_id: Some("video-2".to_string()),
        watched_seconds: 180,
        completed: false,
        updated_at: now,
    });

    store.quiz_attempts.push(QuizAttempt {
        id: "attempt-1".to_string(),
        quiz_id: "quiz-1".to_string(),
        user_id: "user-3".to_string(),
        score_percent: 100,
        passed: true,
        attempted_at: now,
    });

    // Leave headroom above the fixed seed ids for generated ones.
    store.next_id = 100;

    store
}
