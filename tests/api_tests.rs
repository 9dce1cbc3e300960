// tests/api_tests.rs

use airx_backend::{config::Config, routes, state::AppState, store};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app_with(store: store::Store) -> String {
    let config = Config {
        port: 0,
        rust_log: "error".to_string(),
        seed_demo: false,
    };

    let state = AppState {
        store: store::shared(store),
        config,
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Spawns the app preloaded with the demo dataset.
async fn spawn_app() -> String {
    spawn_app_with(store::seed::demo_store()).await
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_client_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("Client {}", &uuid::Uuid::new_v4().to_string()[..8]);

    // Act
    let response = client
        .post(format!("{}/api/clients", address))
        .json(&serde_json::json!({ "name": unique_name }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["name"], unique_name.as_str());
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn create_client_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: empty name
    let response = client
        .post(format!("{}/api/clients", address))
        .json(&serde_json::json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn bulk_add_drops_blank_lines() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let tag = &uuid::Uuid::new_v4().to_string()[..8];

    // Act: two addresses separated by a blank line, plus a trailing newline
    let response = client
        .post(format!("{}/api/users/bulk", address))
        .json(&serde_json::json!({
            "client_id": "client-1",
            "emails": format!("a-{}@x.com\n\nb-{}@x.com\n", tag, tag),
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: exactly 2 active learners created
    assert_eq!(response.status().as_u16(), 201);
    let users: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(users.len(), 2);
    for user in &users {
        assert_eq!(user["is_active"], true);
        assert_eq!(user["role"], "learner");
        assert_eq!(user["client_id"], "client-1");
    }
}

#[tokio::test]
async fn bulk_add_rejects_duplicate_emails() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let users_before: Vec<serde_json::Value> = client
        .get(format!("{}/api/clients/client-1/users", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Act: one address the seed already owns
    let response = client
        .post(format!("{}/api/users/bulk", address))
        .json(&serde_json::json!({
            "client_id": "client-1",
            "emails": "admin@acme.com\nnew@x.com\n",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: conflict, and nobody was created
    assert_eq!(response.status().as_u16(), 409);

    let users_after: Vec<serde_json::Value> = client
        .get(format!("{}/api/clients/client-1/users", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users_after.len(), users_before.len());
}

#[tokio::test]
async fn assigning_a_course_to_n_users_creates_n_rows() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/assignments", address))
        .json(&serde_json::json!({
            "client_id": "client-1",
            "user_ids": ["user-4", "user-5"],
            "course_id": "course-2",
            "assigned_by": "user-2",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let rows: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row["course_id"], "course-2");
        assert_eq!(row["track_id"], serde_json::Value::Null);
        assert_eq!(row["assigned_by"], "user-2");
    }
}

#[tokio::test]
async fn assignment_must_reference_exactly_one_content_item() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: both course and track
    let both = client
        .post(format!("{}/api/assignments", address))
        .json(&serde_json::json!({
            "client_id": "client-1",
            "user_ids": ["user-4"],
            "course_id": "course-1",
            "track_id": "track-1",
            "assigned_by": "user-2",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Act: neither
    let neither = client
        .post(format!("{}/api/assignments", address))
        .json(&serde_json::json!({
            "client_id": "client-1",
            "user_ids": ["user-4"],
            "assigned_by": "user-2",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(both.status().as_u16(), 400);
    assert_eq!(neither.status().as_u16(), 400);
}

#[tokio::test]
async fn deactivation_preserves_progress_and_assignments() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let progress_before: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/courses/course-1/progress", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let assignments_before: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Act
    let response = client
        .put(format!("{}/api/users/user-3/deactivate", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: flag flipped, history intact
    assert_eq!(response.status().as_u16(), 200);
    let user: serde_json::Value = response.json().await.unwrap();
    assert_eq!(user["is_active"], false);

    let progress_after: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/courses/course-1/progress", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let assignments_after: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(progress_before.len(), progress_after.len());
    assert_eq!(assignments_before.len(), assignments_after.len());
}

#[tokio::test]
async fn lee_is_halfway_and_in_progress() {
    // Arrange: the seed gives Lee 1 of 2 videos completed in course 1
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let dashboard: serde_json::Value = client
        .get(format!("{}/api/users/user-3/dashboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    let item = dashboard["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["content_title"] == "AI Risk Foundations")
        .expect("Assigned course missing from dashboard");
    assert_eq!(item["completion_percent"], 50);
    assert_eq!(item["status"], "In Progress");
}

#[tokio::test]
async fn quiz_grading_respects_threshold() {
    // Arrange: course 1's quiz has threshold 70, one question, answer index 2
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: correct answer
    let passed: serde_json::Value = client
        .post(format!("{}/api/courses/course-1/quiz/submit", address))
        .json(&serde_json::json!({
            "user_id": "user-4",
            "answers": { "question-1": 2 },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Act: wrong answer
    let failed: serde_json::Value = client
        .post(format!("{}/api/courses/course-1/quiz/submit", address))
        .json(&serde_json::json!({
            "user_id": "user-4",
            "answers": { "question-1": 0 },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(passed["score_percent"], 100);
    assert_eq!(passed["passed"], true);
    assert_eq!(failed["score_percent"], 0);
    assert_eq!(failed["passed"], false);
}

#[tokio::test]
async fn quiz_questions_hide_the_answer_key() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let quiz: serde_json::Value = client
        .get(format!("{}/api/courses/course-1/quiz", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(quiz["pass_threshold"], 70);
    let question = &quiz["questions"].as_array().unwrap()[0];
    assert!(question["prompt"].is_string());
    assert!(question.get("correct_index").is_none());
    assert!(question.get("explanation").is_none());
}

#[tokio::test]
async fn removing_an_assignment_shrinks_only_assignments() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let before: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let progress_before: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/courses/course-1/progress", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Act
    let response = client
        .delete(format!("{}/api/assignments/assignment-1", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);

    let after: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let progress_after: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/courses/course-1/progress", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(after.len(), before.len() - 1);
    assert_eq!(progress_after.len(), progress_before.len());
}

#[tokio::test]
async fn dangling_content_degrades_to_unknown() {
    // Arrange: an assignment pointing at a course that no longer exists
    let mut store = airx_backend::store::seed::demo_store();
    store
        .assignments
        .push(airx_backend::models::assignment::Assignment {
            id: "assignment-x".to_string(),
            client_id: "client-1".to_string(),
            user_id: "user-5".to_string(),
            course_id: Some("course-99".to_string()),
            track_id: None,
            assigned_by: "user-2".to_string(),
            assigned_at: chrono::Utc::now(),
            due_at: None,
        });
    let address = spawn_app_with(store).await;
    let client = reqwest::Client::new();

    // Act
    let views: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-5/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: the list still renders, with the sentinel title
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["content_title"], "Unknown");
    assert_eq!(views[0]["status"], "Pending");
}

#[tokio::test]
async fn course_creation_requires_a_video() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/courses", address))
        .json(&serde_json::json!({
            "title": "Empty Course",
            "description": "No videos here",
            "created_by": "user-1",
            "videos": [],
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn course_creation_with_quiz_works_end_to_end() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: create, then read the detail view back
    let created: serde_json::Value = client
        .post(format!("{}/api/courses", address))
        .json(&serde_json::json!({
            "title": "Prompt Hygiene",
            "description": "Safe prompting habits.",
            "created_by": "user-1",
            "videos": [
                { "title": "Why it matters", "duration_seconds": 120 },
                { "title": "Do and don't", "duration_seconds": 240 },
            ],
            "quiz": {
                "pass_threshold": 80,
                "questions": [
                    {
                        "prompt": "Should you paste secrets into prompts?",
                        "options": ["Yes", "No", ""],
                        "correct_index": 1,
                        "explanation": "Never share secrets.",
                    },
                    // Blank prompt: dropped entirely
                    { "prompt": "  ", "options": ["A"], "correct_index": 0 },
                ],
            },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let detail: serde_json::Value = client
        .get(format!("{}/api/courses/{}", address, created["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: videos in input order with 1-based positions, quiz kept
    let videos = detail["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["position"], 1);
    assert_eq!(videos[0]["title"], "Why it matters");
    assert_eq!(videos[1]["position"], 2);
    assert_eq!(detail["question_count"], 1);
    assert_eq!(detail["pass_threshold"], 80);
}

#[tokio::test]
async fn track_creation_orders_courses_by_selection() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: select course 2 before course 1
    let created: serde_json::Value = client
        .post(format!("{}/api/tracks", address))
        .json(&serde_json::json!({
            "title": "Reverse Track",
            "description": "Practice first, theory second.",
            "course_ids": ["course-2", "course-1"],
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let detail: serde_json::Value = client
        .get(format!("{}/api/tracks/{}", address, created["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    let courses = detail["courses"].as_array().unwrap();
    assert_eq!(courses[0]["id"], "course-2");
    assert_eq!(courses[1]["id"], "course-1");
}

#[tokio::test]
async fn client_dashboard_rolls_up_the_seed() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let dashboard: serde_json::Value = client
        .get(format!("{}/api/clients/client-1/dashboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: 3 learners, 2 assignments to 2 distinct learners,
    // 1 of Lee's 2 progress rows completed
    assert_eq!(dashboard["learner_count"], 3);
    assert_eq!(dashboard["assignment_count"], 2);
    assert_eq!(dashboard["unique_assigned_learners"], 2);
    assert_eq!(dashboard["completion_rate"], 50);
    assert_eq!(dashboard["learners"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn analytics_reports_platform_totals() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let analytics: serde_json::Value = client
        .get(format!("{}/api/analytics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(analytics["client_count"], 1);
    assert_eq!(analytics["learner_count"], 3);
    assert_eq!(analytics["course_count"], 2);
    assert_eq!(analytics["avg_completion"], 50);
    assert_eq!(analytics["clients"][0]["client_name"], "Acme Corp");
}

#[tokio::test]
async fn deleting_a_client_does_not_cascade() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .delete(format!("{}/api/clients/client-1", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: client gone, its users' history still resolvable
    assert_eq!(response.status().as_u16(), 200);

    let assignments: Vec<serde_json::Value> = client
        .get(format!("{}/api/users/user-3/assignments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
}
