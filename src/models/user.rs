// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Platform role. Learners and client admins belong to a client;
/// super admins are platform-level and carry no client reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ClientAdmin,
    Learner,
}

/// A platform account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Owning client. `None` only for super admins.
    pub client_id: Option<String>,

    pub email: String,

    pub first_name: String,

    pub last_name: String,

    pub role: Role,

    /// Deactivated users keep their progress and assignment history.
    pub is_active: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a single user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub client_id: Option<String>,

    #[validate(email(message = "A valid email is required."))]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub role: Role,
}

/// DTO for bulk-adding learners by email list, one address per line.
/// Blank lines are dropped.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkCreateUsersRequest {
    #[validate(length(min = 1, message = "Client id is required."))]
    pub client_id: String,

    #[validate(length(min = 1, message = "At least one email is required."))]
    pub emails: String,
}

/// Query parameters for listing a client's users.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<Role>,
}
