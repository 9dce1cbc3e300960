// src/models/client.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A tenant organization. Scopes its own users and assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,

    pub name: String,

    /// Reference to the client's logo asset (may be empty).
    pub logo_url: String,

    /// Primary brand color as a hex string (e.g. "#1E3A8A").
    pub primary_color: String,

    pub is_active: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new client organization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100, message = "Client name is required."))]
    pub name: String,

    #[serde(default)]
    pub logo_url: String,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,
}

fn default_primary_color() -> String {
    "#1E3A8A".to_string()
}
