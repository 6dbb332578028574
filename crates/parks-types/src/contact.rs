//! Contact form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact form submission. Write-only from the API's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Contact form payload as submitted by the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
