//! JSON envelopes returned by the HTTP API

use crate::{ContactMessage, ParkReview, StorageKind};
use serde::{Deserialize, Serialize};

/// `POST /api/contact` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: ContactMessage,
}

/// `POST /api/reviews` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub review: ParkReview,
}

/// Review listing body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub success: bool,
    pub reviews: Vec<ParkReview>,
}

/// Body of every failed API call. `error` is a fixed, generic message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageKind,
}
