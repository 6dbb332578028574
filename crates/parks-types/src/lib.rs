//! Parks Types - Pure type definitions
//!
//! Records persisted by the parks backend and the JSON envelopes the API
//! wraps them in. No async runtime or storage dependencies live here.

pub mod api;
pub mod contact;
pub mod review;
pub mod user;

pub use api::*;
pub use contact::*;
pub use review::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Which storage backend the process selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    Database,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Database => write!(f, "database"),
        }
    }
}
