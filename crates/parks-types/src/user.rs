//! User types

use serde::{Deserialize, Serialize};

/// User account
///
/// `password` holds a password hash, never the submitted plaintext, and is
/// left out of any serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// User creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
