//! Schema checks for insert payloads

use crate::error::{ParksError, Result};
use once_cell::sync::Lazy;
use parks_types::{NewContactMessage, NewParkReview, NewUser, MAX_RATING, MIN_RATING};
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Payloads that must pass a schema check before they are stored
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ParksError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl Validate for NewUser {
    fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

impl Validate for NewContactMessage {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        if !is_valid_email(&self.email) {
            return Err(ParksError::validation(format!(
                "invalid email address: {:?}",
                self.email
            )));
        }
        require("message", &self.message)
    }
}

impl Validate for NewParkReview {
    fn validate(&self) -> Result<()> {
        require("parkId", &self.park_id)?;
        require("reviewerName", &self.reviewer_name)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ParksError::validation(format!(
                "rating {} outside {}..={}",
                self.rating, MIN_RATING, MAX_RATING
            )));
        }
        require("reviewText", &self.review_text)
    }
}
