//! HTTP handlers

pub mod contact;
pub mod health;
pub mod reviews;

pub use health::health;
