//! Parks Core Library
//!
//! Domain errors, payload validation, pagination and the storage port shared
//! by every backend of the parks server.

// Re-export pure types from parks-types
pub use parks_types::*;

pub mod error;
pub mod pagination;
pub mod ports;
pub mod validation;

pub use error::{ParksError, Result};
pub use pagination::Page;
pub use validation::Validate;
