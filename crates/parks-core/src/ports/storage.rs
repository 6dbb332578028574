//! Storage traits for persistence

use crate::{Page, Result};
use async_trait::async_trait;
use parks_types::{ContactMessage, NewContactMessage, NewParkReview, NewUser, ParkReview, User};

/// User store
///
/// `create_user` stores `user.password` as given; hashing happens before the
/// call reaches a backend.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<User>;
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Contact message store (write-only)
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create_contact_message(&self, message: &NewContactMessage)
        -> Result<ContactMessage>;
}

/// Park review store
///
/// Listings are ordered newest first; reviews sharing a timestamp come out in
/// reverse insertion order.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create_park_review(&self, review: &NewParkReview) -> Result<ParkReview>;
    async fn get_park_reviews(&self, park_id: &str, page: Page) -> Result<Vec<ParkReview>>;
    async fn get_all_reviews(&self, page: Page) -> Result<Vec<ParkReview>>;
}

/// Everything a storage backend provides
pub trait ParkStore: UserStore + ContactStore + ReviewStore {}

impl<T: UserStore + ContactStore + ReviewStore> ParkStore for T {}
