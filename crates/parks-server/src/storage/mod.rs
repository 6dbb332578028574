//! Storage layer
//!
//! Two interchangeable backends behind the `ParkStore` port: SQLite through
//! sqlx when `DATABASE_URL` is set, DashMap in process memory otherwise. The
//! backend is picked once at startup and wrapped in [`Storage`], which applies
//! the same validation, uniqueness and paging rules to both.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use crate::config::Config;
use anyhow::{Context, Result as AnyResult};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use parks_core::pagination::DEFAULT_MAX_PAGE_LIMIT;
use parks_core::ports::ParkStore;
use parks_core::{
    ContactMessage, NewContactMessage, NewParkReview, NewUser, Page, ParkReview, ParksError,
    Result, StorageKind, User, Validate,
};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Storage {
    backend: Arc<dyn ParkStore>,
    kind: StorageKind,
    max_page_limit: u32,
}

impl Storage {
    pub fn new(backend: Arc<dyn ParkStore>, kind: StorageKind, max_page_limit: u32) -> Self {
        Self {
            backend,
            kind,
            max_page_limit,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            StorageKind::Memory,
            DEFAULT_MAX_PAGE_LIMIT,
        )
    }

    /// Select the backend for this process from configuration
    pub async fn from_config(config: &Config) -> AnyResult<Self> {
        match config.database_url.as_deref() {
            Some(url) => {
                info!("DATABASE_URL set, using relational storage");
                let db = Database::new(url, config.db_max_connections)
                    .await
                    .context("Failed to initialize database")?;
                Ok(Self::new(
                    Arc::new(db),
                    StorageKind::Database,
                    config.max_page_limit,
                ))
            }
            None => {
                warn!("DATABASE_URL not set, using in-memory storage");
                Ok(Self::new(
                    Arc::new(MemoryStore::new()),
                    StorageKind::Memory,
                    config.max_page_limit,
                ))
            }
        }
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    // User operations
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        user.validate()?;

        if self
            .backend
            .get_user_by_username(&user.username)
            .await?
            .is_some()
        {
            return Err(ParksError::Conflict(format!(
                "username {:?} already exists",
                user.username
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(user.password.as_bytes(), &salt)
            .map_err(|e| ParksError::PasswordHash(e.to_string()))?
            .to_string();

        let created = self
            .backend
            .create_user(&NewUser {
                username: user.username.clone(),
                password: password_hash,
            })
            .await?;
        info!("Created user {}", created.id);
        Ok(created)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.backend.get_user(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.backend.get_user_by_username(username).await
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(user: &User, candidate: &str) -> bool {
        match PasswordHash::new(&user.password) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!("Stored password for user {} is not a valid hash: {}", user.id, e);
                false
            }
        }
    }

    // Contact operations
    pub async fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage> {
        message.validate()?;
        let created = self.backend.create_contact_message(message).await?;
        info!("Stored contact message {}", created.id);
        Ok(created)
    }

    // Review operations
    pub async fn create_park_review(&self, review: &NewParkReview) -> Result<ParkReview> {
        review.validate()?;
        let created = self.backend.create_park_review(review).await?;
        info!(
            "Stored review {} for park {} (rating {})",
            created.id, created.park_id, created.rating
        );
        Ok(created)
    }

    pub async fn get_park_reviews(&self, park_id: &str, page: Page) -> Result<Vec<ParkReview>> {
        let page = page.clamped(self.max_page_limit);
        debug!(
            "Listing reviews for {}: limit={}, offset={}",
            park_id, page.limit, page.offset
        );
        self.backend.get_park_reviews(park_id, page).await
    }

    pub async fn get_all_reviews(&self, page: Page) -> Result<Vec<ParkReview>> {
        let page = page.clamped(self.max_page_limit);
        debug!("Listing all reviews: limit={}, offset={}", page.limit, page.offset);
        self.backend.get_all_reviews(page).await
    }
}
