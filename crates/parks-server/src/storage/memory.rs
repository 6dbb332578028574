//! In-memory storage using DashMap, used when no database is configured

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use parks_core::ports::{ContactStore, ReviewStore, UserStore};
use parks_core::{
    ContactMessage, NewContactMessage, NewParkReview, NewUser, Page, ParkReview, ParksError,
    Result, User,
};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local store. Starts empty and is lost on restart.
pub struct MemoryStore {
    users: DashMap<String, User>,
    /// username -> id; the entry is the uniqueness constraint
    usernames: DashMap<String, String>,
    contact_messages: DashMap<String, ContactMessage>,
    park_reviews: DashMap<String, Entry<ParkReview>>,
    seq: AtomicU64,
}

/// Record plus its insertion sequence, used to order equal timestamps
struct Entry<T> {
    seq: u64,
    record: T,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            contact_messages: DashMap::new(),
            park_reviews: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Scan all reviews matching `filter`, newest first, then slice to `page`
    fn list_reviews(&self, page: Page, filter: impl Fn(&ParkReview) -> bool) -> Vec<ParkReview> {
        let mut matching: Vec<(u64, ParkReview)> = self
            .park_reviews
            .iter()
            .filter(|entry| filter(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();

        matching.sort_by_key(|(seq, review)| Reverse((review.created_at, *seq)));

        page.apply(matching.into_iter().map(|(_, review)| review))
    }

    /// Number of stored contact messages. There is no API to read them back.
    #[cfg(test)]
    pub fn contact_message_count(&self) -> usize {
        self.contact_messages.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        match self.usernames.entry(user.username.clone()) {
            MapEntry::Occupied(_) => Err(ParksError::Conflict(format!(
                "username {:?} already exists",
                user.username
            ))),
            MapEntry::Vacant(slot) => {
                let user = User {
                    id: Self::new_id(),
                    username: user.username.clone(),
                    password: user.password.clone(),
                };
                self.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(id) = self.usernames.get(username).map(|id| id.clone()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage> {
        let message = ContactMessage {
            id: Self::new_id(),
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            created_at: Utc::now(),
        };
        self.contact_messages
            .insert(message.id.clone(), message.clone());
        Ok(message)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn create_park_review(&self, review: &NewParkReview) -> Result<ParkReview> {
        let review = ParkReview {
            id: Self::new_id(),
            park_id: review.park_id.clone(),
            reviewer_name: review.reviewer_name.clone(),
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_at: Utc::now(),
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.park_reviews.insert(
            review.id.clone(),
            Entry {
                seq,
                record: review.clone(),
            },
        );
        Ok(review)
    }

    async fn get_park_reviews(&self, park_id: &str, page: Page) -> Result<Vec<ParkReview>> {
        Ok(self.list_reviews(page, |r| r.park_id == park_id))
    }

    async fn get_all_reviews(&self, page: Page) -> Result<Vec<ParkReview>> {
        Ok(self.list_reviews(page, |_| true))
    }
}
