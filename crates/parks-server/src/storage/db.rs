//! SQLite database layer

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parks_core::ports::{ContactStore, ReviewStore, UserStore};
use parks_core::{
    ContactMessage, NewContactMessage, NewParkReview, NewUser, Page, ParkReview, ParksError,
    Result, User,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // Create parent directory if needed
        let filename = options.clone().get_filename();
        if let Some(parent) = filename.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database at: {}", database_url))?;

        tracing::info!("Database connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS park_reviews (
                id TEXT PRIMARY KEY,
                park_id TEXT NOT NULL,
                reviewer_name TEXT NOT NULL,
                rating INTEGER NOT NULL,
                review_text TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_park_reviews_park_created
            ON park_reviews (park_id, created_at DESC)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Close the pool. Later operations fail with `ParksError::Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

fn map_sqlx_error(e: sqlx::Error) -> ParksError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ParksError::Conflict(db.message().to_string())
        }
        other @ (sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
            ParksError::Unavailable(other.to_string())
        }
        other => ParksError::Database(other.to_string()),
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, password
            "#,
        )
        .bind(Self::new_id())
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into()))
    }
}

#[async_trait]
impl ContactStore for Database {
    async fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage> {
        let row: ContactMessageRow = sqlx::query_as(
            r#"
            INSERT INTO contact_messages (id, name, email, message)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(Self::new_id())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}

#[async_trait]
impl ReviewStore for Database {
    async fn create_park_review(&self, review: &NewParkReview) -> Result<ParkReview> {
        let row: ParkReviewRow = sqlx::query_as(
            r#"
            INSERT INTO park_reviews (id, park_id, reviewer_name, rating, review_text)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, park_id, reviewer_name, rating, review_text, created_at
            "#,
        )
        .bind(Self::new_id())
        .bind(&review.park_id)
        .bind(&review.reviewer_name)
        .bind(review.rating)
        .bind(&review.review_text)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get_park_reviews(&self, park_id: &str, page: Page) -> Result<Vec<ParkReview>> {
        let rows: Vec<ParkReviewRow> = sqlx::query_as(
            r#"
            SELECT id, park_id, reviewer_name, rating, review_text, created_at
            FROM park_reviews WHERE park_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(park_id)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_all_reviews(&self, page: Page) -> Result<Vec<ParkReview>> {
        let rows: Vec<ParkReviewRow> = sqlx::query_as(
            r#"
            SELECT id, park_id, reviewer_name, rating, review_text, created_at
            FROM park_reviews
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
            password: r.password,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactMessageRow {
    id: String,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(r: ContactMessageRow) -> Self {
        ContactMessage {
            id: r.id,
            name: r.name,
            email: r.email,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParkReviewRow {
    id: String,
    park_id: String,
    reviewer_name: String,
    rating: i32,
    review_text: String,
    created_at: DateTime<Utc>,
}

impl From<ParkReviewRow> for ParkReview {
    fn from(r: ParkReviewRow) -> Self {
        ParkReview {
            id: r.id,
            park_id: r.park_id,
            reviewer_name: r.reviewer_name,
            rating: r.rating,
            review_text: r.review_text,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One connection, so every query sees the same in-memory database
    async fn test_db() -> Database {
        Database::new("sqlite::memory:", 1).await.unwrap()
    }

    fn review(park_id: &str, name: &str, rating: i32) -> NewParkReview {
        NewParkReview {
            park_id: park_id.to_string(),
            reviewer_name: name.to_string(),
            rating,
            review_text: "Boardwalk was lovely".to_string(),
        }
    }

    #[tokio::test]
    async fn test_review_round_trip() {
        let db = test_db().await;
        let created = db
            .create_park_review(&review("macritchie", "Alice", 5))
            .await
            .unwrap();
        assert_eq!(created.rating, 5);
        assert_eq!(created.park_id, "macritchie");

        let listed = db
            .get_park_reviews("macritchie", Page::new(10, 0))
            .await
            .unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_listing_order_and_filter() {
        let db = test_db().await;
        for (park, name) in [("a", "first"), ("b", "other"), ("a", "second"), ("a", "third")] {
            db.create_park_review(&review(park, name, 3)).await.unwrap();
        }

        let reviews = db.get_park_reviews("a", Page::new(10, 0)).await.unwrap();
        let names: Vec<_> = reviews.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
        assert!(reviews.iter().all(|r| r.park_id == "a"));

        let all = db.get_all_reviews(Page::new(2, 0)).await.unwrap();
        let rest = db.get_all_reviews(Page::new(2, 2)).await.unwrap();
        let four = db.get_all_reviews(Page::new(4, 0)).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(rest.len(), 2);
        let joined: Vec<_> = all.into_iter().chain(rest).collect();
        assert_eq!(joined, four);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = test_db().await;
        let user = NewUser {
            username: "ranger".to_string(),
            password: "hash".to_string(),
        };
        let created = db.create_user(&user).await.unwrap();

        let err = db.create_user(&user).await.unwrap_err();
        assert!(matches!(err, ParksError::Conflict(_)), "got {err:?}");

        let found = db.get_user_by_username("ranger").await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(db.get_user(&created.id).await.unwrap(), Some(created));
        assert_eq!(db.get_user("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_contact_message_timestamp_is_set() {
        let db = test_db().await;
        let before = Utc::now() - chrono::Duration::seconds(1);
        let msg = db
            .create_contact_message(&NewContactMessage {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                message: "Where do I park?".to_string(),
            })
            .await
            .unwrap();
        assert!(msg.created_at >= before);
        assert_eq!(msg.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let db = test_db().await;
        db.close().await;

        let err = db.get_all_reviews(Page::new(10, 0)).await.unwrap_err();
        assert!(matches!(err, ParksError::Unavailable(_)), "got {err:?}");
    }
}
