//! Nature Parks Server
//!
//! Backend for the Singapore nature parks site: stores contact form
//! submissions and park reviews, and serves the prebuilt frontend.
//!
//! Uses SQLite when `DATABASE_URL` is set and process memory otherwise.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use storage::Storage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

/// Full router: API, health check, and the static site with SPA fallback
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let index_path = static_dir.join("index.html");

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index_path)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(handlers::contact::create))
        .route(
            "/reviews",
            get(handlers::reviews::list_all).post(handlers::reviews::create),
        )
        .route("/reviews/:park_id", get(handlers::reviews::list_for_park))
}

#[cfg(test)]
mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    pub fn app_with(storage: Storage) -> Router {
        let state = AppState {
            storage: Arc::new(storage),
        };
        app(state, Path::new("/nonexistent/static"))
    }

    pub fn test_app() -> Router {
        app_with(Storage::in_memory())
    }

    /// Send one request and decode the JSON body (Null when empty or not JSON)
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{send, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (status, body) = send(&test_app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_static_site_serves_files_and_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>parks</html>").unwrap();
        std::fs::write(
            dir.path().join("data/parks.json"),
            r#"[{"id":"macritchie","name":"MacRitchie Reservoir"}]"#,
        )
        .unwrap();

        let app = super::app(
            super::AppState {
                storage: std::sync::Arc::new(super::Storage::in_memory()),
            },
            dir.path(),
        );

        let (status, body) = send(&app, "GET", "/data/parks.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "macritchie");

        // Client-side routes get the SPA shell
        let (status, _) = send(&app, "GET", "/reviews", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
