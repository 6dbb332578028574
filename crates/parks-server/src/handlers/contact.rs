//! Contact form handler

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use parks_core::{ContactResponse, NewContactMessage};
use tracing::warn;

const INVALID_CONTACT: &str = "Invalid contact form data";

/// Store a contact form submission. There is deliberately no read endpoint.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewContactMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!("Contact form rejected: {}", e);
        ApiError::BadRequest(INVALID_CONTACT)
    })?;

    let message = state
        .storage
        .create_contact_message(&req)
        .await
        .map_err(|e| ApiError::from_storage(e, INVALID_CONTACT))?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_contact_created() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/contact",
            Some(json!({"name": "Alice", "email": "alice@example.com", "message": "Hi there"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"]["name"], "Alice");
        assert!(body["message"]["id"].is_string());
        assert!(body["message"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_contact_is_generic_400() {
        let app = test_app();
        for payload in [
            json!({"name": "Alice", "email": "not-an-email", "message": "Hi"}),
            json!({"name": "", "email": "alice@example.com", "message": "Hi"}),
            json!({"name": "Alice", "email": "alice@example.com"}),
            json!({"name": "Alice", "email": "alice@example.com", "message": 42}),
        ] {
            let (status, body) = send(&app, "POST", "/api/contact", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Invalid contact form data");
        }
    }

    #[tokio::test]
    async fn test_contact_messages_cannot_be_read_back() {
        let app = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/contact",
            Some(json!({"name": "Alice", "email": "alice@example.com", "message": "Hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, "GET", "/api/contact", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
