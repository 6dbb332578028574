//! Park review handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use parks_core::{NewParkReview, Page, ReviewListResponse, ReviewResponse};
use serde::Deserialize;
use tracing::warn;

const INVALID_REVIEW: &str = "Invalid review data";
const FETCH_FAILED: &str = "Failed to fetch reviews";

/// Default page size for a single park's reviews
pub const PARK_REVIEWS_LIMIT: u32 = 10;
/// Default page size for the site-wide listing
pub const ALL_REVIEWS_LIMIT: u32 = 50;

/// Raw `limit`/`offset` query values. Kept as strings so that junk input
/// falls back to the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    limit: Option<String>,
    offset: Option<String>,
}

impl PageQuery {
    pub fn page(&self, default_limit: u32) -> Page {
        let limit = parse_count(self.limit.as_deref())
            .filter(|&n| n > 0)
            .unwrap_or(default_limit);
        let offset = parse_count(self.offset.as_deref()).unwrap_or(0);
        Page::new(limit, offset)
    }
}

/// Read the leading run of digits, so `2.5` is 2 and `5abc` is 5
fn parse_count(raw: Option<&str>) -> Option<u32> {
    let s = raw?.trim_start();
    let digits = s
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s, |end| &s[..end]);
    digits.parse().ok()
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewParkReview>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!("Review submission rejected: {}", e);
        ApiError::BadRequest(INVALID_REVIEW)
    })?;

    let review = state
        .storage
        .create_park_review(&req)
        .await
        .map_err(|e| ApiError::from_storage(e, INVALID_REVIEW))?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            success: true,
            review,
        }),
    ))
}

pub async fn list_for_park(
    State(state): State<AppState>,
    Path(park_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let reviews = state
        .storage
        .get_park_reviews(&park_id, query.page(PARK_REVIEWS_LIMIT))
        .await
        .map_err(|e| ApiError::from_storage(e, FETCH_FAILED))?;

    Ok(Json(ReviewListResponse {
        success: true,
        reviews,
    }))
}

pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let reviews = state
        .storage
        .get_all_reviews(query.page(ALL_REVIEWS_LIMIT))
        .await
        .map_err(|e| ApiError::from_storage(e, FETCH_FAILED))?;

    Ok(Json(ReviewListResponse {
        success: true,
        reviews,
    }))
}
