//! Park review types

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted star rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted star rating
pub const MAX_RATING: i32 = 5;

/// A visitor review of a single park.
///
/// `park_id` refers to an entry of the static park catalog served with the
/// site; it is not checked against that catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkReview {
    pub id: String,
    pub park_id: String,
    pub reviewer_name: String,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

/// Review payload as submitted by the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParkReview {
    pub park_id: String,
    pub reviewer_name: String,
    #[serde(deserialize_with = "whole_number")]
    pub rating: i32,
    pub review_text: String,
}

/// Accept any whole JSON number (`5` or `5.0`); fractions and strings fail
fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
            if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
                Ok(v as i32)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}
