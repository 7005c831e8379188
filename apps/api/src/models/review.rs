#![allow(dead_code)]

//! Review rows — both public generated reviews and private negative feedback
//! live in the same table, distinguished by `review_type`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a submission is a public review (ratings 4–5) or private feedback
/// routed to management (ratings 1–3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    Public,
    Private,
}

impl ReviewType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewType::Public => "public",
            ReviewType::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub rating: i16,
    pub review_type: String,

    // Public review content
    pub favorite_dish: Option<String>,
    pub occasion: Option<String>,
    pub review_text: Option<String>,
    pub word_count: Option<i32>,

    // Private feedback content
    pub issue_area: Option<String>,
    pub feedback_details: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub requires_followup: bool,
    pub followup_completed: bool,

    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewRow {
    /// Positive reviews (4–5 stars) take the public path.
    pub fn is_positive(&self) -> bool {
        self.rating >= 4
    }
}
