//! Restaurant rows and the read-only profile handed to the review generator.
//!
//! The DB row mirrors the hybrid model: Google-synced basics plus
//! owner-configured review optimization data (specialties, SEO keywords,
//! custom templates) stored as JSONB arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Restaurant tier — drives template defaults and closing-phrase register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Casual,
    Upscale,
    FastCasual,
}

impl Tier {
    /// Parses the stored label. Unknown labels fall back to `Casual`,
    /// matching the column default.
    pub fn from_label(label: &str) -> Self {
        match label {
            "upscale" => Tier::Upscale,
            "fast_casual" => Tier::FastCasual,
            _ => Tier::Casual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Casual => "casual",
            Tier::Upscale => "upscale",
            Tier::FastCasual => "fast_casual",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RestaurantRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub restaurant_type: String,
    /// JSONB array of dish names to highlight in reviews.
    pub specialties: Value,
    /// JSONB array of local SEO keyword phrases, in owner-configured order.
    pub seo_keywords: Value,
    /// JSONB array of branded review template strings (may be empty).
    pub custom_templates: Value,
    pub google_review_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only input to review generation, detached from the storage row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantProfile {
    pub name: String,
    pub cuisine: String,
    pub tier: Tier,
    pub location: String,
    pub seo_keywords: Vec<String>,
    pub custom_templates: Vec<String>,
}

impl RestaurantProfile {
    pub fn from_row(row: &RestaurantRow) -> Self {
        RestaurantProfile {
            name: row.name.clone(),
            cuisine: row.cuisine.clone(),
            tier: Tier::from_label(&row.restaurant_type),
            location: row.location.clone(),
            seo_keywords: string_array(&row.seo_keywords),
            custom_templates: string_array(&row.custom_templates),
        }
    }
}

/// Reads a JSONB value as a list of strings. Malformed values (legacy rows,
/// manual edits) degrade to an empty list rather than failing the request.
fn string_array(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_from_label_known_values() {
        assert_eq!(Tier::from_label("casual"), Tier::Casual);
        assert_eq!(Tier::from_label("upscale"), Tier::Upscale);
        assert_eq!(Tier::from_label("fast_casual"), Tier::FastCasual);
    }

    #[test]
    fn test_tier_from_label_unknown_defaults_to_casual() {
        assert_eq!(Tier::from_label("food_truck"), Tier::Casual);
        assert_eq!(Tier::from_label(""), Tier::Casual);
    }

    #[test]
    fn test_string_array_preserves_order() {
        let value = json!(["best tacos", "date night spot", "near me"]);
        assert_eq!(
            string_array(&value),
            vec!["best tacos", "date night spot", "near me"]
        );
    }

    #[test]
    fn test_string_array_tolerates_malformed_value() {
        assert!(string_array(&json!("not an array")).is_empty());
        assert!(string_array(&json!(null)).is_empty());
    }

    #[test]
    fn test_string_array_skips_non_string_items() {
        let value = json!(["ok", 42, null]);
        assert_eq!(string_array(&value), vec!["ok"]);
    }
}
