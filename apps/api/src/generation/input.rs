//! Input normalization — the first phase of the generation pipeline.
//!
//! The rating gate lives in the type system: `PositiveRating` can only be
//! constructed for 4 or 5, so ratings 1–3 (the private feedback path) cannot
//! reach the generator by construction.

use crate::errors::AppError;

/// A rating on the positive review path. The only constructor rejects
/// anything outside {4, 5}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveRating(u8);

impl PositiveRating {
    pub fn new(rating: u8) -> Result<Self, AppError> {
        match rating {
            4 | 5 => Ok(PositiveRating(rating)),
            other => Err(AppError::InvalidRating(other)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Validated customer input for one generation call.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub rating: PositiveRating,
    /// Parsed dish names, original order, no dedup. May be empty.
    pub dishes: Vec<String>,
    /// Free string; recognized occasions get richer phrasing, everything else
    /// falls back to generic descriptors.
    pub occasion: String,
    pub special_detail: Option<String>,
    pub standout_detail: Option<String>,
}

impl ReviewRequest {
    pub fn new(
        rating: u8,
        favorite_dish: &str,
        occasion: impl Into<String>,
        special_detail: Option<String>,
        standout_detail: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(ReviewRequest {
            rating: PositiveRating::new(rating)?,
            dishes: parse_dishes(favorite_dish),
            occasion: occasion.into(),
            special_detail: none_if_blank(special_detail),
            standout_detail: none_if_blank(standout_detail),
        })
    }

    /// True iff the customer supplied either optional detail field.
    pub fn is_personalized(&self) -> bool {
        self.special_detail.is_some() || self.standout_detail.is_some()
    }
}

/// Splits a comma-separated dish string: trim each segment, drop empties,
/// preserve order, no dedup.
pub fn parse_dishes(favorite_dish: &str) -> Vec<String> {
    favorite_dish
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rating_accepts_4_and_5() {
        assert_eq!(PositiveRating::new(4).unwrap().value(), 4);
        assert_eq!(PositiveRating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_positive_rating_rejects_everything_else() {
        for rating in [0u8, 1, 2, 3, 6, 10] {
            assert!(
                PositiveRating::new(rating).is_err(),
                "rating {rating} must be rejected"
            );
        }
    }

    #[test]
    fn test_parse_dishes_splits_and_trims() {
        assert_eq!(
            parse_dishes("tacos, margaritas ,  queso"),
            vec!["tacos", "margaritas", "queso"]
        );
    }

    #[test]
    fn test_parse_dishes_drops_empty_segments() {
        assert_eq!(parse_dishes("tacos,, ,queso"), vec!["tacos", "queso"]);
        assert!(parse_dishes("").is_empty());
        assert!(parse_dishes(" , , ").is_empty());
    }

    #[test]
    fn test_parse_dishes_keeps_order_and_duplicates() {
        assert_eq!(
            parse_dishes("queso, tacos, queso"),
            vec!["queso", "tacos", "queso"]
        );
    }

    #[test]
    fn test_blank_detail_fields_normalize_to_none() {
        let request = ReviewRequest::new(
            5,
            "tacos",
            "date night",
            Some("   ".to_string()),
            Some(String::new()),
        )
        .unwrap();
        assert!(request.special_detail.is_none());
        assert!(request.standout_detail.is_none());
        assert!(!request.is_personalized());
    }

    #[test]
    fn test_personalized_flag_tracks_detail_fields() {
        let request = ReviewRequest::new(
            4,
            "pasta",
            "celebration",
            Some("my birthday".to_string()),
            None,
        )
        .unwrap();
        assert!(request.is_personalized());
    }
}
