//! Axum route handlers for the review collection API.
//!
//! The rating gate lives here: ratings 4–5 take the public generation path,
//! ratings 1–3 are routed to private feedback and never reach the generator.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::analyze::Readability;
use crate::generation::generator::ComposeMode;
use crate::generation::input::ReviewRequest;
use crate::models::restaurant::{RestaurantProfile, RestaurantRow};
use crate::models::review::{ReviewRow, ReviewType};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateReviewBody {
    pub rating: u8,
    #[serde(default)]
    pub favorite_dish: String,
    /// The dining-context label. Accepts the legacy `atmosphere` field name.
    #[serde(default, alias = "atmosphere")]
    pub occasion: String,
    pub special_detail: Option<String>,
    pub standout_detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReviewResponse {
    pub review: String,
    pub word_count: usize,
    pub seo_count: usize,
    pub seo_keywords: Vec<String>,
    pub readability: Readability,
    pub personalized: bool,
    pub uniqueness_score: f64,
    pub ai_polished: bool,
    pub cost_estimate: f64,
    /// The generator's raw text, present only when polishing replaced it.
    pub original_review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewBody {
    pub rating: u8,
    // Public path fields
    pub favorite_dish: Option<String>,
    #[serde(alias = "atmosphere")]
    pub occasion: Option<String>,
    /// Customer-edited review text. When absent on the public path, a fresh
    /// review is generated server-side.
    pub final_review: Option<String>,
    // Private path fields
    pub issue_area: Option<String>,
    pub feedback_details: Option<String>,
    pub contact_info: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub review_id: Uuid,
    pub review_type: ReviewType,
    pub word_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsBody {
    /// Dishes to highlight in reviews.
    pub specialties: Option<Vec<String>>,
    /// Local SEO phrases, in the order the generator should report matches.
    pub seo_keywords: Option<Vec<String>>,
    /// Branded review templates. Accepts the legacy `templates` field name.
    #[serde(alias = "templates")]
    pub custom_templates: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RespondFeedbackResponse {
    pub review_id: Uuid,
    pub followup_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct RestaurantStats {
    pub total_reviews: i64,
    pub public_reviews: i64,
    pub private_feedback: i64,
    pub pending_followups: i64,
    pub average_rating: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/restaurants/:slug
///
/// Returns the generation-facing profile for a restaurant.
pub async fn handle_get_restaurant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RestaurantProfile>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;
    Ok(Json(RestaurantProfile::from_row(&row)))
}

/// POST /api/v1/restaurants/:slug/reviews/generate
///
/// Positive path only: drafts a review from the customer's inputs, then
/// polishes it. Nothing is persisted — the customer may still edit the text
/// before submitting.
pub async fn handle_generate_review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<GenerateReviewBody>,
) -> Result<Json<GenerateReviewResponse>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    if body.favorite_dish.trim().is_empty() {
        return Err(AppError::MissingRequiredInput("favorite_dish".to_string()));
    }
    if body.occasion.trim().is_empty() {
        return Err(AppError::MissingRequiredInput("occasion".to_string()));
    }

    // Rejects anything outside {4, 5} — ratings 1–3 belong on the private
    // feedback path, not here.
    let request = ReviewRequest::new(
        body.rating,
        &body.favorite_dish,
        body.occasion,
        body.special_detail,
        body.standout_detail,
    )?;

    let profile = RestaurantProfile::from_row(&row);
    let mode = ComposeMode::for_profile(&profile);
    let result = state.generator.generate(mode, &profile, &request);
    info!(
        "Generated {:?} review for {}: {} words, {} SEO hits",
        mode, slug, result.word_count, result.seo_count
    );

    let polish = state.polisher.polish(&result.review, &profile.name).await;
    let word_count = polish.text.split_whitespace().count();

    Ok(Json(GenerateReviewResponse {
        word_count,
        seo_count: result.seo_count,
        seo_keywords: result.seo_keywords,
        readability: result.readability,
        personalized: result.personalized,
        uniqueness_score: result.uniqueness_score,
        ai_polished: polish.polished,
        cost_estimate: polish.cost_estimate,
        original_review: polish.polished.then(|| result.review),
        review: polish.text,
    }))
}

/// POST /api/v1/restaurants/:slug/reviews
///
/// Final submission. Ratings 4–5 persist a public review (the customer's
/// edited text, or a freshly generated one); ratings 1–3 persist private
/// feedback flagged for management follow-up.
pub async fn handle_submit_review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<SubmitReviewBody>,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    if !(1..=5).contains(&body.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 1 and 5, got {}",
            body.rating
        )));
    }

    if body.rating >= 4 {
        submit_public_review(&state, &row, body).await
    } else {
        submit_private_feedback(&state, &row, body).await
    }
}

async fn submit_public_review(
    state: &AppState,
    row: &RestaurantRow,
    body: SubmitReviewBody,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    let favorite_dish = body.favorite_dish.unwrap_or_default();
    let occasion = body.occasion.unwrap_or_default();

    let (review_text, word_count) = match body.final_review.filter(|t| !t.trim().is_empty()) {
        Some(edited) => {
            let count = edited.split_whitespace().count();
            (edited, count)
        }
        None => {
            if occasion.trim().is_empty() {
                return Err(AppError::MissingRequiredInput("occasion".to_string()));
            }
            let request =
                ReviewRequest::new(body.rating, &favorite_dish, occasion.clone(), None, None)?;
            let profile = RestaurantProfile::from_row(row);
            let result = state
                .generator
                .generate(ComposeMode::for_profile(&profile), &profile, &request);
            (result.review, result.word_count)
        }
    };

    let review_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO reviews
            (id, restaurant_id, rating, review_type, favorite_dish, occasion,
             review_text, word_count, requires_followup, followup_completed, status)
        VALUES ($1, $2, $3, 'public', $4, $5, $6, $7, false, false, 'completed')
        "#,
    )
    .bind(review_id)
    .bind(row.id)
    .bind(body.rating as i16)
    .bind(&favorite_dish)
    .bind(&occasion)
    .bind(&review_text)
    .bind(word_count as i32)
    .execute(&state.db)
    .await?;

    info!(
        "Stored public {}-star review {} for {} ({} words)",
        body.rating, review_id, row.slug, word_count
    );

    Ok(Json(SubmitReviewResponse {
        review_id,
        review_type: ReviewType::Public,
        word_count: Some(word_count),
    }))
}

async fn submit_private_feedback(
    state: &AppState,
    row: &RestaurantRow,
    body: SubmitReviewBody,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    // Contact info is a single free field; '@' decides email vs phone.
    let (customer_email, customer_phone) = match body.contact_info.filter(|c| !c.trim().is_empty())
    {
        Some(contact) if contact.contains('@') => (Some(contact), None),
        Some(contact) => (None, Some(contact)),
        None => (None, None),
    };

    let review_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO reviews
            (id, restaurant_id, rating, review_type, issue_area, feedback_details,
             customer_email, customer_phone, requires_followup, followup_completed, status)
        VALUES ($1, $2, $3, 'private', $4, $5, $6, $7, true, false, 'completed')
        "#,
    )
    .bind(review_id)
    .bind(row.id)
    .bind(body.rating as i16)
    .bind(&body.issue_area)
    .bind(&body.feedback_details)
    .bind(&customer_email)
    .bind(&customer_phone)
    .execute(&state.db)
    .await?;

    info!(
        "Stored private feedback {} for {} ({}-star, followup required)",
        review_id, row.slug, body.rating
    );

    Ok(Json(SubmitReviewResponse {
        review_id,
        review_type: ReviewType::Private,
        word_count: None,
    }))
}

/// PATCH /api/v1/restaurants/:slug/settings
///
/// Owner dashboard: updates the review-optimization data (specialties, SEO
/// keywords, branded templates). Omitted fields keep their current value.
/// Returns the resulting generation profile.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<UpdateSettingsBody>,
) -> Result<Json<RestaurantProfile>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    sqlx::query(
        r#"
        UPDATE restaurants
        SET specialties      = COALESCE($2, specialties),
            seo_keywords     = COALESCE($3, seo_keywords),
            custom_templates = COALESCE($4, custom_templates),
            updated_at       = NOW()
        WHERE id = $1
        "#,
    )
    .bind(row.id)
    .bind(jsonb_array(body.specialties))
    .bind(jsonb_array(body.seo_keywords))
    .bind(jsonb_array(body.custom_templates))
    .execute(&state.db)
    .await?;

    let updated = find_restaurant(&state.db, &slug).await?;
    let profile = RestaurantProfile::from_row(&updated);
    info!(
        "Updated settings for {}: {} keywords, {} templates",
        slug,
        profile.seo_keywords.len(),
        profile.custom_templates.len()
    );

    Ok(Json(profile))
}

/// POST /api/v1/restaurants/:slug/feedback/:review_id/respond
///
/// Marks a private feedback item as followed up, clearing it from the
/// pending-followup queue.
pub async fn handle_respond_feedback(
    State(state): State<AppState>,
    Path((slug, review_id)): Path<(String, Uuid)>,
) -> Result<Json<RespondFeedbackResponse>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    let result = sqlx::query(
        "UPDATE reviews SET followup_completed = true \
         WHERE id = $1 AND restaurant_id = $2",
    )
    .bind(review_id)
    .bind(row.id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Review {review_id} not found for '{slug}'"
        )));
    }

    info!("Feedback {} for {} marked as resolved", review_id, slug);

    Ok(Json(RespondFeedbackResponse {
        review_id,
        followup_completed: true,
    }))
}

/// Converts an optional string list to a JSONB-bindable value. `None` binds
/// SQL NULL, which COALESCE resolves to the existing column value.
fn jsonb_array(values: Option<Vec<String>>) -> Option<serde_json::Value> {
    values.map(serde_json::Value::from)
}

/// GET /api/v1/restaurants/:slug/reviews
///
/// The most recent submissions, newest first — feeds the dashboard list.
pub async fn handle_recent_reviews(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    let reviews = sqlx::query_as::<_, ReviewRow>(
        "SELECT * FROM reviews WHERE restaurant_id = $1 ORDER BY created_at DESC LIMIT 10",
    )
    .bind(row.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(reviews))
}

/// GET /api/v1/restaurants/:slug/stats
///
/// Dashboard counts: totals by path plus the pending follow-up queue.
pub async fn handle_stats(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RestaurantStats>, AppError> {
    let row = find_restaurant(&state.db, &slug).await?;

    let total_reviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE restaurant_id = $1")
            .bind(row.id)
            .fetch_one(&state.db)
            .await?;

    let public_reviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE restaurant_id = $1 AND rating >= 4")
            .bind(row.id)
            .fetch_one(&state.db)
            .await?;

    let private_feedback: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE restaurant_id = $1 AND rating <= 3")
            .bind(row.id)
            .fetch_one(&state.db)
            .await?;

    let pending_followups: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reviews WHERE restaurant_id = $1 \
         AND requires_followup AND NOT followup_completed",
    )
    .bind(row.id)
    .fetch_one(&state.db)
    .await?;

    let average_rating: f64 = sqlx::query_scalar(
        "SELECT COALESCE(AVG(rating::float8), 0) FROM reviews WHERE restaurant_id = $1",
    )
    .bind(row.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(RestaurantStats {
        total_reviews,
        public_reviews,
        private_feedback,
        pending_followups,
        average_rating,
    }))
}

async fn find_restaurant(pool: &PgPool, slug: &str) -> Result<RestaurantRow, AppError> {
    sqlx::query_as::<_, RestaurantRow>("SELECT * FROM restaurants WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant '{slug}' not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_body_accepts_atmosphere_alias() {
        let body: GenerateReviewBody = serde_json::from_value(json!({
            "rating": 5,
            "favorite_dish": "tacos, margaritas",
            "atmosphere": "date night"
        }))
        .unwrap();
        assert_eq!(body.occasion, "date night");
        assert!(body.special_detail.is_none());
    }

    #[test]
    fn test_generate_body_defaults_optional_fields() {
        let body: GenerateReviewBody = serde_json::from_value(json!({
            "rating": 4,
            "occasion": "family dinner"
        }))
        .unwrap();
        assert!(body.favorite_dish.is_empty());
        assert!(body.standout_detail.is_none());
    }

    #[test]
    fn test_settings_body_accepts_templates_alias() {
        let body: UpdateSettingsBody = serde_json::from_value(json!({
            "seo_keywords": ["best tacos in seattle"],
            "templates": ["{name} rocks. {closing_praise}"]
        }))
        .unwrap();
        assert_eq!(
            body.seo_keywords.as_deref(),
            Some(["best tacos in seattle".to_string()].as_slice())
        );
        assert_eq!(
            body.custom_templates.as_deref(),
            Some(["{name} rocks. {closing_praise}".to_string()].as_slice())
        );
        assert!(body.specialties.is_none());
    }

    #[test]
    fn test_settings_body_omitted_fields_stay_none() {
        let body: UpdateSettingsBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.specialties.is_none());
        assert!(body.seo_keywords.is_none());
        assert!(body.custom_templates.is_none());
    }

    #[test]
    fn test_jsonb_array_none_binds_null_for_coalesce() {
        assert!(jsonb_array(None).is_none());
        let value = jsonb_array(Some(vec!["tacos".to_string(), "queso".to_string()]));
        assert_eq!(value, Some(json!(["tacos", "queso"])));
    }

    #[test]
    fn test_submit_body_private_path_fields() {
        let body: SubmitReviewBody = serde_json::from_value(json!({
            "rating": 2,
            "issue_area": "service",
            "feedback_details": "waited 40 minutes",
            "contact_info": "person@example.com"
        }))
        .unwrap();
        assert_eq!(body.rating, 2);
        assert_eq!(body.issue_area.as_deref(), Some("service"));
        assert!(body.final_review.is_none());
    }
}
