pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/restaurants/:slug",
            get(handlers::handle_get_restaurant),
        )
        .route(
            "/api/v1/restaurants/:slug/reviews/generate",
            post(handlers::handle_generate_review),
        )
        .route(
            "/api/v1/restaurants/:slug/reviews",
            get(handlers::handle_recent_reviews).post(handlers::handle_submit_review),
        )
        .route(
            "/api/v1/restaurants/:slug/stats",
            get(handlers::handle_stats),
        )
        .route(
            "/api/v1/restaurants/:slug/settings",
            patch(handlers::handle_update_settings),
        )
        .route(
            "/api/v1/restaurants/:slug/feedback/:review_id/respond",
            post(handlers::handle_respond_feedback),
        )
        .with_state(state)
}
