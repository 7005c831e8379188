//! Review generation — orchestrates the full pipeline.
//!
//! Flow: normalize input → select phrases → compose (template or freeform) →
//! finish → analyze → `GeneratedReview`.
//!
//! Pure computation: no I/O, no state across calls beyond the injected
//! picker's random source. Total over its accepted domain — once a
//! `ReviewRequest` exists, generation cannot fail.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::generation::analyze::{analyze, uniqueness_score, Readability};
use crate::generation::banks::PhraseBanks;
use crate::generation::compose::{compose_freeform, compose_template};
use crate::generation::finish::finish;
use crate::generation::input::ReviewRequest;
use crate::generation::picker::Picker;
use crate::models::restaurant::RestaurantProfile;

/// How the review is composed. A caller/config decision tied to the
/// restaurant's data — never chosen at random per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposeMode {
    /// Placeholder substitution into a restaurant-owned (or built-in
    /// tier-keyed) format string.
    Template,
    /// Independent clauses concatenated in fixed order.
    Freeform,
}

impl ComposeMode {
    /// Restaurants that configured branded templates get template mode;
    /// everyone else gets the freeform compositor.
    pub fn for_profile(profile: &RestaurantProfile) -> Self {
        if profile.custom_templates.is_empty() {
            ComposeMode::Freeform
        } else {
            ComposeMode::Template
        }
    }
}

/// The generator's result record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReview {
    pub review: String,
    pub word_count: usize,
    pub seo_count: usize,
    pub seo_keywords: Vec<String>,
    pub readability: Readability,
    pub uniqueness_score: f64,
    pub personalized: bool,
}

/// Rule-based review synthesis engine. Owns its phrase banks and a pluggable
/// randomness source; constructed once and shared across requests.
pub struct ReviewGenerator {
    banks: PhraseBanks,
    picker: Arc<dyn Picker>,
}

impl ReviewGenerator {
    pub fn new(banks: PhraseBanks, picker: Arc<dyn Picker>) -> Self {
        ReviewGenerator { banks, picker }
    }

    pub fn with_defaults() -> Self {
        ReviewGenerator::new(
            PhraseBanks::default(),
            Arc::new(crate::generation::picker::RandomPicker),
        )
    }

    /// Runs the full pipeline for one request.
    pub fn generate(
        &self,
        mode: ComposeMode,
        profile: &RestaurantProfile,
        request: &ReviewRequest,
    ) -> GeneratedReview {
        let rough = match mode {
            ComposeMode::Template => {
                compose_template(&self.banks, self.picker.as_ref(), profile, request)
            }
            ComposeMode::Freeform => {
                compose_freeform(&self.banks, self.picker.as_ref(), profile, request)
            }
        };

        let review = finish(&rough);
        let analysis = analyze(&review, &profile.seo_keywords);

        GeneratedReview {
            review,
            word_count: analysis.word_count,
            seo_count: analysis.seo_count,
            seo_keywords: analysis.seo_keywords,
            readability: analysis.readability,
            uniqueness_score: uniqueness_score(
                request.special_detail.as_deref(),
                request.standout_detail.as_deref(),
            ),
            personalized: request.is_personalized(),
        }
    }
}
