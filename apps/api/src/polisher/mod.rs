//! Review polishing — the single point of entry for all Gemini API calls.
//!
//! The contract is fail-safe: whatever goes wrong (no API key, HTTP failure,
//! unparseable response), the caller gets the original text back with
//! `polished = false`. The generator's output must already stand on its own;
//! polishing only ever improves it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
/// Rough tokens-per-word multiplier for the cost estimate.
const TOKENS_PER_WORD: f64 = 1.3;
/// Blended per-1k-token rate for the flash model.
const COST_PER_1K_TOKENS: f64 = 0.000375;

/// Result of one polish attempt. `text` is always usable — the original
/// review when `polished` is false.
#[derive(Debug, Clone, Serialize)]
pub struct PolishOutcome {
    pub text: String,
    pub polished: bool,
    pub cost_estimate: f64,
}

impl PolishOutcome {
    fn passthrough(original: &str) -> Self {
        PolishOutcome {
            text: original.to_string(),
            polished: false,
            cost_estimate: 0.0,
        }
    }
}

/// Pluggable polishing seam, held in `AppState` as `Arc<dyn ReviewPolisher>`.
#[async_trait]
pub trait ReviewPolisher: Send + Sync {
    async fn polish(&self, rough_review: &str, restaurant_name: &str) -> PolishOutcome;
}

/// No-op polisher used when no Gemini API key is configured.
pub struct NoopPolisher;

#[async_trait]
impl ReviewPolisher for NoopPolisher {
    async fn polish(&self, rough_review: &str, _restaurant_name: &str) -> PolishOutcome {
        PolishOutcome::passthrough(rough_review)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini-backed implementation
// ────────────────────────────────────────────────────────────────────────────

/// Polishes generated reviews through the Gemini flash model.
pub struct GeminiPolisher {
    client: Client,
    api_key: String,
}

impl GeminiPolisher {
    pub fn new(api_key: String) -> Self {
        GeminiPolisher {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call_gemini(&self, prompt: &str) -> anyhow::Result<String> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(GEMINI_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        let body: GeminiResponse = response.json().await?;
        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))?;

        if text.is_empty() {
            anyhow::bail!("Gemini returned empty text");
        }
        Ok(text)
    }
}

#[async_trait]
impl ReviewPolisher for GeminiPolisher {
    async fn polish(&self, rough_review: &str, restaurant_name: &str) -> PolishOutcome {
        let prompt = polish_prompt(rough_review, restaurant_name);

        match self.call_gemini(&prompt).await {
            Ok(polished) => {
                let cost = estimate_cost(&prompt, &polished);
                debug!("Review polished (estimated cost ${cost:.6})");
                PolishOutcome {
                    text: polished,
                    polished: true,
                    cost_estimate: cost,
                }
            }
            Err(e) => {
                warn!("Polishing failed, serving original review: {e}");
                PolishOutcome::passthrough(rough_review)
            }
        }
    }
}

fn polish_prompt(rough_review: &str, restaurant_name: &str) -> String {
    format!(
        "Polish this restaurant review to sound natural and authentic. Fix any issues but \
         keep the same positive tone and key details. Return ONLY the polished review text, \
         no explanations or formatting.\n\n\
         ISSUES TO FIX:\n\
         - Remove repeated phrases or sentences\n\
         - Improve sentence flow and transitions\n\
         - Make it sound like a real person wrote it\n\
         - Fix awkward phrasing\n\
         - Ensure varied vocabulary\n\n\
         KEEP THE SAME:\n\
         - All specific details (dishes, atmosphere, occasions)\n\
         - Positive tone and rating level\n\
         - Personal touches and experiences\n\
         - Length (around 60-100 words)\n\n\
         RESTAURANT: {restaurant_name}\n\n\
         ORIGINAL REVIEW:\n{rough_review}\n\n\
         POLISHED REVIEW:"
    )
}

/// Very rough cost estimate from word counts — good enough for the dashboard.
fn estimate_cost(prompt: &str, output: &str) -> f64 {
    let input_tokens = prompt.split_whitespace().count() as f64 * TOKENS_PER_WORD;
    let output_tokens = output.split_whitespace().count() as f64 * TOKENS_PER_WORD;
    (input_tokens + output_tokens) / 1000.0 * COST_PER_1K_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_polisher_passes_text_through() {
        let outcome = NoopPolisher.polish("Great tacos!", "Pablo's").await;
        assert_eq!(outcome.text, "Great tacos!");
        assert!(!outcome.polished);
        assert_eq!(outcome.cost_estimate, 0.0);
    }

    #[test]
    fn test_prompt_includes_review_and_restaurant() {
        let prompt = polish_prompt("The tacos were incredible.", "Pablo's Cantina");
        assert!(prompt.contains("The tacos were incredible."));
        assert!(prompt.contains("Pablo's Cantina"));
        assert!(prompt.contains("POLISHED REVIEW:"));
    }

    #[test]
    fn test_cost_estimate_scales_with_length() {
        let short = estimate_cost("one two", "three four");
        let long = estimate_cost(
            "one two three four five six seven eight",
            "nine ten eleven twelve",
        );
        assert!(long > short);
        assert!(short > 0.0);
    }

    #[test]
    fn test_gemini_response_deserializes() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Polished review text."}]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.candidates[0].content.parts[0].text,
            "Polished review text."
        );
    }
}
