//! Review analysis — word count, SEO keyword hits, readability bucket, and
//! the uniqueness heuristic. Pure functions over the finished text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SENTENCE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));

/// Readability bucket: `Good` when the mean words-per-sentence is under 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readability {
    Good,
    Complex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub word_count: usize,
    /// Keywords found in the text, preserving the restaurant's original order.
    pub seo_keywords: Vec<String>,
    pub seo_count: usize,
    pub readability: Readability,
}

/// Analyzes finished review text against the restaurant's SEO keyword list.
///
/// Keyword matching is a case-insensitive substring test; matches are
/// collected in the keyword list's original order.
pub fn analyze(text: &str, seo_keywords: &[String]) -> ReviewAnalysis {
    let word_count = text.split_whitespace().count();

    let text_lower = text.to_lowercase();
    let seo_keywords: Vec<String> = seo_keywords
        .iter()
        .filter(|kw| text_lower.contains(&kw.to_lowercase()))
        .cloned()
        .collect();

    let sentence_count = SENTENCE_BREAKS.find_iter(text).count();
    let avg_words_per_sentence = word_count as f64 / sentence_count.max(1) as f64;
    let readability = if avg_words_per_sentence < 20.0 {
        Readability::Good
    } else {
        Readability::Complex
    };

    ReviewAnalysis {
        word_count,
        seo_count: seo_keywords.len(),
        seo_keywords,
        readability,
    }
}

/// Uniqueness heuristic: base 0.6, +0.2 per supplied personal detail, capped
/// at 1.0. A fixed documented policy, not validated against text diversity.
pub fn uniqueness_score(special_detail: Option<&str>, standout_detail: Option<&str>) -> f64 {
    let mut score: f64 = 0.6;
    if special_detail.is_some() {
        score += 0.2;
    }
    if standout_detail.is_some() {
        score += 0.2;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_count_is_whitespace_token_count() {
        let analysis = analyze("The tacos were  absolutely incredible!", &[]);
        assert_eq!(analysis.word_count, 5);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let analysis = analyze(
            "Easily the Best Tacos In Town.",
            &keywords(&["best tacos in town"]),
        );
        assert_eq!(analysis.seo_count, 1);
        assert_eq!(analysis.seo_keywords, vec!["best tacos in town"]);
    }

    #[test]
    fn test_matched_keywords_preserve_original_order() {
        let text = "great date night spot with the best margaritas around";
        let list = keywords(&["best margaritas", "no such phrase", "date night spot"]);
        let analysis = analyze(text, &list);
        assert_eq!(
            analysis.seo_keywords,
            vec!["best margaritas", "date night spot"]
        );
        assert_eq!(analysis.seo_count, 2);
    }

    #[test]
    fn test_unmatched_keywords_excluded() {
        let analysis = analyze("Nothing relevant here.", &keywords(&["best pasta"]));
        assert_eq!(analysis.seo_count, 0);
        assert!(analysis.seo_keywords.is_empty());
    }

    #[test]
    fn test_readability_good_under_20_words_per_sentence() {
        let analysis = analyze("Short sentence. Another short one.", &[]);
        assert_eq!(analysis.readability, Readability::Good);
    }

    #[test]
    fn test_readability_complex_at_20_words_per_sentence() {
        // Exactly 20 words, one sentence — boundary is exclusive, so Complex.
        let text = "one two three four five six seven eight nine ten \
                    eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty.";
        let analysis = analyze(text, &[]);
        assert_eq!(analysis.readability, Readability::Complex);
    }

    #[test]
    fn test_punctuation_runs_count_as_one_sentence_break() {
        // "!!" is a single break, so this is two sentences of 2 words each.
        let analysis = analyze("So good!! Loved it.", &[]);
        assert_eq!(analysis.readability, Readability::Good);
    }

    #[test]
    fn test_uniqueness_bounds_and_monotonicity() {
        let none = uniqueness_score(None, None);
        let special = uniqueness_score(Some("my birthday"), None);
        let standout = uniqueness_score(None, Some("the mariachi band"));
        let both = uniqueness_score(Some("my birthday"), Some("the mariachi band"));

        assert!((none - 0.6).abs() < f64::EPSILON);
        assert!((special - 0.8).abs() < f64::EPSILON);
        assert!((standout - 0.8).abs() < f64::EPSILON);
        assert!((both - 1.0).abs() < f64::EPSILON);
        assert!(special > none && standout > none && both > special);
    }
}
