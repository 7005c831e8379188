//! Composition — turns selected phrases into a rough review string.
//!
//! Two modes, selected by the caller (never at random):
//! - **Template**: fill a restaurant-owned (or built-in, tier-keyed) format
//!   string with named placeholders. Unresolved placeholders are masked with
//!   a generic fallback — a slightly generic sentence beats a crashed request.
//! - **Freeform**: assemble independent clauses in a fixed order.
//!
//! Output here is rough — the finisher handles spacing, capitalization, and
//! terminal punctuation.

use std::sync::LazyLock;

use regex::Regex;

use crate::generation::banks::PhraseBanks;
use crate::generation::input::ReviewRequest;
use crate::generation::picker::{pick, Picker};
use crate::models::restaurant::RestaurantProfile;

static UNRESOLVED_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[A-Za-z0-9_]+\}").expect("placeholder regex"));

/// Substituted for any placeholder with no available value.
const PLACEHOLDER_FALLBACK: &str = "a local favorite";

/// Probability that the freeform review mentions service.
const SERVICE_MENTION_CHANCE: f64 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Template mode
// ────────────────────────────────────────────────────────────────────────────

/// Fills one uniformly chosen template with computed variables.
///
/// Recognized placeholders: `{name}`, `{rating}`, `{dish}`, `{atmosphere}`,
/// `{cuisine}`, `{location}`, `{cuisine_praise}`, `{seo_keyword_1}`,
/// `{seo_keyword_2}`, `{closing_praise}`, `{restaurant_type}`. Anything else
/// left in the template is masked with [`PLACEHOLDER_FALLBACK`].
pub fn compose_template(
    banks: &PhraseBanks,
    picker: &dyn Picker,
    profile: &RestaurantProfile,
    request: &ReviewRequest,
) -> String {
    let templates: Vec<&str> = if profile.custom_templates.is_empty() {
        banks.templates_for(profile.tier).to_vec()
    } else {
        profile.custom_templates.iter().map(String::as_str).collect()
    };

    let Some(template) = pick(picker, &templates) else {
        // No templates anywhere for this tier — compose freeform instead.
        return compose_freeform(banks, picker, profile, request);
    };

    let dish_phrase = request
        .dishes
        .first()
        .map(|dish| enhance_dish(banks, picker, &profile.cuisine, dish))
        .unwrap_or_else(|| "food".to_string());

    let praise = pick(picker, banks.praise_for(&profile.cuisine))
        .copied()
        .unwrap_or("every dish showed real care");

    let closing = pick(picker, banks.closings_for(profile.tier))
        .copied()
        .unwrap_or("Highly recommend!");

    // Up to two keywords in shuffled order; missing slots get the fallback.
    let order = picker.shuffled(profile.seo_keywords.len());
    let keyword_1 = order
        .first()
        .map(|&i| profile.seo_keywords[i].as_str())
        .unwrap_or(PLACEHOLDER_FALLBACK);
    let keyword_2 = order
        .get(1)
        .map(|&i| profile.seo_keywords[i].as_str())
        .unwrap_or(PLACEHOLDER_FALLBACK);

    let rating = request.rating.value().to_string();

    let substitutions: [(&str, &str); 11] = [
        ("{name}", &profile.name),
        ("{rating}", &rating),
        ("{dish}", &dish_phrase),
        ("{atmosphere}", &request.occasion),
        ("{cuisine}", &profile.cuisine),
        ("{location}", &profile.location),
        ("{cuisine_praise}", praise),
        ("{seo_keyword_1}", keyword_1),
        ("{seo_keyword_2}", keyword_2),
        ("{closing_praise}", closing),
        ("{restaurant_type}", profile.tier.label()),
    ];

    let mut text = template.to_string();
    for (placeholder, value) in substitutions {
        text = text.replace(placeholder, value);
    }

    UNRESOLVED_PLACEHOLDER
        .replace_all(&text, PLACEHOLDER_FALLBACK)
        .into_owned()
}

/// Embellishes a dish name using the cuisine's enhancement table. First
/// matching substring key wins; unmatched single-word dishes get the generic
/// "amazing {dish}" wrapper, multi-word dishes pass through unchanged.
pub fn enhance_dish(
    banks: &PhraseBanks,
    picker: &dyn Picker,
    cuisine: &str,
    dish: &str,
) -> String {
    let dish_lower = dish.to_lowercase();
    for (key, renderings) in banks.enhancements_for(cuisine) {
        if dish_lower.contains(key) {
            if let Some(rendering) = pick(picker, renderings) {
                return (*rendering).to_string();
            }
        }
    }

    if dish.split_whitespace().count() >= 2 {
        dish.to_string()
    } else {
        format!("amazing {dish}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Freeform mode
// ────────────────────────────────────────────────────────────────────────────

/// Assembles the review as independent clauses in fixed order: opener, food,
/// atmosphere, optional personal touch, service (70% of runs),
/// recommendation, closing. Clauses are joined with single spaces.
pub fn compose_freeform(
    banks: &PhraseBanks,
    picker: &dyn Picker,
    profile: &RestaurantProfile,
    request: &ReviewRequest,
) -> String {
    let mut clauses: Vec<String> = vec![
        opener_clause(banks, picker, profile, request),
        food_clause(banks, picker, request),
        atmosphere_clause(banks, picker, request),
    ];

    if let Some(touch) = personal_touch_clause(request) {
        clauses.push(touch);
    }

    if picker.chance(SERVICE_MENTION_CHANCE) {
        if let Some(phrase) = pick(picker, &banks.service_phrases) {
            clauses.push((*phrase).to_string());
        }
    }

    clauses.push(recommendation_clause(picker, profile, request));

    if let Some(closing) = pick(picker, &banks.closings) {
        clauses.push((*closing).to_string());
    }

    clauses.join(" ")
}

/// Opening clause, infused with the special detail when supplied. Details
/// mentioning an occasion word read as "for my birthday"; anything else is
/// appended directly.
fn opener_clause(
    banks: &PhraseBanks,
    picker: &dyn Picker,
    profile: &RestaurantProfile,
    request: &ReviewRequest,
) -> String {
    let opener = pick(picker, &banks.openers).copied().unwrap_or("Visited");

    match &request.special_detail {
        Some(special) => {
            let special = special.to_lowercase();
            let occasion_word = ["birthday", "anniversary", "celebration"]
                .iter()
                .any(|word| special.contains(word));
            if occasion_word {
                format!("{opener} {} for {special}", profile.name)
            } else {
                format!("{opener} {} {special}", profile.name)
            }
        }
        None => {
            let when = pick(picker, &banks.time_phrases)
                .copied()
                .unwrap_or("recently");
            format!("{opener} {} {when}", profile.name)
        }
    }
}

/// Food clause. An empty dish list degrades to "The food was {descriptor}".
fn food_clause(banks: &PhraseBanks, picker: &dyn Picker, request: &ReviewRequest) -> String {
    let descriptor = pick(picker, banks.food_descriptors(request.rating))
        .copied()
        .unwrap_or("delicious");

    if request.dishes.is_empty() {
        return format!("The food was {descriptor}");
    }

    let dish_text = join_dishes(&request.dishes);
    let base = format!("The {dish_text} was absolutely {descriptor}");

    match &request.standout_detail {
        Some(standout) => format!("{base} - {}", standout.to_lowercase()),
        None => base,
    }
}

/// Joins dish names with English list conjunctions: one dish verbatim, two
/// joined with "and", three or more as a comma series with a final ", and".
pub fn join_dishes(dishes: &[String]) -> String {
    match dishes {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}

fn atmosphere_clause(banks: &PhraseBanks, picker: &dyn Picker, request: &ReviewRequest) -> String {
    let language = banks.occasion(&request.occasion);
    let descriptor = pick(picker, &language.descriptors).copied().unwrap_or("nice");
    let touch = pick(picker, &language.personal_touches)
        .copied()
        .unwrap_or("good for");
    let occasion = &request.occasion;

    match picker.pick_index(3) {
        0 => format!("Perfect atmosphere for {occasion}, very {descriptor}"),
        1 => format!("Great spot {touch} - {descriptor} setting"),
        _ => format!("The ambiance was {descriptor}, ideal for {occasion}"),
    }
}

/// Present only when at least one optional detail was supplied; wording
/// differs for both / special only / standout only.
fn personal_touch_clause(request: &ReviewRequest) -> Option<String> {
    match (&request.special_detail, &request.standout_detail) {
        (Some(_), Some(standout)) => Some(format!(
            "What made it extra special was {}",
            standout.to_lowercase()
        )),
        (Some(special), None) => Some(format!("Perfect choice for {}", special.to_lowercase())),
        (None, Some(standout)) => Some(format!("Loved that {}", standout.to_lowercase())),
        (None, None) => None,
    }
}

/// Keyword-based phrasing when the restaurant has SEO keywords, generic
/// occasion-based phrasing otherwise.
fn recommendation_clause(
    picker: &dyn Picker,
    profile: &RestaurantProfile,
    request: &ReviewRequest,
) -> String {
    match pick(picker, &profile.seo_keywords) {
        Some(keyword) => match picker.pick_index(3) {
            0 => format!("Definitely lives up to being {keyword}"),
            1 => format!("Now I know why it's considered {keyword}"),
            _ => format!("This is what I think of when I hear '{keyword}'"),
        },
        None => format!(
            "Highly recommend for {} or really any occasion",
            request.occasion
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::picker::FirstPicker;
    use crate::models::restaurant::Tier;

    fn profile(keywords: &[&str], templates: &[&str]) -> RestaurantProfile {
        RestaurantProfile {
            name: "Pablo's Cantina".to_string(),
            cuisine: "Mexican".to_string(),
            tier: Tier::Casual,
            location: "downtown Seattle".to_string(),
            seo_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            custom_templates: templates.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn request(dishes: &str, special: Option<&str>, standout: Option<&str>) -> ReviewRequest {
        ReviewRequest::new(
            5,
            dishes,
            "date night",
            special.map(str::to_string),
            standout.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_join_dishes_single() {
        assert_eq!(join_dishes(&["tacos".to_string()]), "tacos");
    }

    #[test]
    fn test_join_dishes_pair_uses_and() {
        assert_eq!(
            join_dishes(&["tacos".to_string(), "queso".to_string()]),
            "tacos and queso"
        );
    }

    #[test]
    fn test_join_dishes_series_uses_oxford_comma() {
        assert_eq!(
            join_dishes(&[
                "tacos".to_string(),
                "queso".to_string(),
                "chips".to_string()
            ]),
            "tacos, queso, and chips"
        );
    }

    #[test]
    fn test_enhance_dish_matches_cuisine_table() {
        let banks = PhraseBanks::default();
        let enhanced = enhance_dish(&banks, &FirstPicker, "Mexican", "Tacos al pastor");
        assert_eq!(enhanced, "amazing tacos");
    }

    #[test]
    fn test_enhance_dish_wraps_unknown_single_word() {
        let banks = PhraseBanks::default();
        assert_eq!(
            enhance_dish(&banks, &FirstPicker, "Mexican", "pozole"),
            "amazing pozole"
        );
    }

    #[test]
    fn test_enhance_dish_passes_through_multi_word() {
        let banks = PhraseBanks::default();
        assert_eq!(
            enhance_dish(&banks, &FirstPicker, "Mexican", "carne asada fries"),
            "carne asada fries"
        );
    }

    #[test]
    fn test_freeform_contains_fixed_clause_order_fragments() {
        let banks = PhraseBanks::default();
        let text = compose_freeform(
            &banks,
            &FirstPicker,
            &profile(&["best mexican restaurant downtown seattle"], &[]),
            &request("tacos, queso", None, None),
        );

        assert!(text.starts_with("Just had Pablo's Cantina last night"));
        assert!(text.contains("The tacos and queso was absolutely incredible"));
        assert!(text.contains("Perfect atmosphere for date night, very romantic"));
        assert!(text.contains("service was excellent"));
        assert!(text.contains("Definitely lives up to being best mexican restaurant downtown seattle"));
        assert!(text.ends_with("Will definitely be back!"));
    }

    #[test]
    fn test_freeform_empty_dishes_degrades_to_generic_food_clause() {
        let banks = PhraseBanks::default();
        let text = compose_freeform(
            &banks,
            &FirstPicker,
            &profile(&[], &[]),
            &request("", None, None),
        );
        assert!(text.contains("The food was incredible"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_freeform_personal_touch_variants() {
        let banks = PhraseBanks::default();
        let prof = profile(&[], &[]);

        let both = compose_freeform(
            &banks,
            &FirstPicker,
            &prof,
            &request("tacos", Some("my birthday"), Some("the mariachi band played for us")),
        );
        assert!(both.contains("What made it extra special was the mariachi band played for us"));

        let special_only = compose_freeform(
            &banks,
            &FirstPicker,
            &prof,
            &request("tacos", Some("my birthday"), None),
        );
        assert!(special_only.contains("for my birthday"));
        assert!(special_only.contains("Perfect choice for my birthday"));

        let standout_only = compose_freeform(
            &banks,
            &FirstPicker,
            &prof,
            &request("tacos", None, Some("they remembered our order")),
        );
        assert!(standout_only.contains("Loved that they remembered our order"));
        assert!(standout_only.contains("- they remembered our order"));
    }

    #[test]
    fn test_freeform_without_keywords_recommends_by_occasion() {
        let banks = PhraseBanks::default();
        let text = compose_freeform(
            &banks,
            &FirstPicker,
            &profile(&[], &[]),
            &request("tacos", None, None),
        );
        assert!(text.contains("Highly recommend for date night or really any occasion"));
    }

    #[test]
    fn test_template_fills_all_placeholders() {
        let banks = PhraseBanks::default();
        let template = "{rating} stars for {name} in {location}! The {dish} proves {cuisine} \
                        done right - {cuisine_praise}. Great for {atmosphere} and truly \
                        {seo_keyword_1}. {closing_praise}";
        let text = compose_template(
            &banks,
            &FirstPicker,
            &profile(&["best tacos in seattle"], &[template]),
            &request("tacos", None, None),
        );

        assert!(text.starts_with("5 stars for Pablo's Cantina in downtown Seattle!"));
        assert!(text.contains("amazing tacos"));
        assert!(text.contains("best tacos in seattle"));
        assert!(!text.contains('{'), "no placeholder artifacts: {text}");
    }

    #[test]
    fn test_template_masks_unknown_placeholders() {
        let banks = PhraseBanks::default();
        let text = compose_template(
            &banks,
            &FirstPicker,
            &profile(&[], &["{name} is {brand_voice} and {seo_keyword_1}."]),
            &request("tacos", None, None),
        );
        assert!(!text.contains('{'));
        assert!(text.contains("a local favorite"));
    }

    #[test]
    fn test_template_empty_keywords_get_fallback_not_braces() {
        let banks = PhraseBanks::default();
        let text = compose_template(
            &banks,
            &FirstPicker,
            &profile(&[], &["{name}: {seo_keyword_1} / {seo_keyword_2}"]),
            &request("tacos", None, None),
        );
        assert_eq!(text, "Pablo's Cantina: a local favorite / a local favorite");
    }

    #[test]
    fn test_template_falls_back_to_tier_defaults() {
        let banks = PhraseBanks::default();
        let text = compose_template(
            &banks,
            &FirstPicker,
            &profile(&["best tacos in seattle"], &[]),
            &request("tacos", None, None),
        );
        assert!(!text.is_empty());
        assert!(!text.contains('{'));
        assert!(text.contains("Pablo's Cantina"));
    }

    #[test]
    fn test_template_empty_dish_list_uses_generic_food() {
        let banks = PhraseBanks::default();
        let text = compose_template(
            &banks,
            &FirstPicker,
            &profile(&[], &["The {dish} was the highlight."]),
            &request("", None, None),
        );
        assert_eq!(text, "The food was the highlight.");
    }
}
