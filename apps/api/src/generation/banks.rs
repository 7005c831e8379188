//! Phrase banks — curated fragments the selector draws from.
//!
//! The banks are immutable data owned by the generator instance (injected at
//! construction), not module-level globals. `PhraseBanks::default()` carries
//! the built-in curation; tests can build custom banks.

use std::collections::HashMap;

use crate::generation::input::PositiveRating;
use crate::models::restaurant::Tier;

/// Per-occasion wording: adjectives describing the setting plus
/// personal-touch fragments ("my partner and I", "with my kids").
#[derive(Debug, Clone)]
pub struct OccasionLanguage {
    pub descriptors: Vec<&'static str>,
    pub personal_touches: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct PhraseBanks {
    pub openers: Vec<&'static str>,
    /// Generic time references for openers without a special detail.
    pub time_phrases: Vec<&'static str>,
    pub occasions: HashMap<&'static str, OccasionLanguage>,
    pub default_occasion: OccasionLanguage,
    /// Food-quality adjectives keyed by rating. Only 4 and 5 exist — lower
    /// ratings never reach the generator.
    pub food_descriptors_four: Vec<&'static str>,
    pub food_descriptors_five: Vec<&'static str>,
    pub service_phrases: Vec<&'static str>,
    /// Freeform-mode closings.
    pub closings: Vec<&'static str>,
    /// Template-mode closings keyed by restaurant tier.
    pub tier_closings: HashMap<Tier, Vec<&'static str>>,
    /// Praise sentences keyed by lowercase cuisine name.
    pub cuisine_praise: HashMap<&'static str, Vec<&'static str>>,
    pub generic_praise: Vec<&'static str>,
    /// Per-cuisine dish embellishments: ordered (dish substring → renderings)
    /// pairs; first matching key wins.
    pub dish_enhancements: HashMap<&'static str, Vec<(&'static str, Vec<&'static str>)>>,
    /// Built-in template strings keyed by tier, used when a restaurant has no
    /// custom templates.
    pub default_templates: HashMap<Tier, Vec<&'static str>>,
}

impl PhraseBanks {
    /// Occasion wording for a label, or the generic entry for unrecognized
    /// occasions.
    pub fn occasion(&self, label: &str) -> &OccasionLanguage {
        self.occasions.get(label).unwrap_or(&self.default_occasion)
    }

    pub fn food_descriptors(&self, rating: PositiveRating) -> &[&'static str] {
        match rating.value() {
            5 => &self.food_descriptors_five,
            _ => &self.food_descriptors_four,
        }
    }

    /// Praise sentences for a cuisine, falling back to the generic list.
    pub fn praise_for(&self, cuisine: &str) -> &[&'static str] {
        self.cuisine_praise
            .get(cuisine.to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&self.generic_praise)
    }

    pub fn closings_for(&self, tier: Tier) -> &[&'static str] {
        self.tier_closings
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or(&self.closings)
    }

    pub fn templates_for(&self, tier: Tier) -> &[&'static str] {
        self.default_templates
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Dish embellishment entries for a cuisine (possibly empty).
    pub fn enhancements_for(&self, cuisine: &str) -> &[(&'static str, Vec<&'static str>)] {
        self.dish_enhancements
            .get(cuisine.to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for PhraseBanks {
    fn default() -> Self {
        PhraseBanks {
            openers: vec![
                "Just had",
                "Had an amazing",
                "Visited",
                "Went to",
                "Tried",
                "Finally made it to",
                "Stopped by",
                "Discovered",
                "Decided to try",
            ],
            time_phrases: vec!["last night", "today", "this weekend"],
            occasions: HashMap::from([
                (
                    "date night",
                    OccasionLanguage {
                        descriptors: vec!["romantic", "intimate", "cozy", "perfect for couples"],
                        personal_touches: vec![
                            "my partner and I",
                            "we both",
                            "for our",
                            "date night",
                            "romantic evening",
                            "special night out",
                        ],
                    },
                ),
                (
                    "family dinner",
                    OccasionLanguage {
                        descriptors: vec!["family-friendly", "welcoming", "accommodating"],
                        personal_touches: vec![
                            "the whole family",
                            "with my kids",
                            "family loved",
                            "everyone enjoyed",
                            "even my picky eater",
                            "kids were happy",
                        ],
                    },
                ),
                (
                    "celebration",
                    OccasionLanguage {
                        descriptors: vec!["festive", "special", "memorable", "celebratory"],
                        personal_touches: vec![
                            "celebrating",
                            "special occasion",
                            "birthday dinner",
                            "anniversary",
                            "milestone",
                            "party of",
                        ],
                    },
                ),
                (
                    "business lunch",
                    OccasionLanguage {
                        descriptors: vec!["professional", "convenient", "efficient"],
                        personal_touches: vec![
                            "business meeting",
                            "with colleagues",
                            "client lunch",
                            "work meeting",
                            "professional setting",
                            "good for business",
                        ],
                    },
                ),
                (
                    "casual hangout",
                    OccasionLanguage {
                        descriptors: vec!["relaxed", "laid-back", "comfortable", "easy-going"],
                        personal_touches: vec![
                            "with friends",
                            "casual meal",
                            "hanging out",
                            "catching up",
                            "low-key dinner",
                            "just because",
                        ],
                    },
                ),
                (
                    "solo dining",
                    OccasionLanguage {
                        descriptors: vec!["comfortable for solo diners", "welcoming", "peaceful"],
                        personal_touches: vec![
                            "dining alone",
                            "by myself",
                            "solo meal",
                            "me time",
                            "peaceful dinner",
                            "perfect for solo",
                        ],
                    },
                ),
            ]),
            default_occasion: OccasionLanguage {
                descriptors: vec!["nice", "pleasant"],
                personal_touches: vec!["good for", "nice spot for"],
            },
            food_descriptors_four: vec![
                "excellent",
                "great",
                "wonderful",
                "really good",
                "delicious",
                "impressive",
            ],
            food_descriptors_five: vec![
                "incredible",
                "amazing",
                "outstanding",
                "phenomenal",
                "perfect",
                "spectacular",
            ],
            service_phrases: vec![
                "service was excellent",
                "staff was friendly",
                "servers were attentive",
                "great service",
                "staff was helpful",
                "service was on point",
            ],
            closings: vec![
                "Will definitely be back!",
                "Can't wait to return!",
                "Already planning my next visit!",
                "This place is going on my regular rotation!",
                "Highly recommend!",
                "Don't sleep on this place!",
                "Absolutely loved it!",
            ],
            tier_closings: HashMap::from([
                (
                    Tier::Casual,
                    vec![
                        "Will definitely be back!",
                        "Going straight into the regular rotation!",
                        "Highly recommend!",
                        "Don't sleep on this place!",
                    ],
                ),
                (
                    Tier::Upscale,
                    vec![
                        "A truly memorable evening.",
                        "We will certainly return.",
                        "Worth every penny.",
                        "An experience worth savoring.",
                    ],
                ),
                (
                    Tier::FastCasual,
                    vec![
                        "Fast, fresh, and worth it!",
                        "Exactly what a busy day calls for!",
                        "I'll be back soon!",
                    ],
                ),
            ]),
            cuisine_praise: HashMap::from([
                (
                    "mexican",
                    vec![
                        "you can taste the fresh ingredients in every bite",
                        "the salsas alone are worth the trip",
                        "authentic flavors like you'd find in Mexico City",
                        "everything tastes made from scratch",
                    ],
                ),
                (
                    "italian",
                    vec![
                        "the pasta is clearly made in-house",
                        "rich, layered flavors in every dish",
                        "it tastes like a nonna is running the kitchen",
                        "the wine pairings elevate everything",
                    ],
                ),
                (
                    "japanese",
                    vec![
                        "the fish was impeccably fresh",
                        "every plate is composed with real care",
                        "clean, balanced flavors throughout",
                    ],
                ),
                (
                    "indian",
                    vec![
                        "the spices are perfectly balanced",
                        "deep, complex flavors in every curry",
                        "the naan comes out hot and fresh",
                    ],
                ),
                (
                    "american",
                    vec![
                        "comfort food done exactly right",
                        "generous portions without cutting corners",
                        "classics executed with real skill",
                    ],
                ),
            ]),
            generic_praise: vec![
                "every dish showed real care",
                "the flavors were spot on",
                "quality you can taste in every bite",
            ],
            dish_enhancements: HashMap::from([
                (
                    "mexican",
                    vec![
                        (
                            "tacos",
                            vec!["amazing tacos", "authentic tacos", "street-style tacos"],
                        ),
                        (
                            "margarita",
                            vec!["hand-shaken margaritas", "perfectly balanced margaritas"],
                        ),
                        (
                            "guacamole",
                            vec!["fresh guacamole", "made-to-order guacamole"],
                        ),
                        (
                            "enchilada",
                            vec!["rich, saucy enchiladas", "perfectly baked enchiladas"],
                        ),
                    ],
                ),
                (
                    "italian",
                    vec![
                        ("pasta", vec!["house-made pasta", "perfectly al dente pasta"]),
                        ("risotto", vec!["creamy risotto", "decadent risotto"]),
                        ("pizza", vec!["wood-fired pizza", "blistered-crust pizza"]),
                        ("tiramisu", vec!["classic tiramisu", "airy tiramisu"]),
                    ],
                ),
                (
                    "japanese",
                    vec![
                        ("sushi", vec!["melt-in-your-mouth sushi", "pristine sushi"]),
                        ("ramen", vec!["deeply savory ramen", "rich tonkotsu ramen"]),
                    ],
                ),
            ]),
            default_templates: HashMap::from([
                (
                    Tier::Casual,
                    vec![
                        "Just had a {rating}-star meal at {name}! The {dish} was fantastic - \
                         {cuisine_praise}. Great spot for {atmosphere}, and easily {seo_keyword_1}. \
                         {closing_praise}",
                        "{name} in {location} nails {cuisine} food. The {dish} alone earns \
                         {rating} stars - {cuisine_praise}. Perfect for {atmosphere} and honestly \
                         {seo_keyword_1}. {closing_praise}",
                    ],
                ),
                (
                    Tier::Upscale,
                    vec![
                        "An exceptional {rating}-star experience at {name}. The {dish} was \
                         expertly prepared - {cuisine_praise}. The ambiance suits {atmosphere} \
                         beautifully, truly {seo_keyword_1}. {closing_praise}",
                        "{name} delivers refined {cuisine} dining in {location}. The {dish} was \
                         {rating}-star caliber - {cuisine_praise}. Ideal for {atmosphere}, and \
                         deservedly {seo_keyword_1}. {closing_praise}",
                    ],
                ),
                (
                    Tier::FastCasual,
                    vec![
                        "Quick stop at {name} turned into a {rating}-star meal. The {dish} was \
                         great - {cuisine_praise}. Handy for {atmosphere} and easily \
                         {seo_keyword_1}. {closing_praise}",
                    ],
                ),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_required_occasions_present() {
        let banks = PhraseBanks::default();
        for label in [
            "date night",
            "family dinner",
            "celebration",
            "business lunch",
            "casual hangout",
            "solo dining",
        ] {
            let language = banks.occasion(label);
            assert!(
                !language.descriptors.is_empty() && !language.personal_touches.is_empty(),
                "occasion '{label}' must have wording"
            );
        }
    }

    #[test]
    fn test_unrecognized_occasion_gets_default_wording() {
        let banks = PhraseBanks::default();
        let language = banks.occasion("post-marathon refuel");
        assert_eq!(language.descriptors, banks.default_occasion.descriptors);
    }

    #[test]
    fn test_food_descriptors_exist_for_both_positive_ratings() {
        let banks = PhraseBanks::default();
        assert!(!banks
            .food_descriptors(PositiveRating::new(4).unwrap())
            .is_empty());
        assert!(!banks
            .food_descriptors(PositiveRating::new(5).unwrap())
            .is_empty());
    }

    #[test]
    fn test_cuisine_praise_lookup_is_case_insensitive() {
        let banks = PhraseBanks::default();
        assert_eq!(banks.praise_for("Mexican"), banks.praise_for("mexican"));
    }

    #[test]
    fn test_unknown_cuisine_gets_generic_praise() {
        let banks = PhraseBanks::default();
        assert_eq!(banks.praise_for("Martian"), banks.generic_praise.as_slice());
    }

    #[test]
    fn test_every_tier_has_default_templates_and_closings() {
        let banks = PhraseBanks::default();
        for tier in [Tier::Casual, Tier::Upscale, Tier::FastCasual] {
            assert!(!banks.templates_for(tier).is_empty(), "{tier:?} templates");
            assert!(!banks.closings_for(tier).is_empty(), "{tier:?} closings");
        }
    }
}
