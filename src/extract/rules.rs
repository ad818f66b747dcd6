//! Ordered pattern/validator tables for each property fact.
//!
//! Only the first match of each pattern is considered. The first rule whose
//! match passes its validator wins; later rules are not tried.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Accepted building size range in square feet.
pub const BUILDING_SIZE_RANGE: (u64, u64) = (1_000, 1_000_000);

/// Accepted available-space range in square feet.
pub const AVAILABLE_SPACE_RANGE: (u64, u64) = (500, 1_000_000);

/// Accepted asking-rent range in dollars per square foot per year.
pub const RENT_RANGE: (f64, f64) = (5.0, 200.0);

/// Names must be longer than this many characters after trimming.
pub const MIN_NAME_CHARS: usize = 5;

/// One extraction rule.
pub struct FieldRule {
    pattern: Regex,
    validate: fn(&Captures<'_>) -> bool,
}

impl FieldRule {
    fn new(pattern: &str, validate: fn(&Captures<'_>) -> bool) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("extraction patterns are valid"),
            validate,
        }
    }

    /// Test the first match of the pattern.
    pub fn apply<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let caps = self.pattern.captures(text)?;
        (self.validate)(&caps).then_some(caps)
    }
}

/// Rule tables for every extracted field.
pub struct RuleSet {
    pub name: Vec<FieldRule>,
    pub location: Vec<FieldRule>,
    pub size: Vec<FieldRule>,
    pub available: Vec<FieldRule>,
    pub rent: Vec<FieldRule>,
}

impl RuleSet {
    fn build() -> Self {
        Self {
            name: vec![
                FieldRule::new(
                    r"(?i)^([A-Z\s&]{10,60}?)\s*(?:OFFERING|MEMORANDUM|\d{3,5}\s+[A-Z])",
                    name_long_enough,
                ),
                FieldRule::new(
                    r"(?i)([A-Z][a-z\s&']+(?:Shopping Center|Plaza|Center|Square|Commons|Mall))",
                    name_long_enough,
                ),
            ],
            location: vec![
                FieldRule::new(
                    r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2}),\s*([A-Z]{2})\b",
                    city_and_state,
                ),
                FieldRule::new(
                    r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*),\s*([A-Z]{2})\s+\d{5}",
                    city_and_state,
                ),
            ],
            size: vec![
                FieldRule::new(
                    r"(?i)(\d{1,3}(?:,\d{3})+)\s*(?:SF|Square Feet)",
                    building_size,
                ),
                FieldRule::new(
                    r"(?i)(?:Building|Property|Total)[\s:]*(\d{1,3}(?:,\d{3})+)\s*SF",
                    building_size,
                ),
            ],
            available: vec![FieldRule::new(
                r"(?i)(?:Available|For Lease)[\s:]*(\d{1,3}(?:,\d{3})+)\s*SF",
                available_space,
            )],
            rent: vec![
                FieldRule::new(
                    r"(?i)\$\s*(\d{1,3}(?:\.\d{2})?)\s*(?:/\s*SF|PSF)",
                    rent_rate,
                ),
                FieldRule::new(
                    r"(?i)(?:Rent|Rate)[\s:]*\$\s*(\d{1,3}(?:\.\d{2})?)\s*/\s*SF",
                    rent_rate,
                ),
            ],
        }
    }
}

/// Shared, lazily compiled rule tables.
pub fn rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(RuleSet::build)
}

/// Captures of the first rule that accepts `text`.
pub fn first_accepted<'t>(rules: &[FieldRule], text: &'t str) -> Option<Captures<'t>> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// Parse a thousands-grouped integer (`45,000`).
pub fn parse_grouped(value: &str) -> Option<u64> {
    value.replace(',', "").parse().ok()
}

fn name_long_enough(caps: &Captures<'_>) -> bool {
    caps.get(1)
        .map(|m| m.as_str().trim().chars().count() > MIN_NAME_CHARS)
        .unwrap_or(false)
}

fn city_and_state(caps: &Captures<'_>) -> bool {
    caps.get(1).is_some() && caps.get(2).is_some()
}

fn square_feet_within(caps: &Captures<'_>, (min, max): (u64, u64)) -> bool {
    caps.get(1)
        .and_then(|m| parse_grouped(m.as_str()))
        .map(|sqft| (min..=max).contains(&sqft))
        .unwrap_or(false)
}

fn building_size(caps: &Captures<'_>) -> bool {
    square_feet_within(caps, BUILDING_SIZE_RANGE)
}

fn available_space(caps: &Captures<'_>) -> bool {
    square_feet_within(caps, AVAILABLE_SPACE_RANGE)
}

fn rent_rate(caps: &Captures<'_>) -> bool {
    let (min, max) = RENT_RANGE;
    caps.get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|rate| rate >= min && rate <= max)
        .unwrap_or(false)
}
