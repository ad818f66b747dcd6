//! Property fact extraction from page text.
//!
//! Heuristic, regex-driven. Extraction never fails: any field that cannot be
//! matched and validated keeps its bracketed placeholder.
//!
//! # Example
//!
//! ```
//! use leasedeck::extract::extract_property_facts;
//!
//! let facts = extract_property_facts("Oak Commons in Dayton, OH 45,000 SF $18.50/SF");
//! assert_eq!(facts.location_label, "Dayton, OH");
//! assert_eq!(facts.size_label, "45,000 SF");
//! assert_eq!(facts.rent_label, "$18.50/SF/YR");
//! ```

mod address;
mod rules;

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

pub use address::{city_from_address, resolve_city_state, state_from_address};
pub use rules::{
    first_accepted, parse_grouped, rules, FieldRule, RuleSet, AVAILABLE_SPACE_RANGE,
    BUILDING_SIZE_RANGE, MIN_NAME_CHARS, RENT_RANGE,
};

use crate::model::PropertyFacts;

/// NFC-normalize, collapse whitespace runs to single spaces and trim.
pub fn normalize_text(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
    let nfc: String = text.nfc().collect();
    re.replace_all(&nfc, " ").trim().to_string()
}

/// Extract display-ready property facts from raw page text.
pub fn extract_property_facts(text: &str) -> PropertyFacts {
    let mut facts = PropertyFacts::placeholder();
    let clean = normalize_text(text);
    if clean.is_empty() {
        return facts;
    }

    let rules = rules();

    if let Some(caps) = first_accepted(&rules.name, &clean) {
        facts.name = caps[1].trim().to_string();
    }

    if let Some(caps) = first_accepted(&rules.location, &clean) {
        facts.city = caps[1].to_string();
        facts.state = caps[2].to_string();
        facts.location_label = format!("{}, {}", facts.city, facts.state);
    }

    if let Some(caps) = first_accepted(&rules.size, &clean) {
        facts.size_label = format!("{} SF", &caps[1]);
    }

    if let Some(caps) = first_accepted(&rules.available, &clean) {
        facts.available_space_label = format!("{} SF", &caps[1]);
    }

    if let Some(caps) = first_accepted(&rules.rent, &clean) {
        facts.rent_label = format!("${}/SF/YR", &caps[1]);
    }

    log::debug!(
        "Extracted facts: name={:?} location={:?} size={:?} available={:?} rent={:?}",
        facts.name,
        facts.location_label,
        facts.size_label,
        facts.available_space_label,
        facts.rent_label
    );
    facts
}
