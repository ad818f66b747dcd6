//! City and state fallbacks from a free-text address.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::PropertyFacts;

/// City: the second-to-last comma-separated part, trimmed.
///
/// `"123 Main St, Springfield, IL 62704"` yields `"Springfield"`.
pub fn city_from_address(address: &str) -> String {
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2].trim().to_string()
    } else {
        String::new()
    }
}

/// State: two upper-case letters after the last comma, optionally followed
/// by up to five digits, at the end of the address.
pub fn state_from_address(address: &str) -> String {
    static STATE: OnceLock<Regex> = OnceLock::new();
    let re = STATE.get_or_init(|| {
        Regex::new(r",\s*([A-Z]{2})\s*\d{0,5}\s*$").expect("state pattern is valid")
    });
    re.captures(address)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// City and state for the narrative request.
///
/// Values matched in the document win; each missing one falls back to the
/// address independently.
pub fn resolve_city_state(facts: &PropertyFacts, address: &str) -> (String, String) {
    let city = if facts.city.is_empty() {
        city_from_address(address)
    } else {
        facts.city.clone()
    };
    let state = if facts.state.is_empty() {
        state_from_address(address)
    } else {
        facts.state.clone()
    };
    (city, state)
}
