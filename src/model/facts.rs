//! Structured property facts pulled from the offering document.

use serde::{Deserialize, Serialize};

/// Display-ready facts about the subject property.
///
/// Every label is always populated, either with a matched value or with a
/// bracketed placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFacts {
    /// Property name, or `[Property Name]`
    pub name: String,
    /// Building size, e.g. `45,000 SF`, or `[XX,XXX SF]`
    pub size_label: String,
    /// `City, ST`, or `[City, State]`
    pub location_label: String,
    /// Available space, e.g. `2,400 SF`, or `[X,XXX SF]`
    pub available_space_label: String,
    /// Asking rent, e.g. `$28.50/SF/YR`, or `$[XX.XX]/SF/YR`
    pub rent_label: String,
    /// Matched city (empty when nothing matched)
    pub city: String,
    /// Matched 2-letter state code (empty when nothing matched)
    pub state: String,
    /// Caller-supplied property address
    #[serde(default)]
    pub address: String,
}

impl PropertyFacts {
    pub const NAME_PLACEHOLDER: &'static str = "[Property Name]";
    pub const SIZE_PLACEHOLDER: &'static str = "[XX,XXX SF]";
    pub const LOCATION_PLACEHOLDER: &'static str = "[City, State]";
    pub const AVAILABLE_PLACEHOLDER: &'static str = "[X,XXX SF]";
    pub const RENT_PLACEHOLDER: &'static str = "$[XX.XX]/SF/YR";

    /// Facts with every label set to its placeholder.
    pub fn placeholder() -> Self {
        Self {
            name: Self::NAME_PLACEHOLDER.to_string(),
            size_label: Self::SIZE_PLACEHOLDER.to_string(),
            location_label: Self::LOCATION_PLACEHOLDER.to_string(),
            available_space_label: Self::AVAILABLE_PLACEHOLDER.to_string(),
            rent_label: Self::RENT_PLACEHOLDER.to_string(),
            city: String::new(),
            state: String::new(),
            address: String::new(),
        }
    }

    /// Merge the caller-supplied address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Display labels in card order.
    pub fn labels(&self) -> [&str; 5] {
        [
            &self.name,
            &self.size_label,
            &self.location_label,
            &self.available_space_label,
            &self.rent_label,
        ]
    }

    /// True when no label carries a matched value.
    pub fn is_all_placeholder(&self) -> bool {
        *self == Self::placeholder().with_address(self.address.clone())
    }
}

impl Default for PropertyFacts {
    fn default() -> Self {
        Self::placeholder()
    }
}
