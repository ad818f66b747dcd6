//! Layout options.

use serde::{Deserialize, Serialize};

use super::paginator::TableGeometry;
use crate::model::ReportingPeriod;

/// A headline activity metric on the summary slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: u32,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The six activity metrics shown by default.
pub fn default_kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("Outbound", 45),
        Kpi::new("Inbound", 15),
        Kpi::new("Tours", 12),
        Kpi::new("Prospects", 28),
        Kpi::new("Proposals", 7),
        Kpi::new("Follow-ups", 34),
    ]
}

/// Title, subtitle and record count of one contact table section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    pub subtitle: String,
    pub count: usize,
}

impl SectionSpec {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, count: usize) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            count,
        }
    }

    /// Tenants contacted by the leasing team.
    pub fn outbound() -> Self {
        Self::new("OUTBOUND ACTIVITY", "Tenants We Contacted", 45)
    }

    /// Tenants who reached out.
    pub fn inbound() -> Self {
        Self::new("INBOUND ACTIVITY", "Tenants Who Contacted Us", 32)
    }
}

/// Options for building the deck.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Period shown in the summary subtitle and used for contact dates
    pub period: ReportingPeriod,

    /// Summary KPI cards, left to right
    pub kpis: Vec<Kpi>,

    /// Outbound contact table section
    pub outbound: SectionSpec,

    /// Inbound contact table section
    pub inbound: SectionSpec,

    /// Contact table geometry
    pub table: TableGeometry,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reporting period.
    pub fn with_period(mut self, period: ReportingPeriod) -> Self {
        self.period = period;
        self
    }

    /// Replace the KPI cards.
    pub fn with_kpis(mut self, kpis: Vec<Kpi>) -> Self {
        self.kpis = kpis;
        self
    }

    /// Set the outbound section.
    pub fn with_outbound(mut self, section: SectionSpec) -> Self {
        self.outbound = section;
        self
    }

    /// Set the inbound section.
    pub fn with_inbound(mut self, section: SectionSpec) -> Self {
        self.inbound = section;
        self
    }

    /// Set the contact table geometry.
    pub fn with_table_geometry(mut self, table: TableGeometry) -> Self {
        self.table = table;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            period: ReportingPeriod::default(),
            kpis: default_kpis(),
            outbound: SectionSpec::outbound(),
            inbound: SectionSpec::inbound(),
            table: TableGeometry::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kpis() {
        let kpis = default_kpis();
        let labels: Vec<&str> = kpis.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Outbound", "Inbound", "Tours", "Prospects", "Proposals", "Follow-ups"]
        );
        let values: Vec<u32> = kpis.iter().map(|k| k.value).collect();
        assert_eq!(values, [45, 15, 12, 28, 7, 34]);
    }

    #[test]
    fn test_default_sections() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.outbound.count, 45);
        assert_eq!(opts.inbound.count, 32);
        assert_eq!(opts.inbound.subtitle, "Tenants Who Contacted Us");
    }

    #[test]
    fn test_builder_pattern() {
        let opts = LayoutOptions::new()
            .with_kpis(vec![Kpi::new("Tours", 3)])
            .with_outbound(SectionSpec::new("OUT", "sub", 5));
        assert_eq!(opts.kpis.len(), 1);
        assert_eq!(opts.outbound.count, 5);
    }
}
