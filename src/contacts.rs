//! Contact log sources for the activity tables.
//!
//! The deck only needs an ordered list of records; where they come from is
//! behind [`ContactSource`]. The built-in mock sources rotate through fixed
//! tenant tables, one date per day of the reporting period.

use crate::model::{short_date, ContactRecord, ReportingPeriod};

/// Supplies contact records for one table section.
pub trait ContactSource: Send + Sync {
    /// Up to `count` records in display order.
    fn fetch_contacts(&self, count: usize) -> Vec<ContactRecord>;
}

/// Rotation tables for a mock source.
#[derive(Debug)]
pub struct ContactTables {
    pub companies: &'static [&'static str],
    pub contacts: &'static [&'static str],
    pub methods: &'static [&'static str],
    pub statuses: &'static [&'static str],
}

/// Prospective tenants the leasing team reached out to.
pub static OUTBOUND_TABLES: ContactTables = ContactTables {
    companies: &[
        "Starbucks Coffee",
        "Chipotle Mexican Grill",
        "Planet Fitness",
        "Orangetheory Fitness",
        "Five Guys Burgers",
        "Dunkin Donuts",
        "Jersey Mikes Subs",
        "Massage Envy",
        "Great Clips",
        "Anytime Fitness",
        "Sprint Mobile",
        "H&R Block",
        "Supercuts",
        "Jimmy Johns",
        "Subway",
        "Panera Bread",
        "CVS Pharmacy",
        "Walgreens",
        "Dollar Tree",
        "Dollar General",
        "AT&T Store",
        "Verizon Wireless",
        "T-Mobile",
        "Cricket Wireless",
        "Metro PCS",
        "Fantastic Sams",
        "Sport Clips",
        "Nail Salon Express",
        "European Wax Center",
        "Hand & Stone Massage",
        "LA Fitness",
        "Crunch Fitness",
        "24 Hour Fitness",
        "Snap Fitness",
        "Retro Fitness",
        "Qdoba Mexican Grill",
        "Moe's Southwest Grill",
        "Panda Express",
        "Noodles & Company",
        "Potbelly",
        "Firehouse Subs",
        "Which Wich",
        "Penn Station",
        "Charleys Philly Steaks",
        "Blaze Pizza",
    ],
    contacts: &[
        "John Smith",
        "Sarah Johnson",
        "Mike Davis",
        "Emily Wilson",
        "Chris Anderson",
        "Jennifer Lee",
        "David Brown",
        "Amanda Taylor",
        "Robert Martinez",
        "Lisa Garcia",
        "Michael Thompson",
        "Jessica White",
        "Daniel Harris",
        "Ashley Martin",
        "James Rodriguez",
    ],
    methods: &["Call", "Email", "Call", "Email", "Call"],
    statuses: &[
        "Left VM",
        "No Response",
        "Responded",
        "Follow-up",
        "Declined",
        "In Discussion",
    ],
};

/// Tenants who reached out about the property.
pub static INBOUND_TABLES: ContactTables = ContactTables {
    companies: &[
        "Target Corporation",
        "Trader Joes",
        "Whole Foods Market",
        "HomeGoods",
        "TJ Maxx",
        "Marshalls",
        "Ulta Beauty",
        "Sephora",
        "Panera Bread",
        "Shake Shack",
        "Lululemon",
        "Apple Store",
        "Best Buy",
        "Dick's Sporting Goods",
        "Bed Bath & Beyond",
        "Ross Dress for Less",
        "Burlington",
        "Nordstrom Rack",
        "DSW",
        "Famous Footwear",
        "Pet Supplies Plus",
        "PetSmart",
        "Petco",
        "Bath & Body Works",
        "Victoria's Secret",
        "Gap",
        "Old Navy",
        "Banana Republic",
        "J.Crew",
        "Ann Taylor",
        "Sweetgreen",
        "Cava",
        "Chipotle",
        "CorePower Yoga",
    ],
    contacts: &[
        "Jennifer Lee",
        "David Brown",
        "Amanda Taylor",
        "Robert Martinez",
        "Lisa Garcia",
        "Kevin White",
        "Michelle Johnson",
        "Brian Davis",
        "Nicole Anderson",
        "Steven Wilson",
        "Rachel Thompson",
        "Andrew Harris",
        "Stephanie Martin",
    ],
    methods: &["Call", "Email", "Portal", "Call", "Email"],
    statuses: &[
        "In Discussion",
        "Scheduled Tour",
        "Sent Info",
        "Awaiting Response",
        "Hot Lead",
    ],
};

/// Generates records by rotating each table column independently.
#[derive(Debug, Clone)]
pub struct MockContacts {
    tables: &'static ContactTables,
    period: ReportingPeriod,
}

impl MockContacts {
    /// Source over arbitrary tables.
    pub fn new(tables: &'static ContactTables) -> Self {
        Self {
            tables,
            period: ReportingPeriod::default(),
        }
    }

    /// Outbound activity source.
    pub fn outbound() -> Self {
        Self::new(&OUTBOUND_TABLES)
    }

    /// Inbound activity source.
    pub fn inbound() -> Self {
        Self::new(&INBOUND_TABLES)
    }

    /// Spread contact dates over this period.
    pub fn with_period(mut self, period: ReportingPeriod) -> Self {
        self.period = period;
        self
    }

    fn record(&self, i: usize) -> ContactRecord {
        let pick = |column: &'static [&'static str]| -> &'static str {
            column.get(i % column.len().max(1)).copied().unwrap_or_default()
        };
        ContactRecord::new(
            pick(self.tables.companies),
            pick(self.tables.contacts),
            short_date(self.period.cycle_date(i)),
            pick(self.tables.methods),
            pick(self.tables.statuses),
        )
    }
}

impl ContactSource for MockContacts {
    fn fetch_contacts(&self, count: usize) -> Vec<ContactRecord> {
        (0..count).map(|i| self.record(i)).collect()
    }
}

/// A fixed list, truncated to the requested count.
#[derive(Debug, Clone, Default)]
pub struct StaticContacts {
    records: Vec<ContactRecord>,
}

impl StaticContacts {
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self { records }
    }
}

impl ContactSource for StaticContacts {
    fn fetch_contacts(&self, count: usize) -> Vec<ContactRecord> {
        self.records.iter().take(count).cloned().collect()
    }
}
