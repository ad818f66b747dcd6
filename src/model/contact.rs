//! Contact log rows shown on the activity tables.

use serde::{Deserialize, Serialize};

/// One tenant-outreach entry. All fields are display-ready strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Tenant / company name
    pub company: String,
    /// Person contacted
    pub contact: String,
    /// Contact date as displayed (e.g. "1/3/25")
    pub date: String,
    /// Channel (Call, Email, Portal)
    pub method: String,
    /// Current status of the lead
    pub status: String,
}

impl ContactRecord {
    /// Create a new contact record.
    pub fn new(
        company: impl Into<String>,
        contact: impl Into<String>,
        date: impl Into<String>,
        method: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            contact: contact.into(),
            date: date.into(),
            method: method.into(),
            status: status.into(),
        }
    }

    /// Cell values in table column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.company,
            &self.contact,
            &self.date,
            &self.method,
            &self.status,
        ]
    }
}
