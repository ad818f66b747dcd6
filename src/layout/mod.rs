//! Deck layout.
//!
//! All geometry is expressed as fractions of the slide size, which itself is
//! the cover page bitmap at 96 px per inch. The theme accent is sampled from
//! the cover page.

mod engine;
mod geometry;
mod options;
mod paginator;
pub mod palette;
mod summary;

pub use engine::{ContactSection, LayoutEngine, LayoutInput};
pub use geometry::{Canvas, PX_PER_INCH};
pub use options::{default_kpis, Kpi, LayoutOptions, SectionSpec};
pub use paginator::{
    paginate, ContactTablePaginator, PageRange, TableGeometry, COLUMN_FRACTIONS, COLUMN_HEADERS,
};
pub use summary::{
    build_summary_slide, SummaryContent, MARKET_PANEL_TITLE, PROPERTY_CARD_TITLE, REPORT_TITLE,
};
