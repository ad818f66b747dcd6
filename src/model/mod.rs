//! Data model for the document-to-deck pipeline.
//!
//! Every value here is created and consumed within a single pipeline
//! invocation. Nothing is shared or mutated across invocations.

mod color;
mod contact;
mod deck;
mod facts;
mod period;
mod raster;

pub use color::{Rgb, Theme, FALLBACK_ACCENT, LIGHTEN_PERCENT};
pub use contact::ContactRecord;
pub use deck::{
    Deck, Element, Frame, HAlign, Picture, Shape, Slide, Stroke, TextBox, TextStyle, VAlign,
};
pub use facts::PropertyFacts;
pub use period::{short_date, ReportingPeriod};
pub use raster::RasterPage;
