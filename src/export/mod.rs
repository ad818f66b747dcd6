//! Deck export.
//!
//! A [`DeckExporter`] turns a finished [`Deck`] into the bytes of a file.
//! [`PptxExporter`] writes PowerPoint packages.

mod parts;
mod pptx;
mod xml;

pub use pptx::{PptxExporter, DEFAULT_TITLE, PPTX_MIME_TYPE};
pub use xml::{emu, escape_xml, slide_xml, EMU_PER_INCH, EMU_PER_POINT};

use crate::error::Result;
use crate::model::Deck;

/// Serializes a deck.
pub trait DeckExporter: Send + Sync {
    /// Serialize the deck into the exporter's file format.
    fn export(&self, deck: &Deck) -> Result<Vec<u8>>;
}
