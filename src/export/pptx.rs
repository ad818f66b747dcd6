//! PPTX package writer.

use std::io::{Cursor, Write};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::parts::{self, Relationship, REL_IMAGE, REL_SLIDE_LAYOUT};
use super::xml::{picture_rel_id, slide_xml};
use super::DeckExporter;
use crate::error::Result;
use crate::model::{Deck, FALLBACK_ACCENT};

/// Default document title written to the core properties.
pub const DEFAULT_TITLE: &str = "Landlord Update Report";

/// MIME type of a PPTX package.
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Writes a [`Deck`] as an Office Open XML presentation.
///
/// # Example
///
/// ```
/// use leasedeck::export::{DeckExporter, PptxExporter};
/// use leasedeck::model::Deck;
///
/// let bytes = PptxExporter::new().export(&Deck::new(10.0, 7.5)).unwrap();
/// assert_eq!(&bytes[..2], b"PK");
/// ```
#[derive(Debug, Clone)]
pub struct PptxExporter {
    title: String,
    creator: String,
    created: Option<DateTime<Utc>>,
}

impl Default for PptxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PptxExporter {
    /// Create an exporter with the default title.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            creator: "leasedeck".to_string(),
            created: None,
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the document author.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Pin the creation timestamp instead of using the current time.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Media parts collected while writing slides.
#[derive(Default)]
struct MediaStore {
    items: Vec<(Arc<[u8]>, String)>,
}

impl MediaStore {
    /// Part name for `data`, reusing an existing entry for the same buffer.
    fn insert(&mut self, data: &Arc<[u8]>, mime_type: &str) -> String {
        if let Some((_, name)) = self.items.iter().find(|(d, _)| Arc::ptr_eq(d, data)) {
            return name.clone();
        }
        let ext = match mime_type {
            "image/jpeg" => "jpeg",
            _ => "png",
        };
        let name = format!("image{}.{}", self.items.len() + 1, ext);
        self.items.push((data.clone(), name.clone()));
        name
    }
}

struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PackageWriter {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }

    fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        self.zip.start_file(path, self.options)?;
        self.zip.write_all(content)?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl DeckExporter for PptxExporter {
    fn export(&self, deck: &Deck) -> Result<Vec<u8>> {
        let slide_count = deck.slide_count();
        log::debug!(
            "Writing PPTX: {} slides at {:.2}x{:.2} in",
            slide_count,
            deck.width,
            deck.height
        );

        let mut pkg = PackageWriter::new();
        pkg.add_file("[Content_Types].xml", parts::content_types_xml(slide_count)?.as_bytes())?;
        pkg.add_file("_rels/.rels", parts::root_rels_xml().as_bytes())?;

        let created = self.created.unwrap_or_else(Utc::now);
        pkg.add_file(
            "docProps/core.xml",
            parts::core_props_xml(&self.title, &self.creator, created).as_bytes(),
        )?;
        pkg.add_file("docProps/app.xml", parts::app_props_xml(slide_count).as_bytes())?;

        pkg.add_file(
            "ppt/presentation.xml",
            parts::presentation_xml(slide_count, deck.width, deck.height)?.as_bytes(),
        )?;
        pkg.add_file(
            "ppt/_rels/presentation.xml.rels",
            parts::relationships_xml(&parts::presentation_rels(slide_count))?.as_bytes(),
        )?;
        pkg.add_file("ppt/presProps.xml", parts::pres_props_xml().as_bytes())?;

        pkg.add_file(
            "ppt/slideMasters/slideMaster1.xml",
            parts::slide_master_xml().as_bytes(),
        )?;
        pkg.add_file(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            parts::relationships_xml(&parts::slide_master_rels())?.as_bytes(),
        )?;
        pkg.add_file(
            "ppt/slideLayouts/slideLayout1.xml",
            parts::slide_layout_xml().as_bytes(),
        )?;
        pkg.add_file(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            parts::relationships_xml(&parts::slide_layout_rels())?.as_bytes(),
        )?;

        let accent = deck.accent.unwrap_or(FALLBACK_ACCENT);
        pkg.add_file("ppt/theme/theme1.xml", parts::theme_xml(&accent.to_hex()).as_bytes())?;

        let mut media = MediaStore::default();
        for (i, slide) in deck.slides().iter().enumerate() {
            let n = i + 1;
            pkg.add_file(&format!("ppt/slides/slide{}.xml", n), slide_xml(slide)?.as_bytes())?;

            let mut rels = vec![Relationship::new(
                "rId1",
                REL_SLIDE_LAYOUT,
                "../slideLayouts/slideLayout1.xml",
            )];
            for (j, picture) in slide.pictures().enumerate() {
                let name = media.insert(&picture.data, picture.mime_type);
                rels.push(Relationship::new(
                    picture_rel_id(j),
                    REL_IMAGE,
                    format!("../media/{}", name),
                ));
            }
            pkg.add_file(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                parts::relationships_xml(&rels)?.as_bytes(),
            )?;
        }

        for (data, name) in &media.items {
            pkg.add_file(&format!("ppt/media/{}", name), data)?;
        }

        let bytes = pkg.finish()?;
        log::info!(
            "PPTX written: {} slides, {} media, {} bytes",
            slide_count,
            media.items.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
