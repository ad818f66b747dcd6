//! # leasedeck
//!
//! Turns a property offering memorandum (PDF) into a themed landlord update
//! deck (PPTX).
//!
//! The cover and back pages of the source document are rasterized and
//! placed full-bleed; the accent color of the deck is sampled from the cover.
//! Property facts are pulled from the cover text with heuristic rules, a
//! local market narrative is fetched from an external collaborator, and the
//! outbound and inbound contact logs are paginated into table slides.
//!
//! ## Quick Start
//!
//! ```no_run
//! use leasedeck::generate_report_file;
//!
//! fn main() -> leasedeck::Result<()> {
//!     let artifact = generate_report_file("offering.pdf", "123 Main St, Springfield, IL 62704")?;
//!     artifact.save(&artifact.file_name)?;
//!     println!("{} slides", artifact.slide_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page rasterization**: PDFium renderer, two pages rendered in parallel with Rayon
//! - **Theme sampling**: dominant non-white color of the cover page
//! - **Fact extraction**: regex rule tables with placeholder fallbacks
//! - **Auto-pagination**: contact tables split to fit the slide height
//! - **PPTX export**: Office Open XML package written with `zip`

pub mod contacts;
pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod layout;
pub mod model;
pub mod narrative;
pub mod pipeline;
pub mod raster;

// Re-export commonly used types
pub use contacts::{ContactSource, MockContacts, StaticContacts};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, NarrativeFailure, Result};
pub use export::{DeckExporter, PptxExporter};
pub use extract::extract_property_facts;
pub use layout::{LayoutEngine, LayoutOptions};
pub use model::{
    ContactRecord, Deck, PropertyFacts, RasterPage, ReportingPeriod, Rgb, Slide, Theme,
};
pub use narrative::{NarrativeSource, StaticNarrative, UnavailableNarrative};
#[cfg(feature = "http")]
pub use narrative::HttpNarrativeSource;
pub use pipeline::{
    Capabilities, GeneratedReport, PipelineOptions, ReportArtifact, ReportPipeline,
    ReportRequest, REPORT_FILE_NAME,
};
pub use raster::{DocumentRenderer, LoadedDocument, PdfiumRenderer, RasterOptions};

use std::path::Path;
use std::sync::Arc;

/// Generate a deck from PDF bytes with the built-in renderer and exporter.
///
/// No narrative collaborator is configured, so the market panel shows the
/// transport fallback text.
///
/// # Example
///
/// ```no_run
/// use leasedeck::generate_report;
///
/// let data = std::fs::read("offering.pdf").unwrap();
/// let artifact = generate_report(&data, "123 Main St, Springfield, IL 62704").unwrap();
/// std::fs::write(&artifact.file_name, &artifact.bytes).unwrap();
/// ```
pub fn generate_report(data: &[u8], address: &str) -> Result<ReportArtifact> {
    Leasedeck::new().generate(data, address)
}

/// Generate a deck from a PDF file.
pub fn generate_report_file<P: AsRef<Path>>(path: P, address: &str) -> Result<ReportArtifact> {
    Leasedeck::new().generate_file(path, address)
}

/// Extract property facts from a PDF without building a deck.
///
/// # Example
///
/// ```no_run
/// use leasedeck::extract_facts;
///
/// let data = std::fs::read("offering.pdf").unwrap();
/// let facts = extract_facts(&data).unwrap();
/// println!("{} ({})", facts.name, facts.location_label);
/// ```
pub fn extract_facts(data: &[u8]) -> Result<PropertyFacts> {
    detect_format_from_bytes(data)?;
    let doc = PdfiumRenderer::new().load(data)?;
    let text = match doc.page_text(1) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Text extraction failed, continuing without text: {}", e);
            String::new()
        }
    };
    Ok(extract_property_facts(&text))
}

/// Generate a deck on the Tokio blocking pool.
#[cfg(feature = "async")]
pub async fn generate_report_async(
    pipeline: Arc<ReportPipeline>,
    request: ReportRequest,
) -> Result<ReportArtifact> {
    tokio::task::spawn_blocking(move || pipeline.run(&request))
        .await
        .map_err(|e| Error::Other(format!("report task failed: {}", e)))?
}

/// Builder for configuring report generation.
///
/// # Example
///
/// ```no_run
/// use leasedeck::{Leasedeck, StaticNarrative};
/// use std::sync::Arc;
///
/// let artifact = Leasedeck::new()
///     .with_narrative(Arc::new(StaticNarrative::new("Retail vacancy fell to 4.1%.")))
///     .with_scale(1.5)
///     .sequential()
///     .generate_file("offering.pdf", "500 Oak Ave, Dayton, OH 45402")?;
/// # Ok::<(), leasedeck::Error>(())
/// ```
pub struct Leasedeck {
    capabilities: Capabilities,
    options: PipelineOptions,
    narrative: Option<Arc<dyn NarrativeSource>>,
}

impl Leasedeck {
    /// Create a builder with the built-in renderer and exporter.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::with_defaults(),
            options: PipelineOptions::default(),
            narrative: None,
        }
    }

    /// Replace the rendering and export collaborators.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the market narrative source.
    pub fn with_narrative(mut self, narrative: Arc<dyn NarrativeSource>) -> Self {
        self.narrative = Some(narrative);
        self
    }

    /// Fetch the narrative from an HTTP endpoint.
    #[cfg(feature = "http")]
    pub fn with_narrative_url(self, url: impl Into<String>) -> Result<Self> {
        let source = HttpNarrativeSource::new(url)?;
        Ok(self.with_narrative(Arc::new(source)))
    }

    /// Set the reporting period.
    pub fn with_period(mut self, period: ReportingPeriod) -> Self {
        self.options.layout = self.options.layout.with_period(period);
        self
    }

    /// Set the rasterization scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.options.raster = self.options.raster.with_scale(scale);
        self
    }

    /// Render pages one after the other.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Build the configured pipeline.
    pub fn pipeline(self) -> ReportPipeline {
        let pipeline = ReportPipeline::new(self.capabilities).with_options(self.options);
        match self.narrative {
            Some(narrative) => pipeline.with_narrative(narrative),
            None => pipeline,
        }
    }

    /// Generate a deck from PDF bytes.
    pub fn generate(self, data: &[u8], address: &str) -> Result<ReportArtifact> {
        self.pipeline().run(&ReportRequest::new(data, address))
    }

    /// Generate a deck from a PDF file.
    pub fn generate_file<P: AsRef<Path>>(self, path: P, address: &str) -> Result<ReportArtifact> {
        let request = ReportRequest::from_path(path, address)?;
        self.pipeline().run(&request)
    }
}

impl Default for Leasedeck {
    fn default() -> Self {
        Self::new()
    }
}
