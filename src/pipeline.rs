//! Document-to-deck pipeline.
//!
//! One invocation validates the request, rasterizes the cover and back pages,
//! extracts property facts, resolves the market narrative, lays out the deck
//! and exports it. Any failure aborts the invocation; no partial deck is
//! returned.
//!
//! # Example
//!
//! ```no_run
//! use leasedeck::pipeline::{Capabilities, ReportPipeline, ReportRequest};
//!
//! fn main() -> leasedeck::Result<()> {
//!     let request = ReportRequest::from_path("offering.pdf", "123 Main St, Springfield, IL 62704")?;
//!     let artifact = ReportPipeline::new(Capabilities::with_defaults()).run(&request)?;
//!     artifact.save(&artifact.file_name)?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::contacts::{ContactSource, MockContacts};
use crate::detect::{validate_address, validate_upload, PdfFormat};
use crate::error::{Error, Result};
use crate::export::{DeckExporter, PptxExporter};
use crate::extract::{extract_property_facts, resolve_city_state};
use crate::layout::{ContactSection, LayoutEngine, LayoutInput, LayoutOptions, SectionSpec};
use crate::model::{Deck, PropertyFacts};
use crate::narrative::{resolve_narrative, NarrativeRequest, NarrativeSource, UnavailableNarrative};
use crate::raster::{DocumentRenderer, PageRasterizer, PdfiumRenderer, RasterOptions};

/// File name of the exported deck.
pub const REPORT_FILE_NAME: &str = "Landlord_Update_Report.pptx";

/// Rendering and export collaborators, resolved once at construction.
#[derive(Clone, Default)]
pub struct Capabilities {
    renderer: Option<Arc<dyn DocumentRenderer>>,
    exporter: Option<Arc<dyn DeckExporter>>,
}

impl Capabilities {
    /// No collaborators; every run fails with [`Error::DependencyLoad`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The PDFium renderer and PPTX exporter.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_renderer(Arc::new(PdfiumRenderer::new()))
            .with_exporter(Arc::new(PptxExporter::new()))
    }

    /// Set the document renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set the deck exporter.
    pub fn with_exporter(mut self, exporter: Arc<dyn DeckExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// The renderer, or [`Error::DependencyLoad`] when none is configured.
    pub fn renderer(&self) -> Result<Arc<dyn DocumentRenderer>> {
        self.renderer
            .clone()
            .ok_or_else(|| Error::DependencyLoad("document renderer".to_string()))
    }

    /// The exporter, or [`Error::DependencyLoad`] when none is configured.
    pub fn exporter(&self) -> Result<Arc<dyn DeckExporter>> {
        self.exporter
            .clone()
            .ok_or_else(|| Error::DependencyLoad("deck exporter".to_string()))
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("renderer", &self.renderer.as_ref().map(|r| r.name().to_string()))
            .field("exporter", &self.exporter.is_some())
            .finish()
    }
}

/// An uploaded document plus the property address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// Raw document bytes
    pub document: Vec<u8>,
    /// Free-text property address
    pub address: String,
}

impl ReportRequest {
    /// Create a request from bytes.
    pub fn new(document: impl Into<Vec<u8>>, address: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            address: address.into(),
        }
    }

    /// Read the document from a file.
    pub fn from_path<P: AsRef<Path>>(path: P, address: impl Into<String>) -> Result<Self> {
        Ok(Self::new(std::fs::read(path)?, address))
    }

    /// Check the request before any processing.
    ///
    /// Missing file first, then missing address, then non-PDF content.
    pub fn validate(&self) -> Result<PdfFormat> {
        if self.document.is_empty() {
            return Err(Error::InputValidation(
                "Please upload a file first".to_string(),
            ));
        }
        validate_address(&self.address)?;
        validate_upload(&self.document)
    }
}

/// Options for one pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Page rendering
    pub raster: RasterOptions,
    /// Deck layout
    pub layout: LayoutOptions,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set raster options.
    pub fn with_raster_options(mut self, raster: RasterOptions) -> Self {
        self.raster = raster;
        self
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Render pages one after the other.
    pub fn sequential(mut self) -> Self {
        self.raster = self.raster.sequential();
        self
    }
}

/// The finished deck before export.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub facts: PropertyFacts,
    pub narrative: String,
    pub deck: Deck,
    /// Pages in the source document
    pub page_count: u32,
}

/// The exported deck.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    /// Suggested file name
    pub file_name: String,
    /// Serialized deck
    pub bytes: Vec<u8>,
    pub slide_count: usize,
    pub facts: PropertyFacts,
}

impl ReportArtifact {
    /// Write the artifact to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }

    /// Get the artifact size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Generates landlord update decks from offering documents.
///
/// Holds no per-invocation state and can be shared across threads.
pub struct ReportPipeline {
    capabilities: Capabilities,
    options: PipelineOptions,
    narrative: Arc<dyn NarrativeSource>,
    outbound: Option<Arc<dyn ContactSource>>,
    inbound: Option<Arc<dyn ContactSource>>,
}

impl ReportPipeline {
    /// Create a pipeline with default options, no narrative collaborator and
    /// mock contact sources.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            options: PipelineOptions::default(),
            narrative: Arc::new(UnavailableNarrative),
            outbound: None,
            inbound: None,
        }
    }

    /// Set pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the market narrative source.
    pub fn with_narrative(mut self, narrative: Arc<dyn NarrativeSource>) -> Self {
        self.narrative = narrative;
        self
    }

    /// Set the outbound contact source.
    pub fn with_outbound_contacts(mut self, source: Arc<dyn ContactSource>) -> Self {
        self.outbound = Some(source);
        self
    }

    /// Set the inbound contact source.
    pub fn with_inbound_contacts(mut self, source: Arc<dyn ContactSource>) -> Self {
        self.inbound = Some(source);
        self
    }

    /// Current options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the pipeline and export the deck.
    pub fn run(&self, request: &ReportRequest) -> Result<ReportArtifact> {
        let exporter = self.capabilities.exporter()?;
        let report = self.build_report(request)?;
        let bytes = exporter.export(&report.deck)?;

        log::info!(
            "Generated {} with {} slides ({} bytes)",
            REPORT_FILE_NAME,
            report.deck.slide_count(),
            bytes.len()
        );
        Ok(ReportArtifact {
            file_name: REPORT_FILE_NAME.to_string(),
            bytes,
            slide_count: report.deck.slide_count(),
            facts: report.facts,
        })
    }

    /// Run every step up to and including layout.
    pub fn build_report(&self, request: &ReportRequest) -> Result<GeneratedReport> {
        let format = request.validate()?;
        log::debug!("Accepted PDF {} ({} bytes)", format.version, request.document.len());

        let renderer = self.capabilities.renderer()?;
        let rasterized = PageRasterizer::new(renderer)
            .with_options(self.options.raster.clone())
            .rasterize(&request.document)?;

        let facts = extract_property_facts(&rasterized.text).with_address(request.address.trim());
        if facts.is_all_placeholder() {
            log::debug!("No property facts matched; using placeholders");
        }

        let (city, state) = resolve_city_state(&facts, &facts.address);
        let narrative = resolve_narrative(
            self.narrative.as_ref(),
            &NarrativeRequest::new(city, state, facts.address.clone()),
        );

        let layout = &self.options.layout;
        let sections = [
            self.section(&layout.outbound, self.outbound.as_deref(), MockContacts::outbound),
            self.section(&layout.inbound, self.inbound.as_deref(), MockContacts::inbound),
        ];

        let input = LayoutInput {
            cover: &rasterized.first_page,
            back: &rasterized.last_page,
            facts: &facts,
            narrative: &narrative,
            sections: &sections,
        };
        let deck = LayoutEngine::new(layout.clone()).build(&input)?;

        Ok(GeneratedReport {
            facts,
            narrative,
            deck,
            page_count: rasterized.page_count,
        })
    }

    fn section(
        &self,
        spec: &SectionSpec,
        source: Option<&dyn ContactSource>,
        mock: fn() -> MockContacts,
    ) -> ContactSection {
        let contacts = match source {
            Some(source) => source.fetch_contacts(spec.count),
            None => mock()
                .with_period(self.options.layout.period)
                .fetch_contacts(spec.count),
        };
        ContactSection::new(spec.title.clone(), spec.subtitle.clone(), contacts)
    }
}

impl fmt::Debug for ReportPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportPipeline")
            .field("capabilities", &self.capabilities)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
