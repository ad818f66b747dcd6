//! Document rendering backend.
//!
//! Provides a trait-based interface for page rasterization and text
//! extraction, isolating the concrete PDF engine (PDFium, bound at runtime
//! through `pdfium-render`) from the rasterizer.

use std::path::PathBuf;
use std::sync::OnceLock;

use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::error::{Error, Result};

/// Environment variable naming a directory that holds the PDFium library.
pub const PDFIUM_DIR_ENV: &str = "LEASEDECK_PDFIUM_DIR";

/// Largest bitmap side, in pixels, a page is rendered at.
pub const MAX_RENDER_DIMENSION: u32 = 16_384;

/// Largest bitmap area, in pixels, a page is rendered at.
pub const MAX_RENDER_PIXELS: u64 = 64 * 1024 * 1024;

/// Process-wide PDFium instance. The library is initialized once.
static PDFIUM: OnceLock<Pdfium> = OnceLock::new();

/// A capability that can open source documents.
pub trait DocumentRenderer: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Parse raw document bytes.
    fn load(&self, data: &[u8]) -> Result<Box<dyn LoadedDocument>>;
}

/// An opened document. Page numbers are 1-based.
pub trait LoadedDocument: Send + Sync {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Rasterize a page at `scale` pixels per point.
    fn render_page(&self, page: u32, scale: f64) -> Result<RgbaImage>;

    /// Plain text of a page, fragments joined by single spaces.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Bitmap size of a `width` x `height` point page rendered at `scale`.
///
/// Fails with [`Error::DocumentParse`] when the page is empty or the bitmap
/// would exceed [`MAX_RENDER_DIMENSION`] or [`MAX_RENDER_PIXELS`].
pub fn render_size(width: f64, height: f64, scale: f64) -> Result<(u32, u32)> {
    let w = (width * scale).round();
    let h = (height * scale).round();

    if !w.is_finite() || !h.is_finite() || w < 1.0 || h < 1.0 {
        return Err(Error::DocumentParse(format!(
            "invalid page size {}x{} pt",
            width, height
        )));
    }

    let max_side = MAX_RENDER_DIMENSION as f64;
    if w > max_side || h > max_side || w * h > MAX_RENDER_PIXELS as f64 {
        return Err(Error::DocumentParse(format!(
            "page of {}x{} pt is too large to render at {}x",
            width, height, scale
        )));
    }

    Ok((w as u32, h as u32))
}

/// Collapse extracted text into single-space separated fragments.
fn join_fragments(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renderer backed by PDFium.
///
/// The PDFium shared library is located on first use: the configured
/// directory, then [`PDFIUM_DIR_ENV`], then the working directory, then the
/// system library path. Whichever binds first serves the whole process.
#[derive(Debug, Default, Clone)]
pub struct PdfiumRenderer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRenderer {
    /// Create a renderer that searches the default locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for the PDFium library in `dir` before the default locations.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    /// Whether the PDFium library can be bound.
    pub fn is_available(&self) -> bool {
        self.pdfium().is_ok()
    }

    fn search_dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self
            .library_dir
            .iter()
            .map(|d| d.to_string_lossy().into_owned())
            .collect();
        if let Ok(dir) = std::env::var(PDFIUM_DIR_ENV) {
            dirs.push(dir);
        }
        dirs.push("./".to_string());
        dirs
    }

    fn pdfium(&self) -> Result<&'static Pdfium> {
        if let Some(pdfium) = PDFIUM.get() {
            return Ok(pdfium);
        }

        for dir in self.search_dirs() {
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir.as_str()))
            {
                Ok(bindings) => {
                    log::debug!("Bound PDFium from {}", dir);
                    return Ok(PDFIUM.get_or_init(|| Pdfium::new(bindings)));
                }
                Err(e) => log::trace!("PDFium not found in {}: {:?}", dir, e),
            }
        }

        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| Error::DependencyLoad(format!("PDFium library ({:?})", e)))?;
        log::debug!("Bound system PDFium library");
        Ok(PDFIUM.get_or_init(|| Pdfium::new(bindings)))
    }
}

impl DocumentRenderer for PdfiumRenderer {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn load(&self, data: &[u8]) -> Result<Box<dyn LoadedDocument>> {
        let pdfium = self.pdfium()?;
        let doc = pdfium
            .load_pdf_from_byte_vec(data.to_vec(), None)
            .map_err(load_error)?;
        let page_count = doc.pages().len() as u32;
        log::debug!("Loaded PDF with {} pages", page_count);
        Ok(Box::new(PdfiumPages { doc, page_count }))
    }
}

fn load_error(err: PdfiumError) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            Error::Encrypted
        }
        other => Error::DocumentParse(format!("{:?}", other)),
    }
}

/// A document opened by [`PdfiumRenderer`].
struct PdfiumPages {
    doc: PdfDocument<'static>,
    page_count: u32,
}

impl PdfiumPages {
    fn index(&self, page: u32) -> Result<u16> {
        if page == 0 || page > self.page_count {
            return Err(Error::PageOutOfRange(page, self.page_count));
        }
        u16::try_from(page - 1).map_err(|_| Error::PageOutOfRange(page, self.page_count))
    }
}

impl LoadedDocument for PdfiumPages {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn render_page(&self, page: u32, scale: f64) -> Result<RgbaImage> {
        let pdf_page = self
            .doc
            .pages()
            .get(self.index(page)?)
            .map_err(|e| Error::DocumentParse(format!("page {}: {:?}", page, e)))?;

        let (width, height) = render_size(
            pdf_page.width().value as f64,
            pdf_page.height().value as f64,
            scale,
        )?;
        log::trace!("Rendering page {} at {}x{} px", page, width, height);

        let config = PdfRenderConfig::new().scale_page_by_factor(scale as f32);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| Error::DocumentParse(format!("page {} render failed: {:?}", page, e)))?;

        let (w, h) = (bitmap.width() as u32, bitmap.height() as u32);
        RgbaImage::from_raw(w, h, bitmap.as_rgba_bytes())
            .ok_or_else(|| Error::Image(format!("short bitmap buffer for {}x{}", w, h)))
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let pdf_page = self
            .doc
            .pages()
            .get(self.index(page)?)
            .map_err(|e| Error::TextExtract(format!("page {}: {:?}", page, e)))?;
        let text = pdf_page
            .text()
            .map_err(|e| Error::TextExtract(format!("page {}: {:?}", page, e)))?;
        Ok(join_fragments(&text.all()))
    }
}
