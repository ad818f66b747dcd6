//! First/last page rasterization.

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

use super::backend::{DocumentRenderer, LoadedDocument};
use super::options::RasterOptions;
use crate::error::{Error, Result};
use crate::model::RasterPage;

/// Output of [`PageRasterizer::rasterize`].
#[derive(Debug, Clone)]
pub struct RasterizedDocument {
    /// Page 1
    pub first_page: RasterPage,

    /// Final page (page 1 again for single-page documents)
    pub last_page: RasterPage,

    /// Plain text of page 1, empty when extraction failed
    pub text: String,

    /// Total pages in the source document
    pub page_count: u32,
}

/// Renders the cover and back pages of a source document.
pub struct PageRasterizer {
    renderer: Arc<dyn DocumentRenderer>,
    options: RasterOptions,
}

impl PageRasterizer {
    /// Create a rasterizer over the given renderer with default options.
    pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            renderer,
            options: RasterOptions::default(),
        }
    }

    /// Set raster options.
    pub fn with_options(mut self, options: RasterOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Render page 1 and the last page and extract the text of page 1.
    pub fn rasterize(&self, data: &[u8]) -> Result<RasterizedDocument> {
        let doc = self.renderer.load(data)?;
        let page_count = doc.page_count();
        if page_count == 0 {
            return Err(Error::DocumentParse("document has no pages".to_string()));
        }
        log::debug!(
            "Rasterizing pages 1 and {} with {} at {}x",
            page_count,
            self.renderer.name(),
            self.options.scale
        );

        let doc = doc.as_ref();
        let (first, last) = if self.options.parallel {
            rayon::join(
                || self.render_page(doc, 1),
                || self.render_page(doc, page_count),
            )
        } else {
            (self.render_page(doc, 1), self.render_page(doc, page_count))
        };

        let text = match doc.page_text(1) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Text extraction failed, continuing without text: {}", e);
                String::new()
            }
        };

        Ok(RasterizedDocument {
            first_page: first?,
            last_page: last?,
            text,
            page_count,
        })
    }

    fn render_page(&self, doc: &dyn LoadedDocument, page: u32) -> Result<RasterPage> {
        let bitmap = doc.render_page(page, self.options.scale)?;
        let dominant_color = self.options.sampler.dominant_color(&bitmap);
        let (width, height) = bitmap.dimensions();
        let png = encode_png(&bitmap)?;

        Ok(RasterPage {
            page_number: page,
            image_data: png.into(),
            width,
            height,
            dominant_color,
        })
    }
}

/// Encode an RGBA bitmap as PNG.
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    bitmap.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgb;
    use image::Rgba;

    /// Renders every page as a solid color keyed by page number.
    struct SolidRenderer {
        pages: u32,
        text: Option<&'static str>,
    }

    struct SolidDocument {
        pages: u32,
        text: Option<&'static str>,
    }

    impl DocumentRenderer for SolidRenderer {
        fn name(&self) -> &str {
            "solid"
        }

        fn load(&self, _data: &[u8]) -> Result<Box<dyn LoadedDocument>> {
            Ok(Box::new(SolidDocument {
                pages: self.pages,
                text: self.text,
            }))
        }
    }

    impl LoadedDocument for SolidDocument {
        fn page_count(&self) -> u32 {
            self.pages
        }

        fn render_page(&self, page: u32, scale: f64) -> Result<RgbaImage> {
            let side = (10.0 * scale) as u32;
            let color = if page == 1 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([0, 0, 200, 255])
            };
            Ok(RgbaImage::from_pixel(side, side, color))
        }

        fn page_text(&self, _page: u32) -> Result<String> {
            self.text
                .map(str::to_string)
                .ok_or_else(|| Error::TextExtract("no text layer".to_string()))
        }
    }

    fn rasterizer(pages: u32, text: Option<&'static str>) -> PageRasterizer {
        PageRasterizer::new(Arc::new(SolidRenderer { pages, text }))
    }

    #[test]
    fn test_renders_first_and_last_page() {
        let doc = rasterizer(3, Some("Sunset Plaza")).rasterize(b"%PDF-1.4").unwrap();
        assert_eq!(doc.first_page.page_number, 1);
        assert_eq!(doc.last_page.page_number, 3);
        assert_eq!(doc.first_page.dominant_color, Rgb::new(200, 0, 0));
        assert_eq!(doc.last_page.dominant_color, Rgb::new(0, 0, 200));
        assert_eq!((doc.first_page.width, doc.first_page.height), (20, 20));
        assert!(doc.first_page.image_data.starts_with(b"\x89PNG"));
        assert_eq!(doc.text, "Sunset Plaza");
    }

    #[test]
    fn test_single_page_renders_twice() {
        let doc = rasterizer(1, Some("")).rasterize(b"%PDF-1.4").unwrap();
        assert_eq!(doc.first_page.page_number, 1);
        assert_eq!(doc.last_page.page_number, 1);
        assert_eq!(doc.first_page.dominant_color, doc.last_page.dominant_color);
    }

    #[test]
    fn test_text_failure_is_recovered() {
        let doc = rasterizer(2, None).rasterize(b"%PDF-1.4").unwrap();
        assert_eq!(doc.text, "");
    }

    #[test]
    fn test_zero_pages_is_parse_error() {
        let err = rasterizer(0, None).rasterize(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, Error::DocumentParse(_)));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let parallel = rasterizer(2, Some("x")).rasterize(b"").unwrap();
        let sequential = rasterizer(2, Some("x"))
            .with_options(RasterOptions::new().sequential())
            .rasterize(b"")
            .unwrap();
        assert_eq!(parallel.first_page.image_data, sequential.first_page.image_data);
        assert_eq!(parallel.last_page.dominant_color, sequential.last_page.dominant_color);
    }
}
