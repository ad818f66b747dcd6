//! Source document rasterization.
//!
//! Turns the first and last page of an offering document into PNG bitmaps
//! with a sampled accent color, and extracts the plain text of page 1.

mod backend;
mod options;
mod rasterizer;
mod sampler;

pub use backend::{
    render_size, DocumentRenderer, LoadedDocument, PdfiumRenderer, MAX_RENDER_DIMENSION,
    MAX_RENDER_PIXELS, PDFIUM_DIR_ENV,
};
pub use options::{RasterOptions, DEFAULT_SCALE};
pub use rasterizer::{encode_png, PageRasterizer, RasterizedDocument};
pub use sampler::{dominant_color, ColorSampler, DEFAULT_STRIDE, WHITE_THRESHOLD};
