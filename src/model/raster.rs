//! Rendered document pages.

use super::Rgb;
use serde::Serialize;
use std::sync::Arc;

/// A rendered bitmap of one document page plus its dominant color.
#[derive(Debug, Clone, Serialize)]
pub struct RasterPage {
    /// 1-indexed page number in the source document
    pub page_number: u32,

    /// PNG-encoded bitmap
    #[serde(skip_serializing)]
    pub image_data: Arc<[u8]>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Most frequent non-white color bucket
    pub dominant_color: Rgb,
}

impl RasterPage {
    /// MIME type of [`RasterPage::image_data`].
    pub const MIME_TYPE: &'static str = "image/png";

    /// Get the size of the encoded bitmap in bytes.
    pub fn size(&self) -> usize {
        self.image_data.len()
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
