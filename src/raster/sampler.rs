//! Dominant color sampling.

use std::collections::HashMap;

use image::RgbaImage;

use crate::model::{Rgb, FALLBACK_ACCENT};

/// Default pixel stride (one pixel in ten is inspected).
pub const DEFAULT_STRIDE: usize = 10;

/// Channel value above which a pixel counts as near-white.
pub const WHITE_THRESHOLD: u8 = 240;

/// Quantization step for color buckets.
const BUCKET_STEP: f64 = 10.0;

/// Picks the most frequent non-white color bucket of an image.
#[derive(Debug, Clone)]
pub struct ColorSampler {
    stride: usize,
    white_threshold: u8,
    fallback: Rgb,
}

impl ColorSampler {
    /// Create a sampler with the default stride and fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel stride (values below 1 are treated as 1).
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Set the color returned when no pixel qualifies.
    pub fn with_fallback(mut self, fallback: Rgb) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sample an RGBA image.
    pub fn dominant_color(&self, image: &RgbaImage) -> Rgb {
        self.dominant_color_rgba(image.as_raw())
    }

    /// Sample a raw RGBA8 buffer in raster order.
    ///
    /// Ties resolve to the bucket that reached the maximum first.
    pub fn dominant_color_rgba(&self, pixels: &[u8]) -> Rgb {
        let mut index: HashMap<(u16, u16, u16), usize> = HashMap::new();
        let mut buckets: Vec<((u16, u16, u16), u32)> = Vec::new();

        for px in pixels.chunks_exact(4).step_by(self.stride) {
            let (r, g, b) = (px[0], px[1], px[2]);
            if r > self.white_threshold && g > self.white_threshold && b > self.white_threshold {
                continue;
            }

            let key = (quantize(r), quantize(g), quantize(b));
            match index.get(&key) {
                Some(&slot) => buckets[slot].1 += 1,
                None => {
                    index.insert(key, buckets.len());
                    buckets.push((key, 1));
                }
            }
        }

        let mut max_count = 0;
        let mut dominant = self.fallback;
        for ((r, g, b), count) in buckets {
            if count > max_count {
                max_count = count;
                dominant = Rgb::new(clamp_channel(r), clamp_channel(g), clamp_channel(b));
            }
        }
        dominant
    }
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            white_threshold: WHITE_THRESHOLD,
            fallback: FALLBACK_ACCENT,
        }
    }
}

/// Round to the nearest multiple of ten, halves up (255 becomes 260).
fn quantize(channel: u8) -> u16 {
    ((channel as f64 / BUCKET_STEP).round() * BUCKET_STEP) as u16
}

fn clamp_channel(value: u16) -> u8 {
    value.min(255) as u8
}

/// Sample with the default settings.
pub fn dominant_color(image: &RgbaImage) -> Rgb {
    ColorSampler::default().dominant_color(image)
}
