//! Rasterization options.

use super::sampler::ColorSampler;

/// Default upscaling factor relative to PDF points.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Options for rendering source pages.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixels per PDF point
    pub scale: f64,

    /// Dominant color sampler
    pub sampler: ColorSampler,

    /// Whether to render the two pages in parallel
    pub parallel: bool,
}

impl RasterOptions {
    /// Create new raster options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upscaling factor. Non-positive values fall back to the default.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale > 0.0 && scale.is_finite() {
            scale
        } else {
            DEFAULT_SCALE
        };
        self
    }

    /// Set the color sampler.
    pub fn with_sampler(mut self, sampler: ColorSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Render pages one after the other.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            sampler: ColorSampler::default(),
            parallel: true,
        }
    }
}
