//! Slide canvas and fractional geometry.

use crate::model::{Frame, RasterPage};

/// Source bitmap pixels per slide inch.
pub const PX_PER_INCH: f64 = 96.0;

/// Slide size in inches. Every frame is derived from fractions of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// Create a canvas of `width × height` inches.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas matching a bitmap at 96 px per inch.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64 / PX_PER_INCH, height as f64 / PX_PER_INCH)
    }

    /// Canvas matching a rendered page.
    pub fn for_page(page: &RasterPage) -> Self {
        Self::from_pixels(page.width, page.height)
    }

    /// Fraction of the width, in inches.
    pub fn x(&self, fraction: f64) -> f64 {
        self.width * fraction
    }

    /// Fraction of the height, in inches.
    pub fn y(&self, fraction: f64) -> f64 {
        self.height * fraction
    }

    /// Frame from fractions of width (x, w) and height (y, h).
    pub fn frame(&self, x: f64, y: f64, w: f64, h: f64) -> Frame {
        Frame::new(self.x(x), self.y(y), self.x(w), self.y(h))
    }

    /// The whole slide.
    pub fn full(&self) -> Frame {
        Frame::new(0.0, 0.0, self.width, self.height)
    }
}
