//! Slide deck types.
//!
//! Positions and sizes are in inches. Layout code derives every frame from
//! fractions of the slide size, so the numbers here are already scaled.

use super::Rgb;
use std::sync::Arc;

/// Default typeface for all deck text.
pub const DEFAULT_FONT_FACE: &str = "Calibri";

/// A positioned rectangle in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    /// Create a new frame.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Character and paragraph formatting for a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub color: Rgb,
    pub font_face: &'static str,
    pub align: HAlign,
    pub valign: VAlign,
    /// Space after each paragraph in points
    pub para_space_after: Option<f64>,
}

impl TextStyle {
    /// Regular text at the given size and color.
    pub fn new(font_size: f64, color: Rgb) -> Self {
        Self {
            font_size,
            bold: false,
            color,
            font_face: DEFAULT_FONT_FACE,
            align: HAlign::Left,
            valign: VAlign::Middle,
            para_space_after: None,
        }
    }

    /// Set bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set horizontal alignment.
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Set vertical anchoring.
    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Set paragraph spacing in points.
    pub fn para_space_after(mut self, points: f64) -> Self {
        self.para_space_after = Some(points);
        self
    }
}

/// Outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    /// Width in points
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgb, width: f64) -> Self {
        Self { color, width }
    }
}

/// A filled and/or outlined rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub frame: Frame,
    pub fill: Option<Rgb>,
    pub line: Option<Stroke>,
}

/// A text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub text: String,
    pub style: TextStyle,
}

/// A raster image stretched over its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Frame,
    /// Encoded image bytes, shared with the source page
    pub data: Arc<[u8]>,
    pub mime_type: &'static str,
    pub description: String,
}

/// A positioned visual element on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    Text(TextBox),
    Picture(Picture),
}

impl Element {
    /// Frame of the element.
    pub fn frame(&self) -> &Frame {
        match self {
            Element::Shape(s) => &s.frame,
            Element::Text(t) => &t.frame,
            Element::Picture(p) => &p.frame,
        }
    }
}

/// One slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    /// Solid background color (white when unset)
    pub background: Option<Rgb>,
    pub elements: Vec<Element>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slide with a solid background.
    pub fn with_background(color: Rgb) -> Self {
        Self {
            background: Some(color),
            elements: Vec::new(),
        }
    }

    /// Add a rectangle.
    pub fn add_shape(&mut self, frame: Frame, fill: Option<Rgb>, line: Option<Stroke>) {
        self.elements
            .push(Element::Shape(Shape { frame, fill, line }));
    }

    /// Add a text box.
    pub fn add_text(&mut self, text: impl Into<String>, frame: Frame, style: TextStyle) {
        self.elements.push(Element::Text(TextBox {
            frame,
            text: text.into(),
            style,
        }));
    }

    /// Add a picture.
    pub fn add_picture(&mut self, picture: Picture) {
        self.elements.push(Element::Picture(picture));
    }

    /// Text boxes in insertion order.
    pub fn text_boxes(&self) -> impl Iterator<Item = &TextBox> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Pictures in insertion order.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.elements.iter().filter_map(|e| match e {
            Element::Picture(p) => Some(p),
            _ => None,
        })
    }

    /// Check whether any text box holds exactly `text`.
    pub fn has_text(&self, text: &str) -> bool {
        self.text_boxes().any(|t| t.text == text)
    }

    /// Get the number of elements on the slide.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// An ordered, append-only slide deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Slide width in inches
    pub width: f64,
    /// Slide height in inches
    pub height: f64,
    /// Theme accent, written into the package theme
    pub accent: Option<Rgb>,
    slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck with the given slide size in inches.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            accent: None,
            slides: Vec::new(),
        }
    }

    /// Set the theme accent.
    pub fn with_accent(mut self, accent: Rgb) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Append a slide.
    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Append several slides in order.
    pub fn extend_slides(&mut self, slides: impl IntoIterator<Item = Slide>) {
        self.slides.extend(slides);
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Check if the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
