//! In-memory PDF fixtures built with lopdf, and a solid-color renderer for
//! tests that only need page geometry.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{ImageFormat, Rgba, RgbImage, RgbaImage};
use leasedeck::{DocumentRenderer, Error, LoadedDocument, PdfiumRenderer, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

pub const ADDRESS: &str = "123 Main St, Springfield, IL 62704";

/// Cubic Bezier control offset for a quarter circle.
const KAPPA: f64 = 0.552_284_8;

/// The PDFium renderer, or `None` when the library is not installed.
pub fn pdfium() -> Option<PdfiumRenderer> {
    let renderer = PdfiumRenderer::new();
    if renderer.is_available() {
        Some(renderer)
    } else {
        eprintln!("PDFium library not found, skipping");
        None
    }
}

/// One page of a fixture document.
#[derive(Debug, Clone, Default)]
pub struct TestPage {
    /// Full-page `re f` fill as 0/1 RGB components
    fill: Option<[i64; 3]>,
    /// Full-page fill drawn as an `m l l l h f` polygon
    polygon: Option<[i64; 3]>,
    /// Ellipse inscribed in the page, drawn with `c` curves
    ellipse: Option<[i64; 3]>,
    /// Full-page fill inside a Form XObject painted with `Do`
    form: Option<[i64; 3]>,
    /// Large colored heading text
    heading: Option<(String, [i64; 3])>,
    /// Text lines, one `Tj` each
    lines: Vec<String>,
    /// Solid 2x2 RGB image placed in the lower-left quarter
    image: Option<[u8; 3]>,
    /// Full-page JPEG image stored with `[/FlateDecode /DCTDecode]`
    jpeg: Option<[u8; 3]>,
}

impl TestPage {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn filled(rgb: [i64; 3]) -> Self {
        Self {
            fill: Some(rgb),
            ..Self::default()
        }
    }

    pub fn polygon(rgb: [i64; 3]) -> Self {
        Self {
            polygon: Some(rgb),
            ..Self::default()
        }
    }

    pub fn ellipse(rgb: [i64; 3]) -> Self {
        Self {
            ellipse: Some(rgb),
            ..Self::default()
        }
    }

    pub fn form(rgb: [i64; 3]) -> Self {
        Self {
            form: Some(rgb),
            ..Self::default()
        }
    }

    pub fn heading(text: &str, rgb: [i64; 3]) -> Self {
        Self {
            heading: Some((text.to_string(), rgb)),
            ..Self::default()
        }
    }

    pub fn jpeg(rgb: [u8; 3]) -> Self {
        Self {
            jpeg: Some(rgb),
            ..Self::default()
        }
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_image(mut self, rgb: [u8; 3]) -> Self {
        self.image = Some(rgb);
        self
    }
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

fn color(rgb: [i64; 3]) -> Operation {
    op("rg", rgb.iter().map(|&c| c.into()).collect())
}

fn page_rect(width: i64, height: i64) -> Operation {
    op("re", vec![0.into(), 0.into(), width.into(), height.into()])
}

fn ellipse_path(width: i64, height: i64) -> Vec<Operation> {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let (rx, ry) = (cx, cy);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let curve = |pts: [f64; 6]| op("c", pts.iter().map(|&v| real(v)).collect());
    vec![
        op("m", vec![real(cx + rx), real(cy)]),
        curve([cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry]),
        curve([cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy]),
        curve([cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry]),
        curve([cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy]),
        op("h", vec![]),
        op("f", vec![]),
    ]
}

/// Zlib-compressed JPEG of a solid 16x16 image.
fn flate_jpeg(rgb: [u8; 3]) -> Vec<u8> {
    let mut jpeg = Cursor::new(Vec::new());
    RgbImage::from_pixel(16, 16, image::Rgb(rgb))
        .write_to(&mut jpeg, ImageFormat::Jpeg)
        .unwrap();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(jpeg.get_ref()).unwrap();
    encoder.finish().unwrap()
}

/// `q (w 0 0 h x y) cm /name Do Q`
fn draw_xobject(name: &str, w: i64, h: i64) -> Vec<Operation> {
    vec![
        op("q", vec![]),
        op(
            "cm",
            vec![w.into(), 0.into(), 0.into(), h.into(), 0.into(), 0.into()],
        ),
        op("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        op("Q", vec![]),
    ]
}

/// Build a PDF with every page sized `width` x `height` points.
pub fn build_pdf(pages: &[TestPage], width: i64, height: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica"
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut operations = Vec::new();
        let mut xobjects = lopdf::Dictionary::new();

        if let Some(rgb) = page.fill {
            operations.extend([color(rgb), page_rect(width, height), op("f", vec![])]);
        }

        if let Some(rgb) = page.polygon {
            operations.extend([
                color(rgb),
                op("m", vec![0.into(), 0.into()]),
                op("l", vec![width.into(), 0.into()]),
                op("l", vec![width.into(), height.into()]),
                op("l", vec![0.into(), height.into()]),
                op("h", vec![]),
                op("f", vec![]),
            ]);
        }

        if let Some(rgb) = page.ellipse {
            operations.push(color(rgb));
            operations.extend(ellipse_path(width, height));
        }

        if let Some(rgb) = page.form {
            let body = Content {
                operations: vec![color(rgb), page_rect(width, height), op("f", vec![])],
            };
            let form_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![0.into(), 0.into(), width.into(), height.into()]
                },
                body.encode().unwrap(),
            ));
            xobjects.set("Fm1", form_id);
            operations.push(op("Do", vec![Object::Name(b"Fm1".to_vec())]));
        }

        if let Some(rgb) = page.image {
            let pixels: Vec<u8> = rgb.iter().copied().cycle().take(2 * 2 * 3).collect();
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 2,
                    "Height" => 2,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8
                },
                pixels,
            ));
            xobjects.set("Im1", image_id);
            operations.extend(draw_xobject("Im1", width / 2, height / 2));
        }

        if let Some(rgb) = page.jpeg {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 16,
                    "Height" => 16,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => vec![
                        Object::Name(b"FlateDecode".to_vec()),
                        Object::Name(b"DCTDecode".to_vec())
                    ]
                },
                flate_jpeg(rgb),
            ));
            xobjects.set("Im2", image_id);
            operations.extend(draw_xobject("Im2", width, height));
        }

        if let Some((text, rgb)) = &page.heading {
            operations.extend([
                color(*rgb),
                op("BT", vec![]),
                op("Tf", vec!["F1".into(), 72.into()]),
                op("Td", vec![10.into(), (height / 2).into()]),
                op("Tj", vec![Object::string_literal(text.as_str())]),
                op("ET", vec![]),
            ]);
        }

        if !page.lines.is_empty() {
            operations.push(op("BT", vec![]));
            operations.push(op("Tf", vec!["F1".into(), 12.into()]));
            operations.push(op("Td", vec![20.into(), (height - 30).into()]));
            for line in &page.lines {
                operations.push(op("Tj", vec![Object::string_literal(line.as_str())]));
                operations.push(op("Td", vec![0.into(), (-14).into()]));
            }
            operations.push(op("ET", vec![]));
        }

        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id }
        };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()]
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// The offering text used by the extraction fixtures.
pub fn offering_lines() -> Vec<&'static str> {
    vec![
        "SUNSET PLAZA OFFERING MEMORANDUM",
        "4500 Sunset Blvd, Springfield, IL 62704",
        "Building Size: 125,000 SF",
        "Available: 2,400 SF",
        "Asking Rent: $28.50/SF NNN",
    ]
}

/// Renders every page as one solid color, ignoring the input bytes.
///
/// Page `n` uses `colors[n - 1]`, or the last color when there are fewer
/// colors than pages.
#[derive(Debug, Clone)]
pub struct SolidRenderer {
    pub pages: u32,
    pub width: f64,
    pub height: f64,
    pub colors: Vec<[u8; 3]>,
    pub text: String,
}

impl SolidRenderer {
    pub fn new(pages: u32, width: f64, height: f64) -> Self {
        Self {
            pages,
            width,
            height,
            colors: vec![[255, 255, 255]],
            text: String::new(),
        }
    }

    pub fn with_colors(mut self, colors: &[[u8; 3]]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

impl DocumentRenderer for SolidRenderer {
    fn name(&self) -> &str {
        "solid"
    }

    fn load(&self, _data: &[u8]) -> Result<Box<dyn LoadedDocument>> {
        Ok(Box::new(self.clone()))
    }
}

impl LoadedDocument for SolidRenderer {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn render_page(&self, page: u32, scale: f64) -> Result<RgbaImage> {
        if page == 0 || page > self.pages {
            return Err(Error::PageOutOfRange(page, self.pages));
        }
        let (w, h) = leasedeck::raster::render_size(self.width, self.height, scale)?;
        let index = (page as usize - 1).min(self.colors.len() - 1);
        let [r, g, b] = self.colors[index];
        Ok(RgbaImage::from_pixel(w, h, Rgba([r, g, b, 255])))
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if page == 1 {
            Ok(self.text.clone())
        } else {
            Ok(String::new())
        }
    }
}
