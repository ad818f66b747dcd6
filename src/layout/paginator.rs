//! Contact table pagination.
//!
//! A contact list is split into consecutive slices of at most
//! `max_rows_per_slide` records, one slide each, with no record omitted or
//! repeated. One row's worth of space is always held back below the header.

use serde::{Deserialize, Serialize};

use super::geometry::Canvas;
use super::palette::{
    CARD_BORDER, CARD_FILL, HEADER_BORDER, ROW_ALT_FILL, SLIDE_BACKGROUND, TEXT_MUTED,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::error::{Error, Result};
use crate::model::{ContactRecord, Frame, HAlign, Rgb, Slide, Stroke, TextStyle, Theme};

/// Column header labels.
pub const COLUMN_HEADERS: [&str; 5] = ["Company", "Contact Name", "Date", "Method", "Status"];

/// Column widths as fractions of the table width.
pub const COLUMN_FRACTIONS: [f64; 5] = [0.35, 0.25, 0.15, 0.12, 0.13];

/// Cell font sizes per column, in points.
const CELL_FONT_SIZES: [f64; 5] = [12.0, 12.0, 12.0, 12.0, 11.0];

/// Header row height relative to a data row.
const HEADER_ROW_FACTOR: f64 = 1.15;

/// Absorbs float noise before flooring (0.76 / 0.038 is 20, not 19.999...).
const ROW_EPSILON: f64 = 1e-9;

/// Vertical table geometry as fractions of slide height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Top of the header row
    pub table_start: f64,
    /// Data row height
    pub row_height: f64,
    /// Space kept free at the bottom for the footer
    pub footer_reserve: f64,
}

impl TableGeometry {
    /// Rows that fit on one slide, less one reserved row.
    ///
    /// Fails with [`Error::LayoutOverflow`] when no row fits.
    pub fn max_rows_per_slide(&self) -> Result<usize> {
        if !(self.row_height > 0.0 && self.row_height.is_finite()) {
            return Err(Error::LayoutOverflow(format!(
                "row height {} is not positive",
                self.row_height
            )));
        }
        let available = 1.0 - self.table_start - self.footer_reserve;
        let rows = (available / self.row_height + ROW_EPSILON).floor() as i64 - 1;
        if rows <= 0 {
            return Err(Error::LayoutOverflow(format!(
                "no room for table rows (available {:.3}, row {:.3})",
                available, self.row_height
            )));
        }
        Ok(rows as usize)
    }
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            table_start: 0.16,
            row_height: 0.038,
            footer_reserve: 0.08,
        }
    }
}

/// One slide's slice `[start, end)` of a contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// 0-based slide index within the section
    pub index: usize,
    /// Slides in the section
    pub total: usize,
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Title with a `(k/n)` suffix when the section spans several slides.
    pub fn title(&self, title: &str) -> String {
        if self.total > 1 {
            format!("{} ({}/{})", title, self.index + 1, self.total)
        } else {
            title.to_string()
        }
    }

    /// Footer line for a list of `len` records.
    pub fn footer(&self, len: usize) -> String {
        if self.total > 1 {
            format!("Showing {}-{} of {} contacts", self.start + 1, self.end, len)
        } else {
            format!("Total Contacts: {}", len)
        }
    }

    /// Number of records on this slide.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `len` records into slices of at most `per_slide`.
///
/// An empty list yields no slides.
pub fn paginate(len: usize, per_slide: usize) -> Vec<PageRange> {
    if len == 0 || per_slide == 0 {
        return Vec::new();
    }
    let total = len.div_ceil(per_slide);
    (0..total)
        .map(|index| {
            let start = index * per_slide;
            PageRange {
                index,
                total,
                start,
                end: (start + per_slide).min(len),
            }
        })
        .collect()
}

/// Builds themed table slides from a contact list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactTablePaginator {
    geometry: TableGeometry,
}

impl ContactTablePaginator {
    /// Create a paginator with the given geometry.
    pub fn new(geometry: TableGeometry) -> Self {
        Self { geometry }
    }

    /// Table geometry in use.
    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }

    /// Slice ranges for a list of `len` records.
    pub fn ranges(&self, len: usize) -> Result<Vec<PageRange>> {
        Ok(paginate(len, self.geometry.max_rows_per_slide()?))
    }

    /// Render every slide of one contact section.
    pub fn slides(
        &self,
        title: &str,
        subtitle: &str,
        contacts: &[ContactRecord],
        theme: &Theme,
        canvas: &Canvas,
    ) -> Result<Vec<Slide>> {
        let ranges = self.ranges(contacts.len())?;
        log::debug!(
            "Paginating {:?}: {} contacts over {} slides",
            title,
            contacts.len(),
            ranges.len()
        );
        Ok(ranges
            .iter()
            .map(|range| self.slide(range, title, subtitle, contacts, theme, canvas))
            .collect())
    }

    fn slide(
        &self,
        range: &PageRange,
        title: &str,
        subtitle: &str,
        contacts: &[ContactRecord],
        theme: &Theme,
        canvas: &Canvas,
    ) -> Slide {
        let mut slide = Slide::with_background(SLIDE_BACKGROUND);

        slide.add_shape(canvas.frame(0.0, 0.0, 1.0, 0.11), Some(theme.accent), None);
        slide.add_text(
            range.title(title),
            canvas.frame(0.03, 0.023, 0.94, 0.045),
            TextStyle::new(32.0, Rgb::WHITE).bold(),
        );
        slide.add_text(
            subtitle,
            canvas.frame(0.03, 0.07, 0.94, 0.03),
            TextStyle::new(14.0, Rgb::WHITE),
        );

        let table_x = canvas.x(0.03);
        let table_w = canvas.x(0.94);
        let table_y = canvas.y(self.geometry.table_start);
        let row_h = canvas.y(self.geometry.row_height);
        let header_h = row_h * HEADER_ROW_FACTOR;

        slide.add_shape(
            Frame::new(table_x, table_y, table_w, header_h),
            Some(CARD_FILL),
            Some(Stroke::new(HEADER_BORDER, 0.5)),
        );
        let mut x = table_x;
        for (i, header) in COLUMN_HEADERS.iter().enumerate() {
            let inset = if i == 0 { table_w * 0.015 } else { 0.0 };
            slide.add_text(
                *header,
                Frame::new(x + inset, table_y, table_w * COLUMN_FRACTIONS[i], header_h),
                TextStyle::new(13.0, TEXT_PRIMARY).bold(),
            );
            x += table_w * COLUMN_FRACTIONS[i];
        }

        for (idx, contact) in contacts[range.start..range.end].iter().enumerate() {
            let y = table_y + header_h + idx as f64 * row_h;
            let fill = if idx % 2 == 0 { CARD_FILL } else { ROW_ALT_FILL };
            slide.add_shape(
                Frame::new(table_x, y, table_w, row_h),
                Some(fill),
                Some(Stroke::new(CARD_BORDER, 0.3)),
            );

            let mut x = table_x;
            for (i, value) in contact.cells().iter().enumerate() {
                let col_w = table_w * COLUMN_FRACTIONS[i];
                let (inset, trim, color) = if i == 0 {
                    (table_w * 0.015, table_w * 0.02, TEXT_PRIMARY)
                } else {
                    (0.0, table_w * 0.01, TEXT_SECONDARY)
                };
                slide.add_text(
                    *value,
                    Frame::new(x + inset, y, col_w - trim, row_h),
                    TextStyle::new(CELL_FONT_SIZES[i], color),
                );
                x += col_w;
            }
        }

        slide.add_text(
            range.footer(contacts.len()),
            Frame::new(table_x, canvas.y(0.95), table_w, canvas.y(0.03)),
            TextStyle::new(11.0, TEXT_MUTED).bold().align(HAlign::Right),
        );

        slide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts(n: usize) -> Vec<ContactRecord> {
        (0..n)
            .map(|i| ContactRecord::new(format!("Company {}", i), "Pat", "1/1/25", "Call", "Hot Lead"))
            .collect()
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(TableGeometry::default().max_rows_per_slide().unwrap(), 19);
    }

    #[test]
    fn test_overflow() {
        let geometry = TableGeometry {
            table_start: 0.5,
            row_height: 0.3,
            footer_reserve: 0.1,
        };
        assert!(matches!(
            geometry.max_rows_per_slide(),
            Err(Error::LayoutOverflow(_))
        ));

        let geometry = TableGeometry {
            row_height: 0.0,
            ..TableGeometry::default()
        };
        assert!(matches!(
            geometry.max_rows_per_slide(),
            Err(Error::LayoutOverflow(_))
        ));
    }

    #[test]
    fn test_paginate_45_by_20() {
        let ranges = paginate(45, 20);
        let bounds: Vec<(usize, usize)> = ranges.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(bounds, [(0, 20), (20, 40), (40, 45)]);
        assert!(ranges.iter().all(|r| r.total == 3));
    }

    #[test]
    fn test_paginate_covers_list_exactly() {
        for len in 0..100 {
            for per in 1..25 {
                let ranges = paginate(len, per);
                assert_eq!(ranges.len(), len.div_ceil(per));
                let rebuilt: Vec<usize> = ranges.iter().flat_map(|r| r.start..r.end).collect();
                assert_eq!(rebuilt, (0..len).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_title_and_footer() {
        let multi = PageRange {
            index: 1,
            total: 3,
            start: 19,
            end: 38,
        };
        assert_eq!(multi.title("OUTBOUND ACTIVITY"), "OUTBOUND ACTIVITY (2/3)");
        assert_eq!(multi.footer(45), "Showing 20-38 of 45 contacts");

        let single = paginate(7, 19)[0];
        assert_eq!(single.title("INBOUND ACTIVITY"), "INBOUND ACTIVITY");
        assert_eq!(single.footer(7), "Total Contacts: 7");
    }

    #[test]
    fn test_slides_render_rows_in_order() {
        let canvas = Canvas::new(12.75, 16.5);
        let list = contacts(45);
        let slides = ContactTablePaginator::default()
            .slides("OUTBOUND ACTIVITY", "Tenants We Contacted", &list, &Theme::default(), &canvas)
            .unwrap();

        assert_eq!(slides.len(), 3);
        assert!(slides[0].has_text("OUTBOUND ACTIVITY (1/3)"));
        assert!(slides[0].has_text("Company 0"));
        assert!(slides[0].has_text("Company 18"));
        assert!(!slides[0].has_text("Company 19"));
        assert!(slides[1].has_text("Company 19"));
        assert!(slides[2].has_text("Company 44"));
        assert!(slides[2].has_text("Showing 39-45 of 45 contacts"));
        assert_eq!(slides[0].background, Some(SLIDE_BACKGROUND));
    }

    #[test]
    fn test_row_shading_restarts_per_slide() {
        let canvas = Canvas::new(10.0, 10.0);
        let list = contacts(21);
        let slides = ContactTablePaginator::default()
            .slides("T", "S", &list, &Theme::default(), &canvas)
            .unwrap();

        let row_fills = |slide: &Slide| -> Vec<Rgb> {
            slide
                .elements
                .iter()
                .filter_map(|e| match e {
                    crate::model::Element::Shape(s) if s.line.map(|l| l.width) == Some(0.3) => s.fill,
                    _ => None,
                })
                .collect()
        };
        let second = row_fills(&slides[1]);
        assert_eq!(second, [CARD_FILL, ROW_ALT_FILL]);
        assert_eq!(row_fills(&slides[0]).len(), 19);
    }

    #[test]
    fn test_empty_list_has_no_slides() {
        let slides = ContactTablePaginator::default()
            .slides("T", "S", &[], &Theme::default(), &Canvas::new(10.0, 10.0))
            .unwrap();
        assert!(slides.is_empty());
    }
}
