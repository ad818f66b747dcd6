//! Deck assembly.

use super::geometry::Canvas;
use super::options::LayoutOptions;
use super::paginator::ContactTablePaginator;
use super::summary::{build_summary_slide, SummaryContent};
use crate::error::Result;
use crate::model::{ContactRecord, Deck, Picture, PropertyFacts, RasterPage, Slide, Theme};

/// A titled contact list to be paginated into table slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSection {
    pub title: String,
    pub subtitle: String,
    pub contacts: Vec<ContactRecord>,
}

impl ContactSection {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        contacts: Vec<ContactRecord>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            contacts,
        }
    }
}

/// Inputs for one deck.
pub struct LayoutInput<'a> {
    /// Rendered page 1; sets the slide size and accent color
    pub cover: &'a RasterPage,
    /// Rendered final page
    pub back: &'a RasterPage,
    pub facts: &'a PropertyFacts,
    pub narrative: &'a str,
    /// Contact sections in slide order
    pub sections: &'a [ContactSection],
}

/// Lays out the cover, summary, contact tables and back slides.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Create an engine with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Build the finished deck.
    pub fn build(&self, input: &LayoutInput<'_>) -> Result<Deck> {
        let canvas = Canvas::for_page(input.cover);
        let theme = Theme::from_accent(input.cover.dominant_color);
        log::debug!(
            "Layout canvas {:.2}x{:.2} in, accent {} light {}",
            canvas.width,
            canvas.height,
            theme.accent,
            theme.light
        );

        let mut deck = Deck::new(canvas.width, canvas.height).with_accent(theme.accent);
        deck.push_slide(full_bleed(input.cover, "Cover page", &canvas));

        let subtitle = self.options.period.subtitle();
        let summary = SummaryContent {
            facts: input.facts,
            narrative: input.narrative,
            subtitle: &subtitle,
            kpis: &self.options.kpis,
        };
        deck.push_slide(build_summary_slide(&summary, &theme, &canvas));

        let paginator = ContactTablePaginator::new(self.options.table);
        for section in input.sections {
            deck.extend_slides(paginator.slides(
                &section.title,
                &section.subtitle,
                &section.contacts,
                &theme,
                &canvas,
            )?);
        }

        deck.push_slide(full_bleed(input.back, "Back page", &canvas));
        Ok(deck)
    }
}

fn full_bleed(page: &RasterPage, description: &str, canvas: &Canvas) -> Slide {
    let mut slide = Slide::new();
    slide.add_picture(Picture {
        frame: canvas.full(),
        data: page.image_data.clone(),
        mime_type: RasterPage::MIME_TYPE,
        description: description.to_string(),
    });
    slide
}
