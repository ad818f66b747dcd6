//! Activity summary slide: header band, property card, KPI row and the
//! market insights panel.

use super::geometry::Canvas;
use super::options::Kpi;
use super::palette::{CARD_BORDER, CARD_FILL, SLIDE_BACKGROUND, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::model::{Frame, HAlign, PropertyFacts, Rgb, Slide, Stroke, TextStyle, Theme, VAlign};

pub const REPORT_TITLE: &str = "LEASING ACTIVITY REPORT";
pub const PROPERTY_CARD_TITLE: &str = "PROPERTY";
pub const MARKET_PANEL_TITLE: &str = "LOCAL MARKET INSIGHTS - LAST 60 DAYS";

// Top row (property card and KPI cards), fractions of slide height.
const TOP_Y: f64 = 0.12;
const TOP_H: f64 = 0.16;

const KPI_START_X: f64 = 0.35;
const KPI_W: f64 = 0.10;
const KPI_GAP: f64 = 0.008;

const MARKET_Y: f64 = 0.31;
const MARKET_H: f64 = 0.63;

/// Everything the summary slide displays.
pub struct SummaryContent<'a> {
    pub facts: &'a PropertyFacts,
    pub narrative: &'a str,
    pub subtitle: &'a str,
    pub kpis: &'a [Kpi],
}

/// Build the activity summary slide.
pub fn build_summary_slide(content: &SummaryContent<'_>, theme: &Theme, canvas: &Canvas) -> Slide {
    let mut slide = Slide::with_background(SLIDE_BACKGROUND);
    add_header(&mut slide, content.subtitle, theme, canvas);
    add_property_card(&mut slide, content.facts, theme, canvas);
    add_kpi_cards(&mut slide, content.kpis, theme, canvas);
    add_market_panel(&mut slide, content.narrative, theme, canvas);
    slide
}

fn card_border() -> Option<Stroke> {
    Some(Stroke::new(CARD_BORDER, 1.0))
}

fn add_header(slide: &mut Slide, subtitle: &str, theme: &Theme, canvas: &Canvas) {
    slide.add_shape(canvas.frame(0.0, 0.0, 1.0, 0.10), Some(theme.accent), None);
    slide.add_text(
        REPORT_TITLE,
        canvas.frame(0.03, 0.02, 0.94, 0.035),
        TextStyle::new(32.0, Rgb::WHITE).bold(),
    );
    slide.add_text(
        subtitle,
        canvas.frame(0.03, 0.06, 0.94, 0.028),
        TextStyle::new(14.0, Rgb::WHITE),
    );
}

fn add_property_card(slide: &mut Slide, facts: &PropertyFacts, theme: &Theme, canvas: &Canvas) {
    let card = canvas.frame(0.03, TOP_Y, 0.30, TOP_H);
    slide.add_shape(card, Some(CARD_FILL), card_border());

    let strip = Frame::new(card.x, card.y, card.w, card.h * 0.18);
    slide.add_shape(strip, Some(theme.light), None);
    slide.add_text(
        PROPERTY_CARD_TITLE,
        strip,
        TextStyle::new(13.0, TEXT_PRIMARY).bold().align(HAlign::Center),
    );

    let line = |offset: f64, height: f64| {
        Frame::new(
            card.x + card.w * 0.05,
            card.y + card.h * offset,
            card.w * 0.9,
            card.h * height,
        )
    };

    slide.add_text(
        facts.name.as_str(),
        line(0.25, 0.15),
        TextStyle::new(15.0, theme.accent).bold(),
    );
    slide.add_text(
        format!("{} | {}", facts.size_label, facts.location_label),
        line(0.46, 0.12),
        TextStyle::new(11.0, TEXT_MUTED),
    );
    slide.add_text(
        format!("Available: {}", facts.available_space_label),
        line(0.64, 0.12),
        TextStyle::new(11.0, TEXT_SECONDARY),
    );
    slide.add_text(
        format!("Rent: {}", facts.rent_label),
        line(0.80, 0.12),
        TextStyle::new(11.0, TEXT_SECONDARY),
    );
}

fn add_kpi_cards(slide: &mut Slide, kpis: &[Kpi], theme: &Theme, canvas: &Canvas) {
    let y = canvas.y(TOP_Y);
    let h = canvas.y(TOP_H);
    let w = canvas.x(KPI_W);

    for (idx, kpi) in kpis.iter().enumerate() {
        let x = canvas.x(KPI_START_X) + idx as f64 * (w + canvas.x(KPI_GAP));

        slide.add_shape(Frame::new(x, y, w, h), Some(CARD_FILL), card_border());
        slide.add_shape(Frame::new(x, y, w, h * 0.1), Some(theme.accent), None);
        slide.add_text(
            kpi.value.to_string(),
            Frame::new(x, y + h * 0.28, w, h * 0.3),
            TextStyle::new(36.0, theme.accent).bold().align(HAlign::Center),
        );
        slide.add_text(
            kpi.label.as_str(),
            Frame::new(x, y + h * 0.68, w, h * 0.18),
            TextStyle::new(11.0, TEXT_PRIMARY).bold().align(HAlign::Center),
        );
    }
}

fn add_market_panel(slide: &mut Slide, narrative: &str, theme: &Theme, canvas: &Canvas) {
    let panel = canvas.frame(0.03, MARKET_Y, 0.94, MARKET_H);
    slide.add_shape(panel, Some(CARD_FILL), card_border());

    let strip = Frame::new(panel.x, panel.y, panel.w, panel.h * 0.08);
    slide.add_shape(strip, Some(theme.light), None);
    slide.add_text(
        MARKET_PANEL_TITLE,
        strip,
        TextStyle::new(15.0, TEXT_PRIMARY).bold().align(HAlign::Center),
    );

    slide.add_text(
        narrative,
        Frame::new(
            canvas.x(0.05),
            panel.y + panel.h * 0.12,
            canvas.x(0.90),
            panel.h * 0.82,
        ),
        TextStyle::new(14.0, TEXT_PRIMARY)
            .align(HAlign::Left)
            .valign(VAlign::Top)
            .para_space_after(12.0),
    );
}
