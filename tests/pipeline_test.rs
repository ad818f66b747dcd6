//! End-to-end tests for the document-to-deck pipeline.

mod common;

use std::io::{Cursor, Read};
use std::sync::Arc;

use common::{build_pdf, offering_lines, pdfium, SolidRenderer, TestPage, ADDRESS};
use leasedeck::layout::{SectionSpec, MARKET_PANEL_TITLE};
use leasedeck::model::{Element, PropertyFacts, Rgb};
use leasedeck::narrative::{StaticNarrative, STATUS_FALLBACK, TRANSPORT_FALLBACK};
use leasedeck::{
    Capabilities, Error, LayoutOptions, PptxExporter, NarrativeFailure, NarrativeSource, PipelineOptions,
    ReportPipeline, ReportRequest, REPORT_FILE_NAME,
};

/// Rows per table slide with the default geometry.
const ROWS_PER_SLIDE: usize = 19;

fn expected_slides(outbound: usize, inbound: usize) -> usize {
    1 + 1 + outbound.div_ceil(ROWS_PER_SLIDE) + inbound.div_ceil(ROWS_PER_SLIDE) + 1
}

/// Pipeline over the real PDFium renderer, `None` when it is not installed.
fn pipeline() -> Option<ReportPipeline> {
    pdfium().map(|_| ReportPipeline::new(Capabilities::with_defaults()))
}

/// Pipeline whose renderer paints every page white at `width` x `height` pt.
fn solid_pipeline(width: f64, height: f64) -> ReportPipeline {
    solid_pipeline_with(SolidRenderer::new(1, width, height))
}

fn solid_pipeline_with(renderer: SolidRenderer) -> ReportPipeline {
    ReportPipeline::new(
        Capabilities::new()
            .with_renderer(Arc::new(renderer))
            .with_exporter(Arc::new(PptxExporter::new())),
    )
}

struct RejectingNarrative(u16);

impl NarrativeSource for RejectingNarrative {
    fn fetch(&self, _request: &leasedeck::narrative::NarrativeRequest) -> leasedeck::Result<String> {
        Err(Error::NarrativeFetch(NarrativeFailure::Status(self.0)))
    }
}

#[cfg(feature = "http")]
#[test]
fn test_textless_pdf_with_unreachable_narrative() {
    let pdf = build_pdf(&[TestPage::blank()], 612, 792);
    let narrative = leasedeck::HttpNarrativeSource::with_timeout(
        "http://127.0.0.1:9/market-report",
        std::time::Duration::from_secs(2),
    )
    .unwrap();

    let report = pipeline()
        .unwrap_or_else(|| solid_pipeline(612.0, 792.0))
        .with_narrative(Arc::new(narrative))
        .build_report(&ReportRequest::new(pdf, ADDRESS))
        .unwrap();

    assert_eq!(report.deck.slide_count(), expected_slides(45, 32));
    assert_eq!(report.deck.slide_count(), 8);
    assert_eq!((report.deck.width, report.deck.height), (12.75, 16.5));
    assert_eq!(report.facts, PropertyFacts::placeholder().with_address(ADDRESS));
    assert_eq!(report.narrative, TRANSPORT_FALLBACK);

    let summary = report.deck.slide(1).unwrap();
    assert!(summary.has_text(MARKET_PANEL_TITLE));
    assert!(summary.has_text(TRANSPORT_FALLBACK));
    assert!(summary.has_text(PropertyFacts::NAME_PLACEHOLDER));
    assert!(summary.has_text("Rent: $[XX.XX]/SF/YR"));
}

#[test]
fn test_status_fallback_in_market_panel() {
    let pdf = build_pdf(&[TestPage::blank()], 200, 260);
    let report = solid_pipeline(200.0, 260.0)
        .with_narrative(Arc::new(RejectingNarrative(503)))
        .build_report(&ReportRequest::new(pdf, ADDRESS))
        .unwrap();

    assert_eq!(report.narrative, STATUS_FALLBACK);
    assert!(report.deck.slide(1).unwrap().has_text(STATUS_FALLBACK));
}

#[test]
fn test_facts_from_cover_text() {
    let Some(pipeline) = pipeline() else { return };
    let pdf = build_pdf(
        &[
            TestPage::blank().with_lines(&offering_lines()),
            TestPage::blank().with_lines(&["Contact the leasing team"]),
        ],
        200,
        260,
    );
    let report = pipeline
        .with_narrative(Arc::new(StaticNarrative::new("Demand is steady.")))
        .build_report(&ReportRequest::new(pdf, ADDRESS))
        .unwrap();

    assert_eq!(report.page_count, 2);
    assert_eq!(report.facts.name, "SUNSET PLAZA");
    assert_eq!(report.facts.location_label, "Springfield, IL");
    assert_eq!(report.facts.size_label, "125,000 SF");
    assert_eq!(report.facts.available_space_label, "2,400 SF");
    assert_eq!(report.facts.rent_label, "$28.50/SF/YR");

    let summary = report.deck.slide(1).unwrap();
    assert!(summary.has_text("125,000 SF | Springfield, IL"));
    assert!(summary.has_text("Available: 2,400 SF"));
    assert!(summary.has_text("Demand is steady."));
}

#[test]
fn test_accent_sampled_from_cover() {
    let Some(pipeline) = pipeline() else { return };
    let pdf = build_pdf(
        &[TestPage::filled([1, 0, 0]), TestPage::filled([0, 0, 1])],
        200,
        260,
    );
    let report = pipeline
        .build_report(&ReportRequest::new(pdf, ADDRESS))
        .unwrap();

    assert_eq!(report.deck.accent, Some(Rgb::new(0xFF, 0, 0)));
    let summary = report.deck.slide(1).unwrap();
    let name = summary
        .text_boxes()
        .find(|t| t.text == PropertyFacts::NAME_PLACEHOLDER)
        .unwrap();
    assert_eq!(name.style.color, Rgb::new(0xFF, 0, 0));

    // cover and back are full-bleed pictures of different pages
    let cover = report.deck.slide(0).unwrap().pictures().next().unwrap().data.clone();
    let back = report.deck.slides().last().unwrap().pictures().next().unwrap().data.clone();
    assert_ne!(cover, back);
}

#[test]
fn test_custom_section_sizes() {
    let pdf = build_pdf(&[TestPage::blank()], 200, 260);
    let layout = LayoutOptions::new()
        .with_outbound(SectionSpec::new("OUTBOUND ACTIVITY", "Tenants We Contacted", 60))
        .with_inbound(SectionSpec::new("INBOUND ACTIVITY", "Tenants Who Contacted Us", 0));
    let report = solid_pipeline(200.0, 260.0)
        .with_options(PipelineOptions::new().with_layout_options(layout))
        .build_report(&ReportRequest::new(pdf, ADDRESS))
        .unwrap();

    // 60 rows need 4 slides; an empty section adds none
    assert_eq!(report.deck.slide_count(), expected_slides(60, 0));
    assert!(report.deck.slide(2).unwrap().has_text("OUTBOUND ACTIVITY (1/4)"));
    assert!(report.deck.slide(5).unwrap().has_text("Showing 58-60 of 60 contacts"));
    assert!(matches!(
        report.deck.slide(6).unwrap().elements[0],
        Element::Picture(_)
    ));
}

#[test]
fn test_run_writes_pptx_package() {
    let Some(pipeline) = pipeline() else { return };
    let pdf = build_pdf(&[TestPage::filled([0, 1, 0])], 200, 260);
    let artifact = pipeline.run(&ReportRequest::new(pdf, ADDRESS)).unwrap();

    assert_eq!(artifact.file_name, REPORT_FILE_NAME);
    assert_eq!(artifact.slide_count, 8);

    let mut archive = zip::ZipArchive::new(Cursor::new(artifact.bytes.as_slice())).unwrap();
    let slides = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide"))
        .count();
    assert_eq!(slides, 8);

    let mut presentation = String::new();
    archive
        .by_name("ppt/presentation.xml")
        .unwrap()
        .read_to_string(&mut presentation)
        .unwrap();
    // 200 x 260 pt at 2x and 96 px/in
    assert!(presentation.contains(r#"<p:sldSz cx="3810000" cy="4953000"/>"#));

    let mut theme = String::new();
    archive
        .by_name("ppt/theme/theme1.xml")
        .unwrap()
        .read_to_string(&mut theme)
        .unwrap();
    assert!(theme.contains("00FF00"));
}

#[test]
fn test_invalid_requests_fail_before_rendering() {
    let pipeline = ReportPipeline::new(Capabilities::with_defaults());
    let err = pipeline
        .run(&ReportRequest::new(Vec::new(), ADDRESS))
        .unwrap_err();
    assert!(matches!(err, Error::InputValidation(_)));

    let err = pipeline
        .run(&ReportRequest::new(b"GIF89a".to_vec(), ADDRESS))
        .unwrap_err();
    assert_eq!(err.to_string(), "Please upload a PDF file");

    let err = pipeline
        .run(&ReportRequest::new(b"%PDF-1.4\ngarbage".to_vec(), ADDRESS))
        .unwrap_err();
    if pdfium().is_some() {
        assert!(matches!(err, Error::DocumentParse(_)));
    } else {
        assert!(matches!(err, Error::DependencyLoad(_)));
    }
}

#[test]
fn test_cover_and_back_come_from_first_and_last_pages() {
    let renderer = SolidRenderer::new(3, 144.0, 192.0)
        .with_colors(&[[200, 0, 0], [0, 200, 0], [0, 0, 200]])
        .with_text("HARBOR POINT OFFERING MEMORANDUM");
    let report = solid_pipeline_with(renderer)
        .build_report(&ReportRequest::new(b"%PDF-1.4\n%stub".to_vec(), ADDRESS))
        .unwrap();

    assert_eq!(report.page_count, 3);
    assert_eq!(report.deck.accent, Some(Rgb::new(200, 0, 0)));
    assert_eq!(report.facts.name, "HARBOR POINT");
    assert_eq!((report.deck.width, report.deck.height), (3.0, 4.0));
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = Arc::new(pipeline().unwrap_or_else(|| solid_pipeline(100.0, 130.0)));
    let pdf = build_pdf(&[TestPage::blank()], 100, 130);

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let pdf = pdf.clone();
            std::thread::spawn(move || pipeline.run(&ReportRequest::new(pdf, ADDRESS)))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap().slide_count, 8);
    }
}
