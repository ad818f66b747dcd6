//! Fixed and generated package parts other than slides.

use std::fmt::Write as FmtWrite;

use chrono::{DateTime, Utc};

use super::xml::{emu, escape_xml, NS_A, NS_P, NS_R, XML_DECL};
use crate::error::{Error, Result};

const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) const REL_SLIDE: &str = "slide";
pub(crate) const REL_SLIDE_LAYOUT: &str = "slideLayout";
pub(crate) const REL_SLIDE_MASTER: &str = "slideMaster";
pub(crate) const REL_THEME: &str = "theme";
pub(crate) const REL_IMAGE: &str = "image";
pub(crate) const REL_PRES_PROPS: &str = "presProps";

/// Notes page size in EMU (portrait letter).
const NOTES_CX: i64 = 6_858_000;
const NOTES_CY: i64 = 9_144_000;

fn xml_err(e: std::fmt::Error) -> Error {
    Error::Export(e.to_string())
}

/// One entry of a `.rels` part.
pub(crate) struct Relationship {
    pub id: String,
    pub kind: &'static str,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, kind: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            target: target.into(),
        }
    }
}

/// Serialize a relationships part. `kind` is relative to the officeDocument namespace.
pub(crate) fn relationships_xml(rels: &[Relationship]) -> Result<String> {
    let mut xml = String::from(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_PKG_RELS).map_err(xml_err)?;
    for rel in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            rel.id,
            REL_BASE,
            rel.kind,
            escape_xml(&rel.target)
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// Package-level relationships.
pub(crate) fn root_rels_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<Relationships xmlns="{}">"#,
            r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="ppt/presentation.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="{}/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        XML_DECL, NS_PKG_RELS, REL_BASE, REL_BASE
    )
}

/// `[Content_Types].xml` for `slide_count` slides.
pub(crate) fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    xml.push_str(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for n in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            n
        )
        .map_err(xml_err)?;
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    Ok(xml)
}

/// `ppt/presentation.xml`. Relationship ids: `rId1` master, `rId2..` slides.
pub(crate) fn presentation_xml(slide_count: usize, width: f64, height: f64) -> Result<String> {
    let mut xml = String::from(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(xml_err)?;

    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            write!(xml, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2).map_err(xml_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, emu(width), emu(height)).map_err(xml_err)?;
    write!(xml, r#"<p:notesSz cx="{}" cy="{}"/>"#, NOTES_CX, NOTES_CY).map_err(xml_err)?;
    xml.push_str("<p:defaultTextStyle/>");
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// Relationships of `ppt/presentation.xml`.
pub(crate) fn presentation_rels(slide_count: usize) -> Vec<Relationship> {
    let mut rels = Vec::with_capacity(slide_count + 3);
    rels.push(Relationship::new(
        "rId1",
        REL_SLIDE_MASTER,
        "slideMasters/slideMaster1.xml",
    ));
    for n in 1..=slide_count {
        rels.push(Relationship::new(
            format!("rId{}", n + 1),
            REL_SLIDE,
            format!("slides/slide{}.xml", n),
        ));
    }
    rels.push(Relationship::new(
        format!("rId{}", slide_count + 2),
        REL_THEME,
        "theme/theme1.xml",
    ));
    rels.push(Relationship::new(
        format!("rId{}", slide_count + 3),
        REL_PRES_PROPS,
        "presProps.xml",
    ));
    rels
}

pub(crate) fn pres_props_xml() -> String {
    format!(
        r#"{}<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
        XML_DECL, NS_A, NS_R, NS_P
    )
}

const EMPTY_SP_TREE: &str = concat!(
    "<p:spTree>",
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    "</p:spTree>"
);

pub(crate) fn slide_master_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{}</p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>",
            "</p:sldMaster>"
        ),
        XML_DECL, NS_A, NS_R, NS_P, EMPTY_SP_TREE
    )
}

pub(crate) fn slide_master_rels() -> Vec<Relationship> {
    vec![
        Relationship::new("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        Relationship::new("rId2", REL_THEME, "../theme/theme1.xml"),
    ]
}

pub(crate) fn slide_layout_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank">{}</p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        XML_DECL, NS_A, NS_R, NS_P, EMPTY_SP_TREE
    )
}

pub(crate) fn slide_layout_rels() -> Vec<Relationship> {
    vec![Relationship::new(
        "rId1",
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml",
    )]
}

/// Office-style theme whose first accent is the deck accent.
pub(crate) fn theme_xml(accent: &str) -> String {
    let phclr_fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
            w
        )
    };
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(r#"<a:theme xmlns:a="{}" name="Leasedeck">"#, NS_A));
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Leasedeck">"#);
    xml.push_str(r#"<a:dk1><a:srgbClr val="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#);
    xml.push_str(r#"<a:dk2><a:srgbClr val="1E293B"/></a:dk2>"#);
    xml.push_str(r#"<a:lt2><a:srgbClr val="F8FAFC"/></a:lt2>"#);
    xml.push_str(&format!(r#"<a:accent1><a:srgbClr val="{}"/></a:accent1>"#, accent));
    xml.push_str(r#"<a:accent2><a:srgbClr val="475569"/></a:accent2>"#);
    xml.push_str(r#"<a:accent3><a:srgbClr val="64748B"/></a:accent3>"#);
    xml.push_str(r#"<a:accent4><a:srgbClr val="CBD5E1"/></a:accent4>"#);
    xml.push_str(r#"<a:accent5><a:srgbClr val="E2E8F0"/></a:accent5>"#);
    xml.push_str(r#"<a:accent6><a:srgbClr val="2C5AA0"/></a:accent6>"#);
    xml.push_str(r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#);
    xml.push_str(r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#);
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Leasedeck">"#);
    xml.push_str(r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#);
    xml.push_str(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#);
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Leasedeck">"#);
    xml.push_str("<a:fillStyleLst>");
    (0..3).for_each(|_| xml.push_str(phclr_fill));
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    [6350, 12700, 19050].iter().for_each(|w| xml.push_str(&line(*w)));
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    (0..3).for_each(|_| xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>"));
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    (0..3).for_each(|_| xml.push_str(phclr_fill));
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("</a:theme>");
    xml
}

/// `docProps/core.xml`.
pub(crate) fn core_props_xml(title: &str, creator: &str, created: DateTime<Utc>) -> String {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            "{}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{}</dc:title>",
            "<dc:creator>{}</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        XML_DECL,
        escape_xml(title),
        escape_xml(creator),
        stamp,
        stamp
    )
}

/// `docProps/app.xml`.
pub(crate) fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>leasedeck {}</Application>",
            "<Slides>{}</Slides>",
            "</Properties>"
        ),
        XML_DECL,
        env!("CARGO_PKG_VERSION"),
        slide_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_presentation_rel_ids_line_up() {
        let xml = presentation_xml(3, 12.75, 16.5).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="11658600" cy="15087600"/>"#));

        let rels = presentation_rels(3);
        assert_eq!(rels[0].id, "rId1");
        assert_eq!(rels[3].target, "slides/slide3.xml");
        assert_eq!(rels[3].id, "rId4");
        assert_eq!(rels[4].kind, REL_THEME);
    }

    #[test]
    fn test_empty_presentation_omits_slide_list() {
        let xml = presentation_xml(0, 10.0, 7.5).unwrap();
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types_xml(2).unwrap();
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
        assert!(!xml.contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_relationships_escape_targets() {
        let xml = relationships_xml(&[Relationship::new("rId1", REL_IMAGE, "../media/a&b.png")]).unwrap();
        assert!(xml.contains(r#"Target="../media/a&amp;b.png""#));
        assert!(xml.contains("relationships/image"));
    }

    #[test]
    fn test_core_props_timestamp() {
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let xml = core_props_xml("Landlord Update Report", "leasedeck", created);
        assert!(xml.contains("2025-01-15T09:30:00Z"));
        assert!(xml.contains("<dc:title>Landlord Update Report</dc:title>"));
    }

    #[test]
    fn test_theme_uses_accent() {
        assert!(theme_xml("C80000").contains(r#"<a:accent1><a:srgbClr val="C80000"/></a:accent1>"#));
    }
}
