//! PresentationML slide markup.

use std::fmt::Write as FmtWrite;

use crate::error::{Error, Result};
use crate::model::{Element, Frame, HAlign, Picture, Shape, Slide, TextBox, VAlign};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per point.
pub const EMU_PER_POINT: f64 = 12_700.0;

pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

pub(crate) const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape XML special characters and drop characters XML 1.0 forbids.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// Whether `c` is allowed in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Inches to EMU.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

fn xml_err(e: std::fmt::Error) -> Error {
    Error::Export(e.to_string())
}

/// Relationship id of picture `index` (0-based) on a slide; `rId1` is the layout.
pub fn picture_rel_id(index: usize) -> String {
    format!("rId{}", index + 2)
}

/// Serialize one slide. Pictures are referenced in order via [`picture_rel_id`].
pub fn slide_xml(slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(4096 + slide.element_count() * 512);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(xml_err)?;
    xml.push_str("<p:cSld>");

    if let Some(color) = slide.background {
        write!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            color
        )
        .map_err(xml_err)?;
    }

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    let mut picture_index = 0;
    for (i, element) in slide.elements.iter().enumerate() {
        // id 1 is the group shape
        let shape_id = i as u32 + 2;
        match element {
            Element::Shape(shape) => write_shape(&mut xml, shape_id, shape)?,
            Element::Text(text) => write_text_box(&mut xml, shape_id, text)?,
            Element::Picture(picture) => {
                write_picture(&mut xml, shape_id, picture, &picture_rel_id(picture_index))?;
                picture_index += 1;
            }
        }
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

fn write_xfrm(xml: &mut String, frame: &Frame) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, emu(frame.x), emu(frame.y)).map_err(xml_err)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, emu(frame.w), emu(frame.h)).map_err(xml_err)?;
    xml.push_str("</a:xfrm>");
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    Ok(())
}

fn write_shape(xml: &mut String, shape_id: u32, shape: &Shape) -> Result<()> {
    xml.push_str("<p:sp>");
    write!(
        xml,
        r#"<p:nvSpPr><p:cNvPr id="{}" name="Rectangle {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>"#,
        shape_id, shape_id
    )
    .map_err(xml_err)?;

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &shape.frame)?;

    match shape.fill {
        Some(color) => write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color)
            .map_err(xml_err)?,
        None => xml.push_str("<a:noFill/>"),
    }

    match shape.line {
        Some(line) => write!(
            xml,
            r#"<a:ln w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln>"#,
            (line.width * EMU_PER_POINT).round() as i64,
            line.color
        )
        .map_err(xml_err)?,
        None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
    }

    xml.push_str("</p:spPr>");
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_text_box(xml: &mut String, shape_id: u32, text: &TextBox) -> Result<()> {
    let style = &text.style;
    xml.push_str("<p:sp>");
    write!(
        xml,
        r#"<p:nvSpPr><p:cNvPr id="{}" name="Text {}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
        shape_id, shape_id
    )
    .map_err(xml_err)?;

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &text.frame)?;
    xml.push_str("<a:noFill/>");
    xml.push_str("</p:spPr>");

    let anchor = match style.valign {
        VAlign::Top => "t",
        VAlign::Middle => "ctr",
        VAlign::Bottom => "b",
    };
    let align = match style.align {
        HAlign::Left => "l",
        HAlign::Center => "ctr",
        HAlign::Right => "r",
    };

    xml.push_str("<p:txBody>");
    write!(
        xml,
        r#"<a:bodyPr wrap="square" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="{}"><a:normAutofit/></a:bodyPr>"#,
        anchor
    )
    .map_err(xml_err)?;
    xml.push_str("<a:lstStyle/>");

    let size = (style.font_size * 100.0).round() as u32;
    let bold = if style.bold { r#" b="1""# } else { "" };

    for line in text.text.split('\n') {
        xml.push_str("<a:p>");
        write!(xml, r#"<a:pPr algn="{}">"#, align).map_err(xml_err)?;
        if let Some(points) = style.para_space_after {
            write!(
                xml,
                r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
                (points * 100.0).round() as u32
            )
            .map_err(xml_err)?;
        }
        xml.push_str("</a:pPr>");

        if !line.is_empty() {
            xml.push_str("<a:r>");
            write!(xml, r#"<a:rPr lang="en-US" sz="{}"{} dirty="0">"#, size, bold)
                .map_err(xml_err)?;
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:latin typeface="{}"/>"#,
                style.color,
                escape_xml(style.font_face)
            )
            .map_err(xml_err)?;
            xml.push_str("</a:rPr>");
            write!(xml, "<a:t>{}</a:t>", escape_xml(line)).map_err(xml_err)?;
            xml.push_str("</a:r>");
        }

        write!(xml, r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/>"#, size).map_err(xml_err)?;
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");
    Ok(())
}

fn write_picture(xml: &mut String, shape_id: u32, picture: &Picture, rel_id: &str) -> Result<()> {
    xml.push_str("<p:pic>");
    write!(
        xml,
        r#"<p:nvPicPr><p:cNvPr id="{}" name="Picture {}" descr="{}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
        shape_id,
        shape_id,
        escape_xml(&picture.description)
    )
    .map_err(xml_err)?;

    xml.push_str("<p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id).map_err(xml_err)?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &picture.frame)?;
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
    Ok(())
}
