//! OPC packaging: zip container, content types, relationships and the
//! bullet numbering part.

use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};

use tracing::trace;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::style::BULLET_NUM_ID;
use crate::xml::{self, escape};

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";

/// A package part: zip entry name, content type and XML payload.
#[derive(Debug)]
struct Part {
    name: &'static str,
    content_type: &'static str,
    data: String,
}

/// A relationship entry: id, type URI, target.
type Relationship<'a> = (&'a str, &'a str, &'a str);

fn content_types_xml(parts: &[Part]) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(xml::DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    write!(
        xml,
        r#"<Default Extension="rels" ContentType="{CT_RELATIONSHIPS}"/>"#
    )?;
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for part in parts {
        write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            escape(part.name),
            part.content_type
        )?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

fn relationships_xml(rels: &[Relationship<'_>]) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(xml::DECLARATION);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{id}" Type="{rel_type}" Target="{}"/>"#,
            escape(target)
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// A two-level bullet definition referenced by the list styles.
pub fn numbering_xml() -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(xml::DECLARATION);
    write!(xml, r#"<w:numbering xmlns:w="{}">"#, xml::NS_W)?;
    xml.push_str(r#"<w:abstractNum w:abstractNumId="0">"#);
    xml.push_str(r#"<w:multiLevelType w:val="hybridMultilevel"/>"#);
    for (ilvl, glyph) in [(0u32, "•"), (1u32, "◦")] {
        let left = 720 * (ilvl + 1);
        write!(
            xml,
            r#"<w:lvl w:ilvl="{ilvl}"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{glyph}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="360"/></w:pPr></w:lvl>"#
        )?;
    }
    xml.push_str("</w:abstractNum>");
    write!(
        xml,
        r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="0"/></w:num>"#
    )?;
    xml.push_str("</w:numbering>");
    Ok(xml)
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn write_entry<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, data: &str) -> Result<()> {
    trace!("Writing package entry {name} ({} bytes)", data.len());
    zip.start_file(name, entry_options())?;
    zip.write_all(data.as_bytes())?;
    Ok(())
}

/// Write a complete .docx package to `writer` and hand the writer back.
///
/// The numbering part and its relationship are only emitted when
/// `with_numbering` is set.
pub fn write_package<W: Write + Seek>(
    writer: W,
    document_xml: String,
    styles_xml: String,
    with_numbering: bool,
) -> Result<W> {
    let mut parts = vec![
        Part {
            name: DOCUMENT_PART,
            content_type: CT_DOCUMENT,
            data: document_xml,
        },
        Part {
            name: STYLES_PART,
            content_type: CT_STYLES,
            data: styles_xml,
        },
    ];
    let mut document_rels: Vec<Relationship<'_>> = vec![("rId1", REL_STYLES, "styles.xml")];
    if with_numbering {
        parts.push(Part {
            name: NUMBERING_PART,
            content_type: CT_NUMBERING,
            data: numbering_xml()?,
        });
        document_rels.push(("rId2", REL_NUMBERING, "numbering.xml"));
    }

    let mut zip = ZipWriter::new(writer);
    write_entry(&mut zip, "[Content_Types].xml", &content_types_xml(&parts)?)?;
    write_entry(
        &mut zip,
        "_rels/.rels",
        &relationships_xml(&[("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART)])?,
    )?;
    write_entry(
        &mut zip,
        "word/_rels/document.xml.rels",
        &relationships_xml(&document_rels)?,
    )?;
    for part in &parts {
        write_entry(&mut zip, part.name, &part.data)?;
    }

    Ok(zip.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_entry(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    #[test]
    fn package_contains_required_parts() {
        let cursor = write_package(
            Cursor::new(Vec::new()),
            "<doc/>".to_string(),
            "<styles/>".to_string(),
            true,
        )
        .unwrap();
        let bytes = cursor.into_inner();

        let types = read_entry(&bytes, "[Content_Types].xml").unwrap();
        assert!(types.contains(r#"PartName="/word/document.xml""#));
        assert!(types.contains(r#"PartName="/word/numbering.xml""#));

        let rels = read_entry(&bytes, "_rels/.rels").unwrap();
        assert!(rels.contains(r#"Target="word/document.xml""#));

        let doc_rels = read_entry(&bytes, "word/_rels/document.xml.rels").unwrap();
        assert!(doc_rels.contains("styles.xml"));
        assert!(doc_rels.contains("numbering.xml"));

        assert_eq!(read_entry(&bytes, DOCUMENT_PART).unwrap(), "<doc/>");
        assert_eq!(read_entry(&bytes, STYLES_PART).unwrap(), "<styles/>");
    }

    #[test]
    fn numbering_is_optional() {
        let cursor = write_package(
            Cursor::new(Vec::new()),
            "<doc/>".to_string(),
            "<styles/>".to_string(),
            false,
        )
        .unwrap();
        let bytes = cursor.into_inner();
        assert!(read_entry(&bytes, NUMBERING_PART).is_none());
        let doc_rels = read_entry(&bytes, "word/_rels/document.xml.rels").unwrap();
        assert!(!doc_rels.contains("numbering.xml"));
    }

    #[test]
    fn numbering_defines_two_bullet_levels() {
        let xml = numbering_xml().unwrap();
        assert!(xml.contains(r#"<w:lvl w:ilvl="0">"#));
        assert!(xml.contains(r#"<w:lvl w:ilvl="1">"#));
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="1">"#));
    }
}
