//! Package part parsing
//!
//! docx-rs gives us the body, but keeps style display names, table style references,
//! relationship target modes and core properties out of reach. This module reads those
//! parts straight from the ZIP package with quick-xml.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use super::io::read_part;
use super::models::Relationship;

const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";
const DEFAULT_TABLE_STYLE: &str = "Normal Table";

/// Built-in styles whose stored name differs from the one Word displays
const BUILTIN_STYLE_NAMES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

/// Translate a stored style name to its UI name
fn ui_style_name(name: String) -> String {
    BUILTIN_STYLE_NAMES
        .iter()
        .find(|(stored, _)| *stored == name)
        .map(|(_, ui)| ui.to_string())
        .unwrap_or(name)
}

/// Everything the loader needs from the package besides the body itself
#[derive(Debug, Default)]
pub(crate) struct PackageParts {
    pub(crate) styles: StyleSheet,
    pub(crate) relationships: Vec<Relationship>,
    pub(crate) modified: Option<NaiveDateTime>,
    /// Style ids of the top-level body tables, in document order
    pub(crate) table_styles: Vec<Option<String>>,
}

/// Style id to display name lookup, with the package defaults
#[derive(Debug, Default)]
pub(crate) struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
    default_table: Option<String>,
}

impl StyleSheet {
    /// Display name for a paragraph style id, falling back to the default paragraph style
    pub(crate) fn paragraph_style(&self, id: Option<&str>) -> String {
        self.resolve(id, self.default_paragraph.as_deref(), DEFAULT_PARAGRAPH_STYLE)
    }

    /// Display name for a table style id, falling back to the default table style
    pub(crate) fn table_style(&self, id: Option<&str>) -> String {
        self.resolve(id, self.default_table.as_deref(), DEFAULT_TABLE_STYLE)
    }

    fn resolve(&self, id: Option<&str>, default: Option<&str>, fallback: &str) -> String {
        id.and_then(|id| self.names.get(id))
            .map(String::as_str)
            .or(default)
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Read styles, relationships, core properties and table styles from a .docx file
pub(crate) fn read_package(file_path: &Path) -> Result<PackageParts> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let styles = match read_part(&mut archive, "word/styles.xml")? {
        Some(xml) => parse_styles(&xml).context("failed to parse word/styles.xml")?,
        None => StyleSheet::default(),
    };

    let relationships = match read_part(&mut archive, "word/_rels/document.xml.rels")? {
        Some(xml) => parse_relationships(&xml).context("failed to parse document relationships")?,
        None => Vec::new(),
    };

    let modified = match read_part(&mut archive, "docProps/core.xml")? {
        Some(xml) => parse_core_modified(&xml).context("failed to parse docProps/core.xml")?,
        None => None,
    };

    let document_xml = read_part(&mut archive, "word/document.xml")?
        .context("missing word/document.xml")?;
    let table_styles =
        parse_table_styles(&document_xml).context("failed to parse word/document.xml")?;

    Ok(PackageParts {
        styles,
        relationships,
        modified,
        table_styles,
    })
}

fn attr_val(e: &BytesStart<'_>, key_local: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key_local {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse `word/styles.xml` into an id → name table
pub(crate) fn parse_styles(xml: &str) -> Result<StyleSheet> {
    let mut sheet = StyleSheet::default();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    // (style id, style type, is default)
    let mut current: Option<(String, String, bool)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                let id = attr_val(e, b"styleId")?.unwrap_or_default();
                let kind = attr_val(e, b"type")?.unwrap_or_default();
                let is_default = matches!(attr_val(e, b"default")?.as_deref(), Some("1" | "true"));
                current = Some((id, kind, is_default));
            }
            Event::End(ref e) if e.local_name().as_ref() == b"style" => {
                current = None;
            }
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"name" => {
                if let (Some((id, kind, is_default)), Some(name)) =
                    (current.as_ref(), attr_val(e, b"val")?)
                {
                    let name = ui_style_name(name);
                    if *is_default {
                        match kind.as_str() {
                            "paragraph" => sheet.default_paragraph = Some(name.clone()),
                            "table" => sheet.default_table = Some(name.clone()),
                            _ => {}
                        }
                    }
                    sheet.names.insert(id.clone(), name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

/// Parse `word/_rels/document.xml.rels`
pub(crate) fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut relationships = Vec::new();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr_val(e, b"Id")?, attr_val(e, b"Target")?) {
                    let external = attr_val(e, b"TargetMode")?
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
                    relationships.push(Relationship {
                        id,
                        target,
                        external,
                    });
                } else {
                    log::warn!("skipping relationship without Id or Target");
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Extract `dcterms:modified` from `docProps/core.xml`
pub(crate) fn parse_core_modified(xml: &str) -> Result<Option<NaiveDateTime>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut in_modified = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"modified" => {
                in_modified = true;
            }
            Event::End(ref e) if e.local_name().as_ref() == b"modified" => break,
            Event::Text(ref t) if in_modified => {
                text.push_str(&t.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(parse_w3cdtf(text.trim()))
}

/// Parse a W3CDTF timestamp into naive UTC
fn parse_w3cdtf(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.naive_utc());
    }

    match NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        Ok(stamp) => Some(stamp),
        Err(err) => {
            log::warn!("unrecognised modified timestamp {value:?}: {err}");
            None
        }
    }
}

/// Collect the `w:tblStyle` of every top-level body table, in document order
pub(crate) fn parse_table_styles(xml: &str) -> Result<Vec<Option<String>>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut styles = Vec::new();
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Depth of the top-level table currently open
    let mut table_depth: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"body" => body_depth = Some(depth),
                    b"tbl" if body_depth.is_some_and(|body| depth == body + 1) => {
                        styles.push(None);
                        table_depth = Some(depth);
                    }
                    // tbl > tblPr > tblStyle
                    b"tblStyle" if table_depth.is_some_and(|tbl| depth == tbl + 2) => {
                        if let Some(last) = styles.last_mut() {
                            *last = attr_val(e, b"val")?;
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                if e.local_name().as_ref() == b"tblStyle"
                    && table_depth.is_some_and(|tbl| depth == tbl + 1)
                {
                    if let Some(last) = styles.last_mut() {
                        *last = attr_val(e, b"val")?;
                    }
                }
            }
            Event::End(ref e) => {
                if e.local_name().as_ref() == b"tbl" && table_depth == Some(depth) {
                    table_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="Bullets1"><w:name w:val="Bullets 1"/></w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/></w:style>
  <w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style>
</w:styles>"#;

    #[test]
    fn test_style_names_and_defaults() {
        let sheet = parse_styles(STYLES).unwrap();

        assert_eq!(sheet.paragraph_style(Some("Bullets1")), "Bullets 1");
        assert_eq!(sheet.paragraph_style(Some("Heading1")), "Heading 1");
        assert_eq!(sheet.paragraph_style(None), "Normal");
        assert_eq!(sheet.paragraph_style(Some("Missing")), "Normal");
        assert_eq!(sheet.table_style(Some("TableGrid")), "Table Grid");
        assert_eq!(sheet.table_style(None), "Normal Table");
    }

    #[test]
    fn test_empty_stylesheet_uses_builtin_defaults() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.paragraph_style(Some("Heading1")), "Normal");
        assert_eq!(sheet.table_style(None), "Normal Table");
    }

    #[test]
    fn test_relationships_with_target_mode() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://www.cyber.gov.au/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

        let rels = parse_relationships(xml).unwrap();
        assert_eq!(
            rels,
            vec![
                Relationship::internal("rId1", "styles.xml"),
                Relationship::external("rId2", "https://www.cyber.gov.au/?a=1&b=2"),
            ]
        );
    }

    #[test]
    fn test_core_modified() {
        let xml = r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dcterms:created xsi:type="dcterms:W3CDTF">2019-01-01T00:00:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">2020-06-15T03:11:00Z</dcterms:modified>
</cp:coreProperties>"#;

        let modified = parse_core_modified(xml).unwrap().unwrap();
        assert_eq!(
            modified.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2020-06-15T03:11:00"
        );
    }

    #[test]
    fn test_core_without_modified() {
        let xml = r#"<cp:coreProperties xmlns:cp="x"><dc:title xmlns:dc="y">ISM</dc:title></cp:coreProperties>"#;
        assert_eq!(parse_core_modified(xml).unwrap(), None);
    }

    #[test]
    fn test_table_styles_skip_nested_tables() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
  <w:tbl>
    <w:tblPr><w:tblStyle w:val="TableGrid"/></w:tblPr>
    <w:tr><w:tc>
      <w:tbl><w:tblPr><w:tblStyle w:val="Inner"/></w:tblPr></w:tbl>
      <w:p/>
    </w:tc></w:tr>
  </w:tbl>
  <w:p><w:r><w:t>between</w:t></w:r></w:p>
  <w:tbl><w:tblPr/><w:tr/></w:tbl>
</w:body></w:document>"#;

        let styles = parse_table_styles(xml).unwrap();
        assert_eq!(styles, vec![Some("TableGrid".to_string()), None]);
    }
}
