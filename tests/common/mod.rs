//! Shared .docx fixture builder for the integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const HYPERLINK_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const STYLES_RELATIONSHIP: &str = r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="TOC1"><w:name w:val="toc 1"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Bullets1"><w:name w:val="Bullets 1"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/></w:style>
  <w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/></w:style>
</w:styles>"#;

const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Information Security Manual</dc:title>
  <dcterms:modified xsi:type="dcterms:W3CDTF">2020-06-15T03:11:00Z</dcterms:modified>
</cp:coreProperties>"#;

/// Inline content of a paragraph built with [`DocxBuilder::linked_paragraph`]
pub enum Span<'a> {
    Text(&'a str),
    /// Relationship id, display text
    Link(&'a str, &'a str),
    /// Bookmark name, display text
    Anchor(&'a str, &'a str),
}

/// Builds a minimal WordprocessingML package body by body element
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    /// Extra external relationships of the main document part
    links: Vec<(String, String)>,
    without_core: bool,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(self, level: u8, text: &str) -> Self {
        self.styled(&format!("Heading{level}"), text)
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body
            .push_str(&format!("<w:p>{}</w:p>", run(text)));
        self
    }

    pub fn styled(mut self, style_id: &str, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{style_id}"/></w:pPr>{}</w:p>"#,
            run(text)
        ));
        self
    }

    /// A paragraph mixing plain runs with `w:hyperlink` elements
    pub fn linked_paragraph(mut self, spans: &[Span<'_>]) -> Self {
        self.body.push_str("<w:p>");
        for span in spans {
            let xml = match span {
                Span::Text(text) => run(text),
                Span::Link(id, text) => {
                    format!(r#"<w:hyperlink r:id="{id}" w:history="1">{}</w:hyperlink>"#, run(text))
                }
                Span::Anchor(name, text) => {
                    format!(r#"<w:hyperlink w:anchor="{name}" w:history="1">{}</w:hyperlink>"#, run(text))
                }
            };
            self.body.push_str(&xml);
        }
        self.body.push_str("</w:p>");
        self
    }

    /// Register an external hyperlink relationship
    pub fn external_link(mut self, id: &str, target: &str) -> Self {
        self.links.push((id.to_string(), target.to_string()));
        self
    }

    /// A body-level bookmark, outside any paragraph
    pub fn bookmark(mut self, name: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:bookmarkStart w:id="0" w:name="{name}"/><w:bookmarkEnd w:id="0"/>"#
        ));
        self
    }

    pub fn control(self, number: u32, applicability: &str) -> Self {
        self.paragraph(&format!(
            "Security Control: {number}; Revision: 1; Updated: Jan 2020; Applicability: {applicability}"
        ))
    }

    pub fn table(mut self, style_id: Option<&str>, rows: &[&[&str]]) -> Self {
        let columns = rows.first().map_or(1, |row| row.len());
        let style = style_id
            .map(|id| format!(r#"<w:tblStyle w:val="{id}"/>"#))
            .unwrap_or_default();
        let grid = r#"<w:gridCol w:w="2000"/>"#.repeat(columns);

        self.body
            .push_str(&format!("<w:tbl><w:tblPr>{style}</w:tblPr><w:tblGrid>{grid}</w:tblGrid>"));
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in *row {
                self.body
                    .push_str(&format!("<w:tc><w:p>{}</w:p></w:tc>", run(cell)));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    pub fn without_core_properties(mut self) -> Self {
        self.without_core = true;
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.body
        )
    }

    pub fn document_rels(&self) -> String {
        let links: String = self
            .links
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{id}" Type="{HYPERLINK_TYPE}" Target="{target}" TargetMode="External"/>"#
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{STYLES_RELATIONSHIP}{links}</Relationships>"#
        )
    }

    /// Write the package to `dir/name` and return its path
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let document = self.document_xml();
        let rels = self.document_rels();
        let mut parts = vec![
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/document.xml", document.as_str()),
            ("word/_rels/document.xml.rels", rels.as_str()),
            ("word/styles.xml", STYLES),
        ];
        if !self.without_core {
            parts.push(("docProps/core.xml", CORE));
        }

        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        path
    }
}

fn run(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(r#"<w:r><w:t xml:space="preserve">{escaped}</w:t></w:r>"#)
}

/// A three-level document with one control under each of two subsections
pub fn sample_ism() -> DocxBuilder {
    DocxBuilder::new()
        .styled("TOC1", "Guidelines for Cyber Security Roles\t1")
        .heading(1, "Guidelines for Cyber Security Roles")
        .heading(2, "Chief Information Security Officer")
        .heading(3, "Providing cyber security leadership")
        .control(714, "O, P, S, TS")
        .paragraph("A CISO is appointed to provide cyber security leadership & guidance.")
        .styled("Bullets1", "oversight of cyber security")
        .heading(3, "Overseeing the cyber security program")
        .control(1478, "O,S")
        .table(Some("TableGrid"), &[&["Role", "Owner"], &["CISO", "Executive"]])
}
