//! Core data structures for the document reader
//!
//! This module defines the block-level view of a .docx body that the converter consumes:
//! paragraphs with their style names and inline children, tables with their cell text, and
//! the package relationship table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Type aliases for convenience
pub type TableRows = Vec<Vec<String>>;

/// A .docx document flattened into what the converter needs
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Body items in document order
    pub blocks: Vec<BlockItem>,
    /// Every relationship of the main document part, in package order
    pub relationships: Vec<Relationship>,
    /// Last-modified time of the source document (UTC, naive)
    pub modified: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockItem {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Resolved style display name, e.g. `Heading 1`
    pub style: String,
    pub children: Vec<Inline>,
}

/// Run-level content of a paragraph, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Run(String),
    Hyperlink(Hyperlink),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub target: LinkTarget,
    /// Text of the runs nested inside the hyperlink
    pub fragments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    /// Relationship id resolved through the relationship table
    Relationship(String),
    /// Bookmark inside the same document
    Anchor(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Resolved table style display name, e.g. `Table Grid`
    pub style: String,
    pub rows: TableRows,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub target: String,
    pub external: bool,
}

impl Paragraph {
    pub fn new(style: impl Into<String>) -> Self {
        Paragraph {
            style: style.into(),
            children: Vec::new(),
        }
    }

    pub fn with_run(mut self, text: impl Into<String>) -> Self {
        self.children.push(Inline::Run(text.into()));
        self
    }

    pub fn with_hyperlink(mut self, target: LinkTarget, text: impl Into<String>) -> Self {
        self.children.push(Inline::Hyperlink(Hyperlink {
            target,
            fragments: vec![text.into()],
        }));
        self
    }

    /// Concatenated text of runs and hyperlink fragments
    pub fn text(&self) -> String {
        self.children.iter().map(Inline::text).collect()
    }
}

impl Inline {
    pub fn text(&self) -> String {
        match self {
            Inline::Run(text) => text.clone(),
            Inline::Hyperlink(link) => link.text(),
        }
    }
}

impl Hyperlink {
    pub fn text(&self) -> String {
        self.fragments.concat()
    }
}

impl Table {
    pub fn new(style: impl Into<String>, rows: TableRows) -> Self {
        Table {
            style: style.into(),
            rows,
        }
    }
}

impl Relationship {
    pub fn external(id: impl Into<String>, target: impl Into<String>) -> Self {
        Relationship {
            id: id.into(),
            target: target.into(),
            external: true,
        }
    }

    pub fn internal(id: impl Into<String>, target: impl Into<String>) -> Self {
        Relationship {
            id: id.into(),
            target: target.into(),
            external: false,
        }
    }
}
