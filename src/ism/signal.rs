//! Block classification
//!
//! Each block item is classified once into a [`BlockSignal`] from its style name or text
//! prefix; the tree builder then matches on the signal exhaustively.

use crate::document::{BlockItem, Paragraph, Table};

use super::control::CONTROL_PREFIX;

pub const HEADING_1: &str = "Heading 1";
pub const HEADING_2: &str = "Heading 2";
pub const HEADING_3: &str = "Heading 3";
pub const TABLE_GRID: &str = "Table Grid";
const TOC_PREFIX: &str = "toc";
const BULLETS_PREFIX: &str = "Bullets";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockSignal<'a> {
    Heading1(&'a Paragraph),
    Heading2(&'a Paragraph),
    Heading3(&'a Paragraph),
    TocEntry,
    TableGrid(&'a Table),
    Bullet(&'a Paragraph),
    ControlStart(&'a Paragraph),
    PlainParagraph(&'a Paragraph),
    /// A table with any style other than `Table Grid`
    Table(&'a Table),
}

impl<'a> BlockSignal<'a> {
    pub fn classify(block: &'a BlockItem) -> Self {
        match block {
            BlockItem::Table(table) if table.style == TABLE_GRID => BlockSignal::TableGrid(table),
            BlockItem::Table(table) => BlockSignal::Table(table),
            BlockItem::Paragraph(para) => Self::classify_paragraph(para),
        }
    }

    fn classify_paragraph(para: &'a Paragraph) -> Self {
        match para.style.as_str() {
            HEADING_1 => BlockSignal::Heading1(para),
            HEADING_2 => BlockSignal::Heading2(para),
            HEADING_3 => BlockSignal::Heading3(para),
            style if style.starts_with(TOC_PREFIX) => BlockSignal::TocEntry,
            style if style.starts_with(BULLETS_PREFIX) => BlockSignal::Bullet(para),
            _ if para.text().starts_with(CONTROL_PREFIX) => BlockSignal::ControlStart(para),
            _ => BlockSignal::PlainParagraph(para),
        }
    }
}
