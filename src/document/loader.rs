//! Document loading and orchestration
//!
//! This module contains `load_document()`, which validates a .docx file, reads its body with
//! docx-rs and its package metadata with quick-xml, and flattens both into a [`SourceDocument`].

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::Path;

use crate::error::ConvertError;

use super::io::validate_docx_file;
use super::models::*;
use super::package::{PackageParts, read_package};
use super::parsing::formatting::extract_inline_children;
use super::parsing::table::extract_table_rows;

/// Load a .docx file into block items, relationships and its last-modified time
///
/// Fails with [`ConvertError::InputNotFound`] when the path is not a file,
/// [`ConvertError::InvalidDocument`] when the package cannot be read, and
/// [`ConvertError::UnhandledBlockKind`] when the body holds something other
/// than paragraphs and tables.
pub fn load_document(file_path: &Path) -> Result<SourceDocument> {
    if !file_path.is_file() {
        return Err(ConvertError::InputNotFound(file_path.to_path_buf()).into());
    }

    // Validate file type before attempting to parse
    validate_docx_file(file_path).map_err(|err| ConvertError::invalid_document(file_path, err))?;

    let file_data = std::fs::read(file_path)?;
    let docx = docx_rs::read_docx(&file_data)
        .map_err(|err| ConvertError::invalid_document(file_path, err))?;
    let package =
        read_package(file_path).map_err(|err| ConvertError::invalid_document(file_path, err))?;

    let blocks = collect_blocks(&docx.document.children, &package)?;
    log::info!(
        "read {} block items and {} relationships from {}",
        blocks.len(),
        package.relationships.len(),
        file_path.display()
    );

    let modified = match package.modified {
        Some(modified) => modified,
        None => {
            log::warn!(
                "{} has no core modified time, using the file modification time",
                file_path.display()
            );
            file_modified_time(file_path)?
        }
    };

    Ok(SourceDocument {
        blocks,
        relationships: package.relationships,
        modified,
    })
}

fn collect_blocks(
    children: &[docx_rs::DocumentChild],
    package: &PackageParts,
) -> Result<Vec<BlockItem>, ConvertError> {
    let mut blocks = Vec::with_capacity(children.len());
    let mut table_index = 0;

    for child in children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let style_id = para.property.style.as_ref().map(|s| s.val.as_str());
                blocks.push(BlockItem::Paragraph(Paragraph {
                    style: package.styles.paragraph_style(style_id),
                    children: extract_inline_children(para),
                }));
            }
            docx_rs::DocumentChild::Table(table) => {
                // docx-rs keeps the table style private, so pair tables with the
                // styles scanned from document.xml by position
                let style_id = package
                    .table_styles
                    .get(table_index)
                    .and_then(|style| style.as_deref());
                table_index += 1;

                blocks.push(BlockItem::Table(Table {
                    style: package.styles.table_style(style_id),
                    rows: extract_table_rows(table),
                }));
            }
            other => {
                return Err(ConvertError::UnhandledBlockKind(describe_child(other)));
            }
        }
    }

    Ok(blocks)
}

/// Variant name of a body child, e.g. `BookmarkStart`
fn describe_child(child: &docx_rs::DocumentChild) -> String {
    let debug = format!("{child:?}");
    debug
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or("unknown")
        .to_string()
}

fn file_modified_time(file_path: &Path) -> Result<NaiveDateTime> {
    let modified = std::fs::metadata(file_path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified).naive_utc())
}
