//! Table extraction
//!
//! This module extracts the cell text of Word tables row by row. Merged
//! cells are not modelled: each `w:tc` becomes one cell.

use super::super::models::TableRows;
use super::formatting::extract_paragraph_text;

/// Extract cell text from a docx-rs Table, preserving row and cell order
pub(crate) fn extract_table_rows(table: &docx_rs::Table) -> TableRows {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;

            // A cell's text is its paragraphs joined by newlines
            let paragraphs: Vec<String> = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        Some(extract_paragraph_text(para))
                    }
                    _ => None,
                })
                .collect();

            row_cells.push(paragraphs.join("\n"));
        }

        rows.push(row_cells);
    }

    rows
}
