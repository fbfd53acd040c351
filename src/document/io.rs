//! File I/O operations and validation
//!
//! This module handles file validation and raw access to parts of the .docx package.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    // Check file extension
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        bail!("expected a .docx file, got .{extension}");
    }

    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        if archive.by_name("xl/workbook.xml").is_ok() {
            bail!("this appears to be an Excel file (.xlsx), not a Word document");
        }

        bail!("missing word/document.xml");
    }

    Ok(())
}

/// Read a package part as UTF-8, returning `None` when the part is absent
pub(crate) fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<Option<String>> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("failed to open {name}")),
    };

    let mut content = String::new();
    part.read_to_string(&mut content)
        .with_context(|| format!("failed to read {name}"))?;
    Ok(Some(content))
}
