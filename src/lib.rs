//! ism-oscal: convert ISM .docx documents into OSCAL-flavoured XML
//!
//! This library reads the Australian Government Information Security Manual from
//! its Word form, rebuilds the title/section/subsection/control hierarchy implied by
//! paragraph styles, and derives a per-classification baseline catalog of control
//! numbers. A second pipeline turns that catalog into metadata-only profile stubs.
//!
//! ```no_run
//! use ism_oscal::{ConvertOptions, convert, load_document, to_xml_string};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = load_document(Path::new("ism.docx"))?;
//! let conversion = convert(&document, &ConvertOptions::default())?;
//! let xml = to_xml_string(&conversion.tree, true)?;
//! let catalog = conversion.baselines.to_json()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod ism;

pub use config::Config;
pub use document::{SourceDocument, load_document};
pub use error::ConvertError;
pub use export::{build_profiles, to_xml_string};
pub use ism::{Baselines, Conversion, ConvertOptions, LinkStyle, Tier, convert};
