//! Body element extraction
//!
//! Converts docx-rs paragraph and table nodes into the crate's block models.

pub(crate) mod formatting;
pub(crate) mod table;
