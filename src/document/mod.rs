//! Document reading module
//!
//! This module reads Microsoft Word (.docx) packages into the ordered block
//! sequence, relationship table and timestamps the converter works from.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub(crate) mod package;
pub(crate) mod parsing;

pub use loader::load_document;
pub use models::*;
