//! Error types for the conversion pipeline.
//!
//! Every variant here is fatal for the current run: the converter is a one-shot batch tool,
//! so nothing is retried and no partial output is written.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a document or building its tree.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input path does not exist or is not a regular file.
    #[error("{} is not a file", .0.display())]
    InputNotFound(PathBuf),

    /// The file exists but cannot be read as a .docx package.
    #[error("{} is not a valid docx file: {reason}", .path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    /// A paragraph tagged as a security control did not match the control pattern.
    #[error("malformed security control: {0:?}")]
    MalformedControl(String),

    /// The document body contains an element kind the builder has no rule for.
    #[error("document contains unhandled element: {0}")]
    UnhandledBlockKind(String),

    /// Content appeared before any heading opened a container for it.
    #[error("no enclosing container for {kind}: {text:?}")]
    NoEnclosingContainer { kind: &'static str, text: String },

    /// A heading skipped a level of the Heading 1 → Heading 2 → Heading 3 hierarchy.
    #[error("{style} {text:?} has no enclosing {expected}")]
    MalformedHierarchy {
        style: &'static str,
        expected: &'static str,
        text: String,
    },

    /// A hyperlink references a relationship id that cannot be resolved.
    #[error("unresolved relationship id: {0}")]
    UnresolvedRelationship(String),
}

impl ConvertError {
    /// Build an [`ConvertError::InvalidDocument`] from any displayable cause.
    pub fn invalid_document(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ConvertError::InvalidDocument {
            path: path.into(),
            reason: format!("{reason:#}"),
        }
    }
}
