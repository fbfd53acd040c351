//! ISM document conversion
//!
//! Turns a loaded [`SourceDocument`](crate::document::SourceDocument) into the
//! `root`/`ism` element tree and the baseline catalog in a single pass.

pub mod builder;
pub mod catalog;
pub mod control;
pub(crate) mod hyperlink;
pub mod links;
pub mod metadata;
pub mod signal;
pub(crate) mod table;
pub mod tree;

pub use builder::{Conversion, ConvertOptions, OSCAL_NAMESPACE, TreeBuilder, convert};
pub use catalog::{Baseline, Baselines, Tier};
pub use control::Control;
pub use links::{LinkResolver, LinkStyle};
pub use signal::BlockSignal;
pub use tree::{Element, NodeId, XmlTree};
