//! The `<metadata>` block at the top of the `ism` element

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::tree::{NodeId, XmlTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub uuid: Uuid,
    /// `2020-06-15T03:11:00.000+10:00`
    pub modified: String,
    /// `2020-06-15`
    pub version: String,
    /// `June 2020`
    pub acsc_version: String,
}

impl DocumentMetadata {
    /// Derive the metadata from the source document's last-modified time
    pub fn from_modified(modified: NaiveDateTime, utc_offset: &str) -> Self {
        DocumentMetadata {
            uuid: Uuid::new_v4(),
            modified: format!("{}.000{utc_offset}", modified.format("%Y-%m-%dT%H:%M:%S")),
            version: modified.format("%Y-%m-%d").to_string(),
            acsc_version: modified.format("%B %Y").to_string(),
        }
    }

    pub fn append_to(&self, tree: &mut XmlTree, parent: NodeId) -> NodeId {
        let meta = tree.append(parent, "metadata");
        tree.set_attribute(meta, "uuid", self.uuid.to_string());
        tree.append_text(meta, "modified", self.modified.as_str());
        tree.append_text(meta, "version", self.version.as_str());
        tree.append_text(meta, "acsc_version", self.acsc_version.as_str());
        meta
    }
}
