//! Relationship and link-target resolution
//!
//! Every distinct relationship target gets one UUID; relationships that point at the same
//! target share it. External targets are what hyperlinks refer to in OSCAL mode and what
//! the back-matter lists.

use indexmap::IndexMap;
use std::collections::HashMap;
use uuid::Uuid;

use crate::document::{LinkTarget, Relationship};
use crate::error::ConvertError;

/// How hyperlink `href`s are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// The raw relationship target
    #[default]
    Plain,
    /// `#<uuid>` pointing at a back-matter resource
    Oscal,
}

/// A back-matter resource: one distinct external target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub uuid: Uuid,
    pub href: String,
}

#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    relationships: HashMap<String, Relationship>,
    /// (is external, target) → uuid, in first-seen order
    targets: IndexMap<(bool, String), Uuid>,
    /// relationship id → uuid, external relationships only
    external_ids: HashMap<String, Uuid>,
}

impl LinkResolver {
    /// Scan the relationship table once, minting one UUID per distinct target
    pub fn new(relationships: &[Relationship]) -> Self {
        Self::with_generator(relationships, Uuid::new_v4)
    }

    pub fn with_generator(relationships: &[Relationship], mut mint: impl FnMut() -> Uuid) -> Self {
        let mut resolver = LinkResolver::default();

        for rel in relationships {
            let uuid = *resolver
                .targets
                .entry((rel.external, rel.target.clone()))
                .or_insert_with(&mut mint);
            if rel.external {
                resolver.external_ids.insert(rel.id.clone(), uuid);
            }
            resolver.relationships.insert(rel.id.clone(), rel.clone());
        }

        log::debug!(
            "resolved {} relationships to {} distinct targets",
            resolver.relationships.len(),
            resolver.targets.len()
        );
        resolver
    }

    /// UUID of an external relationship
    pub fn uuid_for(&self, relationship_id: &str) -> Option<Uuid> {
        self.external_ids.get(relationship_id).copied()
    }

    /// Resolve a hyperlink target into the `href` attribute value
    pub fn href(&self, target: &LinkTarget, style: LinkStyle) -> Result<String, ConvertError> {
        match target {
            LinkTarget::Anchor(anchor) => Ok(format!("#{anchor}")),
            LinkTarget::Relationship(id) => match style {
                LinkStyle::Oscal => self
                    .uuid_for(id)
                    .map(|uuid| format!("#{uuid}"))
                    .ok_or_else(|| ConvertError::UnresolvedRelationship(id.clone())),
                LinkStyle::Plain => self
                    .relationships
                    .get(id)
                    .map(|rel| rel.target.clone())
                    .ok_or_else(|| ConvertError::UnresolvedRelationship(id.clone())),
            },
        }
    }

    /// Distinct external targets in first-seen order
    pub fn resources(&self) -> Vec<Resource> {
        self.targets
            .iter()
            .filter(|((external, _), _)| *external)
            .map(|((_, target), uuid)| Resource {
                uuid: *uuid,
                href: target.clone(),
            })
            .collect()
    }
}
