//! Profile stubs: one metadata-only `<profile>` document per tier

use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

use crate::ism::builder::OSCAL_NAMESPACE;
use crate::ism::catalog::{Baselines, Tier};
use crate::ism::tree::XmlTree;

pub const OSCAL_VERSION: &str = "1.0.0";
pub const DEFAULT_PROFILE_VERSION: &str = "ism-oscal1.0.0";

/// `2021-03-04T09:15:00.000+1100`
pub fn published_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y-%m-%dT%H:%M:%S.000%z").to_string()
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub tier: Tier,
    pub tree: XmlTree,
}

pub fn build_profile(tier: Tier, published: &str, version: &str) -> Profile {
    let mut tree = XmlTree::new("profile");
    let root = tree.root();
    tree.set_attribute(root, "xmlns", OSCAL_NAMESPACE);
    tree.set_attribute(root, "uuid", Uuid::new_v4().to_string());

    let meta = tree.append(root, "metadata");
    tree.append_text(meta, "title", format!("ISM {} Baseline", tier.title()));
    tree.append_text(meta, "published", published);
    tree.append_text(meta, "last-modified", published);
    tree.append_text(meta, "version", version);
    tree.append_text(meta, "oscal-version", OSCAL_VERSION);

    Profile { tier, tree }
}

/// One profile per tier in catalog order, all sharing the same publication time
pub fn build_profiles(baselines: &Baselines, version: &str) -> Vec<Profile> {
    let published = published_timestamp(&Local::now());
    baselines
        .iter()
        .map(|(tier, baseline)| {
            log::debug!("{tier}: {} controls", baseline.controls.len());
            build_profile(tier, &published, version)
        })
        .collect()
}
