//! Classification tiers and the baseline catalog
//!
//! The catalog maps every tier to the control numbers applicable to it, in
//! document order. Controls are appended unconditionally, so a number that
//! appears twice in a document is listed twice.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::control::Control;

/// Government information-classification tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Official,
    Protected,
    Secret,
    TopSecret,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Official, Tier::Protected, Tier::Secret, Tier::TopSecret];

    /// Applicability code used in control paragraphs
    pub fn code(self) -> &'static str {
        match self {
            Tier::Official => "O",
            Tier::Protected => "P",
            Tier::Secret => "S",
            Tier::TopSecret => "TS",
        }
    }

    /// Catalog key and control attribute name
    pub fn key(self) -> &'static str {
        match self {
            Tier::Official => "official",
            Tier::Protected => "protected",
            Tier::Secret => "secret",
            Tier::TopSecret => "top_secret",
        }
    }

    /// Human-readable name used in profile titles
    pub fn title(self) -> &'static str {
        match self {
            Tier::Official => "Official",
            Tier::Protected => "Protected",
            Tier::Secret => "Secret",
            Tier::TopSecret => "Top Secret",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub controls: Vec<String>,
}

/// Control numbers per tier, serialized as
/// `{"official":{"controls":[..]},"protected":..,"secret":..,"top_secret":..}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baselines {
    pub official: Baseline,
    pub protected: Baseline,
    pub secret: Baseline,
    pub top_secret: Baseline,
}

impl Baselines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the control's number to every tier it applies to
    pub fn record(&mut self, control: &Control) {
        for tier in Tier::ALL {
            if control.applies_to(tier) {
                self.get_mut(tier).controls.push(control.number.clone());
            }
        }
    }

    pub fn get(&self, tier: Tier) -> &Baseline {
        match tier {
            Tier::Official => &self.official,
            Tier::Protected => &self.protected,
            Tier::Secret => &self.secret,
            Tier::TopSecret => &self.top_secret,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut Baseline {
        match tier {
            Tier::Official => &mut self.official,
            Tier::Protected => &mut self.protected,
            Tier::Secret => &mut self.secret,
            Tier::TopSecret => &mut self.top_secret,
        }
    }

    /// Tiers with their baselines, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &Baseline)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a catalog previously written by the parser
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("{} is not a baseline catalog", path.display()))
    }
}
