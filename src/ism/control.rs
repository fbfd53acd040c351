//! Security control field extraction
//!
//! A control paragraph reads
//! `Security Control: <number>; Revision: <revision>; Updated: <date>; Applicability: <codes>`.
//! Its fields end up as attributes of the `<control>` element and drive the baseline catalog.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::catalog::Tier;
use crate::error::ConvertError;

/// Text prefix that marks a paragraph as a security control
pub const CONTROL_PREFIX: &str = "Security Control:";

static CONTROL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Security Control: ([0-9]+); Revision: ([0-9]+); Updated: ([^;]+); Applicability: (.*)$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub number: String,
    pub revision: String,
    pub update: String,
    /// Tier codes in the order they were listed
    pub applicability: Vec<String>,
}

impl Control {
    pub fn applies_to(&self, tier: Tier) -> bool {
        self.applicability.iter().any(|code| code == tier.code())
    }

    pub fn official(&self) -> bool {
        self.applies_to(Tier::Official)
    }

    pub fn protected(&self) -> bool {
        self.applies_to(Tier::Protected)
    }

    pub fn secret(&self) -> bool {
        self.applies_to(Tier::Secret)
    }

    pub fn top_secret(&self) -> bool {
        self.applies_to(Tier::TopSecret)
    }

    /// Attributes of the `<control>` element, in output order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("number", self.number.clone()),
            ("revision", self.revision.clone()),
            ("update", self.update.clone()),
        ];
        attributes.extend(
            Tier::ALL
                .into_iter()
                .map(|tier| (tier.key(), self.applies_to(tier).to_string())),
        );
        attributes
    }
}

impl FromStr for Control {
    type Err = ConvertError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.replace('\n', " ");
        let text = text.trim();
        let captures = CONTROL_PATTERN
            .captures(text)
            .ok_or_else(|| ConvertError::MalformedControl(text.to_string()))?;

        let applicability = captures[4]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .split(',')
            .map(str::to_string)
            .collect();

        Ok(Control {
            number: captures[1].to_string(),
            revision: captures[2].to_string(),
            update: captures[3].to_string(),
            applicability,
        })
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Security Control: {}; Revision: {}; Updated: {}; Applicability: {}",
            self.number,
            self.revision,
            self.update,
            self.applicability.join(", ")
        )
    }
}
