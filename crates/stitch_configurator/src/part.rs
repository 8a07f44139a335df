//! Optional wallet parts

use crate::error::ConfigError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Node name of the wallet body; always visible, never bound to a part
pub const ANCHOR_NODE: &str = "BACK_PANEL";

/// A part the customer can add to the wallet
///
/// The string form doubles as the scene node name and as the drag-and-drop
/// payload, and is case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartId {
    #[serde(rename = "CARD_HOLDER_1")]
    CardHolder1,
    #[serde(rename = "CARD_HOLDER_2")]
    CardHolder2,
    #[serde(rename = "CARD_HOLDER_3")]
    CardHolder3,
    #[serde(rename = "CARD_HOLDER_4")]
    CardHolder4,
    #[serde(rename = "MONEY_POCKET")]
    MoneyPocket,
}

impl PartId {
    /// Catalog order
    pub const ALL: [PartId; 5] = [
        PartId::CardHolder1,
        PartId::CardHolder2,
        PartId::CardHolder3,
        PartId::CardHolder4,
        PartId::MoneyPocket,
    ];

    /// Name of the scene node carrying this part
    pub fn node_name(self) -> &'static str {
        match self {
            PartId::CardHolder1 => "CARD_HOLDER_1",
            PartId::CardHolder2 => "CARD_HOLDER_2",
            PartId::CardHolder3 => "CARD_HOLDER_3",
            PartId::CardHolder4 => "CARD_HOLDER_4",
            PartId::MoneyPocket => "MONEY_POCKET",
        }
    }

    /// Localisation key for the part's display name
    pub fn label_key(self) -> String {
        format!("parts.{}", self.node_name())
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

impl FromStr for PartId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartId::ALL
            .into_iter()
            .find(|part| part.node_name() == s)
            .ok_or_else(|| ConfigError::UnknownPart(s.to_string()))
    }
}

/// Which parts are switched on
///
/// Absent entries read as disabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnabledParts {
    map: FxHashMap<PartId, bool>,
}

impl EnabledParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, part: PartId) -> bool {
        self.map.get(&part).copied().unwrap_or(false)
    }

    /// Raw entry, None if the part was never touched
    pub fn get(&self, part: PartId) -> Option<bool> {
        self.map.get(&part).copied()
    }

    /// Set a part; returns the previous effective value
    pub fn set(&mut self, part: PartId, enabled: bool) -> bool {
        self.map.insert(part, enabled).unwrap_or(false)
    }

    /// Flip a part; returns the new value
    pub fn toggle(&mut self, part: PartId) -> bool {
        let next = !self.is_enabled(part);
        self.map.insert(part, next);
        next
    }

    /// Enabled parts in catalog order
    pub fn enabled_list(&self) -> SmallVec<[PartId; 5]> {
        PartId::ALL
            .into_iter()
            .filter(|part| self.is_enabled(*part))
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.map.values().filter(|on| **on).count()
    }

    pub fn any_enabled(&self) -> bool {
        self.map.values().any(|on| *on)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
