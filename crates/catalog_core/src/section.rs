use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog_api::{CoreError, CoreErrorCode};

/// Top-level catalog grouping. Declaration order is the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Vehicles,
    Weapons,
    Blackmarket,
    Services,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Vehicles,
        SectionKind::Weapons,
        SectionKind::Blackmarket,
        SectionKind::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Vehicles => "vehicles",
            Self::Weapons => "weapons",
            Self::Blackmarket => "blackmarket",
            Self::Services => "services",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SECTION_LIST: &str = "vehicles, weapons, blackmarket, services";

impl FromStr for SectionKind {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::from_key(&normalized).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::UnknownSection,
                format!("unknown section '{raw}'; expected one of: {SECTION_LIST}"),
            )
        })
    }
}

/// Rendering variant of a record, resolved from where it sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Vehicle,
    Weapon,
    BlackmarketItem,
    Drug,
    Service,
}

pub const DRUGS_SUBCATEGORY: &str = "drugs";

impl EntityKind {
    pub fn resolve(section: SectionKind, subcategory: &str) -> Self {
        match section {
            SectionKind::Vehicles => Self::Vehicle,
            SectionKind::Weapons => Self::Weapon,
            SectionKind::Blackmarket if subcategory == DRUGS_SUBCATEGORY => Self::Drug,
            SectionKind::Blackmarket => Self::BlackmarketItem,
            SectionKind::Services => Self::Service,
        }
    }
}
