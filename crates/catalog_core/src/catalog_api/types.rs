use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::numbers::parse_price;
use crate::section::SectionKind;

use super::error::{CoreError, CoreErrorCode};

pub const DEFAULT_BASE_IMAGE_URL: &str = "assets/img/";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DOCUMENT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentConfig {
    pub base_image_url: String,
    pub currency: String,
    pub version: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            base_image_url: DEFAULT_BASE_IMAGE_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }
}

/// One catalog item. Every field is optional at load time; the renderer
/// decides what a record needs in order to be displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_stats",
        skip_serializing_if = "Option::is_none"
    )]
    pub stats: Option<JsonMap<String, JsonValue>>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_percentage: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability: Option<String>,
}

impl EntityRecord {
    /// Display name, if the record has a non-blank one.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    pub fn stat(&self, key: &str) -> Option<&JsonValue> {
        self.stats.as_ref().and_then(|stats| stats.get(key))
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_text))
}

/// Text fields accept strings and numbers; anything else counts as absent.
pub fn coerce_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_stats<'de, D>(deserializer: D) -> Result<Option<JsonMap<String, JsonValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::Object(map)) => Some(map),
        _ => None,
    })
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(parse_price(value.as_ref()))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCategory {
    pub name: String,
    pub records: Vec<EntityRecord>,
}

/// Ordered mapping of sub-category name to records. Serialized as a JSON
/// object whose key order is the sub-category order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    subcategories: Vec<SubCategory>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sub-category, or replaces the records of an existing one in
    /// place.
    pub fn insert(&mut self, name: impl Into<String>, records: Vec<EntityRecord>) {
        let name = name.into();
        if let Some(existing) = self.subcategories.iter_mut().find(|s| s.name == name) {
            existing.records = records;
            return;
        }
        self.subcategories.push(SubCategory { name, records });
    }

    pub fn get(&self, name: &str) -> Option<&[EntityRecord]> {
        self.subcategories
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.records.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubCategory> {
        self.subcategories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subcategories.iter().map(|s| s.name.as_str())
    }

    pub fn first_subcategory(&self) -> Option<&str> {
        self.subcategories.first().map(|s| s.name.as_str())
    }

    pub fn record_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.records.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.subcategories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty()
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.subcategories.len()))?;
        for sub in &self.subcategories {
            map.serialize_entry(&sub.name, &sub.records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SectionVisitor)
    }
}

struct SectionVisitor;

impl<'de> Visitor<'de> for SectionVisitor {
    type Value = Section;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping sub-category names to record arrays")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut section = Section::new();
        while let Some(name) = access.next_key::<String>()? {
            let raw_records: Vec<JsonValue> = access.next_value().map_err(|err| {
                de::Error::custom(format!("sub-category '{name}': {err}"))
            })?;
            // A record that is not an object stays in place as an empty
            // record so that positions are preserved; rendering skips it.
            let records = raw_records
                .into_iter()
                .map(|raw| serde_json::from_value(raw).unwrap_or_default())
                .collect();
            section.insert(name, records);
        }
        Ok(section)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DocumentConfig>,
    #[serde(default)]
    pub vehicles: Section,
    #[serde(default)]
    pub weapons: Section,
    #[serde(default)]
    pub blackmarket: Section,
    #[serde(default)]
    pub services: Section,
}

impl CatalogDocument {
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse catalog document: {e}"),
            )
        })
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse catalog document: {e}"),
            )
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to serialize catalog document: {e}"),
            )
        })
    }

    pub fn section(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Vehicles => &self.vehicles,
            SectionKind::Weapons => &self.weapons,
            SectionKind::Blackmarket => &self.blackmarket,
            SectionKind::Services => &self.services,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Section {
        match kind {
            SectionKind::Vehicles => &mut self.vehicles,
            SectionKind::Weapons => &mut self.weapons,
            SectionKind::Blackmarket => &mut self.blackmarket,
            SectionKind::Services => &mut self.services,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &Section)> {
        SectionKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.section(kind)))
    }

    pub fn base_image_url(&self) -> &str {
        self.config
            .as_ref()
            .map(|c| c.base_image_url.as_str())
            .unwrap_or(DEFAULT_BASE_IMAGE_URL)
    }

    pub fn currency(&self) -> &str {
        self.config
            .as_ref()
            .map(|c| c.currency.as_str())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn record_count(&self) -> usize {
        self.sections().map(|(_, s)| s.record_count()).sum()
    }
}
