//! Legacy catalog → normalized [`CatalogDocument`].
//!
//! The legacy shape has the same four sections, but records carry
//! currency-formatted prices, mixed-case stat keys and no ids. Conversion is
//! a developer-run migration step: structural problems (a missing section, a
//! sub-category that is not an array) abort it, while missing optional
//! record fields never do.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, info};

use crate::catalog_api::{
    CatalogDocument, CoreError, CoreErrorCode, DocumentConfig, EntityRecord, Section, coerce_text,
};
use crate::inference::infer_category;
use crate::numbers::{extract_number, parse_price};
use crate::section::{DRUGS_SUBCATEGORY, SectionKind};

pub const AVAILABILITY_AVAILABLE: &str = "available";
const LEGACY_IMAGE_PREFIX: &str = "assets/img/";
const VEHICLE_STAT_KEYS: [&str; 4] = ["vitesse", "acceleration", "freinage", "maniabilite"];

/// A record whose category came from the fallback rather than a name match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackCategory {
    pub section: SectionKind,
    pub subcategory: String,
    pub id: String,
    pub name: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub records: usize,
    pub fallback_categories: Vec<FallbackCategory>,
}

/// Stateful converter. Id counters live as long as the converter, so ids
/// stay unique across several `convert` calls on the same instance.
#[derive(Debug, Default)]
pub struct Converter {
    counters: BTreeMap<(SectionKind, String), u32>,
    report: ConversionReport,
}

pub fn id_prefix(section: SectionKind, subcategory: &str) -> &str {
    match (section, subcategory) {
        (SectionKind::Weapons, "pistols") => "pistol",
        (SectionKind::Weapons, "rifles") => "rifle",
        (SectionKind::Weapons, "explosives") => "explosive",
        (SectionKind::Blackmarket, "drugs") => "drug",
        (SectionKind::Blackmarket, "contraband") => "contraband",
        (SectionKind::Blackmarket, "documents") => "document",
        (SectionKind::Services, "laundering") => "service",
        _ => subcategory,
    }
}

/// One-shot conversion with a fresh [`Converter`].
pub fn convert(legacy: &JsonValue) -> Result<(CatalogDocument, ConversionReport), CoreError> {
    let mut converter = Converter::new();
    let document = converter.convert(legacy)?;
    Ok((document, converter.into_report()))
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> &ConversionReport {
        &self.report
    }

    pub fn into_report(self) -> ConversionReport {
        self.report
    }

    pub fn convert_str(&mut self, text: &str) -> Result<CatalogDocument, CoreError> {
        let legacy: JsonValue = serde_json::from_str(text).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse legacy catalog: {e}"),
            )
        })?;
        self.convert(&legacy)
    }

    pub fn convert(&mut self, legacy: &JsonValue) -> Result<CatalogDocument, CoreError> {
        let mut document = CatalogDocument {
            config: Some(DocumentConfig::default()),
            ..CatalogDocument::default()
        };

        for kind in SectionKind::ALL {
            let legacy_section = legacy_section(legacy, kind)?;
            let mut section = Section::new();
            for (subcategory, raw_records) in legacy_section {
                let raw_records = raw_records.as_array().ok_or_else(|| {
                    CoreError::new(
                        CoreErrorCode::Parse,
                        format!("{kind}.{subcategory} must be an array of records"),
                    )
                })?;
                let records = raw_records
                    .iter()
                    .map(|raw| self.convert_record(kind, subcategory, raw))
                    .collect();
                section.insert(subcategory.as_str(), records);
            }
            *document.section_mut(kind) = section;
        }

        info!(
            records = self.report.records,
            fallback_categories = self.report.fallback_categories.len(),
            "legacy catalog converted"
        );
        Ok(document)
    }

    /// Next id for the pair: `<prefix>_<NNN>`, counting from 1.
    pub fn generate_id(&mut self, section: SectionKind, subcategory: &str) -> String {
        let counter = self
            .counters
            .entry((section, subcategory.to_string()))
            .or_insert(1);
        let id = format!("{}_{:03}", id_prefix(section, subcategory), *counter);
        *counter += 1;
        id
    }

    fn convert_record(
        &mut self,
        section: SectionKind,
        subcategory: &str,
        raw: &JsonValue,
    ) -> EntityRecord {
        let empty = JsonMap::new();
        let fields = raw.as_object().unwrap_or(&empty);
        let name = fields.get("name").and_then(coerce_text);
        let stats = fields.get("stats").and_then(JsonValue::as_object);

        let id = self.generate_id(section, subcategory);
        let inference = infer_category(name.as_deref().unwrap_or(""), section, subcategory);
        if !inference.matched {
            debug!(
                %section,
                subcategory,
                id = %id,
                name = name.as_deref().unwrap_or(""),
                category = %inference.category,
                "no category token matched; using fallback"
            );
            self.report.fallback_categories.push(FallbackCategory {
                section,
                subcategory: subcategory.to_string(),
                id: id.clone(),
                name: name.clone(),
                category: inference.category.clone(),
            });
        }
        self.report.records += 1;

        let mut record = EntityRecord {
            id: Some(id),
            name,
            image: fields
                .get("image")
                .and_then(coerce_text)
                .map(|image| clean_image_path(&image)),
            category: Some(inference.category),
            availability: Some(AVAILABILITY_AVAILABLE.to_string()),
            ..EntityRecord::default()
        };

        match section {
            SectionKind::Vehicles => {
                record.stats = Some(vehicle_stats(stats));
                record.price = parse_price(fields.get("price"));
            }
            SectionKind::Weapons => {
                record.stats = Some(weapon_stats(stats));
                record.price = parse_price(fields.get("price"));
            }
            SectionKind::Blackmarket => {
                record.stats = Some(blackmarket_stats(stats));
                if subcategory != DRUGS_SUBCATEGORY && fields.get("price").is_some_and(is_truthy) {
                    record.price = parse_price(fields.get("price"));
                }
            }
            SectionKind::Services => {
                record.stats = Some(service_stats(stats));
                record.price_percentage = parse_price(fields.get("price"));
            }
        }

        record
    }
}

fn legacy_section(
    legacy: &JsonValue,
    kind: SectionKind,
) -> Result<&JsonMap<String, JsonValue>, CoreError> {
    let Some(value) = legacy.get(kind.as_str()) else {
        return Err(CoreError::new(
            CoreErrorCode::MissingSection,
            format!("legacy catalog has no '{kind}' section"),
        ));
    };
    value.as_object().ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::Parse,
            format!("legacy section '{kind}' must be an object of sub-categories"),
        )
    })
}

/// Removes the first `assets/img/` so the renderer can re-root the path.
pub fn clean_image_path(path: &str) -> String {
    path.replacen(LEGACY_IMAGE_PREFIX, "", 1)
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn optional_number(value: Option<i64>) -> JsonValue {
    value.map(JsonValue::from).unwrap_or(JsonValue::Null)
}

fn vehicle_stats(stats: Option<&JsonMap<String, JsonValue>>) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    let Some(stats) = stats else {
        return out;
    };
    for key in VEHICLE_STAT_KEYS {
        if let Some(value) = stats.get(key) {
            out.insert(key.to_string(), value.clone());
        }
    }
    out
}

fn weapon_stats(stats: Option<&JsonMap<String, JsonValue>>) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    for (key, value) in stats.into_iter().flatten() {
        let normalized_key = match key.as_str() {
            "compo" => "degats",
            "skin" => "precision",
            other => other,
        };
        let normalized_value = if key == "quantite" {
            optional_number(extract_number(Some(value)))
        } else {
            value.clone()
        };
        out.insert(normalized_key.to_string(), normalized_value);
    }
    out
}

fn blackmarket_stats(stats: Option<&JsonMap<String, JsonValue>>) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    for (key, value) in stats.into_iter().flatten() {
        let normalized_value = match key.as_str() {
            "Format" => match value {
                JsonValue::String(s) => JsonValue::String(s.to_lowercase()),
                other => other.clone(),
            },
            "degre" if is_truthy(value) => optional_number(extract_number(Some(value))),
            "quantite" => optional_number(extract_number(Some(value))),
            _ => value.clone(),
        };
        out.insert(key.to_lowercase(), normalized_value);
    }
    out
}

fn service_stats(stats: Option<&JsonMap<String, JsonValue>>) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    for (key, value) in stats.into_iter().flatten() {
        match key.as_str() {
            "capaciteMax" | "capaciteMin" => {
                let normalized_key = key.replacen("capacite", "capacite_", 1).to_lowercase();
                let amount = parse_price(Some(value))
                    .map(JsonValue::from)
                    .unwrap_or(JsonValue::Null);
                out.insert(normalized_key, amount);
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}
