use std::collections::BTreeMap;

use catalog_core::catalog_api::{CatalogDocument, SubCategory};
use catalog_core::section::{EntityKind, SectionKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::RenderOptions;
use crate::card::render_card_with_options;

/// Selector of the grid a sub-category's cards go into.
pub fn container_key(subcategory: &str) -> String {
    format!("#{subcategory} .cars-grid")
}

/// Somewhere cards can be placed, keyed by [`container_key`].
pub trait CardContainers {
    /// Replaces the content of `key`. Returns `false` when there is no such
    /// container.
    fn replace_content(&mut self, key: &str, html: String) -> bool;
}

/// Only keys that already exist are filled.
impl CardContainers for BTreeMap<String, String> {
    fn replace_content(&mut self, key: &str, html: String) -> bool {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = html;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub section: SectionKind,
    pub subcategory: String,
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulateReport {
    pub rendered_cards: usize,
    pub skipped: Vec<SkippedRecord>,
    pub missing_containers: Vec<String>,
}

impl PopulateReport {
    pub fn is_complete(&self) -> bool {
        self.missing_containers.is_empty()
    }
}

/// Cards of one sub-category, ready to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedContainer {
    pub section: SectionKind,
    pub subcategory: String,
    pub key: String,
    pub html: String,
    pub cards: usize,
}

/// Renders every sub-category of the document, or of one section.
/// Records without a name are left out and listed in the report.
pub fn render_sections(
    document: &CatalogDocument,
    only: Option<SectionKind>,
    report: &mut PopulateReport,
) -> Vec<RenderedContainer> {
    let options = RenderOptions::from_document(document);
    document
        .sections()
        .filter(|(kind, _)| only.is_none_or(|wanted| wanted == *kind))
        .flat_map(|(kind, section)| section.iter().map(move |sub| (kind, sub)))
        .map(|(kind, sub)| render_subcategory(kind, sub, &options, report))
        .collect()
}

fn render_subcategory(
    section: SectionKind,
    sub: &SubCategory,
    options: &RenderOptions,
    report: &mut PopulateReport,
) -> RenderedContainer {
    let kind = EntityKind::resolve(section, &sub.name);
    let mut html = String::new();
    let mut cards = 0;
    for (index, record) in sub.records.iter().enumerate() {
        match render_card_with_options(record, kind, options) {
            Ok(card) => {
                html.push_str(&card);
                cards += 1;
            }
            Err(error) => {
                warn!(%section, subcategory = %sub.name, index, %error, "skipping record");
                report.skipped.push(SkippedRecord {
                    section,
                    subcategory: sub.name.clone(),
                    index,
                    reason: error.to_string(),
                });
            }
        }
    }
    report.rendered_cards += cards;
    debug!(%section, subcategory = %sub.name, cards, "rendered sub-category");

    RenderedContainer {
        section,
        subcategory: sub.name.clone(),
        key: container_key(&sub.name),
        html,
        cards,
    }
}

/// Fills `containers` with the cards of every sub-category in the
/// document. A missing container is only reported when its sub-category
/// has records.
pub fn populate_sections<C: CardContainers + ?Sized>(
    document: &CatalogDocument,
    containers: &mut C,
) -> PopulateReport {
    let mut report = PopulateReport::default();
    for rendered in render_sections(document, None, &mut report) {
        let non_empty = document
            .section(rendered.section)
            .get(&rendered.subcategory)
            .is_some_and(|records| !records.is_empty());
        let RenderedContainer { key, html, .. } = rendered;
        if !containers.replace_content(&key, html) && non_empty {
            warn!(container = %key, "no container for sub-category");
            report.missing_containers.push(key);
        }
    }
    report
}
