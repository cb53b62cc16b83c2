use std::fmt::Write as _;

use catalog_core::catalog_api::EntityRecord;
use catalog_core::section::EntityKind;
use thiserror::Error;

use crate::html::escape_html;
use crate::image::image_fragment;
use crate::{
    RenderOptions, StatDisplay, format_percentage, format_price, stat_display, stars_for_value,
};

pub const RESOURCE_PLACEHOLDER: &str = "📋 Ressource à découvrir";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("record has no display name")]
    MissingName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLabel {
    pub key: &'static str,
    pub label: &'static str,
}

/// Which stats a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLayout {
    /// Always these keys, in this order, as star scales.
    Fixed(&'static [StatLabel]),
    /// Whatever keys the record carries, in record order. The table only
    /// supplies labels.
    Dynamic(&'static [StatLabel]),
}

impl StatLayout {
    pub fn label_for(&self, key: &str) -> String {
        let (Self::Fixed(table) | Self::Dynamic(table)) = self;
        table
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.label.to_string())
            .unwrap_or_else(|| capitalize(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRule {
    /// `price`, or "price on request" when absent.
    Amount,
    /// `price`; the price box and contact action only appear when it is set.
    AmountWhenPresent,
    /// `price_percentage` shown as `NN%`.
    Percentage,
    /// No price box and no contact action.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDescriptor {
    pub kind: EntityKind,
    pub stats: StatLayout,
    pub price: PriceRule,
    pub contact_label: Option<&'static str>,
    /// Shown at the bottom of cards that have no commerce section.
    pub footer_note: Option<&'static str>,
}

impl CardDescriptor {
    fn shows_commerce(&self, record: &EntityRecord) -> bool {
        match self.price {
            PriceRule::Amount | PriceRule::Percentage => true,
            PriceRule::AmountWhenPresent => record.price.is_some(),
            PriceRule::Hidden => false,
        }
    }
}

const fn label(key: &'static str, label: &'static str) -> StatLabel {
    StatLabel { key, label }
}

#[rustfmt::skip]
const VEHICLE_STATS: &[StatLabel] = &[
    label("vitesse",      "Vitesse"),
    label("acceleration", "Accélération"),
    label("freinage",     "Freinage"),
    label("maniabilite",  "Maniabilité"),
];

#[rustfmt::skip]
const WEAPON_LABELS: &[StatLabel] = &[
    label("degats",    "Dégâts"),
    label("precision", "Précision"),
    label("portee",    "Portée"),
    label("compo",     "Dégâts"),
    label("skin",      "Précision"),
    label("quantite",  "Quantité"),
];

#[rustfmt::skip]
const DRUG_LABELS: &[StatLabel] = &[
    label("qualite", "Qualité"),
    label("purete",  "Pureté"),
];

#[rustfmt::skip]
const BLACKMARKET_LABELS: &[StatLabel] = &[
    label("qualite",      "Qualité"),
    label("purete",       "Pureté"),
    label("quantite",     "Quantité"),
    label("discretion",   "Discrétion"),
    label("authenticite", "Authenticité"),
    label("delai",        "Délai"),
    label("garantie",     "Garantie"),
    label("degre",        "Degré"),
];

#[rustfmt::skip]
const SERVICE_LABELS: &[StatLabel] = &[
    label("capaciteMax",  "Capacité max"),
    label("capacite_max", "Capacité max"),
    label("capaciteMin",  "Capacité min"),
    label("capacite_min", "Capacité min"),
    label("delai",        "Délai"),
    label("discretion",   "Discrétion"),
];

static DESCRIPTORS: [CardDescriptor; 5] = [
    CardDescriptor {
        kind: EntityKind::Vehicle,
        stats: StatLayout::Fixed(VEHICLE_STATS),
        price: PriceRule::Amount,
        contact_label: Some("Contacter pour ce véhicule"),
        footer_note: None,
    },
    CardDescriptor {
        kind: EntityKind::Weapon,
        stats: StatLayout::Dynamic(WEAPON_LABELS),
        price: PriceRule::Amount,
        contact_label: Some("Contacter pour cette arme"),
        footer_note: None,
    },
    CardDescriptor {
        kind: EntityKind::BlackmarketItem,
        stats: StatLayout::Dynamic(BLACKMARKET_LABELS),
        price: PriceRule::AmountWhenPresent,
        contact_label: Some("Contacter pour ce produit"),
        footer_note: None,
    },
    CardDescriptor {
        kind: EntityKind::Drug,
        stats: StatLayout::Dynamic(DRUG_LABELS),
        price: PriceRule::Hidden,
        contact_label: None,
        footer_note: Some(RESOURCE_PLACEHOLDER),
    },
    CardDescriptor {
        kind: EntityKind::Service,
        stats: StatLayout::Dynamic(SERVICE_LABELS),
        price: PriceRule::Percentage,
        contact_label: Some("Contacter pour ce service"),
        footer_note: None,
    },
];

pub fn descriptor_for(kind: EntityKind) -> &'static CardDescriptor {
    let index = match kind {
        EntityKind::Vehicle => 0,
        EntityKind::Weapon => 1,
        EntityKind::BlackmarketItem => 2,
        EntityKind::Drug => 3,
        EntityKind::Service => 4,
    };
    &DESCRIPTORS[index]
}

/// Renders with the default document settings.
pub fn render_card(record: &EntityRecord, kind: EntityKind) -> Result<String, CardError> {
    render_card_with_options(record, kind, &RenderOptions::default())
}

/// Renders one record as a card fragment. Only a missing name is an
/// error; every other absent field degrades to a placeholder.
pub fn render_card_with_options(
    record: &EntityRecord,
    kind: EntityKind,
    options: &RenderOptions,
) -> Result<String, CardError> {
    let name = record.display_name().ok_or(CardError::MissingName)?;
    let descriptor = descriptor_for(kind);
    let name_html = escape_html(name);

    let mut out = String::with_capacity(512);
    out.push_str(r#"<div class="car-card""#);
    if let Some(id) = &record.id {
        write!(out, r#" data-id="{}""#, escape_html(id)).expect("writing to String cannot fail");
    }
    if let Some(category) = &record.category {
        write!(out, r#" data-category="{}""#, escape_html(category))
            .expect("writing to String cannot fail");
    }
    out.push('>');

    write!(out, r#"<h3 class="car-name">{name_html}</h3>"#).expect("writing to String cannot fail");
    write!(
        out,
        r#"<div class="car-image">{}</div>"#,
        image_fragment(record.image.as_deref(), name, &options.base_image_url)
    )
    .expect("writing to String cannot fail");

    out.push_str(r#"<div class="car-details">"#);
    push_stats(&mut out, record, &descriptor.stats);
    out.push_str("</div>");

    if descriptor.shows_commerce(record) {
        let price = match descriptor.price {
            PriceRule::Percentage => format_percentage(record.price_percentage),
            _ => format_price(record.price, &options.currency),
        };
        write!(out, r#"<div class="price">💰 {}</div>"#, escape_html(&price))
            .expect("writing to String cannot fail");
        if let Some(label) = descriptor.contact_label {
            write!(
                out,
                r#"<button class="contact-btn" type="button" data-contact="{name_html}">{label}</button>"#
            )
            .expect("writing to String cannot fail");
        }
    } else if let Some(note) = descriptor.footer_note {
        write!(out, r#"<div class="resource-info">{note}</div>"#)
            .expect("writing to String cannot fail");
    }

    out.push_str("</div>");
    Ok(out)
}

fn push_stats(out: &mut String, record: &EntityRecord, layout: &StatLayout) {
    match layout {
        StatLayout::Fixed(table) => {
            for entry in table.iter() {
                push_detail(out, entry.label, &stars_for_value(record.stat(entry.key)));
            }
        }
        StatLayout::Dynamic(_) => {
            let Some(stats) = &record.stats else {
                return;
            };
            for (key, value) in stats {
                let shown = match stat_display(value) {
                    StatDisplay::Stars(stars) => stars,
                    StatDisplay::Text(text) => escape_html(&text),
                };
                push_detail(out, &escape_html(&layout.label_for(key)), &shown);
            }
        }
    }
}

fn push_detail(out: &mut String, label: &str, value_html: &str) {
    write!(
        out,
        r#"<div class="detail-item"><span class="detail-label">{label}:</span> {value_html}</div>"#
    )
    .expect("writing to String cannot fail");
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
