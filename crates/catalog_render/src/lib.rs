mod app;
mod card;
mod contact;
mod html;
mod image;
mod page;
mod theme;

use catalog_core::catalog_api::{CatalogDocument, DocumentConfig};
use serde_json::Value as JsonValue;

pub use app::AppState;
pub use card::{
    CardDescriptor, CardError, PriceRule, RESOURCE_PLACEHOLDER, StatLabel, StatLayout,
    descriptor_for, render_card, render_card_with_options,
};
pub use contact::{ContactMessage, ContactModal, contact_message};
pub use html::escape_html;
pub use image::{IMAGE_PLACEHOLDER, ImageRef, classify_image, image_fragment};
pub use page::{
    CardContainers, PopulateReport, RenderedContainer, SkippedRecord, container_key,
    populate_sections, render_sections,
};
pub use theme::{Theme, theme_for};

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';
pub const MAX_STARS: u8 = 5;
pub const PRICE_ON_REQUEST: &str = "Prix sur demande";
pub const MISSING_STAT: &str = "N/A";

/// Document-level settings the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub base_image_url: String,
    pub currency: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&DocumentConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            base_image_url: config.base_image_url.clone(),
            currency: config.currency.clone(),
        }
    }

    pub fn from_document(document: &CatalogDocument) -> Self {
        Self {
            base_image_url: document.base_image_url().to_string(),
            currency: document.currency().to_string(),
        }
    }
}

/// `clamp(round(rating), 0, 5)` filled stars followed by empty ones.
/// Non-finite input renders as zero stars.
pub fn star_scale(rating: f64) -> String {
    let filled = if rating.is_finite() {
        rating.round().clamp(0.0, f64::from(MAX_STARS)) as usize
    } else {
        0
    };
    let mut out = String::with_capacity(usize::from(MAX_STARS) * FILLED_STAR.len_utf8());
    out.extend(std::iter::repeat_n(FILLED_STAR, filled));
    out.extend(std::iter::repeat_n(EMPTY_STAR, usize::from(MAX_STARS) - filled));
    out
}

/// Star scale for a stat that must be a rating. Missing or unreadable
/// values fail closed to zero stars.
pub fn stars_for_value(value: Option<&JsonValue>) -> String {
    let rating = match value {
        Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    star_scale(rating)
}

/// How a dynamic stat value is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatDisplay {
    Stars(String),
    /// Plain text, not yet escaped.
    Text(String),
}

pub fn stat_display(value: &JsonValue) -> StatDisplay {
    match value {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if (0.0..=f64::from(MAX_STARS)).contains(&f) => {
                StatDisplay::Stars(star_scale(f))
            }
            _ => StatDisplay::Text(n.to_string()),
        },
        JsonValue::String(s) if !s.trim().is_empty() => StatDisplay::Text(s.clone()),
        JsonValue::Bool(true) => StatDisplay::Text("Oui".to_string()),
        JsonValue::Array(items) if !items.is_empty() => StatDisplay::Text(
            items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => StatDisplay::Text(MISSING_STAT.to_string()),
    }
}

pub fn currency_symbol(currency: &str) -> &str {
    match currency {
        "USD" => "$",
        "EUR" => "€",
        other => other,
    }
}

pub fn format_price(price: Option<u64>, currency: &str) -> String {
    match price {
        Some(amount) => format!(
            "{}{}",
            format_number_with_commas(amount),
            currency_symbol(currency)
        ),
        None => PRICE_ON_REQUEST.to_string(),
    }
}

pub fn format_percentage(percentage: Option<u64>) -> String {
    match percentage {
        Some(value) => format!("{value}%"),
        None => PRICE_ON_REQUEST.to_string(),
    }
}

pub fn format_number_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        StatDisplay, format_number_with_commas, format_percentage, format_price, star_scale,
        stat_display, stars_for_value,
    };

    #[test]
    fn star_scale_clamps_and_rounds() {
        assert_eq!(star_scale(3.0), "★★★☆☆");
        assert_eq!(star_scale(-1.0), "☆☆☆☆☆");
        assert_eq!(star_scale(9.0), "★★★★★");
        assert_eq!(star_scale(2.5), "★★★☆☆");
        assert_eq!(star_scale(f64::NAN), "☆☆☆☆☆");
        assert_eq!(star_scale(0.0).chars().count(), 5);
    }

    #[test]
    fn fixed_stats_fail_closed() {
        assert_eq!(stars_for_value(None), "☆☆☆☆☆");
        assert_eq!(stars_for_value(Some(&json!("rapide"))), "☆☆☆☆☆");
        assert_eq!(stars_for_value(Some(&json!(" 4 "))), "★★★★☆");
        assert_eq!(stars_for_value(Some(&json!(null))), "☆☆☆☆☆");
    }

    #[test]
    fn dynamic_stats_render_stars_only_in_range() {
        assert_eq!(
            stat_display(&json!(4)),
            StatDisplay::Stars("★★★★☆".to_string())
        );
        assert_eq!(stat_display(&json!(12)), StatDisplay::Text("12".to_string()));
        assert_eq!(stat_display(&json!(-2)), StatDisplay::Text("-2".to_string()));
        assert_eq!(
            stat_display(&json!(".44 Magnum")),
            StatDisplay::Text(".44 Magnum".to_string())
        );
        assert_eq!(stat_display(&json!(null)), StatDisplay::Text("N/A".to_string()));
        assert_eq!(stat_display(&json!("")), StatDisplay::Text("N/A".to_string()));
    }

    #[test]
    fn prices_use_thousands_separators() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(1_250_000), "1,250,000");
        assert_eq!(format_price(Some(25_000), "USD"), "25,000$");
        assert_eq!(format_price(Some(900), "EUR"), "900€");
        assert_eq!(format_price(None, "USD"), "Prix sur demande");
        assert_eq!(format_percentage(Some(15)), "15%");
    }
}
