use catalog_core::catalog_api::{CatalogDocument, CoreError, CoreErrorCode, EntityRecord};
use catalog_core::convert::convert;
use catalog_core::navigation::Selection;
use catalog_core::section::{EntityKind, SectionKind};
use catalog_render::{
    AppState, PopulateReport, RenderOptions, render_card_with_options, render_sections,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebRenderOptions {
    pub section: Option<String>,
    pub json_output: bool,
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

impl From<CoreError> for WebError {
    fn from(err: CoreError) -> Self {
        let code = match err.code {
            CoreErrorCode::Io => "io_failed",
            CoreErrorCode::Parse => "parse_failed",
            CoreErrorCode::MissingSection => "missing_section",
            CoreErrorCode::UnknownSection => "unknown_section",
            CoreErrorCode::UnknownSubcategory => "unknown_subcategory",
        };
        Self::new(code, err.message)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|err| {
        WebError::new("render_failed", format!("failed to convert result: {err}")).to_js_value()
    })
}

/// Converts a legacy catalog (JSON text) into the normalized document.
#[wasm_bindgen]
pub fn convert_legacy(legacy_text: &str) -> Result<String, JsValue> {
    convert_legacy_impl(legacy_text).map_err(|err| err.to_js_value())
}

fn convert_legacy_impl(legacy_text: &str) -> Result<String, WebError> {
    let legacy: serde_json::Value = serde_json::from_str(legacy_text).map_err(|err| {
        WebError::new(
            "parse_failed",
            format!("Failed to parse legacy catalog: {err}"),
        )
    })?;
    let (document, report) = convert(&legacy)?;
    debug!(records = report.records, "converted legacy catalog");
    Ok(document.to_json_pretty()?)
}

#[wasm_bindgen]
pub fn render_catalog(document_bytes: &[u8], options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    render_catalog_impl(document_bytes, &parsed_options).map_err(|err| err.to_js_value())
}

fn render_catalog_impl(
    document_bytes: &[u8],
    options: &WebRenderOptions,
) -> Result<String, WebError> {
    if document_bytes.is_empty() {
        return Err(WebError::new(
            "unsupported_file",
            "The catalog document is empty.",
        ));
    }

    let section = parse_section_hint(options.section.as_deref())?;
    let document = CatalogDocument::from_json_bytes(document_bytes)?;
    let mut report = PopulateReport::default();
    let containers = render_sections(&document, section, &mut report);

    if options.json_output {
        let value = serde_json::json!({ "containers": containers, "report": report });
        return serde_json::to_string_pretty(&value).map_err(|err| {
            WebError::new(
                "render_failed",
                format!("failed to serialize rendered JSON output: {err}"),
            )
        });
    }

    Ok(containers
        .iter()
        .map(|c| format!("<!-- {} -->\n{}\n", c.key, c.html))
        .collect())
}

/// Renders one record given as JSON, typed by where it sits in the document.
#[wasm_bindgen]
pub fn render_card(
    record_json: &str,
    section: &str,
    subcategory: &str,
) -> Result<String, JsValue> {
    render_card_impl(record_json, section, subcategory).map_err(|err| err.to_js_value())
}

fn render_card_impl(
    record_json: &str,
    section: &str,
    subcategory: &str,
) -> Result<String, WebError> {
    let section: SectionKind = section.parse()?;
    let record: EntityRecord = serde_json::from_str(record_json).map_err(|err| {
        WebError::new("parse_failed", format!("Failed to parse record: {err}"))
    })?;
    let kind = EntityKind::resolve(section, subcategory);
    render_card_with_options(&record, kind, &RenderOptions::default())
        .map_err(|err| WebError::new("invalid_record", err.to_string()))
}

fn parse_options(options: JsValue) -> Result<WebRenderOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebRenderOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse web render options: {err}"),
        )
    })
}

fn parse_section_hint(raw: Option<&str>) -> Result<Option<SectionKind>, WebError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

/// Page-side handle on the catalog: loading, tab selection, theming and the
/// contact dialog.
#[wasm_bindgen]
pub struct CatalogApp {
    state: AppState,
}

impl Default for CatalogApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CatalogApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Returns `false` when the bytes were unusable and the empty fallback
    /// catalog was installed instead.
    pub fn load(&mut self, document_bytes: &[u8]) -> bool {
        !self.state.load_bytes(document_bytes).is_fallback()
    }

    pub fn reload(&mut self, document_bytes: &[u8]) -> bool {
        self.load(document_bytes)
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.state.document().is_some()
    }

    #[wasm_bindgen(js_name = selectSection)]
    pub fn select_section(&mut self, section: &str) -> Result<JsValue, JsValue> {
        let selection =
            select_section_impl(&mut self.state, section).map_err(|err| err.to_js_value())?;
        to_js(&selection)
    }

    #[wasm_bindgen(js_name = selectSubcategory)]
    pub fn select_subcategory(&mut self, name: &str) -> Result<JsValue, JsValue> {
        let selection = self
            .state
            .select_subcategory(name)
            .map_err(|err| WebError::from(err).to_js_value())?;
        to_js(selection)
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> String {
        self.state.selection().section.to_string()
    }

    #[wasm_bindgen(js_name = activeSubcategory)]
    pub fn active_subcategory(&self) -> Option<String> {
        self.state.selection().subcategory.clone()
    }

    pub fn theme(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.theme())
    }

    #[wasm_bindgen(js_name = themeCss)]
    pub fn theme_css(&self) -> String {
        self.state.theme().css_rule()
    }

    /// Opens the contact dialog for `item_name` and returns its text.
    pub fn contact(&mut self, item_name: &str) -> Result<JsValue, JsValue> {
        to_js(self.state.open_contact(item_name))
    }

    #[wasm_bindgen(js_name = closeContact)]
    pub fn close_contact(&mut self) {
        self.state.close_contact();
    }

    #[wasm_bindgen(js_name = contactHtml)]
    pub fn contact_html(&self) -> Option<String> {
        self.state.modal().to_html()
    }

    /// Containers of the active section, each `{ key, html, ... }`.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let (containers, report) = self.state.render_active_section();
        to_js(&serde_json::json!({ "containers": containers, "report": report }))
    }
}

fn select_section_impl(state: &mut AppState, raw: &str) -> Result<Selection, WebError> {
    let section: SectionKind = raw.parse()?;
    Ok(state.select_section(section).clone())
}
