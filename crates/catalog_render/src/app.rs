use std::path::Path;

use catalog_core::catalog_api::{CatalogDocument, CatalogStore, CoreError, LoadOutcome};
use catalog_core::navigation::{Navigator, Selection, TabLayout};
use catalog_core::section::SectionKind;

use crate::contact::{ContactMessage, ContactModal, contact_message};
use crate::page::{PopulateReport, RenderedContainer, render_sections};
use crate::theme::{Theme, theme_for};

/// State of one catalog page: the loaded document, the active tabs and the
/// contact dialog. Theme and contact text are always derived from the
/// current selection.
#[derive(Debug)]
pub struct AppState {
    store: CatalogStore,
    navigator: Navigator,
    modal: ContactModal,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: CatalogStore::new(),
            navigator: Navigator::new(TabLayout::default()),
            modal: ContactModal::new(),
        }
    }

    /// Loads a document, falling back to the empty catalog on bad input.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> LoadOutcome {
        self.store.reload_bytes(bytes);
        self.refresh_layout()
    }

    pub fn load_path(&mut self, path: &Path) -> LoadOutcome {
        self.store.reload_path(path);
        self.refresh_layout()
    }

    fn refresh_layout(&mut self) -> LoadOutcome {
        if let Some(document) = self.store.document() {
            self.navigator.set_layout(TabLayout::from_document(document));
        }
        self.modal.close();
        self.store.outcome().cloned().unwrap_or(LoadOutcome::Loaded)
    }

    pub fn document(&self) -> Option<&CatalogDocument> {
        self.store.document()
    }

    pub fn selection(&self) -> &Selection {
        self.navigator.active()
    }

    pub fn select_section(&mut self, section: SectionKind) -> &Selection {
        self.navigator.select_section(section)
    }

    pub fn select_subcategory(&mut self, name: &str) -> Result<&Selection, CoreError> {
        self.navigator.select_subcategory(name)
    }

    pub fn theme(&self) -> Theme {
        theme_for(self.navigator.active_section())
    }

    pub fn contact(&self, item_name: &str) -> ContactMessage {
        contact_message(item_name, Some(self.navigator.active_section()))
    }

    pub fn open_contact(&mut self, item_name: &str) -> &ContactMessage {
        let message = self.contact(item_name);
        self.modal.open(message)
    }

    pub fn close_contact(&mut self) -> Option<ContactMessage> {
        self.modal.close()
    }

    pub fn modal(&self) -> &ContactModal {
        &self.modal
    }

    /// Cards of the active section. Empty until a document is loaded.
    pub fn render_active_section(&self) -> (Vec<RenderedContainer>, PopulateReport) {
        let mut report = PopulateReport::default();
        let rendered = match self.store.document() {
            Some(document) => render_sections(
                document,
                Some(self.navigator.active_section()),
                &mut report,
            ),
            None => Vec::new(),
        };
        (rendered, report)
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::section::SectionKind;

    use super::AppState;

    const DOCUMENT: &[u8] = br#"{
        "vehicles": { "mc": [ { "name": "Sanchez", "price": 12000 } ], "gang": [] },
        "weapons": { "rifles": [ { "name": "Assault SMG" } ], "pistols": [] }
    }"#;

    #[test]
    fn section_switch_updates_theme_and_contact_together() {
        let mut app = AppState::new();
        assert!(!app.load_bytes(DOCUMENT).is_fallback());
        assert_eq!(app.selection().subcategory.as_deref(), Some("mc"));

        app.select_section(SectionKind::Weapons);
        assert_eq!(app.selection().subcategory.as_deref(), Some("rifles"));
        assert_eq!(app.theme().title, "🔫 SHADOW ARMORY");
        assert!(
            app.contact("Assault SMG")
                .body
                .starts_with("Vous souhaitez contacter le fournisseur d'armes")
        );
    }

    #[test]
    fn bad_input_falls_back_and_keeps_tabs_usable() {
        let mut app = AppState::new();
        assert!(app.load_bytes(b"<html>404</html>").is_fallback());
        app.select_section(SectionKind::Blackmarket);
        app.select_subcategory("vagos").expect("fallback has vagos");
        let (rendered, report) = app.render_active_section();
        assert_eq!(rendered.len(), 5);
        assert_eq!(report.rendered_cards, 0);
    }

    #[test]
    fn reload_closes_the_contact_dialog() {
        let mut app = AppState::new();
        app.load_bytes(DOCUMENT);
        app.open_contact("Sanchez");
        assert!(app.modal().is_open());
        app.load_bytes(DOCUMENT);
        assert!(!app.modal().is_open());
    }
}
