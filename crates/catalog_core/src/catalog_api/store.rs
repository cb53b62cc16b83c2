use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::error::{CoreError, CoreErrorCode};
use super::types::{CatalogDocument, Section};

/// How the current document came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The source could not be read or parsed; the fallback document is in
    /// use and `error` says why.
    Fallback { error: CoreError },
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Empty document with every known sub-category present.
pub fn fallback_document() -> CatalogDocument {
    fn section(names: &[&str]) -> Section {
        let mut section = Section::new();
        for name in names {
            section.insert(*name, Vec::new());
        }
        section
    }

    CatalogDocument {
        config: None,
        vehicles: section(&["mc", "mafia", "cartel", "gang"]),
        weapons: section(&["pistols", "rifles", "explosives"]),
        blackmarket: section(&["drugs", "contraband", "documents", "vagos", "catalyst"]),
        services: section(&["laundering"]),
    }
}

/// Holds the catalog for one page session. A load never fails: unreadable
/// or malformed input is replaced by [`fallback_document`].
#[derive(Debug, Default)]
pub struct CatalogStore {
    document: Option<CatalogDocument>,
    outcome: Option<LoadOutcome>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> &CatalogDocument {
        let result = CatalogDocument::from_json_bytes(bytes);
        self.install(result)
    }

    pub fn load_path(&mut self, path: &Path) -> &CatalogDocument {
        let result = fs::read(path)
            .map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Io,
                    format!("failed to read {}: {e}", path.display()),
                )
            })
            .and_then(|bytes| CatalogDocument::from_json_bytes(&bytes));
        self.install(result)
    }

    /// Drops the current document and loads `bytes` in its place.
    pub fn reload_bytes(&mut self, bytes: &[u8]) -> &CatalogDocument {
        self.clear();
        self.load_bytes(bytes)
    }

    pub fn reload_path(&mut self, path: &Path) -> &CatalogDocument {
        self.clear();
        self.load_path(path)
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.outcome = None;
    }

    pub fn document(&self) -> Option<&CatalogDocument> {
        self.document.as_ref()
    }

    pub fn outcome(&self) -> Option<&LoadOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    fn install(&mut self, result: Result<CatalogDocument, CoreError>) -> &CatalogDocument {
        let (document, outcome) = match result {
            Ok(document) => {
                info!(records = document.record_count(), "catalog document loaded");
                (document, LoadOutcome::Loaded)
            }
            Err(error) => {
                warn!(%error, "catalog document unavailable, using empty fallback");
                (fallback_document(), LoadOutcome::Fallback { error })
            }
        };
        self.outcome = Some(outcome);
        self.document.insert(document)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{CatalogStore, LoadOutcome, fallback_document};
    use crate::catalog_api::CoreErrorCode;

    #[test]
    fn malformed_bytes_install_the_fallback() {
        let mut store = CatalogStore::new();
        assert!(!store.is_loaded());

        let document = store.load_bytes(b"{ not json");
        assert_eq!(*document, fallback_document());
        match store.outcome() {
            Some(LoadOutcome::Fallback { error }) => assert_eq!(error.code, CoreErrorCode::Parse),
            other => panic!("expected fallback outcome, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_installs_the_fallback() {
        let mut store = CatalogStore::new();
        store.load_path(Path::new("/definitely/not/here/data.json"));
        assert!(store.is_loaded());
        assert!(store.outcome().is_some_and(LoadOutcome::is_fallback));
    }

    #[test]
    fn reload_replaces_the_document() {
        let mut store = CatalogStore::new();
        store.load_bytes(br#"{ "services": { "laundering": [ { "name": "Aether" } ] } }"#);
        assert_eq!(store.document().map(|d| d.record_count()), Some(1));

        store.reload_bytes(br#"{ "services": { "laundering": [] } }"#);
        assert_eq!(store.document().map(|d| d.record_count()), Some(0));
        assert_eq!(store.outcome(), Some(&LoadOutcome::Loaded));
    }

    #[test]
    fn fallback_keeps_every_known_subcategory() {
        let doc = fallback_document();
        let names: Vec<&str> = doc.blackmarket.names().collect();
        assert_eq!(
            names,
            vec!["drugs", "contraband", "documents", "vagos", "catalyst"]
        );
        assert_eq!(doc.record_count(), 0);
    }
}
