//! Tab selection state: one active section, one active sub-category in it.

use serde::Serialize;

use crate::catalog_api::{CatalogDocument, CoreError, CoreErrorCode, SectionConfig, section_config};
use crate::section::SectionKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub section: SectionKind,
    /// `None` only when the active section has no sub-categories.
    pub subcategory: Option<String>,
}

/// Sub-category tabs of every section, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabLayout {
    tabs: Vec<(SectionKind, Vec<String>)>,
}

impl TabLayout {
    pub fn from_document(document: &CatalogDocument) -> Self {
        Self {
            tabs: document
                .sections()
                .map(|(kind, section)| (kind, section.names().map(str::to_string).collect()))
                .collect(),
        }
    }

    pub fn subcategories(&self, section: SectionKind) -> &[String] {
        self.tabs
            .iter()
            .find(|(kind, _)| *kind == section)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }
}

/// Owns the active selection. Theming and the contact action read the
/// active section through [`Navigator::active_config`], so they always agree
/// with the selection.
#[derive(Debug, Clone)]
pub struct Navigator {
    layout: TabLayout,
    active: Selection,
}

impl Navigator {
    /// Starts on the first section and its first sub-category.
    pub fn new(layout: TabLayout) -> Self {
        let section = SectionKind::ALL[0];
        let subcategory = layout.subcategories(section).first().cloned();
        Self {
            layout,
            active: Selection {
                section,
                subcategory,
            },
        }
    }

    pub fn from_document(document: &CatalogDocument) -> Self {
        Self::new(TabLayout::from_document(document))
    }

    /// Swaps the tab layout (after a reload) and re-selects the active
    /// section so the sub-selection is valid for the new layout.
    pub fn set_layout(&mut self, layout: TabLayout) -> &Selection {
        self.layout = layout;
        self.select_section(self.active.section)
    }

    pub fn layout(&self) -> &TabLayout {
        &self.layout
    }

    /// Activates `section` and resets the sub-selection to its first
    /// sub-category.
    pub fn select_section(&mut self, section: SectionKind) -> &Selection {
        self.active = Selection {
            section,
            subcategory: self.layout.subcategories(section).first().cloned(),
        };
        &self.active
    }

    /// Changes the sub-selection within the active section. Unknown names
    /// leave the state untouched.
    pub fn select_subcategory(&mut self, name: &str) -> Result<&Selection, CoreError> {
        let section = self.active.section;
        if !self
            .layout
            .subcategories(section)
            .iter()
            .any(|candidate| candidate == name)
        {
            return Err(CoreError::new(
                CoreErrorCode::UnknownSubcategory,
                format!("'{name}' is not a sub-category of {section}"),
            ));
        }
        self.active.subcategory = Some(name.to_string());
        Ok(&self.active)
    }

    pub fn active(&self) -> &Selection {
        &self.active
    }

    pub fn active_section(&self) -> SectionKind {
        self.active.section
    }

    pub fn active_subcategory(&self) -> Option<&str> {
        self.active.subcategory.as_deref()
    }

    pub fn active_config(&self) -> &'static SectionConfig {
        section_config(self.active.section)
    }
}
