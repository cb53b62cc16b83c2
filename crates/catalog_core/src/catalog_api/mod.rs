mod error;
mod site_config;
mod store;
mod types;

pub use error::{CoreError, CoreErrorCode};
pub use site_config::{ContactDetails, SectionColors, SectionConfig, section_config};
pub use store::{CatalogStore, LoadOutcome, fallback_document};
pub use types::{
    CatalogDocument, DocumentConfig, EntityRecord, Section, SubCategory, coerce_text,
};
