pub mod catalog_api;
pub mod convert;
pub mod inference;
pub mod navigation;
pub mod numbers;
pub mod section;
