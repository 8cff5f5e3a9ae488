//! Service layer: configuration and the typed catalog API.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogService, Detail, DetailRequest, EntityKind};
pub use config::AppConfig;
