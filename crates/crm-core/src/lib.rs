//! CRM Core
//!
//! Browser-independent layer of the CRM client:
//! - domain: records mirrored from the REST API
//! - config: application and tenant configuration
//! - validation: form input checks matching the server's limits
//! - sorting / prefs: list ordering and persisted display preferences
//! - api: fetch wrapper semantics and the endpoint catalogue
//! - importer / backups / calendar: admin console and follow-up helpers

pub mod api;
pub mod backups;
pub mod calendar;
pub mod config;
pub mod domain;
pub mod importer;
pub mod prefs;
pub mod sorting;
pub mod validation;

pub use api::{ApiClient, ApiError, ApiEvents, ApiRequest, ApiResponse, Transport};
pub use config::{AppConfig, TenantConfig};
