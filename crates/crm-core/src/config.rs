//! Configuration
//!
//! `AppConfig` is resolved at build time; `TenantConfig` arrives with the login response
//! and is passed explicitly to whatever needs labels or vocabularies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::EntityKind;
use crate::prefs::ViewMode;
use crate::sorting::LegacySortOrder;

/// Deployment settings baked into the WASM bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL every API path is appended to
    pub api_base: String,
    /// Error-tracking collector; reports are only logged when unset
    pub error_report_url: Option<String>,
    /// Backup console polling period
    pub poll_interval_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            error_report_url: None,
            poll_interval_ms: crate::backups::POLL_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Read `CRM_API_BASE` / `CRM_ERROR_REPORT_URL` captured at compile time
    pub fn from_env() -> Self {
        Self::from_values(option_env!("CRM_API_BASE"), option_env!("CRM_ERROR_REPORT_URL"))
    }

    fn from_values(api_base: Option<&str>, error_report_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.filter(|s| !s.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }
        config.error_report_url = error_report_url
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string());
        config
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

/// Join base and path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub company_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo: Option<String>,
    pub logo_compact: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "PathSix CRM".to_string(),
            primary_color: "#2563eb".to_string(),
            secondary_color: "#64748b".to_string(),
            logo: None,
            logo_compact: None,
        }
    }
}

/// Industry-specific names for the core records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub client: String,
    pub lead: String,
    pub project: String,
    pub interaction: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            client: "Client".to_string(),
            lead: "Lead".to_string(),
            project: "Project".to_string(),
            interaction: "Interaction".to_string(),
        }
    }
}

impl Labels {
    pub fn for_kind(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Client => &self.client,
            EntityKind::Lead => &self.lead,
            EntityKind::Project => &self.project,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusStyle {
    pub colors: BTreeMap<String, String>,
    pub icons: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    Text,
    Select,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSettings {
    pub statuses: Vec<String>,
    pub status_config: StatusStyle,
    pub sources: Vec<String>,
    pub temperatures: Vec<String>,
    pub temperature_config: StatusStyle,
    pub custom_fields: Vec<CustomField>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            statuses: strings(&["new", "contacted", "qualified", "lost", "converted"]),
            status_config: StatusStyle {
                colors: string_map(&[
                    ("new", "bg-yellow-100 text-yellow-800"),
                    ("contacted", "bg-blue-100 text-blue-800"),
                    ("qualified", "bg-orange-100 text-orange-800"),
                    ("lost", "bg-red-100 text-red-800"),
                    ("converted", "bg-green-100 text-green-800"),
                ]),
                icons: string_map(&[
                    ("new", "circle-yellow"),
                    ("contacted", "phone"),
                    ("qualified", "circle-orange"),
                    ("lost", "circle-red"),
                    ("converted", "circle-green"),
                ]),
                labels: string_map(&[
                    ("new", "New"),
                    ("contacted", "Contacted"),
                    ("qualified", "Qualified"),
                    ("lost", "Lost"),
                    ("converted", "Converted"),
                ]),
            },
            sources: strings(&[
                "Website", "Referral", "Cold Call", "Email Campaign", "Social Media",
                "Trade Show", "Advertisement", "Partner", "Other",
            ]),
            temperatures: strings(&["hot", "warm", "cold"]),
            temperature_config: StatusStyle {
                colors: string_map(&[
                    ("hot", "text-red-600"),
                    ("warm", "text-orange-600"),
                    ("cold", "text-blue-600"),
                ]),
                icons: string_map(&[("hot", "fire"), ("warm", "sun"), ("cold", "snowflake")]),
                labels: BTreeMap::new(),
            },
            custom_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AddressFormat {
    #[default]
    US,
    UK,
    EU,
    INTL,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Regional {
    pub currency: String,
    pub currency_symbol: String,
    pub date_format: String,
    pub phone_format: String,
    pub address_format: AddressFormat,
}

impl Default for Regional {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            currency_symbol: "$".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            phone_format: "US".to_string(),
            address_format: AddressFormat::US,
        }
    }
}

impl Regional {
    /// `$12,500` style amount with thousands separators, no decimals
    pub fn format_money(&self, amount: f64) -> String {
        let rounded = amount.round() as i64;
        let digits = rounded.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if rounded < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_symbol, grouped)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    pub show_temperature: bool,
    pub show_lead_score: bool,
    pub show_source: bool,
    pub enable_project_standalone: bool,
    pub enable_bulk_operations: bool,
    pub enable_advanced_filters: bool,
    pub enable_data_export: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            show_temperature: true,
            show_lead_score: false,
            show_source: true,
            enable_project_standalone: true,
            enable_bulk_operations: true,
            enable_advanced_filters: true,
            enable_data_export: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewDefaults {
    pub leads_per_page: u32,
    pub clients_per_page: u32,
    pub projects_per_page: u32,
    pub default_view: ViewMode,
    pub default_sort: LegacySortOrder,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            leads_per_page: 10,
            clients_per_page: 10,
            projects_per_page: 10,
            default_view: ViewMode::Cards,
            default_sort: LegacySortOrder::Newest,
        }
    }
}

/// Per-tenant customisation of labels, colours and vocabularies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantConfig {
    pub branding: Branding,
    pub labels: Labels,
    pub leads: LeadSettings,
    pub business_types: Vec<String>,
    pub regional: Regional,
    pub features: Features,
    pub defaults: ViewDefaults,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            labels: Labels::default(),
            leads: LeadSettings::default(),
            business_types: strings(&[
                "None", "Professional Services", "Technology", "Manufacturing", "Retail",
                "Healthcare", "Finance", "Education", "Other",
            ]),
            regional: Regional::default(),
            features: Features::default(),
            defaults: ViewDefaults::default(),
        }
    }
}

impl TenantConfig {
    /// Parse the stored tenant JSON (`{"config": {...}}`), falling back to the default
    pub fn from_stored_tenant(raw: &str) -> Self {
        #[derive(Deserialize)]
        struct StoredTenant {
            config: Option<TenantConfig>,
        }

        match serde_json::from_str::<StoredTenant>(raw) {
            Ok(tenant) => tenant.config.unwrap_or_default(),
            Err(e) => {
                warn!("[Config] Failed to parse stored tenant config: {}", e);
                Self::default()
            }
        }
    }

    /// Display label of a lead status; capitalised raw value when the tenant has none
    pub fn status_label(&self, status: &str) -> String {
        self.leads
            .status_config
            .labels
            .get(status)
            .cloned()
            .unwrap_or_else(|| capitalize(status))
    }

    pub fn status_color(&self, status: &str) -> &str {
        self.leads
            .status_config
            .colors
            .get(status)
            .map(String::as_str)
            .unwrap_or("bg-gray-100 text-gray-800")
    }

    pub fn per_page_default(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Client => self.defaults.clients_per_page,
            EntityKind::Lead => self.defaults.leads_per_page,
            EntityKind::Project => self.defaults.projects_per_page,
        }
    }
}

/// `in_progress` -> `In progress`
pub fn capitalize(s: &str) -> String {
    let s = s.replace('_', " ");
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = AppConfig { api_base: "https://crm.example.com/api/".to_string(), ..Default::default() };
        assert_eq!(config.url("/clients/"), "https://crm.example.com/api/clients/");
        assert_eq!(config.url("storage/list"), "https://crm.example.com/api/storage/list");
        assert_eq!(join_url("https://crm.example.com/api", "/leads/"), "https://crm.example.com/api/leads/");
    }

    #[test]
    fn test_from_values_ignores_blank() {
        let config = AppConfig::from_values(Some("  "), Some(""));
        assert_eq!(config.api_base, "/api");
        assert!(config.error_report_url.is_none());

        let config = AppConfig::from_values(Some("https://x/api"), Some("https://errors/x"));
        assert_eq!(config.api_base, "https://x/api");
        assert_eq!(config.error_report_url.as_deref(), Some("https://errors/x"));
    }

    #[test]
    fn test_partial_tenant_config_fills_defaults() {
        let raw = r#"{"id": 3, "config": {"labels": {"client": "Account"}, "businessTypes": ["None", "Roofing"]}}"#;
        let config = TenantConfig::from_stored_tenant(raw);
        assert_eq!(config.labels.client, "Account");
        assert_eq!(config.labels.lead, "Lead");
        assert_eq!(config.business_types, vec!["None", "Roofing"]);
        assert_eq!(config.defaults.leads_per_page, 10);
    }

    #[test]
    fn test_invalid_tenant_falls_back() {
        assert_eq!(TenantConfig::from_stored_tenant("not json"), TenantConfig::default());
        assert_eq!(TenantConfig::from_stored_tenant("{}"), TenantConfig::default());
    }

    #[test]
    fn test_status_label_fallback() {
        let config = TenantConfig::default();
        assert_eq!(config.status_label("qualified"), "Qualified");
        assert_eq!(config.status_label("on_hold"), "On hold");
    }

    #[test]
    fn test_format_money() {
        let regional = Regional::default();
        assert_eq!(regional.format_money(12500.4), "$12,500");
        assert_eq!(regional.format_money(999.0), "$999");
        assert_eq!(regional.format_money(-1234567.0), "-$1,234,567");
    }
}
