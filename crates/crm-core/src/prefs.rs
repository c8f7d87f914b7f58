//! Persisted display preferences
//!
//! Keys follow `<scope>PerPage`, `<scope>SortOrder`, `<scope>ViewMode` and `<scope>StatusFilter`,
//! where the scope is a collection name (`clients`) or an admin view (`admin_leads`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TenantConfig;
use crate::domain::EntityKind;
use crate::sorting::LegacySortOrder;

pub const PER_PAGE_CHOICES: [u32; 5] = [5, 10, 25, 50, 100];

/// String key/value storage (browser local storage in the UI, memory in tests)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cards" => Some(ViewMode::Cards),
            "table" => Some(ViewMode::Table),
            _ => None,
        }
    }
}

/// Page, page size, sort and view of one list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    scope: String,
    pub per_page: u32,
    pub sort_order: LegacySortOrder,
    pub view_mode: ViewMode,
    pub current_page: u32,
}

impl Pagination {
    /// Restore saved preferences; anything missing or invalid falls back to the tenant defaults
    pub fn load(store: &impl PreferenceStore, scope: &str, tenant: &TenantConfig, kind: EntityKind) -> Self {
        let per_page = store
            .get(&format!("{}PerPage", scope))
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| PER_PAGE_CHOICES.contains(n))
            .unwrap_or_else(|| tenant.per_page_default(kind));
        let sort_order = store
            .get(&format!("{}SortOrder", scope))
            .and_then(|v| LegacySortOrder::parse(&v))
            .unwrap_or(tenant.defaults.default_sort);
        let view_mode = store
            .get(&format!("{}ViewMode", scope))
            .and_then(|v| ViewMode::parse(&v))
            .unwrap_or(tenant.defaults.default_view);

        debug!("[Prefs] Loaded {} per_page={} sort={}", scope, per_page, sort_order.as_str());
        Self {
            scope: scope.to_string(),
            per_page,
            sort_order,
            view_mode,
            current_page: 1,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Ignores sizes outside the offered choices
    pub fn set_per_page(&mut self, store: &impl PreferenceStore, per_page: u32) {
        if !PER_PAGE_CHOICES.contains(&per_page) {
            return;
        }
        self.per_page = per_page;
        self.current_page = 1;
        store.set(&format!("{}PerPage", self.scope), &per_page.to_string());
    }

    pub fn set_sort_order(&mut self, store: &impl PreferenceStore, order: LegacySortOrder) {
        self.sort_order = order;
        self.current_page = 1;
        store.set(&format!("{}SortOrder", self.scope), order.as_str());
    }

    pub fn set_view_mode(&mut self, store: &impl PreferenceStore, mode: ViewMode) {
        self.view_mode = mode;
        store.set(&format!("{}ViewMode", self.scope), mode.as_str());
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn total_pages(&self, total: u32) -> u32 {
        total.div_ceil(self.per_page.max(1)).max(1)
    }
}

pub const ALL_STATUSES: &str = "all";

/// Selected status tab of a list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter {
    key: String,
    pub value: String,
}

impl StatusFilter {
    pub fn load(store: &impl PreferenceStore, scope: &str) -> Self {
        let key = format!("{}StatusFilter", scope);
        let value = store
            .get(&key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| ALL_STATUSES.to_string());
        Self { key, value }
    }

    pub fn set(&mut self, store: &impl PreferenceStore, status: &str) {
        self.value = status.to_string();
        store.set(&self.key, status);
    }

    pub fn clear(&mut self, store: &impl PreferenceStore) {
        self.value = ALL_STATUSES.to_string();
        store.remove(&self.key);
    }

    pub fn matches(&self, status: Option<&str>) -> bool {
        self.value == ALL_STATUSES || status == Some(self.value.as_str())
    }
}

/// Tab counts with `all` first; `total` overrides the `all` count when the list is paged
pub fn status_counts<T>(
    rows: &[T],
    status_of: impl Fn(&T) -> Option<&str>,
    options: &[String],
    total: Option<u32>,
) -> Vec<(String, u32)> {
    let all = total.unwrap_or(rows.len() as u32);
    let mut counts = vec![(ALL_STATUSES.to_string(), all)];
    for option in options {
        let count = rows.iter().filter(|row| status_of(row) == Some(option.as_str())).count();
        counts.push((option.clone(), count as u32));
    }
    counts
}

pub const TOKEN_KEY: &str = "token";
pub const TENANT_KEY: &str = "authTenant";
pub const USER_KEY: &str = "authUser";

/// Session values kept across reloads
pub struct AuthStore<'a, S: PreferenceStore> {
    store: &'a S,
}

impl<'a, S: PreferenceStore> AuthStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn tenant_json(&self) -> Option<String> {
        self.store.get(TENANT_KEY)
    }

    pub fn user_json(&self) -> Option<String> {
        self.store.get(USER_KEY)
    }

    pub fn tenant_config(&self) -> TenantConfig {
        self.tenant_json()
            .map(|raw| TenantConfig::from_stored_tenant(&raw))
            .unwrap_or_default()
    }

    pub fn save(&self, token: &str, user_json: Option<&str>, tenant_json: Option<&str>) {
        self.store.set(TOKEN_KEY, token);
        match user_json {
            Some(user) => self.store.set(USER_KEY, user),
            None => self.store.remove(USER_KEY),
        }
        match tenant_json {
            Some(tenant) => self.store.set(TENANT_KEY, tenant),
            None => self.store.remove(TENANT_KEY),
        }
    }

    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY, TENANT_KEY] {
            self.store.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_page_survives_reload() {
        let store = MemoryStore::new();
        let tenant = TenantConfig::default();
        let mut pagination = Pagination::load(&store, "clients", &tenant, EntityKind::Client);
        pagination.set_page(4);
        pagination.set_per_page(&store, 25);
        assert_eq!(pagination.current_page, 1);

        let reloaded = Pagination::load(&store.clone(), "clients", &tenant, EntityKind::Client);
        assert_eq!(reloaded.per_page, 25);
        assert_eq!(reloaded.current_page, 1);
    }

    #[test]
    fn test_invalid_per_page_uses_tenant_default() {
        let store = MemoryStore::new();
        store.set("leadsPerPage", "7");
        let mut tenant = TenantConfig::default();
        tenant.defaults.leads_per_page = 50;
        let pagination = Pagination::load(&store, "leads", &tenant, EntityKind::Lead);
        assert_eq!(pagination.per_page, 50);

        let mut pagination = pagination;
        pagination.set_per_page(&store, 3);
        assert_eq!(pagination.per_page, 50);
        assert_eq!(store.get("leadsPerPage").as_deref(), Some("7"));
    }

    #[test]
    fn test_sort_and_view_persist() {
        let store = MemoryStore::new();
        let tenant = TenantConfig::default();
        let mut pagination = Pagination::load(&store, "admin_leads", &tenant, EntityKind::Lead);
        assert_eq!(pagination.view_mode, ViewMode::Cards);
        pagination.set_sort_order(&store, LegacySortOrder::Alphabetical);
        pagination.set_view_mode(&store, ViewMode::Table);

        assert_eq!(store.get("admin_leadsSortOrder").as_deref(), Some("alphabetical"));
        let reloaded = Pagination::load(&store, "admin_leads", &tenant, EntityKind::Lead);
        assert_eq!(reloaded.sort_order, LegacySortOrder::Alphabetical);
        assert_eq!(reloaded.view_mode, ViewMode::Table);
    }

    #[test]
    fn test_total_pages() {
        let store = MemoryStore::new();
        let pagination = Pagination::load(&store, "projects", &TenantConfig::default(), EntityKind::Project);
        assert_eq!(pagination.total_pages(0), 1);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(11), 2);
    }

    #[test]
    fn test_status_filter_persist_and_clear() {
        let store = MemoryStore::new();
        let mut filter = StatusFilter::load(&store, "leads");
        assert_eq!(filter.value, "all");
        filter.set(&store, "qualified");
        assert_eq!(StatusFilter::load(&store, "leads").value, "qualified");
        assert!(filter.matches(Some("qualified")));
        assert!(!filter.matches(None));

        filter.clear(&store);
        assert!(store.get("leadsStatusFilter").is_none());
        assert!(filter.matches(Some("lost")));
    }

    #[test]
    fn test_status_counts() {
        let rows = vec![Some("new"), Some("lost"), Some("new"), None];
        let options = vec!["new".to_string(), "lost".to_string(), "converted".to_string()];
        let counts = status_counts(&rows, |r| *r, &options, None);
        assert_eq!(
            counts,
            vec![("all".to_string(), 4), ("new".to_string(), 2), ("lost".to_string(), 1), ("converted".to_string(), 0)]
        );
        assert_eq!(status_counts(&rows, |r| *r, &options, Some(40))[0].1, 40);
    }

    #[test]
    fn test_auth_store_roundtrip() {
        let store = MemoryStore::new();
        let auth = AuthStore::new(&store);
        assert!(auth.token().is_none());
        auth.save("abc", None, Some(r#"{"config":{"labels":{"lead":"Prospect"}}}"#));
        assert_eq!(auth.token().as_deref(), Some("abc"));
        assert_eq!(auth.tenant_config().labels.lead, "Prospect");
        auth.clear();
        assert!(auth.token().is_none());
        assert_eq!(auth.tenant_config(), TenantConfig::default());
    }
}
