//! Session Context
//!
//! Shared state provided via Leptos Context API: who is logged in, the tenant's configuration
//! and a factory for API clients carrying the current token.

use crm_core::api::ApiClient;
use crm_core::domain::{LoginResponse, User};
use crm_core::prefs::AuthStore;
use crm_core::{AppConfig, TenantConfig};
use leptos::ev;
use leptos::prelude::*;
use rolling_logger::RollingBuffer;
use tracing::{info, warn};

use crate::browser::{BrowserEvents, FetchTransport, LocalStore, UNAUTHORIZED_EVENT};
use crate::store::{navigate, AppStore, Page};

/// Client type every page talks to
pub type Api = ApiClient<FetchTransport, BrowserEvents>;

/// Session signals provided via context
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Bearer token; `None` means logged out
    pub token: RwSignal<Option<String>>,
    /// Current user and roles
    pub user: RwSignal<Option<User>>,
    /// Labels, vocabularies and defaults of the user's tenant
    pub tenant: RwSignal<TenantConfig>,
    config: StoredValue<AppConfig>,
    logs: StoredValue<Option<RollingBuffer>>,
    store: AppStore,
}

impl SessionContext {
    /// Rebuild the session from local storage
    pub fn restore(store: AppStore, config: AppConfig, logs: Option<RollingBuffer>) -> Self {
        let auth = AuthStore::new(&LocalStore);
        let user = auth.user_json().and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("[Session] Ignoring stored user: {}", e);
                None
            }
        });
        let token = auth.token();
        info!("[Session] Restored, authenticated={}", token.is_some());

        Self {
            token: RwSignal::new(token),
            user: RwSignal::new(user),
            tenant: RwSignal::new(auth.tenant_config()),
            config: StoredValue::new(config),
            logs: StoredValue::new(logs),
            store,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|u| u.as_ref().is_some_and(User::is_admin))
    }

    pub fn can_manage_files(&self) -> bool {
        self.user.with(|u| u.as_ref().is_some_and(User::can_manage_files))
    }

    pub fn user_email(&self) -> String {
        self.user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Persist a successful login and switch the tenant configuration
    pub fn login(&self, response: LoginResponse) {
        let user_json = response.user.as_ref().and_then(|u| serde_json::to_string(u).ok());
        let tenant_json = response.tenant.as_ref().and_then(|t| serde_json::to_string(t).ok());
        AuthStore::new(&LocalStore).save(&response.token, user_json.as_deref(), tenant_json.as_deref());

        info!("[Session] Logged in as {:?}", response.user.as_ref().map(|u| &u.email));
        self.tenant.set(response.tenant.and_then(|t| t.config).unwrap_or_default());
        self.user.set(response.user);
        self.token.set(Some(response.token));
        navigate(&self.store, Page::default());
    }

    pub fn logout(&self) {
        if !self.token.with_untracked(Option::is_some) {
            return;
        }
        info!("[Session] Logging out");
        AuthStore::new(&LocalStore).clear();
        self.token.set(None);
        self.user.set(None);
        self.tenant.set(TenantConfig::default());
        navigate(&self.store, Page::default());
    }

    /// Log out whenever an API call sees a 401
    pub fn listen_for_unauthorized(&self) {
        let session = *self;
        // Lives as long as the app, so the handle is never removed
        let _ = window_event_listener(ev::Custom::<web_sys::Event>::new(UNAUTHORIZED_EVENT), move |_| {
            warn!("[Session] Unauthorized event received");
            session.logout();
        });
    }

    /// Toast, logout and error-report sink
    pub fn events(&self) -> BrowserEvents {
        let report_url = self.config.with_value(|c| c.error_report_url.clone());
        BrowserEvents::new(self.store, report_url, self.logs.get_value())
    }

    /// API client bound to the current token
    pub fn api(&self) -> Api {
        let api_base = self.config.with_value(|c| c.api_base.clone());
        ApiClient::new(api_base, FetchTransport, self.events(), self.token.get_untracked())
    }
}

/// Get the session from context
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
