//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Holds UI state only; records fetched from the server live in the page that fetched them.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// How long a toast stays on screen
pub const TOAST_TIMEOUT_MS: u32 = 5000;

/// Screens reachable from the sidebar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Leads,
    Clients,
    Projects,
    Vault,
    Reports,
    Trash,
    Settings,
    Help,
    AdminLeads,
    AdminClients,
    AdminProjects,
    AdminImport,
    AdminBackups,
}

impl Page {
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Page::AdminLeads | Page::AdminClients | Page::AdminProjects | Page::AdminImport | Page::AdminBackups
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,
    /// Last toast id handed out
    pub next_toast_id: u32,
    /// Current screen
    pub page: Page,
    /// Sidebar shows icons only
    pub sidebar_collapsed: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and schedule its removal
pub fn push_toast(store: &AppStore, kind: ToastKind, message: &str) {
    let id = {
        let next_field = store.next_toast_id();
        let mut next = next_field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, kind, message: message.to_string() });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
        dismiss_toast(&store, id);
    });
}

pub fn toast_success(store: &AppStore, message: &str) {
    push_toast(store, ToastKind::Success, message);
}

/// Remove a toast by ID
pub fn dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|toast| toast.id != id);
}

/// Switch the main outlet to another screen
pub fn navigate(store: &AppStore, page: Page) {
    store.page().set(page);
}

pub fn toggle_sidebar(store: &AppStore) {
    store.sidebar_collapsed().update(|collapsed| *collapsed = !*collapsed);
}
