//! CRM Frontend App
//!
//! Root component: provides the store and session, then shows either the login screen or the
//! sidebar layout with the current page.

use crm_core::AppConfig;
use leptos::prelude::*;
use reactive_stores::Store;
use rolling_logger::RollingBuffer;
use tracing::info;

use crate::components::{Sidebar, Toasts};
use crate::context::SessionContext;
use crate::pages::{page_view, LoginPage};
use crate::store::{AppState, AppStateStoreFields, AppStore};

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

#[component]
pub fn App(logs: Option<RollingBuffer>) -> impl IntoView {
    let store: AppStore = Store::new(AppState::new());
    provide_context(store);

    let session = SessionContext::restore(store, AppConfig::from_env(), logs);
    provide_context(session);
    session.listen_for_unauthorized();

    Effect::new(move |_| {
        let title = session.tenant.with(|t| t.branding.company_name.clone());
        set_document_title(&title);
    });

    let current = move || {
        let page = store.page().get();
        info!("[App] Showing {:?}", page);
        page_view(page, session.is_admin())
    };

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <div class="app-layout">
                <Sidebar />
                <main class="main-content">
                    <ErrorBoundary fallback=|_errors| view! {
                        <div class="error-page">
                            <h2>"An error has occurred"</h2>
                            <p>"Please refresh the page."</p>
                        </div>
                    }>
                        {current}
                    </ErrorBoundary>
                </main>
            </div>
        </Show>
        <Toasts />
    }
}
