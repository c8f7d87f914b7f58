//! Settings Page
//!
//! Account summary. Debug builds also get a button that sends a test error report.

use crm_core::api::{ErrorLevel, ErrorReport};
use crm_core::ApiEvents;
use leptos::prelude::*;
use tracing::info;

use crate::context::use_session;
use crate::store::{toast_success, use_app_store};

#[component]
fn TestReportButton() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let send = move |_| {
        info!("[Settings] Sending test error report");
        session.events().capture(ErrorReport {
            level: ErrorLevel::Error,
            message: "Test error report".to_string(),
            url: "settings".to_string(),
            status: None,
            method: None,
            context: Some("Triggered from the settings page".to_string()),
        });
        let sent = if session.config().error_report_url.is_some() {
            "Test report sent"
        } else {
            "Test report logged (no report URL configured)"
        };
        toast_success(&store, sent);
    };
    view! {
        <section class="settings-section">
            <h2>"Diagnostics"</h2>
            <button class="secondary-btn" on:click=send>"Send test error report"</button>
        </section>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session();
    let company = move || session.tenant.with(|t| t.branding.company_name.clone());
    let roles = move || {
        session.user.with(|u| {
            u.as_ref()
                .map(|u| u.roles.join(", "))
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "-".to_string())
        })
    };

    view! {
        <div class="settings-page">
            <header class="page-header">
                <h1>"Settings"</h1>
            </header>
            <section class="settings-section">
                <h2>"Account"</h2>
                <dl class="detail-list">
                    <dt>"Email"</dt>
                    <dd>{move || session.user_email()}</dd>
                    <dt>"Company"</dt>
                    <dd>{company}</dd>
                    <dt>"Roles"</dt>
                    <dd>{roles}</dd>
                </dl>
                <button class="secondary-btn" on:click=move |_| session.logout()>"Log out"</button>
            </section>
            {cfg!(debug_assertions).then(|| view! { <TestReportButton /> })}
        </div>
    }
}
