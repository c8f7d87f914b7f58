//! Browser side effects of API calls

use crm_core::api::{ApiEvents, ErrorLevel, ErrorReport};
use gloo_net::http::Request;
use leptos::task::spawn_local;
use rolling_logger::{LogRecord, RollingBuffer};
use serde::Serialize;
use tracing::{error, warn};
use web_sys::CustomEvent;

use crate::store::{push_toast, AppStore, ToastKind};

/// Window event the session listens to for a forced logout
pub const UNAUTHORIZED_EVENT: &str = "unauthorized";

#[derive(Serialize)]
struct ReportPayload {
    #[serde(flatten)]
    report: ErrorReport,
    /// Most recent log lines, oldest first
    breadcrumbs: Vec<LogRecord>,
}

#[derive(Clone)]
pub struct BrowserEvents {
    store: AppStore,
    report_url: Option<String>,
    breadcrumbs: Option<RollingBuffer>,
}

impl BrowserEvents {
    pub fn new(store: AppStore, report_url: Option<String>, breadcrumbs: Option<RollingBuffer>) -> Self {
        Self { store, report_url, breadcrumbs }
    }
}

impl ApiEvents for BrowserEvents {
    fn unauthorized(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match CustomEvent::new(UNAUTHORIZED_EVENT) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => error!("[Events] Failed to create {} event: {:?}", UNAUTHORIZED_EVENT, e),
        }
    }

    fn toast_error(&self, message: &str) {
        push_toast(&self.store, ToastKind::Error, message);
    }

    fn capture(&self, report: ErrorReport) {
        match report.level {
            ErrorLevel::Warning => warn!("[Report] {} ({})", report.message, report.url),
            ErrorLevel::Error => error!("[Report] {} ({})", report.message, report.url),
        }

        let Some(url) = self.report_url.clone() else {
            return;
        };
        let payload = ReportPayload {
            report,
            breadcrumbs: self.breadcrumbs.as_ref().map(RollingBuffer::snapshot).unwrap_or_default(),
        };

        // Fire and forget; a failing collector must not produce more reports
        spawn_local(async move {
            let sent = match Request::post(&url).json(&payload) {
                Ok(request) => request.send().await.map(|_| ()),
                Err(e) => Err(e),
            };
            if let Err(e) = sent {
                warn!("[Report] Could not deliver error report: {}", e);
            }
        });
    }
}
