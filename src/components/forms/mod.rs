//! Entity Forms
//!
//! Create/edit forms for clients, leads, projects, contacts and interactions. Every form checks
//! its input locally first and shows each failing field inline; only a clean input is sent.

mod client;
mod company;
mod contact;
mod interaction;
mod lead;
mod project;

pub use client::ClientForm;
pub use contact::ContactForm;
pub use interaction::InteractionForm;
pub use lead::LeadForm;
pub use project::ProjectForm;

use std::future::Future;

use crm_core::validation::{FormMode, ValidationErrors};
use crm_core::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::store::{toast_success, AppStore};

/// Save state shared by every form
#[derive(Clone, Copy)]
pub(crate) struct FormStatus {
    pub errors: RwSignal<ValidationErrors>,
    pub saving: RwSignal<bool>,
    pub submit_error: RwSignal<Option<String>>,
}

impl FormStatus {
    pub fn new() -> Self {
        Self {
            errors: RwSignal::new(ValidationErrors::default()),
            saving: RwSignal::new(false),
            submit_error: RwSignal::new(None),
        }
    }

    /// Record local validation; `false` means the form must not be sent
    pub fn check(&self, result: Result<(), ValidationErrors>) -> bool {
        match result {
            Ok(()) => {
                self.errors.set(ValidationErrors::default());
                true
            }
            Err(errors) => {
                info!("[Form] {} field(s) invalid", errors.errors.len());
                self.errors.set(errors);
                false
            }
        }
    }

    /// Run a save in the background; success toasts and closes, failure stays on the form
    pub fn submit<Fut>(&self, store: AppStore, success: String, on_saved: Callback<()>, save: Fut)
    where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        if self.saving.get_untracked() {
            return;
        }
        let status = *self;
        status.saving.set(true);
        status.submit_error.set(None);
        spawn_local(async move {
            let result = save.await;
            status.saving.set(false);
            match result {
                Ok(()) => {
                    toast_success(&store, &success);
                    on_saved.run(());
                }
                Err(e) => {
                    warn!("[Form] Save failed: {}", e);
                    status.submit_error.set(Some(e.user_message()));
                }
            }
        });
    }
}

pub(crate) fn mode_of<T>(record: &Option<T>) -> FormMode {
    if record.is_some() {
        FormMode::Update
    } else {
        FormMode::Create
    }
}

/// Save/Cancel row
#[component]
pub(crate) fn FormActions(status: FormStatus, mode: FormMode, on_cancel: Callback<()>) -> impl IntoView {
    let save_label = match mode {
        FormMode::Create => "Create",
        FormMode::Update => "Save",
    };
    view! {
        {move || status.submit_error.get().map(|message| view! {
            <div class="form-error" role="alert">{message}</div>
        })}
        <div class="form-actions">
            <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
            <button type="submit" class="primary-btn" disabled=move || status.saving.get()>
                {move || if status.saving.get() { "Saving..." } else { save_label }}
            </button>
        </div>
    }
}
