use crm_core::config::capitalize;
use crm_core::domain::Client;
use crm_core::validation::{ClientInput, FormMode, CLIENT_STATUSES};
use leptos::prelude::*;

use super::company::CompanySection;
use super::{mode_of, FormActions, FormStatus};
use crate::components::fields::{bind, field_error, SelectField};
use crate::context::use_session;
use crate::store::use_app_store;

/// Create a client, or edit `client` when given
#[component]
pub fn ClientForm(
    client: Option<Client>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let mode = mode_of(&client);
    let id = client.as_ref().map(|c| c.id);
    let initial = client.as_ref().map(ClientInput::from).unwrap_or_default();

    let company = RwSignal::new(initial.company);
    let extra = RwSignal::new(ClientInput { status: initial.status, ..Default::default() });
    let status = FormStatus::new();
    let label = session.tenant.with_untracked(|t| t.labels.client.clone());

    let statuses: Vec<(String, String)> =
        CLIENT_STATUSES.iter().map(|s| (s.to_string(), capitalize(s))).collect();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut input = ClientInput { company: company.get_untracked(), ..extra.get_untracked() }.normalized(mode);
        if mode == FormMode::Create {
            input = input.with_create_defaults();
        }
        if !status.check(session.tenant.with_untracked(|t| input.validate(mode, t))) {
            return;
        }

        let api = session.api();
        let message = format!("{} {}", label, if id.is_some() { "updated" } else { "created" });
        status.submit(store, message, on_saved, async move {
            match id {
                Some(id) => api.update_client(id, &input).await,
                None => api.create_client(&input).await,
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=on_submit novalidate>
            <CompanySection company=company errors=status.errors />
            <SelectField
                label="Status"
                binding=bind!(extra, status)
                options=statuses
                error=field_error(status.errors, "status")
                placeholder="Select status"
            />
            <FormActions status=status mode=mode on_cancel=on_cancel />
        </form>
    }
}
