use crm_core::domain::Lead;
use crm_core::validation::{FormMode, LeadInput};
use leptos::prelude::*;

use super::company::CompanySection;
use super::{mode_of, FormActions, FormStatus};
use crate::components::fields::{bind, field_error, plain_options, SelectField};
use crate::context::use_session;
use crate::store::use_app_store;

/// Create a lead, or edit `lead` when given. Status and source lists come from the tenant.
#[component]
pub fn LeadForm(
    lead: Option<Lead>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let mode = mode_of(&lead);
    let id = lead.as_ref().map(|l| l.id);
    let initial = lead.as_ref().map(LeadInput::from).unwrap_or_default();

    let company = RwSignal::new(initial.company);
    let extra = RwSignal::new(LeadInput {
        lead_status: initial.lead_status,
        lead_source: initial.lead_source,
        ..Default::default()
    });
    let status = FormStatus::new();

    let statuses = Signal::derive(move || {
        session.tenant.with(|t| {
            t.leads
                .statuses
                .iter()
                .map(|s| (s.clone(), t.status_label(s)))
                .collect::<Vec<_>>()
        })
    });
    let sources = Signal::derive(move || session.tenant.with(|t| plain_options(&t.leads.sources)));
    let show_source = move || session.tenant.with(|t| t.features.show_source);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut input = LeadInput { company: company.get_untracked(), ..extra.get_untracked() }.normalized(mode);
        if mode == FormMode::Create {
            input = input.with_create_defaults();
        }
        if !status.check(session.tenant.with_untracked(|t| input.validate(mode, t))) {
            return;
        }

        let api = session.api();
        let message = if id.is_some() { "Lead updated" } else { "Lead created" };
        status.submit(store, message.to_string(), on_saved, async move {
            match id {
                Some(id) => api.update_lead(id, &input).await,
                None => api.create_lead(&input).await,
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=on_submit novalidate>
            <CompanySection company=company errors=status.errors />
            <div class="form-grid">
                <SelectField
                    label="Lead Status"
                    binding=bind!(extra, lead_status)
                    options=statuses
                    error=field_error(status.errors, "lead_status")
                    placeholder="Select status"
                />
                <Show when=show_source>
                    <SelectField
                        label="Lead Source"
                        binding=bind!(extra, lead_source)
                        options=sources
                        error=field_error(status.errors, "lead_source")
                        placeholder="Select source"
                    />
                </Show>
            </div>
            <FormActions status=status mode=mode on_cancel=on_cancel />
        </form>
    }
}
