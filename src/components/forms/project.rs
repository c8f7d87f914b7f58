use crm_core::api::PageQuery;
use crm_core::config::capitalize;
use crm_core::domain::{EntityKind, Project};
use crm_core::sorting::LegacySortOrder;
use crm_core::validation::{FormMode, ProjectInput, PROJECT_STATUSES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use super::{mode_of, FormActions, FormStatus};
use crate::components::fields::{
    bind, bind_label, field_error, plain_options, Binding, PhoneField, SelectField, TextAreaField,
    TextField,
};
use crate::context::use_session;
use crate::store::use_app_store;

/// Owner choices offered when a project is created from the list page
const PARENT_CHOICES: u32 = 100;

fn parent_value(input: &ProjectInput) -> String {
    match (input.client_id, input.lead_id) {
        (Some(id), _) => format!("client:{}", id),
        (None, Some(id)) => format!("lead:{}", id),
        (None, None) => String::new(),
    }
}

fn set_parent(input: &mut ProjectInput, value: &str) {
    input.client_id = None;
    input.lead_id = None;
    if let Some((kind, id)) = value.split_once(':') {
        let id = id.parse().ok();
        match kind {
            "client" => input.client_id = id,
            "lead" => input.lead_id = id,
            _ => {}
        }
    }
}

/// Create a project, or edit `project` when given. `parent` pre-links a new project to the
/// client or lead it is created from.
#[component]
pub fn ProjectForm(
    project: Option<Project>,
    parent: Option<(EntityKind, u32)>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let mode = mode_of(&project);
    let id = project.as_ref().map(|p| p.id);

    let mut initial = project.as_ref().map(ProjectInput::from).unwrap_or_default();
    match parent {
        Some((EntityKind::Client, pid)) => initial.client_id = Some(pid),
        Some((EntityKind::Lead, pid)) => initial.lead_id = Some(pid),
        _ => {}
    }
    let form = RwSignal::new(initial);
    let status = FormStatus::new();

    // Owner picker, only when nothing fixed the owner already
    let parent_options = RwSignal::new(Vec::<(String, String)>::new());
    let pick_parent = mode == FormMode::Create && parent.is_none();
    if pick_parent {
        let api = session.api();
        let client_label = session.tenant.with_untracked(|t| t.labels.client.clone());
        spawn_local(async move {
            let query = PageQuery { page: 1, per_page: PARENT_CHOICES, sort: LegacySortOrder::Alphabetical };
            let mut options = Vec::new();
            match api.list_clients(&query).await {
                Ok(page) => options.extend(
                    page.clients
                        .into_iter()
                        .map(|c| (format!("client:{}", c.id), format!("{}: {}", client_label, c.name))),
                ),
                Err(e) => warn!("[ProjectForm] Failed to load clients: {}", e),
            }
            match api.list_leads(&query).await {
                Ok(page) => options.extend(
                    page.leads.into_iter().map(|l| (format!("lead:{}", l.id), format!("Lead: {}", l.name))),
                ),
                Err(e) => warn!("[ProjectForm] Failed to load leads: {}", e),
            }
            parent_options.set(options);
        });
    }
    let parent_binding = Binding {
        value: Signal::derive(move || form.with(parent_value)),
        set: Callback::new(move |value: String| form.update(|f| set_parent(f, &value))),
    };

    let worth_binding = Binding {
        value: Signal::derive(move || form.with(|f| f.project_worth.map(|w| w.to_string()).unwrap_or_default())),
        set: Callback::new(move |value: String| {
            // Unparseable text becomes NaN so validation reports it
            let worth = match value.trim() {
                "" => None,
                text => Some(text.replace(',', "").parse::<f64>().unwrap_or(f64::NAN)),
            };
            form.update(|f| f.project_worth = worth);
        }),
    };

    let business_types = Signal::derive(move || session.tenant.with(|t| plain_options(&t.business_types)));
    let statuses: Vec<(String, String)> =
        PROJECT_STATUSES.iter().map(|s| (s.to_string(), capitalize(s))).collect();
    let standalone = move || {
        session.tenant.with(|t| t.features.enable_project_standalone)
            && form.with(|f| f.client_id.is_none() && f.lead_id.is_none())
    };
    let err = move |field| field_error(status.errors, field);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut input = form.get_untracked().normalized(mode);
        if mode == FormMode::Create {
            input = input.with_create_defaults();
        }
        if !status.check(session.tenant.with_untracked(|t| input.validate(mode, t))) {
            return;
        }

        let api = session.api();
        let message = if id.is_some() { "Project updated" } else { "Project created" };
        status.submit(store, message.to_string(), on_saved, async move {
            match id {
                Some(id) => api.update_project(id, &input).await,
                None => api.create_project(&input).await,
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=on_submit novalidate>
            <div class="form-grid">
                <TextField label="Project Name" binding=bind!(form, project_name) error=err("project_name") required=true />
                <SelectField label="Type" binding=bind!(form, business_type) options=business_types error=err("type") />
                <SelectField
                    label="Status"
                    binding=bind!(form, project_status)
                    options=statuses
                    error=err("project_status")
                    placeholder="Select status"
                />
                <TextField label="Value" input_type="number" binding=worth_binding error=err("project_worth") />
                <TextField label="Start Date" input_type="date" binding=bind!(form, project_start) error=err("project_start") />
                <TextField label="End Date" input_type="date" binding=bind!(form, project_end) error=err("project_end") />
                <Show when=move || pick_parent>
                    <SelectField
                        label="Linked To"
                        binding=parent_binding
                        options=parent_options
                        error=err("client_id")
                        placeholder="No link (standalone)"
                    />
                </Show>
            </div>
            <TextAreaField label="Description" binding=bind!(form, project_description) />
            <Show when=standalone>
                <fieldset class="form-section">
                    <legend>"Primary Contact"</legend>
                    <div class="form-grid">
                        <TextField label="Name" binding=bind!(form, primary_contact_name) error=err("primary_contact_name") />
                        <TextField label="Title" binding=bind!(form, primary_contact_title) error=err("primary_contact_title") />
                        <TextField
                            label="Email"
                            input_type="email"
                            binding=bind!(form, primary_contact_email)
                            error=err("primary_contact_email")
                        />
                        <PhoneField
                            label="Phone"
                            number=bind!(form, primary_contact_phone)
                            phone_label=bind_label!(form, primary_contact_phone_label)
                            error=err("primary_contact_phone")
                        />
                    </div>
                </fieldset>
            </Show>
            <TextAreaField label="Notes" binding=bind!(form, notes) />
            <FormActions status=status mode=mode on_cancel=on_cancel />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_value_round_trip() {
        let mut input = ProjectInput::default();
        set_parent(&mut input, "lead:7");
        assert_eq!((input.client_id, input.lead_id), (None, Some(7)));
        assert_eq!(parent_value(&input), "lead:7");

        set_parent(&mut input, "");
        assert_eq!((input.client_id, input.lead_id), (None, None));
        assert_eq!(parent_value(&input), "");
    }
}
