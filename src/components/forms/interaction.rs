use crm_core::domain::{EntityKind, FollowUpStatus, Interaction};
use crm_core::validation::{combine_date_time, split_date_time, FormMode, InteractionInput};
use leptos::prelude::*;

use super::{mode_of, FormActions, FormStatus};
use crate::components::fields::{bind, field_error, Binding, SelectField, TextAreaField, TextField};
use crate::context::use_session;
use crate::store::use_app_store;

fn follow_up_status_value(status: Option<FollowUpStatus>) -> &'static str {
    match status {
        Some(FollowUpStatus::Completed) => "completed",
        Some(FollowUpStatus::Pending) => "pending",
        None => "",
    }
}

/// Date and time inputs for one datetime; both empty means no value
fn date_time_pair(iso: Option<&str>) -> (RwSignal<String>, RwSignal<String>) {
    let (date, time) = iso.map(split_date_time).unwrap_or_default();
    (RwSignal::new(date), RwSignal::new(time))
}

/// Combined value; a date that does not parse is passed through so validation flags it
fn combined(date: RwSignal<String>, time: RwSignal<String>) -> Option<String> {
    let date = date.get_untracked();
    let time = time.get_untracked();
    if date.trim().is_empty() {
        return None;
    }
    combine_date_time(&date, &time).or(Some(date))
}

/// Interaction logged against a client, lead or project
#[component]
pub fn InteractionForm(
    interaction: Option<Interaction>,
    parent: (EntityKind, u32),
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let mode = mode_of(&interaction);
    let id = interaction.as_ref().map(|i| i.id);
    let initial = match &interaction {
        Some(interaction) => InteractionInput::from(interaction),
        None => InteractionInput::for_parent(parent.0, parent.1),
    };

    let (contact_date, contact_time) = date_time_pair(initial.contact_date.as_deref());
    let (follow_date, follow_time) = date_time_pair(initial.follow_up.as_deref());
    let form = RwSignal::new(initial);
    let status = FormStatus::new();
    let err = move |field| field_error(status.errors, field);

    let follow_up_status = Binding {
        value: Signal::derive(move || form.with(|f| follow_up_status_value(f.followup_status).to_string())),
        set: Callback::new(move |value: String| {
            let parsed = match value.as_str() {
                "pending" => Some(FollowUpStatus::Pending),
                "completed" => Some(FollowUpStatus::Completed),
                _ => None,
            };
            form.update(|f| f.followup_status = parsed);
        }),
    };
    let follow_up_statuses = vec![
        ("pending".to_string(), "Pending".to_string()),
        ("completed".to_string(), "Completed".to_string()),
    ];

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut input = form.get_untracked();
        input.contact_date = combined(contact_date, contact_time);
        input.follow_up = combined(follow_date, follow_time);
        if mode == FormMode::Update {
            // Blank date inputs clear the stored value
            input.contact_date.get_or_insert_with(String::new);
            input.follow_up.get_or_insert_with(String::new);
        }
        if input.follow_up.as_deref().is_some_and(|f| !f.is_empty()) && input.followup_status.is_none() {
            input.followup_status = Some(FollowUpStatus::Pending);
        }
        let input = input.normalized(mode);
        if !status.check(input.validate(mode)) {
            return;
        }

        let api = session.api();
        let message = if id.is_some() { "Interaction updated" } else { "Interaction logged" };
        status.submit(store, message.to_string(), on_saved, async move {
            match id {
                Some(id) => api.update_interaction(id, &input).await,
                None => api.create_interaction(&input).await,
            }
        });
    };

    view! {
        <form class="entity-form compact" on:submit=on_submit novalidate>
            <div class="form-grid">
                <TextField
                    label="Contact Date"
                    input_type="date"
                    binding=Binding::text(contact_date)
                    error=err("contact_date")
                    required=true
                />
                <TextField label="Time" input_type="time" binding=Binding::text(contact_time) />
                <TextField label="Summary" binding=bind!(form, summary) error=err("summary") required=true />
                <TextField label="Outcome" binding=bind!(form, outcome) error=err("outcome") />
                <TextField label="Follow-up Date" input_type="date" binding=Binding::text(follow_date) error=err("follow_up") />
                <TextField label="Follow-up Time" input_type="time" binding=Binding::text(follow_time) />
                <Show when=move || mode == FormMode::Update>
                    <SelectField
                        label="Follow-up Status"
                        binding=follow_up_status
                        options=follow_up_statuses.clone()
                        placeholder="None"
                    />
                </Show>
            </div>
            <TextAreaField label="Notes" binding=bind!(form, notes) rows=3 />
            {move || err("parent").get().map(|message| view! { <p class="field-error">{message}</p> })}
            <FormActions status=status mode=mode on_cancel=on_cancel />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_status_values() {
        assert_eq!(follow_up_status_value(None), "");
        assert_eq!(follow_up_status_value(Some(FollowUpStatus::Completed)), "completed");
    }
}
