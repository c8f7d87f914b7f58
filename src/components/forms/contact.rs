use crm_core::domain::{Contact, EntityKind};
use crm_core::validation::{ContactInput, FormMode};
use leptos::prelude::*;

use super::{mode_of, FormActions, FormStatus};
use crate::components::fields::{bind, bind_label, field_error, PhoneField, TextAreaField, TextField};
use crate::context::use_session;
use crate::store::use_app_store;

/// Contact person under a client or lead
#[component]
pub fn ContactForm(
    contact: Option<Contact>,
    parent: (EntityKind, u32),
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let mode = mode_of(&contact);
    let id = contact.as_ref().map(|c| c.id);
    let initial = match &contact {
        Some(contact) => ContactInput::from(contact),
        None => ContactInput::for_parent(parent.0, parent.1),
    };
    let form = RwSignal::new(initial);
    let status = FormStatus::new();
    let err = move |field| field_error(status.errors, field);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut input = form.get_untracked().normalized(mode);
        if mode == FormMode::Create {
            input = input.with_create_defaults();
        }
        if !status.check(input.validate(mode)) {
            return;
        }

        let api = session.api();
        let message = if id.is_some() { "Contact updated" } else { "Contact added" };
        status.submit(store, message.to_string(), on_saved, async move {
            match id {
                Some(id) => api.update_contact(id, &input).await,
                None => api.create_contact(&input).await,
            }
        });
    };

    view! {
        <form class="entity-form compact" on:submit=on_submit novalidate>
            <div class="form-grid">
                <TextField label="First Name" binding=bind!(form, first_name) error=err("first_name") required=true />
                <TextField label="Last Name" binding=bind!(form, last_name) error=err("last_name") />
                <TextField label="Title" binding=bind!(form, title) error=err("title") />
                <TextField label="Email" input_type="email" binding=bind!(form, email) error=err("email") />
                <PhoneField
                    label="Phone"
                    number=bind!(form, phones.phone)
                    phone_label=bind_label!(form, phones.phone_label)
                    error=err("phone")
                />
                <PhoneField
                    label="Secondary Phone"
                    number=bind!(form, phones.secondary_phone)
                    phone_label=bind_label!(form, phones.secondary_phone_label)
                    error=err("secondary_phone")
                />
            </div>
            <TextAreaField label="Notes" binding=bind!(form, notes) rows=2 />
            {move || err("client_id").get().map(|message| view! { <p class="field-error">{message}</p> })}
            <FormActions status=status mode=mode on_cancel=on_cancel />
        </form>
    }
}
