//! Company block shared by the client and lead forms

use crm_core::validation::{CompanyFields, ValidationErrors};
use leptos::prelude::*;

use crate::components::fields::{
    bind, bind_label, field_error, plain_options, PhoneField, SelectField, TextAreaField, TextField,
};
use crate::context::use_session;

#[component]
pub fn CompanySection(company: RwSignal<CompanyFields>, errors: RwSignal<ValidationErrors>) -> impl IntoView {
    let session = use_session();
    let business_types = Signal::derive(move || session.tenant.with(|t| plain_options(&t.business_types)));
    let err = move |field| field_error(errors, field);

    view! {
        <div class="form-grid">
            <TextField label="Name" binding=bind!(company, name) error=err("name") required=true />
            <SelectField
                label="Type"
                binding=bind!(company, business_type)
                options=business_types
                error=err("type")
            />
            <TextField label="Contact Person" binding=bind!(company, contact_person) error=err("contact_person") />
            <TextField label="Contact Title" binding=bind!(company, contact_title) error=err("contact_title") />
            <TextField label="Email" input_type="email" binding=bind!(company, email) error=err("email") />
            <PhoneField
                label="Phone"
                number=bind!(company, phones.phone)
                phone_label=bind_label!(company, phones.phone_label)
                error=err("phone")
            />
            <PhoneField
                label="Secondary Phone"
                number=bind!(company, phones.secondary_phone)
                phone_label=bind_label!(company, phones.secondary_phone_label)
                error=err("secondary_phone")
            />
            <TextField label="Address" binding=bind!(company, address) error=err("address") />
            <TextField label="City" binding=bind!(company, city) error=err("city") />
            <TextField label="State" binding=bind!(company, state) error=err("state") />
            <TextField label="ZIP" binding=bind!(company, zip) error=err("zip") />
        </div>
        <TextAreaField label="Notes" binding=bind!(company, notes) />
    }
}
