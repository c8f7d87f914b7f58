//! Form Fields
//!
//! Labelled inputs bound to one `Option<String>` field of a form's input struct, with the
//! field's validation message underneath.

use crm_core::domain::PhoneLabel;
use crm_core::validation::ValidationErrors;
use leptos::prelude::*;

/// Two-way link between an input element and a field of the form state
#[derive(Clone, Copy)]
pub struct Binding {
    pub value: Signal<String>,
    pub set: Callback<String>,
}

impl Binding {
    /// Bind a plain text signal
    pub fn text(signal: RwSignal<String>) -> Self {
        Self { value: signal.into(), set: Callback::new(move |value| signal.set(value)) }
    }
}

/// Bind an `Option<String>` field of an `RwSignal<Input>`; empty text is kept and normalised
/// away on submit
macro_rules! bind {
    ($state:expr, $($path:ident).+) => {{
        let state = $state;
        $crate::components::fields::Binding {
            value: ::leptos::prelude::Signal::derive(move || {
                state.with(|s| s.$($path).+.clone().unwrap_or_default())
            }),
            set: ::leptos::prelude::Callback::new(move |value: String| {
                state.update(|s| s.$($path).+ = Some(value))
            }),
        }
    }};
}
pub(crate) use bind;

/// Bind an `Option<PhoneLabel>` field; the select shows `work` when unset
macro_rules! bind_label {
    ($state:expr, $($path:ident).+) => {{
        let state = $state;
        $crate::components::fields::Binding {
            value: ::leptos::prelude::Signal::derive(move || {
                state.with(|s| s.$($path).+.unwrap_or_default().as_str().to_string())
            }),
            set: ::leptos::prelude::Callback::new(move |value: String| {
                state.update(|s| s.$($path).+ = crm_core::domain::PhoneLabel::parse(&value))
            }),
        }
    }};
}
pub(crate) use bind_label;

/// Message for one field, tracked
pub fn field_error(errors: RwSignal<ValidationErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
}

/// `(value, label)` pairs for the phone label select
pub fn phone_label_options() -> Vec<(String, String)> {
    PhoneLabel::ALL
        .iter()
        .map(|label| (label.as_str().to_string(), crm_core::config::capitalize(label.as_str())))
        .collect()
}

/// Same value used as both option value and text
pub fn plain_options(values: &[String]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.clone(), v.clone())).collect()
}

#[component]
fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    move || error.get().map(|message| view! { <p class="field-error">{message}</p> })
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    binding: Binding,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional)] required: bool,
    #[prop(into, optional)] placeholder: String,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    view! {
        <label class="form-field" class:has-error=move || error.with(Option::is_some)>
            <span class="form-label">
                {label}
                {required.then_some(view! { <span class="required">" *"</span> })}
            </span>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || binding.value.get()
                on:input=move |ev| binding.set.run(event_target_value(&ev))
            />
            <FieldError error=error />
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    binding: Binding,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
    #[prop(default = 3)] rows: u32,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    view! {
        <label class="form-field" class:has-error=move || error.with(Option::is_some)>
            <span class="form-label">{label}</span>
            <textarea
                rows=rows
                prop:value=move || binding.value.get()
                on:input=move |ev| binding.set.run(event_target_value(&ev))
            ></textarea>
            <FieldError error=error />
        </label>
    }
}

/// Select over `(value, label)` pairs; `placeholder` adds an empty first option
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    binding: Binding,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    view! {
        <label class="form-field" class:has-error=move || error.with(Option::is_some)>
            <span class="form-label">{label}</span>
            <select
                prop:value=move || binding.value.get()
                on:change=move |ev| binding.set.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {move || {
                    let current = binding.value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(value, text)| {
                            let selected = value == current;
                            view! { <option value=value selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError error=error />
        </label>
    }
}

/// Phone number with its label select beside it
#[component]
pub fn PhoneField(
    #[prop(into)] label: String,
    number: Binding,
    phone_label: Binding,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let error = error.unwrap_or_else(|| Signal::derive(|| None));
    view! {
        <div class="form-field phone-field" class:has-error=move || error.with(Option::is_some)>
            <span class="form-label">{label}</span>
            <div class="phone-row">
                <input
                    type="tel"
                    prop:value=move || number.value.get()
                    on:input=move |ev| number.set.run(event_target_value(&ev))
                />
                <select
                    aria-label="Phone label"
                    prop:value=move || phone_label.value.get()
                    on:change=move |ev| phone_label.set.run(event_target_value(&ev))
                >
                    {phone_label_options()
                        .into_iter()
                        .map(|(value, text)| view! { <option value=value>{text}</option> })
                        .collect_view()}
                </select>
            </div>
            <FieldError error=error />
        </div>
    }
}
