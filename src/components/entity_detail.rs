//! Entity Detail Panel
//!
//! Contacts and interaction history of one client, lead or project. Follow-ups that are
//! still pending get "add to calendar" links.

use crm_core::calendar::{google_calendar_url, outlook_calendar_url};
use crm_core::domain::{Contact, EntityKind, Interaction};
use crm_core::validation::split_date_time;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::components::forms::{ContactForm, InteractionForm};
use crate::components::ConfirmButton;
use crate::context::use_session;
use crate::store::{toast_success, use_app_store};

/// Which inline form is open
#[derive(Clone, Debug, PartialEq)]
enum Editing {
    None,
    NewContact,
    Contact(Contact),
    NewInteraction,
    Interaction(Interaction),
}

fn display_date_time(iso: &str) -> String {
    match split_date_time(iso) {
        (date, _) if date.is_empty() => iso.to_string(),
        (date, time) if time.is_empty() => date,
        (date, time) => format!("{} {}", date, time),
    }
}

fn contact_name(contact: &Contact) -> String {
    match contact.last_name.as_deref().filter(|s| !s.is_empty()) {
        Some(last) => format!("{} {}", contact.first_name, last),
        None => contact.first_name.clone(),
    }
}

#[component]
pub fn EntityDetail(kind: EntityKind, id: u32, #[prop(into)] name: String, on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();

    let contacts = RwSignal::new(Vec::<Contact>::new());
    let interactions = RwSignal::new(Vec::<Interaction>::new());
    let loading = RwSignal::new(true);
    let editing = RwSignal::new(Editing::None);
    let (reload, set_reload) = signal(0u32);
    let has_contacts = kind != EntityKind::Project;

    Effect::new(move |_| {
        reload.track();
        let api = session.api();
        loading.set(true);
        spawn_local(async move {
            if has_contacts {
                if let Ok(list) = api.list_contacts(kind, id).await {
                    contacts.set(list);
                }
            }
            if let Ok(list) = api.list_interactions(kind, id).await {
                interactions.set(list);
            }
            debug!("[Detail] Loaded {} {}", kind.as_str(), id);
            loading.set(false);
        });
    });

    let saved = Callback::new(move |_| {
        editing.set(Editing::None);
        set_reload.update(|n| *n += 1);
    });
    let cancel = Callback::new(move |_| editing.set(Editing::None));

    let delete_contact = move |contact_id: u32| {
        let api = session.api();
        spawn_local(async move {
            if api.delete_contact(contact_id).await.is_ok() {
                toast_success(&store, "Contact deleted");
                set_reload.update(|n| *n += 1);
            }
        });
    };
    let delete_interaction = move |interaction_id: u32| {
        let api = session.api();
        spawn_local(async move {
            if api.delete_interaction(interaction_id).await.is_ok() {
                toast_success(&store, "Interaction deleted");
                set_reload.update(|n| *n += 1);
            }
        });
    };

    let inline_form = move || match editing.get() {
        Editing::None => ().into_any(),
        Editing::NewContact => view! { <ContactForm contact=None parent=(kind, id) on_saved=saved on_cancel=cancel /> }.into_any(),
        Editing::Contact(contact) => {
            view! { <ContactForm contact=Some(contact) parent=(kind, id) on_saved=saved on_cancel=cancel /> }.into_any()
        }
        Editing::NewInteraction => {
            view! { <InteractionForm interaction=None parent=(kind, id) on_saved=saved on_cancel=cancel /> }.into_any()
        }
        Editing::Interaction(interaction) => view! {
            <InteractionForm interaction=Some(interaction) parent=(kind, id) on_saved=saved on_cancel=cancel />
        }
        .into_any(),
    };

    view! {
        <aside class="detail-panel">
            <header class="detail-header">
                <h2>{name}</h2>
                <button class="close-btn" title="Close" on:click=move |_| on_close.run(())>"✕"</button>
            </header>
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            {inline_form}

            <Show when=move || has_contacts>
                <section class="detail-section">
                    <div class="section-header">
                        <h3>"Contacts"</h3>
                        <button class="add-btn" on:click=move |_| editing.set(Editing::NewContact)>"+ Add Contact"</button>
                    </div>
                    <Show
                        when=move || contacts.with(|c| !c.is_empty())
                        fallback=|| view! { <p class="empty-state">"No contacts yet"</p> }
                    >
                        <ul class="contact-list">
                            <For
                                each=move || contacts.get()
                                key=|contact| (contact.id, contact.first_name.clone(), contact.email.clone())
                                children=move |contact| {
                                    let contact_id = contact.id;
                                    let edit_copy = contact.clone();
                                    view! {
                                        <li class="contact-row">
                                            <div class="contact-main">
                                                <strong>{contact_name(&contact)}</strong>
                                                {contact.title.clone().map(|t| view! { <span class="muted">{t}</span> })}
                                            </div>
                                            <div class="contact-meta">
                                                {contact.email.clone().map(|e| view! { <a href=format!("mailto:{}", e)>{e.clone()}</a> })}
                                                {contact.phone.clone().map(|p| view! { <a href=format!("tel:{}", p)>{p.clone()}</a> })}
                                            </div>
                                            <div class="row-actions">
                                                <button class="edit-btn" on:click=move |_| editing.set(Editing::Contact(edit_copy.clone()))>"Edit"</button>
                                                <ConfirmButton on_confirm=Callback::new(move |_| delete_contact(contact_id)) />
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </section>
            </Show>

            <section class="detail-section">
                <div class="section-header">
                    <h3>"Interactions"</h3>
                    <button class="add-btn" on:click=move |_| editing.set(Editing::NewInteraction)>"+ Log Interaction"</button>
                </div>
                <Show
                    when=move || interactions.with(|i| !i.is_empty())
                    fallback=|| view! { <p class="empty-state">"No interactions yet"</p> }
                >
                    <ul class="interaction-list">
                        <For
                            each=move || interactions.get()
                            key=|interaction| (interaction.id, interaction.summary.clone(), interaction.follow_up.clone())
                            children=move |interaction| {
                                let interaction_id = interaction.id;
                                let pending = interaction.has_pending_follow_up();
                                let google = google_calendar_url(&interaction);
                                let outlook = outlook_calendar_url(&interaction);
                                let edit_copy = interaction.clone();
                                view! {
                                    <li class="interaction-row">
                                        <div class="interaction-head">
                                            <span class="interaction-date">{display_date_time(&interaction.contact_date)}</span>
                                            <strong>{interaction.summary.clone()}</strong>
                                        </div>
                                        {(!interaction.outcome.is_empty()).then(|| view! {
                                            <p class="interaction-outcome">"Outcome: " {interaction.outcome.clone()}</p>
                                        })}
                                        {(!interaction.notes.is_empty()).then(|| view! {
                                            <p class="interaction-notes">{interaction.notes.clone()}</p>
                                        })}
                                        {interaction.follow_up.clone().map(|follow_up| view! {
                                            <div class=if pending { "follow-up pending" } else { "follow-up done" }>
                                                "Follow-up: " {display_date_time(&follow_up)}
                                                {pending.then(|| view! {
                                                    <span class="calendar-links">
                                                        {google.clone().map(|url| view! {
                                                            <a href=url target="_blank" rel="noopener noreferrer">"Google"</a>
                                                        })}
                                                        {outlook.clone().map(|url| view! {
                                                            <a href=url target="_blank" rel="noopener noreferrer">"Outlook"</a>
                                                        })}
                                                    </span>
                                                })}
                                            </div>
                                        })}
                                        <div class="row-actions">
                                            <button class="edit-btn" on:click=move |_| editing.set(Editing::Interaction(edit_copy.clone()))>"Edit"</button>
                                            <ConfirmButton on_confirm=Callback::new(move |_| delete_interaction(interaction_id)) />
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </section>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_time() {
        assert_eq!(display_date_time("2024-03-01T10:00:00"), "2024-03-01 10:00");
        assert_eq!(display_date_time("2024-03-01"), "2024-03-01");
        assert_eq!(display_date_time("soon"), "soon");
    }
}
