//! Trash Page
//!
//! Soft-deleted clients, leads and projects. Records can be restored or purged for good;
//! clients also support purging a selection at once.

use std::collections::HashSet;

use crm_core::domain::{EntityKind, TrashItem};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use super::records::short_date;
use crate::components::ConfirmButton;
use crate::context::use_session;
use crate::store::{toast_success, use_app_store};

#[component]
pub fn TrashPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let kind = RwSignal::new(EntityKind::Client);
    let items = RwSignal::new(Vec::<TrashItem>::new());
    let selected = RwSignal::new(HashSet::<u32>::new());
    let loading = RwSignal::new(true);
    let (reload, set_reload) = signal(0u32);
    let refresh = move || set_reload.update(|n| *n += 1);

    Effect::new(move |_| {
        reload.track();
        let current = kind.get();
        let api = session.api();
        loading.set(true);
        selected.set(HashSet::new());
        spawn_local(async move {
            let list = api.list_trash(current).await.unwrap_or_default();
            if kind.get_untracked() == current {
                items.set(list);
                loading.set(false);
            }
        });
    });

    let label = move |k: EntityKind| session.tenant.with(|t| t.labels.for_kind(k).to_string());

    let restore = move |id: u32| {
        let current = kind.get_untracked();
        let api = session.api();
        spawn_local(async move {
            if api.restore_entity(current, id).await.is_ok() {
                info!("[Trash] Restored {} {}", current.as_str(), id);
                toast_success(&store, &format!("{} restored", label(current)));
                refresh();
            }
        });
    };

    let purge = move |id: u32| {
        let current = kind.get_untracked();
        let api = session.api();
        spawn_local(async move {
            if api.purge_entity(current, id).await.is_ok() {
                info!("[Trash] Purged {} {}", current.as_str(), id);
                toast_success(&store, &format!("{} permanently deleted", label(current)));
                refresh();
            }
        });
    };

    let purge_selected = move || {
        let ids: Vec<u32> = selected.with_untracked(|s| s.iter().copied().collect());
        if ids.is_empty() {
            return;
        }
        let api = session.api();
        spawn_local(async move {
            if api.bulk_purge_clients(&ids).await.is_ok() {
                info!("[Trash] Purged {} clients", ids.len());
                toast_success(&store, &format!("{} record(s) permanently deleted", ids.len()));
                refresh();
            }
        });
    };

    let is_clients = move || kind.get() == EntityKind::Client;
    let toggle = move |id: u32| {
        selected.update(|s| {
            if !s.remove(&id) {
                s.insert(id);
            }
        })
    };

    view! {
        <div class="trash-page">
            <header class="page-header">
                <h1>"Trash"</h1>
            </header>
            <div class="status-tabs" role="tablist">
                {EntityKind::ALL.iter().map(|&k| view! {
                    <button
                        role="tab"
                        class=move || if kind.get() == k { "status-tab active" } else { "status-tab" }
                        on:click=move |_| kind.set(k)
                    >
                        {move || label(k)}
                    </button>
                }).collect_view()}
            </div>
            <Show when=move || is_clients() && selected.with(|s| !s.is_empty())>
                <div class="bulk-actions">
                    <ConfirmButton
                        label="Purge selected"
                        prompt="Permanently delete the selected records?"
                        on_confirm=Callback::new(move |_| purge_selected())
                    />
                </div>
            </Show>
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <Show
                when=move || !loading.get() && items.with(Vec::is_empty)
                fallback=move || view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <Show when=is_clients>
                                    <th></th>
                                </Show>
                                <th>"Name"</th>
                                <th>"Deleted"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || items.get()
                                key=|item| item.id
                                children=move |item| {
                                    let id = item.id;
                                    view! {
                                        <tr>
                                            <Show when=is_clients>
                                                <td>
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || selected.with(|s| s.contains(&id))
                                                        on:change=move |_| toggle(id)
                                                    />
                                                </td>
                                            </Show>
                                            <td>{item.name.clone()}</td>
                                            <td>{short_date(Some(&item.deleted_at))}</td>
                                            <td class="row-actions">
                                                <button class="restore-btn" on:click=move |_| restore(id)>
                                                    "Restore"
                                                </button>
                                                <ConfirmButton
                                                    label="Purge"
                                                    prompt="Delete forever?"
                                                    on_confirm=Callback::new(move |_| purge(id))
                                                />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }
            >
                <p class="empty-state">"Trash is empty"</p>
            </Show>
        </div>
    }
}
