//! Entity List Screens
//!
//! Paged card/table list shared by the Clients, Leads and Projects pages and by the admin
//! overviews. The server pages and orders; status/type filters and column sorting apply to the
//! loaded page.

use crm_core::api::PageQuery;
use crm_core::domain::{EntityKind, User};
use crm_core::prefs::{status_counts, Pagination, StatusFilter, ViewMode, ALL_STATUSES};
use crm_core::sorting::{card_sort_options, sort_columns, SortState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info};

use super::records::ListRecord;
use crate::browser::LocalStore;
use crate::components::{
    AssignSelect, ConfirmButton, EntityDetail, PaginationControls, SortHeader, StatusTab, StatusTabs,
};
use crate::context::use_session;
use crate::store::{toast_success, use_app_store};

/// Open create/edit form
#[derive(Clone, PartialEq)]
enum Editor<R> {
    Closed,
    Create,
    Edit(R),
}

fn status_badge_class<R: ListRecord>(status: &str, tenant: &crm_core::TenantConfig) -> String {
    match R::KIND {
        EntityKind::Lead => format!("status-badge {}", tenant.status_color(status)),
        _ => format!("status-badge status-{}", status),
    }
}

/// List screen for one record kind; `admin` switches to the all-users overview
pub fn record_list<R: ListRecord>(admin: bool) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let kind = R::KIND;
    let scope = if admin { format!("admin_{}", kind.collection()) } else { kind.collection().to_string() };

    let pagination = RwSignal::new(session.tenant.with_untracked(|t| Pagination::load(&LocalStore, &scope, t, kind)));
    let status_filter = RwSignal::new(StatusFilter::load(&LocalStore, &scope));
    let type_filter = RwSignal::new(String::new());
    let sort = RwSignal::new(SortState::from_legacy(pagination.get_untracked().sort_order, kind));

    let rows = RwSignal::new(Vec::<R>::new());
    let total = RwSignal::new(0u32);
    let loading = RwSignal::new(true);
    let (reload, set_reload) = signal(0u32);
    let generation = StoredValue::new(0u32);
    let editor = RwSignal::new(Editor::<R>::Closed);
    let detail = RwSignal::new(None::<(u32, String)>);

    let users = RwSignal::new(Vec::<User>::new());
    let user_filter = RwSignal::new(String::new());
    let checked = RwSignal::new(Vec::<u32>::new());
    let bulk_delete = admin && kind == EntityKind::Lead;

    if admin {
        let api = session.api();
        spawn_local(async move {
            if let Ok(list) = api.list_users().await {
                users.set(list);
            }
        });
    }

    // View mode changes must not refetch
    let page_key = Memo::new(move |_| pagination.with(|p| (p.current_page, p.per_page, p.sort_order)));

    Effect::new(move |_| {
        let (page, per_page, sort_order) = page_key.get();
        let user_email = user_filter.get();
        reload.track();

        let api = session.api();
        let request_id = generation.get_value() + 1;
        generation.set_value(request_id);
        loading.set(true);
        spawn_local(async move {
            let query = PageQuery { page, per_page, sort: sort_order };
            let result = if admin {
                api.list_all_page::<R::Page>(kind, &query, Some(user_email.as_str())).await
            } else {
                api.list_page::<R::Page>(kind, &query).await
            };
            // A newer request superseded this one
            if generation.get_value() != request_id {
                return;
            }
            if let Ok(page_data) = result {
                let (list, count) = R::into_rows(page_data);
                debug!("[List] {} page {} -> {} of {}", kind.collection(), page, list.len(), count);
                rows.set(list);
                total.set(count);
                checked.set(Vec::new());
            }
            loading.set(false);
        });
    });

    let refresh = move || set_reload.update(|n| *n += 1);

    let visible = Signal::derive(move || {
        let filter = status_filter.get();
        let business_type = type_filter.get();
        let filtered: Vec<R> = rows.with(|rows| {
            rows.iter()
                .filter(|r| filter.matches(r.status()))
                .filter(|r| business_type.is_empty() || r.business_type() == Some(business_type.as_str()))
                .cloned()
                .collect()
        });
        sort.with(|s| s.sort_rows(&filtered))
    });

    let tabs = Signal::derive(move || {
        session.tenant.with(|tenant| {
            let options = R::status_options(tenant);
            let values: Vec<String> = options.iter().map(|(value, _)| value.clone()).collect();
            let counts = rows.with(|rows| status_counts(rows, R::status, &values, Some(total.get())));
            counts
                .into_iter()
                .map(|(value, count)| {
                    let label = if value == ALL_STATUSES {
                        "All".to_string()
                    } else {
                        options.iter().find(|(v, _)| *v == value).map(|(_, l)| l.clone()).unwrap_or_default()
                    };
                    StatusTab { value, label, count }
                })
                .collect::<Vec<_>>()
        })
    });

    let on_status = Callback::new(move |value: String| {
        status_filter.update(|f| {
            if value == ALL_STATUSES {
                f.clear(&LocalStore);
            } else {
                f.set(&LocalStore, &value);
            }
        });
    });

    // Column sort applies to the page; the persisted order follows when it has an equivalent
    let apply_sort = move |next: SortState| {
        let legacy = next.to_legacy(kind);
        sort.set(next);
        if pagination.with_untracked(|p| p.sort_order) != legacy {
            pagination.update(|p| p.set_sort_order(&LocalStore, legacy));
        }
    };
    let on_sort = Callback::new(move |field: String| {
        let mut next = sort.get_untracked();
        next.handle_sort(&field);
        apply_sort(next);
    });

    let delete = move |id: u32| {
        let api = session.api();
        spawn_local(async move {
            if api.delete_entity(kind, id).await.is_ok() {
                info!("[List] Deleted {} {}", kind.as_str(), id);
                toast_success(&store, "Moved to Deletes");
                refresh();
            }
        });
    };

    let delete_checked = move || {
        let ids = checked.get_untracked();
        if ids.is_empty() {
            return;
        }
        let api = session.api();
        spawn_local(async move {
            if api.bulk_delete_leads(&ids).await.is_ok() {
                toast_success(&store, &format!("Deleted {} lead(s)", ids.len()));
                refresh();
            }
        });
    };

    let toggle_checked = move |id: u32| {
        checked.update(|ids| match ids.iter().position(|x| *x == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id),
        });
    };

    let label = move || session.tenant.with(|t| t.labels.for_kind(kind).to_string());
    let heading = move || if admin { format!("{}s Overview", label()) } else { format!("{}s", label()) };
    let view_mode = move || pagination.with(|p| p.view_mode);

    let on_saved = Callback::new(move |_| {
        editor.set(Editor::Closed);
        refresh();
    });
    let on_cancel = Callback::new(move |_| editor.set(Editor::Closed));

    let editor_view = move || match editor.get() {
        Editor::Closed => ().into_any(),
        Editor::Create => view! {
            <div class="form-panel">
                <h2>{format!("New {}", label())}</h2>
                {R::form(None, on_saved, on_cancel)}
            </div>
        }
        .into_any(),
        Editor::Edit(record) => view! {
            <div class="form-panel">
                <h2>{format!("Edit {}", record.title())}</h2>
                {R::form(Some(record), on_saved, on_cancel)}
            </div>
        }
        .into_any(),
    };

    let actions = move |record: R| {
        let id = record.id();
        let title = record.title();
        let assigned = record.assigned_user().map(|(user_id, _)| user_id);
        view! {
            <div class="row-actions">
                <button class="view-btn" on:click=move |_| detail.set(Some((id, title.clone())))>"View"</button>
                <button class="edit-btn" on:click=move |_| editor.set(Editor::Edit(record.clone()))>"Edit"</button>
                {admin.then(|| view! {
                    <AssignSelect kind=kind id=id current=assigned users=users on_assigned=Callback::new(move |_| refresh()) />
                })}
                <ConfirmButton on_confirm=Callback::new(move |_| delete(id)) />
            </div>
        }
    };

    let table_view = move || {
        view! {
            <table class="data-table">
                <thead>
                    <tr>
                        {bulk_delete.then(|| view! { <th class="check-col"></th> })}
                        {sort_columns(kind)
                            .iter()
                            .map(|column| view! { <SortHeader field=column.field label=column.label sort=sort on_sort=on_sort /> })
                            .collect_view()}
                        {admin.then(|| view! { <th>"Assigned To"</th> })}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || session.tenant.with(|tenant| {
                        visible.get().into_iter().map(|record| {
                            let id = record.id();
                            let assigned_name = record.assigned_user().map(|(_, name)| name).unwrap_or_default();
                            view! {
                                <tr>
                                    {bulk_delete.then(|| view! {
                                        <td class="check-col">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || checked.with(|ids| ids.contains(&id))
                                                on:change=move |_| toggle_checked(id)
                                            />
                                        </td>
                                    })}
                                    {record.cells(tenant).into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                    {admin.then(|| view! { <td>{assigned_name}</td> })}
                                    <td>{actions(record.clone())}</td>
                                </tr>
                            }
                        }).collect_view()
                    })}
                </tbody>
            </table>
        }
    };

    let cards_view = move || {
        view! {
            <div class="card-grid">
                {move || session.tenant.with(|tenant| {
                    visible.get().into_iter().map(|record| {
                        let status = record.status().map(str::to_string);
                        view! {
                            <div class="entity-card">
                                <div class="card-header">
                                    <h3>{record.title()}</h3>
                                    {status.map(|s| view! {
                                        <span class={status_badge_class::<R>(&s, tenant)}>{tenant.status_label(&s)}</span>
                                    })}
                                </div>
                                <ul class="card-lines">
                                    {record.card_lines(tenant).into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                                </ul>
                                {actions(record.clone())}
                            </div>
                        }
                    }).collect_view()
                })}
            </div>
        }
    };

    view! {
        <div class="list-page">
            <header class="page-header">
                <h1>{heading}</h1>
                <div class="header-actions">
                    <div class="view-toggle">
                        <button
                            class=move || if view_mode() == ViewMode::Cards { "active" } else { "" }
                            on:click=move |_| pagination.update(|p| p.set_view_mode(&LocalStore, ViewMode::Cards))
                        >
                            "Cards"
                        </button>
                        <button
                            class=move || if view_mode() == ViewMode::Table { "active" } else { "" }
                            on:click=move |_| pagination.update(|p| p.set_view_mode(&LocalStore, ViewMode::Table))
                        >
                            "Table"
                        </button>
                    </div>
                    <Show when=move || !admin>
                        <button class="primary-btn" on:click=move |_| editor.set(Editor::Create)>
                            {move || format!("+ New {}", label())}
                        </button>
                    </Show>
                </div>
            </header>

            {editor_view}

            <div class="list-filters">
                <StatusTabs tabs=tabs active=Signal::derive(move || status_filter.with(|f| f.value.clone())) on_select=on_status />
                <select
                    class="type-filter"
                    aria-label="Filter by type"
                    on:change=move |ev| type_filter.set(event_target_value(&ev))
                >
                    <option value="">"All types"</option>
                    {move || session.tenant.with(|t| t.business_types.iter().map(|bt| {
                        view! { <option value=bt.clone()>{bt.clone()}</option> }
                    }).collect_view())}
                </select>
                <Show when=move || admin>
                    <select
                        class="user-filter"
                        aria-label="Filter by user"
                        on:change=move |ev| {
                            user_filter.set(event_target_value(&ev));
                            pagination.update(|p| p.set_page(1));
                        }
                    >
                        <option value="">"All users"</option>
                        {move || users.get().into_iter().map(|u| {
                            view! { <option value=u.email.clone()>{u.email.clone()}</option> }
                        }).collect_view()}
                    </select>
                </Show>
                <Show when=move || view_mode() == ViewMode::Cards>
                    <select
                        class="card-sort"
                        aria-label="Sort"
                        prop:value=move || sort.with(SortState::card_value)
                        on:change=move |ev| {
                            if let Some(next) = SortState::from_card_value(kind, &event_target_value(&ev)) {
                                apply_sort(next);
                            }
                        }
                    >
                        {card_sort_options(kind)
                            .into_iter()
                            .map(|option| view! { <option value=option.value>{option.label}</option> })
                            .collect_view()}
                    </select>
                </Show>
                <Show when=move || bulk_delete && checked.with(|ids| !ids.is_empty())>
                    <ConfirmButton
                        label="Delete selected"
                        prompt="Delete selected leads?"
                        on_confirm=Callback::new(move |_| delete_checked())
                    />
                </Show>
            </div>

            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <Show
                when=move || !loading.get() && visible.with(Vec::is_empty)
                fallback=move || if view_mode() == ViewMode::Table { table_view().into_any() } else { cards_view().into_any() }
            >
                <p class="empty-state">{move || format!("No {}s found", label().to_lowercase())}</p>
            </Show>

            <PaginationControls
                page=Signal::derive(move || pagination.with(|p| p.current_page))
                per_page=Signal::derive(move || pagination.with(|p| p.per_page))
                total=total
                on_page=Callback::new(move |page| pagination.update(|p| p.set_page(page)))
                on_per_page=Callback::new(move |size| pagination.update(|p| p.set_per_page(&LocalStore, size)))
            />

            {move || detail.get().map(|(id, name)| view! {
                <EntityDetail kind=kind id=id name=name on_close=Callback::new(move |_| detail.set(None)) />
            })}
        </div>
    }
}
