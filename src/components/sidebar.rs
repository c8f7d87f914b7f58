//! Sidebar Navigation
//!
//! Sections of the app; entity names follow the tenant's labels and the admin section is only
//! built for admins.

use leptos::prelude::*;

use crate::context::use_session;
use crate::store::{navigate, toggle_sidebar, use_app_store, AppStateStoreFields, Page};

struct NavItem {
    label: String,
    icon: &'static str,
    page: Page,
}

struct NavSection {
    title: &'static str,
    items: Vec<NavItem>,
}

fn item(label: impl Into<String>, icon: &'static str, page: Page) -> NavItem {
    NavItem { label: label.into(), icon, page }
}

fn nav_sections(client_label: &str, admin: bool) -> Vec<NavSection> {
    let client_icon = if client_label.eq_ignore_ascii_case("account") { "💼" } else { "👥" };
    let mut sections = vec![
        NavSection {
            title: "Main",
            items: vec![
                item("Leads", "🧲", Page::Leads),
                item(format!("{}s", client_label), client_icon, Page::Clients),
            ],
        },
        NavSection { title: "Projects", items: vec![item("Projects", "📁", Page::Projects)] },
        NavSection { title: "Vault", items: vec![item("Files", "🗄️", Page::Vault)] },
        NavSection { title: "Reports", items: vec![item("Reports", "📊", Page::Reports)] },
        NavSection {
            title: "Settings",
            items: vec![item("Settings", "⚙️", Page::Settings), item("Deletes", "🗑️", Page::Trash)],
        },
        NavSection { title: "Help", items: vec![item("User Guide", "❓", Page::Help)] },
    ];
    if admin {
        sections.push(NavSection {
            title: "Admin",
            items: vec![
                item("Leads Overview", "🧲", Page::AdminLeads),
                item("Accounts Overview", "💼", Page::AdminClients),
                item("Projects Overview", "📁", Page::AdminProjects),
                item("Data Import", "📤", Page::AdminImport),
                item("Database Backups", "🛢️", Page::AdminBackups),
            ],
        });
    }
    sections
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_app_store();
    let session = use_session();
    let collapsed = move || store.sidebar_collapsed().get();

    let sections = move || {
        let client_label = session.tenant.with(|t| t.labels.client.clone());
        nav_sections(&client_label, session.is_admin())
    };

    let brand = move || {
        session.tenant.with(|t| {
            let branding = &t.branding;
            let logo = if collapsed() { branding.logo_compact.clone() } else { branding.logo.clone() };
            match logo {
                Some(src) => view! { <img class="sidebar-logo" src=src alt=branding.company_name.clone() /> }.into_any(),
                None => view! { <span class="sidebar-brand">{branding.company_name.clone()}</span> }.into_any(),
            }
        })
    };

    view! {
        <aside class=move || if collapsed() { "sidebar collapsed" } else { "sidebar" }>
            <div class="sidebar-header">{brand}</div>
            <button class="sidebar-toggle" title="Toggle sidebar" on:click=move |_| toggle_sidebar(&store)>
                {move || if collapsed() { "»" } else { "«" }}
            </button>
            <nav class="sidebar-nav">
                {move || sections().into_iter().map(|section| view! {
                    <div class="nav-section">
                        <Show when=move || !collapsed()>
                            <p class="nav-section-title">{section.title}</p>
                        </Show>
                        {section.items.into_iter().map(|nav| {
                            let page = nav.page;
                            let label = nav.label.clone();
                            view! {
                                <button
                                    class=move || if store.page().get() == page { "nav-item active" } else { "nav-item" }
                                    title=nav.label
                                    on:click=move |_| navigate(&store, page)
                                >
                                    <span class="nav-icon">{nav.icon}</span>
                                    <Show when=move || !collapsed()>
                                        <span class="nav-label">{label.clone()}</span>
                                    </Show>
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }).collect_view()}
            </nav>
            <div class="sidebar-footer">
                <Show when=move || !collapsed()>
                    <span class="sidebar-user">{move || session.user_email()}</span>
                </Show>
                <button class="logout-btn" on:click=move |_| session.logout()>"Log out"</button>
            </div>
        </aside>
    }
}
