//! Pages
//!
//! One module per screen. `page_view` maps the current `Page` to its component.

mod admin_backups;
mod admin_import;
mod entities;
mod entity_list;
mod help;
mod login;
mod records;
mod reports;
mod settings;
mod trash;
mod vault;

pub use admin_backups::AdminBackupsPage;
pub use admin_import::AdminImportPage;
pub use entities::{AdminClientsPage, AdminLeadsPage, AdminProjectsPage, ClientsPage, LeadsPage, ProjectsPage};
pub use help::HelpPage;
pub use login::LoginPage;
pub use reports::ReportsPage;
pub use settings::SettingsPage;
pub use trash::TrashPage;
pub use vault::VaultPage;

use leptos::prelude::*;
use tracing::warn;

use crate::store::Page;

/// Component for `page`; admin screens fall back to the leads list for everyone else
pub fn page_view(page: Page, is_admin: bool) -> AnyView {
    if page.is_admin() && !is_admin {
        warn!("[Pages] {:?} requires admin", page);
        return view! { <LeadsPage /> }.into_any();
    }
    match page {
        Page::Leads => view! { <LeadsPage /> }.into_any(),
        Page::Clients => view! { <ClientsPage /> }.into_any(),
        Page::Projects => view! { <ProjectsPage /> }.into_any(),
        Page::Vault => view! { <VaultPage /> }.into_any(),
        Page::Reports => view! { <ReportsPage /> }.into_any(),
        Page::Trash => view! { <TrashPage /> }.into_any(),
        Page::Settings => view! { <SettingsPage /> }.into_any(),
        Page::Help => view! { <HelpPage /> }.into_any(),
        Page::AdminLeads => view! { <AdminLeadsPage /> }.into_any(),
        Page::AdminClients => view! { <AdminClientsPage /> }.into_any(),
        Page::AdminProjects => view! { <AdminProjectsPage /> }.into_any(),
        Page::AdminImport => view! { <AdminImportPage /> }.into_any(),
        Page::AdminBackups => view! { <AdminBackupsPage /> }.into_any(),
    }
}
