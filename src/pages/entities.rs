//! Clients, Leads and Projects pages and their admin overviews

use crm_core::domain::{Client, Lead, Project};
use leptos::prelude::*;

use super::entity_list::record_list;

#[component]
pub fn LeadsPage() -> impl IntoView {
    record_list::<Lead>(false)
}

#[component]
pub fn ClientsPage() -> impl IntoView {
    record_list::<Client>(false)
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    record_list::<Project>(false)
}

#[component]
pub fn AdminLeadsPage() -> impl IntoView {
    record_list::<Lead>(true)
}

#[component]
pub fn AdminClientsPage() -> impl IntoView {
    record_list::<Client>(true)
}

#[component]
pub fn AdminProjectsPage() -> impl IntoView {
    record_list::<Project>(true)
}
