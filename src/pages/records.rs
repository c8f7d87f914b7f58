//! List Records
//!
//! What the generic list screens need to know about clients, leads and projects.

use crm_core::domain::{Client, ClientPage, EntityKind, Lead, LeadPage, Project, ProjectPage};
use crm_core::sorting::Sortable;
use crm_core::validation::{CLIENT_STATUSES, PROJECT_STATUSES};
use crm_core::TenantConfig;
use crm_core::config::capitalize;
use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::components::forms::{ClientForm, LeadForm, ProjectForm};

/// Date part of a server timestamp
pub fn short_date(value: Option<&str>) -> String {
    value.map(|v| v.get(..10).unwrap_or(v).to_string()).unwrap_or_default()
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

pub trait ListRecord: Sortable + Clone + PartialEq + Send + Sync + 'static {
    const KIND: EntityKind;
    type Page: DeserializeOwned + 'static;

    fn into_rows(page: Self::Page) -> (Vec<Self>, u32);

    fn id(&self) -> u32;
    fn title(&self) -> String;
    fn status(&self) -> Option<&str>;
    fn business_type(&self) -> Option<&str>;
    fn assigned_user(&self) -> Option<(u32, String)>;

    /// Status tab values with their labels
    fn status_options(tenant: &TenantConfig) -> Vec<(String, String)>;

    /// One cell per entry of `sort_columns(KIND)`
    fn cells(&self, tenant: &TenantConfig) -> Vec<String>;

    /// Secondary lines of the card view
    fn card_lines(&self, tenant: &TenantConfig) -> Vec<String>;

    /// Create (`None`) or edit form
    fn form(record: Option<Self>, on_saved: Callback<()>, on_cancel: Callback<()>) -> AnyView;
}

fn fixed_statuses(values: &[&str]) -> Vec<(String, String)> {
    values.iter().map(|s| (s.to_string(), capitalize(s))).collect()
}

impl ListRecord for Client {
    const KIND: EntityKind = EntityKind::Client;
    type Page = ClientPage;

    fn into_rows(page: ClientPage) -> (Vec<Self>, u32) {
        (page.clients, page.total)
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn business_type(&self) -> Option<&str> {
        self.business_type.as_deref()
    }

    fn assigned_user(&self) -> Option<(u32, String)> {
        self.assigned_to.map(|id| (id, self.assigned_to_name.clone().unwrap_or_default()))
    }

    fn status_options(_tenant: &TenantConfig) -> Vec<(String, String)> {
        fixed_statuses(&CLIENT_STATUSES)
    }

    fn cells(&self, _tenant: &TenantConfig) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.contact_person.as_deref()),
            or_dash(self.business_type.as_deref()),
            short_date(self.created_at.as_deref()),
        ]
    }

    fn card_lines(&self, _tenant: &TenantConfig) -> Vec<String> {
        let place = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        [self.contact_person.clone(), self.email.clone(), self.phone.clone(), Some(place)]
            .into_iter()
            .flatten()
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn form(record: Option<Self>, on_saved: Callback<()>, on_cancel: Callback<()>) -> AnyView {
        view! { <ClientForm client=record on_saved=on_saved on_cancel=on_cancel /> }.into_any()
    }
}

impl ListRecord for Lead {
    const KIND: EntityKind = EntityKind::Lead;
    type Page = LeadPage;

    fn into_rows(page: LeadPage) -> (Vec<Self>, u32) {
        (page.leads, page.total)
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> Option<&str> {
        Some(self.lead_status.as_str()).filter(|s| !s.is_empty())
    }

    fn business_type(&self) -> Option<&str> {
        self.business_type.as_deref()
    }

    fn assigned_user(&self) -> Option<(u32, String)> {
        self.assigned_to.map(|id| (id, self.assigned_to_name.clone().unwrap_or_default()))
    }

    fn status_options(tenant: &TenantConfig) -> Vec<(String, String)> {
        tenant
            .leads
            .statuses
            .iter()
            .map(|s| (s.clone(), tenant.status_label(s)))
            .collect()
    }

    fn cells(&self, tenant: &TenantConfig) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.contact_person.as_deref()),
            tenant.status_label(&self.lead_status),
            or_dash(self.business_type.as_deref()),
            short_date(self.created_at.as_deref()),
        ]
    }

    fn card_lines(&self, tenant: &TenantConfig) -> Vec<String> {
        let mut lines: Vec<String> = [self.contact_person.clone(), self.email.clone(), self.phone.clone()]
            .into_iter()
            .flatten()
            .filter(|line| !line.is_empty())
            .collect();
        if tenant.features.show_source {
            if let Some(source) = self.lead_source.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("Source: {}", source));
            }
        }
        lines
    }

    fn form(record: Option<Self>, on_saved: Callback<()>, on_cancel: Callback<()>) -> AnyView {
        view! { <LeadForm lead=record on_saved=on_saved on_cancel=on_cancel /> }.into_any()
    }
}

impl ListRecord for Project {
    const KIND: EntityKind = EntityKind::Project;
    type Page = ProjectPage;

    fn into_rows(page: ProjectPage) -> (Vec<Self>, u32) {
        (page.projects, page.total)
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.project_name.clone()
    }

    fn status(&self) -> Option<&str> {
        self.project_status.as_deref()
    }

    fn business_type(&self) -> Option<&str> {
        self.business_type.as_deref()
    }

    fn assigned_user(&self) -> Option<(u32, String)> {
        self.assigned_to.as_ref().map(|u| (u.id, u.email.clone()))
    }

    fn status_options(_tenant: &TenantConfig) -> Vec<(String, String)> {
        fixed_statuses(&PROJECT_STATUSES)
    }

    fn cells(&self, tenant: &TenantConfig) -> Vec<String> {
        vec![
            self.project_name.clone(),
            self.project_status.as_deref().map(capitalize).unwrap_or_else(|| "-".to_string()),
            or_dash(self.business_type.as_deref()),
            self.project_worth.map(|w| tenant.regional.format_money(w)).unwrap_or_else(|| "-".to_string()),
            or_dash(self.entity_name()),
            short_date(self.created_at.as_deref()),
        ]
    }

    fn card_lines(&self, tenant: &TenantConfig) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(entity) = self.entity_name() {
            lines.push(entity.to_string());
        }
        if let Some(worth) = self.project_worth {
            lines.push(tenant.regional.format_money(worth));
        }
        let dates = [short_date(self.project_start.as_deref()), short_date(self.project_end.as_deref())];
        if !dates[0].is_empty() || !dates[1].is_empty() {
            lines.push(format!("{} → {}", or_dash(Some(&dates[0])), or_dash(Some(&dates[1]))));
        }
        lines
    }

    fn form(record: Option<Self>, on_saved: Callback<()>, on_cancel: Callback<()>) -> AnyView {
        view! { <ProjectForm project=record parent=None on_saved=on_saved on_cancel=on_cancel /> }.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::sorting::sort_columns;

    fn lead() -> Lead {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Beta LLC",
            "lead_status": "contacted",
            "created_at": "2024-02-10T08:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_cells_match_columns() {
        let tenant = TenantConfig::default();
        assert_eq!(lead().cells(&tenant).len(), sort_columns(EntityKind::Lead).len());

        let project: Project =
            serde_json::from_value(serde_json::json!({"id": 1, "project_name": "Roof", "project_worth": 12500.0}))
                .unwrap();
        let cells = project.cells(&tenant);
        assert_eq!(cells.len(), sort_columns(EntityKind::Project).len());
        assert_eq!(cells[3], "$12,500");
    }

    #[test]
    fn test_lead_cells() {
        let cells = lead().cells(&TenantConfig::default());
        assert_eq!(cells[1], "-");
        assert_eq!(cells[4], "2024-02-10");
    }
}
