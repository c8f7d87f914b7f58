use serde::{Deserialize, Serialize};

use super::{
    date_part, normalize_blank, Checker, FormMode, ValidationErrors, CONTACT_MAX, NAME_MAX,
    PHONE_MAX,
};
use crate::config::TenantConfig;
use crate::domain::{PhoneLabel, Project};

pub const PROJECT_STATUSES: [&str; 4] = ["active", "pending", "completed", "cancelled"];

/// Body of `POST /projects/` and `PUT /projects/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_worth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_phone_label: Option<PhoneLabel>,
}

impl ProjectInput {
    pub fn normalized(mut self, mode: FormMode) -> Self {
        for field in [
            &mut self.project_name,
            &mut self.business_type,
            &mut self.project_description,
            &mut self.project_status,
            &mut self.project_start,
            &mut self.project_end,
            &mut self.notes,
            &mut self.primary_contact_name,
            &mut self.primary_contact_title,
            &mut self.primary_contact_email,
            &mut self.primary_contact_phone,
        ] {
            normalize_blank(field, mode);
        }
        self
    }

    pub fn with_create_defaults(mut self) -> Self {
        self.project_status.get_or_insert_with(|| "active".to_string());
        self.business_type.get_or_insert_with(|| "None".to_string());
        if self.primary_contact_phone.is_some() {
            self.primary_contact_phone_label.get_or_insert(PhoneLabel::Work);
        }
        self
    }

    /// Project types are checked against the tenant passed in, never a stored copy
    pub fn validate(&self, mode: FormMode, tenant: &TenantConfig) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.required("project_name", self.project_name.as_deref(), mode, "Project name");
        c.max_len("project_name", self.project_name.as_deref(), NAME_MAX);
        c.one_of("type", self.business_type.as_deref(), &tenant.business_types);
        c.one_of("project_status", self.project_status.as_deref(), &PROJECT_STATUSES);
        c.iso_date("project_start", self.project_start.as_deref());
        c.iso_date("project_end", self.project_end.as_deref());
        if let Some(worth) = self.project_worth {
            if !worth.is_finite() || worth < 0.0 {
                c.push("project_worth", "Must be a positive amount");
            }
        }
        if self.client_id.is_some() && self.lead_id.is_some() {
            c.push("client_id", "A project can belong to a client or a lead, not both");
        }
        c.max_len("primary_contact_name", self.primary_contact_name.as_deref(), CONTACT_MAX);
        c.max_len("primary_contact_title", self.primary_contact_title.as_deref(), CONTACT_MAX);
        c.email("primary_contact_email", self.primary_contact_email.as_deref());
        c.max_len("primary_contact_phone", self.primary_contact_phone.as_deref(), PHONE_MAX);
        c.finish()
    }
}

impl From<&Project> for ProjectInput {
    fn from(project: &Project) -> Self {
        Self {
            project_name: Some(project.project_name.clone()),
            business_type: project.business_type.clone(),
            project_description: project.project_description.clone(),
            project_status: project.project_status.clone(),
            project_start: date_part(&project.project_start),
            project_end: date_part(&project.project_end),
            project_worth: project.project_worth,
            client_id: project.client_id,
            lead_id: project.lead_id,
            notes: project.notes.clone(),
            primary_contact_name: project.primary_contact_name.clone(),
            primary_contact_title: project.primary_contact_title.clone(),
            primary_contact_email: project.primary_contact_email.clone(),
            primary_contact_phone: project.primary_contact_phone.clone(),
            primary_contact_phone_label: project.primary_contact_phone_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named() -> ProjectInput {
        ProjectInput { project_name: Some("Kitchen remodel".to_string()), ..Default::default() }
    }

    #[test]
    fn test_type_uses_given_tenant() {
        let mut tenant = TenantConfig::default();
        let input = ProjectInput { business_type: Some("Roofing".to_string()), ..named() };
        assert!(input.validate(FormMode::Create, &tenant).is_err());

        tenant.business_types = vec!["None".to_string(), "Roofing".to_string()];
        assert!(input.validate(FormMode::Create, &tenant).is_ok());
    }

    #[test]
    fn test_single_parent() {
        let tenant = TenantConfig::default();
        let input = ProjectInput { client_id: Some(1), lead_id: Some(2), ..named() };
        assert_eq!(
            input.validate(FormMode::Create, &tenant).unwrap_err().get("client_id"),
            Some("A project can belong to a client or a lead, not both")
        );
    }

    #[test]
    fn test_dates_and_worth() {
        let tenant = TenantConfig::default();
        let input = ProjectInput {
            project_start: Some("2024-02-30".to_string()),
            project_worth: Some(-5.0),
            ..named()
        };
        let errors = input.validate(FormMode::Create, &tenant).unwrap_err();
        assert!(errors.get("project_start").is_some());
        assert!(errors.get("project_worth").is_some());
    }

    #[test]
    fn test_edit_copy_trims_dates() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 2,
            "project_name": "Deck",
            "project_start": "2024-04-01T00:00:00",
            "project_worth": 1200.5,
            "lead_id": 9
        }))
        .unwrap();
        let input = ProjectInput::from(&project);
        assert_eq!(input.project_start.as_deref(), Some("2024-04-01"));
        assert_eq!(input.project_end, None);
        assert_eq!(input.lead_id, Some(9));
        assert!(input.validate(FormMode::Update, &TenantConfig::default()).is_ok());
    }

    #[test]
    fn test_update_clears_text_and_requires_name() {
        let tenant = TenantConfig::default();
        let edit = ProjectInput {
            project_description: Some(String::new()),
            project_end: Some(" ".to_string()),
            ..named()
        }
        .normalized(FormMode::Update);
        assert!(edit.validate(FormMode::Update, &tenant).is_ok());
        let body = serde_json::to_value(&edit).unwrap();
        assert_eq!(body["project_description"], "");
        assert_eq!(body["project_end"], "");

        let nameless = ProjectInput { project_name: Some(String::new()), ..edit }.normalized(FormMode::Update);
        assert_eq!(
            nameless.validate(FormMode::Update, &tenant).unwrap_err().get("project_name"),
            Some("Project name is required")
        );
    }

    #[test]
    fn test_create_defaults() {
        let input = named().normalized(FormMode::Create).with_create_defaults();
        assert_eq!(input.project_status.as_deref(), Some("active"));
        assert_eq!(input.business_type.as_deref(), Some("None"));
    }
}
