use serde::{Deserialize, Serialize};

use super::{company_fields_of, normalize_blank, Checker, CompanyFields, FormMode, ValidationErrors};
use crate::config::TenantConfig;
use crate::domain::Client;

pub const CLIENT_STATUSES: [&str; 4] = ["prospect", "active", "inactive", "cancelled"];

/// Body of `POST /clients/` and `PUT /clients/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInput {
    #[serde(flatten)]
    pub company: CompanyFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ClientInput {
    pub fn normalized(mut self, mode: FormMode) -> Self {
        self.company.normalize(mode);
        normalize_blank(&mut self.status, mode);
        self
    }

    pub fn with_create_defaults(mut self) -> Self {
        self.company.apply_create_defaults();
        self.status.get_or_insert_with(|| "prospect".to_string());
        self
    }

    pub fn validate(&self, mode: FormMode, tenant: &TenantConfig) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        self.company.check(&mut c, mode, &tenant.business_types);
        c.one_of("status", self.status.as_deref(), &CLIENT_STATUSES);
        c.finish()
    }
}

impl From<&Client> for ClientInput {
    fn from(client: &Client) -> Self {
        Self { company: company_fields_of!(client), status: client.status.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ClientInput {
        let mut input = ClientInput::default();
        input.company.name = Some(name.to_string());
        input
    }

    #[test]
    fn test_edit_copy_of_record() {
        let client: Client = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Acme",
            "email": "ops@acme.test",
            "phone": "555-0100",
            "phone_label": "mobile",
            "status": "active",
            "type": "Retail"
        }))
        .unwrap();
        let input = ClientInput::from(&client);
        assert_eq!(input.company.name.as_deref(), Some("Acme"));
        assert_eq!(input.company.phones.phone_label, Some(crate::domain::PhoneLabel::Mobile));
        assert_eq!(input.company.business_type.as_deref(), Some("Retail"));
        assert_eq!(input.status.as_deref(), Some("active"));
        assert_eq!(input.company.city, None);
    }

    #[test]
    fn test_create_requires_name() {
        let tenant = TenantConfig::default();
        let errors = input("   ")
            .normalized(FormMode::Create)
            .validate(FormMode::Create, &tenant)
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn test_update_sends_cleared_fields() {
        let tenant = TenantConfig::default();
        // Edit of a client stored with city "Denver"; the user blanked the city
        let mut edit = input("Acme");
        edit.status = Some("active".to_string());
        edit.company.city = Some("  ".to_string());

        let edit = edit.normalized(FormMode::Update);
        assert!(edit.validate(FormMode::Update, &tenant).is_ok());
        let body = serde_json::to_value(&edit).unwrap();
        assert_eq!(body["city"], "");
        assert_eq!(body["name"], "Acme");
        assert_eq!(body["status"], "active");
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let tenant = TenantConfig::default();
        let errors = input("")
            .normalized(FormMode::Update)
            .validate(FormMode::Update, &tenant)
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn test_update_checks_present_fields_only() {
        let tenant = TenantConfig::default();
        let mut update = ClientInput::default();
        update.company.city = Some("Denver".to_string());
        assert!(update.validate(FormMode::Update, &tenant).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let tenant = TenantConfig::default();
        let mut bad = input(&"x".repeat(101));
        bad.company.email = Some("nope".to_string());
        bad.company.zip = Some("1".repeat(21));
        bad.status = Some("archived".to_string());
        bad.company.business_type = Some("Aerospace".to_string());

        let errors = bad.validate(FormMode::Create, &tenant).unwrap_err();
        let fields: Vec<_> = errors.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "zip", "type", "status"]);
    }

    #[test]
    fn test_create_defaults_serialize() {
        let body = serde_json::to_value(input("Acme").normalized(FormMode::Create).with_create_defaults()).unwrap();
        assert_eq!(body["status"], "prospect");
        assert_eq!(body["type"], "None");
        assert_eq!(body["phone_label"], "work");
        assert!(body.get("email").is_none());
    }
}
