use serde::{Deserialize, Serialize};

use super::{company_fields_of, normalize_blank, Checker, CompanyFields, FormMode, ValidationErrors};
use crate::config::TenantConfig;
use crate::domain::Lead;

/// Body of `POST /leads/` and `PUT /leads/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadInput {
    #[serde(flatten)]
    pub company: CompanyFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<String>,
}

impl LeadInput {
    pub fn normalized(mut self, mode: FormMode) -> Self {
        self.company.normalize(mode);
        normalize_blank(&mut self.lead_status, mode);
        normalize_blank(&mut self.lead_source, mode);
        self
    }

    pub fn with_create_defaults(mut self) -> Self {
        self.company.apply_create_defaults();
        self.lead_status.get_or_insert_with(|| "new".to_string());
        self
    }

    /// Lead statuses and sources come from the tenant's vocabulary
    pub fn validate(&self, mode: FormMode, tenant: &TenantConfig) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        self.company.check(&mut c, mode, &tenant.business_types);
        c.one_of("lead_status", self.lead_status.as_deref(), &tenant.leads.statuses);
        c.one_of("lead_source", self.lead_source.as_deref(), &tenant.leads.sources);
        c.finish()
    }
}

impl From<&Lead> for LeadInput {
    fn from(lead: &Lead) -> Self {
        Self {
            company: company_fields_of!(lead),
            lead_status: Some(lead.lead_status.clone()),
            lead_source: lead.lead_source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_tenant() {
        let mut tenant = TenantConfig::default();
        let mut input = LeadInput::default();
        input.company.name = Some("Beta".to_string());
        input.lead_status = Some("nurturing".to_string());
        assert!(input.validate(FormMode::Create, &tenant).is_err());

        tenant.leads.statuses.push("nurturing".to_string());
        assert!(input.validate(FormMode::Create, &tenant).is_ok());
    }

    #[test]
    fn test_update_clears_source_and_keeps_name() {
        let tenant = TenantConfig::default();
        let edit = LeadInput {
            company: CompanyFields { name: Some("Beta".to_string()), email: Some(String::new()), ..Default::default() },
            lead_status: Some("contacted".to_string()),
            lead_source: Some(String::new()),
        }
        .normalized(FormMode::Update);
        assert!(edit.validate(FormMode::Update, &tenant).is_ok());
        let body = serde_json::to_value(&edit).unwrap();
        assert_eq!(body["lead_source"], "");
        assert_eq!(body["email"], "");

        let cleared = LeadInput { company: CompanyFields { name: Some(" ".to_string()), ..Default::default() }, ..edit }
            .normalized(FormMode::Update);
        assert!(cleared.validate(FormMode::Update, &tenant).unwrap_err().get("name").is_some());
    }

    #[test]
    fn test_defaults_to_new() {
        let input = LeadInput::default().with_create_defaults();
        assert_eq!(input.lead_status.as_deref(), Some("new"));
    }
}
