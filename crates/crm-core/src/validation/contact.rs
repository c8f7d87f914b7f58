use serde::{Deserialize, Serialize};

use super::{normalize_blank, Checker, FormMode, PhoneFields, ValidationErrors, CONTACT_MAX};
use crate::domain::{Contact, EntityKind};

/// Body of `POST /contacts/` and `PUT /contacts/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub phones: PhoneFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<u32>,
}

impl ContactInput {
    /// New contact under a client or lead
    pub fn for_parent(kind: EntityKind, id: u32) -> Self {
        let mut input = Self::default();
        match kind {
            EntityKind::Client => input.client_id = Some(id),
            EntityKind::Lead => input.lead_id = Some(id),
            EntityKind::Project => {}
        }
        input
    }

    pub fn normalized(mut self, mode: FormMode) -> Self {
        for field in [&mut self.first_name, &mut self.last_name, &mut self.title, &mut self.email, &mut self.notes] {
            normalize_blank(field, mode);
        }
        self.phones.normalize(mode);
        self
    }

    pub fn with_create_defaults(mut self) -> Self {
        self.phones.apply_create_defaults();
        self
    }

    pub fn validate(&self, mode: FormMode) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.required("first_name", self.first_name.as_deref(), mode, "First name");
        c.max_len("first_name", self.first_name.as_deref(), CONTACT_MAX);
        c.max_len("last_name", self.last_name.as_deref(), CONTACT_MAX);
        c.max_len("title", self.title.as_deref(), CONTACT_MAX);
        c.email("email", self.email.as_deref());
        self.phones.check(&mut c);
        if mode == FormMode::Create && self.client_id.is_some() == self.lead_id.is_some() {
            c.push("client_id", "Contact must belong to exactly one client or lead");
        }
        c.finish()
    }
}

impl From<&Contact> for ContactInput {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: Some(contact.first_name.clone()),
            last_name: contact.last_name.clone(),
            title: contact.title.clone(),
            email: contact.email.clone(),
            phones: PhoneFields {
                phone: contact.phone.clone(),
                phone_label: contact.phone_label,
                secondary_phone: contact.secondary_phone.clone(),
                secondary_phone_label: contact.secondary_phone_label,
            },
            notes: contact.notes.clone(),
            client_id: contact.client_id,
            lead_id: contact.lead_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_required() {
        let errors = ContactInput::for_parent(EntityKind::Client, 1)
            .normalized(FormMode::Create)
            .validate(FormMode::Create)
            .unwrap_err();
        assert_eq!(errors.get("first_name"), Some("First name is required"));
    }

    #[test]
    fn test_parent_required_on_create() {
        let mut input = ContactInput::default();
        input.first_name = Some("Pat".to_string());
        assert!(input.validate(FormMode::Create).is_err());
        assert!(input.validate(FormMode::Update).is_ok());

        let input = ContactInput { first_name: Some("Pat".to_string()), ..ContactInput::for_parent(EntityKind::Lead, 4) };
        assert!(input.validate(FormMode::Create).is_ok());
    }
}
