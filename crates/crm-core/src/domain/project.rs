//! Project records

use serde::{Deserialize, Serialize};
use super::entity::{Entity, PhoneLabel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedUser {
    pub id: u32,
    pub email: String,
}

/// Project, optionally linked to exactly one client or lead.
/// Standalone projects carry their own primary contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub project_name: String,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    pub project_description: Option<String>,
    pub project_status: Option<String>,
    pub project_start: Option<String>,
    pub project_end: Option<String>,
    pub project_worth: Option<f64>,
    pub client_id: Option<u32>,
    pub lead_id: Option<u32>,
    pub client_name: Option<String>,
    pub lead_name: Option<String>,
    pub created_at: Option<String>,
    pub notes: Option<String>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_title: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub primary_contact_phone_label: Option<PhoneLabel>,
    pub assigned_to: Option<AssignedUser>,
}

/// What a project hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLink {
    Client(u32),
    Lead(u32),
    Standalone,
}

impl Project {
    pub fn link(&self) -> ProjectLink {
        match (self.client_id, self.lead_id) {
            (Some(id), _) => ProjectLink::Client(id),
            (None, Some(id)) => ProjectLink::Lead(id),
            (None, None) => ProjectLink::Standalone,
        }
    }

    /// Display name of the owning entity, or the standalone contact
    pub fn entity_name(&self) -> Option<&str> {
        self.client_name
            .as_deref()
            .or(self.lead_name.as_deref())
            .or(self.primary_contact_name.as_deref())
    }
}

impl Entity for Project {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One page of projects as returned by `GET /projects/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectPage {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(client_id: Option<u32>, lead_id: Option<u32>) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "project_name": "Roof",
            "client_id": client_id,
            "lead_id": lead_id,
            "lead_name": "Lead Co",
            "primary_contact_name": "Pat",
        }))
        .unwrap()
    }

    #[test]
    fn test_project_link() {
        assert_eq!(project(Some(3), None).link(), ProjectLink::Client(3));
        assert_eq!(project(None, Some(4)).link(), ProjectLink::Lead(4));
        assert_eq!(project(None, None).link(), ProjectLink::Standalone);
    }

    #[test]
    fn test_entity_name_prefers_linked_record() {
        assert_eq!(project(None, Some(4)).entity_name(), Some("Lead Co"));
    }
}
