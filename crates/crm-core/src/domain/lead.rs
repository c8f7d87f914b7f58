//! Lead records

use serde::{Deserialize, Serialize};
use super::entity::{Entity, PhoneLabel};

/// Prospective client; conversion into a client happens server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u32,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_label: Option<PhoneLabel>,
    pub secondary_phone: Option<String>,
    pub secondary_phone_label: Option<PhoneLabel>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub assigned_to: Option<u32>,
    pub assigned_to_name: Option<String>,
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub lead_status: String,
    pub converted_on: Option<String>,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    pub lead_source: Option<String>,
}

impl Entity for Lead {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One page of leads as returned by `GET /leads/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeadPage {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub total: u32,
}
