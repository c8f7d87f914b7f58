//! Secondary contacts attached to a client or lead

use serde::{Deserialize, Serialize};
use super::entity::{Entity, PhoneLabel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_label: Option<PhoneLabel>,
    pub secondary_phone: Option<String>,
    pub secondary_phone_label: Option<PhoneLabel>,
    pub notes: Option<String>,
    pub client_id: Option<u32>,
    pub lead_id: Option<u32>,
    pub created_at: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().filter(|s| !s.is_empty()) {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

impl Entity for Contact {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
