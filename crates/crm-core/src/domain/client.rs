//! Client / Account records

use serde::{Deserialize, Serialize};
use super::entity::{Entity, PhoneLabel};

/// Billing account attached to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u32,
    pub client_id: u32,
    pub client_name: Option<String>,
    pub tenant_id: u32,
    pub account_number: String,
    pub account_name: Option<String>,
    pub status: Option<String>,
    /// ISO datetime
    pub opened_on: Option<String>,
    pub notes: Option<String>,
}

/// Client (labelled "Account", "Customer", ... per tenant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
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
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<u32>,
    pub assigned_to_name: Option<String>,
}

impl Entity for Client {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One page of clients as returned by `GET /clients/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClientPage {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_minimal_payload() {
        let client: Client = serde_json::from_str(r#"{"id": 7, "name": "Acme", "type": "Retail"}"#).unwrap();
        assert_eq!(client.id(), 7);
        assert_eq!(client.business_type.as_deref(), Some("Retail"));
        assert!(client.accounts.is_empty());
        assert!(client.phone_label.is_none());
    }

    #[test]
    fn test_client_page_defaults() {
        let page: ClientPage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.total, 0);
        assert!(page.clients.is_empty());
    }
}
