//! Users, tenants and the login exchange

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use crate::config::TenantConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    /// Vault upload and delete are gated by this role
    pub fn can_manage_files(&self) -> bool {
        self.has_role("file_uploads")
    }
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Tenant as stored after login; `config` drives labels and vocabularies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub config: Option<TenantConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<User>,
    pub tenant: Option<Tenant>,
}
