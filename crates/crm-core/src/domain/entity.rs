//! Domain Layer - Core Entity Trait
//!
//! Shared contract and vocabularies for the CRM records.

use serde::{Deserialize, Serialize};

/// Core trait for all records that carry a server id
pub trait Entity: Clone {
    /// The type of the record's unique identifier
    type Id: Copy + Eq + std::hash::Hash;

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;
}

/// Top-level record kinds that have list pages, trash and assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Lead,
    Project,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Client, EntityKind::Lead, EntityKind::Project];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Lead => "lead",
            EntityKind::Project => "project",
        }
    }

    /// Plural form used both as REST collection and preference key prefix
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Client => "clients",
            EntityKind::Lead => "leads",
            EntityKind::Project => "projects",
        }
    }

    /// Foreign key name used by contacts and interactions (`client_id`, ...)
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityKind::Client => "client_id",
            EntityKind::Lead => "lead_id",
            EntityKind::Project => "project_id",
        }
    }
}

/// Phone number label vocabulary shared by every phone field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhoneLabel {
    #[default]
    Work,
    Mobile,
    Home,
    Fax,
    Other,
}

impl PhoneLabel {
    pub const ALL: [PhoneLabel; 5] = [
        PhoneLabel::Work,
        PhoneLabel::Mobile,
        PhoneLabel::Home,
        PhoneLabel::Fax,
        PhoneLabel::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneLabel::Work => "work",
            PhoneLabel::Mobile => "mobile",
            PhoneLabel::Home => "home",
            PhoneLabel::Fax => "fax",
            PhoneLabel::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == s)
    }
}

/// Soft-deleted record as listed by the trash endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashItem {
    pub id: u32,
    pub name: String,
    pub deleted_at: String,
    pub deleted_by: Option<u32>,
}

impl Entity for TrashItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_paths() {
        assert_eq!(EntityKind::Client.collection(), "clients");
        assert_eq!(EntityKind::Project.id_field(), "project_id");
        assert_eq!(serde_json::to_string(&EntityKind::Lead).unwrap(), "\"lead\"");
    }

    #[test]
    fn test_phone_label_parse() {
        assert_eq!(PhoneLabel::parse("fax"), Some(PhoneLabel::Fax));
        assert_eq!(PhoneLabel::parse("pager"), None);
        assert_eq!(PhoneLabel::default(), PhoneLabel::Work);
    }
}
