//! Interactions: dated touchpoints with an optional follow-up

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind, PhoneLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: u32,
    pub contact_date: String,
    pub summary: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub notes: String,
    /// ISO datetime
    pub follow_up: Option<String>,
    pub client_id: Option<u32>,
    pub lead_id: Option<u32>,
    pub project_id: Option<u32>,
    pub client_name: Option<String>,
    pub lead_name: Option<String>,
    pub project_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_label: Option<PhoneLabel>,
    pub secondary_phone: Option<String>,
    pub secondary_phone_label: Option<PhoneLabel>,
    pub profile_link: Option<String>,
    pub followup_status: Option<FollowUpStatus>,
}

/// The single record an interaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionParent {
    pub kind: EntityKind,
    pub id: u32,
}

impl Interaction {
    pub fn parent(&self) -> Option<InteractionParent> {
        let pairs = [
            (EntityKind::Client, self.client_id),
            (EntityKind::Lead, self.lead_id),
            (EntityKind::Project, self.project_id),
        ];
        pairs
            .into_iter()
            .find_map(|(kind, id)| id.map(|id| InteractionParent { kind, id }))
    }

    /// Name of the parent record for display ("Unknown" when the server sent none)
    pub fn parent_name(&self) -> &str {
        self.client_name
            .as_deref()
            .or(self.lead_name.as_deref())
            .or(self.project_name.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn has_pending_follow_up(&self) -> bool {
        self.follow_up.is_some() && self.followup_status != Some(FollowUpStatus::Completed)
    }
}

impl Entity for Interaction {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InteractionPage {
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_follow_up() {
        let interaction: Interaction = serde_json::from_value(serde_json::json!({
            "id": 5,
            "contact_date": "2024-03-01T10:00:00Z",
            "summary": "Call",
            "lead_id": 9,
            "lead_name": "Beta",
            "follow_up": "2024-03-08T09:00:00Z",
            "followup_status": "pending",
        }))
        .unwrap();

        assert_eq!(interaction.parent(), Some(InteractionParent { kind: EntityKind::Lead, id: 9 }));
        assert_eq!(interaction.parent_name(), "Beta");
        assert!(interaction.has_pending_follow_up());
        assert_eq!(interaction.notes, "");
    }
}
