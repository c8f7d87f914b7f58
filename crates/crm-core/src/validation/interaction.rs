use serde::{Deserialize, Serialize};

use super::{normalize_blank, Checker, FormMode, ValidationErrors, OUTCOME_MAX, SUMMARY_MAX};
use crate::domain::{EntityKind, FollowUpStatus, Interaction};

/// Body of `POST /interactions/` and `PUT /interactions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followup_status: Option<FollowUpStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u32>,
}

impl InteractionInput {
    pub fn for_parent(kind: EntityKind, id: u32) -> Self {
        let mut input = Self::default();
        match kind {
            EntityKind::Client => input.client_id = Some(id),
            EntityKind::Lead => input.lead_id = Some(id),
            EntityKind::Project => input.project_id = Some(id),
        }
        input
    }

    pub fn normalized(mut self, mode: FormMode) -> Self {
        for field in [
            &mut self.contact_date,
            &mut self.summary,
            &mut self.outcome,
            &mut self.notes,
            &mut self.follow_up,
        ] {
            normalize_blank(field, mode);
        }
        self
    }

    fn parent_count(&self) -> usize {
        [self.client_id, self.lead_id, self.project_id]
            .iter()
            .filter(|id| id.is_some())
            .count()
    }

    pub fn validate(&self, mode: FormMode) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.required("contact_date", self.contact_date.as_deref(), mode, "Contact date");
        c.iso_datetime("contact_date", self.contact_date.as_deref());
        c.required("summary", self.summary.as_deref(), mode, "Summary");
        c.max_len("summary", self.summary.as_deref(), SUMMARY_MAX);
        c.max_len("outcome", self.outcome.as_deref(), OUTCOME_MAX);
        c.iso_datetime("follow_up", self.follow_up.as_deref());

        let parents = self.parent_count();
        match mode {
            FormMode::Create if parents != 1 => {
                c.push("parent", "Select exactly one client, lead or project")
            }
            FormMode::Update if parents > 1 => {
                c.push("parent", "An interaction can only belong to one record")
            }
            _ => {}
        }
        c.finish()
    }
}

impl From<&Interaction> for InteractionInput {
    fn from(interaction: &Interaction) -> Self {
        Self {
            contact_date: Some(interaction.contact_date.clone()),
            summary: Some(interaction.summary.clone()),
            outcome: Some(interaction.outcome.clone()),
            notes: Some(interaction.notes.clone()),
            follow_up: interaction.follow_up.clone(),
            followup_status: interaction.followup_status,
            client_id: interaction.client_id,
            lead_id: interaction.lead_id,
            project_id: interaction.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> InteractionInput {
        InteractionInput {
            contact_date: Some("2024-03-01T10:00".to_string()),
            summary: Some("Intro call".to_string()),
            ..InteractionInput::for_parent(EntityKind::Project, 8)
        }
    }

    #[test]
    fn test_valid_create() {
        assert!(valid().validate(FormMode::Create).is_ok());
    }

    #[test]
    fn test_exactly_one_parent_on_create() {
        let none = InteractionInput { project_id: None, ..valid() };
        assert!(none.validate(FormMode::Create).unwrap_err().get("parent").is_some());

        let two = InteractionInput { lead_id: Some(2), ..valid() };
        assert!(two.validate(FormMode::Create).is_err());
        assert!(two.validate(FormMode::Update).is_err());
    }

    #[test]
    fn test_edit_copy_sends_cleared_text() {
        let interaction: Interaction = serde_json::from_value(serde_json::json!({
            "id": 3,
            "contact_date": "2024-03-01T10:00:00",
            "summary": "Site visit",
            "client_id": 5
        }))
        .unwrap();
        let input = InteractionInput::from(&interaction).normalized(FormMode::Update);
        assert_eq!(input.outcome.as_deref(), Some(""));
        assert_eq!(serde_json::to_value(&input).unwrap()["outcome"], "");
        assert_eq!(input.client_id, Some(5));
        assert!(input.validate(FormMode::Update).is_ok());
    }

    #[test]
    fn test_summary_bounds_and_dates() {
        let input = InteractionInput {
            summary: Some("s".repeat(256)),
            follow_up: Some("next tuesday".to_string()),
            ..valid()
        };
        let errors = input.validate(FormMode::Create).unwrap_err();
        assert!(errors.get("summary").is_some());
        assert!(errors.get("follow_up").is_some());

        let blank = InteractionInput { summary: Some("  ".to_string()), ..valid() }.normalized(FormMode::Create);
        assert_eq!(blank.validate(FormMode::Create).unwrap_err().get("summary"), Some("Summary is required"));
    }
}
