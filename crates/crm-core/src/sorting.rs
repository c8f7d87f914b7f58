//! Column sorting for the currently loaded page
//!
//! Sorting is purely client-side over one page of rows; the server only ever sees the legacy
//! `newest`/`oldest`/`alphabetical` order.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Client, EntityKind, Lead, Project};

const TIMESTAMP_FIELDS: [&str; 3] = ["created_at", "project_start", "project_end"];
const NUMERIC_FIELDS: [&str; 1] = ["project_worth"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Dates and amounts read best newest/largest first
pub fn default_direction(field: &str) -> SortDirection {
    if field == "created_at" || field == "project_worth" {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}

/// Field value as the record holds it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Null,
    Str(&'a str),
    Num(f64),
}

impl<'a> From<Option<&'a str>> for RawValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RawValue::Null, RawValue::Str)
    }
}

impl From<Option<f64>> for RawValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawValue::Null, RawValue::Num)
    }
}

/// Records whose columns can be sorted by field name
pub trait Sortable {
    fn sort_value(&self, field: &str) -> RawValue<'_>;
}

/// Comparable form of a field value
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Timestamp(i64),
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn coerce(field: &str, raw: RawValue<'_>) -> Self {
        if TIMESTAMP_FIELDS.contains(&field) {
            match raw {
                RawValue::Null => SortValue::Missing,
                RawValue::Str(s) => parse_timestamp(s).map_or(SortValue::Missing, SortValue::Timestamp),
                RawValue::Num(n) => SortValue::Timestamp(n as i64),
            }
        } else if NUMERIC_FIELDS.contains(&field) {
            match raw {
                RawValue::Null => SortValue::Missing,
                RawValue::Str(s) => SortValue::Number(s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)),
                RawValue::Num(n) if n.is_finite() => SortValue::Number(n),
                RawValue::Num(_) => SortValue::Number(0.0),
            }
        } else {
            match raw {
                RawValue::Null => SortValue::Missing,
                RawValue::Str(s) => SortValue::Text(s.to_lowercase()),
                RawValue::Num(n) => SortValue::Text(n.to_string()),
            }
        }
    }

    fn cmp_present(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Timestamp(a), SortValue::Timestamp(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Epoch millis of an RFC 3339, naive ISO datetime or plain date string
fn parse_timestamp(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Missing values go last regardless of direction
pub fn compare(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        _ => match direction {
            SortDirection::Asc => a.cmp_present(b),
            SortDirection::Desc => b.cmp_present(a),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self { field: "created_at".to_string(), direction: SortDirection::Desc }
    }
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }

    /// Header click: same column flips, a new column starts at its default direction
    pub fn handle_sort(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field.to_string();
            self.direction = default_direction(field);
        }
    }

    pub fn sort_icon(&self, field: &str) -> &'static str {
        if self.field != field {
            "↕️"
        } else {
            match self.direction {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            }
        }
    }

    /// Stable sort of a copy of the page
    pub fn sort_rows<T: Sortable + Clone>(&self, rows: &[T]) -> Vec<T> {
        let mut keyed: Vec<(SortValue, &T)> = rows
            .iter()
            .map(|row| (SortValue::coerce(&self.field, row.sort_value(&self.field)), row))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare(a, b, self.direction));
        keyed.into_iter().map(|(_, row)| row.clone()).collect()
    }

    /// `created_at_desc` style value used by the card view dropdown
    pub fn card_value(&self) -> String {
        format!("{}_{}", self.field, self.direction.as_str())
    }

    pub fn from_card_value(kind: EntityKind, value: &str) -> Option<Self> {
        card_sort_options(kind)
            .into_iter()
            .find(|option| option.value == value)
            .map(|option| option.state)
    }

    pub fn from_legacy(order: LegacySortOrder, kind: EntityKind) -> Self {
        match order {
            LegacySortOrder::Newest => Self::new("created_at", SortDirection::Desc),
            LegacySortOrder::Oldest => Self::new("created_at", SortDirection::Asc),
            LegacySortOrder::Alphabetical => Self::new(name_field(kind), SortDirection::Asc),
        }
    }

    /// Anything without a legacy equivalent persists as `newest`
    pub fn to_legacy(&self, kind: EntityKind) -> LegacySortOrder {
        if self.field == "created_at" {
            match self.direction {
                SortDirection::Desc => LegacySortOrder::Newest,
                SortDirection::Asc => LegacySortOrder::Oldest,
            }
        } else if self.field == name_field(kind) && self.direction == SortDirection::Asc {
            LegacySortOrder::Alphabetical
        } else {
            LegacySortOrder::Newest
        }
    }
}

/// Sort order as persisted and sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegacySortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl LegacySortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacySortOrder::Newest => "newest",
            LegacySortOrder::Oldest => "oldest",
            LegacySortOrder::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(LegacySortOrder::Newest),
            "oldest" => Some(LegacySortOrder::Oldest),
            "alphabetical" => Some(LegacySortOrder::Alphabetical),
            _ => None,
        }
    }
}

pub fn name_field(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Project => "project_name",
        EntityKind::Client | EntityKind::Lead => "name",
    }
}

/// Table header of a sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub field: &'static str,
    pub label: &'static str,
    pub card_label: &'static str,
}

const fn column(field: &'static str, label: &'static str, card_label: &'static str) -> SortColumn {
    SortColumn { field, label, card_label }
}

const CLIENT_COLUMNS: [SortColumn; 4] = [
    column("name", "Name", "A-Z"),
    column("contact_person", "Contact Person", "Contact"),
    column("type", "Type", "Type"),
    column("created_at", "Created", "Date"),
];

const LEAD_COLUMNS: [SortColumn; 5] = [
    column("name", "Name", "A-Z"),
    column("contact_person", "Contact Person", "Contact"),
    column("lead_status", "Status", "Status"),
    column("type", "Type", "Type"),
    column("created_at", "Created", "Date"),
];

const PROJECT_COLUMNS: [SortColumn; 6] = [
    column("project_name", "Project Name", "A-Z"),
    column("project_status", "Status", "Status"),
    column("type", "Type", "Type"),
    column("project_worth", "Value", "Value"),
    column("entity", "Entity", "Entity"),
    column("created_at", "Created", "Date"),
];

pub fn sort_columns(kind: EntityKind) -> &'static [SortColumn] {
    match kind {
        EntityKind::Client => &CLIENT_COLUMNS,
        EntityKind::Lead => &LEAD_COLUMNS,
        EntityKind::Project => &PROJECT_COLUMNS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSortOption {
    pub value: String,
    pub label: &'static str,
    pub state: SortState,
}

pub fn card_sort_options(kind: EntityKind) -> Vec<CardSortOption> {
    let option = |field: &str, direction: SortDirection, label: &'static str| {
        let state = SortState::new(field, direction);
        CardSortOption { value: state.card_value(), label, state }
    };

    let name = name_field(kind);
    let name_label = sort_columns(kind)
        .iter()
        .find(|c| c.field == name)
        .map_or("A-Z", |c| c.card_label);

    let mut options = vec![
        option("created_at", SortDirection::Desc, "Newest first"),
        option("created_at", SortDirection::Asc, "Oldest first"),
        option(name, SortDirection::Asc, name_label),
    ];
    if kind == EntityKind::Project {
        options.push(option("project_worth", SortDirection::Desc, "By Value"));
    }
    options
}

macro_rules! company_sort_fields {
    ($record:expr, $field:expr, { $($extra:tt)* }) => {
        match $field {
            "name" => RawValue::Str(&$record.name),
            "contact_person" => $record.contact_person.as_deref().into(),
            "email" => $record.email.as_deref().into(),
            "type" => $record.business_type.as_deref().into(),
            "created_at" => $record.created_at.as_deref().into(),
            "city" => $record.city.as_deref().into(),
            $($extra)*
            _ => RawValue::Null,
        }
    };
}

impl Sortable for Client {
    fn sort_value(&self, field: &str) -> RawValue<'_> {
        company_sort_fields!(self, field, {
            "status" => self.status.as_deref().into(),
            "assigned_to_name" => self.assigned_to_name.as_deref().into(),
        })
    }
}

impl Sortable for Lead {
    fn sort_value(&self, field: &str) -> RawValue<'_> {
        company_sort_fields!(self, field, {
            "lead_status" => RawValue::Str(&self.lead_status),
            "lead_source" => self.lead_source.as_deref().into(),
            "assigned_to_name" => self.assigned_to_name.as_deref().into(),
        })
    }
}

impl Sortable for Project {
    fn sort_value(&self, field: &str) -> RawValue<'_> {
        match field {
            "project_name" => RawValue::Str(&self.project_name),
            "project_status" => self.project_status.as_deref().into(),
            "type" => self.business_type.as_deref().into(),
            "project_worth" => self.project_worth.into(),
            "entity" => self.entity_name().into(),
            "project_start" => self.project_start.as_deref().into(),
            "project_end" => self.project_end.as_deref().into(),
            "created_at" => self.created_at.as_deref().into(),
            _ => RawValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: Option<String>,
        created_at: Option<String>,
        worth: Option<f64>,
    }

    impl Sortable for Row {
        fn sort_value(&self, field: &str) -> RawValue<'_> {
            match field {
                "name" => self.name.as_deref().into(),
                "created_at" => self.created_at.as_deref().into(),
                "project_worth" => self.worth.into(),
                _ => RawValue::Null,
            }
        }
    }

    fn row(name: Option<&str>, created_at: Option<&str>, worth: Option<f64>) -> Row {
        Row { name: name.map(str::to_string), created_at: created_at.map(str::to_string), worth }
    }

    #[test]
    fn test_handle_sort_defaults_and_toggle() {
        let mut state = SortState::default();
        state.handle_sort("name");
        assert_eq!(state, SortState::new("name", SortDirection::Asc));
        state.handle_sort("name");
        assert_eq!(state.direction, SortDirection::Desc);

        state.handle_sort("project_worth");
        assert_eq!(state.direction, SortDirection::Desc);
        state.handle_sort("created_at");
        assert_eq!(state.direction, SortDirection::Desc);
    }

    #[test]
    fn test_text_is_case_insensitive_and_nulls_last() {
        let rows = vec![row(Some("beta"), None, None), row(None, None, None), row(Some("Alpha"), None, None)];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = SortState::new("name", direction).sort_rows(&rows);
            assert!(sorted[2].name.is_none());
        }
        let asc = SortState::new("name", SortDirection::Asc).sort_rows(&rows);
        assert_eq!(asc[0].name.as_deref(), Some("Alpha"));
    }

    #[test]
    fn test_timestamps_compare_chronologically() {
        let rows = vec![
            row(None, Some("2024-01-02T00:00:00Z"), None),
            row(None, Some("2023-12-31T23:00:00-05:00"), None),
            row(None, Some("2024-01-01T12:00:00"), None),
        ];
        let sorted = SortState::new("created_at", SortDirection::Desc).sort_rows(&rows);
        assert_eq!(sorted[0].created_at.as_deref(), Some("2024-01-02T00:00:00Z"));
        assert_eq!(sorted[1].created_at.as_deref(), Some("2024-01-01T12:00:00"));
        assert_eq!(sorted[2].created_at.as_deref(), Some("2023-12-31T23:00:00-05:00"));
    }

    #[test]
    fn test_non_numeric_worth_is_zero() {
        assert_eq!(SortValue::coerce("project_worth", RawValue::Str("n/a")), SortValue::Number(0.0));
        assert_eq!(SortValue::coerce("project_worth", RawValue::Str("12.5")), SortValue::Number(12.5));
    }

    #[test]
    fn test_sort_icon() {
        let state = SortState::new("name", SortDirection::Asc);
        assert_eq!(state.sort_icon("name"), "↑");
        assert_eq!(state.sort_icon("created_at"), "↕️");
    }

    #[test]
    fn test_legacy_conversion() {
        let alpha = SortState::from_legacy(LegacySortOrder::Alphabetical, EntityKind::Project);
        assert_eq!(alpha.field, "project_name");
        assert_eq!(alpha.to_legacy(EntityKind::Project), LegacySortOrder::Alphabetical);
        assert_eq!(SortState::new("type", SortDirection::Asc).to_legacy(EntityKind::Lead), LegacySortOrder::Newest);
        assert_eq!(SortState::default().to_legacy(EntityKind::Client), LegacySortOrder::Newest);
    }

    #[test]
    fn test_card_options() {
        let options = card_sort_options(EntityKind::Project);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["created_at_desc", "created_at_asc", "project_name_asc", "project_worth_desc"]);
        assert_eq!(card_sort_options(EntityKind::Client).len(), 3);

        let state = SortState::from_card_value(EntityKind::Project, "project_worth_desc").unwrap();
        assert_eq!(state, SortState::new("project_worth", SortDirection::Desc));
        assert!(SortState::from_card_value(EntityKind::Client, "project_worth_desc").is_none());
    }

    #[test]
    fn test_project_entity_column() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 1, "project_name": "P", "client_name": "Zeta"
        }))
        .unwrap();
        assert_eq!(project.sort_value("entity"), RawValue::Str("Zeta"));
    }

    proptest! {
        #[test]
        fn prop_double_click_inverts_default(field in prop::sample::select(vec!["name", "created_at", "project_worth", "type"])) {
            let mut state = SortState::new("other", SortDirection::Asc);
            state.handle_sort(field);
            state.handle_sort(field);
            prop_assert_eq!(state.direction, default_direction(field).toggled());
        }

        #[test]
        fn prop_sort_keeps_rows_and_puts_missing_last(
            worths in prop::collection::vec(prop::option::of(-1.0e6f64..1.0e6), 0..40),
            asc in any::<bool>(),
        ) {
            let rows: Vec<Row> = worths.iter().map(|w| row(None, None, *w)).collect();
            let direction = if asc { SortDirection::Asc } else { SortDirection::Desc };
            let sorted = SortState::new("project_worth", direction).sort_rows(&rows);

            prop_assert_eq!(sorted.len(), rows.len());
            let present = sorted.iter().take_while(|r| r.worth.is_some()).count();
            prop_assert!(sorted[present..].iter().all(|r| r.worth.is_none()));
            for pair in sorted[..present].windows(2) {
                let (a, b) = (pair[0].worth.unwrap_or_default(), pair[1].worth.unwrap_or_default());
                let ordered = if asc { a <= b } else { a >= b };
                prop_assert!(ordered, "{} then {}", a, b);
            }
        }
    }
}
