//! Form validation
//!
//! Mirrors the server's field limits so forms can show every error inline before submitting.
//! Inputs hold `Option` fields. Blank strings are dropped when creating and sent as `""` when
//! updating, so an edit can clear a stored value.

mod client;
mod contact;
mod interaction;
mod lead;
mod project;

pub use client::{ClientInput, CLIENT_STATUSES};
pub use contact::ContactInput;
pub use interaction::InteractionInput;
pub use lead::LeadInput;
pub use project::{ProjectInput, PROJECT_STATUSES};

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PhoneLabel;

pub const NAME_MAX: usize = 100;
pub const CONTACT_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const PHONE_MAX: usize = 20;
pub const ADDRESS_MAX: usize = 255;
pub const CITY_MAX: usize = 100;
pub const STATE_MAX: usize = 100;
pub const ZIP_MAX: usize = 20;
pub const SUMMARY_MAX: usize = 255;
pub const OUTCOME_MAX: usize = 255;

/// Creating requires the mandatory fields; updating only checks what is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// First message for a field, for inline display under the input
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Accumulates field errors across a whole form
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    /// Creating needs a value; updating may omit the field but not blank it
    pub fn required(&mut self, field: &'static str, value: Option<&str>, mode: FormMode, label: &str) {
        let blank = value.is_some_and(|v| v.trim().is_empty());
        let missing = match mode {
            FormMode::Create => value.is_none() || blank,
            FormMode::Update => blank,
        };
        if missing {
            self.push(field, format!("{} is required", label));
        }
    }

    pub fn max_len(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if let Some(v) = filled(value) {
            if v.chars().count() > max {
                self.push(field, format!("Must be {} characters or fewer", max));
            }
        }
    }

    pub fn email(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(v) = filled(value) {
            if v.chars().count() > EMAIL_MAX {
                self.push(field, format!("Must be {} characters or fewer", EMAIL_MAX));
            } else if !is_valid_email(v) {
                self.push(field, "Invalid email address");
            }
        }
    }

    pub fn one_of<S: AsRef<str>>(&mut self, field: &'static str, value: Option<&str>, allowed: &[S]) {
        if let Some(v) = filled(value) {
            if !allowed.iter().any(|a| a.as_ref() == v) {
                self.push(field, format!("Invalid value \"{}\"", v));
            }
        }
    }

    pub fn iso_datetime(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(v) = filled(value) {
            if !is_iso_datetime(v) {
                self.push(field, "Must be a valid date and time");
            }
        }
    }

    /// Plain `YYYY-MM-DD` or a full datetime
    pub fn iso_date(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(v) = filled(value) {
            if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err() && !is_iso_datetime(v) {
                self.push(field, "Must be a valid date");
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors: self.errors })
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

pub fn is_valid_email(s: &str) -> bool {
    email_regex().is_match(s)
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` as produced by `datetime-local` inputs
pub fn is_iso_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
}

/// A cleared field (`""`) has nothing to check beyond `required`
fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whitespace-only text is absent on create and an explicit `""` on update
pub(crate) fn normalize_blank(value: &mut Option<String>, mode: FormMode) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = match mode {
            FormMode::Create => None,
            FormMode::Update => Some(String::new()),
        };
    }
}

/// Phone block shared by client, lead and contact forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_label: Option<PhoneLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone_label: Option<PhoneLabel>,
}

impl PhoneFields {
    pub(crate) fn normalize(&mut self, mode: FormMode) {
        normalize_blank(&mut self.phone, mode);
        normalize_blank(&mut self.secondary_phone, mode);
    }

    pub(crate) fn apply_create_defaults(&mut self) {
        self.phone_label.get_or_insert(PhoneLabel::Work);
        self.secondary_phone_label.get_or_insert(PhoneLabel::Mobile);
    }

    pub(crate) fn check(&self, c: &mut Checker) {
        c.max_len("phone", self.phone.as_deref(), PHONE_MAX);
        c.max_len("secondary_phone", self.secondary_phone.as_deref(), PHONE_MAX);
    }
}

/// Company and address fields common to clients and leads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub phones: PhoneFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
}

impl CompanyFields {
    pub(crate) fn normalize(&mut self, mode: FormMode) {
        for field in [
            &mut self.name,
            &mut self.contact_person,
            &mut self.contact_title,
            &mut self.email,
            &mut self.address,
            &mut self.city,
            &mut self.state,
            &mut self.zip,
            &mut self.notes,
            &mut self.business_type,
        ] {
            normalize_blank(field, mode);
        }
        self.phones.normalize(mode);
    }

    pub(crate) fn apply_create_defaults(&mut self) {
        self.phones.apply_create_defaults();
        self.business_type.get_or_insert_with(|| "None".to_string());
    }

    pub(crate) fn check(&self, c: &mut Checker, mode: FormMode, business_types: &[String]) {
        c.required("name", self.name.as_deref(), mode, "Name");
        c.max_len("name", self.name.as_deref(), NAME_MAX);
        c.max_len("contact_person", self.contact_person.as_deref(), CONTACT_MAX);
        c.max_len("contact_title", self.contact_title.as_deref(), CONTACT_MAX);
        c.email("email", self.email.as_deref());
        self.phones.check(c);
        c.max_len("address", self.address.as_deref(), ADDRESS_MAX);
        c.max_len("city", self.city.as_deref(), CITY_MAX);
        c.max_len("state", self.state.as_deref(), STATE_MAX);
        c.max_len("zip", self.zip.as_deref(), ZIP_MAX);
        c.one_of("type", self.business_type.as_deref(), business_types);
    }
}

/// Split an ISO datetime into the `date` and `time` input values
pub fn split_date_time(iso: &str) -> (String, String) {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        let naive = dt.naive_local();
        return (naive.format("%Y-%m-%d").to_string(), naive.format("%H:%M").to_string());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(iso, fmt) {
            return (naive.format("%Y-%m-%d").to_string(), naive.format("%H:%M").to_string());
        }
    }
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => (date.format("%Y-%m-%d").to_string(), String::new()),
        Err(_) => (String::new(), String::new()),
    }
}

/// Join `date` and `time` inputs; a blank time means 08:00, a blank date means no value
pub fn combine_date_time(date: &str, time: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = match time.trim() {
        "" => NaiveTime::from_hms_opt(8, 0, 0)?,
        t => NaiveTime::parse_from_str(t, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
            .ok()?,
    };
    Some(date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Editable copy of the shared company block of a client or lead record
macro_rules! company_fields_of {
    ($record:expr) => {{
        let record = $record;
        $crate::validation::CompanyFields {
            name: Some(record.name.clone()),
            contact_person: record.contact_person.clone(),
            contact_title: record.contact_title.clone(),
            email: record.email.clone(),
            phones: $crate::validation::PhoneFields {
                phone: record.phone.clone(),
                phone_label: record.phone_label,
                secondary_phone: record.secondary_phone.clone(),
                secondary_phone_label: record.secondary_phone_label,
            },
            address: record.address.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            zip: record.zip.clone(),
            notes: record.notes.clone(),
            business_type: record.business_type.clone(),
        }
    }};
}
pub(crate) use company_fields_of;

/// Date part of a stored timestamp, as `<input type="date">` expects it
pub(crate) fn date_part(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.get(..10).unwrap_or(v).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_part() {
        assert_eq!(date_part(&Some("2024-05-01T09:30:00".into())), Some("2024-05-01".into()));
        assert_eq!(date_part(&Some("2024".into())), Some("2024".into()));
        assert_eq!(date_part(&None), None);
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("pat@example.com"));
        assert!(!is_valid_email("pat@example"));
        assert!(!is_valid_email("pat example@x.com"));
    }

    #[test]
    fn test_iso_datetime_variants() {
        assert!(is_iso_datetime("2024-05-01T09:30:00Z"));
        assert!(is_iso_datetime("2024-05-01T09:30:00+02:00"));
        assert!(is_iso_datetime("2024-05-01T09:30"));
        assert!(!is_iso_datetime("05/01/2024"));
    }

    #[test]
    fn test_combine_defaults_time() {
        assert_eq!(combine_date_time("2024-05-01", "").as_deref(), Some("2024-05-01T08:00:00"));
        assert_eq!(combine_date_time("2024-05-01", "14:15").as_deref(), Some("2024-05-01T14:15:00"));
        assert_eq!(combine_date_time("", "14:15"), None);
    }

    #[test]
    fn test_split_date_time() {
        assert_eq!(
            split_date_time("2024-05-01T14:15:00"),
            ("2024-05-01".to_string(), "14:15".to_string())
        );
        assert_eq!(split_date_time("garbage"), (String::new(), String::new()));
    }

    #[test]
    fn test_errors_display_and_lookup() {
        let mut c = Checker::new();
        c.push("name", "Name is required");
        c.push("email", "Invalid email address");
        let errors = c.finish().unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.to_string(), "name: Name is required; email: Invalid email address");
    }
}
