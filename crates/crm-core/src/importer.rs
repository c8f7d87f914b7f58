//! Lead import session
//!
//! The server parses the upload and validates rows; the client only suggests a column mapping,
//! lets the user adjust it and refuses to submit without a `name` column.

use serde::{Deserialize, Serialize};

use crate::api::UploadFile;

/// Lead fields a column can be mapped to; an empty mapping skips the column
pub const LEAD_IMPORT_FIELDS: [&str; 15] = [
    "name",
    "contact_person",
    "contact_title",
    "email",
    "phone",
    "phone_label",
    "secondary_phone",
    "secondary_phone_label",
    "address",
    "city",
    "state",
    "zip",
    "notes",
    "type",
    "lead_status",
];

pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".csv", ".xlsx"];

pub const ERR_BAD_FILE_TYPE: &str = "Please upload a CSV or Excel (.xlsx) file";
pub const ERR_MISSING_FILE_OR_USER: &str = "Please select a file and user";
pub const ERR_MISSING_NAME: &str = "'name' field is required.";

/// Lower-case and drop everything but ASCII letters and digits
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// First matching rule wins; `""` means skip
pub fn suggest_field(header: &str) -> &'static str {
    let h = normalize_header(header);
    let has = |needle: &str| h.contains(needle);

    if has("name") || has("company") {
        "name"
    } else if has("contact") && has("person") {
        "contact_person"
    } else if has("title") {
        "contact_title"
    } else if has("email") {
        "email"
    } else if has("phone") && !has("secondary") {
        "phone"
    } else if has("secondaryphone") {
        "secondary_phone"
    } else if has("address") {
        "address"
    } else if has("city") {
        "city"
    } else if has("state") {
        "state"
    } else if has("zip") {
        "zip"
    } else if has("note") {
        "notes"
    } else if has("type") {
        "type"
    } else if has("status") {
        "lead_status"
    } else {
        ""
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub csv_column: String,
    pub lead_field: String,
}

/// Headers and sample rows returned by `/import/leads/preview`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    pub total_rows: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RowError {
    pub row: u32,
    #[serde(default)]
    pub data: serde_json::Value,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportResult {
    pub message: String,
    pub successful_imports: u32,
    pub failed_imports: u32,
    pub warnings: Vec<String>,
    pub failures: Vec<RowError>,
}

/// Multipart fields of `/import/leads/submit`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSubmission {
    pub file: UploadFile,
    pub assigned_user_email: String,
    /// JSON array of [`ColumnMapping`]
    pub column_mappings: String,
}

/// State of the importer between picking a file and submitting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSession {
    pub file: Option<UploadFile>,
    pub assigned_user_email: String,
    pub preview: Option<ImportPreview>,
    pub mappings: Vec<ColumnMapping>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extension check before upload; on rejection any previous file is dropped
    pub fn accept_file(&mut self, file: UploadFile) -> Result<(), &'static str> {
        if !accepts_file_name(&file.name) {
            self.file = None;
            return Err(ERR_BAD_FILE_TYPE);
        }
        self.file = Some(file);
        Ok(())
    }

    /// Store the server preview and pre-map every header
    pub fn apply_preview(&mut self, preview: ImportPreview) {
        self.mappings = preview
            .headers
            .iter()
            .map(|header| ColumnMapping {
                csv_column: header.clone(),
                lead_field: suggest_field(header).to_string(),
            })
            .collect();
        self.preview = Some(preview);
    }

    pub fn set_mapping(&mut self, index: usize, field: &str) {
        if let Some(mapping) = self.mappings.get_mut(index) {
            mapping.lead_field = field.to_string();
        }
    }

    /// First sample values of a column, for display next to its mapping
    pub fn sample(&self, index: usize, count: usize) -> Vec<String> {
        let Some(preview) = &self.preview else {
            return Vec::new();
        };
        preview
            .rows
            .iter()
            .take(count)
            .filter_map(|row| row.get(index))
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect()
    }

    pub fn has_name_mapping(&self) -> bool {
        self.mappings.iter().any(|m| m.lead_field == "name")
    }

    pub fn validate_submit(&self) -> Result<(), &'static str> {
        if self.file.is_none() || self.assigned_user_email.trim().is_empty() {
            return Err(ERR_MISSING_FILE_OR_USER);
        }
        if !self.has_name_mapping() {
            return Err(ERR_MISSING_NAME);
        }
        Ok(())
    }

    pub fn mappings_json(&self) -> String {
        serde_json::to_string(&self.mappings).unwrap_or_else(|_| "[]".to_string())
    }

    /// Checked payload for the submit call
    pub fn submission(&self) -> Result<ImportSubmission, &'static str> {
        self.validate_submit()?;
        let file = self.file.clone().ok_or(ERR_MISSING_FILE_OR_USER)?;
        Ok(ImportSubmission {
            file,
            assigned_user_email: self.assigned_user_email.clone(),
            column_mappings: self.mappings_json(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn accepts_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    match lower.rfind('.') {
        Some(dot) => ACCEPTED_EXTENSIONS.iter().any(|ext| *ext == &lower[dot..]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> UploadFile {
        UploadFile { name: name.to_string(), content_type: None, bytes: b"a,b\n1,2\n".to_vec() }
    }

    fn preview(headers: &[&str]) -> ImportPreview {
        ImportPreview {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![vec![serde_json::json!("Acme"), serde_json::json!(42), serde_json::Value::Null]],
            total_rows: 1,
        }
    }

    #[test]
    fn test_suggest_field_rules() {
        assert_eq!(suggest_field("Company Name"), "name");
        assert_eq!(suggest_field("Contact Person"), "contact_person");
        assert_eq!(suggest_field("Job Title"), "contact_title");
        assert_eq!(suggest_field("E-mail"), "email");
        assert_eq!(suggest_field("Phone #"), "phone");
        assert_eq!(suggest_field("Secondary Phone"), "secondary_phone");
        assert_eq!(suggest_field("ZIP code"), "zip");
        assert_eq!(suggest_field("Notes"), "notes");
        assert_eq!(suggest_field("Lead Status"), "lead_status");
        assert_eq!(suggest_field("Revenue"), "");
    }

    #[test]
    fn test_accepts_only_csv_and_xlsx() {
        assert!(accepts_file_name("Leads.CSV"));
        assert!(accepts_file_name("export.v2.xlsx"));
        assert!(!accepts_file_name("leads.xls"));
        assert!(!accepts_file_name("csv"));

        let mut session = ImportSession::new();
        session.accept_file(upload("ok.csv")).unwrap();
        assert_eq!(session.accept_file(upload("bad.pdf")), Err(ERR_BAD_FILE_TYPE));
        assert!(session.file.is_none());
    }

    #[test]
    fn test_submit_requires_file_and_user() {
        let mut session = ImportSession::new();
        session.apply_preview(preview(&["Company", "Email"]));
        assert_eq!(session.validate_submit(), Err(ERR_MISSING_FILE_OR_USER));

        session.accept_file(upload("leads.csv")).unwrap();
        assert_eq!(session.validate_submit(), Err(ERR_MISSING_FILE_OR_USER));

        session.assigned_user_email = "rep@example.com".to_string();
        assert!(session.validate_submit().is_ok());
    }

    #[test]
    fn test_submit_rejected_without_name_mapping() {
        let mut session = ImportSession::new();
        session.accept_file(upload("leads.csv")).unwrap();
        session.assigned_user_email = "rep@example.com".to_string();
        session.apply_preview(preview(&["Company", "Email"]));

        session.set_mapping(0, "");
        assert_eq!(session.submission(), Err(ERR_MISSING_NAME));

        session.set_mapping(1, "name");
        let submission = session.submission().unwrap();
        assert_eq!(
            submission.column_mappings,
            r#"[{"csvColumn":"Company","leadField":""},{"csvColumn":"Email","leadField":"name"}]"#
        );
    }

    #[test]
    fn test_sample_values() {
        let mut session = ImportSession::new();
        session.apply_preview(preview(&["Company", "Employees", "Notes"]));
        assert_eq!(session.sample(0, 3), vec!["Acme"]);
        assert_eq!(session.sample(1, 3), vec!["42"]);
        assert_eq!(session.sample(2, 3), vec![""]);
        assert!(session.sample(5, 3).is_empty());
    }

    #[test]
    fn test_import_result_decodes_failures() {
        let result: ImportResult = serde_json::from_value(serde_json::json!({
            "message": "Imported 1 of 2",
            "successful_imports": 1,
            "failed_imports": 1,
            "failures": [{"row": 3, "data": {"name": ""}, "error": "name is required"}]
        }))
        .unwrap();
        assert_eq!(result.failures[0].row, 3);
        assert!(result.warnings.is_empty());
    }
}
