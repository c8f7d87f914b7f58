//! Lead import (CSV / Excel); parsing and per-row validation happen server-side

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, ApiResponse, MultipartPart, PartValue, Transport, UploadFile};
use crate::importer::{ImportPreview, ImportResult, ImportSubmission};

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    /// Upload the file and get its headers plus a few sample rows
    pub async fn preview_import(&self, file: UploadFile) -> Result<ImportPreview, ApiError> {
        let request = ApiRequest::post("/import/leads/preview").multipart(vec![file.into_part("file")]);
        self.fetch_json(&request).await
    }

    pub async fn submit_import(&self, submission: ImportSubmission) -> Result<ImportResult, ApiError> {
        let ImportSubmission { file, assigned_user_email, column_mappings } = submission;
        let request = ApiRequest::post("/import/leads/submit").multipart(vec![
            file.into_part("file"),
            MultipartPart {
                name: "assigned_user_email".to_string(),
                value: PartValue::Text(assigned_user_email),
            },
            MultipartPart {
                name: "column_mappings".to_string(),
                value: PartValue::Text(column_mappings),
            },
        ]);
        self.fetch_json(&request).await
    }

    /// Blank CSV with the expected headers
    pub async fn download_import_template(&self) -> Result<ApiResponse, ApiError> {
        self.fetch_bytes(&ApiRequest::get("/import/leads/template")).await
    }
}
