//! File vault

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, ApiResponse, Transport, UploadFile};
use crate::domain::FileInfo;

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn list_files(&self) -> Result<Vec<FileInfo>, ApiError> {
        self.fetch_json(&ApiRequest::get("/storage/list")).await
    }

    /// All files go in one request, each under the `files` field
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<(), ApiError> {
        let parts = files.into_iter().map(|f| f.into_part("files")).collect();
        self.execute(&ApiRequest::post("/storage/upload").multipart(parts)).await
    }

    pub async fn delete_file(&self, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/storage/delete/{}", id))).await
    }

    pub async fn download_file(&self, id: u32) -> Result<ApiResponse, ApiError> {
        self.fetch_bytes(&ApiRequest::get(format!("/storage/download/{}", id))).await
    }
}
