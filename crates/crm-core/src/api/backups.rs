//! Admin backup console endpoints

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, Transport};
use crate::backups::ConfirmedRestore;
use crate::domain::{Backup, BackupRestore};

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn list_backups(&self) -> Result<Vec<Backup>, ApiError> {
        let list: Option<Vec<Backup>> = self.fetch_envelope(&ApiRequest::get("/admin/backups"), "backups").await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn list_restores(&self) -> Result<Vec<BackupRestore>, ApiError> {
        let list: Option<Vec<BackupRestore>> =
            self.fetch_envelope(&ApiRequest::get("/admin/backups/restores"), "restores").await?;
        Ok(list.unwrap_or_default())
    }

    /// Starts a manual backup job; progress shows up in `list_backups`
    pub async fn create_backup(&self) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post("/admin/backups")).await
    }

    pub async fn delete_backup(&self, id: u32) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(format!("/admin/backups/{}", id))).await
    }

    /// Only reachable through the confirmation gate
    pub async fn restore_backup(&self, confirmed: ConfirmedRestore) -> Result<(), ApiError> {
        let request = ApiRequest::post(format!("/admin/backups/{}/restore", confirmed.backup_id()));
        self.execute(&request).await
    }
}
