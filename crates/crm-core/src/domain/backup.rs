//! Backup / restore job records (executed server-side, polled by the admin console)

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupType {
    Manual,
    Scheduled,
    PreRestore,
}

impl BackupType {
    pub fn label(&self) -> &'static str {
        match self {
            BackupType::Manual => "Manual",
            BackupType::Scheduled => "Scheduled",
            BackupType::PreRestore => "Safety",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl BackupStatus {
    /// Job still running on the server
    pub fn is_active(&self) -> bool {
        matches!(self, BackupStatus::Pending | BackupStatus::InProgress)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackupStatus::Pending => "Pending",
            BackupStatus::InProgress => "In Progress",
            BackupStatus::Completed => "Completed",
            BackupStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BackupStatus::Pending),
            "in_progress" => Some(BackupStatus::InProgress),
            "completed" => Some(BackupStatus::Completed),
            "failed" => Some(BackupStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: u32,
    pub filename: String,
    #[serde(rename = "type")]
    pub backup_type: BackupType,
    pub status: BackupStatus,
    /// Bytes
    #[serde(default)]
    pub size: u64,
    pub checksum: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
    /// Creator email
    pub created_by: Option<String>,
    pub error: Option<String>,
}

impl Backup {
    pub fn can_restore(&self) -> bool {
        self.status == BackupStatus::Completed
    }

    pub fn can_delete(&self) -> bool {
        !self.status.is_active()
    }
}

impl Entity for Backup {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Entry of the restore history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRestore {
    pub restore_id: u32,
    pub restore_date: String,
    pub user_email: String,
    pub user_id: u32,
    pub backup_restored: String,
    pub backup_id: u32,
    pub backup_date: String,
    #[serde(default)]
    pub backup_size_bytes: u64,
    pub backup_checksum: Option<String>,
    pub safety_backup_created: Option<String>,
    pub safety_backup_id: Option<u32>,
    pub restore_started_at: Option<String>,
    /// Only present while the server still tracks the restore as a job
    pub status: Option<String>,
}

impl BackupRestore {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .and_then(BackupStatus::parse)
            .is_some_and(|s| s.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_deserialize() {
        let backup: Backup = serde_json::from_str(
            r#"{"id":1,"filename":"b.sql.gz","type":"pre_restore","status":"in_progress",
                "size":2048,"checksum":null,"created_at":"2024-01-01T00:00:00Z",
                "completed_at":null,"created_by":null,"error":null}"#,
        )
        .unwrap();
        assert_eq!(backup.backup_type, BackupType::PreRestore);
        assert!(backup.status.is_active());
        assert!(!backup.can_restore());
        assert!(!backup.can_delete());
    }

    #[test]
    fn test_restore_without_status_is_idle() {
        let restore: BackupRestore = serde_json::from_value(serde_json::json!({
            "restore_id": 1, "restore_date": "2024-01-01T00:00:00Z", "user_email": "a@b.co",
            "user_id": 1, "backup_restored": "b.sql.gz", "backup_id": 3,
            "backup_date": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(!restore.is_active());
    }
}
