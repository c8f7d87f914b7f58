//! Backup console logic: when to poll, and the two-step restore confirmation

use thiserror::Error;
use tracing::debug;

use crate::domain::{Backup, BackupRestore};

pub const POLL_INTERVAL_MS: u32 = 5000;

/// Text the admin must type before a restore is sent
pub const RESTORE_CONFIRMATION: &str = "RESTORE";

/// True while any backup or restore job is still running server-side
pub fn needs_polling(backups: &[Backup], restores: &[BackupRestore]) -> bool {
    backups.iter().any(|b| b.status.is_active()) || restores.iter().any(BackupRestore::is_active)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Jobs appeared; start the interval
    Start,
    /// Keep the running interval
    Continue,
    /// Everything is terminal; clear the interval
    Stop,
    /// Nothing running and no interval
    Idle,
}

/// Tracks whether the refresh interval should be running and whether a loop already drives it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupMonitor {
    polling: bool,
    looping: bool,
}

impl BackupMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Feed the latest lists after every fetch
    pub fn observe(&mut self, backups: &[Backup], restores: &[BackupRestore]) -> PollDecision {
        let active = needs_polling(backups, restores);
        let decision = match (self.polling, active) {
            (false, true) => PollDecision::Start,
            (true, true) => PollDecision::Continue,
            (true, false) => PollDecision::Stop,
            (false, false) => PollDecision::Idle,
        };
        if matches!(decision, PollDecision::Start | PollDecision::Stop) {
            debug!("[Backups] Polling {:?}", decision);
        }
        self.polling = active;
        decision
    }

    /// A restore was just accepted; poll even before the lists show it
    pub fn force_start(&mut self) -> PollDecision {
        if self.polling {
            PollDecision::Continue
        } else {
            self.polling = true;
            PollDecision::Start
        }
    }

    pub fn stop(&mut self) {
        self.polling = false;
    }

    /// True when the caller should spawn the poll loop; at most one loop holds the claim
    pub fn claim_loop(&mut self) -> bool {
        if self.polling && !self.looping {
            self.looping = true;
            true
        } else {
            false
        }
    }

    /// Called by the loop on exit
    pub fn release_loop(&mut self) {
        self.looping = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("No backup selected")]
    NotOpen,
    #[error("Only completed backups can be restored")]
    NotRestorable,
    #[error("Acknowledge the warning first")]
    WarningNotAcknowledged,
    #[error("Type RESTORE to confirm")]
    ConfirmationMismatch,
}

/// Restore dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RestoreGate {
    #[default]
    Closed,
    /// Step 1: consequences shown
    Warning { backup_id: u32 },
    /// Step 2: waiting for the typed confirmation
    Confirming { backup_id: u32, input: String },
}

/// Proof that the confirmation was typed; only [`RestoreGate::confirm`] creates one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRestore {
    backup_id: u32,
}

impl ConfirmedRestore {
    pub fn backup_id(&self) -> u32 {
        self.backup_id
    }
}

impl RestoreGate {
    pub fn open(backup: &Backup) -> Result<Self, RestoreError> {
        if !backup.can_restore() {
            return Err(RestoreError::NotRestorable);
        }
        Ok(RestoreGate::Warning { backup_id: backup.id })
    }

    pub fn backup_id(&self) -> Option<u32> {
        match self {
            RestoreGate::Closed => None,
            RestoreGate::Warning { backup_id } | RestoreGate::Confirming { backup_id, .. } => Some(*backup_id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, RestoreGate::Closed)
    }

    /// Warning read; move to the typed confirmation
    pub fn acknowledge(&mut self) {
        if let RestoreGate::Warning { backup_id } = *self {
            *self = RestoreGate::Confirming { backup_id, input: String::new() };
        }
    }

    pub fn set_input(&mut self, text: &str) {
        if let RestoreGate::Confirming { input, .. } = self {
            *input = text.to_string();
        }
    }

    /// Exact, case-sensitive match with no trimming
    pub fn can_confirm(&self) -> bool {
        matches!(self, RestoreGate::Confirming { input, .. } if input == RESTORE_CONFIRMATION)
    }

    pub fn confirm(&self) -> Result<ConfirmedRestore, RestoreError> {
        match self {
            RestoreGate::Closed => Err(RestoreError::NotOpen),
            RestoreGate::Warning { .. } => Err(RestoreError::WarningNotAcknowledged),
            RestoreGate::Confirming { backup_id, input } if input == RESTORE_CONFIRMATION => {
                Ok(ConfirmedRestore { backup_id: *backup_id })
            }
            RestoreGate::Confirming { .. } => Err(RestoreError::ConfirmationMismatch),
        }
    }

    pub fn close(&mut self) {
        *self = RestoreGate::Closed;
    }
}

/// `1536` -> `1.5 KB`
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackupStatus, BackupType};

    fn backup(id: u32, status: BackupStatus) -> Backup {
        Backup {
            id,
            filename: format!("backup_{}.sql.gz", id),
            backup_type: BackupType::Manual,
            status,
            size: 0,
            checksum: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            completed_at: None,
            created_by: None,
            error: None,
        }
    }

    #[test]
    fn test_polling_stops_after_jobs_finish() {
        let mut monitor = BackupMonitor::new();
        assert_eq!(monitor.observe(&[backup(1, BackupStatus::Completed)], &[]), PollDecision::Idle);
        assert_eq!(monitor.observe(&[backup(2, BackupStatus::Pending)], &[]), PollDecision::Start);
        assert_eq!(monitor.observe(&[backup(2, BackupStatus::InProgress)], &[]), PollDecision::Continue);
        assert_eq!(monitor.observe(&[backup(2, BackupStatus::Failed)], &[]), PollDecision::Stop);
        assert!(!monitor.is_polling());
        assert_eq!(monitor.observe(&[backup(2, BackupStatus::Failed)], &[]), PollDecision::Idle);
    }

    #[test]
    fn test_restore_jobs_keep_polling() {
        let restore: BackupRestore = serde_json::from_value(serde_json::json!({
            "restore_id": 1, "restore_date": "2024-01-01T00:00:00Z", "user_email": "a@b.co",
            "user_id": 1, "backup_restored": "b.sql.gz", "backup_id": 3,
            "backup_date": "2024-01-01T00:00:00Z", "status": "in_progress"
        }))
        .unwrap();
        assert!(needs_polling(&[], &[restore]));
    }

    #[test]
    fn test_force_start() {
        let mut monitor = BackupMonitor::new();
        assert_eq!(monitor.force_start(), PollDecision::Start);
        assert_eq!(monitor.force_start(), PollDecision::Continue);
    }

    #[test]
    fn test_one_loop_while_restarting() {
        let mut monitor = BackupMonitor::new();
        assert!(!monitor.claim_loop());
        monitor.force_start();
        assert!(monitor.claim_loop());

        // Jobs finish, then a new one starts before the sleeping loop wakes up
        assert_eq!(monitor.observe(&[backup(1, BackupStatus::Completed)], &[]), PollDecision::Stop);
        assert_eq!(monitor.force_start(), PollDecision::Start);
        assert!(!monitor.claim_loop());

        monitor.release_loop();
        assert!(monitor.claim_loop());
    }

    #[test]
    fn test_restore_requires_exact_text() {
        let mut gate = RestoreGate::open(&backup(4, BackupStatus::Completed)).unwrap();
        assert_eq!(gate.confirm(), Err(RestoreError::WarningNotAcknowledged));

        gate.acknowledge();
        for attempt in ["", "restore", "RESTORE ", " RESTORE", "RESTOR"] {
            gate.set_input(attempt);
            assert!(!gate.can_confirm());
            assert_eq!(gate.confirm(), Err(RestoreError::ConfirmationMismatch));
        }

        gate.set_input("RESTORE");
        assert!(gate.can_confirm());
        assert_eq!(gate.confirm().map(|c| c.backup_id()), Ok(4));

        gate.close();
        assert_eq!(gate.confirm(), Err(RestoreError::NotOpen));
    }

    #[test]
    fn test_only_completed_backups_open_gate() {
        assert_eq!(RestoreGate::open(&backup(1, BackupStatus::Failed)), Err(RestoreError::NotRestorable));
        assert_eq!(RestoreGate::open(&backup(1, BackupStatus::InProgress)), Err(RestoreError::NotRestorable));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
    }
}
