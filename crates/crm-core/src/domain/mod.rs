//! Domain Layer
//!
//! Plain records mirrored from the backend's API responses.
//! The client holds no authoritative state; these only carry what the server sends.

mod entity;
mod client;
mod lead;
mod project;
mod contact;
mod interaction;
mod backup;
mod file;
mod report;
mod user;

pub use entity::{Entity, EntityKind, PhoneLabel, TrashItem};
pub use client::{Account, Client, ClientPage};
pub use lead::{Lead, LeadPage};
pub use project::{AssignedUser, Project, ProjectLink, ProjectPage};
pub use contact::Contact;
pub use interaction::{FollowUpStatus, Interaction, InteractionPage, InteractionParent};
pub use backup::{Backup, BackupRestore, BackupStatus, BackupType};
pub use file::FileInfo;
pub use report::{
    ClientRetentionData, ConversionRateData, FollowUpData, LeadSourceData, PipelineData,
    ProjectPerformanceData, RevenueByClientData, RevenueForecastData, UpcomingTaskData,
    UserActivityData,
};
pub use user::{LoginResponse, Tenant, User};
