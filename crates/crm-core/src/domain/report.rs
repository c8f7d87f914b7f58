//! Pre-aggregated report series (computed server-side)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineData {
    pub status: String,
    pub count: u32,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSourceData {
    pub source: String,
    pub count: u32,
    #[serde(default)]
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRateData {
    pub period: String,
    pub converted: u32,
    pub total: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByClientData {
    pub client_name: String,
    pub total_revenue: f64,
    pub project_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivityData {
    pub user_email: String,
    pub leads_created: u32,
    pub clients_created: u32,
    pub interactions_logged: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpData {
    pub id: u32,
    pub title: String,
    pub due_date: String,
    pub assigned_to: String,
    pub priority: String,
    pub entity_type: String,
    pub entity_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRetentionData {
    pub cohort: String,
    pub retained_clients: u32,
    pub total_clients: u32,
    pub retention_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPerformanceData {
    pub project_name: String,
    pub status: String,
    pub completion_percentage: f64,
    pub days_remaining: i64,
    pub budget_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingTaskData {
    pub id: u32,
    pub title: String,
    pub due_date: String,
    pub assigned_to: String,
    pub entity_type: String,
    pub entity_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueForecastData {
    pub month: String,
    pub projected_revenue: f64,
    pub confidence: String,
}
