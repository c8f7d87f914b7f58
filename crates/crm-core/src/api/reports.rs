//! Report endpoints; aggregation is server-side

use serde::de::DeserializeOwned;

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, Transport};
use crate::domain::{
    ClientRetentionData, ConversionRateData, FollowUpData, LeadSourceData, PipelineData,
    ProjectPerformanceData, RevenueByClientData, RevenueForecastData, UpcomingTaskData,
    UserActivityData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Pipeline,
    LeadSource,
    ConversionRate,
    RevenueByClient,
    UserActivity,
    FollowUps,
    ClientRetention,
    ProjectPerformance,
    UpcomingTasks,
    RevenueForecast,
}

impl ReportKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Pipeline => "pipeline",
            ReportKind::LeadSource => "lead-source",
            ReportKind::ConversionRate => "conversion-rate",
            ReportKind::RevenueByClient => "revenue-by-client",
            ReportKind::UserActivity => "user-activity",
            ReportKind::FollowUps => "follow-ups",
            ReportKind::ClientRetention => "client-retention",
            ReportKind::ProjectPerformance => "project-performance",
            ReportKind::UpcomingTasks => "upcoming-tasks",
            ReportKind::RevenueForecast => "revenue-forecast",
        }
    }

    /// Key of the array in the response envelope
    pub fn envelope_key(&self) -> &'static str {
        match self {
            ReportKind::Pipeline => "pipeline",
            ReportKind::LeadSource => "sources",
            ReportKind::ConversionRate => "conversion_data",
            ReportKind::RevenueByClient => "revenue",
            ReportKind::UserActivity => "activity",
            ReportKind::FollowUps => "follow_ups",
            ReportKind::ClientRetention => "retention",
            ReportKind::ProjectPerformance => "projects",
            ReportKind::UpcomingTasks => "tasks",
            ReportKind::RevenueForecast => "forecast",
        }
    }
}

/// Optional report filters; absent or zero values are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<u32>,
    pub status: Option<String>,
    pub limit: Option<u32>,
}

impl ReportFilters {
    pub fn date_range(start: &str, end: &str) -> Self {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        Self {
            start_date: non_empty(start),
            end_date: non_empty(end),
            ..Default::default()
        }
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("start_date", self.start_date.as_deref().filter(|s| !s.is_empty()))
            .query_opt("end_date", self.end_date.as_deref().filter(|s| !s.is_empty()))
            .query_opt("user_id", self.user_id.filter(|id| *id != 0))
            .query_opt("status", self.status.as_deref().filter(|s| !s.is_empty()))
            .query_opt("limit", self.limit.filter(|l| *l != 0))
    }
}

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn fetch_report<R: DeserializeOwned>(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
    ) -> Result<Vec<R>, ApiError> {
        let request = filters.apply(ApiRequest::get(format!("/reports/{}", kind.endpoint())));
        self.fetch_envelope(&request, kind.envelope_key()).await
    }

    pub async fn pipeline_report(&self, filters: &ReportFilters) -> Result<Vec<PipelineData>, ApiError> {
        self.fetch_report(ReportKind::Pipeline, filters).await
    }

    pub async fn lead_source_report(&self, filters: &ReportFilters) -> Result<Vec<LeadSourceData>, ApiError> {
        self.fetch_report(ReportKind::LeadSource, filters).await
    }

    pub async fn conversion_rate_report(&self, filters: &ReportFilters) -> Result<Vec<ConversionRateData>, ApiError> {
        self.fetch_report(ReportKind::ConversionRate, filters).await
    }

    pub async fn revenue_by_client_report(&self, filters: &ReportFilters) -> Result<Vec<RevenueByClientData>, ApiError> {
        self.fetch_report(ReportKind::RevenueByClient, filters).await
    }

    pub async fn user_activity_report(&self, filters: &ReportFilters) -> Result<Vec<UserActivityData>, ApiError> {
        self.fetch_report(ReportKind::UserActivity, filters).await
    }

    pub async fn follow_ups_report(&self, filters: &ReportFilters) -> Result<Vec<FollowUpData>, ApiError> {
        self.fetch_report(ReportKind::FollowUps, filters).await
    }

    pub async fn client_retention_report(&self, filters: &ReportFilters) -> Result<Vec<ClientRetentionData>, ApiError> {
        self.fetch_report(ReportKind::ClientRetention, filters).await
    }

    pub async fn project_performance_report(&self, filters: &ReportFilters) -> Result<Vec<ProjectPerformanceData>, ApiError> {
        self.fetch_report(ReportKind::ProjectPerformance, filters).await
    }

    pub async fn upcoming_tasks_report(&self, filters: &ReportFilters) -> Result<Vec<UpcomingTaskData>, ApiError> {
        self.fetch_report(ReportKind::UpcomingTasks, filters).await
    }

    pub async fn revenue_forecast_report(&self, filters: &ReportFilters) -> Result<Vec<RevenueForecastData>, ApiError> {
        self.fetch_report(ReportKind::RevenueForecast, filters).await
    }
}
