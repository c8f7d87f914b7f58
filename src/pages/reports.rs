//! Reports Page
//!
//! Tabs over the server's pre-aggregated reports with an optional date range.

use crm_core::api::ReportFilters;
use crm_core::domain::{
    ClientRetentionData, ConversionRateData, FollowUpData, LeadSourceData, PipelineData,
    ProjectPerformanceData, RevenueByClientData, RevenueForecastData, UpcomingTaskData,
    UserActivityData,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::components::{Bar, BarChart};
use crate::context::{use_session, Api};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportTab {
    Overview,
    Pipeline,
    LeadSources,
    Conversion,
    Revenue,
    Activity,
}

impl ReportTab {
    const ALL: [ReportTab; 6] = [
        ReportTab::Overview,
        ReportTab::Pipeline,
        ReportTab::LeadSources,
        ReportTab::Conversion,
        ReportTab::Revenue,
        ReportTab::Activity,
    ];

    fn label(&self) -> &'static str {
        match self {
            ReportTab::Overview => "Overview",
            ReportTab::Pipeline => "Pipeline",
            ReportTab::LeadSources => "Lead Sources",
            ReportTab::Conversion => "Conversion",
            ReportTab::Revenue => "Revenue",
            ReportTab::Activity => "Activity",
        }
    }
}

/// Every series the tabs can show; a tab fills only what it displays
#[derive(Clone, Debug, Default, PartialEq)]
struct ReportData {
    pipeline: Vec<PipelineData>,
    sources: Vec<LeadSourceData>,
    conversion: Vec<ConversionRateData>,
    revenue: Vec<RevenueByClientData>,
    forecast: Vec<RevenueForecastData>,
    performance: Vec<ProjectPerformanceData>,
    activity: Vec<UserActivityData>,
    retention: Vec<ClientRetentionData>,
    follow_ups: Vec<FollowUpData>,
    tasks: Vec<UpcomingTaskData>,
}

/// Failed series stay empty; the error was already toasted
async fn load(api: &Api, tab: ReportTab, filters: &ReportFilters) -> ReportData {
    let mut data = ReportData::default();
    match tab {
        ReportTab::Overview => {
            data.pipeline = api.pipeline_report(filters).await.unwrap_or_default();
            data.follow_ups = api.follow_ups_report(filters).await.unwrap_or_default();
            data.tasks = api.upcoming_tasks_report(filters).await.unwrap_or_default();
        }
        ReportTab::Pipeline => {
            data.pipeline = api.pipeline_report(filters).await.unwrap_or_default();
        }
        ReportTab::LeadSources => {
            data.sources = api.lead_source_report(filters).await.unwrap_or_default();
        }
        ReportTab::Conversion => {
            data.conversion = api.conversion_rate_report(filters).await.unwrap_or_default();
        }
        ReportTab::Revenue => {
            data.revenue = api.revenue_by_client_report(filters).await.unwrap_or_default();
            data.forecast = api.revenue_forecast_report(filters).await.unwrap_or_default();
            data.performance = api.project_performance_report(filters).await.unwrap_or_default();
        }
        ReportTab::Activity => {
            data.activity = api.user_activity_report(filters).await.unwrap_or_default();
            data.retention = api.client_retention_report(filters).await.unwrap_or_default();
        }
    }
    data
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[component]
fn DataTable(headers: &'static [&'static str], rows: Vec<Vec<String>>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="empty-state">"No data for this period"</p> }.into_any();
    }
    view! {
        <table class="data-table report-table">
            <thead>
                <tr>{headers.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}</tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| view! {
                    <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let session = use_session();
    let tab = RwSignal::new(ReportTab::Overview);
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let filters = RwSignal::new(ReportFilters::default());
    let data = RwSignal::new(ReportData::default());
    let loading = RwSignal::new(false);

    Effect::new(move |_| {
        let current = tab.get();
        let current_filters = filters.get();
        let api = session.api();
        loading.set(true);
        spawn_local(async move {
            let loaded = load(&api, current, &current_filters).await;
            debug!("[Reports] Loaded {}", current.label());
            // Ignore a tab the user already left
            if tab.get_untracked() == current {
                data.set(loaded);
                loading.set(false);
            }
        });
    });

    let apply = move |_| filters.set(ReportFilters::date_range(&start.get_untracked(), &end.get_untracked()));
    let clear = move |_| {
        start.set(String::new());
        end.set(String::new());
        filters.set(ReportFilters::default());
    };

    let money = move |amount: f64| session.tenant.with(|t| t.regional.format_money(amount));
    let status_label = move |status: &str| session.tenant.with(|t| t.status_label(status));

    let pipeline_bars = Signal::derive(move || {
        data.with(|d| d.pipeline.iter().map(|p| Bar::count(status_label(&p.status), p.count)).collect())
    });
    let source_bars = Signal::derive(move || {
        data.with(|d| d.sources.iter().map(|s| Bar::count(s.source.clone(), s.count)).collect())
    });
    let conversion_bars = Signal::derive(move || {
        data.with(|d| {
            d.conversion
                .iter()
                .map(|c| Bar { label: c.period.clone(), value: c.rate, display: percent(c.rate) })
                .collect()
        })
    });
    let revenue_bars = Signal::derive(move || {
        data.with(|d| {
            d.revenue
                .iter()
                .map(|r| Bar { label: r.client_name.clone(), value: r.total_revenue, display: money(r.total_revenue) })
                .collect()
        })
    });

    let tab_body = move || match tab.get() {
        ReportTab::Overview => view! {
            <BarChart title="Pipeline" bars=pipeline_bars />
            <h3>"Follow-ups"</h3>
            {data.with(|d| view! {
                <DataTable
                    headers=&["Title", "Due", "Assigned To", "Priority", "Record"]
                    rows=d.follow_ups.iter().map(|f| vec![
                        f.title.clone(), f.due_date.clone(), f.assigned_to.clone(), f.priority.clone(),
                        format!("{} ({})", f.entity_name, f.entity_type),
                    ]).collect()
                />
            })}
            <h3>"Upcoming Tasks"</h3>
            {data.with(|d| view! {
                <DataTable
                    headers=&["Title", "Due", "Assigned To", "Record"]
                    rows=d.tasks.iter().map(|t| vec![
                        t.title.clone(), t.due_date.clone(), t.assigned_to.clone(),
                        format!("{} ({})", t.entity_name, t.entity_type),
                    ]).collect()
                />
            })}
        }
        .into_any(),
        ReportTab::Pipeline => view! {
            <BarChart title="Leads by Status" bars=pipeline_bars />
            {data.with(|d| view! {
                <DataTable
                    headers=&["Status", "Count", "Share"]
                    rows=d.pipeline.iter().map(|p| vec![
                        status_label(&p.status), p.count.to_string(), percent(p.percentage),
                    ]).collect()
                />
            })}
        }
        .into_any(),
        ReportTab::LeadSources => view! {
            <BarChart title="Leads by Source" bars=source_bars />
            {data.with(|d| view! {
                <DataTable
                    headers=&["Source", "Leads", "Conversion"]
                    rows=d.sources.iter().map(|s| vec![
                        s.source.clone(), s.count.to_string(), percent(s.conversion_rate),
                    ]).collect()
                />
            })}
        }
        .into_any(),
        ReportTab::Conversion => view! {
            <BarChart title="Conversion Rate" bars=conversion_bars />
            {data.with(|d| view! {
                <DataTable
                    headers=&["Period", "Converted", "Total", "Rate"]
                    rows=d.conversion.iter().map(|c| vec![
                        c.period.clone(), c.converted.to_string(), c.total.to_string(), percent(c.rate),
                    ]).collect()
                />
            })}
        }
        .into_any(),
        ReportTab::Revenue => view! {
            <BarChart title="Revenue by Client" bars=revenue_bars />
            <h3>"Forecast"</h3>
            {data.with(|d| view! {
                <DataTable
                    headers=&["Month", "Projected", "Confidence"]
                    rows=d.forecast.iter().map(|f| vec![
                        f.month.clone(), money(f.projected_revenue), f.confidence.clone(),
                    ]).collect()
                />
            })}
            <h3>"Project Performance"</h3>
            {data.with(|d| view! {
                <DataTable
                    headers=&["Project", "Status", "Complete", "Days Left", "Budget Used"]
                    rows=d.performance.iter().map(|p| vec![
                        p.project_name.clone(), p.status.clone(), percent(p.completion_percentage),
                        p.days_remaining.to_string(), percent(p.budget_used),
                    ]).collect()
                />
            })}
        }
        .into_any(),
        ReportTab::Activity => view! {
            {data.with(|d| view! {
                <DataTable
                    headers=&["User", "Leads", "Clients", "Interactions"]
                    rows=d.activity.iter().map(|a| vec![
                        a.user_email.clone(), a.leads_created.to_string(), a.clients_created.to_string(),
                        a.interactions_logged.to_string(),
                    ]).collect()
                />
            })}
            <h3>"Client Retention"</h3>
            {data.with(|d| view! {
                <DataTable
                    headers=&["Cohort", "Retained", "Total", "Rate"]
                    rows=d.retention.iter().map(|r| vec![
                        r.cohort.clone(), r.retained_clients.to_string(), r.total_clients.to_string(),
                        percent(r.retention_rate),
                    ]).collect()
                />
            })}
        }
        .into_any(),
    };

    view! {
        <div class="reports-page">
            <header class="page-header">
                <h1>"Reports"</h1>
            </header>
            <div class="report-filters">
                <label>"From " <input type="date" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev)) /></label>
                <label>"To " <input type="date" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev)) /></label>
                <button class="primary-btn" on:click=apply>"Apply"</button>
                <button class="cancel-btn" on:click=clear>"Clear"</button>
            </div>
            <div class="report-tabs" role="tablist">
                {ReportTab::ALL.iter().map(|&t| view! {
                    <button
                        role="tab"
                        class=move || if tab.get() == t { "report-tab active" } else { "report-tab" }
                        on:click=move |_| tab.set(t)
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>
            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <div class="report-body">{tab_body}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.345), "12.3%");
        assert_eq!(percent(0.0), "0.0%");
    }
}
