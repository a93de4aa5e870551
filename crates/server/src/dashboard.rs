//! Dashboard API endpoints

use api_types::budget::BudgetStatusView;
use api_types::dashboard::{
    CategoryTotalView, DashboardResponse, MonthPointView, MonthRef, MonthlySummaryResponse,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::{ServerError, expenses::map_expense, server::ServerState, user};
use engine::{BudgetStatus, CategoryTotal, DashboardData, DashboardOutcome, MonthPoint, YearMonth};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    month: Option<String>,
    year: Option<String>,
}

/// Resolve the selected period, falling back to the current month/year for
/// absent, malformed or out-of-range parameters so the dashboard is always
/// renderable.
fn selected_period(query: &DashboardQuery) -> (i32, u32) {
    let today = Local::now().date_naive();
    let month = query
        .month
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .filter(|month| (1..=12).contains(month))
        .unwrap_or_else(|| today.month());
    let year = query
        .year
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| today.year());
    (year, month)
}

/// Handle dashboard requests: JSON payload, or a redirect to the most recent
/// month with data when the selected month is empty.
pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, ServerError> {
    let (year, month) = selected_period(&query);

    match state.engine.dashboard(&user.username, year, month).await? {
        DashboardOutcome::Redirect(target) => Ok(Redirect::to(&format!(
            "/dashboard/?month={}&year={}",
            target.month, target.year
        ))
        .into_response()),
        DashboardOutcome::Payload(data) => Ok(Json(map_dashboard(data)).into_response()),
    }
}

/// Handle requests for the full monthly series.
pub async fn monthly_summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<MonthlySummaryResponse>, ServerError> {
    let series = state.engine.monthly_series(&user.username).await?;

    Ok(Json(MonthlySummaryResponse {
        monthly_series: series.into_iter().map(map_month_point).collect(),
    }))
}

fn map_budget(status: BudgetStatus) -> BudgetStatusView {
    BudgetStatusView {
        id: status.id,
        category: status.category_name,
        limit_minor: status.limit.cents(),
        spent_minor: status.spent.cents(),
        percent_used: status.percent_used,
        exceeded: status.exceeded,
    }
}

fn map_month_point(point: MonthPoint) -> MonthPointView {
    MonthPointView {
        label: point.label(),
        total: point.total.to_f64(),
    }
}

fn map_category_total(total: CategoryTotal) -> CategoryTotalView {
    CategoryTotalView {
        category: total.category_name,
        total: total.total.to_f64(),
    }
}

fn map_month_ref(month: YearMonth) -> MonthRef {
    MonthRef {
        year: month.year,
        month: month.month,
    }
}

fn map_dashboard(data: DashboardData) -> DashboardResponse {
    DashboardResponse {
        selected_year: data.year,
        selected_month: data.month,
        selected_month_name: data.month_name,
        expenses: data.expenses.into_iter().map(map_expense).collect(),
        budgets: data.budgets.into_iter().map(map_budget).collect(),
        monthly_series: data.monthly_series.into_iter().map(map_month_point).collect(),
        category_breakdown: data
            .category_breakdown
            .into_iter()
            .map(map_category_total)
            .collect(),
        available_months: data.available_months.into_iter().map(map_month_ref).collect(),
        insights: data.insights,
    }
}
