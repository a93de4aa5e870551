//! Dashboard payload types and the insight rule set.
//!
//! Everything here is pure: the queries live in `ops::dashboard`, these types
//! and rules only transform already-fetched rows. Insights are derived on
//! every request and never persisted.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{ExpenseRecord, MoneyCents};

/// A calendar month, the grouping key of the whole dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// One budget with its spend for the selected month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub id: Uuid,
    pub category_name: String,
    pub limit: MoneyCents,
    pub spent: MoneyCents,
    /// `spent / limit * 100` rounded to 2 decimal places; 0 when the limit
    /// is 0 so a zero budget never divides by zero.
    pub percent_used: f64,
    pub exceeded: bool,
}

impl BudgetStatus {
    pub fn new(id: Uuid, category_name: String, limit: MoneyCents, spent: MoneyCents) -> Self {
        let percent_used = if limit.is_zero() {
            0.0
        } else {
            round2(spent.cents() as f64 / limit.cents() as f64 * 100.0)
        };
        Self {
            id,
            category_name,
            exceeded: spent > limit,
            limit,
            spent,
            percent_used,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One point of the full-history monthly series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthPoint {
    pub year: i32,
    pub month: u32,
    pub total: MoneyCents,
}

impl MonthPoint {
    /// Human-readable month, e.g. `"Mar 2026"`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => format!("{:02}/{}", self.month, self.year),
        }
    }
}

/// Total spend of one category within the selected month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub total: MoneyCents,
}

/// The rendered dashboard for one user and one selected month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardData {
    pub year: i32,
    pub month: u32,
    /// Full month name of the selected period, e.g. `"March"`.
    pub month_name: String,
    /// The month's expenses, newest first.
    pub expenses: Vec<ExpenseRecord>,
    pub budgets: Vec<BudgetStatus>,
    pub monthly_series: Vec<MonthPoint>,
    pub category_breakdown: Vec<CategoryTotal>,
    /// Months with at least one expense, most recent first.
    pub available_months: Vec<YearMonth>,
    pub insights: Vec<String>,
}

/// Outcome of a dashboard request.
///
/// `Redirect` is returned when the selected month has no expenses but other
/// months do (e.g. the only expense of the viewed month was just deleted), so
/// the boundary can send the client to the most recent month with data
/// instead of rendering an empty page.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardOutcome {
    Redirect(YearMonth),
    Payload(DashboardData),
}

/// Groups the selected month's expenses by category, in first-encounter
/// order. Encounter order matters: it is the tie-breaking order of the
/// highest-spending-category insight.
pub(crate) fn category_breakdown(expenses: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for expense in expenses {
        match index.get(&expense.category_id) {
            Some(&at) => totals[at].total += expense.amount,
            None => {
                index.insert(expense.category_id, totals.len());
                totals.push(CategoryTotal {
                    category_name: expense.category_name.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals
}

/// Evaluates the three insight rules, in this fixed order:
///
/// 1. highest-spending category of the selected month (first wins on ties);
/// 2. per budget, in `budgets` order: exceeded (>= 100%) or close to it
///    (>= 80%), at most one message per budget — the rounded percentage is
///    what is compared;
/// 3. strictly increasing totals over the last three months of the series.
pub(crate) fn insights(
    breakdown: &[CategoryTotal],
    budgets: &[BudgetStatus],
    series: &[MonthPoint],
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(first) = breakdown.first() {
        let mut top = first;
        for candidate in &breakdown[1..] {
            if candidate.total > top.total {
                top = candidate;
            }
        }
        insights.push(format!(
            "Your highest spending category this month is {}.",
            top.category_name
        ));
    }

    for budget in budgets {
        if budget.percent_used >= 100.0 {
            insights.push(format!(
                "You have exceeded your {} budget.",
                budget.category_name
            ));
        } else if budget.percent_used >= 80.0 {
            insights.push(format!(
                "You are close to exceeding your {} budget.",
                budget.category_name
            ));
        }
    }

    if let [.., third_last, second_last, last] = series
        && last.total > second_last.total
        && second_last.total > third_last.total
    {
        insights.push("Your expenses have increased for the last 3 consecutive months.".to_string());
    }

    insights
}
