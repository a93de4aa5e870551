use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod landing {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Landing {
        pub message: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
    }

    /// Scaffold returned by the add-expense and set-budget form endpoints:
    /// the categories a client can pick from.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryList {
        pub categories: Vec<CategoryView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category_id: Uuid,
        /// Decimal amount, e.g. `"12.34"`. Accepts `.` or `,` as the decimal
        /// separator; at most 2 fractional digits.
        pub amount: String,
        /// ISO calendar date (`YYYY-MM-DD`).
        pub date: NaiveDate,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: String,
        /// Amount in cents.
        pub amount_minor: i64,
        pub description: Option<String>,
        pub date: NaiveDate,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category_id: Uuid,
        /// Decimal monthly limit, e.g. `"180.00"`.
        pub monthly_limit: String,
    }

    /// One budget row of the dashboard: limit, month spend and utilization.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetStatusView {
        pub id: Uuid,
        pub category: String,
        pub limit_minor: i64,
        pub spent_minor: i64,
        /// `spent / limit * 100`, rounded to 2 decimal places; 0 when the
        /// limit is 0.
        pub percent_used: f64,
        pub exceeded: bool,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonthRef {
        pub year: i32,
        pub month: u32,
    }

    /// One point of the full-history monthly series.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthPointView {
        /// Human-readable month, e.g. `"Mar 2026"`.
        pub label: String,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub selected_year: i32,
        pub selected_month: u32,
        /// Full month name, e.g. `"March"`.
        pub selected_month_name: String,
        /// The selected month's expenses, newest first.
        pub expenses: Vec<super::expense::ExpenseView>,
        pub budgets: Vec<super::budget::BudgetStatusView>,
        pub monthly_series: Vec<MonthPointView>,
        pub category_breakdown: Vec<CategoryTotalView>,
        /// Months with at least one expense, most recent first.
        pub available_months: Vec<MonthRef>,
        pub insights: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlySummaryResponse {
        pub monthly_series: Vec<MonthPointView>,
    }
}
