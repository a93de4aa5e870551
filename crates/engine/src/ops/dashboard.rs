//! The dashboard computation.
//!
//! One request issues independent read queries (month expenses, available
//! months, budgets, full-history series) and derives everything else in
//! memory. No transaction spans them: a concurrent insert/delete by the same
//! user may skew one snapshot against another, which is acceptable for a
//! personal dashboard.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, Statement, prelude::*};
use uuid::Uuid;

use crate::{
    BudgetStatus, DashboardData, DashboardOutcome, EngineError, ExpenseRecord, MonthPoint,
    MoneyCents, ResultEngine, YearMonth, categories,
    dashboard::{category_breakdown, insights},
    expenses,
};

use super::Engine;

impl Engine {
    /// Compute the dashboard for `user_id` and the selected period.
    ///
    /// Validates the period before touching the store. Returns
    /// [`DashboardOutcome::Redirect`] when the selected month is empty but
    /// other months have expenses.
    pub async fn dashboard(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> ResultEngine<DashboardOutcome> {
        let (first_day, next_month) = month_bounds(year, month)?;

        let month_expenses = self.month_expenses(user_id, first_day, next_month).await?;
        let available_months = self.available_months(user_id).await?;

        if month_expenses.is_empty()
            && let Some(latest) = available_months.first()
        {
            return Ok(DashboardOutcome::Redirect(*latest));
        }

        let mut spent_by_category: HashMap<Uuid, MoneyCents> = HashMap::new();
        for expense in &month_expenses {
            *spent_by_category
                .entry(expense.category_id)
                .or_insert(MoneyCents::ZERO) += expense.amount;
        }

        let budgets = self
            .budgets_with_categories(user_id)
            .await?
            .into_iter()
            .map(|(budget, category)| {
                let spent = spent_by_category
                    .get(&budget.category_id)
                    .copied()
                    .unwrap_or(MoneyCents::ZERO);
                BudgetStatus::new(
                    budget.id,
                    category.name,
                    MoneyCents::new(budget.monthly_limit_minor),
                    spent,
                )
            })
            .collect::<Vec<_>>();

        let breakdown = category_breakdown(&month_expenses);
        let series = self.monthly_series(user_id).await?;
        let insights = insights(&breakdown, &budgets, &series);

        Ok(DashboardOutcome::Payload(DashboardData {
            year,
            month,
            month_name: first_day.format("%B").to_string(),
            expenses: month_expenses,
            budgets,
            monthly_series: series,
            category_breakdown: breakdown,
            available_months,
            insights,
        }))
    }

    /// Full-history per-month totals for a user, oldest month first,
    /// independent of any selected dashboard period.
    pub async fn monthly_series(&self, user_id: &str) -> ResultEngine<Vec<MonthPoint>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT strftime('%Y-%m', date) AS month, \
                    COALESCE(SUM(amount_minor), 0) AS total \
             FROM expenses \
             WHERE user_id = ? \
             GROUP BY strftime('%Y-%m', date) \
             ORDER BY strftime('%Y-%m', date) ASC",
            [user_id.into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut series = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("", "month")?;
            let total: i64 = row.try_get("", "total")?;
            let Some(month) = parse_month_key(&key) else {
                continue;
            };
            series.push(MonthPoint {
                year: month.year,
                month: month.month,
                total: MoneyCents::new(total),
            });
        }
        Ok(series)
    }

    /// The selected month's expenses with category names, newest first.
    async fn month_expenses(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<ExpenseRecord>> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::Date.gte(from))
            .filter(expenses::Column::Date.lt(to))
            .find_also_related(categories::Entity)
            .order_by_desc(expenses::Column::Date)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (model, category) in rows {
            let Some(category) = category else { continue };
            out.push(ExpenseRecord::from_models(model, category));
        }
        Ok(out)
    }

    /// Distinct months carrying at least one expense, most recent first.
    async fn available_months(&self, user_id: &str) -> ResultEngine<Vec<YearMonth>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT DISTINCT strftime('%Y-%m', date) AS month \
             FROM expenses \
             WHERE user_id = ? \
             ORDER BY month DESC",
            [user_id.into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut months = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("", "month")?;
            if let Some(month) = parse_month_key(&key) {
                months.push(month);
            }
        }
        Ok(months)
    }
}

/// First day of the selected month and first day of the following one.
///
/// Rejects anything that does not form a calendar month (month outside 1-12,
/// out-of-range year) before any query runs.
fn month_bounds(year: i32, month: u32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidPeriod(format!("{year}-{month:02} is not a calendar month"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok((first, next))
}

/// Parse a `YYYY-MM` grouping key back into a [`YearMonth`].
fn parse_month_key(key: &str) -> Option<YearMonth> {
    let (year, month) = key.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some(YearMonth { year, month })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_year_rollover() {
        let (first, next) = month_bounds(2025, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(next, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn month_bounds_reject_bad_months() {
        assert!(matches!(
            month_bounds(2026, 0),
            Err(EngineError::InvalidPeriod(_))
        ));
        assert!(matches!(
            month_bounds(2026, 13),
            Err(EngineError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn month_keys_parse() {
        assert_eq!(
            parse_month_key("2026-03"),
            Some(YearMonth {
                year: 2026,
                month: 3
            })
        );
        assert_eq!(parse_month_key("2026-13"), None);
        assert_eq!(parse_month_key("garbage"), None);
    }
}
