//! FinSight core engine.
//!
//! Persists categories, expenses and monthly budgets through sea-orm and
//! computes the per-month dashboard: budget utilization, the full-history
//! monthly series, the category breakdown and the derived insight strings.
//! The HTTP boundary lives in the `server` crate; this crate never reads
//! request state and takes the acting user explicitly on every operation.

pub use categories::Category;
pub use dashboard::{
    BudgetStatus, CategoryTotal, DashboardData, DashboardOutcome, MonthPoint, YearMonth,
};
pub use error::EngineError;
pub use expenses::ExpenseRecord;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};

mod budgets;
mod categories;
mod dashboard;
mod error;
mod expenses;
mod money;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
