use chrono::NaiveDate;
use engine::{DashboardOutcome, Engine, EngineError, MoneyCents, YearMonth};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, Statement};
use uuid::Uuid;

async fn engine_with_users(usernames: &[&str]) -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in usernames {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            [(*username).into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    Engine::builder().database(db).build()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn money(raw: &str) -> MoneyCents {
    raw.parse().unwrap()
}

async fn add_expense(engine: &Engine, user: &str, category: Uuid, amount: &str, date: NaiveDate) {
    engine
        .create_expense(user, category, money(amount), date, None)
        .await
        .unwrap();
}

fn payload(outcome: DashboardOutcome) -> engine::DashboardData {
    match outcome {
        DashboardOutcome::Payload(data) => data,
        DashboardOutcome::Redirect(target) => {
            panic!("expected payload, got redirect to {target:?}")
        }
    }
}

#[tokio::test]
async fn reference_scenario_march_dashboard() {
    let engine = engine_with_users(&["alice"]).await;
    let groceries = engine.new_category("Groceries").await.unwrap();
    engine
        .set_budget("alice", groceries, money("180.00"))
        .await
        .unwrap();

    add_expense(&engine, "alice", groceries, "100.00", date(2026, 1, 15)).await;
    add_expense(&engine, "alice", groceries, "150.00", date(2026, 2, 15)).await;
    add_expense(&engine, "alice", groceries, "200.00", date(2026, 3, 15)).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());

    assert_eq!(data.month_name, "March");
    assert_eq!(data.expenses.len(), 1);
    assert_eq!(data.expenses[0].amount.cents(), 200_00);

    assert_eq!(data.budgets.len(), 1);
    let budget = &data.budgets[0];
    assert_eq!(budget.spent.cents(), 200_00);
    assert_eq!(budget.limit.cents(), 180_00);
    assert_eq!(budget.percent_used, 111.11);
    assert!(budget.exceeded);

    let totals: Vec<i64> = data
        .monthly_series
        .iter()
        .map(|point| point.total.cents())
        .collect();
    assert_eq!(totals, vec![100_00, 150_00, 200_00]);

    assert_eq!(data.category_breakdown.len(), 1);
    assert_eq!(data.category_breakdown[0].category_name, "Groceries");
    assert_eq!(data.category_breakdown[0].total.cents(), 200_00);

    assert_eq!(
        data.available_months,
        vec![
            YearMonth {
                year: 2026,
                month: 3
            },
            YearMonth {
                year: 2026,
                month: 2
            },
            YearMonth {
                year: 2026,
                month: 1
            },
        ]
    );

    assert_eq!(
        data.insights,
        vec![
            "Your highest spending category this month is Groceries.".to_string(),
            "You have exceeded your Groceries budget.".to_string(),
            "Your expenses have increased for the last 3 consecutive months.".to_string(),
        ]
    );
}

#[tokio::test]
async fn zero_limit_budget_never_divides() {
    let engine = engine_with_users(&["alice"]).await;
    let treats = engine.new_category("Treats").await.unwrap();
    engine
        .set_budget("alice", treats, MoneyCents::ZERO)
        .await
        .unwrap();
    add_expense(&engine, "alice", treats, "5.00", date(2026, 3, 2)).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());
    let budget = &data.budgets[0];

    assert_eq!(budget.percent_used, 0.0);
    assert!(budget.exceeded);
    // percent_used 0 means neither budget insight fires.
    assert_eq!(
        data.insights,
        vec!["Your highest spending category this month is Treats.".to_string()]
    );
}

#[tokio::test]
async fn close_to_budget_insight_at_eighty_percent() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();
    engine
        .set_budget("alice", food, money("100.00"))
        .await
        .unwrap();
    add_expense(&engine, "alice", food, "80.00", date(2026, 3, 5)).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());
    assert_eq!(data.budgets[0].percent_used, 80.0);
    assert!(
        data.insights
            .contains(&"You are close to exceeding your Food budget.".to_string())
    );
    assert!(
        !data
            .insights
            .iter()
            .any(|insight| insight.starts_with("You have exceeded"))
    );
}

#[tokio::test]
async fn equal_months_do_not_fire_trend_insight() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    add_expense(&engine, "alice", food, "100.00", date(2026, 1, 10)).await;
    add_expense(&engine, "alice", food, "150.00", date(2026, 2, 10)).await;
    add_expense(&engine, "alice", food, "150.00", date(2026, 3, 10)).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());
    assert!(
        !data
            .insights
            .iter()
            .any(|insight| insight.contains("increased"))
    );
}

#[tokio::test]
async fn highest_category_tie_goes_to_first_encountered() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();
    let travel = engine.new_category("Travel").await.unwrap();

    // Equal totals; the month listing is newest-first, so Travel (Mar 20) is
    // encountered before Food (Mar 10).
    add_expense(&engine, "alice", food, "50.00", date(2026, 3, 10)).await;
    add_expense(&engine, "alice", travel, "50.00", date(2026, 3, 20)).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());
    assert_eq!(data.category_breakdown[0].category_name, "Travel");
    assert_eq!(
        data.insights[0],
        "Your highest spending category this month is Travel."
    );
}

#[tokio::test]
async fn empty_month_redirects_to_most_recent() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    add_expense(&engine, "alice", food, "10.00", date(2026, 1, 5)).await;
    add_expense(&engine, "alice", food, "20.00", date(2026, 2, 5)).await;

    let outcome = engine.dashboard("alice", 2026, 5).await.unwrap();
    assert_eq!(
        outcome,
        DashboardOutcome::Redirect(YearMonth {
            year: 2026,
            month: 2
        })
    );
}

#[tokio::test]
async fn deleting_last_expense_of_viewed_month_redirects() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    add_expense(&engine, "alice", food, "10.00", date(2026, 1, 5)).await;
    let march = engine
        .create_expense("alice", food, money("30.00"), date(2026, 3, 5), None)
        .await
        .unwrap();

    payload(engine.dashboard("alice", 2026, 3).await.unwrap());

    engine.delete_expense("alice", march).await.unwrap();

    let outcome = engine.dashboard("alice", 2026, 3).await.unwrap();
    assert_eq!(
        outcome,
        DashboardOutcome::Redirect(YearMonth {
            year: 2026,
            month: 1
        })
    );
}

#[tokio::test]
async fn no_expenses_at_all_renders_empty_payload() {
    let engine = engine_with_users(&["alice"]).await;

    let data = payload(engine.dashboard("alice", 2026, 3).await.unwrap());
    assert!(data.expenses.is_empty());
    assert!(data.monthly_series.is_empty());
    assert!(data.category_breakdown.is_empty());
    assert!(data.available_months.is_empty());
    assert!(data.insights.is_empty());
}

#[tokio::test]
async fn invalid_period_is_rejected_before_queries() {
    let engine = engine_with_users(&["alice"]).await;

    assert!(matches!(
        engine.dashboard("alice", 2026, 0).await,
        Err(EngineError::InvalidPeriod(_))
    ));
    assert!(matches!(
        engine.dashboard("alice", 2026, 13).await,
        Err(EngineError::InvalidPeriod(_))
    ));
}

#[tokio::test]
async fn monthly_series_is_ascending_across_years() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    add_expense(&engine, "alice", food, "30.00", date(2026, 1, 3)).await;
    add_expense(&engine, "alice", food, "10.00", date(2025, 11, 3)).await;
    add_expense(&engine, "alice", food, "20.00", date(2025, 12, 3)).await;

    let series = engine.monthly_series("alice").await.unwrap();
    let months: Vec<(i32, u32)> = series
        .iter()
        .map(|point| (point.year, point.month))
        .collect();
    assert_eq!(months, vec![(2025, 11), (2025, 12), (2026, 1)]);
    assert_eq!(series[0].label(), "Nov 2025");
    assert_eq!(series[2].label(), "Jan 2026");
}

#[tokio::test]
async fn dashboard_only_sees_own_expenses() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let food = engine.new_category("Food").await.unwrap();

    add_expense(&engine, "alice", food, "100.00", date(2026, 3, 5)).await;
    add_expense(&engine, "bob", food, "7.00", date(2026, 3, 9)).await;

    let data = payload(engine.dashboard("bob", 2026, 3).await.unwrap());
    assert_eq!(data.expenses.len(), 1);
    assert_eq!(data.expenses[0].amount.cents(), 7_00);
    assert_eq!(data.monthly_series.len(), 1);
    assert_eq!(data.monthly_series[0].total.cents(), 7_00);
}
