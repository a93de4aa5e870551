use chrono::NaiveDate;
use engine::{Engine, EngineError, MoneyCents};
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

#[tokio::test]
async fn categories_are_deduplicated_by_normalized_name() {
    let engine = engine_with_users(&["alice"]).await;

    engine.new_category("Groceries").await.unwrap();
    assert!(matches!(
        engine.new_category("  groceries ").await,
        Err(EngineError::ExistingKey(_))
    ));
    assert!(matches!(
        engine.new_category("Grocéries").await,
        Err(EngineError::ExistingKey(_))
    ));
    assert!(matches!(
        engine.new_category("   ").await,
        Err(EngineError::InvalidName(_))
    ));

    let categories = engine.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Groceries");
}

#[tokio::test]
async fn expense_creation_validates_before_inserting() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    assert!(matches!(
        engine
            .create_expense("alice", food, MoneyCents::ZERO, date(2026, 3, 1), None)
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine
            .create_expense("alice", food, money("-5.00"), date(2026, 3, 1), None)
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine
            .create_expense(
                "alice",
                Uuid::new_v4(),
                money("5.00"),
                date(2026, 3, 1),
                None
            )
            .await,
        Err(EngineError::KeyNotFound(_))
    ));

    assert!(engine.expenses_with_categories("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn expense_description_is_trimmed() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    let with_text = engine
        .create_expense(
            "alice",
            food,
            money("5.00"),
            date(2026, 3, 1),
            Some("  lunch  "),
        )
        .await
        .unwrap();
    let blank = engine
        .create_expense("alice", food, money("5.00"), date(2026, 3, 2), Some("   "))
        .await
        .unwrap();

    let record = engine.expense("alice", with_text).await.unwrap();
    assert_eq!(record.description.as_deref(), Some("lunch"));

    let record = engine.expense("alice", blank).await.unwrap();
    assert_eq!(record.description, None);
}

#[tokio::test]
async fn expenses_are_invisible_to_other_users() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let food = engine.new_category("Food").await.unwrap();

    let expense = engine
        .create_expense("alice", food, money("12.34"), date(2026, 3, 1), None)
        .await
        .unwrap();

    assert_eq!(
        engine.expense("bob", expense).await,
        Err(EngineError::KeyNotFound("expense not exists".to_string()))
    );
    assert_eq!(
        engine.delete_expense("bob", expense).await,
        Err(EngineError::KeyNotFound("expense not exists".to_string()))
    );

    // Still there for its owner.
    let record = engine.expense("alice", expense).await.unwrap();
    assert_eq!(record.amount.cents(), 12_34);
    engine.delete_expense("alice", expense).await.unwrap();
    assert!(engine.expenses_with_categories("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn one_budget_per_user_and_category() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let food = engine.new_category("Food").await.unwrap();

    engine
        .set_budget("alice", food, money("100.00"))
        .await
        .unwrap();
    assert!(matches!(
        engine.set_budget("alice", food, money("50.00")).await,
        Err(EngineError::ExistingKey(_))
    ));

    // A different user budgets the same category freely.
    engine.set_budget("bob", food, money("80.00")).await.unwrap();
}

#[tokio::test]
async fn budget_limit_must_not_be_negative() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();

    assert!(matches!(
        engine.set_budget("alice", food, money("-1.00")).await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.set_budget("alice", Uuid::new_v4(), money("1.00")).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn budgets_are_invisible_to_other_users() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let food = engine.new_category("Food").await.unwrap();

    let budget = engine
        .set_budget("alice", food, money("100.00"))
        .await
        .unwrap();

    assert_eq!(
        engine.delete_budget("bob", budget).await,
        Err(EngineError::KeyNotFound("budget not exists".to_string()))
    );
    engine.delete_budget("alice", budget).await.unwrap();
    assert_eq!(
        engine.delete_budget("alice", budget).await,
        Err(EngineError::KeyNotFound("budget not exists".to_string()))
    );
}

#[tokio::test]
async fn export_listing_is_oldest_first_with_category_names() {
    let engine = engine_with_users(&["alice"]).await;
    let food = engine.new_category("Food").await.unwrap();
    let travel = engine.new_category("Travel").await.unwrap();

    engine
        .create_expense(
            "alice",
            travel,
            money("99.99"),
            date(2026, 2, 20),
            Some("train"),
        )
        .await
        .unwrap();
    engine
        .create_expense("alice", food, money("5.50"), date(2026, 1, 3), None)
        .await
        .unwrap();

    let rows = engine.expenses_with_categories("alice").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category_name, "Food");
    assert_eq!(rows[0].date, date(2026, 1, 3));
    assert_eq!(rows[1].category_name, "Travel");
    assert_eq!(rows[1].description.as_deref(), Some("train"));
}
