//! Expense operations: validate-then-construct creation, ownership-checked
//! lookup and deletion, and the full-history export listing.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ExpenseRecord, MoneyCents, ResultEngine, categories, expenses};

use super::{Engine, normalize_optional_text};

fn expense_not_found() -> EngineError {
    EngineError::KeyNotFound("expense not exists".to_string())
}

impl Engine {
    /// Record a new expense owned by `user_id`.
    ///
    /// The amount must be strictly positive and the category must exist;
    /// nothing is inserted otherwise.
    pub async fn create_expense(
        &self,
        user_id: &str,
        category_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
        description: Option<&str>,
    ) -> ResultEngine<Uuid> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if categories::Entity::find_by_id(category_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }

        let id = Uuid::new_v4();
        let active = expenses::ActiveModel {
            id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(user_id.to_string()),
            category_id: ActiveValue::Set(category_id),
            amount_minor: ActiveValue::Set(amount.cents()),
            description: ActiveValue::Set(normalize_optional_text(description)),
            date: ActiveValue::Set(date),
        };
        active.insert(&self.database).await?;

        Ok(id)
    }

    /// Return one expense with its category name.
    ///
    /// Foreign expenses are reported as missing, never as forbidden.
    pub async fn expense(&self, user_id: &str, expense_id: Uuid) -> ResultEngine<ExpenseRecord> {
        let (model, category) = expenses::Entity::find_by_id(expense_id)
            .find_also_related(categories::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(expense_not_found)?;

        if model.user_id != user_id {
            return Err(expense_not_found());
        }

        let category = category.ok_or_else(|| {
            EngineError::KeyNotFound("category not exists".to_string())
        })?;
        Ok(ExpenseRecord::from_models(model, category))
    }

    /// Delete one expense after checking it belongs to `user_id`.
    pub async fn delete_expense(&self, user_id: &str, expense_id: Uuid) -> ResultEngine<()> {
        let model = expenses::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
            .ok_or_else(expense_not_found)?;

        if model.user_id != user_id {
            return Err(expense_not_found());
        }

        model.delete(&self.database).await?;
        Ok(())
    }

    /// The user's whole expense history with category names, oldest first.
    ///
    /// This feeds the CSV export; no aggregation happens here.
    pub async fn expenses_with_categories(
        &self,
        user_id: &str,
    ) -> ResultEngine<Vec<ExpenseRecord>> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .find_also_related(categories::Entity)
            .order_by_asc(expenses::Column::Date)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (model, category) in rows {
            let Some(category) = category else { continue };
            out.push(ExpenseRecord::from_models(model, category));
        }
        Ok(out)
    }
}
