//! Budget operations.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, budgets, categories};

use super::Engine;

fn budget_not_found() -> EngineError {
    EngineError::KeyNotFound("budget not exists".to_string())
}

impl Engine {
    /// Create a monthly budget for `user_id` on a category.
    ///
    /// At most one budget per (user, category): a second one is rejected with
    /// [`EngineError::ExistingKey`] before touching the store (a unique index
    /// backs the invariant).
    pub async fn set_budget(
        &self,
        user_id: &str,
        category_id: Uuid,
        monthly_limit: MoneyCents,
    ) -> ResultEngine<Uuid> {
        if monthly_limit < MoneyCents::ZERO {
            return Err(EngineError::InvalidAmount(
                "monthly limit must be >= 0".to_string(),
            ));
        }
        let category = categories::Entity::find_by_id(category_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        if budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::CategoryId.eq(category_id))
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(category.name));
        }

        let id = Uuid::new_v4();
        let active = budgets::ActiveModel {
            id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(user_id.to_string()),
            category_id: ActiveValue::Set(category_id),
            monthly_limit_minor: ActiveValue::Set(monthly_limit.cents()),
        };
        active.insert(&self.database).await?;

        Ok(id)
    }

    /// Delete one budget after checking it belongs to `user_id`.
    pub async fn delete_budget(&self, user_id: &str, budget_id: Uuid) -> ResultEngine<()> {
        let model = budgets::Entity::find_by_id(budget_id)
            .one(&self.database)
            .await?
            .ok_or_else(budget_not_found)?;

        if model.user_id != user_id {
            return Err(budget_not_found());
        }

        model.delete(&self.database).await?;
        Ok(())
    }

    /// All budgets of a user joined with their categories, ordered by
    /// category name. This order is also the insight-rule order.
    pub(super) async fn budgets_with_categories(
        &self,
        user_id: &str,
    ) -> ResultEngine<Vec<(budgets::Model, categories::Model)>> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .find_also_related(categories::Entity)
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (budget, category) in rows {
            let Some(category) = category else { continue };
            out.push((budget, category));
        }
        Ok(out)
    }
}
