//! Expense records.
//!
//! An expense belongs to exactly one user and one category. Rows are
//! immutable after creation: there is no update operation, only delete.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{MoneyCents, categories};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An expense joined with its category name, as the dashboard and the CSV
/// export consume it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub(crate) fn from_models(model: Model, category: categories::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            category_name: category.name,
            amount: MoneyCents::new(model.amount_minor),
            description: model.description,
            date: model.date,
        }
    }
}
