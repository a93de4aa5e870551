//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Redirect,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};
use engine::{ExpenseRecord, MoneyCents};

pub(crate) fn map_expense(record: ExpenseRecord) -> ExpenseView {
    ExpenseView {
        id: record.id,
        category: record.category_name,
        amount_minor: record.amount.cents(),
        description: record.description,
        date: record.date,
    }
}

/// Create an expense owned by the caller, then send them back to the
/// dashboard.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Redirect, ServerError> {
    let amount: MoneyCents = payload.amount.parse()?;

    state
        .engine
        .create_expense(
            &user.username,
            payload.category_id,
            amount,
            payload.date,
            payload.description.as_deref(),
        )
        .await?;

    Ok(Redirect::to("/dashboard/"))
}

/// Confirmation view before deletion: the expense itself, 404 unless it
/// belongs to the caller.
pub async fn confirm_delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    let record = state.engine.expense(&user.username, id).await?;
    Ok(Json(map_expense(record)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ServerError> {
    state.engine.delete_expense(&user.username, id).await?;
    Ok(Redirect::to("/dashboard/"))
}
