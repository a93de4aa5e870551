//! Budget API endpoints

use api_types::budget::BudgetNew;
use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Redirect,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};
use engine::MoneyCents;

/// Set a monthly budget for the caller; a duplicate (user, category) pair is
/// a validation failure, not a crash.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<Redirect, ServerError> {
    let monthly_limit: MoneyCents = payload.monthly_limit.parse()?;

    state
        .engine
        .set_budget(&user.username, payload.category_id, monthly_limit)
        .await?;

    Ok(Redirect::to("/dashboard/"))
}

/// Delete a budget after the ownership check; no confirmation step.
pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ServerError> {
    state.engine.delete_budget(&user.username, id).await?;
    Ok(Redirect::to("/dashboard/"))
}
