//! CSV export of the caller's full expense history.

use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use csv::Writer;
use serde::Serialize;

use crate::{ServerError, server::ServerState, user};

/// One CSV row; serde renames produce the fixed header
/// `Date,Category,Amount,Description`.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRow {
    date: String,
    category: String,
    amount: String,
    description: String,
}

/// Stream all of the caller's expenses as a CSV attachment. One row per
/// expense, no aggregation.
pub async fn export_csv(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let expenses = state.engine.expenses_with_categories(&user.username).await?;

    let mut writer = Writer::from_writer(vec![]);
    for expense in expenses {
        writer
            .serialize(ExportRow {
                date: expense.date.to_string(),
                category: expense.category_name,
                amount: expense.amount.to_string(),
                description: expense.description.unwrap_or_default(),
            })
            .map_err(|err| {
                ServerError::Generic(format!("failed to serialize export row: {err}"))
            })?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| ServerError::Generic(format!("failed to finalize export: {err}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        data,
    )
        .into_response())
}
