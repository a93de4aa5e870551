//! Category listing backing the add-expense and set-budget forms.

use api_types::category::{CategoryList, CategoryView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

/// Form scaffold: the categories a client can pick from.
pub async fn form(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryList>, ServerError> {
    let categories = state.engine.categories().await?;

    Ok(Json(CategoryList {
        categories: categories
            .into_iter()
            .map(|category| CategoryView {
                id: category.id,
                name: category.name,
            })
            .collect(),
    }))
}
