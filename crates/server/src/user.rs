//! The module contains the user entity and the public landing endpoint.

use api_types::landing::Landing;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{QueryFilter, entity::prelude::*};

use crate::server::ServerState;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Landing page: callers presenting valid credentials go straight to the
/// dashboard, everyone else gets the welcome message.
pub async fn landing(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
) -> Response {
    if let Some(header) = auth_header {
        let known = Entity::find()
            .filter(Column::Username.eq(header.username()))
            .filter(Column::Password.eq(header.password()))
            .one(&state.db)
            .await;
        if let Ok(Some(_)) = known {
            return Redirect::to("/dashboard/").into_response();
        }
    }

    Json(Landing {
        message: "Welcome to FinSight. Sign in to track your expenses.".to_string(),
    })
    .into_response()
}
