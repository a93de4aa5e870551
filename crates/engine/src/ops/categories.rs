//! Category registry.
//!
//! Categories are shared reference data: duplicate detection runs on a
//! normalized key so "Groceries", "  groceries " and "Grocéries" collapse to
//! one entry.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use uuid::Uuid;

use crate::{Category, EngineError, ResultEngine, categories};

use super::Engine;

impl Engine {
    /// Register a new shared category.
    pub async fn new_category(&self, name: &str) -> ResultEngine<Uuid> {
        let display = normalize_display(name).ok_or_else(|| {
            EngineError::InvalidName("category name must not be empty".to_string())
        })?;
        let key = normalize_key(&display).ok_or_else(|| {
            EngineError::InvalidName(format!("category name '{display}' has no usable characters"))
        })?;

        if categories::Entity::find()
            .filter(categories::Column::NameNorm.eq(key.clone()))
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(display));
        }

        let id = Uuid::new_v4();
        let active = categories::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(display),
            name_norm: ActiveValue::Set(key),
        };
        active.insert(&self.database).await?;

        Ok(id)
    }

    /// List all categories, name-ordered, for the expense and budget forms.
    pub async fn categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }
}

/// Collapse inner whitespace runs and trim; `None` when nothing is left.
fn normalize_display(input: &str) -> Option<String> {
    let mut out = String::new();
    for token in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// NFKD-fold to a lowercase alphanumeric key: accents stripped, punctuation
/// collapsed to single spaces.
fn normalize_key(input: &str) -> Option<String> {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}
