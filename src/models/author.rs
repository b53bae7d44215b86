//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: Option<String>,
}

/// Partial author update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl UpdateAuthor {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.birth_date.is_none() && self.nationality.is_none()
    }
}
