//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;

/// Book model from database.
///
/// `available` is the count of copies not currently tied to an open loan;
/// it is mutated only through the inventory ledger or the administrative
/// availability-adjust endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub publication_year: Option<i32>,
    pub available: i32,
    /// Authors loaded from the book_authors junction table
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub publication_year: Option<i32>,
    /// Initial number of available copies
    #[serde(default)]
    pub available: i32,
    /// The complete author set; every id must exist
    pub author_ids: Vec<i64>,
}

/// Full book replacement (PUT); all fields required
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplaceBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_ids: Vec<i64>,
}

/// Partial book update; absent fields are left unchanged.
/// `author_ids`, when supplied, replaces the association set wholesale.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub publication_year: Option<i32>,
    pub author_ids: Option<Vec<i64>>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.publication_year.is_none() && self.author_ids.is_none()
    }
}
