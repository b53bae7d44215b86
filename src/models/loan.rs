//! Loan model and related types.
//!
//! A loan row pairs one book with one member and represents a copy
//! currently checked out. While the row exists it holds exactly one unit
//! of the book's availability; deleting the row is the return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: Option<DateTime<Utc>>,
    /// Minimum return time bound; unit semantics are deployment-defined (e.g. days)
    pub min_return_days: Option<i32>,
    pub max_return_days: Option<i32>,
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: Option<DateTime<Utc>>,
    pub min_return_days: Option<i32>,
    pub max_return_days: Option<i32>,
}

/// Full loan replacement (PUT); all fields required
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReplaceLoan {
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: DateTime<Utc>,
    pub min_return_days: i32,
    pub max_return_days: i32,
}

/// Partial loan update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateLoan {
    pub book_id: Option<i64>,
    pub member_id: Option<i64>,
    pub loan_date: Option<DateTime<Utc>>,
    pub min_return_days: Option<i32>,
    pub max_return_days: Option<i32>,
}

impl UpdateLoan {
    pub fn is_empty(&self) -> bool {
        self.book_id.is_none()
            && self.member_id.is_none()
            && self.loan_date.is_none()
            && self.min_return_days.is_none()
            && self.max_return_days.is_none()
    }

    /// Merge the supplied fields over the current row values
    pub fn apply(&self, current: &Loan) -> Loan {
        Loan {
            id: current.id,
            book_id: self.book_id.unwrap_or(current.book_id),
            member_id: self.member_id.unwrap_or(current.member_id),
            loan_date: self.loan_date.or(current.loan_date),
            min_return_days: self.min_return_days.or(current.min_return_days),
            max_return_days: self.max_return_days.or(current.max_return_days),
        }
    }
}
