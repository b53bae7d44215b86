//! Loans repository: the loan lifecycle transactions.
//!
//! Each mutation here is one atomic unit of work: find, validate
//! references, adjust the inventory ledger and persist the loan row all
//! commit together or not at all. A partial outcome (stock decremented
//! without a loan row, or the reverse) must never be observable.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::loan::{CreateLoan, Loan, ReplaceLoan, UpdateLoan},
};

use super::{begin_bounded, integrity, inventory};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
    lock_timeout_ms: u64,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    /// List all loans
    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, member_id, loan_date, min_return_days, max_return_days FROM loans ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, member_id, loan_date, min_return_days, max_return_days FROM loans WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Loan,
            id,
        })
    }

    /// Open a new loan: take one unit of the book's availability and
    /// persist the loan row in the same transaction.
    pub async fn create(&self, loan: &CreateLoan) -> AppResult<Loan> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        if !integrity::member_exists(&mut tx, loan.member_id).await? {
            return Err(AppError::NotFound {
                kind: EntityKind::Member,
                id: loan.member_id,
            });
        }

        // Locks the book row; fails NotFound / OutOfStock before any insert.
        inventory::debit_one(&mut tx, loan.book_id).await?;

        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, member_id, loan_date, min_return_days, max_return_days)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, member_id, loan_date, min_return_days, max_return_days
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.member_id)
        .bind(loan.loan_date)
        .bind(loan.min_return_days)
        .bind(loan.max_return_days)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(loan_id = created.id, book_id = created.book_id, "loan opened");
        Ok(created)
    }

    /// Replace all fields of a loan. When the book reference changes, the
    /// unit moves from the old book to the new one within the same
    /// transaction: a failed debit on the new book aborts the release of
    /// the old one as well.
    pub async fn replace(&self, id: i64, upd: &ReplaceLoan) -> AppResult<Loan> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        let old_book_id: i64 = sqlx::query_scalar("SELECT book_id FROM loans WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound {
                kind: EntityKind::Loan,
                id,
            })?;

        if !integrity::member_exists(&mut tx, upd.member_id).await? {
            return Err(AppError::NotFound {
                kind: EntityKind::Member,
                id: upd.member_id,
            });
        }

        if upd.book_id != old_book_id {
            inventory::credit_one(&mut tx, old_book_id).await?;
            inventory::debit_one(&mut tx, upd.book_id).await?;
        }

        let updated = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET book_id = $2, member_id = $3, loan_date = $4, min_return_days = $5, max_return_days = $6
            WHERE id = $1
            RETURNING id, book_id, member_id, loan_date, min_return_days, max_return_days
            "#,
        )
        .bind(id)
        .bind(upd.book_id)
        .bind(upd.member_id)
        .bind(upd.loan_date)
        .bind(upd.min_return_days)
        .bind(upd.max_return_days)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Apply a partial update. The same book-transfer rule as `replace`
    /// holds when a differing `book_id` is among the supplied fields.
    /// Callers reject empty updates before any transaction starts.
    pub async fn patch(&self, id: i64, upd: &UpdateLoan) -> AppResult<Loan> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        let current = sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, member_id, loan_date, min_return_days, max_return_days FROM loans WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Loan,
            id,
        })?;

        if let Some(member_id) = upd.member_id {
            if member_id != current.member_id && !integrity::member_exists(&mut tx, member_id).await? {
                return Err(AppError::NotFound {
                    kind: EntityKind::Member,
                    id: member_id,
                });
            }
        }

        if let Some(new_book_id) = upd.book_id {
            if new_book_id != current.book_id {
                inventory::credit_one(&mut tx, current.book_id).await?;
                inventory::debit_one(&mut tx, new_book_id).await?;
            }
        }

        let merged = upd.apply(&current);

        let updated = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET book_id = $2, member_id = $3, loan_date = $4, min_return_days = $5, max_return_days = $6
            WHERE id = $1
            RETURNING id, book_id, member_id, loan_date, min_return_days, max_return_days
            "#,
        )
        .bind(id)
        .bind(merged.book_id)
        .bind(merged.member_id)
        .bind(merged.loan_date)
        .bind(merged.min_return_days)
        .bind(merged.max_return_days)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Close (return) a loan: delete the row and release its unit back to
    /// the book. The book reference is read under lock before the delete,
    /// never inferred afterwards.
    pub async fn close(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        let book_id: i64 = sqlx::query_scalar("SELECT book_id FROM loans WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound {
                kind: EntityKind::Loan,
                id,
            })?;

        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        inventory::credit_one(&mut tx, book_id).await?;

        tx.commit().await?;

        tracing::debug!(loan_id = id, book_id, "loan closed");
        Ok(())
    }
}
