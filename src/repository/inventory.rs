//! Inventory ledger: atomic adjustments of a book's available-copy count.
//!
//! Invariant: a book's `available` equals its copies not tied to an open
//! loan. Every helper here is a single conditional UPDATE, so the
//! availability check and the write happen under the same row lock and
//! two concurrent requests for the last copy cannot both succeed.
//!
//! All helpers run on the caller's transaction connection; commit and
//! rollback stay with the caller.

use sqlx::PgConnection;

use crate::error::{AppError, AppResult, EntityKind};

/// Take one unit of a book's availability. Fails with OutOfStock when no
/// copies are left, NotFound when the book does not exist.
pub async fn debit_one(conn: &mut PgConnection, book_id: i64) -> AppResult<i32> {
    let available: Option<i32> = sqlx::query_scalar(
        r#"
        UPDATE books
        SET available = available - 1
        WHERE id = $1 AND available > 0
        RETURNING available
        "#,
    )
    .bind(book_id)
    .fetch_optional(&mut *conn)
    .await?;

    match available {
        Some(n) => Ok(n),
        None => {
            if super::integrity::book_exists(conn, book_id).await? {
                Err(AppError::OutOfStock { book_id })
            } else {
                Err(AppError::NotFound {
                    kind: EntityKind::Book,
                    id: book_id,
                })
            }
        }
    }
}

/// Release one unit back to a book's availability.
///
/// No upper bound is applied; the source system never tracked a total
/// copy count, so an increment cannot be clamped against one.
pub async fn credit_one(conn: &mut PgConnection, book_id: i64) -> AppResult<i32> {
    adjust(conn, book_id, 1).await
}

/// Administrative signed adjustment. Refuses to drive the count negative.
pub async fn adjust(conn: &mut PgConnection, book_id: i64, delta: i32) -> AppResult<i32> {
    let available: Option<i32> = sqlx::query_scalar(
        r#"
        UPDATE books
        SET available = available + $2
        WHERE id = $1 AND available + $2 >= 0
        RETURNING available
        "#,
    )
    .bind(book_id)
    .bind(delta)
    .fetch_optional(&mut *conn)
    .await?;

    match available {
        Some(n) => Ok(n),
        None => {
            if super::integrity::book_exists(conn, book_id).await? {
                Err(AppError::OutOfStock { book_id })
            } else {
                Err(AppError::NotFound {
                    kind: EntityKind::Book,
                    id: book_id,
                })
            }
        }
    }
}
