//! Referential existence checks.
//!
//! Every mutation that introduces or changes a foreign-key reference runs
//! these probes on its own transaction connection, so the answer holds for
//! the duration of the atomic unit.

use sqlx::PgConnection;

use crate::error::AppResult;

pub async fn book_exists(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

pub async fn member_exists(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

/// Validate an author set as a whole; returns every id with no matching
/// row. Any single missing id fails the caller's entire operation.
pub async fn missing_authors(conn: &mut PgConnection, ids: &[i64]) -> AppResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let missing: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT wanted.id
        FROM UNNEST($1::bigint[]) AS wanted(id)
        LEFT JOIN authors a ON a.id = wanted.id
        WHERE a.id IS NULL
        "#,
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    Ok(missing)
}
