//! Books repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::{
        author::Author,
        book::{Book, CreateBook, ReplaceBook, UpdateBook},
    },
};

use super::{begin_bounded, integrity, inventory};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
    lock_timeout_ms: u64,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    /// List all books with their author sets
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut books = sqlx::query_as::<_, Book>(
            "SELECT id, title, publication_year, available FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        for book in &mut books {
            book.authors = self.get_book_authors(book.id).await?;
        }

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, publication_year, available FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Book,
            id,
        })?;

        book.authors = self.get_book_authors(id).await?;
        Ok(book)
    }

    /// Load all authors for a book via the book_authors junction table
    async fn get_book_authors(&self, book_id: i64) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.birth_date, a.nationality
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Create a book and its author associations in one transaction.
    /// The whole author set must exist; any missing id aborts the insert.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        check_author_set(&mut tx, &book.author_ids).await?;

        let mut created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, publication_year, available)
            VALUES ($1, $2, $3)
            RETURNING id, title, publication_year, available
            "#,
        )
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(book.available)
        .fetch_one(&mut *tx)
        .await?;

        set_book_authors(&mut tx, created.id, &book.author_ids).await?;

        tx.commit().await?;

        created.authors = self.get_book_authors(created.id).await?;
        Ok(created)
    }

    /// Full replacement of title, publication year and author set. The
    /// association rows are replaced wholesale. The availability counter
    /// is not touched here; it belongs to the inventory ledger.
    pub async fn replace(&self, id: i64, upd: &ReplaceBook) -> AppResult<Book> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        check_author_set(&mut tx, &upd.author_ids).await?;

        let result = sqlx::query("UPDATE books SET title = $2, publication_year = $3 WHERE id = $1")
            .bind(id)
            .bind(&upd.title)
            .bind(upd.publication_year)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::Book,
                id,
            });
        }

        set_book_authors(&mut tx, id, &upd.author_ids).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Partial update; a supplied author set replaces the associations
    /// wholesale. Callers reject empty updates.
    pub async fn patch(&self, id: i64, upd: &UpdateBook) -> AppResult<Book> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;

        let exists = integrity::book_exists(&mut tx, id).await?;
        if !exists {
            return Err(AppError::NotFound {
                kind: EntityKind::Book,
                id,
            });
        }

        if let Some(ref author_ids) = upd.author_ids {
            check_author_set(&mut tx, author_ids).await?;
            set_book_authors(&mut tx, id, author_ids).await?;
        }

        sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                publication_year = COALESCE($3, publication_year)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&upd.title)
        .bind(upd.publication_year)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book. Refused while any open loan references it; the
    /// association rows go with the book.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let has_loans: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if has_loans {
            return Err(AppError::Conflict(format!(
                "Book with id {} has open loans and cannot be deleted",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::Book,
                id,
            });
        }

        Ok(())
    }

    /// Administrative availability adjustment through the inventory ledger
    pub async fn adjust_available(&self, id: i64, delta: i32) -> AppResult<i32> {
        let mut tx = begin_bounded(&self.pool, self.lock_timeout_ms).await?;
        let available = inventory::adjust(&mut tx, id, delta).await?;
        tx.commit().await?;
        Ok(available)
    }

    /// Count of books referencing an author
    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_authors WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

/// Validate an author set before it is attached to a book
async fn check_author_set(conn: &mut PgConnection, author_ids: &[i64]) -> AppResult<()> {
    let missing = integrity::missing_authors(conn, author_ids).await?;
    if let Some(&id) = missing.first() {
        return Err(AppError::NotFound {
            kind: EntityKind::Author,
            id,
        });
    }
    Ok(())
}

/// Replace a book's association rows wholesale
async fn set_book_authors(conn: &mut PgConnection, book_id: i64, author_ids: &[i64]) -> AppResult<()> {
    sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
        .bind(book_id)
        .execute(&mut *conn)
        .await?;

    if !author_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO book_authors (book_id, author_id)
            SELECT $1, author_id FROM UNNEST($2::bigint[]) AS t(author_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(author_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
