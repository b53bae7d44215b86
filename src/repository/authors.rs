//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, nationality FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, nationality FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Author,
            id,
        })
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, birth_date, nationality)
            VALUES ($1, $2, $3)
            RETURNING id, name, birth_date, nationality
            "#,
        )
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(&author.nationality)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Full replacement; all fields are written as supplied
    pub async fn replace(&self, id: i64, author: &CreateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = $2, birth_date = $3, nationality = $4
            WHERE id = $1
            RETURNING id, name, birth_date, nationality
            "#,
        )
        .bind(id)
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(&author.nationality)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Author,
            id,
        })
    }

    /// Partial update; callers reject empty updates
    pub async fn patch(&self, id: i64, upd: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name),
                birth_date = COALESCE($3, birth_date),
                nationality = COALESCE($4, nationality)
            WHERE id = $1
            RETURNING id, name, birth_date, nationality
            "#,
        )
        .bind(id)
        .bind(&upd.name)
        .bind(upd.birth_date)
        .bind(&upd.nationality)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Author,
            id,
        })
    }

    /// Delete an author. Refused while any book still references it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let in_use: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book_authors WHERE author_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if in_use {
            return Err(AppError::Conflict(format!(
                "Author with id {} is referenced by a book and cannot be deleted",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::Author,
                id,
            });
        }

        Ok(())
    }
}
