//! Members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::member::{CreateMember, Member, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, name, email, address, password_hash FROM members ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "SELECT id, name, email, address, password_hash FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Member,
            id,
        })
    }

    /// Create a member; a duplicate email surfaces as Conflict via the
    /// unique constraint.
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, address, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, address, password_hash
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.address)
        .bind(&member.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Full replacement; all fields are written as supplied
    pub async fn replace(&self, id: i64, member: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET name = $2, email = $3, address = $4, password_hash = $5
            WHERE id = $1
            RETURNING id, name, email, address, password_hash
            "#,
        )
        .bind(id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.address)
        .bind(&member.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Member,
            id,
        })
    }

    /// Partial update; callers reject empty updates
    pub async fn patch(&self, id: i64, upd: &UpdateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                address = COALESCE($4, address),
                password_hash = COALESCE($5, password_hash)
            WHERE id = $1
            RETURNING id, name, email, address, password_hash
            "#,
        )
        .bind(id)
        .bind(&upd.name)
        .bind(&upd.email)
        .bind(&upd.address)
        .bind(&upd.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound {
            kind: EntityKind::Member,
            id,
        })
    }

    /// Delete a member. Refused while any open loan references them.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let has_loans: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE member_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if has_loans {
            return Err(AppError::Conflict(format!(
                "Member with id {} has open loans and cannot be deleted",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::Member,
                id,
            });
        }

        Ok(())
    }
}
