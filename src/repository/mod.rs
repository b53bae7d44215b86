//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod integrity;
pub mod inventory;
pub mod loans;
pub mod members;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub authors: authors::AuthorsRepository,
    pub members: members::MembersRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool.
    ///
    /// `lock_timeout_ms` bounds row-lock waits inside every mutating
    /// transaction; exceeding it surfaces as a retryable Busy error.
    pub fn new(pool: Pool<Postgres>, lock_timeout_ms: u64) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone(), lock_timeout_ms),
            authors: authors::AuthorsRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone(), lock_timeout_ms),
            pool,
        }
    }
}

/// Begin a transaction with a bounded lock wait.
///
/// All multi-step mutations go through here so that a request contending
/// on a locked row fails fast instead of queueing indefinitely.
pub(crate) async fn begin_bounded(
    pool: &Pool<Postgres>,
    lock_timeout_ms: u64,
) -> AppResult<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;
    // SET LOCAL scopes the timeout to this transaction; it does not take
    // bind parameters, but the value is an integer from our own config.
    sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout_ms))
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
