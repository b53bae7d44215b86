//! Loan lifecycle service.
//!
//! Thin orchestration over the transactional loans repository: request
//! shape is validated here, the repository owns the atomic unit of work.

use crate::{
    error::{AppError, AppResult},
    models::loan::{CreateLoan, Loan, ReplaceLoan, UpdateLoan},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list().await
    }

    pub async fn get_loan(&self, id: i64) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await
    }

    /// Open a loan (borrow a book)
    pub async fn create_loan(&self, loan: CreateLoan) -> AppResult<Loan> {
        check_return_bounds(loan.min_return_days, loan.max_return_days)?;
        self.repository.loans.create(&loan).await
    }

    /// Replace a loan in full, moving its inventory unit if the book changes
    pub async fn replace_loan(&self, id: i64, loan: ReplaceLoan) -> AppResult<Loan> {
        check_return_bounds(Some(loan.min_return_days), Some(loan.max_return_days))?;
        self.repository.loans.replace(id, &loan).await
    }

    /// Apply a partial update; an empty body is rejected before any
    /// transaction starts.
    pub async fn patch_loan(&self, id: i64, upd: UpdateLoan) -> AppResult<Loan> {
        if upd.is_empty() {
            return Err(AppError::EmptyUpdate);
        }
        check_return_bounds(upd.min_return_days, upd.max_return_days)?;
        self.repository.loans.patch(id, &upd).await
    }

    /// Close (return) a loan
    pub async fn close_loan(&self, id: i64) -> AppResult<()> {
        self.repository.loans.close(id).await
    }
}

fn check_return_bounds(min: Option<i32>, max: Option<i32>) -> AppResult<()> {
    if let Some(min) = min {
        if min < 0 {
            return Err(AppError::Validation(
                "min_return_days must not be negative".to_string(),
            ));
        }
    }
    if let Some(max) = max {
        if max < 0 {
            return Err(AppError::Validation(
                "max_return_days must not be negative".to_string(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::Validation(
                "min_return_days must not exceed max_return_days".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_bounds_accept_ordered_values() {
        assert!(check_return_bounds(Some(7), Some(21)).is_ok());
        assert!(check_return_bounds(None, Some(21)).is_ok());
        assert!(check_return_bounds(None, None).is_ok());
    }

    #[test]
    fn return_bounds_reject_inverted_or_negative() {
        assert!(matches!(
            check_return_bounds(Some(30), Some(7)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            check_return_bounds(Some(-1), None),
            Err(AppError::Validation(_))
        ));
    }
}
