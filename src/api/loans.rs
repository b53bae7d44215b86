//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, ReplaceLoan, UpdateLoan},
};

/// Close (return) response
#[derive(Serialize, ToSchema)]
pub struct CloseResponse {
    /// Return status
    pub status: String,
    /// Status message
    pub message: String,
}

/// List all loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "List of open loans", body = Vec<Loan>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_loans().await?;
    Ok(Json(loans))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.get_loan(id).await?;
    Ok(Json(loan))
}

/// Create a new loan (borrow a book)
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Book or member not found"),
        (status = 409, description = "Book has no available copies"),
        (status = 503, description = "Record locked by a concurrent operation")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.create_loan(request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Replace a loan (full update)
#[utoipa::path(
    put,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    request_body = ReplaceLoan,
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Loan, book or member not found"),
        (status = 409, description = "New book has no available copies"),
        (status = 503, description = "Record locked by a concurrent operation")
    )
)]
pub async fn replace_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ReplaceLoan>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.replace_loan(id, request).await?;
    Ok(Json(loan))
}

/// Update a loan (partial)
#[utoipa::path(
    patch,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    request_body = UpdateLoan,
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 400, description = "No fields supplied"),
        (status = 404, description = "Loan, book or member not found"),
        (status = 409, description = "New book has no available copies"),
        (status = 503, description = "Record locked by a concurrent operation")
    )
)]
pub async fn patch_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLoan>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.patch_loan(id, request).await?;
    Ok(Json(loan))
}

/// Close a loan (return the book)
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan closed", body = CloseResponse),
        (status = 404, description = "Loan not found"),
        (status = 503, description = "Record locked by a concurrent operation")
    )
)]
pub async fn close_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CloseResponse>> {
    state.services.loans.close_loan(id).await?;
    Ok(Json(CloseResponse {
        status: "returned".to_string(),
        message: "Loan closed and copy returned to stock".to_string(),
    }))
}
