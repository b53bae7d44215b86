//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, ReplaceBook, UpdateBook},
};

/// Availability adjustment request
#[derive(Deserialize, ToSchema)]
pub struct AdjustAvailabilityRequest {
    /// Signed number of copies to add (positive) or remove (negative)
    pub delta: i32,
}

/// Availability adjustment response
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Book ID
    pub id: i64,
    /// Available copies after the adjustment
    pub available: i32,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced author not found")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a book (full update)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = ReplaceBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book or referenced author not found")
    )
)]
pub async fn replace_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(book): Json<ReplaceBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.replace_book(id, book).await?;
    Ok(Json(updated))
}

/// Update a book (partial)
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "No fields supplied"),
        (status = 404, description = "Book or referenced author not found")
    )
)]
pub async fn patch_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(upd): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.patch_book(id, upd).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has open loans")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adjust a book's available-copy count
#[utoipa::path(
    post,
    path = "/books/{id}/availability",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = AdjustAvailabilityRequest,
    responses(
        (status = 200, description = "Availability adjusted", body = AvailabilityResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Adjustment would make availability negative")
    )
)]
pub async fn adjust_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AdjustAvailabilityRequest>,
) -> AppResult<Json<AvailabilityResponse>> {
    let available = state
        .services
        .catalog
        .adjust_availability(id, request.delta)
        .await?;
    Ok(Json(AvailabilityResponse { id, available }))
}
