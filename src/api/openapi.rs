//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, loans, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::replace_book,
        books::patch_book,
        books::delete_book,
        books::adjust_availability,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::replace_author,
        authors::patch_author,
        authors::delete_author,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::replace_member,
        members::patch_member,
        members::delete_member,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::replace_loan,
        loans::patch_loan,
        loans::close_loan,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::ReplaceBook,
            crate::models::book::UpdateBook,
            books::AdjustAvailabilityRequest,
            books::AvailabilityResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::CreateLoan,
            crate::models::loan::ReplaceLoan,
            crate::models::loan::UpdateLoan,
            loans::CloseResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "authors", description = "Author management"),
        (name = "members", description = "Member management"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
