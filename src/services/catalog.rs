//! Catalog service: books, authors and their association

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{Book, CreateBook, ReplaceBook, UpdateBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- Books ---

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        if book.available < 0 {
            return Err(AppError::Validation(
                "available must not be negative".to_string(),
            ));
        }
        self.repository.books.create(&book).await
    }

    pub async fn replace_book(&self, id: i64, book: ReplaceBook) -> AppResult<Book> {
        book.validate()?;
        self.repository.books.replace(id, &book).await
    }

    pub async fn patch_book(&self, id: i64, upd: UpdateBook) -> AppResult<Book> {
        if upd.is_empty() {
            return Err(AppError::EmptyUpdate);
        }
        self.repository.books.patch(id, &upd).await
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Adjust a book's available-copy count by a signed delta
    pub async fn adjust_availability(&self, id: i64, delta: i32) -> AppResult<i32> {
        self.repository.books.adjust_available(id, delta).await
    }

    // --- Authors ---

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        self.repository.authors.create(&author).await
    }

    pub async fn replace_author(&self, id: i64, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        self.repository.authors.replace(id, &author).await
    }

    pub async fn patch_author(&self, id: i64, upd: UpdateAuthor) -> AppResult<Author> {
        if upd.is_empty() {
            return Err(AppError::EmptyUpdate);
        }
        self.repository.authors.patch(id, &upd).await
    }

    pub async fn delete_author(&self, id: i64) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
