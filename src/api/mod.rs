//! API handlers for Libris REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;
