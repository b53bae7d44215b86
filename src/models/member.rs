//! Member model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member model from database.
///
/// The credential hash is opaque to this service (hashing happens
/// elsewhere) and is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(skip_serializing, default)]
    #[schema(write_only)]
    pub password_hash: Option<String>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
    pub password_hash: Option<String>,
}

/// Partial member update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
}

impl UpdateMember {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.password_hash.is_none()
    }
}
