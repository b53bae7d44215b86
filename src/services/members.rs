//! Member management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    pub async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;
        self.repository.members.create(&member).await
    }

    pub async fn replace_member(&self, id: i64, member: CreateMember) -> AppResult<Member> {
        member.validate()?;
        self.repository.members.replace(id, &member).await
    }

    pub async fn patch_member(&self, id: i64, upd: UpdateMember) -> AppResult<Member> {
        if upd.is_empty() {
            return Err(AppError::EmptyUpdate);
        }
        upd.validate()?;
        self.repository.members.patch(id, &upd).await
    }

    pub async fn delete_member(&self, id: i64) -> AppResult<()> {
        self.repository.members.delete(id).await
    }
}
