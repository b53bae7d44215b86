//! Member endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, UpdateMember},
};

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "List of members", body = Vec<Member>)
    )
)]
pub async fn list_members(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list_members().await?;
    Ok(Json(members))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let member = state.services.members.get_member(id).await?;
    Ok(Json(member))
}

/// Create a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.members.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a member (full update)
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = CreateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn replace_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(member): Json<CreateMember>,
) -> AppResult<Json<Member>> {
    let updated = state.services.members.replace_member(id, member).await?;
    Ok(Json(updated))
}

/// Update a member (partial)
#[utoipa::path(
    patch,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "No fields supplied"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn patch_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(upd): Json<UpdateMember>,
) -> AppResult<Json<Member>> {
    let updated = state.services.members.patch_member(id, upd).await?;
    Ok(Json(updated))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Member has open loans")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.members.delete_member(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
