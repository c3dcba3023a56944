use axum::{extract::State, Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use models::{classroom, classroom_collaborator};
use service::auth::domain::AuthUser;
use service::classroom::domain::{
    ClassroomDetail, ClassroomListing, ClassroomMembers, ClassroomPatch, CreateClassroomInput, JoinClassroomInput,
};
use service::errors::ServiceError;

use super::DataResponse;
use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::ServerState};

#[derive(Debug, Serialize)]
pub struct ClassroomCreated {
    pub message: &'static str,
    pub success: bool,
    pub classroom: classroom::Model,
}

#[derive(Debug, Serialize)]
pub struct ClassroomsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub listing: ClassroomListing,
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub message: &'static str,
    pub success: bool,
    #[serde(flatten)]
    pub members: ClassroomMembers,
}

#[utoipa::path(
    post, path = "/api/v1/classroom/create", tag = "classrooms",
    request_body = crate::openapi::CreateClassroomRequest,
    responses((status = 200, description = "Classroom created"), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<CreateClassroomInput>,
) -> Result<Json<ClassroomCreated>, JsonApiError> {
    let classroom = state.classrooms.create(user.id, input).await?;
    Ok(Json(ClassroomCreated { message: "classroom created", success: true, classroom }))
}

#[utoipa::path(
    get, path = "/api/v1/classrooms", tag = "classrooms",
    responses((status = 200, description = "Owned and joined classrooms"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(State(state): State<ServerState>, Extension(user): Extension<AuthUser>) -> Result<Json<ClassroomsResponse>, JsonApiError> {
    let listing = state.classrooms.list_for_user(user.id).await?;
    Ok(Json(ClassroomsResponse { success: true, listing }))
}

#[utoipa::path(
    get, path = "/api/v1/classroom/{class_id}", tag = "classrooms",
    params(("class_id" = String, Path, description = "Five digit class id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Classroom not found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(class_id): ApiPath<String>) -> Result<Json<DataResponse<ClassroomDetail>>, JsonApiError> {
    let detail = state.classrooms.get(&class_id).await?;
    Ok(DataResponse::ok(detail))
}

#[utoipa::path(
    patch, path = "/api/v1/classroom/edit/{class_id}", tag = "classrooms",
    params(("class_id" = String, Path, description = "Five digit class id")),
    request_body = crate::openapi::ClassroomPatchRequest,
    responses((status = 200, description = "Updated"), (status = 403, description = "Not the owner"), (status = 404, description = "Classroom not found"))
)]
pub async fn edit(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(class_id): ApiPath<String>,
    ApiJson(patch): ApiJson<ClassroomPatch>,
) -> Result<Json<DataResponse<classroom::Model>>, JsonApiError> {
    let updated = state.classrooms.edit(user.id, &class_id, patch).await?;
    Ok(DataResponse::with_message("classroom updated", updated))
}

#[utoipa::path(
    post, path = "/api/v1/classroom/join", tag = "classrooms",
    request_body = crate::openapi::JoinClassroomRequest,
    responses((status = 200, description = "Enrolled"), (status = 400, description = "Invalid role"), (status = 404, description = "Classroom not found"), (status = 409, description = "Already a member"))
)]
pub async fn join(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<JoinClassroomInput>,
) -> Result<Json<DataResponse<classroom_collaborator::Model>>, JsonApiError> {
    let membership = state.classrooms.join(user.id, input).await?;
    Ok(DataResponse::with_message("Successfully Enrolled", membership))
}

#[utoipa::path(
    patch, path = "/api/v1/classroom/exit/{class_id}/{user_id}", tag = "classrooms",
    params(
        ("class_id" = String, Path, description = "Five digit class id"),
        ("user_id" = String, Path, description = "Member UUID")
    ),
    responses((status = 200, description = "Exited"), (status = 403, description = "Not the member or owner"), (status = 404, description = "Member not found"))
)]
pub async fn exit(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiPath((class_id, member_id)): ApiPath<(String, String)>,
) -> Result<Json<DataResponse<classroom_collaborator::Model>>, JsonApiError> {
    let member_id = Uuid::parse_str(member_id.trim()).map_err(|_| ServiceError::not_found("member"))?;
    let membership = state.classrooms.exit(user.id, &class_id, member_id).await?;
    Ok(DataResponse::with_message("Successfully Exited", membership))
}

#[utoipa::path(
    get, path = "/api/v1/classroom/members/{class_id}", tag = "classrooms",
    params(("class_id" = String, Path, description = "Five digit class id")),
    responses((status = 200, description = "Students and teachers"), (status = 404, description = "Classroom not found"))
)]
pub async fn members(State(state): State<ServerState>, ApiPath(class_id): ApiPath<String>) -> Result<Json<MembersResponse>, JsonApiError> {
    let members = state.classrooms.members(&class_id).await?;
    Ok(Json(MembersResponse { message: "students fetched", success: true, members }))
}
