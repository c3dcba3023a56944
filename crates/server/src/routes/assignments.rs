use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use models::assignment;
use service::assignment::domain::{AssignmentDetail, AssignmentPatch, CreateAssignmentInput};
use service::auth::domain::AuthUser;
use service::errors::ServiceError;

use super::DataResponse;
use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::ServerState};

#[utoipa::path(
    post, path = "/api/v1/assignment/create", tag = "assignments",
    request_body = crate::openapi::CreateAssignmentRequest,
    responses((status = 200, description = "Assignment created"), (status = 400, description = "Validation Error"), (status = 403, description = "Not a teacher of the classroom"), (status = 404, description = "Classroom not found"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<CreateAssignmentInput>,
) -> Result<Json<DataResponse<assignment::Model>>, JsonApiError> {
    let created = state.assignments.create(user.id, input).await?;
    Ok(DataResponse::with_message("assignment created", created))
}

#[utoipa::path(
    patch, path = "/api/v1/assignment/{id}/edit", tag = "assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    request_body = crate::openapi::AssignmentPatchRequest,
    responses((status = 200, description = "Assignment edited"), (status = 403, description = "Not the author"), (status = 404, description = "Assignment not found"))
)]
pub async fn edit(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<AssignmentPatch>,
) -> Result<Json<DataResponse<assignment::Model>>, JsonApiError> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| ServiceError::not_found("assignment"))?;
    let edited = state.assignments.edit(user.id, id, patch).await?;
    Ok(DataResponse::with_message("assignment edited", edited))
}

#[utoipa::path(
    get, path = "/api/v1/assignments/{class_id}", tag = "assignments",
    params(("class_id" = String, Path, description = "Five digit class id")),
    responses((status = 200, description = "Assignments, newest first"))
)]
pub async fn list(State(state): State<ServerState>, ApiPath(class_id): ApiPath<String>) -> Result<Json<DataResponse<Vec<AssignmentDetail>>>, JsonApiError> {
    let items = state.assignments.list(&class_id).await?;
    Ok(DataResponse::with_message("assignments fetched", items))
}
