use axum::{extract::State, Extension, Json};

use models::comment;
use service::auth::domain::AuthUser;
use service::comment::{AddCommentInput, CommentDetail};

use super::DataResponse;
use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::ServerState};

#[utoipa::path(
    post, path = "/api/v1/classroom/{class_id}/comments", tag = "comments",
    params(("class_id" = String, Path, description = "Five digit class id")),
    request_body = crate::openapi::AddCommentRequest,
    responses((status = 200, description = "Comment added"), (status = 403, description = "Not a member"), (status = 404, description = "Classroom not found"))
)]
pub async fn add(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(class_id): ApiPath<String>,
    ApiJson(input): ApiJson<AddCommentInput>,
) -> Result<Json<DataResponse<comment::Model>>, JsonApiError> {
    let created = state.comments.add(user.id, &class_id, input).await?;
    Ok(DataResponse::with_message("comment added", created))
}

#[utoipa::path(
    get, path = "/api/v1/classroom/{class_id}/comments", tag = "comments",
    params(("class_id" = String, Path, description = "Five digit class id")),
    responses((status = 200, description = "Comments, oldest first"), (status = 404, description = "Classroom not found"))
)]
pub async fn list(State(state): State<ServerState>, ApiPath(class_id): ApiPath<String>) -> Result<Json<DataResponse<Vec<CommentDetail>>>, JsonApiError> {
    let items = state.comments.list(&class_id).await?;
    Ok(DataResponse::ok(items))
}
