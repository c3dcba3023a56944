use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use service::auth::errors::AuthError;

use super::DataResponse;
use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::ServerState};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub success: bool,
    pub token: String,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

impl SessionResponse {
    fn from_session(session: AuthSession, message: Option<&'static str>) -> Self {
        Self {
            message,
            success: true,
            token: session.token,
            username: session.user.username,
            name: session.user.name,
            profile_picture: session.user.profile_picture,
        }
    }
}

#[utoipa::path(
    post, path = "/api/v1/user/create", tag = "users",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn register(State(state): State<ServerState>, ApiJson(input): ApiJson<RegisterInput>) -> Result<Json<SessionResponse>, JsonApiError> {
    let session = state.auth.register(input).await?;
    Ok(Json(SessionResponse::from_session(session, Some("user created"))))
}

#[utoipa::path(
    post, path = "/api/v1/user/login", tag = "users",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<SessionResponse>, JsonApiError> {
    let session = state.auth.login(input).await?;
    info!(user_id = %session.user.id, "login ok");
    Ok(Json(SessionResponse::from_session(session, None)))
}

#[utoipa::path(
    get, path = "/api/v1/user/{user_id}", tag = "users",
    params(("user_id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(State(state): State<ServerState>, ApiPath(user_id): ApiPath<String>) -> Result<Json<DataResponse<AuthUser>>, JsonApiError> {
    let id = Uuid::parse_str(user_id.trim()).map_err(|_| AuthError::NotFound)?;
    let user = state.auth.get_user(id).await?;
    Ok(DataResponse::ok(user))
}
