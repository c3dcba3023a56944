use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::{middleware::require_user, openapi, state::ServerState};

pub mod users;
pub mod classrooms;
pub mod assignments;
pub mod comments;

/// Success envelope for handlers that return a single `data` payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, message: None, data })
    }

    pub fn with_message(message: &'static str, data: T) -> Json<Self> {
        Json(Self { success: true, message: Some(message), data })
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth routes, token-protected
/// routes under `/api/v1`, health and the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Registration and login need no token
    let public = Router::new()
        .route("/user/create", post(users::register))
        .route("/user/login", post(users::login));

    let protected = Router::new()
        .route("/user/:user_id", get(users::get_user).post(users::get_user))
        .route("/classroom/create", post(classrooms::create))
        .route("/classrooms", get(classrooms::list))
        .route("/classroom/:class_id", get(classrooms::get))
        .route("/classroom/edit/:class_id", patch(classrooms::edit))
        .route("/classroom/join", post(classrooms::join))
        .route("/classroom/exit/:class_id/:user_id", patch(classrooms::exit))
        .route("/classroom/members/:class_id", get(classrooms::members))
        .route("/classroom/:class_id/comments", get(comments::list).post(comments::add))
        .route("/assignment/create", post(assignments::create))
        .route("/assignment/:id/edit", patch(assignments::edit))
        .route("/assignments/:class_id", get(assignments::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .nest("/api/v1", public.merge(protected))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
