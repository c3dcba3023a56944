use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use service::auth::errors::AuthError;
use tracing::warn;

use crate::{errors::JsonApiError, state::ServerState};

/// Resolve `Authorization` (bare token or `Bearer <token>`) to a user and
/// store it in the request extensions as `AuthUser`.
pub async fn require_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    match state.auth.authenticate(header).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(AuthError::Unauthorized) => {
            warn!(path = %req.uri().path(), "rejected request without valid token");
            Err(JsonApiError::unauthorized())
        }
        Err(e) => Err(e.into()),
    }
}
