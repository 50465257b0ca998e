use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use roster_types::{Credentials, ErrorResponse};
use tokio::sync::RwLock;

use crate::directory::{Directory, SeedAccount};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<RwLock<Directory>>,
}

impl AppState {
    pub fn new(seed: impl IntoIterator<Item = SeedAccount>) -> Self {
        Self {
            directory: Arc::new(RwLock::new(Directory::new(seed))),
        }
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn auth_routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/login", post(handle_login))
}

async fn handle_login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Response {
    let record = state.directory.write().await.login(&body);
    match record {
        Some(record) => {
            tracing::info!("issued session for {}", body.email);
            Json(record).into_response()
        }
        None => {
            tracing::warn!("rejected login for {}", body.email);
            error_response(StatusCode::UNAUTHORIZED, "invalid credentials")
        }
    }
}

/// Middleware for API routes: checks Authorization: Bearer <token> header.
pub async fn require_api_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let bearerToken = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let isAuthorized = match bearerToken {
        Some(token) => state.directory.read().await.is_session(&token),
        None => false,
    };

    if !isAuthorized {
        return error_response(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    next.run(request).await
}
