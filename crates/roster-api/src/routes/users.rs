use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use roster_types::{User, UserId};

use crate::middleware::auth::{error_response, AppState};

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn not_found(id: UserId) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("user {id} not found"))
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.directory.read().await.list())
}

async fn get_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Response {
    match state.directory.read().await.get(id) {
        Some(user) => Json(user).into_response(),
        None => not_found(id),
    }
}

async fn create_user(State(state): State<AppState>, Json(user): Json<User>) -> Response {
    let created = state.directory.write().await.create(user);
    tracing::info!("created user {:?}", created.id);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(user): Json<User>,
) -> Response {
    match state.directory.write().await.update(id, user) {
        Some(updated) => Json(updated).into_response(),
        None => not_found(id),
    }
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Response {
    match state.directory.write().await.delete(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(id),
    }
}
