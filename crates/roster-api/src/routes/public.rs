use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth::AppState;

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/public", get(get_public))
}

async fn get_public() -> Json<Value> {
    Json(json!({ "service": "roster", "status": "ok" }))
}
