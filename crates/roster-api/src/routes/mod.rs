pub mod public;
pub mod users;

use axum::Router;

use crate::middleware::auth::AppState;

/// Routes that sit behind `require_api_auth`.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new().merge(users::routes(state))
}
