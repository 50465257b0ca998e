#![allow(non_snake_case)]

//! In-memory reference implementation of the roster REST API.

pub mod directory;
pub mod middleware;
pub mod routes;

use axum::Router;

pub use crate::directory::{AuthToken, Directory, SeedAccount};
pub use crate::middleware::auth::AppState;

/// Full API: `/login` and `/public` are open, everything under
/// [`routes::protected_routes`] needs a session token.
pub fn api_router(state: AppState) -> Router {
    let protectedRoutes = routes::protected_routes(state.clone()).route_layer(
        axum::middleware::from_fn_with_state(state.clone(), middleware::auth::require_api_auth),
    );

    Router::new()
        .merge(protectedRoutes)
        .merge(routes::public::routes(state.clone()))
        .merge(middleware::auth::auth_routes(state.clone()))
        .with_state(state)
}
