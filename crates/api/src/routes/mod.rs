pub mod health;
pub mod overview;
pub mod theme;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /overview    full dashboard payload, one render pass (GET)
/// /theme       static styling/config object (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(overview::router())
        .merge(theme::router())
}
