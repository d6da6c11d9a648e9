//! Route definitions for the executive overview dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::overview;
use crate::state::AppState;

/// Overview routes.
///
/// ```text
/// GET /overview -> overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(overview::overview))
}
