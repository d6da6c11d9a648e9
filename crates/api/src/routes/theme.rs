//! Route for the static dashboard theme/config object.

use axum::{routing::get, Json, Router};

use crate::response::DataResponse;
use crate::state::AppState;
use crate::theme::{dashboard_theme, DashboardTheme};

/// GET /theme -- the styling/config object the frontend loads once at
/// initialization. Never touches the warehouse.
async fn get_theme() -> Json<DataResponse<&'static DashboardTheme>> {
    Json(DataResponse {
        data: dashboard_theme(),
    })
}

/// Theme routes.
///
/// ```text
/// GET /theme -> get_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/theme", get(get_theme))
}
