//! HTTP-level integration tests for the dashboard endpoints.
//!
//! These run against a router whose pool points at an unreachable
//! warehouse: routing, middleware, and the theme endpoint behave exactly
//! as in production, and the overview endpoint exercises its single
//! failure boundary.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Theme endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn theme_serves_static_palette() {
    let app = common::build_unreachable_app();
    let response = get(app, "/api/v1/theme").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["palette"]["app_background"], "#1a2332");
    assert_eq!(data["palette"]["card_background"], "#2d3748");
    assert_eq!(data["fallback_defect_color"], "#64D2FF");
    // The full six-class taxonomy carries a color.
    assert_eq!(data["defect_colors"].as_array().unwrap().len(), 6);
    assert_eq!(data["kpi_placeholders"]["false_positive_rate_pct"], 15.0);
}

// ---------------------------------------------------------------------------
// Overview endpoint: single failure boundary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overview_degrades_to_single_error_banner() {
    let app = common::build_unreachable_app();
    let response = get(app, "/api/v1/overview").await;

    // A warehouse outage is not an HTTP failure: the page still renders,
    // with one banner and zeroed KPIs.
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["data_loaded"], false);
    let banner = data["error"].as_str().expect("error banner must be set");
    assert!(banner.starts_with("Error loading data:"));

    assert_eq!(data["kpis"]["total_defects"], 0);
    assert_eq!(data["kpis"]["total_pcbs"], 0);
    assert_eq!(data["kpis"]["total_observations"], 0);
    assert_eq!(data["kpis"]["yield_rate_pct"], 0.0);
    assert_eq!(data["kpis"]["defect_rate_pct"], 0.0);

    assert_eq!(data["pareto"]["classes"].as_array().unwrap().len(), 0);
    assert_eq!(
        data["factory_line_matrix"]["lines"].as_array().unwrap().len(),
        0
    );
    assert_eq!(
        data["confidence_histogram"]["buckets"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
    assert_eq!(data["recent_detections"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn overview_rejects_negative_recent_limit() {
    let app = common::build_unreachable_app();
    let response = get(app, "/api/v1/overview?recent=-1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Health endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_warehouse() {
    let app = common::build_unreachable_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// General HTTP behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_unreachable_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_unreachable_app();
    let response = get(app, "/api/v1/theme").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}
