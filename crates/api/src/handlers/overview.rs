//! Handler for the executive overview dashboard.
//!
//! One request is one render pass: the whole warehouse read set is
//! fetched eagerly, every section is derived through `boardsight-core`,
//! and the frontend receives a single self-contained payload.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use boardsight_core::metrics::{
    bucket_confidence, build_factory_line_matrix, compute_kpis, compute_pareto_series,
    ConfidenceBucket, ConfidenceHistogram, DefectSummary, FactoryLineDefect, FactoryLineMatrix,
    KpiSnapshot, ParetoSeries, RawCounts,
};
use boardsight_core::observation::DefectObservation;
use boardsight_core::types::Timestamp;
use boardsight_db::repositories::DefectStatsRepo;
use boardsight_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::theme;

/// Upper bound on recent-detection cards per render pass.
const RECENT_DETECTIONS_MAX: i64 = 12;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query params for `GET /overview`.
#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// How many recent-detection cards to include. Defaults to the
    /// configured limit, capped at [`RECENT_DETECTIONS_MAX`].
    pub recent: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One recent-detection card.
#[derive(Debug, Serialize)]
pub struct RecentDetectionItem {
    pub detected_class: String,
    pub confidence_score: f64,
    pub factory_line_id: String,
    pub detected_at: Timestamp,
    /// Marker color for the card, resolved from the defect palette.
    pub color: &'static str,
}

/// Full dashboard payload for one render pass.
///
/// Empty sections are valid (`data_loaded` stays true); the frontend
/// renders a "no data yet" placeholder per section. `error` is only set
/// when the warehouse itself could not be queried, in which case every
/// section is empty and the KPIs are zeroed.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub data_loaded: bool,
    pub error: Option<String>,
    pub kpis: KpiSnapshot,
    pub pareto: ParetoSeries,
    pub factory_line_matrix: FactoryLineMatrix,
    pub confidence_histogram: ConfidenceHistogram,
    pub recent_detections: Vec<RecentDetectionItem>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/overview
///
/// Executes the dashboard's entire read set eagerly, then derives every
/// section. A failure in any query degrades the whole payload to the
/// zeroed fallback with one error banner; sections never fail one by one,
/// and a warehouse outage is not an HTTP error.
pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params
        .recent
        .unwrap_or(state.config.recent_detections_limit);
    if limit < 0 {
        return Err(AppError::BadRequest(
            "recent must be non-negative".to_string(),
        ));
    }
    let limit = limit.min(RECENT_DETECTIONS_MAX);

    let overview = match load_tables(&state.pool, limit).await {
        Ok(tables) => assemble(tables),
        Err(err) => {
            tracing::error!(error = %err, "Overview data load failed");
            fallback(&err)
        }
    };

    Ok(Json(DataResponse { data: overview }))
}

// ---------------------------------------------------------------------------
// Data loading
// ---------------------------------------------------------------------------

/// Raw row sets from one eager load pass.
struct RawTables {
    counts: RawCounts,
    defect_summary: Vec<DefectSummary>,
    factory_lines: Vec<FactoryLineDefect>,
    confidence: Vec<ConfidenceBucket>,
    recent: Vec<DefectObservation>,
}

/// Run the fixed query sequence. The first failure aborts the whole load
/// so a partially-populated dashboard can never be rendered.
async fn load_tables(pool: &DbPool, recent_limit: i64) -> Result<RawTables, sqlx::Error> {
    Ok(RawTables {
        counts: DefectStatsRepo::raw_counts(pool).await?,
        defect_summary: DefectStatsRepo::defect_summary(pool).await?,
        factory_lines: DefectStatsRepo::factory_line_data(pool).await?,
        confidence: DefectStatsRepo::confidence_distribution(pool).await?,
        recent: DefectStatsRepo::recent_detections(pool, recent_limit).await?,
    })
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Derive every dashboard section from the fetched tables.
fn assemble(tables: RawTables) -> Overview {
    let recent_detections = tables
        .recent
        .into_iter()
        .map(|obs| RecentDetectionItem {
            color: theme::defect_color(&obs.detected_class),
            detected_class: obs.detected_class,
            confidence_score: obs.confidence_score,
            factory_line_id: obs.factory_line_id,
            detected_at: obs.detected_at,
        })
        .collect();

    Overview {
        data_loaded: true,
        error: None,
        kpis: compute_kpis(tables.counts),
        pareto: compute_pareto_series(&tables.defect_summary),
        factory_line_matrix: build_factory_line_matrix(&tables.factory_lines),
        confidence_histogram: bucket_confidence(&tables.confidence),
        recent_detections,
    }
}

/// Zeroed payload served when the warehouse cannot be queried.
fn fallback(err: &sqlx::Error) -> Overview {
    Overview {
        data_loaded: false,
        error: Some(format!("Error loading data: {err}")),
        kpis: compute_kpis(RawCounts::default()),
        pareto: ParetoSeries::default(),
        factory_line_matrix: FactoryLineMatrix::default(),
        confidence_histogram: ConfidenceHistogram::default(),
        recent_detections: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
