//! Rows returned by the defect telemetry queries.

use boardsight_core::metrics::{ConfidenceBucket, DefectSummary, FactoryLineDefect};
use boardsight_core::observation::DefectObservation;
use boardsight_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A `(detected_class, defect_count)` aggregation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DefectSummaryRow {
    pub detected_class: String,
    pub defect_count: i64,
}

impl From<DefectSummaryRow> for DefectSummary {
    fn from(row: DefectSummaryRow) -> Self {
        DefectSummary {
            detected_class: row.detected_class,
            defect_count: row.defect_count,
        }
    }
}

/// A `(factory_line_id, detected_class, defect_count)` aggregation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FactoryLineDefectRow {
    pub factory_line_id: String,
    pub detected_class: String,
    pub defect_count: i64,
}

impl From<FactoryLineDefectRow> for FactoryLineDefect {
    fn from(row: FactoryLineDefectRow) -> Self {
        FactoryLineDefect {
            factory_line_id: row.factory_line_id,
            detected_class: row.detected_class,
            defect_count: row.defect_count,
        }
    }
}

/// A `(conf_bucket, detected_class, count)` aggregation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConfidenceBucketRow {
    pub conf_bucket: f64,
    pub detected_class: String,
    pub count: i64,
}

impl From<ConfidenceBucketRow> for ConfidenceBucket {
    fn from(row: ConfidenceBucketRow) -> Self {
        ConfidenceBucket {
            conf_bucket: row.conf_bucket,
            detected_class: row.detected_class,
            count: row.count,
        }
    }
}

/// One recent-detection row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DefectExampleRow {
    pub detected_class: String,
    pub confidence_score: f64,
    pub factory_line_id: String,
    pub detected_at: Timestamp,
}

impl From<DefectExampleRow> for DefectObservation {
    fn from(row: DefectExampleRow) -> Self {
        DefectObservation {
            detected_class: row.detected_class,
            confidence_score: row.confidence_score,
            factory_line_id: row.factory_line_id,
            detected_at: row.detected_at,
        }
    }
}
