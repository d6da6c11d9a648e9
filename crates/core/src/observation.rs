//! Defect observation domain type.

use serde::Serialize;

use crate::types::Timestamp;

/// A single defect instance detected by the upstream inference pipeline.
///
/// Observations are immutable: the dashboard reads them, it never creates
/// or mutates them. `detected_class` is one of a small closed taxonomy
/// (open, short, mousebite, spur, copper, pin-hole) but is carried as a
/// plain string so an extended taxonomy upstream never breaks a read.
#[derive(Debug, Clone, Serialize)]
pub struct DefectObservation {
    pub detected_class: String,
    /// Model confidence in [0, 1].
    pub confidence_score: f64,
    pub factory_line_id: String,
    pub detected_at: Timestamp,
}
