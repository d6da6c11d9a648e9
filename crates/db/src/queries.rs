//! Named warehouse queries.
//!
//! The dashboard issues a fixed set of read-only aggregate queries per
//! render pass. Each one gets a named constant here so the repository and
//! the tests agree on a single source of SQL.

/// Total detected defects across all observations.
pub const TOTAL_DEFECTS_SQL: &str = "SELECT COUNT(*) FROM defect_observations";

/// Distinct boards inspected.
pub const PCB_COUNT_SQL: &str = "SELECT COUNT(DISTINCT pcb_id) FROM pcb_inspections";

/// Total inference observations (one per inspected board image).
pub const OBSERVATION_COUNT_SQL: &str = "SELECT COUNT(*) FROM pcb_inspections";

/// Defect counts grouped by detected class, largest first.
pub const DEFECT_SUMMARY_SQL: &str = "\
    SELECT detected_class, COUNT(*) AS defect_count \
    FROM defect_observations \
    GROUP BY detected_class \
    ORDER BY defect_count DESC, detected_class";

/// Defect counts grouped by (factory line, detected class).
pub const FACTORY_LINE_DATA_SQL: &str = "\
    SELECT factory_line_id, detected_class, COUNT(*) AS defect_count \
    FROM defect_observations \
    GROUP BY factory_line_id, detected_class \
    ORDER BY factory_line_id, defect_count DESC, detected_class";

/// Most recent detections, newest first. `$1` bounds the row count.
pub const DEFECT_EXAMPLES_SQL: &str = "\
    SELECT detected_class, confidence_score, factory_line_id, detected_at \
    FROM defect_observations \
    ORDER BY detected_at DESC \
    LIMIT $1";

/// Detection counts per (confidence bucket, detected class).
///
/// Buckets are fixed-width 0.1 intervals labeled by their lower edge. The
/// width is part of this adapter's contract; consumers reshape the rows
/// but never recompute boundaries.
pub const CONFIDENCE_DISTRIBUTION_SQL: &str = "\
    SELECT FLOOR(confidence_score * 10) / 10 AS conf_bucket, \
           detected_class, COUNT(*) AS count \
    FROM defect_observations \
    GROUP BY conf_bucket, detected_class \
    ORDER BY conf_bucket, detected_class";
