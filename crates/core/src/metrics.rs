//! Derived quality metrics for PCB defect telemetry.
//!
//! The warehouse adapter fetches aggregate row sets; the functions here
//! turn them into the dashboard's numbers: the KPI snapshot, the Pareto
//! ordering with its cumulative-percentage series, the factory-line defect
//! matrix, and the confidence histogram grid. Every function is pure and
//! deterministic; each render pass recomputes from scratch.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// Aggregate counts fetched by the three scalar warehouse queries.
///
/// Count queries only ever produce values >= 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCounts {
    pub total_defects: i64,
    pub total_pcbs: i64,
    pub total_observations: i64,
}

/// One `(detected_class, defect_count)` aggregation row.
#[derive(Debug, Clone, Serialize)]
pub struct DefectSummary {
    pub detected_class: String,
    pub defect_count: i64,
}

/// One `(factory_line_id, detected_class, defect_count)` aggregation row.
#[derive(Debug, Clone, Serialize)]
pub struct FactoryLineDefect {
    pub factory_line_id: String,
    pub detected_class: String,
    pub defect_count: i64,
}

/// One `(conf_bucket, detected_class, count)` aggregation row.
///
/// Bucket edges are fixed upstream (width 0.1, labeled by lower edge).
/// This crate reshapes them; it never recomputes boundaries.
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceBucket {
    pub conf_bucket: f64,
    pub detected_class: String,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// KPI snapshot
// ---------------------------------------------------------------------------

/// Headline quality numbers for one render pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub total_defects: i64,
    pub total_pcbs: i64,
    pub total_observations: i64,
    /// Share of observations free of defects, in [0, 100].
    pub yield_rate_pct: f64,
    /// Share of observations carrying a defect, in [0, 100].
    pub defect_rate_pct: f64,
}

/// Compute yield and defect rates from raw aggregate counts.
///
/// With zero observations both rates are 0. Otherwise the denominator is
/// clamped to at least 1 and the two rates are exact complements, so
/// `yield_rate_pct + defect_rate_pct == 100` always holds.
pub fn compute_kpis(counts: RawCounts) -> KpiSnapshot {
    let (yield_rate_pct, defect_rate_pct) = if counts.total_observations > 0 {
        let defect_rate =
            counts.total_defects as f64 / counts.total_observations.max(1) as f64 * 100.0;
        (100.0 - defect_rate, defect_rate)
    } else {
        (0.0, 0.0)
    };

    KpiSnapshot {
        total_defects: counts.total_defects,
        total_pcbs: counts.total_pcbs,
        total_observations: counts.total_observations,
        yield_rate_pct,
        defect_rate_pct,
    }
}

// ---------------------------------------------------------------------------
// Pareto analysis
// ---------------------------------------------------------------------------

/// Defect classes ranked by frequency with their cumulative share.
///
/// `classes[i]` pairs with `counts[i]` and `cumulative_pct[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParetoSeries {
    pub classes: Vec<String>,
    pub counts: Vec<i64>,
    pub cumulative_pct: Vec<f64>,
}

/// Rank defect summaries by count descending and accumulate their share.
///
/// The sort is stable: classes with equal counts keep their relative input
/// order (the tie-break policy; no secondary key is defined). An empty
/// input yields an empty series, and an all-zero total leaves every
/// cumulative value at 0 rather than dividing by zero.
pub fn compute_pareto_series(rows: &[DefectSummary]) -> ParetoSeries {
    let mut ordered: Vec<&DefectSummary> = rows.iter().collect();
    ordered.sort_by_key(|row| std::cmp::Reverse(row.defect_count));

    let total: i64 = ordered.iter().map(|row| row.defect_count).sum();

    let mut series = ParetoSeries::default();
    let mut running = 0_i64;
    for row in ordered {
        running += row.defect_count;
        let pct = if total > 0 {
            running as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        series.classes.push(row.detected_class.clone());
        series.counts.push(row.defect_count);
        series.cumulative_pct.push(pct);
    }
    series
}

// ---------------------------------------------------------------------------
// Factory-line matrix
// ---------------------------------------------------------------------------

/// Dense `(factory line, defect class)` count matrix for heatmap display.
///
/// `cells[i][j]` is the count for `lines[i]` and `classes[j]`. Pairs the
/// warehouse never reported are 0, not missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactoryLineMatrix {
    pub lines: Vec<String>,
    pub classes: Vec<String>,
    pub cells: Vec<Vec<i64>>,
}

/// Pivot per-line defect aggregates into a dense matrix.
///
/// Axis order is first appearance in the input; the adapter's `ORDER BY`
/// makes it deterministic end to end. Duplicate `(line, class)` rows
/// accumulate into the same cell.
pub fn build_factory_line_matrix(rows: &[FactoryLineDefect]) -> FactoryLineMatrix {
    let mut matrix = FactoryLineMatrix::default();
    for row in rows {
        let line = axis_index(&mut matrix.lines, &row.factory_line_id);
        let class = axis_index(&mut matrix.classes, &row.detected_class);
        resize_grid(&mut matrix.cells, matrix.lines.len(), matrix.classes.len());
        matrix.cells[line][class] += row.defect_count;
    }
    matrix
}

// ---------------------------------------------------------------------------
// Confidence histogram
// ---------------------------------------------------------------------------

/// Dense `(confidence bucket, defect class)` count grid for grouped bars.
///
/// `cells[i][j]` is the count for `buckets[i]` and `classes[j]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfidenceHistogram {
    /// Lower edges of the upstream fixed-width buckets.
    pub buckets: Vec<f64>,
    pub classes: Vec<String>,
    pub cells: Vec<Vec<i64>>,
}

/// Reshape upstream-aggregated confidence rows into a dense grid.
///
/// Pass-through aggregation: bucket edges arrive precomputed and are kept
/// verbatim. Axis order is first appearance in the input; unobserved
/// `(bucket, class)` pairs are 0.
pub fn bucket_confidence(rows: &[ConfidenceBucket]) -> ConfidenceHistogram {
    let mut histogram = ConfidenceHistogram::default();
    for row in rows {
        let bucket = axis_index(&mut histogram.buckets, &row.conf_bucket);
        let class = axis_index(&mut histogram.classes, &row.detected_class);
        resize_grid(
            &mut histogram.cells,
            histogram.buckets.len(),
            histogram.classes.len(),
        );
        histogram.cells[bucket][class] += row.count;
    }
    histogram
}

// ---------------------------------------------------------------------------
// Pivot helpers
// ---------------------------------------------------------------------------

/// Index of `value` on an axis, appending it when unseen.
///
/// Linear scan: axes here are a six-class taxonomy, a handful of factory
/// lines, or ten confidence buckets.
fn axis_index<T: PartialEq + Clone>(axis: &mut Vec<T>, value: &T) -> usize {
    match axis.iter().position(|v| v == value) {
        Some(index) => index,
        None => {
            axis.push(value.clone());
            axis.len() - 1
        }
    }
}

/// Widen existing rows and append zeroed rows so `cells` stays a dense
/// `rows x cols` grid as the axes grow.
fn resize_grid(cells: &mut Vec<Vec<i64>>, rows: usize, cols: usize) {
    for row in cells.iter_mut() {
        row.resize(cols, 0);
    }
    cells.resize(rows, vec![0; cols]);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(total_defects: i64, total_observations: i64) -> RawCounts {
        RawCounts {
            total_defects,
            total_pcbs: 0,
            total_observations,
        }
    }

    fn summary(class: &str, count: i64) -> DefectSummary {
        DefectSummary {
            detected_class: class.to_string(),
            defect_count: count,
        }
    }

    fn line_defect(line: &str, class: &str, count: i64) -> FactoryLineDefect {
        FactoryLineDefect {
            factory_line_id: line.to_string(),
            detected_class: class.to_string(),
            defect_count: count,
        }
    }

    fn conf_bucket(bucket: f64, class: &str, count: i64) -> ConfidenceBucket {
        ConfidenceBucket {
            conf_bucket: bucket,
            detected_class: class.to_string(),
            count,
        }
    }

    // -- compute_kpis --

    #[test]
    fn kpis_example_values() {
        let snapshot = compute_kpis(counts(120, 1000));
        assert!((snapshot.yield_rate_pct - 88.0).abs() < 1e-9);
        assert!((snapshot.defect_rate_pct - 12.0).abs() < 1e-9);
    }

    #[test]
    fn kpis_zero_observations_guarded() {
        let snapshot = compute_kpis(counts(0, 0));
        assert_eq!(snapshot.yield_rate_pct, 0.0);
        assert_eq!(snapshot.defect_rate_pct, 0.0);
    }

    #[test]
    fn kpis_defects_without_observations_guarded() {
        // Inconsistent warehouse state (defects but no observations) must
        // still not divide by zero.
        let snapshot = compute_kpis(counts(5, 0));
        assert_eq!(snapshot.yield_rate_pct, 0.0);
        assert_eq!(snapshot.defect_rate_pct, 0.0);
    }

    #[test]
    fn kpis_rates_sum_to_100() {
        for (defects, observations) in [(0, 1), (1, 3), (7, 13), (120, 1000), (999, 1000)] {
            let snapshot = compute_kpis(counts(defects, observations));
            assert!(
                (snapshot.yield_rate_pct + snapshot.defect_rate_pct - 100.0).abs() < 1e-9,
                "rates must sum to 100 for {defects}/{observations}"
            );
        }
    }

    #[test]
    fn kpis_all_defective() {
        let snapshot = compute_kpis(counts(50, 50));
        assert!((snapshot.yield_rate_pct - 0.0).abs() < 1e-9);
        assert!((snapshot.defect_rate_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn kpis_pass_through_raw_counts() {
        let snapshot = compute_kpis(RawCounts {
            total_defects: 12,
            total_pcbs: 34,
            total_observations: 56,
        });
        assert_eq!(snapshot.total_defects, 12);
        assert_eq!(snapshot.total_pcbs, 34);
        assert_eq!(snapshot.total_observations, 56);
    }

    // -- compute_pareto_series --

    #[test]
    fn pareto_example_series() {
        let rows = vec![summary("open", 50), summary("short", 30), summary("spur", 20)];
        let series = compute_pareto_series(&rows);

        assert_eq!(series.classes, vec!["open", "short", "spur"]);
        assert_eq!(series.counts, vec![50, 30, 20]);
        assert!((series.cumulative_pct[0] - 50.0).abs() < 1e-9);
        assert!((series.cumulative_pct[1] - 80.0).abs() < 1e-9);
        assert!((series.cumulative_pct[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pareto_sorts_descending_regardless_of_input_order() {
        let rows = vec![summary("spur", 20), summary("open", 50), summary("short", 30)];
        let series = compute_pareto_series(&rows);
        assert_eq!(series.classes, vec!["open", "short", "spur"]);
    }

    #[test]
    fn pareto_empty_input() {
        let series = compute_pareto_series(&[]);
        assert!(series.classes.is_empty());
        assert!(series.counts.is_empty());
        assert!(series.cumulative_pct.is_empty());
    }

    #[test]
    fn pareto_stable_for_equal_counts() {
        let rows = vec![
            summary("mousebite", 10),
            summary("copper", 10),
            summary("pin-hole", 10),
        ];
        let series = compute_pareto_series(&rows);
        assert_eq!(series.classes, vec!["mousebite", "copper", "pin-hole"]);
    }

    #[test]
    fn pareto_cumulative_is_non_decreasing_and_ends_at_100() {
        let rows = vec![
            summary("open", 17),
            summary("short", 3),
            summary("spur", 29),
            summary("copper", 1),
        ];
        let series = compute_pareto_series(&rows);

        for pair in series.cumulative_pct.windows(2) {
            assert!(pair[0] <= pair[1] + 1e-9, "cumulative series must not decrease");
        }
        assert!((series.cumulative_pct.last().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pareto_zero_total_has_zero_cumulative() {
        let rows = vec![summary("open", 0), summary("short", 0)];
        let series = compute_pareto_series(&rows);
        assert_eq!(series.counts, vec![0, 0]);
        assert_eq!(series.cumulative_pct, vec![0.0, 0.0]);
    }

    // -- build_factory_line_matrix --

    #[test]
    fn matrix_fills_missing_cells_with_zero() {
        let rows = vec![
            line_defect("LINE_A", "open", 5),
            line_defect("LINE_B", "short", 3),
        ];
        let matrix = build_factory_line_matrix(&rows);

        assert_eq!(matrix.lines, vec!["LINE_A", "LINE_B"]);
        assert_eq!(matrix.classes, vec!["open", "short"]);
        // Every (line, class) pair has a cell; unobserved pairs are 0.
        assert_eq!(matrix.cells, vec![vec![5, 0], vec![0, 3]]);
    }

    #[test]
    fn matrix_axes_follow_first_appearance() {
        let rows = vec![
            line_defect("LINE_B", "short", 1),
            line_defect("LINE_A", "open", 2),
            line_defect("LINE_B", "open", 3),
        ];
        let matrix = build_factory_line_matrix(&rows);

        assert_eq!(matrix.lines, vec!["LINE_B", "LINE_A"]);
        assert_eq!(matrix.classes, vec!["short", "open"]);
        assert_eq!(matrix.cells, vec![vec![1, 3], vec![0, 2]]);
    }

    #[test]
    fn matrix_accumulates_duplicate_pairs() {
        let rows = vec![
            line_defect("LINE_A", "open", 2),
            line_defect("LINE_A", "open", 3),
        ];
        let matrix = build_factory_line_matrix(&rows);
        assert_eq!(matrix.cells, vec![vec![5]]);
    }

    #[test]
    fn matrix_empty_input() {
        let matrix = build_factory_line_matrix(&[]);
        assert!(matrix.lines.is_empty());
        assert!(matrix.classes.is_empty());
        assert!(matrix.cells.is_empty());
    }

    #[test]
    fn matrix_stays_rectangular_as_axes_grow() {
        let rows = vec![
            line_defect("LINE_A", "open", 1),
            line_defect("LINE_B", "short", 1),
            line_defect("LINE_C", "spur", 1),
        ];
        let matrix = build_factory_line_matrix(&rows);
        for row in &matrix.cells {
            assert_eq!(row.len(), matrix.classes.len());
        }
        assert_eq!(matrix.cells.len(), matrix.lines.len());
    }

    // -- bucket_confidence --

    #[test]
    fn histogram_reshapes_rows_into_dense_grid() {
        let rows = vec![
            conf_bucket(0.8, "open", 4),
            conf_bucket(0.9, "open", 7),
            conf_bucket(0.9, "short", 2),
        ];
        let histogram = bucket_confidence(&rows);

        assert_eq!(histogram.buckets, vec![0.8, 0.9]);
        assert_eq!(histogram.classes, vec!["open", "short"]);
        assert_eq!(histogram.cells, vec![vec![4, 0], vec![7, 2]]);
    }

    #[test]
    fn histogram_keeps_upstream_bucket_edges_verbatim() {
        let rows = vec![conf_bucket(0.55, "open", 1)];
        let histogram = bucket_confidence(&rows);
        // Whatever edge the upstream aggregation produced is preserved.
        assert_eq!(histogram.buckets, vec![0.55]);
    }

    #[test]
    fn histogram_empty_input() {
        let histogram = bucket_confidence(&[]);
        assert!(histogram.buckets.is_empty());
        assert!(histogram.classes.is_empty());
        assert!(histogram.cells.is_empty());
    }
}
