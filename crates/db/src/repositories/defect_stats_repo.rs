//! Repository for the defect telemetry read set.
//!
//! Every method executes one named query from [`crate::queries`]. Empty
//! result sets are valid success responses: a dashboard with no data yet
//! renders placeholders, it does not error.

use sqlx::PgPool;

use boardsight_core::metrics::{ConfidenceBucket, DefectSummary, FactoryLineDefect, RawCounts};
use boardsight_core::observation::DefectObservation;

use crate::models::defect::{
    ConfidenceBucketRow, DefectExampleRow, DefectSummaryRow, FactoryLineDefectRow,
};
use crate::queries;

/// Provides the dashboard's aggregate warehouse queries.
pub struct DefectStatsRepo;

impl DefectStatsRepo {
    /// Total detected defects. A zero-row result reads as 0.
    pub async fn total_defects(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(queries::TOTAL_DEFECTS_SQL)
            .fetch_optional(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Distinct boards inspected. A zero-row result reads as 0.
    pub async fn pcb_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(queries::PCB_COUNT_SQL)
            .fetch_optional(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Total inference observations. A zero-row result reads as 0.
    pub async fn observation_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(queries::OBSERVATION_COUNT_SQL)
            .fetch_optional(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Fetch all three scalar counts for one render pass.
    pub async fn raw_counts(pool: &PgPool) -> Result<RawCounts, sqlx::Error> {
        Ok(RawCounts {
            total_defects: Self::total_defects(pool).await?,
            total_pcbs: Self::pcb_count(pool).await?,
            total_observations: Self::observation_count(pool).await?,
        })
    }

    /// Defect counts per class, largest first.
    pub async fn defect_summary(pool: &PgPool) -> Result<Vec<DefectSummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, DefectSummaryRow>(queries::DEFECT_SUMMARY_SQL)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Defect counts per (factory line, class) pair.
    pub async fn factory_line_data(pool: &PgPool) -> Result<Vec<FactoryLineDefect>, sqlx::Error> {
        let rows = sqlx::query_as::<_, FactoryLineDefectRow>(queries::FACTORY_LINE_DATA_SQL)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The `limit` most recent detections, newest first.
    pub async fn recent_detections(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<DefectObservation>, sqlx::Error> {
        let rows = sqlx::query_as::<_, DefectExampleRow>(queries::DEFECT_EXAMPLES_SQL)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Detection counts per (confidence bucket, class) pair.
    pub async fn confidence_distribution(
        pool: &PgPool,
    ) -> Result<Vec<ConfidenceBucket>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ConfidenceBucketRow>(queries::CONFIDENCE_DISTRIBUTION_SQL)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
