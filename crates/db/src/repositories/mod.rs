//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod defect_stats_repo;

pub use defect_stats_repo::DefectStatsRepo;
