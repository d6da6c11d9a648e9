//! Row structs for warehouse query results.
//!
//! Each struct matches one named query's column list and converts into
//! the core domain type the metrics engine consumes.

pub mod defect;
