//! Boardsight API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! theme, router assembly) so integration tests and the binary entrypoint
//! drive the exact same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod theme;
