//! Integration test utilities for the folio server
//!
//! Spawns the real router against PostgreSQL and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
