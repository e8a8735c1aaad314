//! # GTD Analytics
//!
//! Aggregations and the weapon usage hypothesis test over the prepared event table.
//! Events are loaded once into an in-memory DuckDB database; every routine is a
//! read-only query over it.
//!
//! ## Features
//!
//! - Value counts per year, attack type, country and weapon type
//! - Casualty sums per region and per year
//! - Attack types over time and the geographic extract
//! - Column summaries and missing-value counts
//! - Two-sample t-test of casualties by weapon popularity
//! - Markdown and JSON reports

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod hypothesis;
pub mod overview;
pub mod queries;
pub mod reports;

pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, Result};
pub use hypothesis::{partition_by_usage, two_sample_t_test, weapon_usage_test, TTest, UsagePartition};
pub use queries::Category;
pub use reports::AnalyticsReport;
