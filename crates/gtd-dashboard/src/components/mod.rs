//! # UI Components Module
//!
//! Reusable Leptos components for the dashboard.

pub mod charts;
pub mod footer;
pub mod header;
pub mod map;
pub mod status;
pub mod table;

pub use charts::*;
pub use footer::*;
pub use header::*;
pub use map::*;
pub use status::*;
pub use table::*;
