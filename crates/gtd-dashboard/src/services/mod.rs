//! # Services Module
//!
//! Query service client.

pub mod api;

pub use api::*;
