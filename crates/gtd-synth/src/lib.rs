//! # GTD Synth
//!
//! Synthetic dataset generator and endpoint checker for exercising the GTD Insight
//! service without the published archive.
//!
//! ## Features
//!
//! - Seeded, reproducible events shaped like the published CSV
//! - Weighted countries, weapons and attack types with Poisson casualties
//! - Blank cells at a configurable rate
//! - ISO-8859-1 zip packaging readable by `gtd-dataset`
//! - Smoke checks of every query endpoint

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod archive;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod verify;

pub use archive::{archive_bytes, to_csv, write_archive, ENTRY_NAME};
pub use error::{Result, SynthError};
pub use generator::{EventGenerator, SynthConfig, SyntheticEvent};
pub use verify::{check_all, EndpointCheck};
