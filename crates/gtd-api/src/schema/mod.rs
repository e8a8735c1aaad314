//! # GraphQL Schema Module
//!
//! Output and enum types for the read-only GraphQL view.

pub mod enums;
pub mod objects;

pub use enums::*;
pub use objects::*;
