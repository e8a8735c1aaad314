//! # Pages Module
//!
//! One page per dashboard section.

pub mod about;
pub mod conclusions;
pub mod eda;
pub mod hypothesis;
pub mod overview;
pub mod trends;

pub use about::*;
pub use conclusions::*;
pub use eda::*;
pub use hypothesis::*;
pub use overview::*;
pub use trends::*;
