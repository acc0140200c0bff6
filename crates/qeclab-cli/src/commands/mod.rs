//! CLI command implementations.

pub mod active;
pub mod baseline;
pub mod codes;
pub mod common;
pub mod engines;
pub mod sweep;
pub mod version;
