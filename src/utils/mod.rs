//! Shared helpers: external process execution and path normalization.

pub mod exec;
pub mod path;
