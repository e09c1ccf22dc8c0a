//! CLI command implementations.

pub mod create;
pub mod extract;
pub mod list;
