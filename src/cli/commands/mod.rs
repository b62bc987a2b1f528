//! CLI commands

pub mod evaluate;
pub mod metrics;
pub mod train;
