//! CLI library components for the expert roster consolidator.

pub mod config;
pub mod logging;
pub mod pipeline;
