//! Command handlers for the filtrapx binary.

pub mod completions;
pub mod config;
pub mod run;
