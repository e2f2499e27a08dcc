//! Command line front-end for particle-size distributions.

pub mod commands;
pub mod config;

pub use config::{LoadedRun, RunConfig};
