//! Command-line front end for the lab website renderer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
