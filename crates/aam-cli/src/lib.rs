//! Library side of the `aam` command: configuration and logging setup.

pub mod config;
pub mod logging;
