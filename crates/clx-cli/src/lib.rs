//! Command-line driver for clx.
//!
//! - `args` - clap definitions for the `clx` binary
//! - `driver` - file discovery, profile resolution and parallel parsing
//! - `reporter` - `file:line:col - error CLX####: message` rendering
//! - `tracing_config` - env-driven tracing subscriber

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
