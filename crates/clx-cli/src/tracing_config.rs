//! Tracing configuration.
//!
//! Supports three output formats controlled by `CLX_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! CLX_LOG=debug clx file.js
//! CLX_LOG=clx_classes=trace CLX_LOG_FORMAT=tree clx file.js
//! CLX_LOG=debug CLX_LOG_FORMAT=json clx src/
//! ```
//!
//! The subscriber is only initialised when `CLX_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("CLX_LOG_FORMAT").unwrap_or_default())
    }
}

/// `CLX_LOG` takes precedence over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("CLX_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global subscriber, writing to stderr so stdout stays
/// reserved for AST output.
pub fn init_tracing() {
    let has_clx_log = std::env::var("CLX_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_clx_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
