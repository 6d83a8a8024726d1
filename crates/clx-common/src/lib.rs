//! Common types and utilities for the clx parser.
//!
//! This crate provides foundational types used across all clx crates:
//! - String interning (`Atom`, `Interner`)
//! - Diagnostics with stable numeric codes
//! - Line/column positions for reporting

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Diagnostic types, codes and message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
