//! clx: a JavaScript parser with configurable class-syntax extensions.
//!
//! The workspace is split into layers:
//! - `clx-common` - diagnostics, interner, line map
//! - `clx-scanner` - tokens and the pluggable `TokenReader` hook
//! - `clx-parser` - node arena, base grammar, AST JSON
//! - `clx-classes` - syntax profiles and the class-syntax extension
//!
//! This crate re-exports them and adds one-call helpers.
//!
//! ```
//! let output = clx::parse_source("a.js", "class A { var x = 1; }", &clx::SyntaxOptions::default())
//!     .unwrap();
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.ast["body"][0]["body"]["body"][0]["type"], "ClassVariableDeclaration");
//! ```

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub use clx_classes as classes;
pub use clx_common as common;
pub use clx_parser as parser;
pub use clx_scanner as scanner;

pub use clx_classes::{ConfigError, ProfileTable, ResolvedProfile, SyntaxOptions, SyntaxProfile};
pub use clx_common::{Diagnostic, DiagnosticCategory, LineMap, Position};
pub use clx_parser::{NodeConvention, ParserOptions, ParserState};

/// Result of a one-call parse.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The `Program` node in JSON form.
    pub ast: Value,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Resolve `options` against the built-in profiles and parse `source` in
/// the default node convention.
pub fn parse_source(
    file_name: &str,
    source: &str,
    options: &SyntaxOptions,
) -> Result<ParseOutput, ConfigError> {
    parse_source_with(file_name, source, options, NodeConvention::Default)
}

pub fn parse_source_with(
    file_name: &str,
    source: &str,
    options: &SyntaxOptions,
    convention: NodeConvention,
) -> Result<ParseOutput, ConfigError> {
    let profile = clx_classes::resolve(&ProfileTable::builtin(), options)?.into_shared();
    Ok(parse_with_profile(file_name, source, profile, convention))
}

/// Parse with an already resolved profile. The profile can be shared across
/// threads; each call gets its own parser.
pub fn parse_with_profile(
    file_name: &str,
    source: &str,
    profile: Arc<ResolvedProfile>,
    convention: NodeConvention,
) -> ParseOutput {
    debug!(file = file_name, profile = %profile.name, "parse_with_profile");
    let mut parser = clx_classes::new_parser(
        file_name.to_string(),
        source.to_string(),
        ParserOptions::default().with_convention(convention),
        profile,
    );
    let root = parser.parse_source_file();
    ParseOutput {
        ast: clx_parser::ast_json::to_json(parser.get_arena(), root, convention),
        diagnostics: parser.to_diagnostics(),
    }
}

/// Parse with the base grammar only, without any class-syntax extension.
pub fn parse_plain(file_name: &str, source: &str, convention: NodeConvention) -> ParseOutput {
    let mut parser = ParserState::with_options(
        file_name.to_string(),
        source.to_string(),
        ParserOptions::default().with_convention(convention),
    );
    let root = parser.parse_source_file();
    ParseOutput {
        ast: clx_parser::ast_json::to_json(parser.get_arena(), root, convention),
        diagnostics: parser.to_diagnostics(),
    }
}
