//! Configurable class-syntax extension ("classes 1.1") for the clx parser.
//!
//! This crate provides:
//! - `profile` - built-in syntax profiles, option overrides, and `resolve`
//! - `OperatorReader` - scanner hook for the custom member operator
//! - `HiddenSubscriptParser` - `object->name` member chains
//! - `ClassesMemberParser` - instance variables, hidden methods, static blocks
//! - `finishers` - node retyping and feature-flag checks
//!
//! ```
//! use clx_classes::{ProfileTable, SyntaxOptions, new_parser, resolve};
//! use clx_parser::ParserOptions;
//!
//! let profile = resolve(&ProfileTable::builtin(), &SyntaxOptions::default())
//!     .unwrap()
//!     .into_shared();
//! let mut parser = new_parser(
//!     "a.js".to_string(),
//!     "class A { var x = 1; hidden f() { return this->x; } }".to_string(),
//!     ParserOptions::default(),
//!     profile,
//! );
//! parser.parse_source_file();
//! assert!(parser.get_diagnostics().is_empty());
//! ```

pub mod class_members;
pub mod finishers;
pub mod operator;
pub mod profile;
pub mod subscript;

pub use class_members::{ClassesMemberParser, MemberStart};
pub use finishers::{ClassMethodMarker, HiddenMethodMarker, MethodDefinitionMarker, marker_for};
pub use operator::OperatorReader;
pub use profile::{
    ConfigError, DEFAULT_PROFILE, ProfileTable, ResolvedProfile, SyntaxOptions, SyntaxProfile,
    resolve,
};
pub use subscript::HiddenSubscriptParser;

use clx_parser::{ParserOptions, ParserState};
use std::sync::Arc;
use tracing::debug;

/// Install the extension into `parser`, wrapping whatever class member and
/// subscript parsers it currently has. Must run before parsing starts.
pub fn install(parser: &mut ParserState, profile: Arc<ResolvedProfile>) {
    debug!(
        file = parser.file_name(),
        profile = %profile.name,
        convention = parser.convention().name(),
        "installing class syntax extension"
    );
    let marker = marker_for(parser.convention());
    parser.set_token_reader(Arc::new(OperatorReader::new(Arc::clone(&profile))));

    let subscripts = HiddenSubscriptParser::new(Arc::clone(&profile), parser.subscript_parser());
    parser.set_subscript_parser(Arc::new(subscripts));

    let members = ClassesMemberParser::new(profile, parser.class_member_parser(), marker);
    parser.set_class_member_parser(Arc::new(members));
}

/// A fresh parser for one file with the extension installed.
pub fn new_parser(
    file_name: String,
    source_text: String,
    options: ParserOptions,
    profile: Arc<ResolvedProfile>,
) -> ParserState {
    let mut parser = ParserState::with_options(file_name, source_text, options);
    install(&mut parser, profile);
    parser
}
