//! JavaScript parser and AST types for clx.
//!
//! This crate provides:
//! - `NodeArena` - 16-byte node headers with typed data pools
//! - `ParserState` - recursive-descent parser over a small JavaScript subset
//! - `ClassMemberParser` / `SubscriptParser` - capability traits that let an
//!   extension take over class member and member-chain parsing
//! - `ast_json` - ESTree-style JSON rendering in two node conventions

pub mod parser;

pub use parser::{
    BaseClassMemberParser, BaseSubscriptParser, ClassBodyState, ClassMemberParser, NodeArena,
    NodeConvention, NodeIndex, NodeList, ParseDiagnostic, ParserOptions, ParserState,
    SubscriptParser, SubscriptState, ast_json, node, node_flags, syntax_kind_ext,
};
