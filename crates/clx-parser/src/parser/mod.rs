//! Parser module: arena AST plus the recursive-descent `ParserState`.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod flags;
pub use flags::node_flags;

pub mod syntax_kind_ext;

pub mod node;
pub use node::NodeArena;
mod node_access;
mod node_arena;

pub mod options;
pub use options::{NodeConvention, ParserOptions};

pub mod state;
pub use state::{ParseDiagnostic, ParserState};
mod state_expressions;
pub use state_expressions::{BaseSubscriptParser, SubscriptParser, SubscriptState};
mod state_statements;
mod state_statements_class_members;
pub use state_statements_class_members::{
    BaseClassMemberParser, ClassBodyState, ClassMemberParser,
};

pub mod ast_json;

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod parser_tests;
