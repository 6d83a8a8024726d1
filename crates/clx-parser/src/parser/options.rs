//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Which family of node shapes the parser produces for class members and
/// literals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeConvention {
    /// `ClassMethod`, `ClassProperty`, `StringLiteral`, `NumericLiteral`
    #[default]
    Default,
    /// ESTree: `MethodDefinition`, `PropertyDefinition`, `Literal`
    Flat,
}

impl NodeConvention {
    pub fn name(self) -> &'static str {
        match self {
            NodeConvention::Default => "default",
            NodeConvention::Flat => "flat",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    pub convention: NodeConvention,
}

impl ParserOptions {
    #[must_use]
    pub fn with_convention(mut self, convention: NodeConvention) -> Self {
        self.convention = convention;
        self
    }
}
