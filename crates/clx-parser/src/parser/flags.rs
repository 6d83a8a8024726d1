//! Flags packed into the `u16` flag field of a node header.

pub mod node_flags {
    pub const NONE: u32 = 0;
    /// Variable statement declared with `let`
    pub const LET: u32 = 1 << 0;
    /// Variable statement declared with `const`
    pub const CONST: u32 = 1 << 1;
    /// Member access or call reached through `?.`
    pub const OPTIONAL_CHAIN: u32 = 1 << 2;
    /// Class method marked hidden (flat node convention)
    pub const HIDDEN: u32 = 1 << 3;
    pub const BLOCK_SCOPED: u32 = LET | CONST;
}
