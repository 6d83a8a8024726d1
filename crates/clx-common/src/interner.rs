//! String interner for identifier deduplication.
//!
//! Identifiers are interned into a per-parse pool and carried around as
//! u32 `Atom`s, so comparing two names is an integer comparison.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

const COMMON_STRINGS: &[&str] = &[
    "class",
    "constructor",
    "extends",
    "function",
    "get",
    "set",
    "static",
    "async",
    "this",
    "super",
    "var",
    "let",
    "const",
    "return",
    "hidden",
    "my",
    "internal",
];

/// String interner that deduplicates strings and returns Atom handles.
///
/// # Example
/// ```
/// use clx_common::Interner;
/// let mut interner = Interner::new();
/// let a1 = interner.intern("hello");
/// let a2 = interner.intern("hello");
/// assert_eq!(a1, a2);
/// assert_eq!(interner.resolve(a1), "hello");
/// ```
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<Arc<str>, Atom>,
    /// All interned strings (index 0 is the empty string)
    strings: Vec<Arc<str>>,
}

impl Interner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: Arc<str> = Arc::from("");
        interner.strings.push(empty.clone());
        interner.map.insert(empty, Atom::NONE);
        interner
    }

    /// Intern a string, returning its Atom handle.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.map.get(s) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, atom);
        atom
    }

    /// Look up an already interned string without inserting it.
    #[inline]
    pub fn lookup(&self, s: &str) -> Option<Atom> {
        self.map.get(s).copied()
    }

    /// Resolve an Atom back to its string value.
    /// Returns empty string if atom is out of bounds.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner is empty (only has the empty string).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }

    /// Pre-intern keywords and the extension keywords of the built-in profiles.
    pub fn intern_common(&mut self) {
        for s in COMMON_STRINGS {
            self.intern(s);
        }
    }
}
