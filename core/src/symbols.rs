use crate::error::{CricomError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A single element of a Morse character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Dit
    Short,
    /// Dah
    Long,
}

const S: Mark = Mark::Short;
const L: Mark = Mark::Long;

/// Token returned for Mark sequences that have no entry
pub const WORD_SPACE: &str = " ";

/// Conventional "transmission error" token (eight dits)
pub const ERROR_TOKEN: &str = "irrtum";

/// Morse table in lookup priority order.
/// Reverse lookup resolves a Mark sequence to the first token listed for it.
// "f" and "=" carry their ITU codes; the legacy codes collided with "v" and "f".
const MORSE_TABLE: &[(&str, &[Mark])] = &[
    ("e", &[S]),
    ("a", &[S, L]),
    ("w", &[S, L, L]),
    ("j", &[S, L, L, L]),
    ("1", &[S, L, L, L, L]),
    ("'", &[S, L, L, L, L, S]),
    ("r", &[S, L, S]),
    ("ä", &[S, L, S, L]),
    ("+", &[S, L, S, L, S]),
    ("l", &[S, L, S, S]),
    ("\"", &[S, L, S, S, S]),
    ("é", &[S, L, S, S, L]),
    ("u", &[S, S, L]),
    ("ü", &[S, S, L, L]),
    ("2", &[S, S, L, L, L]),
    ("=", &[L, S, S, S, L]),
    ("?", &[S, S, L, S, L]),
    ("i", &[S, S]),
    ("f", &[S, S, L, S]),
    ("t", &[L]),
    ("m", &[L, L]),
    ("o", &[L, L, L]),
    ("ö", &[L, L, L, S]),
    ("8", &[L, L, L, S, S]),
    ("s", &[S, S, S]),
    ("v", &[S, S, S, L]),
    ("3", &[S, S, S, L, L]),
    ("ß", &[S, S, S, L, L, L]),
    ("h", &[S, S, S, S]),
    ("4", &[S, S, S, S, L]),
    ("ch", &[L, L, L, L]),
    ("5", &[S, S, S, S, S]),
    ("n", &[L, S]),
    ("d", &[L, S, S]),
    ("b", &[L, S, S, S]),
    ("6", &[L, S, S, S, S]),
    ("x", &[L, S, S, L]),
    ("/", &[L, S, S, L, S]),
    ("k", &[L, S, L]),
    ("y", &[L, S, L, L]),
    ("(", &[L, S, L, L, S]),
    (")", &[L, S, L, L, S, L]),
    ("c", &[L, S, L, S]),
    ("g", &[L, L, S]),
    ("z", &[L, L, S, S]),
    ("7", &[L, L, S, S, S]),
    ("q", &[L, L, S, L]),
    ("ñ", &[L, L, S, L, L]),
    ("@", &[S, L, L, S, L, S]),
    ("9", &[L, L, L, L, S]),
    ("0", &[L, L, L, L, L]),
    (ERROR_TOKEN, &[S, S, S, S, S, S, S, S]),
];

/// Bidirectional Morse lookup: token to Marks and Marks back to token
pub struct SymbolTable {
    forward: HashMap<&'static str, &'static [Mark]>,
    reverse: HashMap<&'static [Mark], &'static str>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut forward = HashMap::with_capacity(MORSE_TABLE.len());
        let mut reverse = HashMap::with_capacity(MORSE_TABLE.len());

        for &(token, marks) in MORSE_TABLE {
            forward.insert(token, marks);
            reverse.entry(marks).or_insert(token);
        }

        Self { forward, reverse }
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static SymbolTable {
        static TABLE: OnceLock<SymbolTable> = OnceLock::new();
        TABLE.get_or_init(SymbolTable::new)
    }

    /// Look up the Mark sequence of a token
    pub fn marks_of(&self, token: &str) -> Result<&'static [Mark]> {
        self.forward
            .get(token)
            .copied()
            .ok_or_else(|| CricomError::UnknownSymbol(token.to_string()))
    }

    /// Resolve a Mark sequence to its token.
    ///
    /// Sequences without an entry (the empty one included) resolve to a word space.
    pub fn token_of(&self, marks: &[Mark]) -> &'static str {
        self.reverse.get(marks).copied().unwrap_or(WORD_SPACE)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.forward.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// All entries in lookup priority order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static [Mark])> {
        MORSE_TABLE.iter().copied()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
