use crate::error::{CricomError, Result};
use crate::symbols::{Mark, SymbolTable};

/// One boolean per slot, `true` while the carrier is keyed
pub type BitSequence = Vec<bool>;

/// Dit: one keyed slot and one silent slot
pub const SHORT_SLOTS: [bool; 2] = [true, false];

/// Dah: three keyed slots and one silent slot
pub const LONG_SLOTS: [bool; 4] = [true, true, true, false];

/// Gap closing a character
pub const SYMBOL_SEPARATOR: [bool; 2] = [false, false];

/// Gap encoding a space between words
pub const WORD_SEPARATOR: [bool; 4] = [false, false, false, false];

pub fn mark_slots(mark: Mark) -> &'static [bool] {
    match mark {
        Mark::Short => &SHORT_SLOTS,
        Mark::Long => &LONG_SLOTS,
    }
}

/// Serialize a lowercase message into slots using the process-wide table
pub fn serialize(message: &str) -> Result<BitSequence> {
    serialize_with(SymbolTable::global(), message)
}

/// Serialize a message one character at a time.
///
/// A space becomes the word separator; any other character becomes its
/// expanded Marks followed by the symbol separator. A character missing from
/// the table aborts the whole message.
pub fn serialize_with(table: &SymbolTable, message: &str) -> Result<BitSequence> {
    let mut bits = Vec::new();
    let mut utf8 = [0u8; 4];

    for ch in message.chars() {
        if ch == ' ' {
            bits.extend_from_slice(&WORD_SEPARATOR);
            continue;
        }

        let marks = table.marks_of(ch.encode_utf8(&mut utf8))?;
        for &mark in marks {
            bits.extend_from_slice(mark_slots(mark));
        }
        bits.extend_from_slice(&SYMBOL_SEPARATOR);
    }

    Ok(bits)
}

/// Parse slots back into text using the process-wide table
pub fn parse(bits: &[bool]) -> Result<String> {
    parse_with(SymbolTable::global(), bits)
}

/// Parse slots back into text in a single left-to-right pass
pub fn parse_with(table: &SymbolTable, bits: &[bool]) -> Result<String> {
    let mut parser = SlotParser::new(table, bits);
    while parser.cursor < bits.len() {
        parser.step()?;
    }
    Ok(parser.text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Cursor on a keyed slot: a Mark must start here
    AssemblingMark,
    /// Cursor on a silent slot: a separator, or padding
    AtSeparatorCheck,
}

struct SlotParser<'a> {
    table: &'a SymbolTable,
    bits: &'a [bool],
    cursor: usize,
    marks: Vec<Mark>,
    text: String,
}

impl<'a> SlotParser<'a> {
    fn new(table: &'a SymbolTable, bits: &'a [bool]) -> Self {
        Self {
            table,
            bits,
            cursor: 0,
            marks: Vec::new(),
            text: String::new(),
        }
    }

    fn state(&self) -> ParseState {
        if self.bits[self.cursor] {
            ParseState::AssemblingMark
        } else {
            ParseState::AtSeparatorCheck
        }
    }

    fn step(&mut self) -> Result<()> {
        match self.state() {
            ParseState::AssemblingMark => self.assemble_mark(),
            ParseState::AtSeparatorCheck => {
                self.check_separator();
                Ok(())
            }
        }
    }

    /// A pattern running past the end never matches
    fn matches(&self, pattern: &[bool]) -> bool {
        self.bits
            .get(self.cursor..self.cursor + pattern.len())
            .is_some_and(|window| window == pattern)
    }

    fn assemble_mark(&mut self) -> Result<()> {
        if self.matches(&LONG_SLOTS) {
            self.marks.push(Mark::Long);
            self.cursor += LONG_SLOTS.len();
        } else if self.matches(&SHORT_SLOTS) {
            self.marks.push(Mark::Short);
            self.cursor += SHORT_SLOTS.len();
        } else {
            return Err(CricomError::MalformedSequence {
                position: self.cursor,
            });
        }
        Ok(())
    }

    // Priority: word separator, symbol separator, single silent slot.
    // Silence with nothing assembled is padding (e.g. the tail of a word gap).
    fn check_separator(&mut self) {
        if self.marks.is_empty() {
            self.cursor += 1;
        } else if self.matches(&WORD_SEPARATOR) {
            self.cursor += WORD_SEPARATOR.len();
            self.resolve();
            self.text.push(' ');
        } else if self.matches(&SYMBOL_SEPARATOR) {
            self.cursor += SYMBOL_SEPARATOR.len();
            self.resolve();
        } else {
            self.cursor += 1;
        }
    }

    fn resolve(&mut self) {
        self.text.push_str(self.table.token_of(&self.marks));
        self.marks.clear();
    }
}

/// Render slots as `1`/`0` for diagnostics
pub fn format_bits(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
