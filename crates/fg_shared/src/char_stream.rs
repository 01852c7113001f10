use std::fmt;
use std::fmt::{Debug, Formatter};

pub const CHAR_LF: char = '\u{000A}';
pub const CHAR_CR: char = '\u{000D}';

/// Defines a single element in the stream. This is either a character, or the end-of-stream
/// marker that is returned when reading past the last character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// Stream is exhausted
    StreamEnd,
}

use Character::*;

/// Converts the given character to a char. The end-of-stream marker is converted to 0x0000
impl From<Character> for char {
    fn from(c: Character) -> Self {
        match c {
            Ch(c) => c,
            StreamEnd => 0x0000 as char,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
        }
    }
}

impl Character {
    /// Returns true when the character is a whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(c) if c.is_whitespace())
    }

    /// Returns true when the character is a numerical
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }
}

/// A read-only stream of characters over a string. All positions are character offsets, not byte
/// offsets, so slices never split a multibyte character.
pub struct CharStream {
    /// Decoded characters of the input
    chars: Vec<char>,
    /// Current position in the stream
    position: usize,
}

impl CharStream {
    /// Create a new stream from the given string
    pub fn new(data: &str) -> Self {
        // CRLF pairs are read as a single LF so line numbers stay correct
        let mut chars = Vec::with_capacity(data.len());
        let mut it = data.chars().peekable();
        while let Some(c) = it.next() {
            if c == CHAR_CR && it.peek() == Some(&CHAR_LF) {
                continue;
            }
            chars.push(c);
        }

        Self { chars, position: 0 }
    }

    /// Returns true when the stream has been read completely
    pub fn eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Returns the character at the current position without advancing
    pub fn read(&self) -> Character {
        self.look_ahead(0)
    }

    /// Looks ahead in the stream. `look_ahead(0)` is the same as `read()`
    pub fn look_ahead(&self, offset: usize) -> Character {
        match self.chars.get(self.position + offset) {
            Some(c) => Ch(*c),
            None => StreamEnd,
        }
    }

    /// Advances the stream by one character
    pub fn next(&mut self) {
        if !self.eof() {
            self.position += 1;
        }
    }

    /// Returns the current position in the stream
    pub fn tell(&self) -> usize {
        self.position
    }

    /// Number of characters in the stream
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the characters between `start` and `end` (exclusive). Out of range positions are clamped.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        if start >= end {
            return String::new();
        }

        self.chars[start..end].iter().collect()
    }
}

/// Location holds the start position of the given element in the data source
#[derive(Clone, PartialEq, Eq, Copy)]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 1
    pub column: usize,
    /// Character offset, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the location past the given character
    pub fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == CHAR_LF {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
