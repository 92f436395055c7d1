#![allow(clippy::module_inception)]

use std::fmt::{Display, Write};

use crate::errors::errors::ErrorTip;

pub mod automaton;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod pattern;

pub use config::LexerConfig;
pub use errors::errors::{Error, ErrorImpl};
pub use lexer::{
    actions::{self, Action},
    lexer::{Lexer, Rule},
    scanner::{ScanResult, Scanner, Tokens},
    tokens::{Match, SymbolTable, Token, TokenKind},
};

/// A location in a scanned buffer. `line` and `column` use the baselines of
/// the [`LexerConfig`] the scanner was built with (1-based by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// Used by errors that do not point into the scanned input.
    pub fn null() -> Self {
        Position::default()
    }

    /// The position of the byte following `byte`, where `byte` sits at `self`.
    pub fn step(self, byte: u8, first_column: usize) -> Self {
        if byte == b'\n' {
            Position::new(self.offset + 1, self.line + 1, first_column)
        } else {
            Position::new(self.offset + 1, self.line, self.column + 1)
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// `start` is the position of the first byte and `end` the position of the
/// last byte, so both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Finds the line containing `offset`. Returns the 1-based line number, the
/// text of the line and the offset of `offset` within that line.
pub fn get_line_at_position(source: &[u8], offset: usize) -> Option<(usize, String, usize)> {
    if offset >= source.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in source.split_inclusive(|b| *b == b'\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let text = String::from_utf8_lossy(line).into_owned();
            return Some((index + 1, text, offset - start));
        }

        start = end;
    }

    None
}

/// Renders `error` against the line of `source` it points at:
///
/// ```text
/// Error: UnconsumedInput
/// -> query.txt
///   |
/// 2 | a = $b
///   | ----^
/// ```
pub fn display_error(error: &Error, source: &[u8], name: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", name);

    let position = error.get_position();
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = b"Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert!(get_line_at_position(source, source.len()).is_none());
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(0, 1, 1);
        assert_eq!(pos.step(b'a', 1), Position::new(1, 1, 2));
        assert_eq!(pos.step(b'\n', 1), Position::new(1, 2, 1));
        assert_eq!(pos.step(b'\n', 0), Position::new(1, 2, 0));
    }

    #[test]
    fn test_display_error() {
        let source = b"abc\n  x$y\n";
        let error = Error::new(
            ErrorImpl::UnconsumedInput {
                text: "$".to_string(),
                failed_at: 7,
            },
            Position::new(7, 2, 4),
        );

        let rendered = display_error(&error, source, "input.txt");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error: UnconsumedInput");
        assert_eq!(lines[1], "-> input.txt");
        assert_eq!(lines[3], "2 | x$y");
        assert_eq!(lines[4], "  | -^");
    }
}
