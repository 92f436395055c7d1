//! Pattern syntax for lexer rules.
//!
//! Patterns are byte strings describing a regular language:
//!
//! - literal bytes, and `\` followed by any punctuation for the literal byte
//! - `\n`, `\r`, `\t`, `\f`, `\v`, `\0` and `\xHH`
//! - `\d`, `\w`, `\s` and their negations `\D`, `\W`, `\S` (ASCII)
//! - `.` for any byte except `\n`
//! - `[...]` and `[^...]` byte classes with ranges
//! - `|` alternation and `(...)` grouping
//! - `*`, `+`, `?`, `{n}`, `{n,}` and `{n,m}` repetition
//!
//! There are no anchors, captures, backreferences or lookaround.

pub mod ast;
pub mod class;
pub mod parser;

pub use ast::Node;
pub use class::ByteSet;
pub use parser::{parse_pattern, PatternError};
