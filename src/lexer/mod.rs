//! Rule registration and scanning.
//!
//! A [`lexer::Lexer`] collects `(pattern, action)` rules and compiles them
//! into one shared automaton. Each input buffer gets its own
//! [`scanner::Scanner`], which repeatedly takes the longest match at its
//! cursor (lowest rule index on ties), runs the winning rule's action and
//! tracks line and column for every consumed byte.

pub mod actions;
pub mod lexer;
pub mod scanner;
pub mod tokens;
