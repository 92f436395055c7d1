//! Error types for rule compilation and scanning.
//!
//! Every failure is returned as an [`errors::Error`] value that pairs an
//! [`errors::ErrorImpl`] variant with the [`crate::Position`] it refers to:
//!
//! - Compile-time failures (malformed patterns, oversized automata)
//! - Usage failures (scanning with an uncompiled lexer)
//! - Scan-time failures (unconsumed input, failed actions, zero-length matches)

pub mod errors;
