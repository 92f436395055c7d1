//! What happens when a rule wins.
//!
//! An [`Action`] either emits a token built from the match, skips the match,
//! or runs custom code with mutable access to the [`Scanner`]. Custom code may
//! consume input past the match with [`Scanner::advance`]; scanning resumes
//! wherever it leaves the cursor.

use std::{fmt::Debug, sync::Arc};

use crate::{Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    scanner::Scanner,
    tokens::{Match, Token, TokenKind},
};

pub type EmitFn = dyn Fn(&Match) -> Token + Send + Sync;

/// `Ok(None)` skips, `Err(message)` fails the scan step.
pub type CustomFn = dyn Fn(&mut Scanner, Match) -> Result<Option<Token>, String> + Send + Sync;

#[derive(Clone)]
pub enum Action {
    Emit(Arc<EmitFn>),
    Skip,
    Custom(Arc<CustomFn>),
}

impl Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Emit(_) => write!(f, "Emit"),
            Action::Skip => write!(f, "Skip"),
            Action::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl Action {
    pub fn emit<F>(emit: F) -> Action
    where
        F: Fn(&Match) -> Token + Send + Sync + 'static,
    {
        Action::Emit(Arc::new(emit))
    }

    pub fn custom<F>(custom: F) -> Action
    where
        F: Fn(&mut Scanner, Match) -> Result<Option<Token>, String> + Send + Sync + 'static,
    {
        Action::Custom(Arc::new(custom))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Action::Custom(_))
    }
}

/// Drops the match: whitespace, comments.
pub fn skip() -> Action {
    Action::Skip
}

/// Emits the match as a token of `kind`.
pub fn token(kind: TokenKind) -> Action {
    MK_DEFAULT_HANDLER!(kind)
}

/// Emits the match as a token of `kind` whose value has the first and last
/// byte removed, e.g. the quotes around a string.
pub fn quoted(kind: TokenKind) -> Action {
    Action::emit(move |m: &Match| {
        let value = String::from_utf8_lossy(strip_delimiters(&m.bytes)).into_owned();
        m.token(kind).with_value(value)
    })
}

/// `bytes` without its first and last byte.
pub fn strip_delimiters(bytes: &[u8]) -> &[u8] {
    if bytes.len() < 2 {
        return &[];
    }
    &bytes[1..bytes.len() - 1]
}

/// A literal opened by the rule's match and closed by the `close` byte that
/// balances it, with `open`/`close` pairs nesting in between: `<a<b>c>`.
///
/// The bytes after the match are read straight from the scanner's text. The
/// emitted token spans the whole literal; its value drops the outer pair.
pub fn nested_literal(open: u8, close: u8, kind: TokenKind) -> Action {
    Action::custom(move |scanner: &mut Scanner, m: Match| {
        let rest = &scanner.text()[scanner.cursor()..];

        let Some(consumed) = balanced_length(rest, open, close) else {
            return Err(format!(
                "unclosed literal starting at {} ({}:{})",
                m.tc, m.span.start.line, m.span.start.column
            ));
        };

        let lexeme = scanner.text()[m.tc..scanner.cursor() + consumed].to_vec();
        let end = scanner.advance(consumed);
        let value = String::from_utf8_lossy(strip_delimiters(&lexeme)).into_owned();

        Ok(Some(MK_TOKEN!(
            kind,
            value,
            lexeme,
            Span {
                start: m.span.start,
                end,
            }
        )))
    })
}

/// Length of the prefix of `rest` up to and including the `close` that brings
/// the depth (starting at 1) to zero.
fn balanced_length(rest: &[u8], open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;

    for (index, byte) in rest.iter().enumerate() {
        if *byte == open {
            depth += 1;
        } else if *byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(index + 1);
            }
        }
    }

    None
}
