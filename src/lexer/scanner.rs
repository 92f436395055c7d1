use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    automaton::MatchOutcome,
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::{
    actions::Action,
    lexer::CompiledLexer,
    tokens::{Match, Token},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Token(Token),
    Error(Error),
    EndOfInput,
}

/// A cursor over one input buffer. Scanners are cheap and independent; any
/// number of them may share one compiled lexer.
#[derive(Debug, Clone)]
pub struct Scanner {
    lexer: Arc<CompiledLexer>,
    text: Vec<u8>,
    position: Position,
}

impl Scanner {
    pub(crate) fn new(lexer: Arc<CompiledLexer>, text: Vec<u8>) -> Scanner {
        let position = Position::new(0, lexer.first_line, lexer.first_column);
        Scanner {
            lexer,
            text,
            position,
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Offset of the next unscanned byte.
    pub fn cursor(&self) -> usize {
        self.position.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.text.len()
    }

    /// Consumes up to `n` bytes. Returns the position of the last byte
    /// consumed, or the current position when nothing was.
    pub fn advance(&mut self, n: usize) -> Position {
        let target = self.position.offset.saturating_add(n);
        self.advance_to(target)
    }

    /// Consumes bytes until the cursor reaches `offset` (clamped to the end of
    /// the text). Never moves backwards.
    pub fn advance_to(&mut self, offset: usize) -> Position {
        let target = offset.min(self.text.len());
        let mut last = self.position;

        while self.position.offset < target {
            let byte = self.text[self.position.offset];
            last = self.position;
            self.position = self.position.step(byte, self.lexer.first_column);
        }

        last
    }

    /// Produces the next token, skipping matches whose action emits nothing.
    pub fn next_token(&mut self) -> ScanResult {
        loop {
            let tc = self.position.offset;
            if tc >= self.text.len() {
                return ScanResult::EndOfInput;
            }

            let found = match self.lexer.automaton.longest_match_at(&self.text, tc) {
                MatchOutcome::Matched(found) => found,
                MatchOutcome::NoMatch { failed_at } => {
                    debug!(
                        target: "rulelex::scanner",
                        offset = tc,
                        failed_at,
                        "No rule matches"
                    );
                    let text = char_at(&self.text, tc);
                    return ScanResult::Error(Error::new(
                        ErrorImpl::UnconsumedInput { text, failed_at },
                        self.position,
                    ));
                }
            };

            let lexer = Arc::clone(&self.lexer);
            let rule = found.winner();
            let action = &lexer.actions[rule];

            if found.length == 0 && !action.is_custom() {
                return ScanResult::Error(Error::new(
                    ErrorImpl::ZeroLengthMatch { rule },
                    self.position,
                ));
            }

            let start = self.position;
            let bytes = self.text[tc..tc + found.length].to_vec();
            let end = self.advance(found.length);
            let m = Match {
                rule,
                tc,
                bytes,
                span: Span { start, end },
            };

            trace!(
                target: "rulelex::scanner",
                rule,
                offset = tc,
                length = found.length,
                "Matched"
            );

            let token = match action {
                Action::Emit(emit) => Some(emit(&m)),
                Action::Skip => None,
                Action::Custom(custom) => match custom(self, m) {
                    Ok(token) => token,
                    Err(message) => {
                        debug!(
                            target: "rulelex::scanner",
                            rule,
                            offset = tc,
                            "Action failed: {}",
                            message
                        );
                        self.position = start;
                        return ScanResult::Error(Error::new(
                            ErrorImpl::ActionFailed { rule, message },
                            start,
                        ));
                    }
                },
            };

            if self.position.offset == tc {
                self.position = start;
                return ScanResult::Error(Error::new(ErrorImpl::ZeroLengthMatch { rule }, start));
            }

            if let Some(token) = token {
                return ScanResult::Token(token);
            }
        }
    }

    /// Tokens until the end of the input. The first error is yielded and
    /// ends the iteration.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            scanner: self,
            done: false,
        }
    }
}

pub struct Tokens<'a> {
    scanner: &'a mut Scanner,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.scanner.next_token() {
            ScanResult::Token(token) => Some(Ok(token)),
            ScanResult::Error(error) => {
                self.done = true;
                Some(Err(error))
            }
            ScanResult::EndOfInput => {
                self.done = true;
                None
            }
        }
    }
}

/// The UTF-8 character starting at `offset`, or the lone byte if it does not
/// start one.
fn char_at(text: &[u8], offset: usize) -> String {
    let width = match text[offset] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };
    let end = (offset + width).min(text.len());

    match std::str::from_utf8(&text[offset..end]) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(&text[offset..offset + 1]).into_owned(),
    }
}
