use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span, MK_TOKEN};

/// Caller-assigned token type. The engine never interprets it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TokenKind(pub usize);

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Defaults to the lexeme; actions may rewrite it.
    pub value: String,
    /// Every byte the token consumed.
    pub lexeme: Vec<u8>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token {{ kind: {}, value: {:?}, span: {} }}",
            self.kind, self.value, self.span
        )
    }
}

impl Token {
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    pub fn start_column(&self) -> usize {
        self.span.start.column
    }

    pub fn end_line(&self) -> usize {
        self.span.end.line
    }

    pub fn end_column(&self) -> usize {
        self.span.end.column
    }

    /// Byte range of the token in the scanned text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.span.start.offset..self.span.start.offset + self.lexeme.len()
    }
}

/// What the automaton matched for one rule at one offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub rule: usize,
    /// Offset of the first matched byte.
    pub tc: usize,
    pub bytes: Vec<u8>,
    pub span: Span,
}

impl Match {
    /// A token of `kind` carrying exactly the matched bytes.
    pub fn token(&self, kind: TokenKind) -> Token {
        MK_TOKEN!(
            kind,
            String::from_utf8_lossy(&self.bytes).into_owned(),
            self.bytes.clone(),
            self.span
        )
    }

    pub fn start(&self) -> Position {
        self.span.start
    }
}

/// Token names and the kinds assigned to them, owned by whoever builds the
/// rule set.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, TokenKind>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for name in names {
            table.intern(name);
        }
        table
    }

    /// Returns the kind for `name`, assigning the next free one if needed.
    pub fn intern(&mut self, name: impl Into<String>) -> TokenKind {
        let name = name.into();
        if let Some(kind) = self.ids.get(&name) {
            return *kind;
        }

        let kind = TokenKind(self.names.len());
        self.names.push(name.clone());
        self.ids.insert(name, kind);
        kind
    }

    pub fn get(&self, name: &str) -> Option<TokenKind> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, kind: TokenKind) -> Option<&str> {
        self.names.get(kind.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
