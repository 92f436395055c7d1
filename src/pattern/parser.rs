use thiserror::Error;

use super::{
    ast::Node,
    class::{ByteSet, SHORTHAND_CLASSES},
};

/// Upper bound for `{n,m}` repetition counts.
pub const REPEAT_MAX: u32 = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at byte {offset}")]
pub struct PatternError {
    pub offset: usize,
    pub reason: String,
}

impl PatternError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        PatternError {
            offset,
            reason: reason.into(),
        }
    }
}

/// Parses a pattern into a [`Node`] tree.
pub fn parse_pattern(pattern: &[u8]) -> Result<Node, PatternError> {
    let mut parser = PatternParser {
        bytes: pattern,
        index: 0,
    };

    let node = parser.alternation()?;

    match parser.peek() {
        None => Ok(node),
        Some(b')') => Err(PatternError::new(parser.index, "unbalanced ')'")),
        Some(byte) => Err(PatternError::new(
            parser.index,
            format!("unexpected '{}'", byte.escape_ascii()),
        )),
    }
}

struct PatternParser<'p> {
    bytes: &'p [u8],
    index: usize,
}

/// A class member: either a single byte (usable as a range endpoint) or a
/// shorthand class.
enum ClassItem {
    Byte(u8),
    Set(ByteSet),
}

impl<'p> PatternParser<'p> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.index + ahead).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.index += 1;
        Some(byte)
    }

    fn alternation(&mut self) -> Result<Node, PatternError> {
        let mut branches = vec![self.concatenation()?];

        while self.peek() == Some(b'|') {
            self.bump();
            branches.push(self.concatenation()?);
        }

        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(Node::Alternate(branches))
        }
    }

    fn concatenation(&mut self) -> Result<Node, PatternError> {
        let mut items = Vec::new();

        while let Some(byte) = self.peek() {
            if byte == b'|' || byte == b')' {
                break;
            }
            items.push(self.repetition()?);
        }

        match items.len() {
            0 => Ok(Node::Empty),
            1 => Ok(items.remove(0)),
            _ => Ok(Node::Concat(items)),
        }
    }

    fn repetition(&mut self) -> Result<Node, PatternError> {
        let mut node = self.atom()?;

        loop {
            node = match self.peek() {
                Some(b'*') => {
                    self.bump();
                    Node::repeat(node, 0, None)
                }
                Some(b'+') => {
                    self.bump();
                    Node::repeat(node, 1, None)
                }
                Some(b'?') => {
                    self.bump();
                    Node::repeat(node, 0, Some(1))
                }
                Some(b'{') => {
                    let (min, max) = self.counted()?;
                    Node::repeat(node, min, max)
                }
                _ => return Ok(node),
            };
        }
    }

    /// Reads `{n}`, `{n,}` or `{n,m}`.
    fn counted(&mut self) -> Result<(u32, Option<u32>), PatternError> {
        let open = self.index;
        self.bump();

        let min = self
            .number()?
            .ok_or_else(|| PatternError::new(open, "malformed repetition"))?;

        let max = if self.peek() == Some(b',') {
            self.bump();
            self.number()?
        } else {
            Some(min)
        };

        if self.bump() != Some(b'}') {
            return Err(PatternError::new(open, "malformed repetition"));
        }

        if let Some(max) = max {
            if min > max {
                return Err(PatternError::new(
                    open,
                    format!("repetition minimum {} exceeds maximum {}", min, max),
                ));
            }
        }

        Ok((min, max))
    }

    fn number(&mut self) -> Result<Option<u32>, PatternError> {
        let start = self.index;
        let mut value: u32 = 0;

        while let Some(byte @ b'0'..=b'9') = self.peek() {
            self.bump();
            value = value * 10 + (byte - b'0') as u32;
            if value > REPEAT_MAX {
                return Err(PatternError::new(
                    start,
                    format!("repetition count exceeds {}", REPEAT_MAX),
                ));
            }
        }

        Ok((self.index > start).then_some(value))
    }

    fn atom(&mut self) -> Result<Node, PatternError> {
        let offset = self.index;
        let Some(byte) = self.bump() else {
            return Err(PatternError::new(offset, "unexpected end of pattern"));
        };

        match byte {
            b'(' => {
                let inner = self.alternation()?;
                if self.bump() != Some(b')') {
                    return Err(PatternError::new(offset, "unclosed '('"));
                }
                Ok(inner)
            }
            b'[' => self.class(offset).map(Node::Class),
            b'.' => Ok(Node::Class(ByteSet::any_but_newline())),
            b'\\' => match self.escape(offset)? {
                ClassItem::Byte(byte) => Ok(Node::Class(ByteSet::single(byte))),
                ClassItem::Set(set) => Ok(Node::Class(set)),
            },
            b'*' | b'+' | b'?' | b'{' => Err(PatternError::new(
                offset,
                format!("quantifier '{}' without operand", byte as char),
            )),
            _ => Ok(Node::Class(ByteSet::single(byte))),
        }
    }

    /// Reads the byte(s) after a `\`; `offset` is the backslash.
    fn escape(&mut self, offset: usize) -> Result<ClassItem, PatternError> {
        let Some(byte) = self.bump() else {
            return Err(PatternError::new(offset, "trailing '\\'"));
        };

        let escaped = match byte {
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'f' => 0x0C,
            b'v' => 0x0B,
            b'0' => 0,
            b'x' => return self.hex(offset).map(ClassItem::Byte),
            _ if byte.is_ascii_alphanumeric() => {
                return SHORTHAND_CLASSES
                    .get(&byte)
                    .map(|set| ClassItem::Set(*set))
                    .ok_or_else(|| {
                        PatternError::new(offset, format!("unknown escape '\\{}'", byte as char))
                    })
            }
            _ => byte,
        };

        Ok(ClassItem::Byte(escaped))
    }

    fn hex(&mut self, offset: usize) -> Result<u8, PatternError> {
        let digits = [self.bump(), self.bump()];
        match digits {
            [Some(hi), Some(lo)] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                let value = (hex_value(hi) << 4) | hex_value(lo);
                Ok(value)
            }
            _ => Err(PatternError::new(offset, "'\\x' needs two hex digits")),
        }
    }

    /// Reads a class body after `[`; `offset` is the opening bracket.
    fn class(&mut self, offset: usize) -> Result<ByteSet, PatternError> {
        let negated = self.peek() == Some(b'^');
        if negated {
            self.bump();
        }

        let mut set = ByteSet::empty();
        let mut first = true;

        loop {
            let item_offset = self.index;
            let item = match self.bump() {
                None => return Err(PatternError::new(offset, "unclosed '['")),
                Some(b']') if !first => break,
                Some(b'\\') => self.escape(item_offset)?,
                Some(byte) => ClassItem::Byte(byte),
            };
            first = false;

            let is_range = self.peek() == Some(b'-') && !matches!(self.peek_at(1), Some(b']') | None);

            match item {
                ClassItem::Set(members) => {
                    if is_range {
                        return Err(PatternError::new(item_offset, "invalid range endpoint"));
                    }
                    set.union(&members);
                }
                ClassItem::Byte(lo) if is_range => {
                    self.bump();
                    let hi_offset = self.index;
                    let hi = match self.bump() {
                        Some(b'\\') => match self.escape(hi_offset)? {
                            ClassItem::Byte(hi) => hi,
                            ClassItem::Set(_) => {
                                return Err(PatternError::new(hi_offset, "invalid range endpoint"))
                            }
                        },
                        Some(hi) => hi,
                        None => return Err(PatternError::new(offset, "unclosed '['")),
                    };

                    if lo > hi {
                        return Err(PatternError::new(
                            item_offset,
                            format!(
                                "reversed range '{}-{}'",
                                lo.escape_ascii(),
                                hi.escape_ascii()
                            ),
                        ));
                    }
                    set.insert_range(lo, hi);
                }
                ClassItem::Byte(byte) => set.insert(byte),
            }
        }

        let set = if negated { set.negate() } else { set };

        if set.is_empty() {
            return Err(PatternError::new(offset, "character class matches nothing"));
        }

        Ok(set)
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
