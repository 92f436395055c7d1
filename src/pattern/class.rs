use std::{collections::HashMap, fmt::Debug};

use lazy_static::lazy_static;

lazy_static! {
    /// `\d`, `\w`, `\s` and their negations, ASCII only.
    pub static ref SHORTHAND_CLASSES: HashMap<u8, ByteSet> = {
        let digit = ByteSet::range(b'0', b'9');

        let mut word = digit;
        word.insert_range(b'a', b'z');
        word.insert_range(b'A', b'Z');
        word.insert(b'_');

        let mut space = ByteSet::empty();
        for b in [b' ', b'\t', b'\n', b'\r', 0x0B, 0x0C] {
            space.insert(b);
        }

        let mut map = HashMap::new();
        map.insert(b'd', digit);
        map.insert(b'D', digit.negate());
        map.insert(b'w', word);
        map.insert(b'W', word.negate());
        map.insert(b's', space);
        map.insert(b'S', space.negate());
        map
    };
}

/// A set of byte values, stored as a 256-bit bitmap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet([u64; 4]);

impl ByteSet {
    pub const fn empty() -> Self {
        ByteSet([0; 4])
    }

    pub const fn full() -> Self {
        ByteSet([u64::MAX; 4])
    }

    pub fn single(byte: u8) -> Self {
        let mut set = ByteSet::empty();
        set.insert(byte);
        set
    }

    pub fn range(lo: u8, hi: u8) -> Self {
        let mut set = ByteSet::empty();
        set.insert_range(lo, hi);
        set
    }

    /// Everything `.` matches: any byte but `\n`.
    pub fn any_but_newline() -> Self {
        let mut set = ByteSet::full();
        set.remove(b'\n');
        set
    }

    pub fn insert(&mut self, byte: u8) {
        self.0[(byte >> 6) as usize] |= 1 << (byte & 63);
    }

    pub fn remove(&mut self, byte: u8) {
        self.0[(byte >> 6) as usize] &= !(1 << (byte & 63));
    }

    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        for byte in lo..=hi {
            self.insert(byte);
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.0[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    pub fn union(&mut self, other: &ByteSet) {
        for (word, other) in self.0.iter_mut().zip(other.0.iter()) {
            *word |= *other;
        }
    }

    pub fn negate(self) -> Self {
        ByteSet(self.0.map(|word| !word))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |byte| self.contains(*byte))
    }

    /// Inclusive runs of consecutive members.
    pub fn ranges(&self) -> Vec<(u8, u8)> {
        let mut ranges: Vec<(u8, u8)> = Vec::new();
        for byte in self.iter() {
            match ranges.last_mut() {
                Some((_, hi)) if *hi as u16 + 1 == byte as u16 => *hi = byte,
                _ => ranges.push((byte, byte)),
            }
        }
        ranges
    }
}

impl Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (lo, hi) in self.ranges() {
            if lo == hi {
                write!(f, "{}", lo.escape_ascii())?;
            } else {
                write!(f, "{}-{}", lo.escape_ascii(), hi.escape_ascii())?;
            }
        }
        write!(f, "]")
    }
}
