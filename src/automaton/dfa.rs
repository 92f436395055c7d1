//! Subset construction of the rule NFA.
//!
//! The alphabet is first partitioned into byte classes: two bytes share a
//! class when no transition in the NFA tells them apart. Each DFA state keeps
//! the sorted set of rules accepted by the NFA states it stands for.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::errors::errors::ErrorImpl;
use crate::pattern::ByteSet;

use super::{
    nfa::{Nfa, StateId},
    LongestMatch, MatchOutcome,
};

pub const DEAD: u32 = 0;

#[derive(Debug, Clone)]
pub struct Dfa {
    classes: [u16; 256],
    class_count: usize,
    /// Row-major `[state][class]`.
    transitions: Vec<u32>,
    accepts: Vec<Vec<usize>>,
    start: u32,
}

impl Dfa {
    /// Determinizes `nfa`, failing once more than `limit` states exist.
    pub fn from_nfa(nfa: &Nfa, limit: usize) -> Result<Dfa, ErrorImpl> {
        let (classes, representatives) = byte_classes(nfa);
        let class_count = representatives.len();

        let mut sets: Vec<Vec<StateId>> = vec![Vec::new()];
        let mut index: HashMap<Vec<StateId>, u32> = HashMap::new();
        index.insert(Vec::new(), DEAD);

        let start_set = nfa.closure(&[nfa.start()]);
        index.insert(start_set.clone(), 1);
        sets.push(start_set);

        let mut transitions = vec![DEAD; 2 * class_count];
        let mut queue = VecDeque::from([1u32]);

        while let Some(id) = queue.pop_front() {
            for (class, byte) in representatives.iter().enumerate() {
                let target = nfa.step(&sets[id as usize], *byte);

                let target_id = match index.get(&target) {
                    Some(existing) => *existing,
                    None => {
                        if sets.len() >= limit {
                            return Err(ErrorImpl::AutomatonTooLarge {
                                states: sets.len() + 1,
                                limit,
                            });
                        }
                        let new_id = sets.len() as u32;
                        index.insert(target.clone(), new_id);
                        sets.push(target);
                        transitions.extend(std::iter::repeat(DEAD).take(class_count));
                        queue.push_back(new_id);
                        new_id
                    }
                };

                transitions[id as usize * class_count + class] = target_id;
            }
        }

        let accepts = sets.iter().map(|set| nfa.accepts(set)).collect();

        Ok(Dfa {
            classes,
            class_count,
            transitions,
            accepts,
            start: 1,
        })
    }

    /// Number of states, the dead state included.
    pub fn state_count(&self) -> usize {
        self.accepts.len()
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub fn next_state(&self, state: u32, byte: u8) -> u32 {
        let class = self.classes[byte as usize] as usize;
        self.transitions[state as usize * self.class_count + class]
    }

    pub fn accepts(&self, state: u32) -> &[usize] {
        &self.accepts[state as usize]
    }

    pub fn longest_match_at(&self, text: &[u8], offset: usize) -> MatchOutcome {
        let mut state = self.start;
        let mut best = (!self.accepts(state).is_empty()).then_some((0, state));
        let mut pos = offset;

        while pos < text.len() {
            let next = self.next_state(state, text[pos]);
            if next == DEAD {
                break;
            }
            state = next;
            pos += 1;

            if !self.accepts(state).is_empty() {
                best = Some((pos - offset, state));
            }
        }

        match best {
            Some((length, state)) => MatchOutcome::Matched(LongestMatch {
                length,
                rules: self.accepts(state).to_vec(),
            }),
            None => MatchOutcome::NoMatch { failed_at: pos },
        }
    }
}

/// Partitions 0..=255 so that every NFA byte set is a union of classes.
/// Returns the class of each byte and one representative byte per class.
fn byte_classes(nfa: &Nfa) -> ([u16; 256], Vec<u8>) {
    let mut classes = [0u16; 256];
    let mut count = 1u16;

    let distinct: HashSet<&ByteSet> = nfa.byte_sets().collect();

    for set in distinct {
        let mut remap: HashMap<(u16, bool), u16> = HashMap::new();
        let mut refined = [0u16; 256];
        let mut next = 0u16;

        for byte in 0..=255u8 {
            let key = (classes[byte as usize], set.contains(byte));
            let class = *remap.entry(key).or_insert_with(|| {
                next += 1;
                next - 1
            });
            refined[byte as usize] = class;
        }

        classes = refined;
        count = next;
    }

    let mut representatives = vec![0u8; count as usize];
    let mut seen = vec![false; count as usize];
    for byte in 0..=255u8 {
        let class = classes[byte as usize] as usize;
        if !seen[class] {
            seen[class] = true;
            representatives[class] = byte;
        }
    }

    (classes, representatives)
}
