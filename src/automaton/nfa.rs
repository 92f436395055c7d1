//! Thompson NFA over bytes.
//!
//! Every rule is compiled into a fragment ending in an `Accept(rule)` state;
//! a single `Split` start state fans out to all fragments in rule order.

use crate::pattern::{ByteSet, Node};

use super::{LongestMatch, MatchOutcome};

pub type StateId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Consumes one byte in `set`, then continues at `next`.
    Bytes { set: ByteSet, next: StateId },
    /// Epsilon transitions.
    Split(Vec<StateId>),
    Accept(usize),
}

#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    rules: usize,
}

impl Nfa {
    /// Builds one NFA recognising every rule, rule `i` being `rules[i]`.
    pub fn build(rules: &[Node]) -> Nfa {
        let mut builder = NfaBuilder { states: Vec::new() };

        let entries = rules
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let accept = builder.push(State::Accept(index));
                builder.compile(node, accept)
            })
            .collect();

        let start = builder.push(State::Split(entries));

        Nfa {
            states: builder.states,
            start,
            rules: rules.len(),
        }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn rule_count(&self) -> usize {
        self.rules
    }

    /// Every distinct byte set used on a transition.
    pub fn byte_sets(&self) -> impl Iterator<Item = &ByteSet> {
        self.states.iter().filter_map(|state| match state {
            State::Bytes { set, .. } => Some(set),
            _ => None,
        })
    }

    /// Epsilon closure of `seeds`, sorted and deduplicated.
    pub fn closure(&self, seeds: &[StateId]) -> Vec<StateId> {
        let mut seen = vec![false; self.states.len()];
        let mut stack: Vec<StateId> = seeds.to_vec();
        let mut closure = Vec::new();

        while let Some(id) = stack.pop() {
            if seen[id] {
                continue;
            }
            seen[id] = true;
            closure.push(id);

            if let State::Split(targets) = &self.states[id] {
                stack.extend(targets.iter().copied().filter(|target| !seen[*target]));
            }
        }

        closure.sort_unstable();
        closure
    }

    /// Closed successor set of `states` on `byte`.
    pub fn step(&self, states: &[StateId], byte: u8) -> Vec<StateId> {
        let targets: Vec<StateId> = states
            .iter()
            .filter_map(|id| match &self.states[*id] {
                State::Bytes { set, next } if set.contains(byte) => Some(*next),
                _ => None,
            })
            .collect();

        if targets.is_empty() {
            return targets;
        }
        self.closure(&targets)
    }

    /// Sorted rule indices accepted by `states`.
    pub fn accepts(&self, states: &[StateId]) -> Vec<usize> {
        let mut rules: Vec<usize> = states
            .iter()
            .filter_map(|id| match self.states[*id] {
                State::Accept(rule) => Some(rule),
                _ => None,
            })
            .collect();
        rules.sort_unstable();
        rules.dedup();
        rules
    }

    /// Simulates the NFA from `offset`, keeping every live state at once.
    pub fn longest_match_at(&self, text: &[u8], offset: usize) -> MatchOutcome {
        let mut current = self.closure(&[self.start]);
        let mut best = self.accepting(&current, 0);
        let mut pos = offset;

        while pos < text.len() {
            let next = self.step(&current, text[pos]);
            if next.is_empty() {
                break;
            }
            current = next;
            pos += 1;

            if let Some(found) = self.accepting(&current, pos - offset) {
                best = Some(found);
            }
        }

        match best {
            Some(found) => MatchOutcome::Matched(found),
            None => MatchOutcome::NoMatch { failed_at: pos },
        }
    }

    fn accepting(&self, states: &[StateId], length: usize) -> Option<LongestMatch> {
        let rules = self.accepts(states);
        (!rules.is_empty()).then_some(LongestMatch { length, rules })
    }
}

struct NfaBuilder {
    states: Vec<State>,
}

impl NfaBuilder {
    fn push(&mut self, state: State) -> StateId {
        self.states.push(state);
        self.states.len() - 1
    }

    /// Compiles `node` so that it continues at `next`, returning its entry.
    fn compile(&mut self, node: &Node, next: StateId) -> StateId {
        match node {
            Node::Empty => next,
            Node::Class(set) => self.push(State::Bytes { set: *set, next }),
            Node::Concat(nodes) => nodes
                .iter()
                .rev()
                .fold(next, |next, node| self.compile(node, next)),
            Node::Alternate(branches) => {
                let entries = branches
                    .iter()
                    .map(|branch| self.compile(branch, next))
                    .collect();
                self.push(State::Split(entries))
            }
            Node::Repeat { node, min, max } => {
                let mut tail = match max {
                    None => {
                        let hole = self.push(State::Split(Vec::new()));
                        let body = self.compile(node, hole);
                        self.states[hole] = State::Split(vec![body, next]);
                        hole
                    }
                    Some(max) => {
                        let mut tail = next;
                        for _ in *min..*max {
                            let body = self.compile(node, tail);
                            tail = self.push(State::Split(vec![body, next]));
                        }
                        tail
                    }
                };

                for _ in 0..*min {
                    tail = self.compile(node, tail);
                }
                tail
            }
        }
    }
}
