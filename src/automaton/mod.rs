//! Compiled recognizer for a whole rule set.
//!
//! [`Automaton::build`] combines every rule's pattern into one NFA and, unless
//! configured otherwise, determinizes it. Both forms answer the same query:
//! from a start offset, how long is the longest prefix any rule accepts, and
//! which rules accept exactly that length.

pub mod dfa;
pub mod nfa;

use tracing::debug;

use crate::{config::LexerConfig, errors::errors::ErrorImpl, pattern::Node};

pub use dfa::Dfa;
pub use nfa::Nfa;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestMatch {
    pub length: usize,
    /// Every rule accepting exactly `length` bytes, ascending.
    pub rules: Vec<usize>,
}

impl LongestMatch {
    /// The lowest-index rule, which wins ties.
    pub fn winner(&self) -> usize {
        self.rules[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(LongestMatch),
    /// No rule accepts any prefix. `failed_at` is the offset of the byte the
    /// automaton could not consume, or the end of the text.
    NoMatch { failed_at: usize },
}

#[derive(Debug, Clone)]
pub enum Automaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Automaton {
    pub fn build(rules: &[Node], config: &LexerConfig) -> Result<Automaton, ErrorImpl> {
        let nfa = Nfa::build(rules);
        debug!(
            target: "rulelex::compile",
            rules = rules.len(),
            nfa_states = nfa.states().len(),
            "Built NFA"
        );

        if !config.determinize {
            return Ok(Automaton::Nfa(nfa));
        }

        let dfa = Dfa::from_nfa(&nfa, config.max_dfa_states)?;
        debug!(
            target: "rulelex::compile",
            dfa_states = dfa.state_count(),
            byte_classes = dfa.class_count(),
            "Determinized"
        );
        Ok(Automaton::Dfa(dfa))
    }

    /// Must only look at `text[offset..]`.
    pub fn longest_match_at(&self, text: &[u8], offset: usize) -> MatchOutcome {
        match self {
            Automaton::Nfa(nfa) => nfa.longest_match_at(text, offset),
            Automaton::Dfa(dfa) => dfa.longest_match_at(text, offset),
        }
    }
}
