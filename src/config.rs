//! Lexer configuration.
//!
//! ```
//! use rulelex::{Lexer, LexerConfig};
//!
//! let config = LexerConfig::default()
//!     .with_first_column(0)
//!     .with_max_dfa_states(2_000);
//!
//! let lexer = Lexer::with_config(config);
//! assert_eq!(lexer.config().first_column, 0);
//! ```

/// Default upper bound on determinized states.
pub const DEFAULT_MAX_DFA_STATES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    /// Line number of the first line of input.
    pub first_line: usize,
    /// Column number of the first byte on every line.
    pub first_column: usize,
    /// Compilation fails with `AutomatonTooLarge` past this many DFA states.
    pub max_dfa_states: usize,
    /// Scan with a DFA built at compile time. When false, scanning simulates
    /// the NFA directly and `max_dfa_states` is not consulted.
    pub determinize: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            first_line: 1,
            first_column: 1,
            max_dfa_states: DEFAULT_MAX_DFA_STATES,
            determinize: true,
        }
    }
}

impl LexerConfig {
    pub fn with_first_line(mut self, line: usize) -> Self {
        self.first_line = line;
        self
    }

    pub fn with_first_column(mut self, column: usize) -> Self {
        self.first_column = column;
        self
    }

    pub fn with_max_dfa_states(mut self, limit: usize) -> Self {
        self.max_dfa_states = limit;
        self
    }

    pub fn with_determinize(mut self, determinize: bool) -> Self {
        self.determinize = determinize;
        self
    }
}
