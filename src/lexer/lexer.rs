use std::sync::Arc;

use tracing::debug;

use crate::{
    automaton::Automaton,
    config::LexerConfig,
    errors::errors::{Error, ErrorImpl},
    pattern::{parse_pattern, Node},
    Position,
};

use super::{actions::Action, scanner::Scanner, tokens::Token};

/// One registered rule. `index` is its registration order and its priority:
/// among matches of equal length the lowest index wins.
#[derive(Debug, Clone)]
pub struct Rule {
    pub index: usize,
    pub pattern: Vec<u8>,
    pub action: Action,
}

/// The read-only result of [`Lexer::compile`], shared by every scanner.
#[derive(Debug)]
pub struct CompiledLexer {
    pub(crate) automaton: Automaton,
    pub(crate) actions: Vec<Action>,
    pub(crate) first_line: usize,
    pub(crate) first_column: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Lexer {
    rules: Vec<Rule>,
    config: LexerConfig,
    compiled: Option<Arc<CompiledLexer>>,
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer::with_config(LexerConfig::default())
    }

    pub fn with_config(config: LexerConfig) -> Lexer {
        Lexer {
            rules: Vec::new(),
            config,
            compiled: None,
        }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Registers a rule after all existing ones. Invalidates any previous
    /// compilation.
    pub fn add(&mut self, pattern: impl AsRef<[u8]>, action: Action) {
        self.rules.push(Rule {
            index: self.rules.len(),
            pattern: pattern.as_ref().to_vec(),
            action,
        });
        self.compiled = None;
    }

    /// Parses every pattern and builds the shared automaton. The first
    /// malformed pattern fails the whole compilation.
    pub fn compile(&mut self) -> Result<(), Error> {
        let nodes = self
            .rules
            .iter()
            .map(|rule| {
                parse_pattern(&rule.pattern).map_err(|e| {
                    Error::new(
                        ErrorImpl::InvalidPattern {
                            rule: rule.index,
                            offset: e.offset,
                            reason: e.reason,
                        },
                        Position::null(),
                    )
                })
            })
            .collect::<Result<Vec<Node>, Error>>()?;

        for (rule, node) in self.rules.iter().zip(&nodes) {
            if node.matches_empty() && !rule.action.is_custom() {
                debug!(
                    target: "rulelex::compile",
                    rule = rule.index,
                    "Pattern accepts the empty string"
                );
            }
        }

        let automaton =
            Automaton::build(&nodes, &self.config).map_err(|e| Error::new(e, Position::null()))?;

        self.compiled = Some(Arc::new(CompiledLexer {
            automaton,
            actions: self.rules.iter().map(|rule| rule.action.clone()).collect(),
            first_line: self.config.first_line,
            first_column: self.config.first_column,
        }));

        debug!(target: "rulelex::compile", rules = self.rules.len(), "Compiled lexer");
        Ok(())
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Starts a scan over `input`. Fails with `NotCompiled` unless `compile`
    /// succeeded after the last `add`.
    pub fn scanner(&self, input: impl Into<Vec<u8>>) -> Result<Scanner, Error> {
        let compiled = self
            .compiled
            .as_ref()
            .ok_or_else(|| Error::new(ErrorImpl::NotCompiled, Position::null()))?;

        Ok(Scanner::new(Arc::clone(compiled), input.into()))
    }

    /// Scans `input` to the end, failing on the first error.
    pub fn tokenize(&self, input: impl Into<Vec<u8>>) -> Result<Vec<Token>, Error> {
        let mut scanner = self.scanner(input)?;
        scanner.tokens().collect()
    }
}
