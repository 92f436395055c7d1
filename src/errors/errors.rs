use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_unconsumed_input(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnconsumedInput { .. })
    }

    /// The rule an error is attributed to, if any.
    pub fn rule(&self) -> Option<usize> {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { rule, .. }
            | ErrorImpl::ActionFailed { rule, .. }
            | ErrorImpl::ZeroLengthMatch { rule } => Some(*rule),
            _ => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::AutomatonTooLarge { .. } => "AutomatonTooLarge",
            ErrorImpl::NotCompiled => "NotCompiled",
            ErrorImpl::UnconsumedInput { .. } => "UnconsumedInput",
            ErrorImpl::ActionFailed { .. } => "ActionFailed",
            ErrorImpl::ZeroLengthMatch { .. } => "ZeroLengthMatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidPattern {
                rule,
                offset,
                reason,
            } => ErrorTip::Suggestion(format!(
                "Pattern of rule {} is malformed at byte {}: {}",
                rule, offset, reason
            )),
            ErrorImpl::AutomatonTooLarge { limit, .. } => ErrorTip::Suggestion(format!(
                "The rules determinize to more than {} states, simplify them or raise `max_dfa_states`",
                limit
            )),
            ErrorImpl::NotCompiled => ErrorTip::Suggestion(String::from(
                "Call `compile` after the last `add` and before creating a scanner",
            )),
            ErrorImpl::UnconsumedInput { .. } => ErrorTip::None,
            ErrorImpl::ActionFailed { message, .. } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::ZeroLengthMatch { rule } => ErrorTip::Suggestion(format!(
                "Rule {} matched the empty string, make its pattern consume at least one byte",
                rule
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid pattern for rule {rule} at byte {offset}: {reason}")]
    InvalidPattern {
        rule: usize,
        offset: usize,
        reason: String,
    },
    #[error("automaton needs {states} states, limit is {limit}")]
    AutomatonTooLarge { states: usize, limit: usize },
    #[error("lexer has not been compiled")]
    NotCompiled,
    #[error("unconsumed input: {text:?} (automaton failed at offset {failed_at})")]
    UnconsumedInput { text: String, failed_at: usize },
    #[error("action of rule {rule} failed: {message}")]
    ActionFailed { rule: usize, message: String },
    #[error("zero-length match of rule {rule} would not terminate")]
    ZeroLengthMatch { rule: usize },
}
