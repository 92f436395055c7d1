//! Utility macros for building tokens and actions.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates an action emitting the matched bytes as a token

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$lexeme` - The bytes the token consumed
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(kind, "42".to_string(), b"42".to_vec(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $lexeme:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Creates an action that emits every match of its rule as a token of the
/// given kind, with the matched text as its value.
///
/// # Example
///
/// ```
/// use rulelex::{Lexer, TokenKind, MK_DEFAULT_HANDLER};
///
/// let mut lexer = Lexer::new();
/// lexer.add(r"\+", MK_DEFAULT_HANDLER!(TokenKind(0)));
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {{
        let kind: $crate::lexer::tokens::TokenKind = $kind;
        $crate::lexer::actions::Action::emit(move |m: &$crate::lexer::tokens::Match| m.token(kind))
    }};
}
