//! Tokenizes spreadsheet selection queries such as
//! `cols=["id", "name"], rows=[1:7]`.
//!
//! Bytes no rule accepts are reported and stepped over, so one stray
//! character does not end the scan.

use rulelex::{actions, display_error, Lexer, ScanResult, SymbolTable};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUERIES: [&str; 4] = [
    r#"col=[1], row=[1]"#,
    r#"cols[0:5], rows[1:7]"#,
    r#"cells=(A1,B2), row=(1,2), cols=(A,B), rows=[1:7]"#,
    r#"block=(A1,B2), prefix_path="./shared/dump.txt" to_file=true format="json" | rows=[1:7]"#,
];

const LITERALS: [&str; 11] = ["[", "]", "(", ")", "{", "}", "=", ",", "...", ";", ":"];
const KEYWORDS: [&str; 8] = [
    "prefix_path",
    "to_file",
    "col",
    "cols",
    "row",
    "rows",
    "format",
    "cells",
];

fn build_lexer() -> Result<(Lexer, SymbolTable), rulelex::Error> {
    let mut symbols = SymbolTable::new();
    let mut lexer = Lexer::new();

    for literal in LITERALS {
        let kind = symbols.intern(literal);
        let pattern: String = literal.chars().map(|c| format!("\\{}", c)).collect();
        lexer.add(pattern, actions::token(kind));
    }
    for keyword in KEYWORDS {
        let kind = symbols.intern(keyword.to_uppercase());
        lexer.add(keyword, actions::token(kind));
    }

    lexer.add(r"[0-9]*\:[0-9]+", actions::token(symbols.intern("RANGE")));
    lexer.add("[a-z]+[0-9]+", actions::token(symbols.intern("EXCEL_CELL")));
    lexer.add(r#""[^"]*""#, actions::quoted(symbols.intern("STRING")));
    lexer.add("[0-9]+", actions::token(symbols.intern("NUMBER")));
    lexer.add("[a-z_][a-z0-9_]*", actions::token(symbols.intern("ID")));
    lexer.add(r"\s+", actions::skip());

    lexer.compile()?;
    Ok((lexer, symbols))
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env())
        .init();

    let (lexer, symbols) = match build_lexer() {
        Ok(built) => built,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    for query in QUERIES {
        let query = query.to_lowercase();
        let mut scanner = match lexer.scanner(query.as_str()) {
            Ok(scanner) => scanner,
            Err(error) => {
                eprintln!("{}", error);
                std::process::exit(1);
            }
        };

        println!("\n{}", query);
        println!("Type         | Lexeme               | Position");
        println!("-------------+----------------------+------------");

        loop {
            match scanner.next_token() {
                ScanResult::Token(token) => println!(
                    "{:<12} | {:<20} | {}",
                    symbols.name(token.kind).unwrap_or("?"),
                    String::from_utf8_lossy(&token.lexeme),
                    token.span
                ),
                ScanResult::Error(error) if error.is_unconsumed_input() => {
                    eprint!("{}", display_error(&error, query.as_bytes(), "query"));
                    scanner.advance(1);
                }
                ScanResult::Error(error) => {
                    eprint!("{}", display_error(&error, query.as_bytes(), "query"));
                    break;
                }
                ScanResult::EndOfInput => break,
            }
        }
    }
}
