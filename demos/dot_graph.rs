//! Tokenizes a Graphviz DOT graph and prints one row per token.
//!
//! Run with `RUST_LOG=rulelex=debug` to see compilation and scanner logs.

use rulelex::{actions, display_error, Lexer, ScanResult, SymbolTable};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SOURCE: &str = r#"digraph {
  rankdir=LR;
  a [label="a" shape=box];
  c [<label>=<<u>C</u>>];
  b [label="bb"];
  a -> c;
  c -> b;
  d -> c;
  b -> a;
  b -> e;
  e -> f;
}"#;

const LITERALS: [&str; 10] = ["[", "]", "{", "}", "=", ",", ";", ":", "->", "--"];
const KEYWORDS: [&str; 6] = ["NODE", "EDGE", "GRAPH", "DIGRAPH", "SUBGRAPH", "STRICT"];

fn build_lexer() -> Result<(Lexer, SymbolTable), rulelex::Error> {
    let mut symbols = SymbolTable::from_names(["COMMENT", "ID"]);
    let mut lexer = Lexer::new();

    for literal in LITERALS {
        let kind = symbols.intern(literal);
        let pattern: String = literal.chars().map(|c| format!("\\{}", c)).collect();
        lexer.add(pattern, actions::token(kind));
    }
    for keyword in KEYWORDS {
        let kind = symbols.intern(keyword);
        lexer.add(keyword.to_lowercase(), actions::token(kind));
    }

    let comment = symbols.intern("COMMENT");
    let id = symbols.intern("ID");

    lexer.add(r"//[^\n]*\n?", actions::token(comment));
    lexer.add(
        r"/\*([^*]|\r|\n|(\*+([^*/]|\r|\n)))*\*+/",
        actions::token(comment),
    );
    lexer.add("([a-z]|[A-Z]|[0-9]|_)+", actions::token(id));
    lexer.add(r"[0-9]*\.[0-9]+", actions::token(id));
    lexer.add(r#""([^\\"]|(\\.))*""#, actions::quoted(id));
    lexer.add("( |\t|\n|\r)+", actions::skip());
    lexer.add(r"\<", actions::nested_literal(b'<', b'>', id));

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

    let mut scanner = match lexer.scanner(SOURCE) {
        Ok(scanner) => scanner,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    println!("Type     | Lexeme       | Position");
    println!("---------+--------------+------------");

    loop {
        match scanner.next_token() {
            ScanResult::Token(token) => println!(
                "{:<8} | {:<12} | {}",
                symbols.name(token.kind).unwrap_or("?"),
                String::from_utf8_lossy(&token.lexeme),
                token.span
            ),
            ScanResult::Error(error) => {
                eprint!("{}", display_error(&error, SOURCE.as_bytes(), "graph.dot"));
                std::process::exit(1);
            }
            ScanResult::EndOfInput => break,
        }
    }
}
