//! Integration tests for complete rule sets.
//!
//! These tests drive whole lexers through the public API: a Graphviz DOT
//! tokenizer, a spreadsheet query-string tokenizer, several threads sharing
//! one compiled lexer, and whole-string acceptance checked against the
//! `regex` crate.

use rulelex::{
    actions, automaton::Automaton, automaton::MatchOutcome, display_error, pattern::parse_pattern,
    Lexer, LexerConfig, ScanResult, SymbolTable, Token, TokenKind,
};

const DOT_SOURCE: &str = r#"digraph {
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

/// `->` becomes `\-\>`: every byte of a literal token is escaped.
fn escape_literal(literal: &str) -> String {
    literal.chars().map(|c| format!("\\{}", c)).collect()
}

fn dot_lexer() -> (Lexer, SymbolTable) {
    let literals = ["[", "]", "{", "}", "=", ",", ";", ":", "->", "--"];
    let keywords = ["NODE", "EDGE", "GRAPH", "DIGRAPH", "SUBGRAPH", "STRICT"];

    let mut symbols = SymbolTable::from_names(["COMMENT", "ID"]);
    let mut lexer = Lexer::new();

    for literal in literals {
        let kind = symbols.intern(literal);
        lexer.add(escape_literal(literal), actions::token(kind));
    }
    for keyword in keywords {
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

    lexer.compile().unwrap();
    (lexer, symbols)
}

fn names<'a>(symbols: &'a SymbolTable, tokens: &[Token]) -> Vec<&'a str> {
    tokens
        .iter()
        .map(|token| symbols.name(token.kind).unwrap())
        .collect()
}

fn position(token: &Token) -> String {
    format!("{}", token.span)
}

#[test]
fn test_dot_graph() {
    let (lexer, symbols) = dot_lexer();
    let tokens = lexer.tokenize(DOT_SOURCE).unwrap();

    assert_eq!(tokens.len(), 55);
    assert_eq!(
        names(&symbols, &tokens[..6]),
        vec!["DIGRAPH", "{", "ID", "=", "ID", ";"]
    );
    assert_eq!(position(&tokens[0]), "1:1-1:7");
    assert_eq!(position(&tokens[1]), "1:9-1:9");
    assert_eq!(position(&tokens[2]), "2:3-2:9");

    // a [label="a" shape=box];
    let quoted = &tokens[10];
    assert_eq!(quoted.value, "a");
    assert_eq!(quoted.lexeme, br#""a""#.to_vec());
    assert_eq!(position(quoted), "3:12-3:14");

    // c [<label>=<<u>C</u>>];
    let line: Vec<_> = tokens.iter().filter(|t| t.start_line() == 4).collect();
    let values: Vec<&str> = line.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["c", "[", "label", "=", "<u>C</u>", "]", ";"]);
    assert_eq!(position(line[2]), "4:6-4:12");
    assert_eq!(position(line[4]), "4:14-4:23");
    assert_eq!(line[4].lexeme, b"<<u>C</u>>".to_vec());

    let arrows = tokens
        .iter()
        .filter(|t| symbols.name(t.kind) == Some("->"))
        .count();
    assert_eq!(arrows, 6);

    let last = tokens.last().unwrap();
    assert_eq!(symbols.name(last.kind), Some("}"));
    assert_eq!(position(last), "12:1-12:1");
}

#[test]
fn test_dot_comments_keywords_and_numbers() {
    let (lexer, symbols) = dot_lexer();
    let tokens = lexer
        .tokenize("// hi\ngraph /* x ** y */ strict 3.14 .5 42 -- n")
        .unwrap();

    assert_eq!(
        names(&symbols, &tokens),
        vec!["COMMENT", "GRAPH", "COMMENT", "STRICT", "ID", "ID", "ID", "--", "ID"]
    );
    assert_eq!(tokens[0].value, "// hi\n");
    assert_eq!(tokens[2].value, "/* x ** y */");
    assert_eq!(tokens[4].value, "3.14");
    assert_eq!(tokens[5].value, ".5");
    assert_eq!(tokens[6].value, "42");
}

#[test]
fn test_dot_escaped_string() {
    let (lexer, _) = dot_lexer();
    let tokens = lexer.tokenize(r#"x="say \"hi\"""#).unwrap();
    assert_eq!(tokens[2].value, r#"say \"hi\""#);
}

#[test]
fn test_dot_unclosed_html_literal() {
    let (lexer, _) = dot_lexer();
    let error = lexer.tokenize("a [<b<c>").unwrap_err();

    assert_eq!(error.get_error_name(), "ActionFailed");
    assert_eq!(error.get_position().offset, 3);
    assert_eq!(
        format!("{}", error.get_tip()),
        "unclosed literal starting at 3 (1:4)"
    );
}

#[test]
fn test_dot_unconsumed_input_and_recovery() {
    let (lexer, _) = dot_lexer();
    let source = "digraph {\n  a $ b\n}";
    let mut scanner = lexer.scanner(source).unwrap();

    let mut values = Vec::new();
    let mut errors = Vec::new();
    loop {
        match scanner.next_token() {
            ScanResult::Token(token) => values.push(token.value),
            ScanResult::Error(error) => {
                errors.push(error);
                scanner.advance(1);
            }
            ScanResult::EndOfInput => break,
        }
    }

    assert_eq!(values, vec!["digraph", "{", "a", "b", "}"]);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_unconsumed_input());
    assert_eq!(format!("{}", errors[0].get_position()), "2:5");

    let rendered = display_error(&errors[0], source.as_bytes(), "graph.dot");
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Error: UnconsumedInput");
    assert_eq!(lines[3], "2 | a $ b");
    assert_eq!(lines[4], "  | --^");
}

#[test]
fn test_query_string() {
    let literals = ["[", "]", "(", ")", "{", "}", "=", ",", "...", ";", ":"];
    let keywords = ["prefix_path", "to_file", "col", "cols", "row", "rows", "format", "cells"];

    let mut symbols = SymbolTable::new();
    let mut lexer = Lexer::new();

    for literal in literals {
        let kind = symbols.intern(literal);
        lexer.add(escape_literal(literal), actions::token(kind));
    }
    for keyword in keywords {
        let kind = symbols.intern(keyword.to_uppercase());
        lexer.add(keyword, actions::token(kind));
    }
    lexer.add(r"[0-9]*\:[0-9]+", actions::token(symbols.intern("RANGE")));
    lexer.add("[a-z]+[0-9]+", actions::token(symbols.intern("EXCEL_CELL")));
    lexer.add(r#""[^"]*""#, actions::quoted(symbols.intern("STRING")));
    lexer.add("[0-9]+", actions::token(symbols.intern("NUMBER")));
    lexer.add("[a-z_][a-z0-9_]*", actions::token(symbols.intern("ID")));
    lexer.add(r"\s+", actions::skip());
    lexer.compile().unwrap();

    let query = r#"cells=(a1, b2), rows=[1:7], cols=["id", "name"], prefix_path="./shared/dump.txt""#;
    let tokens = lexer.tokenize(query).unwrap();

    assert_eq!(
        names(&symbols, &tokens),
        vec![
            "CELLS", "=", "(", "EXCEL_CELL", ",", "EXCEL_CELL", ")", ",", "ROWS", "=", "[",
            "RANGE", "]", ",", "COLS", "=", "[", "STRING", ",", "STRING", "]", ",",
            "PREFIX_PATH", "=", "STRING",
        ]
    );
    assert_eq!(tokens[11].value, "1:7");
    assert_eq!(tokens.last().unwrap().value, "./shared/dump.txt");
}

#[test]
fn test_threads_share_one_lexer() {
    let (lexer, symbols) = dot_lexer();
    let expected = lexer.tokenize(DOT_SOURCE).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| lexer.tokenize(DOT_SOURCE).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    let mut scanner = lexer.scanner("a -> b").unwrap();
    let handle = std::thread::spawn(move || scanner.tokens().count());
    assert_eq!(handle.join().unwrap(), 3);
    assert_eq!(symbols.get("->"), Some(TokenKind(10)));
}

fn accepts_whole(automaton: &Automaton, input: &[u8]) -> bool {
    match automaton.longest_match_at(input, 0) {
        MatchOutcome::Matched(found) => found.length == input.len(),
        MatchOutcome::NoMatch { .. } => false,
    }
}

#[test]
fn test_acceptance_agrees_with_regex() {
    let patterns = [
        "[a-z]+",
        "a|ab|abc",
        "(ab)*c?",
        r"[0-9]*\.[0-9]+",
        r#""([^\\"]|(\\.))*""#,
        "x{2,4}",
        "x{3,}y?",
        r"\d+\s\w*",
        r"//[^\n]*\n?",
        "[^a-c]+",
        "(a|b)*a(a|b)",
        "[-a]+|[b-]",
        ".+",
    ];
    let inputs = [
        "a", "ab", "abc", "abab", "ababc", "c", "3.14", ".5", "3.", "\"q\"", "\"a\\\"b\"", "\"open",
        "x", "xx", "xxxx", "xxxxx", "xxxy", "12 ab", "12\tx_1", "12", "// c\n", "// c\nx", "def",
        "dad", "aab", "abb", "--a", "b", "a\n", "-", "\u{7f}",
    ];

    for config in [
        LexerConfig::default(),
        LexerConfig::default().with_determinize(false),
    ] {
        for pattern in patterns {
            let node = parse_pattern(pattern.as_bytes()).unwrap();
            let automaton = Automaton::build(&[node], &config).unwrap();
            let oracle = regex::bytes::Regex::new(&format!("(?-u)^(?:{})$", pattern)).unwrap();

            for input in inputs {
                assert_eq!(
                    accepts_whole(&automaton, input.as_bytes()),
                    oracle.is_match(input.as_bytes()),
                    "pattern {:?} on {:?}",
                    pattern,
                    input
                );
            }
        }
    }
}
