//! Integration tests for the scanner: keyword classification, source
//! locations, comments, strings, and the longest-match operator table.

use std::collections::HashSet;

use singlish_parser::lexer::{lex, Token, TokenKind};

fn keyword_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|word| word.to_string()).collect()
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|tok| tok.text.as_str()).collect()
}

#[test]
fn identifiers_and_keywords() {
    let keywords = keyword_set(&["kampung"]);
    let (tokens, diagnostics) = lex("kampung boss", &keywords);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(tokens.len(), 2);

    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[0].text, "kampung");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));

    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "boss");
    assert_eq!((tokens[1].line, tokens[1].column), (1, 9));
}

#[test]
fn ki_is_always_a_keyword() {
    let (tokens, _) = lex("ki", &HashSet::new());
    assert_eq!(tokens[0].kind, TokenKind::Keyword);
}

#[test]
fn comments_preserve_line_counts() {
    let input = "boss // hi\nkampung\n/* multi\nline */\nlagi";
    let (tokens, diagnostics) = lex(input, &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    assert_eq!(tokens[0].text, "boss");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));

    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].text, "// hi");
    assert_eq!((tokens[1].line, tokens[1].column), (1, 6));

    assert_eq!(tokens[2].text, "kampung");
    assert_eq!((tokens[2].line, tokens[2].column), (2, 1));

    assert_eq!(tokens[3].kind, TokenKind::Comment);
    assert_eq!(tokens[3].text, "/* multi\nline */");
    assert_eq!((tokens[3].line, tokens[3].column), (3, 1));

    let last = tokens.last().unwrap();
    assert_eq!(last.text, "lagi");
    assert_eq!((last.line, last.column), (5, 1));
}

#[test]
fn string_literals_keep_quotes() {
    let input = "gong(\"hi\")\ngong(`raw\ntext`)";
    let (tokens, diagnostics) = lex(input, &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let strings: Vec<&Token> = tokens
        .iter()
        .filter(|tok| tok.kind == TokenKind::String)
        .collect();
    assert_eq!(strings.len(), 2);

    assert_eq!(strings[0].text, "\"hi\"");
    assert_eq!((strings[0].line, strings[0].column), (1, 6));

    assert_eq!(strings[1].text, "`raw\ntext`");
    assert_eq!((strings[1].line, strings[1].column), (2, 6));
}

#[test]
fn escaped_quote_stays_inside_string() {
    let (tokens, diagnostics) = lex(r#""a\"b""#, &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, r#""a\"b""#);
}

#[test]
fn unterminated_string_stops_the_scan() {
    let (tokens, diagnostics) = lex("gong(\"hi\n", &HashSet::new());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unterminated string literal");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 6));
    // Nothing is produced past the opening quote.
    assert_eq!(texts(&tokens), vec!["gong", "("]);
}

#[test]
fn unterminated_block_comment_stops_the_scan() {
    let (tokens, diagnostics) = lex("a /* b", &HashSet::new());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unterminated block comment");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 3));
    assert_eq!(texts(&tokens), vec!["a"]);
}

#[test]
fn operators_use_longest_match() {
    let input = "<<= >>= &^= ... == != <= >= <- && || ++ -- += -= *= /= %= &= |= ^= << >> &^ := = + - * / % < > ! & | ^";
    let (tokens, diagnostics) = lex(input, &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let expected = vec![
        "<<=", ">>=", "&^=", "...", "==", "!=", "<=", ">=", "<-", "&&", "||", "++", "--", "+=",
        "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", ":=", "=", "+", "-", "*", "/",
        "%", "<", ">", "!", "&", "|", "^",
    ];
    assert_eq!(texts(&tokens), expected);
    assert!(tokens.iter().all(|tok| tok.kind == TokenKind::Operator));
}

#[test]
fn adjacent_operators_split_greedily() {
    let (tokens, _) = lex("a<<=b", &HashSet::new());
    assert_eq!(texts(&tokens), vec!["a", "<<=", "b"]);

    let (tokens, _) = lex("x:=-1", &HashSet::new());
    assert_eq!(texts(&tokens), vec!["x", ":=", "-", "1"]);
}

#[test]
fn number_dot_binds_only_before_digits() {
    let (tokens, _) = lex("3.14", &HashSet::new());
    assert_eq!(texts(&tokens), vec!["3.14"]);
    assert_eq!(tokens[0].kind, TokenKind::Number);

    let (tokens, _) = lex("3.foo", &HashSet::new());
    assert_eq!(texts(&tokens), vec!["3", ".", "foo"]);
    assert_eq!(tokens[1].kind, TokenKind::Punctuation);
}

#[test]
fn unexpected_character_is_skipped() {
    let (tokens, diagnostics) = lex("a @ b", &HashSet::new());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unexpected character");
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 3));
    assert_eq!(texts(&tokens), vec!["a", "b"]);
}

#[test]
fn carriage_returns_count_as_line_breaks() {
    let (tokens, diagnostics) = lex("a\r\nb\rc", &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    assert_eq!((tokens[2].line, tokens[2].column), (3, 1));
}

#[test]
fn tabs_advance_the_column_by_one() {
    let (tokens, _) = lex("\t\tx", &HashSet::new());
    assert_eq!((tokens[0].line, tokens[0].column), (1, 3));
}

#[test]
fn unicode_identifiers() {
    let (tokens, diagnostics) = lex("héllo wörld", &HashSet::new());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(texts(&tokens), vec!["héllo", "wörld"]);
    // Columns count code points, not bytes.
    assert_eq!(tokens[1].column, 7);
}
