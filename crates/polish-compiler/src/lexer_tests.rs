use crate::lexer::{TokenKind, lex, token_text};

fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for token in lex(input) {
        out.push_str(&format!(
            "{:?} {:?}\n",
            token.kind,
            token_text(input, &token)
        ));
    }
    out
}

#[test]
fn numbers_and_mnemonics() {
    insta::assert_snapshot!(snapshot("5 #H7F #Lb101 add lund end"), @r##"
    Number "5"
    PrefixedNumber "#H7F"
    PrefixedNumber "#Lb101"
    Mnemonic "add"
    Mnemonic "lund"
    Mnemonic "end"
    "##);
}

#[test]
fn symbols() {
    insta::assert_snapshot!(snapshot("+ - * / ~ . ! ?"), @r#"
    Plus "+"
    Minus "-"
    Star "*"
    Slash "/"
    Tilde "~"
    Dot "."
    Bang "!"
    Question "?"
    "#);
}

#[test]
fn labels() {
    insta::assert_snapshot!(snapshot(":loop_1 @loop_1 @"), @r#"
    LabelDef ":loop_1"
    LabelRef "@loop_1"
    LabelRef "@"
    "#);
}

#[test]
fn strings_keep_escapes() {
    let tokens = lex(r#""a b\"c" end"#);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].span, 0..8);
    assert_eq!(tokens[1].kind, TokenKind::Mnemonic);
}

#[test]
fn symbols_need_no_whitespace() {
    insta::assert_snapshot!(snapshot("5 5+.end"), @r#"
    Number "5"
    Number "5"
    Plus "+"
    Dot "."
    Mnemonic "end"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("add $$ end"), @r#"
    Mnemonic "add"
    Garbage "$$"
    Mnemonic "end"
    "#);
}

#[test]
fn garbage_at_end_of_input() {
    let tokens = lex("end $");

    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Garbage));
    assert_eq!(tokens.last().map(|t| t.span.clone()), Some(4..5));
}

#[test]
fn unterminated_string_starts_garbage() {
    let input = "end \"abc";
    let tokens = lex(input);

    assert_eq!(tokens[0].kind, TokenKind::Mnemonic);
    assert_eq!(tokens[1].kind, TokenKind::Garbage);
    assert!(token_text(input, &tokens[1]).starts_with('"'));
}
