// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::{tokenize, TokError, TokType};

/// Kinds and texts, without the trailing end-of-file token.
fn kinds_and_texts(text: &str) -> Result<Vec<(TokType, String)>, TokError> {
    let mut toks = tokenize(text)?;
    assert_eq!(toks.pop().map(|t| t.kind), Some(TokType::EndOfFile));
    Ok(toks
        .into_iter()
        .map(|t| (t.kind, t.text.into_owned()))
        .collect())
}

fn reassemble(text: &str) -> String {
    tokenize(text)
        .unwrap()
        .iter()
        .map(|t| format!("{}{}", t.leading, t.text))
        .collect()
}

#[test]
fn test_identifiers_and_keywords() {
    assert_eq!(
        kinds_and_texts("package main").unwrap(),
        vec![
            (TokType::Keyword, "package".to_string()),
            (TokType::Ident, "main".to_string()),
            (TokType::Semi, String::new()),
        ]
    );
    assert_eq!(
        kinds_and_texts("_x \u{00e9}t\u{00e9}").unwrap()[1],
        (TokType::Ident, "\u{00e9}t\u{00e9}".to_string())
    );
}

#[test]
fn test_numbers() {
    let toks = kinds_and_texts("1 0x1F 1.5 .5 1e10 0x1p-2 3i 1_000 0b101 0o17").unwrap();
    let kinds: Vec<TokType> = toks
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| *k != TokType::Semi)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokType::Int,
            TokType::Int,
            TokType::Float,
            TokType::Float,
            TokType::Float,
            TokType::Float,
            TokType::Imag,
            TokType::Int,
            TokType::Int,
            TokType::Int,
        ]
    );
    assert_eq!(toks[5].1, "0x1p-2");
}

#[test]
fn test_strings_and_runes() {
    let toks = kinds_and_texts(r#"x := "a\"b" + `raw
line` + 'c' + '\''"#)
    .unwrap();
    let lits: Vec<&(TokType, String)> = toks.iter().filter(|(k, _)| k.is_literal()).collect();
    assert_eq!(lits.len(), 4);
    assert_eq!(lits[0].1, r#""a\"b""#);
    assert_eq!(lits[1].1, "`raw\nline`");
    assert_eq!(lits[2].0, TokType::Rune);
    assert_eq!(lits[3].1, r"'\''");
}

#[test]
fn test_longest_match_operators() {
    let toks = kinds_and_texts("a <<= b &^ c ... <-ch").unwrap();
    let ops: Vec<&str> = toks
        .iter()
        .filter(|(k, _)| *k == TokType::Op)
        .map(|(_, t)| t.as_str())
        .collect();
    assert_eq!(ops, vec!["<<=", "&^", "...", "<-"]);
}

#[test]
fn test_semicolon_insertion_rules() {
    let src = "a++\nreturn\nb)\nc}\nd,\ne";
    let toks = kinds_and_texts(src).unwrap();
    let semis = toks.iter().filter(|(k, _)| *k == TokType::Semi).count();
    // after `a++`, `return`, `b)`, `c}` and `e` (end of input); not after `d,`
    assert_eq!(semis, 5);
}

#[test]
fn test_virtual_semi_keeps_trailing_comment() {
    let toks = tokenize("flag.Parse() // parse\nx()").unwrap();
    let semi = toks
        .iter()
        .find(|t| t.kind == TokType::Semi)
        .expect("virtual semicolon");
    assert!(semi.is_virtual_semi());
    assert_eq!(semi.leading, " // parse");
    let x = toks.iter().find(|t| t.text == "x").unwrap();
    assert_eq!(x.leading, "\n");
}

#[test]
fn test_multiline_block_comment_acts_as_newline() {
    let toks = kinds_and_texts("a /* one\ntwo */ b").unwrap();
    assert_eq!(toks[1], (TokType::Semi, String::new()));
    let single = kinds_and_texts("a /* one */ b").unwrap();
    assert_eq!(single[1], (TokType::Ident, "b".to_string()));
}

#[test]
fn test_explicit_semicolon() {
    let toks = kinds_and_texts("a; b").unwrap();
    assert_eq!(toks[1], (TokType::Semi, ";".to_string()));
}

#[test]
fn test_round_trip_text() {
    let src = "\u{feff}// c\npackage main\n\n/* x */ func main() {\r\n\tprintln(`a`) // t\r\n}\n\n// end\n";
    assert_eq!(reassemble(src), src);
}

#[test]
fn test_crlf_line_break_follows_virtual_semi() {
    let toks = tokenize("a()\r\nb").unwrap();
    assert!(toks[3].is_virtual_semi());
    assert_eq!(toks[3].leading, "");
    assert_eq!(toks[4].leading, "\r\n");

    let toks = tokenize("a() // c\r\nb").unwrap();
    assert_eq!(toks[3].leading, " // c");
    assert_eq!(toks[4].leading, "\r\n");
}

#[test]
fn test_eof_carries_trailing_trivia() {
    let toks = tokenize("package p\n\n// bye\n").unwrap();
    let eof = toks.last().unwrap();
    assert_eq!(eof.kind, TokType::EndOfFile);
    assert_eq!(eof.leading, "\n\n// bye\n");
}

#[test]
fn test_errors() {
    assert_eq!(
        tokenize("x := \"abc").unwrap_err(),
        TokError::UnterminatedString { offset: 5 }
    );
    assert_eq!(
        tokenize("x := \"ab\nc\"").unwrap_err(),
        TokError::NewlineInString { offset: 8 }
    );
    assert_eq!(
        tokenize("x := `abc").unwrap_err(),
        TokError::UnterminatedRawString { offset: 5 }
    );
    assert_eq!(tokenize("''").unwrap_err(), TokError::EmptyRune { offset: 0 });
    assert_eq!(
        tokenize("/* open").unwrap_err(),
        TokError::UnterminatedComment { offset: 0 }
    );
    assert_eq!(
        tokenize("a @ b").unwrap_err(),
        TokError::InvalidCharacter { ch: '@', offset: 2 }
    );
}
