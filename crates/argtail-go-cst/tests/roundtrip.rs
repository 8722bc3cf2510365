// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Round-trip tests for the argtail-go-cst parser.
//!
//! These tests verify that `parse(code).to_source() == code` for valid Go.
//! Every edit the engine makes relies on this invariant.
//!
//! # Test Organization
//!
//! - Fixture-based tests: one test per file in `tests/fixtures/`
//! - Inline tests: individual snippets for specific constructs

use std::path::PathBuf;

use argtail_go_cst::{parse_source_file, prettify_error, Codegen};
use difference::assert_diff;
use itertools::Itertools;

/// Make whitespace visible in diff output.
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").replace('\t', "→").lines().join("↩\n")
}

fn assert_roundtrip(input: &str, label: &str) {
    let file = match parse_source_file(input) {
        Ok(f) => f,
        Err(e) => panic!("{}", prettify_error(&e, input, label)),
    };

    let generated = file.to_source();
    if generated != input {
        let got = visualize(&generated);
        let expected = visualize(input);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }

    // Printing is stable under its own output.
    let again = parse_source_file(&generated)
        .unwrap_or_else(|e| panic!("{}", prettify_error(&e, &generated, label)));
    assert_eq!(again.to_source(), generated);
}

fn assert_roundtrip_fixture(fixture_name: &str) {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(fixture_name);

    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture_name, e));

    assert_roundtrip(&contents, fixture_name);
}

// =============================================================================
// Fixture-based round-trip tests
// =============================================================================

#[test]
fn roundtrip_fixture_comments() {
    assert_roundtrip_fixture("comments.go");
}

#[test]
fn roundtrip_fixture_declarations() {
    assert_roundtrip_fixture("declarations.go");
}

#[test]
fn roundtrip_fixture_expressions() {
    assert_roundtrip_fixture("expressions.go");
}

#[test]
fn roundtrip_fixture_generics() {
    assert_roundtrip_fixture("generics.go");
}

#[test]
fn roundtrip_fixture_statements() {
    assert_roundtrip_fixture("statements.go");
}

#[test]
fn roundtrip_fixture_crlf() {
    let contents = "package main\r\n\r\nimport \"flag\"\r\n\r\n/* block\r\n   comment */\r\nfunc main() {\r\n\tflag.Parse() // parse\r\n}\r\n";
    assert_roundtrip(contents, "crlf.go");
}

// =============================================================================
// Inline round-trip tests
// =============================================================================

#[test]
fn roundtrip_byte_order_mark() {
    assert_roundtrip("\u{feff}package main\n\nfunc main() {}\n", "bom.go");
}

#[test]
fn roundtrip_no_trailing_newline() {
    assert_roundtrip("package main\n\nfunc main() {\n\tflag.Parse()\n}", "eof.go");
    assert_roundtrip("package main // trailing", "comment.go");
}

#[test]
fn roundtrip_odd_spacing() {
    assert_roundtrip(
        "package   main\n\nfunc  main ( )  {\n    flag . Parse ( )\n\n\n   x:=[ ]int{ 1 ,2, }\n}\n",
        "spacing.go",
    );
}

#[test]
fn roundtrip_semicolons() {
    assert_roundtrip(
        "package main; import \"flag\"; func main() { flag.Parse(); return };\n",
        "semis.go",
    );
}

#[test]
fn roundtrip_comment_positions() {
    assert_roundtrip(
        "package main\n\nfunc main() {\n\tx := 1 /* inline */ + 2\n\t/* own line */\n\tflag.Parse() /*\n\tspans lines */\n\t// last\n}\n// after\n",
        "comment_positions.go",
    );
}
