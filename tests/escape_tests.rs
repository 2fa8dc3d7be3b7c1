#![allow(clippy::uninlined_format_args)]

pub mod common;
use common::*;

fn character_escapes_tc(tc: TestConfig) {
    tc.compile(r"\x41B\x43").match1f("ABC").test_eq("ABC");
    tc.compile(r"\t\n\v\f\r").test_succeeds("\t\n\u{b}\u{c}\r");
    tc.compile(r"\cJ").test_succeeds("\n");
    tc.compile(r"[\b]").match1f("a\u{8}b").test_eq("\u{8}");
    tc.compilef(r"\u{1F600}", "u").test_succeeds("\u{1F600}");
    tc.compilef(r"😀", "u")
        .match1f("x\u{1F600}")
        .test_eq("\u{1F600}");
    tc.compilef(r"^[😀]$", "u").test_succeeds("\u{1F600}");
    tc.compilef(r"\/\^\$\\\.\*\+\?\(\)\[\]\{\}\|", "u").test_succeeds(r"/^$\.*+?()[]{}|");
}

#[test]
fn character_escapes() {
    test_with_configs(character_escapes_tc)
}

fn legacy_escapes_tc(tc: TestConfig) {
    // Identity escapes of letters.
    tc.compile(r"\a\e\g").match1f("aeg").test_eq("aeg");
    // \c without a control letter is a backslash and a c.
    tc.compile(r"\c").match1f("x\\c").test_eq("\\c");
    tc.compile(r"\c1").match1f("\\c1").test_eq("\\c1");
    // Control letters of digits and underscore work inside classes.
    tc.compile(r"[\c1]").test_succeeds("\u{11}");
    tc.compile(r"[\c_]").test_succeeds("\u{1f}");
    // Incomplete hex and unicode escapes are literal.
    tc.compile(r"\x4").match1f("x4").test_eq("x4");
    tc.compile(r"\u12").match1f("u12").test_eq("u12");
    tc.compile(r"\u{41}").test_fails("A");
    tc.compile(r"\u{2}").match1f("uu").test_eq("uu");
    // Octal escapes, and references to groups that do not exist.
    tc.compile(r"\101").match1f("A").test_eq("A");
    tc.compile(r"\0").match1f("\0").test_eq("\0");
    tc.compile(r"(a)\2").match1f("a\u{2}").test_eq("a\u{2},a");
    tc.compile(r"\8\9").match1f("89").test_eq("89");
    // \k is an identity escape when there are no named groups.
    tc.compile(r"\k").match1f("k").test_eq("k");
    // Surrogate escapes stay separate units.
    tc.compile(r"^😀$").test_succeeds("\u{1F600}");
    tc.compile(r"^[😀]$").test_fails("\u{1F600}");
}

#[test]
fn legacy_escapes() {
    test_with_configs(legacy_escapes_tc)
}

#[test]
fn unicode_mode_rejects_legacy_escapes() {
    for pattern in [
        r"\a", r"\c", r"\c1", r"\x4", r"\u12", r"\101", r"\8", r"\k", r"\-", r"[\c_]", r"\u{110000}",
    ] {
        test_parse_fails_flags(pattern, "u");
    }
    // In a class \- is allowed, and \0 without a following digit.
    assert!(esregex::Regex::with_flags(r"[\-]", "u").is_ok());
    assert!(esregex::Regex::with_flags(r"\0", "u").is_ok());
    test_parse_fails_flags(r"\00", "u");
}
