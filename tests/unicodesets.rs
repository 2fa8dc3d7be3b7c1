pub mod common;
use common::*;
use esregex::{ErrorKind, Options, ScriptCode, UnicodeData};
use std::sync::Arc;

fn test_unicode_sets_matches(tc: TestConfig, expression: &str, matches: &[&str], fails: &[&str]) {
    let re = tc.compilef(expression, "v");
    for input in matches {
        re.test_succeeds(input);
    }
    for input in fails {
        re.test_fails(input);
    }
}

/// Syntax characters must be escaped in classes in unicode-sets mode.
#[test]
fn unicode_sets_breaking_change_from_u_to_v() {
    for pattern in [
        r"[(]", r"[)]", r"[[]", r"[{]", r"[}]", r"[/]", r"[-]", r"[|]", r"[&&]", r"[!!]",
        r"[##]", r"[$$]", r"[%%]", r"[**]", r"[++]", r"[,,]", r"[..]", r"[::]", r"[;;]",
        r"[<<]", r"[==]", r"[>>]", r"[??]", r"[@@]", r"[``]", r"[~~]", r"[^^^]", r"[_^^]",
    ] {
        test_parse_fails_flags(pattern, "v");
    }
    // All of these are fine in unicode mode.
    for pattern in [r"[(]", r"[)]", r"[{]", r"[}]", r"[/]", r"[-]", r"[|]", r"[&&]"] {
        assert!(esregex::Regex::with_flags(pattern, "u").is_ok());
    }
}

#[test]
fn unicode_sets_character_difference_character_property_escape() {
    const EXPRESSION: &str = "^[_--\\p{ASCII_Hex_Digit}]+$";
    const MATCHES: &[&str] = &["_"];
    const FAILS: &[&str] = &[
        "6\u{FE0F}\u{20E3}",
        "7",
        "9\u{FE0F}\u{20E3}",
        "C",
        "\u{2603}",
        "\u{1D306}",
        "\u{1F1E7}\u{1F1EA}",
    ];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_string_literal_intersection_character() {
    const EXPRESSION: &str = "^[\\q{0|2|4|9\u{FE0F}\u{20E3}}&&_]+$";
    const MATCHES: &[&str] = &[];
    const FAILS: &[&str] = &[
        "0",
        "2",
        "4",
        "6\u{FE0F}\u{20E3}",
        "7",
        "9\u{FE0F}\u{20E3}",
        "C",
        "\u{2603}",
        "\u{1D306}",
        "\u{1F1E7}\u{1F1EA}",
    ];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_character_class_escape_difference_character_property_escape() {
    const EXPRESSION: &str = "^[\\d--\\p{ASCII_Hex_Digit}]+$";
    const MATCHES: &[&str] = &[];
    const FAILS: &[&str] = &["0", "1", "2", "3", "9", "C", "\u{2603}"];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_character_property_escape_difference_string_literal() {
    const EXPRESSION: &str = "^[\\p{ASCII_Hex_Digit}--\\q{0|2|4|9\u{FE0F}\u{20E3}}]+$";
    const MATCHES: &[&str] = &["1", "3", "5", "7", "8", "9", "A", "F", "a", "f", "1357"];
    const FAILS: &[&str] = &[
        "0",
        "2",
        "4",
        "9\u{FE0F}\u{20E3}",
        "G",
        "\u{2603}",
        "\u{1F1E7}\u{1F1EA}",
    ];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_string_literal_difference_character_class_escape() {
    const EXPRESSION: &str = "^[\\q{0|2|4|9\u{FE0F}\u{20E3}}--\\d]+$";
    const MATCHES: &[&str] = &["9\u{FE0F}\u{20E3}"];
    const FAILS: &[&str] = &["0", "2", "4", "6\u{FE0F}\u{20E3}", "7", "C"];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_character_class_union_string_literal() {
    const EXPRESSION: &str = "^[[0-9]\\q{0|2|4|9\u{FE0F}\u{20E3}}]+$";
    const MATCHES: &[&str] = &[
        "0",
        "4",
        "9\u{FE0F}\u{20E3}",
        "9",
        "29\u{FE0F}\u{20E3}4",
    ];
    const FAILS: &[&str] = &["6\u{FE0F}\u{20E3}", "C", "\u{2603}", "\u{1F1E7}\u{1F1EA}"];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_character_class_escape_intersection_character_class() {
    const EXPRESSION: &str = "^[\\w&&[0-9a-f]]+$";
    const MATCHES: &[&str] = &["0", "9", "a", "f", "cafe"];
    const FAILS: &[&str] = &["_", "g", "A", "\u{2603}"];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

#[test]
fn unicode_sets_properties_of_strings() {
    const KEYCAPS: &str = "^\\p{Emoji_Keycap_Sequence}+$";
    test_with_configs(|tc| {
        test_unicode_sets_matches(
            tc,
            KEYCAPS,
            &["9\u{FE0F}\u{20E3}", "#\u{FE0F}\u{20E3}*\u{FE0F}\u{20E3}"],
            &["9", "9\u{FE0F}", "\u{20E3}"],
        )
    });

    const FLAGS: &str = "^[\\p{RGI_Emoji_Flag_Sequence}]$";
    test_with_configs(|tc| {
        test_unicode_sets_matches(
            tc,
            FLAGS,
            &["\u{1F1E7}\u{1F1EA}", "\u{1F1FA}\u{1F1F8}"],
            &["\u{1F1E7}", "BE"],
        )
    });

    const TAGS: &str = "^\\p{RGI_Emoji_Tag_Sequence}$";
    test_with_configs(|tc| {
        test_unicode_sets_matches(
            tc,
            TAGS,
            &["\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}"],
            &["\u{1F3F4}"],
        )
    });

    test_1_error(r"\P{RGI_Emoji}", "v", ErrorKind::InvalidPropertyOfStrings);
    test_1_error(r"[^\p{RGI_Emoji_Flag_Sequence}]", "v", ErrorKind::InvalidClass);
    test_1_error(r"\p{Basic_Emoji}", "u", ErrorKind::InvalidPropertyOfStrings);
}

fn rgi_emoji_tc(tc: TestConfig) {
    let re = tc.compilef(r"^\p{RGI_Emoji_Flag_Sequence}$", "v");
    // Luxembourg, Japan, Kenya, the United Nations
    for flag in [
        "\u{1F1F1}\u{1F1FA}",
        "\u{1F1EF}\u{1F1F5}",
        "\u{1F1F0}\u{1F1EA}",
        "\u{1F1FA}\u{1F1F3}",
    ] {
        re.test_succeeds(flag);
    }
    re.test_fails("\u{1F1E6}\u{1F1E6}");
    re.test_fails("\u{1F1F1}");

    let re = tc.compilef(r"^\p{RGI_Emoji}+$", "v");
    // Scotland, a keycap, a family and a technologist with a skin tone.
    re.test_succeeds("\u{1F3F4}\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}");
    re.test_succeeds("7\u{FE0F}\u{20E3}");
    re.test_succeeds("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}");
    re.test_succeeds("\u{1F9D1}\u{1F3FD}\u{200D}\u{1F4BB}\u{1F1F1}\u{1F1FA}");
    re.test_fails("7");
    re.test_fails("\u{1F468}\u{200D}");
    tc.compilef(r"\p{RGI_Emoji}", "v")
        .match1f("a\u{1F469}\u{200D}\u{1F52C}b")
        .test_eq("\u{1F469}\u{200D}\u{1F52C}");
}

#[test]
fn rgi_emoji() {
    test_with_configs(rgi_emoji_tc)
}

/// 262 test/built-ins/RegExp/unicodeSets/generated/rgi-emoji-13.1.js
#[test]
fn unicode_sets_rgi_emoji_13_1() {
    const EXPRESSION: &str = "^\\p{RGI_Emoji}+$";
    const MATCHES: &[&str] = &[
        "\u{2764}\u{FE0F}\u{200D}\u{1F525}",
        "\u{2764}\u{FE0F}\u{200D}\u{1FA79}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F468}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FB}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FC}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FD}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FE}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F468}\u{1F3FF}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FB}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FC}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FD}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FE}",
        "\u{1F469}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F469}\u{1F3FF}",
        "\u{1F48F}\u{1F3FB}",
        "\u{1F48F}\u{1F3FC}",
        "\u{1F48F}\u{1F3FD}",
        "\u{1F48F}\u{1F3FE}",
        "\u{1F48F}\u{1F3FF}",
        "\u{1F491}\u{1F3FB}",
        "\u{1F491}\u{1F3FC}",
        "\u{1F491}\u{1F3FD}",
        "\u{1F491}\u{1F3FE}",
        "\u{1F491}\u{1F3FF}",
        "\u{1F62E}\u{200D}\u{1F4A8}",
        "\u{1F635}\u{200D}\u{1F4AB}",
        "\u{1F636}\u{200D}\u{1F32B}\u{FE0F}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FB}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FD}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FF}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F48B}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FB}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FC}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FD}",
        "\u{1F9D1}\u{1F3FF}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F9D1}\u{1F3FE}",
        "\u{1F9D4}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{200D}\u{2642}\u{FE0F}",
        "\u{1F9D4}\u{1F3FB}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{1F3FB}\u{200D}\u{2642}\u{FE0F}",
        "\u{1F9D4}\u{1F3FC}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{1F3FC}\u{200D}\u{2642}\u{FE0F}",
        "\u{1F9D4}\u{1F3FD}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{1F3FD}\u{200D}\u{2642}\u{FE0F}",
        "\u{1F9D4}\u{1F3FE}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{1F3FE}\u{200D}\u{2642}\u{FE0F}",
        "\u{1F9D4}\u{1F3FF}\u{200D}\u{2640}\u{FE0F}",
        "\u{1F9D4}\u{1F3FF}\u{200D}\u{2642}\u{FE0F}",
    ];
    const FAILS: &[&str] = &[];

    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

/// 262 test/built-ins/RegExp/unicodeSets/generated/rgi-emoji-14.0.js
#[test]
fn unicode_sets_rgi_emoji_14_0() {
    const EXPRESSION: &str = "^\\p{RGI_Emoji}+$";
    const MATCHES: &[&str] = &[
        "\u{1F6DD}",
        "\u{1F6DE}",
        "\u{1F6DF}",
        "\u{1F7F0}",
        "\u{1F91D}\u{1F3FB}",
        "\u{1F91D}\u{1F3FC}",
        "\u{1F91D}\u{1F3FD}",
        "\u{1F91D}\u{1F3FE}",
        "\u{1F91D}\u{1F3FF}",
        "\u{1F979}",
        "\u{1F9CC}",
        "\u{1FA7B}",
        "\u{1FA7C}",
        "\u{1FAA9}",
        "\u{1FAAA}",
        "\u{1FAAB}",
        "\u{1FAAC}",
        "\u{1FAB7}",
        "\u{1FAB8}",
        "\u{1FAB9}",
        "\u{1FABA}",
        "\u{1FAC3}",
        "\u{1FAC3}\u{1F3FB}",
        "\u{1FAC3}\u{1F3FC}",
        "\u{1FAC3}\u{1F3FD}",
        "\u{1FAC3}\u{1F3FE}",
        "\u{1FAC3}\u{1F3FF}",
        "\u{1FAC4}",
        "\u{1FAC4}\u{1F3FB}",
        "\u{1FAC4}\u{1F3FC}",
        "\u{1FAC4}\u{1F3FD}",
        "\u{1FAC4}\u{1F3FE}",
        "\u{1FAC4}\u{1F3FF}",
        "\u{1FAC5}",
        "\u{1FAC5}\u{1F3FB}",
        "\u{1FAC5}\u{1F3FC}",
        "\u{1FAC5}\u{1F3FD}",
        "\u{1FAC5}\u{1F3FE}",
        "\u{1FAC5}\u{1F3FF}",
        "\u{1FAD7}",
        "\u{1FAD8}",
        "\u{1FAD9}",
        "\u{1FAE0}",
        "\u{1FAE1}",
        "\u{1FAE2}",
        "\u{1FAE3}",
        "\u{1FAE4}",
        "\u{1FAE5}",
        "\u{1FAE6}",
        "\u{1FAE7}",
        "\u{1FAF0}",
        "\u{1FAF0}\u{1F3FB}",
        "\u{1FAF0}\u{1F3FC}",
        "\u{1FAF0}\u{1F3FD}",
        "\u{1FAF0}\u{1F3FE}",
        "\u{1FAF0}\u{1F3FF}",
        "\u{1FAF1}",
        "\u{1FAF1}\u{1F3FB}",
        "\u{1FAF1}\u{1F3FB}\u{200D}\u{1FAF2}\u{1F3FC}",
        "\u{1FAF1}\u{1F3FB}\u{200D}\u{1FAF2}\u{1F3FD}",
        "\u{1FAF1}\u{1F3FB}\u{200D}\u{1FAF2}\u{1F3FE}",
        "\u{1FAF1}\u{1F3FB}\u{200D}\u{1FAF2}\u{1F3FF}",
        "\u{1FAF1}\u{1F3FC}",
        "\u{1FAF1}\u{1F3FC}\u{200D}\u{1FAF2}\u{1F3FB}",
        "\u{1FAF1}\u{1F3FC}\u{200D}\u{1FAF2}\u{1F3FD}",
        "\u{1FAF1}\u{1F3FC}\u{200D}\u{1FAF2}\u{1F3FE}",
        "\u{1FAF1}\u{1F3FC}\u{200D}\u{1FAF2}\u{1F3FF}",
        "\u{1FAF1}\u{1F3FD}",
        "\u{1FAF1}\u{1F3FD}\u{200D}\u{1FAF2}\u{1F3FB}",
        "\u{1FAF1}\u{1F3FD}\u{200D}\u{1FAF2}\u{1F3FC}",
        "\u{1FAF1}\u{1F3FD}\u{200D}\u{1FAF2}\u{1F3FE}",
        "\u{1FAF1}\u{1F3FD}\u{200D}\u{1FAF2}\u{1F3FF}",
        "\u{1FAF1}\u{1F3FE}",
        "\u{1FAF1}\u{1F3FE}\u{200D}\u{1FAF2}\u{1F3FB}",
        "\u{1FAF1}\u{1F3FE}\u{200D}\u{1FAF2}\u{1F3FC}",
        "\u{1FAF1}\u{1F3FE}\u{200D}\u{1FAF2}\u{1F3FD}",
        "\u{1FAF1}\u{1F3FE}\u{200D}\u{1FAF2}\u{1F3FF}",
        "\u{1FAF1}\u{1F3FF}",
        "\u{1FAF1}\u{1F3FF}\u{200D}\u{1FAF2}\u{1F3FB}",
        "\u{1FAF1}\u{1F3FF}\u{200D}\u{1FAF2}\u{1F3FC}",
        "\u{1FAF1}\u{1F3FF}\u{200D}\u{1FAF2}\u{1F3FD}",
        "\u{1FAF1}\u{1F3FF}\u{200D}\u{1FAF2}\u{1F3FE}",
        "\u{1FAF2}",
        "\u{1FAF2}\u{1F3FB}",
        "\u{1FAF2}\u{1F3FC}",
        "\u{1FAF2}\u{1F3FD}",
        "\u{1FAF2}\u{1F3FE}",
        "\u{1FAF2}\u{1F3FF}",
        "\u{1FAF3}",
        "\u{1FAF3}\u{1F3FB}",
        "\u{1FAF3}\u{1F3FC}",
        "\u{1FAF3}\u{1F3FD}",
        "\u{1FAF3}\u{1F3FE}",
        "\u{1FAF3}\u{1F3FF}",
        "\u{1FAF4}",
        "\u{1FAF4}\u{1F3FB}",
        "\u{1FAF4}\u{1F3FC}",
        "\u{1FAF4}\u{1F3FD}",
        "\u{1FAF4}\u{1F3FE}",
        "\u{1FAF4}\u{1F3FF}",
        "\u{1FAF5}",
        "\u{1FAF5}\u{1F3FB}",
        "\u{1FAF5}\u{1F3FC}",
        "\u{1FAF5}\u{1F3FD}",
        "\u{1FAF5}\u{1F3FE}",
        "\u{1FAF5}\u{1F3FF}",
        "\u{1FAF6}",
        "\u{1FAF6}\u{1F3FB}",
        "\u{1FAF6}\u{1F3FC}",
        "\u{1FAF6}\u{1F3FD}",
        "\u{1FAF6}\u{1F3FE}",
        "\u{1FAF6}\u{1F3FF}",
    ];
    const FAILS: &[&str] = &[];
    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

/// 262 test/built-ins/RegExp/unicodeSets/generated/rgi-emoji-15.0.js
#[test]
fn unicode_sets_rgi_emoji_15_0() {
    const EXPRESSION: &str = "^\\p{RGI_Emoji}+$";
    const MATCHES: &[&str] = &[
        "\u{1F426}\u{200D}\u{2B1B}",
        "\u{1F6DC}",
        "\u{1FA75}",
        "\u{1FA76}",
        "\u{1FA77}",
        "\u{1FA87}",
        "\u{1FA88}",
        "\u{1FAAD}",
        "\u{1FAAE}",
        "\u{1FAAF}",
        "\u{1FABB}",
        "\u{1FABC}",
        "\u{1FABD}",
        "\u{1FABF}",
        "\u{1FACE}",
        "\u{1FACF}",
        "\u{1FADA}",
        "\u{1FADB}",
        "\u{1FAE8}",
        "\u{1FAF7}",
        "\u{1FAF7}\u{1F3FB}",
        "\u{1FAF7}\u{1F3FC}",
        "\u{1FAF7}\u{1F3FD}",
        "\u{1FAF7}\u{1F3FE}",
        "\u{1FAF7}\u{1F3FF}",
        "\u{1FAF8}",
        "\u{1FAF8}\u{1F3FB}",
        "\u{1FAF8}\u{1F3FC}",
        "\u{1FAF8}\u{1F3FD}",
        "\u{1FAF8}\u{1F3FE}",
        "\u{1FAF8}\u{1F3FF}",
    ];
    const FAILS: &[&str] = &[];
    test_with_configs(|tc| test_unicode_sets_matches(tc, EXPRESSION, MATCHES, FAILS));
}

fn folded_class_strings_tc(tc: TestConfig) {
    tc.test_match_fails(r"^[\q{KK}--\q{kk}]$", "vi", "KK");
    tc.test_match_fails(r"^[\q{KK}--\q{kk}]$", "vi", "kk");
    tc.test_match_succeeds(r"^[\q{KK}--\q{kk}]$", "v", "KK");
    tc.test_match_succeeds(r"^[\q{KK|LM}--\q{kk}]$", "vi", "lm");
    tc.test_match_succeeds(r"^[\q{KK|LM}&&\q{kK}]$", "vi", "kk");
    tc.test_match_fails(r"^[\q{KK|LM}&&\q{kK}]$", "vi", "LM");
}

#[test]
fn folded_class_strings() {
    test_with_configs(folded_class_strings_tc)
}

fn class_strings_tc(tc: TestConfig) {
    // Longer strings are tried first.
    tc.compilef(r"[\q{a|ab|abc}]", "v")
        .match1f("abcd")
        .test_eq("abc");
    tc.compilef(r"^[\q{a|ab|abc}]c$", "v")
        .match1f("abc")
        .test_eq("abc");
    tc.compilef(r"[\q{a|ab|abc}]d", "v")
        .match1f("abd")
        .test_eq("abd");
    // A single code point before the empty string.
    tc.compilef(r"^[\q{}a]b$", "v").test_succeeds("b");
    tc.compilef(r"^[\q{}a]b$", "v").test_succeeds("ab");
    tc.compilef(r"[\q{}]", "v").match1f("xyz").test_eq("");

    tc.compilef(r"(?<=[\q{ab|b}])c", "v")
        .match1f("abc")
        .test_eq("c");
    tc.compilef(r"[\q{ab|cd}]+", "v")
        .match1f("xabcdab")
        .test_eq("abcdab");

    tc.test_match_fails(r"^[a&&[\q{abc}ab]]$", "v", "b");
    tc.test_match_succeeds(r"^[a&&[\q{abc}ab]]$", "v", "a");
    tc.test_match_succeeds(r"^[[\q{a|b}]&&[\q{abc}ab]]$", "v", "a");
    tc.test_match_succeeds(r"^[[\q{a|b}]&&[\q{abc}ab]]$", "v", "b");
    tc.test_match_fails(r"^[[\q{a|b}]&&[\q{abc}ab]]$", "v", "abc");
    tc.test_match_succeeds(r"^[[0-9]&&\q{0|2|4}]$", "v", "0");
    tc.test_match_succeeds(r"^[[0-9]&&\q{0|2|4}]$", "v", "2");
    tc.test_match_succeeds(r"^[[0-9]&&\q{0|2|4}]$", "v", "4");
    tc.test_match_fails(r"^[[0-9]&&\q{0|2|4}]$", "v", "3");
}

#[test]
fn class_strings() {
    test_with_configs(class_strings_tc)
}

fn nested_classes_tc(tc: TestConfig) {
    tc.compilef(r"[[a-z]--[aeiou]]+", "v")
        .match1f("audio track")
        .test_eq("d");
    tc.compilef(r"[^\d--[13579]]", "v")
        .match1f("2468135")
        .test_eq("1");
    tc.compilef(r"[[a-c][x-z]]+", "v")
        .match1f("dabzxq")
        .test_eq("abzx");
    tc.compilef(r"[\p{L}--\p{Ll}]+", "v")
        .match1f("abcDEFghi")
        .test_eq("DEF");
    tc.compilef(r"[\p{Script=Greek}&&\p{Lu}]", "v")
        .match1f("αβΓδ")
        .test_eq("Γ");
}

#[test]
fn nested_classes() {
    test_with_configs(nested_classes_tc)
}

/// A provider with one script, "Toy", for the letters a through f, and one
/// property of strings.
#[derive(Debug)]
struct ToyData;

const TOY: ScriptCode = 1;

impl UnicodeData for ToyData {
    fn script_from_name(&self, name: &str) -> Option<ScriptCode> {
        (name == "Toy").then_some(TOY)
    }

    fn script_of(&self, cp: u32) -> ScriptCode {
        if ('a' as u32..='f' as u32).contains(&cp) {
            TOY
        } else {
            0
        }
    }

    fn script_extensions(&self, cp: u32) -> Vec<ScriptCode> {
        vec![self.script_of(cp)]
    }

    fn string_property_sequences(&self, name: &str) -> Option<Vec<Vec<u32>>> {
        (name == "Basic_Emoji").then(|| vec![vec!['x' as u32, 'y' as u32], vec!['z' as u32]])
    }
}

#[test]
fn custom_unicode_data() {
    let options = || Options {
        flags: "v".parse().unwrap(),
        unicode_data: Arc::new(ToyData),
        ..Default::default()
    };
    let re = esregex::Regex::with_options(r"\p{Script=Toy}+", options()).unwrap();
    let text = "xxabcfg";
    assert_eq!(&text[re.find(text).unwrap().range()], "abcf");

    let re = esregex::Regex::with_options(r"[\p{scx=Toy}--[ab]]+", options()).unwrap();
    assert_eq!(re.find(text).unwrap().range(), 4..6);

    let re = esregex::Regex::with_options(r"^[\p{Basic_Emoji}]+$", options()).unwrap();
    assert!(re.find("xyzxy").is_some());
    assert!(re.find("y").is_none());

    let err = esregex::Regex::with_options(r"\p{Script=Greek}", options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownUnicodeProperty);
}
