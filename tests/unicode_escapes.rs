// Work around dead code warnings: rust-lang issue #46379
pub mod common;

// Work around dead code warnings: rust-lang issue #46379
use common::*;

#[test]
fn property_escapes_invalid() {
    // From 262 test/built-ins/RegExp/property-escapes/
    test_parse_fails_flags(r#"\P{ASCII=F}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=F}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=Invalid}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=Invalid}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=N}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=N}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=No}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=No}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=T}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=T}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=Y}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=Y}"#, "u");
    test_parse_fails_flags(r#"\P{ASCII=Yes}"#, "u");
    test_parse_fails_flags(r#"\p{ASCII=Yes}"#, "u");
    test_parse_fails_flags(r#"[--\p{Hex}]"#, "u");
    test_parse_fails_flags(r#"[\uFFFF-\p{Hex}]"#, "u");
    test_parse_fails_flags(r#"[\p{Hex}-\uFFFF]"#, "u");
    test_parse_fails_flags(r#"[\p{Hex}--]"#, "u");
    test_parse_fails_flags(r#"\P{^General_Category=Letter}"#, "u");
    test_parse_fails_flags(r#"\p{^General_Category=Letter}"#, "u");
    test_parse_fails_flags(r#"[\p{}]"#, "u");
    test_parse_fails_flags(r#"[\P{}]"#, "u");
    test_parse_fails_flags(r#"\P{InAdlam}"#, "u");
    test_parse_fails_flags(r#"\p{InAdlam}"#, "u");
    test_parse_fails_flags(r#"\P{InAdlam}"#, "u");
    test_parse_fails_flags(r#"\p{InAdlam}"#, "u");
    test_parse_fails_flags(r#"\P{InScript=Adlam}"#, "u");
    test_parse_fails_flags(r#"\p{InScript=Adlam}"#, "u");
    test_parse_fails_flags(r#"[\P{invalid}]"#, "u");
    test_parse_fails_flags(r#"[\p{invalid}]"#, "u");
    test_parse_fails_flags(r#"\P{IsScript=Adlam}"#, "u");
    test_parse_fails_flags(r#"\p{IsScript=Adlam}"#, "u");
    test_parse_fails_flags(r#"\P"#, "u");
    test_parse_fails_flags(r#"\PL"#, "u");
    test_parse_fails_flags(r#"\pL"#, "u");
    test_parse_fails_flags(r#"\p"#, "u");
    test_parse_fails_flags(r#"\P{=Letter}"#, "u");
    test_parse_fails_flags(r#"\p{=Letter}"#, "u");
    test_parse_fails_flags(r#"\P{General_Category:Letter}"#, "u");
    test_parse_fails_flags(r#"\P{=}"#, "u");
    test_parse_fails_flags(r#"\p{=}"#, "u");
    test_parse_fails_flags(r#"\p{General_Category:Letter}"#, "u");
    test_parse_fails_flags(r#"\P{"#, "u");
    test_parse_fails_flags(r#"\p{"#, "u");
    test_parse_fails_flags(r#"\P}"#, "u");
    test_parse_fails_flags(r#"\p}"#, "u");
    test_parse_fails_flags(r#"\P{ General_Category=Uppercase_Letter }"#, "u");
    test_parse_fails_flags(r#"\p{ General_Category=Uppercase_Letter }"#, "u");
    test_parse_fails_flags(r#"\P{ Lowercase }"#, "u");
    test_parse_fails_flags(r#"\p{ Lowercase }"#, "u");
    test_parse_fails_flags(r#"\P{ANY}"#, "u");
    test_parse_fails_flags(r#"\p{ANY}"#, "u");
    test_parse_fails_flags(r#"\P{ASSIGNED}"#, "u");
    test_parse_fails_flags(r#"\p{ASSIGNED}"#, "u");
    test_parse_fails_flags(r#"\P{Ascii}"#, "u");
    test_parse_fails_flags(r#"\p{Ascii}"#, "u");
    test_parse_fails_flags(r#"\P{General_Category = Uppercase_Letter}"#, "u");
    test_parse_fails_flags(r#"\p{General_Category = Uppercase_Letter}"#, "u");
    test_parse_fails_flags(r#"\P{_-_lOwEr_C-A_S-E_-_}"#, "u");
    test_parse_fails_flags(r#"\p{_-_lOwEr_C-A_S-E_-_}"#, "u");
    test_parse_fails_flags(r#"\P{any}"#, "u");
    test_parse_fails_flags(r#"\p{any}"#, "u");
    test_parse_fails_flags(r#"\P{ascii}"#, "u");
    test_parse_fails_flags(r#"\p{ascii}"#, "u");
    test_parse_fails_flags(r#"\P{assigned}"#, "u");
    test_parse_fails_flags(r#"\p{assigned}"#, "u");
    test_parse_fails_flags(r#"\P{gC=uppercase_letter}"#, "u");
    test_parse_fails_flags(r#"\p{gC=uppercase_letter}"#, "u");
    test_parse_fails_flags(r#"\P{gc=uppercaseletter}"#, "u");
    test_parse_fails_flags(r#"\p{gc=uppercaseletter}"#, "u");
    test_parse_fails_flags(r#"\P{lowercase}"#, "u");
    test_parse_fails_flags(r#"\p{lowercase}"#, "u");
    test_parse_fails_flags(r#"\P{lowercase}"#, "u");
    test_parse_fails_flags(r#"\p{lowercase}"#, "u");
    test_parse_fails_flags(r#"\P{General_Category=}"#, "u");
    test_parse_fails_flags(r#"\p{General_Category=}"#, "u");
    test_parse_fails_flags(r#"\P{General_Category}"#, "u");
    test_parse_fails_flags(r#"\p{General_Category}"#, "u");
    test_parse_fails_flags(r#"\P{Script_Extensions=}"#, "u");
    test_parse_fails_flags(r#"\p{Script_Extensions=}"#, "u");
    test_parse_fails_flags(r#"\P{Script_Extensions}"#, "u");
    test_parse_fails_flags(r#"\p{Script_Extensions}"#, "u");
    test_parse_fails_flags(r#"\P{Script=}"#, "u");
    test_parse_fails_flags(r#"\p{Script=}"#, "u");
    test_parse_fails_flags(r#"\P{Script}"#, "u");
    test_parse_fails_flags(r#"\p{Script}"#, "u");
    test_parse_fails_flags(r#"\P{UnknownBinaryProperty}"#, "u");
    test_parse_fails_flags(r#"\p{UnknownBinaryProperty}"#, "u");
    test_parse_fails_flags(r#"\P{Line_Breakz=WAT}"#, "u");
    test_parse_fails_flags(r#"\p{Line_Breakz=WAT}"#, "u");
    test_parse_fails_flags(r#"\P{Line_Breakz=Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\p{Line_Breakz=Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\\P{General_Category=WAT}"#, "u");
    test_parse_fails_flags(r#"\\p{General_Category=WAT}"#, "u");
    test_parse_fails_flags(r#"\\P{Script_Extensions=H_e_h}"#, "u");
    test_parse_fails_flags(r#"\\p{Script_Extensions=H_e_h}"#, "u");
    test_parse_fails_flags(r#"\\P{Script=FooBarBazInvalid}"#, "u");
    test_parse_fails_flags(r#"\\p{Script=FooBarBazInvalid}"#, "u");
    test_parse_fails_flags(r#"\P{Composition_Exclusion}"#, "u");
    test_parse_fails_flags(r#"\p{Composition_Exclusion}"#, "u");
    test_parse_fails_flags(r#"\P{Expands_On_NFC}"#, "u");
    test_parse_fails_flags(r#"\p{Expands_On_NFC}"#, "u");
    test_parse_fails_flags(r#"\P{Expands_On_NFD}"#, "u");
    test_parse_fails_flags(r#"\p{Expands_On_NFD}"#, "u");
    test_parse_fails_flags(r#"\P{Expands_On_NFKC}"#, "u");
    test_parse_fails_flags(r#"\p{Expands_On_NFKC}"#, "u");
    test_parse_fails_flags(r#"\P{Expands_On_NFKD}"#, "u");
    test_parse_fails_flags(r#"\p{Expands_On_NFKD}"#, "u");
    test_parse_fails_flags(r#"\P{FC_NFKC_Closure}"#, "u");
    test_parse_fails_flags(r#"\p{FC_NFKC_Closure}"#, "u");
    test_parse_fails_flags(r#"\P{Full_Composition_Exclusion}"#, "u");
    test_parse_fails_flags(r#"\p{Full_Composition_Exclusion}"#, "u");
    test_parse_fails_flags(r#"\P{Grapheme_Link}"#, "u");
    test_parse_fails_flags(r#"\p{Grapheme_Link}"#, "u");
    test_parse_fails_flags(r#"\P{Hyphen}"#, "u");
    test_parse_fails_flags(r#"\p{Hyphen}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Default_Ignorable_Code_Point}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Default_Ignorable_Code_Point}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Grapheme_Extend}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Grapheme_Extend}"#, "u");
    test_parse_fails_flags(r#"\P{Other_ID_Continue}"#, "u");
    test_parse_fails_flags(r#"\p{Other_ID_Continue}"#, "u");
    test_parse_fails_flags(r#"\P{Other_ID_Start}"#, "u");
    test_parse_fails_flags(r#"\p{Other_ID_Start}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Lowercase}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Lowercase}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Math}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Math}"#, "u");
    test_parse_fails_flags(r#"\P{Other_Uppercase}"#, "u");
    test_parse_fails_flags(r#"\p{Other_Uppercase}"#, "u");
    test_parse_fails_flags(r#"\P{Prepended_Concatenation_Mark}"#, "u");
    test_parse_fails_flags(r#"\p{Prepended_Concatenation_Mark}"#, "u");
    test_parse_fails_flags(r#"\P{Block=Adlam}"#, "u");
    test_parse_fails_flags(r#"\p{Block=Adlam}"#, "u");
    test_parse_fails_flags(r#"\P{FC_NFKC_Closure}"#, "u");
    test_parse_fails_flags(r#"\p{FC_NFKC_Closure}"#, "u");
    test_parse_fails_flags(r#"\P{Line_Break=Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\P{Line_Break=Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\p{Line_Break=Alphabetic}"#, "u");
    test_parse_fails_flags(r#"\p{Line_Break}"#, "u");
}

fn build_test_string(lone_code_points: Vec<u32>, ranges: Vec<(u32, u32)>) -> String {
    let mut result = String::new();

    for code_point in lone_code_points {
        result.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    for (start, end) in ranges.iter() {
        for code_point in *start..=*end {
            result.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }

    result
}

fn run_property_escape_test(tc: TestConfig, regexes: Vec<&str>, s: String) {
    for regex in regexes {
        tc.compilef(regex, "u").test_succeeds(&s);
    }
}

#[test]
fn unicode_escape_property_script_buhid() {
    test_with_configs(unicode_escape_property_script_buhid_tc)
}

fn unicode_escape_property_script_buhid_tc(tc: TestConfig) {
    let lone_code_points = vec![];
    let ranges = vec![(0x001740, 0x001753)];
    let regexes = vec![
        r#"^\p{Script=Buhid}+$"#,
        r#"^\p{Script=Buhd}+$"#,
        r#"^\p{sc=Buhid}+$"#,
        r#"^\p{sc=Buhd}+$"#,
    ];

    run_property_escape_test(tc, regexes, build_test_string(lone_code_points, ranges));

    let lone_code_points = vec![];
    let ranges = vec![
        (0x00DC00, 0x00DFFF),
        (0x000000, 0x00173F),
        (0x001754, 0x00DBFF),
        (0x00E000, 0x10FFFF),
    ];
    let regexes = vec![
        r#"^\P{Script=Buhid}+$"#,
        r#"^\P{Script=Buhd}+$"#,
        r#"^\P{sc=Buhid}+$"#,
        r#"^\P{sc=Buhd}+$"#,
    ];

    run_property_escape_test(tc, regexes, build_test_string(lone_code_points, ranges));
}

fn property_escapes_tc(tc: TestConfig) {
    tc.compilef(r"\p{Lu}+", "u")
        .match1f("abcÀÉÎdef")
        .test_eq("ÀÉÎ");
    tc.compilef(r"\p{General_Category=Decimal_Number}+", "u")
        .match1f("x١٢٣y")
        .test_eq("١٢٣");
    tc.compilef(r"\p{gc=L}+", "u")
        .match1f("12ab\u{10400}3")
        .test_eq("ab\u{10400}");
    tc.compilef(r"\P{L}+", "u").match1f("ab12cd").test_eq("12");
    tc.compilef(r"[\p{Nd}\p{Lu}]+", "u")
        .match1f("abC4D5e")
        .test_eq("C4D5");
    tc.compilef(r"[^\p{L}]+", "u")
        .match1f("ab, cd")
        .test_eq(", ");
    tc.compilef(r"\p{White_Space}+", "u")
        .match1f("a\u{3000}\t b")
        .test_eq("\u{3000}\t ");
    tc.compilef(r"\p{Any}", "u")
        .match1f("\u{1F600}")
        .test_eq("\u{1F600}");
    tc.compilef(r"^\p{ASCII}+$", "u").test_fails("abcé");

    // Script_Extensions includes characters shared between scripts.
    tc.compilef(r"\p{scx=Deva}", "u").test_succeeds("\u{0964}");
    tc.compilef(r"\p{sc=Deva}", "u").test_fails("\u{0964}");

    // Case insensitive property escapes match the case variants of their members.
    tc.compilef(r"^\p{Lu}+$", "iu").test_succeeds("abc");
    tc.compilef(r"^\P{Ll}$", "iu").test_succeeds("a");
}

#[test]
fn property_escapes() {
    test_with_configs(property_escapes_tc)
}

#[test]
fn property_escapes_are_literal_in_legacy_mode() {
    test_with_configs(|tc| {
        tc.compile(r"\p{L}").match1f("p{L}").test_eq("p{L}");
        tc.compile(r"\P").match1f("P").test_eq("P");
    })
}
