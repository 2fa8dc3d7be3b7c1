#![allow(clippy::uninlined_format_args)]
#![allow(dead_code)]

/// Test that \p pattern fails to parse with default flags.
pub fn test_parse_fails(pattern: &str) {
    let res = esregex::Regex::new(pattern);
    assert!(res.is_err(), "Pattern should not have parsed: {}", pattern);
}

/// Test that \p pattern fails to parse with flags.
pub fn test_parse_fails_flags(pattern: &str, flags: &str) {
    let res = esregex::Regex::with_flags(pattern, flags);
    assert!(res.is_err(), "Pattern should not have parsed: {}", pattern);
}

/// Test that \p pattern fails to parse with flags, with the given error kind.
#[track_caller]
pub fn test_1_error(pattern: &str, flags: &str, kind: esregex::ErrorKind) {
    match esregex::Regex::with_flags(pattern, flags) {
        Ok(_) => panic!("Pattern should not have parsed: {}", pattern),
        Err(err) => assert_eq!(err.kind, kind, "Wrong error for pattern {}: {}", pattern, err),
    }
}

/// Format a Match by inserting commas between all capture groups.
fn format_match(r: &esregex::Match, input: &str) -> String {
    let mut result = input[r.range()].to_string();
    for cg in r.captures.iter() {
        result.push(',');
        if let Some(cg) = cg {
            result.push_str(&input[cg.clone()])
        }
    }
    result
}

/// Encode a string as UTF16.
pub fn to_utf16(input: &str) -> Vec<u16> {
    input.encode_utf16().collect()
}

/// Given a code unit offset into \p input encoded as UTF16, return the
/// byte offset of the character containing it.
pub fn byte_offset_from_utf16(input: &str, unit: usize) -> usize {
    let mut units = 0;
    for (offset, c) in input.char_indices() {
        if units + c.len_utf16() > unit {
            return offset;
        }
        units += c.len_utf16();
    }
    input.len()
}

/// Given a range of a string encoded as UTF16, return the corresponding
/// range in the original string (UTF-8).
pub fn range_from_utf16(input: &str, r: esregex::Range) -> esregex::Range {
    byte_offset_from_utf16(input, r.start)..byte_offset_from_utf16(input, r.end)
}

pub trait StringTestHelpers {
    /// "Fluent" style helper for testing that a String is equal to a str.
    fn test_eq(&self, s: &str);
}

impl StringTestHelpers for String {
    fn test_eq(&self, rhs: &str) {
        assert_eq!(self.as_str(), rhs)
    }
}

pub trait VecTestHelpers {
    /// "Fluent" style helper for testing that a Vec<&str> is equal to a
    /// Vec<&str>.
    fn test_eq(&self, rhs: Vec<&str>);
}

impl VecTestHelpers for Vec<&str> {
    fn test_eq(&self, rhs: Vec<&str>) {
        assert_eq!(*self, rhs)
    }
}

/// A compiled regex which remembers a TestConfig.
#[derive(Debug, Clone)]
pub struct TestCompiledRegex {
    re: esregex::Regex,
    tc: TestConfig,
}

impl TestCompiledRegex {
    pub fn regex(&self) -> &esregex::Regex {
        &self.re
    }

    /// Search for self in \p input, returning a list of all matches.
    /// Ranges are byte offsets into \p input for every encoding.
    #[track_caller]
    pub fn matches(&'_ self, input: &'_ str, start: usize) -> Vec<esregex::Match> {
        match self.tc.encoding {
            Encoding::Str => self.re.find_from(input, start).collect(),
            Encoding::Utf16 => self.match_utf16(input, start),
        }
    }

    /// Encode a string as UTF16, and match against it as UTF16.
    /// 'start' is given as the byte offset into the UTF8 string.
    #[track_caller]
    pub fn match_utf16(&self, input: &str, start: usize) -> Vec<esregex::Match> {
        // convert the input and start to UTF16.
        let u16_start = input[..start].chars().map(char::len_utf16).sum();
        let u16_input = to_utf16(input);
        let mut matches: Vec<_> = self.re.find_from_utf16(&u16_input, u16_start).collect();
        // Convert any ranges back to UTF8.
        for matc in matches.iter_mut() {
            matc.range = range_from_utf16(input, matc.range());
            for r in matc.captures.iter_mut().flatten() {
                *r = range_from_utf16(input, r.clone());
            }
        }
        matches
    }

    /// Search for self in \p input, returning the first Match, or None if
    /// none.
    pub fn find(&self, input: &str) -> Option<esregex::Match> {
        self.matches(input, 0).into_iter().next()
    }

    /// Match against a string, returning the first formatted match.
    #[track_caller]
    pub fn match1f(&self, input: &str) -> String {
        match self.find(input) {
            Some(m) => format_match(&m, input),
            None => panic!("Failed to match {}", input),
        }
    }

    /// Match against a string, returning the string of the named capture group given.
    #[track_caller]
    pub fn match1_named_group(&self, input: &str, group: &str) -> String {
        match self.find(input) {
            Some(m) => match m.named_group(group) {
                Some(r) => match input.get(r.clone()) {
                    Some(str) => str.to_string(),
                    None => panic!("Cannot get range from string input {:?}", r),
                },
                None => panic!("Named capture group does not exist {}", group),
            },
            None => panic!("Failed to match {}", input),
        }
    }

    /// Match against a string, returning the match as a Vec containing None
    /// for unmatched groups, or the matched strings.
    #[track_caller]
    pub fn match1_vec<'b>(&self, input: &'b str) -> Vec<Option<&'b str>> {
        let mut result = Vec::new();
        let m: esregex::Match = self.find(input).expect("Failed to match");
        result.push(Some(&input[m.range()]));
        for cr in m.captures {
            result.push(cr.map(|r| &input[r]));
        }
        result
    }

    /// Test that matching against \p input fails.
    #[track_caller]
    pub fn test_fails(&self, input: &str) {
        assert!(self.find(input).is_none(), "Should not have matched")
    }

    /// Test that matching against \p input succeeds.
    #[track_caller]
    pub fn test_succeeds(&self, input: &str) {
        assert!(self.find(input).is_some(), "Should have matched")
    }

    /// Return a list of all non-overlapping total match ranges from a given
    /// start.
    pub fn match_all_from(&'_ self, input: &'_ str, start: usize) -> Vec<esregex::Range> {
        self.matches(input, start)
            .into_iter()
            .map(move |m| m.range())
            .collect()
    }

    /// Return a list of all non-overlapping matches.
    pub fn match_all<'b>(&self, input: &'b str) -> Vec<&'b str> {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| &input[m.range()])
            .collect()
    }

    /// Collect all matches into a String, separated by commas.
    pub fn run_global_match(&self, input: &str) -> String {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| format_match(&m, input))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// How the text is handed to the regex.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Encoding {
    Str,
    Utf16,
}

/// Description of how to test a regex.
#[derive(Debug, Copy, Clone)]
pub struct TestConfig {
    // Whether to optimize.
    optimize: bool,

    // Which entry points to use.
    encoding: Encoding,
}

impl TestConfig {
    /// Compile a pattern to a regex, with default flags.
    pub fn compile(&self, pattern: &str) -> TestCompiledRegex {
        self.compilef(pattern, "")
    }

    /// Compile a pattern to a regex, with given flags.
    #[track_caller]
    pub fn compilef(&self, pattern: &str, flags_str: &str) -> TestCompiledRegex {
        let mut flags: esregex::Flags = match flags_str.parse() {
            Ok(flags) => flags,
            Err(err) => panic!("Invalid flags {}: {}", flags_str, err),
        };
        flags.no_opt = !self.optimize;

        let re = esregex::Regex::with_options(pattern, flags);
        match re {
            Ok(re) => TestCompiledRegex { re, tc: *self },
            Err(err) => panic!(
                "Failed to parse! flags: {} pattern: {}, error: {}",
                flags_str, pattern, err
            ),
        }
    }

    /// Test that \p pattern and \p flags successfully parses, and matches
    /// \p input.
    #[track_caller]
    pub fn test_match_succeeds(&self, pattern: &str, flags_str: &str, input: &str) {
        let cr = self.compilef(pattern, flags_str);
        cr.test_succeeds(input)
    }

    /// Test that \p pattern and \p flags successfully parses, and does not
    /// match \p input.
    #[track_caller]
    pub fn test_match_fails(&self, pattern: &str, flags_str: &str, input: &str) {
        let cr = self.compilef(pattern, flags_str);
        cr.test_fails(input)
    }
}

/// Invoke \p F with each test config, in turn.
pub fn test_with_configs<F>(func: F)
where
    F: Fn(TestConfig),
{
    // Note we wish to be able to determine the TestConfig from the line number.
    func(TestConfig {
        optimize: false,
        encoding: Encoding::Str,
    });
    func(TestConfig {
        optimize: true,
        encoding: Encoding::Str,
    });
    func(TestConfig {
        optimize: false,
        encoding: Encoding::Utf16,
    });
    func(TestConfig {
        optimize: true,
        encoding: Encoding::Utf16,
    });
}
