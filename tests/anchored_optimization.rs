use esregex::Regex;

#[test]
fn test_anchored_optimization() {
    // Test basic anchored regex
    let re = Regex::new(r"^abc").unwrap();
    assert!(re.find("abc").is_some());
    assert!(re.find("abcdef").is_some());
    assert!(re.find("xabc").is_none()); // Should not match when not at start

    // Test anchored regex with more complex pattern
    let re = Regex::new(r"^hello\s+world").unwrap();
    assert!(re.find("hello world").is_some());
    assert!(re.find("hello   world").is_some());
    assert!(re.find("  hello world").is_none());

    // Test anchored regex with capture groups
    let re = Regex::new(r"^(\w+)=(\d+)").unwrap();
    let text = "key=123 other=456";
    let m = re.find(text).unwrap();
    assert_eq!(m.group(1).map(|r| &text[r]), Some("key"));
    assert_eq!(m.group(2).map(|r| &text[r]), Some("123"));
    assert!(re.find(" key=123").is_none());
    assert_eq!(re.find_iter(text).count(), 1);
}

#[test]
fn test_anchored_from_offset() {
    // A start anchor never matches past the beginning, even when searching
    // from an offset.
    let re = Regex::new(r"^a").unwrap();
    assert_eq!(re.find_from("aaa", 1).count(), 0);
    let text: Vec<u16> = "aaa".encode_utf16().collect();
    assert!(re.exec_utf16(&text, 1, false).is_none());
}

#[test]
fn test_multiline_anchor() {
    let re = Regex::with_flags(r"^\w+", "m").unwrap();
    let text = "one\ntwo\r\nthree";
    let words: Vec<&str> = re.find_iter(text).map(|m| &text[m.range()]).collect();
    assert_eq!(words, vec!["one", "two", "three"]);

    let re = Regex::with_flags(r"^b", "m").unwrap();
    assert!(re.find("ab").is_none());
    assert_eq!(re.find("a\u{2028}b").map(|m| m.start()), Some(4));
}

#[test]
fn test_leading_literal() {
    let re = Regex::new(r"needle\d").unwrap();
    let text = "hay needle needle7 hay";
    assert_eq!(re.find(text).map(|m| m.range()), Some(11..18));

    let re = Regex::with_flags(r"cat|dog", "i").unwrap();
    let text = "Hot DOG and a CaT";
    let found: Vec<&str> = re.find_iter(text).map(|m| &text[m.range()]).collect();
    assert_eq!(found, vec!["DOG", "CaT"]);

    // A leading optional element must not hide earlier matches.
    let re = Regex::new(r"x?abc").unwrap();
    assert_eq!(re.find("zabc").map(|m| m.range()), Some(1..4));
}
