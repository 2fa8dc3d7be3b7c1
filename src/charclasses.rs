use crate::codepointset::Interval;
use crate::types::CharacterClassType;

// Character classes like \d or \S.

/// Construct an interval from an inclusive range of char.
const fn r(first: char, last: char) -> Interval {
    Interval {
        first: first as u32,
        last: last as u32,
    }
}

/// Construct an interval from a single char.
const fn r1(c: char) -> Interval {
    Interval {
        first: c as u32,
        last: c as u32,
    }
}

// Note all of these are sorted.

/// ES9 21.2.2.6.1.
pub const WORD_CHARS: [Interval; 4] = [r('0', '9'), r('A', 'Z'), r1('_'), r('a', 'z')];

/// Extra word characters when ignoring case in unicode mode: their simple
/// case folds are ASCII word characters.
/// U+017F LATIN SMALL LETTER LONG S and U+212A KELVIN SIGN.
pub const EXTRA_ICASE_WORD_CHARS: [Interval; 2] = [r1('\u{017F}'), r1('\u{212A}')];

/// ES9 21.2.2.12
pub const DIGITS: [Interval; 1] = [r('0', '9')];

/// ES13 12.2 White Space, plus the Space_Separator category.
pub const WHITESPACE: [Interval; 9] = [
    // <TAB>, <VT>, <FF>
    r('\u{0009}', '\u{000C}'),
    r1('\u{0020}'),
    // No-Break Space
    r1('\u{00A0}'),
    // Ogham Space Mark
    r1('\u{1680}'),
    // En Quad through Hair Space
    r('\u{2000}', '\u{200A}'),
    // Narrow No-Break Space
    r1('\u{202F}'),
    // Medium Mathematical Space
    r1('\u{205F}'),
    // Ideographic Space
    r1('\u{3000}'),
    // <ZWNBSP>
    r1('\u{FEFF}'),
];

/// ES9 11.3
pub const LINE_TERMINATOR: [Interval; 3] =
    [r1('\u{000A}'), r1('\u{000D}'), r('\u{2028}', '\u{2029}')];

fn in_intervals(ivs: &[Interval], cp: u32) -> bool {
    ivs.iter().any(|iv| iv.contains(cp))
}

/// \return whether \p cp is in the positive class \p ct, without building a set.
pub fn class_contains(ct: CharacterClassType, cp: u32, extended_words: bool) -> bool {
    match ct {
        CharacterClassType::Digits => in_intervals(&DIGITS, cp),
        CharacterClassType::Words => {
            in_intervals(&WORD_CHARS, cp)
                || (extended_words && in_intervals(&EXTRA_ICASE_WORD_CHARS, cp))
        }
        CharacterClassType::Spaces => {
            in_intervals(&WHITESPACE, cp) || in_intervals(&LINE_TERMINATOR, cp)
        }
    }
}

/// \return whether \p cp is a line terminator.
#[inline]
pub fn is_line_terminator(cp: u32) -> bool {
    cp == 0xA || cp == 0xD || cp == 0x2028 || cp == 0x2029
}
