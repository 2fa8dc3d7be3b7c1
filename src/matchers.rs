use crate::charclasses;
use crate::cursor;
use crate::cursor::Direction;
use crate::folds::CaseFold;
use crate::indexing::Utf16Input;
use crate::types::CharacterClassType;

/// \return whether this is a word char.
/// With \p extended, also the two non-ASCII chars which fold to word chars.
#[inline(always)]
pub fn is_word_char(c: u32, extended: bool) -> bool {
    charclasses::class_contains(CharacterClassType::Words, c, extended)
}

/// \return whether \p pos sits between a word char and a non-word char.
#[inline]
pub fn is_word_boundary(input: &Utf16Input, pos: usize, extended: bool) -> bool {
    let prev = input.peek_left(pos).is_some_and(|c| is_word_char(c, extended));
    let curr = input.peek_right(pos).is_some_and(|c| is_word_char(c, extended));
    prev != curr
}

/// Check whether the \p orig_range within \p input matches at position \p pos.
pub fn backref(
    input: &Utf16Input,
    dir: Direction,
    orig_range: std::ops::Range<usize>,
    pos: &mut usize,
) -> bool {
    cursor::subrange_eq(input, dir, pos, orig_range.start, orig_range.end)
}

pub fn backref_icase(
    input: &Utf16Input,
    dir: Direction,
    orig_range: std::ops::Range<usize>,
    pos: &mut usize,
    fold: CaseFold,
) -> bool {
    let ref_input = Utf16Input::new(input.slice(orig_range), input.unicode());
    let mut ref_pos = if dir.is_forward() {
        ref_input.left_end()
    } else {
        ref_input.right_end()
    };
    while let Some(c1) = cursor::next(&ref_input, dir, &mut ref_pos) {
        let matched = match cursor::next(input, dir, pos) {
            Some(c2) => c1 == c2 || fold.canonicalize(c1) == fold.canonicalize(c2),
            None => false,
        };
        if !matched {
            return false;
        }
    }
    true
}

/// \return whether the string \p s, in reading order, is next in the
/// direction. In a backwards match the string is read from its end.
/// If so, update the position. If not, the position is unspecified.
pub fn class_string(
    input: &Utf16Input,
    dir: Direction,
    pos: &mut usize,
    s: &[u32],
    fold: Option<CaseFold>,
) -> bool {
    let mut step = |&c: &u32| match cursor::next(input, dir, pos) {
        Some(c2) => match fold {
            None => c == c2,
            Some(fold) => c == c2 || fold.canonicalize(c) == fold.canonicalize(c2),
        },
        None => false,
    };
    if dir.is_forward() {
        s.iter().all(&mut step)
    } else {
        s.iter().rev().all(&mut step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icase_backrefs() {
        let units: Vec<u16> = "abcABC".encode_utf16().collect();
        let input = Utf16Input::new(&units, false);
        let mut pos = 3;
        assert!(backref_icase(&input, Direction::Forward, 0..3, &mut pos, CaseFold::Legacy));
        assert_eq!(pos, 6);
        let mut pos = 3;
        assert!(!backref(&input, Direction::Forward, 0..3, &mut pos));
        let mut pos = 3;
        assert!(backref_icase(&input, Direction::Backward, 3..6, &mut pos, CaseFold::Legacy));
        assert_eq!(pos, 0);
    }

    #[test]
    fn strings_never_split_pairs() {
        let units: Vec<u16> = "\u{1F600}".encode_utf16().collect();
        let input = Utf16Input::new(&units, true);
        let mut pos = 0;
        // A lone lead surrogate does not match half of a pair.
        assert!(!class_string(&input, Direction::Forward, &mut pos, &[0xD83D], None));
        let mut pos = 2;
        assert!(class_string(&input, Direction::Backward, &mut pos, &[0x1F600], None));
        assert_eq!(pos, 0);
    }

    #[test]
    fn word_boundaries() {
        let units: Vec<u16> = "a \u{017F}".encode_utf16().collect();
        let input = Utf16Input::new(&units, true);
        assert!(is_word_boundary(&input, 0, false));
        assert!(is_word_boundary(&input, 1, false));
        assert!(!is_word_boundary(&input, 3, false));
        assert!(is_word_boundary(&input, 3, true));
    }
}
