//! Single character matchers, which loops with one-char bodies run in a
//! tight inner loop.

use crate::charclasses::is_line_terminator;
use crate::charset;
use crate::cursor;
use crate::cursor::Direction;
use crate::folds::CaseFold;
use crate::indexing::Utf16Input;
use crate::unicodedata::UnicodeData;

/// A trait for things that match a single character.
pub trait SingleCharMatcher {
    /// \return whether we match the character at the given position, advancing
    /// the position if so. On a false return, the position is unspecified.
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool;
}

/// Insn::Char
pub struct Char {
    pub c: u32,
}

impl SingleCharMatcher for Char {
    #[inline(always)]
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool {
        cursor::next(input, dir, pos) == Some(self.c)
    }
}

/// Insn::CharICase
pub struct CharICase {
    pub c: u32,
    pub fold: CaseFold,
}

impl SingleCharMatcher for CharICase {
    #[inline(always)]
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool {
        match cursor::next(input, dir, pos) {
            Some(c2) => c2 == self.c || self.fold.canonicalize(c2) == self.c,
            None => false,
        }
    }
}

/// Insn::Class
pub struct Class<'a> {
    pub set: &'a charset::CharSet,
    pub data: &'a dyn UnicodeData,
}

impl SingleCharMatcher for Class<'_> {
    #[inline(always)]
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool {
        match cursor::next(input, dir, pos) {
            Some(c) => self.set.contains(c, self.data),
            None => false,
        }
    }
}

/// Insn::MatchAny
pub struct MatchAny;

impl SingleCharMatcher for MatchAny {
    #[inline(always)]
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool {
        // If there is a character, it counts as a match.
        cursor::next(input, dir, pos).is_some()
    }
}

/// Insn::MatchAnyExceptLineTerminator
pub struct MatchAnyExceptLineTerminator;

impl SingleCharMatcher for MatchAnyExceptLineTerminator {
    #[inline(always)]
    fn matches(&self, input: &Utf16Input, dir: Direction, pos: &mut usize) -> bool {
        match cursor::next(input, dir, pos) {
            Some(c2) => !is_line_terminator(c2),
            None => false,
        }
    }
}
