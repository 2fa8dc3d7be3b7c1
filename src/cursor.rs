use crate::folds::CaseFold;
use crate::indexing::Utf16Input;

/// The direction the matcher moves through the input.
/// Lookbehinds match backwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline(always)]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// \return the next character, updating the position.
#[inline(always)]
pub fn next(input: &Utf16Input, dir: Direction, pos: &mut usize) -> Option<u32> {
    match dir {
        Direction::Forward => input.next_right(pos),
        Direction::Backward => input.next_left(pos),
    }
}

/// \return the next character without moving.
#[inline(always)]
pub fn peek(input: &Utf16Input, dir: Direction, pos: usize) -> Option<u32> {
    match dir {
        Direction::Forward => input.peek_right(pos),
        Direction::Backward => input.peek_left(pos),
    }
}

/// \return the position one character further in the direction.
#[inline(always)]
pub fn advance(input: &Utf16Input, dir: Direction, pos: usize) -> Option<usize> {
    match dir {
        Direction::Forward => input.next_right_pos(pos),
        Direction::Backward => input.next_left_pos(pos),
    }
}

/// \return the position one character back against the direction.
#[inline(always)]
pub fn retreat(input: &Utf16Input, dir: Direction, pos: usize) -> Option<usize> {
    match dir {
        Direction::Forward => input.next_left_pos(pos),
        Direction::Backward => input.next_right_pos(pos),
    }
}

/// \return whether we match some literal chars, given in matching order.
/// Under \p fold the chars must be canonical.
/// If so, update the position. If not, the position is unspecified.
#[inline(always)]
pub fn try_match_lit(
    input: &Utf16Input,
    dir: Direction,
    pos: &mut usize,
    chars: &[u32],
    fold: Option<CaseFold>,
) -> bool {
    for &c in chars {
        let matched = match next(input, dir, pos) {
            Some(c2) => match fold {
                None => c2 == c,
                Some(fold) => c2 == c || fold.canonicalize(c2) == c,
            },
            None => false,
        };
        if !matched {
            return false;
        }
    }
    true
}

/// \return whether the units in \p start..end appear next in the direction.
/// If so, update the position. If not, the position is unchanged.
#[inline]
pub fn subrange_eq(
    input: &Utf16Input,
    dir: Direction,
    pos: &mut usize,
    start: usize,
    end: usize,
) -> bool {
    let units = input.units();
    let len = end - start;
    let candidate = match dir {
        Direction::Forward => pos.checked_add(len).filter(|&e| e <= units.len()).map(|e| (*pos, e)),
        Direction::Backward => pos.checked_sub(len).map(|s| (s, *pos)),
    };
    match candidate {
        Some((s, e)) if units[s..e] == units[start..end] => {
            *pos = if dir.is_forward() { e } else { s };
            true
        }
        _ => false,
    }
}
