//! Positions and characters in UTF-16 input.

use crate::util::{combine_surrogates, is_lead_surrogate, is_trail_surrogate};
use core::ops;

/// A helper type that holds UTF-16 text and allows indexing into it.
/// Positions are code unit indexes. In unicode mode a surrogate pair reads
/// as one character; otherwise every unit is a character.
#[derive(Debug, Copy, Clone)]
pub struct Utf16Input<'a> {
    units: &'a [u16],
    unicode: bool,
}

impl<'a> Utf16Input<'a> {
    pub fn new(units: &'a [u16], unicode: bool) -> Self {
        Self { units, unicode }
    }

    #[inline(always)]
    pub fn units(&self) -> &'a [u16] {
        self.units
    }

    #[inline(always)]
    pub fn unicode(&self) -> bool {
        self.unicode
    }

    #[inline(always)]
    fn unit(&self, pos: usize) -> Option<u32> {
        self.units.get(pos).map(|&u| u as u32)
    }

    /// \return a position at the left end of this input.
    #[inline(always)]
    pub fn left_end(&self) -> usize {
        0
    }

    /// \return a position at the right end of this input.
    #[inline(always)]
    pub fn right_end(&self) -> usize {
        self.units.len()
    }

    /// \return the char to the right (starting at) \p pos, or None if we are at
    /// the end. Advance the position by the amount.
    #[inline(always)]
    pub fn next_right(&self, pos: &mut usize) -> Option<u32> {
        let u = self.unit(*pos)?;
        *pos += 1;
        if self.unicode && is_lead_surrogate(u) {
            if let Some(t) = self.unit(*pos).filter(|&t| is_trail_surrogate(t)) {
                *pos += 1;
                return Some(combine_surrogates(u, t));
            }
        }
        Some(u)
    }

    /// \return the char to the left (ending just before) \p pos, or None if we
    /// are at the start. Retreat the position by the amount.
    #[inline(always)]
    pub fn next_left(&self, pos: &mut usize) -> Option<u32> {
        if *pos == 0 {
            return None;
        }
        let u = self.unit(*pos - 1)?;
        *pos -= 1;
        if self.unicode && is_trail_surrogate(u) && *pos > 0 {
            if let Some(l) = self.unit(*pos - 1).filter(|&l| is_lead_surrogate(l)) {
                *pos -= 1;
                return Some(combine_surrogates(l, u));
            }
        }
        Some(u)
    }

    // Like next_right, but does not return the char.
    #[inline(always)]
    pub fn next_right_pos(&self, mut pos: usize) -> Option<usize> {
        self.next_right(&mut pos).map(|_| pos)
    }

    // Like next_left, but does not return the char.
    #[inline(always)]
    pub fn next_left_pos(&self, mut pos: usize) -> Option<usize> {
        self.next_left(&mut pos).map(|_| pos)
    }

    /// Peek at the char to the right of a position, without changing that position.
    #[inline(always)]
    pub fn peek_right(&self, mut pos: usize) -> Option<u32> {
        self.next_right(&mut pos)
    }

    /// Peek at the char to the left of a position, without changing that position.
    #[inline(always)]
    pub fn peek_left(&self, mut pos: usize) -> Option<u32> {
        self.next_left(&mut pos)
    }

    /// \return the units in a range of positions.
    #[inline(always)]
    pub fn slice(&self, range: ops::Range<usize>) -> &'a [u16] {
        &self.units[range]
    }
}

/// Text the matcher can run over: UTF-16 units, plus the mapping between
/// unit positions and the offsets reported to the caller.
pub trait Text: core::fmt::Debug {
    fn units(&self) -> &[u16];

    /// Convert a unit position to a caller offset.
    fn pos_to_offset(&self, pos: usize) -> usize;

    /// Convert a caller offset to a unit position, clamping to the end.
    fn offset_to_pos(&self, offset: usize) -> usize;
}

impl Text for &[u16] {
    #[inline(always)]
    fn units(&self) -> &[u16] {
        self
    }

    #[inline(always)]
    fn pos_to_offset(&self, pos: usize) -> usize {
        pos
    }

    #[inline(always)]
    fn offset_to_pos(&self, offset: usize) -> usize {
        offset.min(self.len())
    }
}

/// A `&str` converted to UTF-16, remembering where each unit came from.
#[derive(Debug)]
pub struct EncodedText {
    units: Vec<u16>,

    /// The byte offset of each unit, plus one entry for the end. The second
    /// unit of a pair maps to the start of its character.
    byte_offsets: Vec<usize>,
}

impl EncodedText {
    pub fn new(text: &str) -> Self {
        let mut units = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        let mut buf = [0u16; 2];
        for (offset, c) in text.char_indices() {
            for &u in c.encode_utf16(&mut buf).iter() {
                units.push(u);
                byte_offsets.push(offset);
            }
        }
        byte_offsets.push(text.len());
        Self {
            units,
            byte_offsets,
        }
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Convert a unit position to a byte offset.
    pub fn byte_offset(&self, pos: usize) -> usize {
        self.byte_offsets[pos.min(self.units.len())]
    }

    /// Convert a byte offset to a unit position, rounding up to the next
    /// character boundary.
    pub fn unit_position(&self, byte_offset: usize) -> usize {
        self.byte_offsets
            .partition_point(|&b| b < byte_offset)
            .min(self.units.len())
    }
}

impl Text for EncodedText {
    fn units(&self) -> &[u16] {
        &self.units
    }

    fn pos_to_offset(&self, pos: usize) -> usize {
        self.byte_offset(pos)
    }

    fn offset_to_pos(&self, offset: usize) -> usize {
        self.unit_position(offset)
    }
}
