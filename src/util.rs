use core::cmp::Ordering;
use core::ops::{Index, IndexMut};
use core::slice::SliceIndex;

// A macro which expresses either checked or unchecked reachability, depending on prohibit-unsafe.
macro_rules! rs_unreachable {
    () => {{
        if cfg!(feature = "prohibit-unsafe") {
            unreachable!();
        } else {
            unsafe { core::hint::unreachable_unchecked() }
        }
    }};
    ($msg:expr) => {
        if cfg!(feature = "prohibit-unsafe") {
            unreachable!($msg);
        } else {
            unsafe { core::hint::unreachable_unchecked() }
        }
    };
}

/// A trait which performs bounds checking only in debug mode.
pub trait DebugCheckIndex<Idx>: Index<Idx> + IndexMut<Idx> {
    fn iat(&self, index: Idx) -> &Self::Output;
    fn mat(&mut self, index: Idx) -> &mut Self::Output;
}

impl<Idx, T> DebugCheckIndex<Idx> for [T]
where
    Idx: SliceIndex<[T]> + Clone,
{
    #[inline(always)]
    fn iat(&self, idx: Idx) -> &Self::Output {
        debug_assert!(self.get(idx.clone()).is_some(), "Index out of bounds");
        if cfg!(feature = "prohibit-unsafe") {
            self.index(idx)
        } else {
            unsafe { self.get_unchecked(idx) }
        }
    }

    #[inline(always)]
    fn mat(&mut self, idx: Idx) -> &mut Self::Output {
        debug_assert!(self.get(idx.clone()).is_some(), "Index out of bounds");
        if cfg!(feature = "prohibit-unsafe") {
            self.index_mut(idx)
        } else {
            unsafe { self.get_unchecked_mut(idx) }
        }
    }
}

impl<Idx, T> DebugCheckIndex<Idx> for Vec<T>
where
    Idx: SliceIndex<[T]> + Clone,
{
    #[inline(always)]
    fn iat(&self, idx: Idx) -> &Self::Output {
        self.as_slice().iat(idx)
    }

    #[inline(always)]
    fn mat(&mut self, idx: Idx) -> &mut Self::Output {
        self.as_mut_slice().mat(idx)
    }
}

// Helper function for matching u32s against chars.
// Convert a u32 to a char, except if the conversion fails, return the largest char.
// Only use the result to pattern match against literals.
pub fn to_char_sat(c: u32) -> char {
    char::from_u32(c).unwrap_or(char::MAX)
}

#[inline(always)]
pub fn is_lead_surrogate(u: u32) -> bool {
    (0xD800..=0xDBFF).contains(&u)
}

#[inline(always)]
pub fn is_trail_surrogate(u: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&u)
}

/// Combine a surrogate pair into a supplementary code point.
#[inline(always)]
pub fn combine_surrogates(lead: u32, trail: u32) -> u32 {
    debug_assert!(is_lead_surrogate(lead) && is_trail_surrogate(trail));
    0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00)
}

/// Split a code point into its UTF-16 code units.
/// The second unit is None for BMP code points.
#[inline]
pub fn split_utf16(cp: u32) -> (u16, Option<u16>) {
    if cp < 0x10000 {
        (cp as u16, None)
    } else {
        let v = cp - 0x10000;
        ((0xD800 + (v >> 10)) as u16, Some((0xDC00 + (v & 0x3FF)) as u16))
    }
}

/// Decode UTF-16 units into a list of elements: code points if \p unicode,
/// raw units otherwise. Lone surrogates are kept as-is.
pub fn decode_elements(units: &[u16], unicode: bool) -> Vec<u32> {
    let mut result = Vec::with_capacity(units.len());
    let mut idx = 0;
    while idx < units.len() {
        let u = units[idx] as u32;
        if unicode && is_lead_surrogate(u) && idx + 1 < units.len() {
            let t = units[idx + 1] as u32;
            if is_trail_surrogate(t) {
                result.push(combine_surrogates(u, t));
                idx += 2;
                continue;
            }
        }
        result.push(u);
        idx += 1;
    }
    result
}

pub trait SliceHelp {
    type Item;

    /// Given that self is sorted according to f, returns the range of indexes
    /// where f indicates equal elements.
    fn equal_range_by<'a, F>(&'a self, f: F) -> core::ops::Range<usize>
    where
        F: FnMut(&'a Self::Item) -> Ordering;
}

impl<T> SliceHelp for [T] {
    type Item = T;
    fn equal_range_by<'a, F>(&'a self, mut f: F) -> core::ops::Range<usize>
    where
        F: FnMut(&'a Self::Item) -> Ordering,
    {
        let left = self
            .binary_search_by(|v| f(v).then(Ordering::Greater))
            .unwrap_or_else(|idx| idx);
        let right = self[left..]
            .binary_search_by(|v| f(v).then(Ordering::Less))
            .unwrap_or_else(|idx| idx)
            + left;
        left..right
    }
}
