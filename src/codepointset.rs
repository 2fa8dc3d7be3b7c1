use crate::util::SliceHelp;
use core::cmp::{self, Ordering};

pub type CodePoint = u32;

/// An inclusive range of code points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interval {
    pub first: CodePoint,
    pub last: CodePoint,
}

impl Interval {
    pub const fn new(first: CodePoint, last: CodePoint) -> Interval {
        Interval { first, last }
    }

    #[inline(always)]
    pub fn compare(self, cp: u32) -> Ordering {
        if self.first > cp {
            Ordering::Greater
        } else if self.last < cp {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Overlapping or abutting intervals compare equal.
    fn mergecmp(self, rhs: Interval) -> Ordering {
        if self.last.saturating_add(1) < rhs.first {
            Ordering::Less
        } else if rhs.last.saturating_add(1) < self.first {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    pub fn contains(self, cp: CodePoint) -> bool {
        self.first <= cp && cp <= self.last
    }
}

/// A set of code points, stored as sorted intervals which neither overlap nor abut.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodePointSet {
    ivs: Vec<Interval>,
}

impl CodePointSet {
    pub fn new() -> CodePointSet {
        CodePointSet { ivs: Vec::new() }
    }

    pub fn from_intervals(ivs: &[Interval]) -> CodePointSet {
        let mut result = CodePointSet::new();
        for &iv in ivs {
            result.add(iv);
        }
        result
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.ivs.binary_search_by(|iv| iv.compare(cp)).is_ok()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.ivs
    }

    /// \return the largest contained code point, if any.
    pub fn max(&self) -> Option<CodePoint> {
        self.ivs.last().map(|iv| iv.last)
    }

    /// Add an interval, merging with anything it touches.
    pub fn add(&mut self, new_iv: Interval) {
        debug_assert!(new_iv.first <= new_iv.last);
        let touched = self.ivs.equal_range_by(|iv| iv.mergecmp(new_iv));
        if touched.is_empty() {
            self.ivs.insert(touched.start, new_iv);
            return;
        }
        let first = cmp::min(self.ivs[touched.start].first, new_iv.first);
        let last = cmp::max(self.ivs[touched.end - 1].last, new_iv.last);
        self.ivs[touched.start] = Interval { first, last };
        self.ivs.drain(touched.start + 1..touched.end);
    }

    #[inline]
    pub fn add_one(&mut self, cp: CodePoint) {
        self.add(Interval::new(cp, cp))
    }

    pub fn add_set(&mut self, rhs: &CodePointSet) {
        for &iv in rhs.intervals() {
            self.add(iv)
        }
    }
}
