use crate::codepointset::CodePointSet;
use crate::unicode::PropertyEscape;
use core::ops;

/// A group index is u16.
/// CaptureGroupID 0 corresponds to the first capture group.
pub type CaptureGroupID = u16;

/// The maximum number of capture groups supported.
pub const MAX_CAPTURE_GROUPS: usize = 65535;

/// The maximum number of loops supported.
pub const MAX_LOOPS: usize = 65535;
pub type LoopID = u16;

/// The maximum number of compiled character classes.
pub const MAX_CLASSES: usize = 65535;
pub type ClassID = u16;

/// The default bound on group, lookaround and class nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacterClassType {
    Digits,
    Spaces,
    Words,
}

/// An escape inside (or standing for) a character class: `\d`, `\W`, `\p{L}`, ...
#[derive(Debug, Clone)]
pub enum ClassEscape {
    Shorthand {
        class_type: CharacterClassType,
        positive: bool,
    },
    Property {
        property: PropertyEscape,
        positive: bool,
    },
}

/// A set operation in a unicode-sets class.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SetOp {
    /// `--`
    Subtract,
    /// `&&`
    Intersect,
}

/// A parsed character class like `[a-z\d]` or `[\w--[aeiou]]`.
///
/// Membership of a single code point is the union of `cps`, `escapes` and
/// `nested`, then each of `ops` applied in order, then `negated`.
/// `strings` holds the multi-code-point (and empty) alternatives after set
/// operations; single code point strings are folded into `cps`.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    pub negated: bool,
    pub cps: CodePointSet,
    pub escapes: Vec<ClassEscape>,
    pub nested: Vec<ClassModel>,
    pub strings: Vec<Vec<u32>>,
    pub ops: Vec<(SetOp, ClassModel)>,

    /// Whether the class syntactically may match a string, which forbids
    /// negating it.
    pub may_contain_strings: bool,
}

impl ClassModel {
    /// A class matching just the given code points.
    pub fn from_cps(cps: CodePointSet) -> ClassModel {
        ClassModel {
            cps,
            ..Default::default()
        }
    }

    /// A class for a single escape.
    pub fn from_escape(escape: ClassEscape) -> ClassModel {
        ClassModel {
            escapes: vec![escape],
            ..Default::default()
        }
    }

    /// \return whether the class has string alternatives (including the empty string).
    pub fn has_strings(&self) -> bool {
        !self.strings.is_empty()
    }

    /// \return whether this class can be merged into an enclosing union.
    pub fn is_flattenable(&self) -> bool {
        !self.negated && self.ops.is_empty()
    }

    /// Add a string alternative, routing single code points to `cps`.
    pub fn add_string(&mut self, s: Vec<u32>) {
        if s.len() == 1 {
            self.cps.add_one(s[0]);
        } else if !self.strings.contains(&s) {
            self.strings.push(s);
        }
    }

    /// Merge a non-negated class without operations into this one.
    pub fn absorb(&mut self, other: ClassModel) {
        debug_assert!(other.is_flattenable());
        self.cps.add_set(&other.cps);
        self.escapes.extend(other.escapes);
        self.nested.extend(other.nested);
        for s in other.strings {
            self.add_string(s);
        }
        self.may_contain_strings |= other.may_contain_strings;
    }
}

/// An instruction pointer.
pub type IP = usize;

/// Representation of a loop.
#[derive(Debug, Copy, Clone)]
pub struct LoopData {
    pub iters: usize,
    pub entry: usize,
}

impl LoopData {
    pub fn new(entry: usize) -> LoopData {
        LoopData { iters: 0, entry }
    }
}

/// Representation of a capture group.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GroupData {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl GroupData {
    pub fn new() -> GroupData {
        GroupData {
            start: None,
            end: None,
        }
    }

    pub fn as_range(&self) -> Option<ops::Range<usize>> {
        // Note: we may have only start (if forwards) or end (if backwards) set.
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(ops::Range { start, end }),
            _ => None,
        }
    }

    /// Reset the group to "not entered."
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }
}

/// A capture group name with every group index it labels.
/// One name may label several groups in mutually exclusive alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName {
    pub name: Box<str>,
    pub indices: Box<[CaptureGroupID]>,
}
