//! Bytecode instructions for a compiled regex

use crate::api;
use crate::charset::CharSet;
use crate::types::{CaptureGroupID, ClassID, GroupName, LoopID};
use crate::unicodedata::UnicodeData;
use crate::util::to_char_sat;
use core::fmt;
use std::sync::Arc;

/// Jump targets and other operands are two bytes wide.
pub type JumpTarget = u16;

#[derive(Debug, Clone)]
pub struct LoopFields {
    pub loop_id: LoopID,
    pub min_iters: usize,
    pub max_iters: usize,
    pub greedy: bool,
    pub exit: JumpTarget,
}

/// A cheap test of the first character of an alternative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Prereq {
    Char(u32),
    CharICase(u32),
    Class(ClassID),
}

#[derive(Debug, Clone)]
/// The list of bytecode instructions.
pub enum Insn {
    /// The match was successful.
    Goal,

    /// Match a single char.
    Char(u32),

    /// Match a single char, case-insensitive.
    /// The char is already canonicalized.
    CharICase(u32),

    /// Match a run of chars, in matching order.
    Literal { chars: Box<[u32]>, icase: bool },

    /// Match the start of a line (if multiline); emitted by '^'
    StartOfLine { multiline: bool },

    /// Match the end of a line; emitted by '$'
    EndOfLine { multiline: bool },

    /// Match any character; emitted by '.' only when the dot_all flag is set.
    MatchAny,

    /// Match any character except a line terminator; emitted by '.'
    MatchAnyExceptLineTerminator,

    /// \b or \B word boundaries.
    WordBoundary { invert: bool },

    /// Match one character against a class.
    Class(ClassID),

    /// Match a class which has string alternatives.
    ClassStrings(ClassID),

    /// Set the IP to a new value.
    Jump { target: JumpTarget },

    /// The next instruction is the primary branch.
    /// If it fails to match, jump to secondary.
    Alt { secondary: JumpTarget },

    /// An Alt whose branches each begin with a known character test. A branch
    /// whose test fails at the current position is skipped without being
    /// entered.
    AltPrereq {
        secondary: JumpTarget,
        left: Prereq,
        right: Prereq,
    },

    /// Enter a loop from "outside".
    EnterLoop(LoopFields),

    /// Re-enter a loop.
    LoopAgain { begin: JumpTarget },

    /// The next instruction is a "1Char" instruction which always matches one
    /// character. Attempt to match it [min, max] times.
    /// An atomic loop never gives back characters.
    Loop1CharBody {
        min_iters: usize,
        max_iters: usize,
        greedy: bool,
        atomic: bool,
    },

    /// Enter a capture group.
    BeginCaptureGroup(CaptureGroupID),

    /// Exit a capture group.
    EndCaptureGroup(CaptureGroupID),

    /// Clear a capture group.
    ResetCaptureGroup(CaptureGroupID),

    /// Perform a backreference match.
    BackRef(CaptureGroupID),

    /// Match against whichever of the groups sharing a name is set.
    NamedBackRef(Box<[CaptureGroupID]>),

    /// Enter a lookaround. Its body follows and ends with LookaroundEnd;
    /// matching resumes at the continuation.
    Lookaround {
        negate: bool,
        backwards: bool,
        start_group: CaptureGroupID,
        end_group: CaptureGroupID,
        continuation: JumpTarget,
    },

    /// The body of the innermost lookaround matched.
    LookaroundEnd,
}

/// The peeled prefix start predicate.
/// This is a fast way of locating the first potential match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPredicate {
    /// May match an arbitrary sequence.
    Arbitrary,

    /// The regex is anchored to the start of the string.
    /// Only the starting position is tried.
    StartAnchored,

    /// Every match begins at the start of the input or after a line terminator.
    LineStart,

    /// Every match begins with these code units.
    LeadingUnits(Box<[u16]>),
}

#[derive(Debug)]
pub struct CompiledRegex {
    // Sequence of instructions.
    pub insns: Vec<Insn>,

    // The compiled classes, indexed by the Class instructions.
    pub classes: Vec<CharSet>,

    // Predicate to rapidly find the first potential match.
    pub start_pred: StartPredicate,

    // Number of loops, used to populate loop data.
    pub loops: u16,

    // Number of capture groups, used to populate capture group data.
    pub groups: u16,

    // Names of capture groups and the groups carrying each name.
    pub group_names: Arc<[GroupName]>,

    // Flags controlling matching.
    pub flags: api::Flags,

    // The pattern text.
    pub source: String,

    // Script and emoji data used by classes.
    pub unicode_data: Arc<dyn UnicodeData + Send + Sync>,
}

fn fmt_char(c: u32) -> String {
    to_char_sat(c).escape_debug().to_string()
}

fn fmt_prereq(p: &Prereq) -> String {
    match *p {
        Prereq::Char(c) => format!("'{}'", fmt_char(c)),
        Prereq::CharICase(c) => format!("'{}' (icase)", fmt_char(c)),
        Prereq::Class(idx) => format!("class {}", idx),
    }
}

impl fmt::Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Insn::Goal => write!(f, "Goal"),
            &Insn::Char(c) => write!(f, "Char '{}'", fmt_char(c)),
            &Insn::CharICase(c) => write!(f, "CharICase '{}'", fmt_char(c)),
            Insn::Literal { chars, icase } => {
                let s: String = chars.iter().map(|&c| to_char_sat(c)).collect();
                let ic = if *icase { " (icase)" } else { "" };
                write!(f, "Literal {:?}{}", s, ic)
            }
            Insn::StartOfLine { multiline } => write!(f, "StartOfLine multiline={}", multiline),
            Insn::EndOfLine { multiline } => write!(f, "EndOfLine multiline={}", multiline),
            Insn::MatchAny => write!(f, "MatchAny"),
            Insn::MatchAnyExceptLineTerminator => write!(f, "MatchAnyExceptLineTerminator"),
            Insn::WordBoundary { invert } => {
                write!(f, "WordBoundary {}", if *invert { "\\B" } else { "\\b" })
            }
            Insn::Class(idx) => write!(f, "Class {}", idx),
            Insn::ClassStrings(idx) => write!(f, "ClassStrings {}", idx),
            Insn::Jump { target } => write!(f, "Jump -> {}", target),
            Insn::Alt { secondary } => write!(f, "Alt else -> {}", secondary),
            Insn::AltPrereq {
                secondary,
                left,
                right,
            } => write!(
                f,
                "AltPrereq [{}] [{}] else -> {}",
                fmt_prereq(left),
                fmt_prereq(right),
                secondary
            ),
            Insn::EnterLoop(fields) => {
                let max = if fields.max_iters == usize::MAX {
                    "inf".to_string()
                } else {
                    fields.max_iters.to_string()
                };
                write!(
                    f,
                    "EnterLoop #{} {{{},{}}}{} exit -> {}",
                    fields.loop_id,
                    fields.min_iters,
                    max,
                    if fields.greedy { "" } else { "?" },
                    fields.exit
                )
            }
            Insn::LoopAgain { begin } => write!(f, "LoopAgain -> {}", begin),
            Insn::Loop1CharBody {
                min_iters,
                max_iters,
                greedy,
                atomic,
            } => {
                let max = if *max_iters == usize::MAX {
                    "inf".to_string()
                } else {
                    max_iters.to_string()
                };
                write!(
                    f,
                    "Loop1CharBody {{{},{}}}{}{}",
                    min_iters,
                    max,
                    if *greedy { "" } else { "?" },
                    if *atomic { " atomic" } else { "" }
                )
            }
            Insn::BeginCaptureGroup(id) => write!(f, "BeginCaptureGroup {}", id),
            Insn::EndCaptureGroup(id) => write!(f, "EndCaptureGroup {}", id),
            Insn::ResetCaptureGroup(id) => write!(f, "ResetCaptureGroup {}", id),
            Insn::BackRef(id) => write!(f, "BackRef {}", id),
            Insn::NamedBackRef(ids) => write!(f, "NamedBackRef {:?}", ids),
            Insn::Lookaround {
                negate,
                backwards,
                start_group,
                end_group,
                continuation,
            } => write!(
                f,
                "Look{} {} groups {}..{} continue -> {}",
                if *backwards { "behind" } else { "ahead" },
                if *negate { "negative" } else { "positive" },
                start_group,
                end_group,
                continuation
            ),
            Insn::LookaroundEnd => write!(f, "LookaroundEnd"),
        }
    }
}

impl fmt::Display for CompiledRegex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "/{}/{} groups={} loops={} start={:?}",
            self.source, self.flags, self.groups, self.loops, self.start_pred
        )?;
        for (idx, class) in self.classes.iter().enumerate() {
            writeln!(f, "  class {}: {:?}", idx, class.model())?;
        }
        for (ip, insn) in self.insns.iter().enumerate() {
            writeln!(f, "{:>4}: {}", ip, insn)?;
        }
        Ok(())
    }
}
