//! Errors reported while compiling a pattern.

use thiserror::Error;

/// The kind of syntax or compilation error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// A flag character is unknown or repeated.
    #[error("invalid regular expression flag")]
    InvalidFlag,

    /// Flags that may not be combined, or that the language version does not support.
    #[error("invalid combination of regular expression flags")]
    InvalidFlagCombination,

    /// A `(` without its `)`.
    #[error("unterminated group")]
    UnterminatedGroup,

    /// A `)` without its `(`.
    #[error("unmatched ')'")]
    UnmatchedParenthesis,

    /// A `[` without its `]`.
    #[error("unterminated character class")]
    UnterminatedClass,

    #[error("invalid escape")]
    InvalidEscape,

    /// Malformed braces, or `{n,m}` with `m < n`.
    #[error("invalid quantifier")]
    InvalidQuantifier,

    /// A quantifier with nothing before it, or following an assertion.
    #[error("nothing to repeat")]
    NothingToRepeat,

    #[error("invalid backreference")]
    InvalidBackreference,

    /// A malformed group name, a duplicate name in one alternative, or a
    /// reference to a name that does not exist.
    #[error("invalid capture group name")]
    InvalidGroupName,

    /// A range whose end precedes its start, or whose bound is a class escape.
    #[error("invalid character class range")]
    InvalidClassRange,

    /// Syntax not permitted inside a character class in the current mode.
    #[error("invalid character class")]
    InvalidClass,

    #[error("invalid set operation operand")]
    InvalidSetOperand,

    #[error("pattern nesting too deep")]
    NestingTooDeep,

    #[error("unknown Unicode property")]
    UnknownUnicodeProperty,

    /// A property of strings used negated, or outside unicode-sets mode.
    #[error("invalid use of a property of strings")]
    InvalidPropertyOfStrings,

    /// The program does not fit the two-byte instruction operands.
    #[error("regular expression too complex")]
    ProgramTooComplex,
}

/// An error encountered while compiling a regex.
/// `position` counts pattern elements: code points in unicode mode, UTF-16
/// code units otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct Error {
    pub kind: ErrorKind,
    pub position: usize,
}

impl Error {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}
