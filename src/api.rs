use crate::classicalbacktrack::BacktrackExecutor;
use crate::config::Options;
use crate::emit;
use crate::error::{Error, ErrorKind};
use crate::exec;
use crate::exec::{MatchOutcome, StepBudget, Unbounded};
use crate::indexing::EncodedText;
use crate::insn::CompiledRegex;
use crate::optimizer;
use crate::parse;
use crate::types::GroupName;
use crate::util::decode_elements;

use core::{fmt, str::FromStr};
use std::sync::Arc;
use tracing::{debug, trace};

/// Flags used to control regex parsing and matching.
/// The default flags are case-sensitive, not-multiline, and optimizing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// Equivalent to the 'g' flag in JavaScript. Matching ignores it.
    pub global: bool,

    /// If set, make the regex case-insensitive.
    /// Equivalent to the 'i' flag in JavaScript.
    pub icase: bool,

    /// If set, ^ and $ match at line separators, not just the input boundaries.
    /// Equivalent to the 'm' flag in JavaScript.
    pub multiline: bool,

    /// If set, . matches at line separators as well as any other character.
    /// Equivalent to the 's' flag in JavaScript.
    pub dot_all: bool,

    /// If set, a match is only tried at the start offset.
    /// Equivalent to the 'y' flag in JavaScript.
    pub sticky: bool,

    /// If set, the regex is interpreted as a Unicode regex.
    /// Equivalent to the 'u' flag in JavaScript.
    pub unicode: bool,

    /// If set, the regex is interpreted as a UnicodeSets regex.
    /// Equivalent to the 'v' flag in JavaScript.
    pub unicode_sets: bool,

    /// Equivalent to the 'd' flag in JavaScript. Captures are always reported.
    pub has_indices: bool,

    /// If set, disable regex IR passes.
    pub no_opt: bool,
}

impl Flags {
    /// \return whether the pattern is parsed in a unicode mode, 'u' or 'v'.
    #[inline]
    pub fn either_unicode(&self) -> bool {
        self.unicode || self.unicode_sets
    }
}

impl FromStr for Flags {
    type Err = Error;

    /// Parse a JavaScript flag string like "gimsuy".
    /// Unknown or repeated flags are rejected, as is 'u' with 'v'.
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut result = Self::default();
        for (idx, c) in s.chars().enumerate() {
            let flag = match c {
                'd' => &mut result.has_indices,
                'g' => &mut result.global,
                'i' => &mut result.icase,
                'm' => &mut result.multiline,
                's' => &mut result.dot_all,
                'u' => &mut result.unicode,
                'v' => &mut result.unicode_sets,
                'y' => &mut result.sticky,
                _ => return Err(Error::new(ErrorKind::InvalidFlag, idx)),
            };
            if *flag {
                return Err(Error::new(ErrorKind::InvalidFlag, idx));
            }
            *flag = true;
        }
        if result.unicode && result.unicode_sets {
            return Err(Error::new(ErrorKind::InvalidFlagCombination, 0));
        }
        Ok(result)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flags = [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.icase, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.unicode_sets, 'v'),
            (self.sticky, 'y'),
        ];
        for (set, c) in flags {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Range is used to express the extent of a match, as indexes into the input
/// string.
pub type Range = core::ops::Range<usize>;

/// An iterator type which yields `Match`es found in a string.
pub type Matches<'r> = exec::Matches<BacktrackExecutor<'r, EncodedText>>;

/// An iterator type which yields `Match`es found in UTF-16 text.
pub type Utf16Matches<'r, 't> = exec::Matches<BacktrackExecutor<'r, &'t [u16]>>;

/// A Match represents a portion of a string which was found to match a Regex.
#[derive(Debug, Clone)]
pub struct Match {
    /// The total range of the match. Note this may be empty, if the regex
    /// matched an empty string.
    pub range: Range,

    /// The list of captures. This has length equal to the number of capturing
    /// groups in the regex. For each capture, if the value is None, that group
    /// did not match (for example, it was in a not-taken branch of an
    /// alternation). If the value is Some, the group did match with the
    /// enclosed range.
    pub captures: Vec<Option<Range>>,

    // The group names of the regex, each with the groups it labels.
    pub(crate) group_names: Arc<[GroupName]>,
}

impl Match {
    /// Access a group by index, using the convention of Python's group()
    /// function. Index 0 is the total match, index 1 is the first capture
    /// group.
    #[inline]
    pub fn group(&self, idx: usize) -> Option<Range> {
        if idx == 0 {
            Some(self.range.clone())
        } else {
            self.captures.get(idx - 1)?.clone()
        }
    }

    /// Access a named group by name.
    /// A name may label several groups; the one that matched is returned.
    #[inline]
    pub fn named_group(&self, name: &str) -> Option<Range> {
        let gn = self.group_names.iter().find(|gn| &*gn.name == name)?;
        self.first_set(gn)
    }

    fn first_set(&self, gn: &GroupName) -> Option<Range> {
        gn.indices
            .iter()
            .find_map(|&idx| self.captures.get(idx as usize)?.clone())
    }

    /// Return an iterator over the named groups of a Match.
    #[inline]
    pub fn named_groups(&self) -> NamedGroups<'_> {
        NamedGroups::new(self)
    }

    /// Returns the range over the starting and ending offsets of the match.
    ///
    /// This is a convenience function to work around
    /// the fact that Range does not support Copy.
    #[inline]
    pub fn range(&self) -> Range {
        self.range.clone()
    }

    /// Returns the starting offset of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns the ending offset of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Return an iterator over a Match. The first returned value is the total
    /// match, and subsequent values represent the capture groups.
    #[inline]
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }
}

/// An iterator over the capture groups of a [`Match`]
///
/// This struct is created by the [`groups`] method on [`Match`].
///
/// [`Match`]: ../struct.Match.html
/// [`groups`]: ../struct.Match.html#method.groups
#[derive(Clone)]
pub struct Groups<'m> {
    mat: &'m Match,
    i: usize,
    max: usize,
}

impl<'m> Groups<'m> {
    #[inline]
    fn new(mat: &'m Match) -> Self {
        Self {
            mat,
            i: 0,
            max: mat.captures.len() + 1,
        }
    }
}

impl Iterator for Groups<'_> {
    type Item = Option<Range>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let i = self.i;
        if i < self.max {
            self.i += 1;
            Some(self.mat.group(i))
        } else {
            None
        }
    }
}

/// An iterator over the named capture groups of a [`Match`], in order of
/// first appearance in the pattern.
///
/// This struct is created by the [`named_groups`] method on [`Match`].
///
/// [`Match`]: ../struct.Match.html
/// [`named_groups`]: ../struct.Match.html#method.named_groups
#[derive(Clone)]
pub struct NamedGroups<'m> {
    mat: &'m Match,
    next_group_name_idx: usize,
}

impl<'m> NamedGroups<'m> {
    #[inline]
    fn new(mat: &'m Match) -> Self {
        Self {
            mat,
            next_group_name_idx: 0,
        }
    }
}

impl<'m> Iterator for NamedGroups<'m> {
    type Item = (&'m str, Option<Range>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let gn = self.mat.group_names.get(self.next_group_name_idx)?;
        self.next_group_name_idx += 1;
        Some((&gn.name, self.mat.first_set(gn)))
    }
}

/// A Regex is the compiled version of a pattern.
/// It is immutable and may be shared between threads.
#[derive(Debug, Clone)]
pub struct Regex {
    cr: Arc<CompiledRegex>,
}

impl From<CompiledRegex> for Regex {
    fn from(cr: CompiledRegex) -> Self {
        Self { cr: Arc::new(cr) }
    }
}

impl Regex {
    /// Construct a regex by parsing `pattern` using the default flags.
    /// An Error may be returned if the syntax is invalid.
    /// Note that this is rather expensive; prefer to cache a Regex which is
    /// intended to be used more than once.
    #[inline]
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Self::with_options(pattern, Options::default())
    }

    /// Construct a regex by parsing `pattern` with a JavaScript flag string
    /// like "iu".
    /// An Error may be returned if the flags or the syntax are invalid.
    #[inline]
    pub fn with_flags(pattern: &str, flags: &str) -> Result<Regex, Error> {
        Self::with_options(pattern, Options::from(flags.parse::<Flags>()?))
    }

    /// Construct a regex by parsing `pattern` with the given options.
    pub fn with_options<O: Into<Options>>(pattern: &str, options: O) -> Result<Regex, Error> {
        let units: Vec<u16> = pattern.encode_utf16().collect();
        Self::compile(&units, options.into(), pattern.to_string())
    }

    /// Construct a regex from a pattern given as UTF-16 code units, which
    /// may hold unpaired surrogates.
    pub fn from_utf16<O: Into<Options>>(pattern: &[u16], options: O) -> Result<Regex, Error> {
        Self::compile(pattern, options.into(), String::from_utf16_lossy(pattern))
    }

    fn compile(units: &[u16], options: Options, source: String) -> Result<Regex, Error> {
        options.validate()?;
        let flags = options.flags;
        debug!(pattern = %source, %flags, "compiling regex");
        let elements = decode_elements(units, flags.either_unicode());
        let mut ire = parse::try_parse(&elements, &options)?;
        if !flags.no_opt {
            optimizer::optimize(&mut ire);
        }
        let cr = emit::emit(&ire, &options, source)?;
        debug!(insns = cr.insns.len(), classes = cr.classes.len(), "compiled regex");
        trace!("bytecode:\n{}", cr);
        Ok(Regex::from(cr))
    }

    /// Searches `text` to find the first match.
    #[inline]
    pub fn find(&self, text: &str) -> Option<Match> {
        self.find_iter(text).next()
    }

    /// Searches `text`, returning an iterator over non-overlapping matches.
    /// Match ranges are byte offsets into `text`.
    #[inline]
    pub fn find_iter(&self, text: &str) -> Matches<'_> {
        self.find_from(text, 0)
    }

    /// Returns an iterator for matches found in 'text' starting at byte index
    /// `start`. Note this may be different from passing a sliced `text` in
    /// the case of lookbehind assertions.
    /// Example:
    ///
    ///  ```rust
    ///   use esregex::Regex;
    ///   let text = "xyxy";
    ///   let re = Regex::new(r"(?<=x)y").unwrap();
    ///   let t1 = re.find(&text[1..]).unwrap().range();
    ///   assert!(t1 == (2..3));
    ///   let t2 = re.find_from(text, 1).next().unwrap().range();
    ///   assert!(t2 == (1..2));
    ///   ```
    pub fn find_from(&self, text: &str, start: usize) -> Matches<'_> {
        let executor = BacktrackExecutor::new(&self.cr, EncodedText::new(text));
        let start = executor.initial_position(start);
        exec::Matches::new(executor, start)
    }

    /// Searches UTF-16 `text` to find the first match.
    /// Match ranges are code unit offsets.
    #[inline]
    pub fn find_utf16(&self, text: &[u16]) -> Option<Match> {
        self.find_from_utf16(text, 0).next()
    }

    /// Returns an iterator for matches found in UTF-16 `text` starting at
    /// code unit `start`.
    pub fn find_from_utf16<'r, 't>(&'r self, text: &'t [u16], start: usize) -> Utf16Matches<'r, 't> {
        let executor = BacktrackExecutor::new(&self.cr, text);
        let start = executor.initial_position(start);
        exec::Matches::new(executor, start)
    }

    /// Match once against UTF-16 `text` from `start`, which is clamped to
    /// the text. If `sticky`, or the regex has the 'y' flag, the match must
    /// begin at `start`.
    pub fn exec_utf16(&self, text: &[u16], start: usize, sticky: bool) -> Option<Match> {
        self.exec_with_budget(text, start, sticky, &mut Unbounded)
            .into_match()
    }

    /// Like [`Regex::exec_utf16`], polling `budget` before every instruction.
    /// The match is abandoned as soon as the budget refuses.
    pub fn exec_with_budget<B: StepBudget + ?Sized>(
        &self,
        text: &[u16],
        start: usize,
        sticky: bool,
        budget: &mut B,
    ) -> MatchOutcome {
        let mut executor = BacktrackExecutor::new(&self.cr, text);
        let start = executor.initial_position(start);
        let sticky = sticky || self.cr.flags.sticky;
        executor
            .search(start, sticky, budget)
            .map(|res| res.map(|(m, _)| m))
            .into()
    }

    /// \return a human readable dump of the bytecode.
    pub fn disassemble(&self) -> String {
        self.cr.to_string()
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.cr.flags
    }

    /// \return the pattern source.
    #[inline]
    pub fn source(&self) -> &str {
        &self.cr.source
    }

    /// \return the number of capture groups, not counting the whole match.
    #[inline]
    pub fn capture_count(&self) -> usize {
        self.cr.groups as usize
    }

    /// \return the group names, in order of first appearance, each with the
    /// indices of the groups it labels. Index 0 is the first capture group.
    #[inline]
    pub fn group_names(&self) -> &[GroupName] {
        &self.cr.group_names
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}
