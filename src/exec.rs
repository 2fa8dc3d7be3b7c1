//! Execution engine bits.

use crate::api::Match;

/// A source of permission to keep matching, polled once per instruction.
pub trait StepBudget {
    /// \return false to abort the match.
    fn step(&mut self) -> bool;
}

impl<F: FnMut() -> bool> StepBudget for F {
    #[inline(always)]
    fn step(&mut self) -> bool {
        self()
    }
}

/// A budget allowing a fixed number of instructions.
#[derive(Debug, Copy, Clone)]
pub struct StepLimit {
    remaining: u64,
}

impl StepLimit {
    pub fn new(steps: u64) -> Self {
        Self { remaining: steps }
    }

    /// \return the number of steps left.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl StepBudget for StepLimit {
    #[inline(always)]
    fn step(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(r) => {
                self.remaining = r;
                true
            }
            None => false,
        }
    }
}

/// A budget that never runs out.
#[derive(Debug, Copy, Clone, Default)]
pub struct Unbounded;

impl StepBudget for Unbounded {
    #[inline(always)]
    fn step(&mut self) -> bool {
        true
    }
}

/// The budget ran out before the match finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Aborted;

/// The result of a budgeted match.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(Match),
    NoMatch,
    Aborted,
}

impl MatchOutcome {
    /// \return the match, if there was one.
    pub fn into_match(self) -> Option<Match> {
        match self {
            MatchOutcome::Matched(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, MatchOutcome::Aborted)
    }
}

impl From<Result<Option<Match>, Aborted>> for MatchOutcome {
    fn from(r: Result<Option<Match>, Aborted>) -> Self {
        match r {
            Ok(Some(m)) => MatchOutcome::Matched(m),
            Ok(None) => MatchOutcome::NoMatch,
            Err(Aborted) => MatchOutcome::Aborted,
        }
    }
}

/// A trait for finding the next match in a regex.
/// This is broken out from the executor to avoid needing to thread lifetimes
/// around.
pub trait MatchProducer: std::fmt::Debug {
    /// Attempt to match at the given location.
    /// \return either the Match and the position to start looking for the next
    /// match, or None on failure.
    fn next_match(&mut self, pos: usize, next_start: &mut Option<usize>) -> Option<Match>;
}

/// A struct which enables iteration over matches.
#[derive(Debug)]
pub struct Matches<Producer: MatchProducer> {
    mp: Producer,
    offset: Option<usize>,
}

impl<Producer: MatchProducer> Matches<Producer> {
    pub fn new(mp: Producer, start: usize) -> Self {
        Matches {
            mp,
            offset: Some(start),
        }
    }
}

impl<Producer: MatchProducer> Iterator for Matches<Producer> {
    type Item = Match;
    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset.take()?;
        self.mp.next_match(start, &mut self.offset)
    }
}
