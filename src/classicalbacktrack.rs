//! Classical backtracking execution engine

use crate::api::Match;
use crate::charclasses::is_line_terminator;
use crate::cursor;
use crate::cursor::Direction;
use crate::exec;
use crate::exec::{Aborted, StepBudget, Unbounded};
use crate::folds::CaseFold;
use crate::indexing::{Text, Utf16Input};
use crate::insn::{CompiledRegex, Insn, LoopFields, Prereq, StartPredicate};
use crate::matchers;
use crate::scm;
use crate::scm::SingleCharMatcher;
use crate::types::{GroupData, LoopData, LoopID, IP};
use crate::util::DebugCheckIndex;
use std::rc::Rc;

/// The capture table. Backtrack frames share it; a write after a frame has
/// been pushed clones it.
type Captures = Rc<Vec<GroupData>>;

#[derive(Clone, Debug)]
enum BacktrackInsn {
    /// Nothing more to backtrack.
    /// This "backstops" our stack.
    Exhausted,

    /// Restore the IP, position and captures.
    SetPosition { ip: IP, pos: usize, caps: Captures },

    SetLoopData { id: LoopID, data: LoopData },

    EnterNonGreedyLoop {
        // The IP of the loop.
        // This is guaranteed to point to an EnterLoop.
        ip: IP,
        data: LoopData,
        caps: Captures,
    },

    GreedyLoop1Char {
        continuation: IP,
        min: usize,
        max: usize,
        caps: Captures,
    },

    NonGreedyLoop1Char {
        continuation: IP,
        min: usize,
        max: usize,
        caps: Captures,
    },

    /// Try the remaining alternatives of a class with strings, starting at
    /// alternative `next_idx`.
    ClassStrings {
        ip: IP,
        pos: usize,
        next_idx: usize,
        caps: Captures,
    },

    /// Delimits the frames of a lookaround body. Reaching it by backtracking
    /// means the body failed to match.
    LookaroundBarrier {
        negate: bool,
        continuation: IP,
        pos: usize,
        dir: Direction,
        caps: Captures,
    },
}

#[derive(Debug)]
pub(crate) struct MatchAttempter<'a> {
    re: &'a CompiledRegex,
    bts: Vec<BacktrackInsn>,
    loops: Vec<LoopData>,
    groups: Captures,

    /// Indexes into `bts` of the barriers of the lookarounds we are inside.
    lookaround_stack: Vec<usize>,

    /// Canonicalization for case-insensitive matching.
    fold: CaseFold,

    /// Whether \w and \b use the extended word chars.
    extended_words: bool,
}

impl<'a> MatchAttempter<'a> {
    pub(crate) fn new(re: &'a CompiledRegex) -> Self {
        let unicode = re.flags.unicode || re.flags.unicode_sets;
        Self {
            re,
            bts: vec![BacktrackInsn::Exhausted],
            loops: vec![LoopData::new(0); re.loops as usize],
            groups: Rc::new(vec![GroupData::new(); re.groups as usize]),
            lookaround_stack: Vec::new(),
            fold: CaseFold::for_mode(unicode),
            extended_words: unicode && re.flags.icase,
        }
    }

    #[inline(always)]
    fn push_backtrack(&mut self, bt: BacktrackInsn) {
        self.bts.push(bt)
    }

    #[inline(always)]
    fn pop_backtrack(&mut self) {
        // Note we never pop the last instruction so this will never be empty.
        debug_assert!(self.bts.len() > 1);
        self.bts.pop();
    }

    /// \return the capture table for writing.
    #[inline(always)]
    fn groups_mut(&mut self) -> &mut Vec<GroupData> {
        Rc::make_mut(&mut self.groups)
    }

    fn prepare_to_enter_loop(
        bts: &mut Vec<BacktrackInsn>,
        pos: usize,
        loop_fields: &LoopFields,
        loop_data: &mut LoopData,
    ) {
        bts.push(BacktrackInsn::SetLoopData {
            id: loop_fields.loop_id,
            data: *loop_data,
        });
        loop_data.iters += 1;
        loop_data.entry = pos;
    }

    fn run_loop(&mut self, loop_fields: &'a LoopFields, pos: usize, ip: IP) -> Option<IP> {
        let loop_data = self.loops.mat(loop_fields.loop_id as usize);
        let iteration = loop_data.iters;

        let do_taken = iteration < loop_fields.max_iters;
        let do_not_taken = iteration >= loop_fields.min_iters;

        let loop_taken_ip = ip + 1;
        let loop_not_taken_ip = loop_fields.exit as IP;

        // Once the minimum number of iterations is satisfied, an iteration
        // which matched the empty string ends the loop.
        if loop_data.entry == pos && iteration > loop_fields.min_iters {
            return None;
        }

        match (do_taken, do_not_taken) {
            (false, false) => {
                // No arms viable.
                None
            }
            (false, true) => {
                // Only skipping is viable.
                Some(loop_not_taken_ip)
            }
            (true, false) => {
                // Only entering is viable.
                MatchAttempter::prepare_to_enter_loop(&mut self.bts, pos, loop_fields, loop_data);
                Some(loop_taken_ip)
            }
            (true, true) if !loop_fields.greedy => {
                // Both arms are viable; backtrack into the loop.
                loop_data.entry = pos;
                let data = *loop_data;
                self.bts.push(BacktrackInsn::EnterNonGreedyLoop {
                    ip,
                    data,
                    caps: self.groups.clone(),
                });
                Some(loop_not_taken_ip)
            }
            (true, true) => {
                debug_assert!(loop_fields.greedy, "Should be greedy");
                // Both arms are viable; backtrack out of the loop.
                self.bts.push(BacktrackInsn::SetPosition {
                    ip: loop_not_taken_ip,
                    pos,
                    caps: self.groups.clone(),
                });
                MatchAttempter::prepare_to_enter_loop(&mut self.bts, pos, loop_fields, loop_data);
                Some(loop_taken_ip)
            }
        }
    }

    // Drive the loop up to \p max times.
    // \return the position (min, max), or None on failure.
    #[inline(always)]
    fn run_scm_loop_impl<Scm: SingleCharMatcher>(
        input: &Utf16Input,
        mut pos: usize,
        min: usize,
        max: usize,
        dir: Direction,
        matcher: Scm,
    ) -> Option<(usize, usize)> {
        debug_assert!(min <= max, "min should be <= max");
        // Drive the iteration min times.
        // That tells us the min position.
        for _ in 0..min {
            if !matcher.matches(input, dir, &mut pos) {
                return None;
            }
        }
        let min_pos = pos;

        // Drive it up to the max.
        for _ in 0..(max - min) {
            let saved = pos;
            if !matcher.matches(input, dir, &mut pos) {
                pos = saved;
                break;
            }
        }
        Some((min_pos, pos))
    }

    // Given that ip points at a loop whose body matches exactly one character, run
    // a "single character loop". We don't need to save our position every
    // iteration: the body matches a single character, so we can backtrack by
    // stepping one character back.
    // \return the next IP, or None if the loop failed.
    #[allow(clippy::too_many_arguments)]
    fn run_scm_loop(
        &mut self,
        input: &Utf16Input,
        dir: Direction,
        pos: &mut usize,
        min: usize,
        max: usize,
        ip: IP,
        greedy: bool,
        atomic: bool,
    ) -> Option<IP> {
        let re = self.re;
        let data = &*re.unicode_data;
        // Iterate as far as we can go.
        let loop_res = match re.insns.iat(ip + 1) {
            &Insn::Char(c) => Self::run_scm_loop_impl(input, *pos, min, max, dir, scm::Char { c }),
            &Insn::CharICase(c) => {
                let fold = self.fold;
                Self::run_scm_loop_impl(input, *pos, min, max, dir, scm::CharICase { c, fold })
            }
            &Insn::Class(idx) => {
                let set = re.classes.iat(idx as usize);
                Self::run_scm_loop_impl(input, *pos, min, max, dir, scm::Class { set, data })
            }
            Insn::MatchAny => Self::run_scm_loop_impl(input, *pos, min, max, dir, scm::MatchAny),
            Insn::MatchAnyExceptLineTerminator => Self::run_scm_loop_impl(
                input,
                *pos,
                min,
                max,
                dir,
                scm::MatchAnyExceptLineTerminator,
            ),
            _ => {
                // There should be no other SCMs.
                rs_unreachable!("Missing SCM");
            }
        };

        // If loop_res is none, we failed to match at least the minimum.
        let (min_pos, max_pos) = loop_res?;
        debug_assert!(
            if dir.is_forward() {
                min_pos <= max_pos
            } else {
                min_pos >= max_pos
            },
            "min should be <= (>=) max if cursor is tracking forwards (backwards)"
        );

        // The continuation is one past the loop body, which is one past the loop.
        let continuation = ip + 2;
        if min_pos != max_pos && !atomic {
            // Backtracking is possible.
            let caps = self.groups.clone();
            let bti = if greedy {
                BacktrackInsn::GreedyLoop1Char {
                    continuation,
                    min: min_pos,
                    max: max_pos,
                    caps,
                }
            } else {
                BacktrackInsn::NonGreedyLoop1Char {
                    continuation,
                    min: min_pos,
                    max: max_pos,
                    caps,
                }
            };
            self.push_backtrack(bti);
        }

        // Start at the max (min) if greedy (nongreedy).
        *pos = if greedy || atomic { max_pos } else { min_pos };
        Some(continuation)
    }

    /// \return whether a prerequisite holds for the next character \p c.
    #[inline(always)]
    fn prereq_holds(&self, prereq: Prereq, c: Option<u32>) -> bool {
        let Some(c) = c else {
            return false;
        };
        match prereq {
            Prereq::Char(pc) => c == pc,
            Prereq::CharICase(pc) => c == pc || self.fold.canonicalize(c) == pc,
            Prereq::Class(idx) => self
                .re
                .classes
                .iat(idx as usize)
                .contains(c, &*self.re.unicode_data),
        }
    }

    /// Try the alternatives of the class at \p idx at \p pos, starting with
    /// alternative \p first: the long strings longest first, then a single
    /// code point, then the empty string.
    /// \return the position after the match and the index of the alternative.
    fn try_class_strings(
        &self,
        input: &Utf16Input,
        dir: Direction,
        idx: usize,
        pos: usize,
        first: usize,
    ) -> Option<(usize, usize)> {
        let set = self.re.classes.iat(idx);
        let long = set.long_strings();
        let count = long.len() + 1 + usize::from(set.has_empty_string());
        for alt in first..count {
            let mut p = pos;
            let matched = if alt < long.len() {
                matchers::class_string(input, dir, &mut p, long.iat(alt), set.fold())
            } else if alt == long.len() {
                cursor::next(input, dir, &mut p)
                    .is_some_and(|c| set.contains(c, &*self.re.unicode_data))
            } else {
                true
            };
            if matched {
                return Some((p, alt));
            }
        }
        None
    }

    /// \return the number of alternatives of the class at \p idx.
    fn class_string_count(&self, idx: usize) -> usize {
        let set = self.re.classes.iat(idx);
        set.long_strings().len() + 1 + usize::from(set.has_empty_string())
    }

    /// Attempt to backtrack.
    /// \return true if we backtracked, false if we exhaust the backtrack stack.
    fn try_backtrack(
        &mut self,
        input: &Utf16Input,
        ip: &mut IP,
        pos: &mut usize,
        dir: &mut Direction,
    ) -> bool {
        loop {
            // We always have a single Exhausted instruction backstopping our stack,
            // so we do not need to check for empty bts.
            let bt = match self.bts.last_mut() {
                Some(bt) => bt,
                None => rs_unreachable!("BT stack should never be empty"),
            };
            match bt {
                BacktrackInsn::Exhausted => return false,

                BacktrackInsn::SetPosition { .. } => {
                    let Some(BacktrackInsn::SetPosition {
                        ip: saved_ip,
                        pos: saved_pos,
                        caps,
                    }) = self.bts.pop()
                    else {
                        rs_unreachable!("Frame should be SetPosition")
                    };
                    *ip = saved_ip;
                    *pos = saved_pos;
                    self.groups = caps;
                    return true;
                }

                BacktrackInsn::SetLoopData { id, data } => {
                    *self.loops.mat(*id as usize) = *data;
                    self.pop_backtrack();
                }

                &mut BacktrackInsn::EnterNonGreedyLoop {
                    ip: loop_ip,
                    data,
                    ref caps,
                } => {
                    self.groups = caps.clone();
                    // Must pop before we enter the loop.
                    self.pop_backtrack();
                    *ip = loop_ip + 1;
                    *pos = data.entry;
                    let loop_fields = match self.re.insns.iat(loop_ip) {
                        Insn::EnterLoop(loop_fields) => loop_fields,
                        _ => rs_unreachable!("EnterNonGreedyLoop must point at a loop instruction"),
                    };
                    let loop_data = self.loops.mat(loop_fields.loop_id as usize);
                    *loop_data = data;
                    MatchAttempter::prepare_to_enter_loop(
                        &mut self.bts,
                        *pos,
                        loop_fields,
                        loop_data,
                    );
                    return true;
                }

                BacktrackInsn::GreedyLoop1Char {
                    continuation,
                    min,
                    max,
                    caps,
                } => {
                    // The match failed at the max location.
                    // If min is equal to max, there is no more backtracking to be done;
                    // otherwise move opposite the direction of the cursor.
                    if *max == *min {
                        // We have backtracked this loop as far as possible.
                        self.pop_backtrack();
                        continue;
                    }
                    let newmax = match cursor::retreat(input, *dir, *max) {
                        Some(p) if dir.is_forward() => p.max(*min),
                        Some(p) => p.min(*min),
                        None => rs_unreachable!("Should always be able to retreat since min != max"),
                    };
                    *pos = newmax;
                    *max = newmax;
                    *ip = *continuation;
                    self.groups = caps.clone();
                    return true;
                }

                BacktrackInsn::NonGreedyLoop1Char {
                    continuation,
                    min,
                    max,
                    caps,
                } => {
                    // The match failed at the min location.
                    if *max == *min {
                        // We have backtracked this loop as far as possible.
                        self.pop_backtrack();
                        continue;
                    }
                    // Move in the direction of the cursor.
                    let newmin = match cursor::advance(input, *dir, *min) {
                        Some(p) if dir.is_forward() => p.min(*max),
                        Some(p) => p.max(*max),
                        None => rs_unreachable!("Should always be able to advance since min != max"),
                    };
                    *pos = newmin;
                    *min = newmin;
                    *ip = *continuation;
                    self.groups = caps.clone();
                    return true;
                }

                &mut BacktrackInsn::ClassStrings {
                    ip: class_ip,
                    pos: start,
                    next_idx,
                    ref caps,
                } => {
                    let caps = caps.clone();
                    self.pop_backtrack();
                    let idx = match self.re.insns.iat(class_ip) {
                        &Insn::ClassStrings(idx) => idx as usize,
                        _ => rs_unreachable!("Frame should point at a ClassStrings instruction"),
                    };
                    if let Some((end, alt)) = self.try_class_strings(input, *dir, idx, start, next_idx)
                    {
                        if alt + 1 < self.class_string_count(idx) {
                            self.push_backtrack(BacktrackInsn::ClassStrings {
                                ip: class_ip,
                                pos: start,
                                next_idx: alt + 1,
                                caps: caps.clone(),
                            });
                        }
                        self.groups = caps;
                        *pos = end;
                        *ip = class_ip + 1;
                        return true;
                    }
                }

                &mut BacktrackInsn::LookaroundBarrier {
                    negate,
                    continuation,
                    pos: saved_pos,
                    dir: saved_dir,
                    ref caps,
                } => {
                    // The lookaround body failed.
                    let caps = caps.clone();
                    self.pop_backtrack();
                    self.lookaround_stack.pop();
                    *dir = saved_dir;
                    if negate {
                        self.groups = caps;
                        *pos = saved_pos;
                        *ip = continuation;
                        return true;
                    }
                }
            }
        }
    }

    /// Attempt to match at a given IP and position.
    fn try_at_pos<B: StepBudget + ?Sized>(
        &mut self,
        input: &Utf16Input,
        mut ip: IP,
        mut pos: usize,
        budget: &mut B,
    ) -> Result<Option<usize>, Aborted> {
        debug_assert!(
            self.bts.len() == 1,
            "Should be only initial exhausted backtrack insn"
        );
        let re = self.re;
        let mut dir = Direction::Forward;
        // These are not really loops, they are just labels that we effectively 'goto'
        // to.
        #[allow(clippy::never_loop)]
        'nextinsn: loop {
            'backtrack: loop {
                if !budget.step() {
                    self.bts.truncate(1);
                    self.lookaround_stack.clear();
                    self.groups = Rc::new(vec![GroupData::new(); re.groups as usize]);
                    return Err(Aborted);
                }

                // Helper macro to either increment ip and go to the next insn, or backtrack.
                macro_rules! next_or_bt {
                    ($e:expr) => {
                        if $e {
                            ip += 1;
                            continue 'nextinsn;
                        } else {
                            break 'backtrack;
                        }
                    };
                }

                match re.insns.iat(ip) {
                    &Insn::Char(c) => {
                        next_or_bt!(scm::Char { c }.matches(input, dir, &mut pos))
                    }

                    &Insn::CharICase(c) => {
                        let fold = self.fold;
                        next_or_bt!(scm::CharICase { c, fold }.matches(input, dir, &mut pos))
                    }

                    Insn::Literal { chars, icase } => {
                        let fold = icase.then_some(self.fold);
                        next_or_bt!(cursor::try_match_lit(input, dir, &mut pos, chars, fold))
                    }

                    &Insn::Class(idx) => {
                        let set = re.classes.iat(idx as usize);
                        let data = &*re.unicode_data;
                        next_or_bt!(scm::Class { set, data }.matches(input, dir, &mut pos))
                    }

                    &Insn::ClassStrings(idx) => {
                        let idx = idx as usize;
                        match self.try_class_strings(input, dir, idx, pos, 0) {
                            Some((end, alt)) => {
                                if alt + 1 < self.class_string_count(idx) {
                                    self.push_backtrack(BacktrackInsn::ClassStrings {
                                        ip,
                                        pos,
                                        next_idx: alt + 1,
                                        caps: self.groups.clone(),
                                    });
                                }
                                pos = end;
                                next_or_bt!(true)
                            }
                            None => next_or_bt!(false),
                        }
                    }

                    Insn::MatchAny => {
                        next_or_bt!(scm::MatchAny.matches(input, dir, &mut pos))
                    }

                    Insn::MatchAnyExceptLineTerminator => {
                        next_or_bt!(scm::MatchAnyExceptLineTerminator.matches(input, dir, &mut pos))
                    }

                    &Insn::WordBoundary { invert } => {
                        let is_boundary = matchers::is_word_boundary(input, pos, self.extended_words);
                        next_or_bt!(is_boundary != invert)
                    }

                    &Insn::StartOfLine { multiline } => {
                        let matches = match input.peek_left(pos) {
                            None => true,
                            Some(c) => multiline && is_line_terminator(c),
                        };
                        next_or_bt!(matches)
                    }

                    &Insn::EndOfLine { multiline } => {
                        let matches = match input.peek_right(pos) {
                            None => true, // we're at the right of the string
                            Some(c) => multiline && is_line_terminator(c),
                        };
                        next_or_bt!(matches)
                    }

                    &Insn::Jump { target } => {
                        ip = target as IP;
                        continue 'nextinsn;
                    }

                    &Insn::Alt { secondary } => {
                        self.push_backtrack(BacktrackInsn::SetPosition {
                            ip: secondary as IP,
                            pos,
                            caps: self.groups.clone(),
                        });
                        next_or_bt!(true);
                    }

                    &Insn::AltPrereq {
                        secondary,
                        left,
                        right,
                    } => {
                        let c = cursor::peek(input, dir, pos);
                        match (self.prereq_holds(left, c), self.prereq_holds(right, c)) {
                            (true, true) => {
                                self.push_backtrack(BacktrackInsn::SetPosition {
                                    ip: secondary as IP,
                                    pos,
                                    caps: self.groups.clone(),
                                });
                                next_or_bt!(true)
                            }
                            (true, false) => next_or_bt!(true),
                            (false, true) => {
                                ip = secondary as IP;
                                continue 'nextinsn;
                            }
                            (false, false) => next_or_bt!(false),
                        }
                    }

                    &Insn::BeginCaptureGroup(cg_idx) => {
                        let forward = dir.is_forward();
                        let cg = self.groups_mut().mat(cg_idx as usize);
                        if forward {
                            cg.start = Some(pos);
                        } else {
                            cg.end = Some(pos);
                        }
                        next_or_bt!(true)
                    }

                    &Insn::EndCaptureGroup(cg_idx) => {
                        let forward = dir.is_forward();
                        let cg = self.groups_mut().mat(cg_idx as usize);
                        if forward {
                            debug_assert!(cg.start.is_some(), "Capture group should have been entered");
                            cg.end = Some(pos);
                        } else {
                            debug_assert!(cg.end.is_some(), "Capture group should have been entered");
                            cg.start = Some(pos)
                        }
                        next_or_bt!(true)
                    }

                    &Insn::ResetCaptureGroup(cg_idx) => {
                        if *self.groups.iat(cg_idx as usize) != GroupData::new() {
                            self.groups_mut().mat(cg_idx as usize).reset();
                        }
                        next_or_bt!(true)
                    }

                    &Insn::BackRef(cg_idx) => {
                        // Backreferences to a capture group that did not match always succeed.
                        // Note we may be in the capture group we are examining, e.g. /(abc\1)/.
                        let range = self.groups.iat(cg_idx as usize).as_range();
                        next_or_bt!(self.match_backref(input, dir, range, &mut pos))
                    }

                    Insn::NamedBackRef(cg_idxs) => {
                        // At most one group carrying a name can have matched.
                        let range = cg_idxs
                            .iter()
                            .find_map(|&idx| self.groups.iat(idx as usize).as_range());
                        next_or_bt!(self.match_backref(input, dir, range, &mut pos))
                    }

                    &Insn::Lookaround {
                        negate,
                        backwards,
                        start_group,
                        end_group,
                        continuation,
                    } => {
                        // Groups inside the lookaround start out unset.
                        let range = start_group as usize..end_group as usize;
                        if self.groups.iat(range.clone()).iter().any(|g| *g != GroupData::new()) {
                            for g in self.groups_mut().mat(range) {
                                g.reset();
                            }
                        }
                        self.lookaround_stack.push(self.bts.len());
                        self.push_backtrack(BacktrackInsn::LookaroundBarrier {
                            negate,
                            continuation: continuation as IP,
                            pos,
                            dir,
                            caps: self.groups.clone(),
                        });
                        dir = if backwards {
                            Direction::Backward
                        } else {
                            Direction::Forward
                        };
                        next_or_bt!(true)
                    }

                    Insn::LookaroundEnd => {
                        // The body matched. Discard its choice points.
                        let barrier = match self.lookaround_stack.pop() {
                            Some(barrier) => barrier,
                            None => rs_unreachable!("LookaroundEnd outside a lookaround"),
                        };
                        let (negate, continuation, saved_pos, saved_dir) =
                            match self.bts.iat(barrier) {
                                &BacktrackInsn::LookaroundBarrier {
                                    negate,
                                    continuation,
                                    pos,
                                    dir,
                                    ..
                                } => (negate, continuation, pos, dir),
                                _ => rs_unreachable!("Lookaround stack should point at a barrier"),
                            };
                        self.bts.truncate(barrier);
                        dir = saved_dir;
                        if negate {
                            break 'backtrack;
                        }
                        pos = saved_pos;
                        ip = continuation;
                        continue 'nextinsn;
                    }

                    Insn::EnterLoop(fields) => {
                        // Entering a loop, not re-entering it.
                        self.loops.mat(fields.loop_id as usize).iters = 0;
                        match self.run_loop(fields, pos, ip) {
                            Some(next_ip) => {
                                ip = next_ip;
                                continue 'nextinsn;
                            }
                            None => {
                                break 'backtrack;
                            }
                        }
                    }

                    &Insn::LoopAgain { begin } => {
                        let act = match re.insns.iat(begin as IP) {
                            Insn::EnterLoop(fields) => self.run_loop(fields, pos, begin as IP),
                            _ => rs_unreachable!("EnterLoop should always refer to loop field"),
                        };
                        match act {
                            Some(next_ip) => {
                                ip = next_ip;
                                continue 'nextinsn;
                            }
                            None => break 'backtrack,
                        }
                    }

                    &Insn::Loop1CharBody {
                        min_iters,
                        max_iters,
                        greedy,
                        atomic,
                    } => {
                        if let Some(next_ip) = self.run_scm_loop(
                            input, dir, &mut pos, min_iters, max_iters, ip, greedy, atomic,
                        ) {
                            ip = next_ip;
                            continue 'nextinsn;
                        } else {
                            break 'backtrack;
                        }
                    }

                    Insn::Goal => {
                        // Keep all but the initial give-up bts.
                        self.bts.truncate(1);
                        debug_assert!(self.lookaround_stack.is_empty());
                        return Ok(Some(pos));
                    }
                }
            }

            // This after the backtrack loop.
            // A break 'backtrack will jump here.
            if self.try_backtrack(input, &mut ip, &mut pos, &mut dir) {
                continue 'nextinsn;
            } else {
                // We have exhausted the backtracking stack.
                debug_assert!(self.bts.len() == 1, "Should have exhausted backtrack stack");
                return Ok(None);
            }
        }
    }

    /// Match the text of a group, or succeed if the group is unset.
    #[inline]
    fn match_backref(
        &self,
        input: &Utf16Input,
        dir: Direction,
        range: Option<std::ops::Range<usize>>,
        pos: &mut usize,
    ) -> bool {
        match range {
            None => true,
            Some(range) if self.re.flags.icase => {
                matchers::backref_icase(input, dir, range, pos, self.fold)
            }
            Some(range) => matchers::backref(input, dir, range, pos),
        }
    }
}

#[derive(Debug)]
pub struct BacktrackExecutor<'r, T: Text> {
    text: T,
    matcher: MatchAttempter<'r>,
}

impl<'r, T: Text> BacktrackExecutor<'r, T> {
    pub fn new(re: &'r CompiledRegex, text: T) -> Self {
        Self {
            text,
            matcher: MatchAttempter::new(re),
        }
    }

    /// Convert a caller offset to a position in the text.
    pub fn initial_position(&self, offset: usize) -> usize {
        self.text.offset_to_pos(offset)
    }

    fn successful_match(&mut self, start: usize, end: usize) -> Match {
        let text = &self.text;
        let captures = self
            .matcher
            .groups
            .iter()
            .map(|gd| {
                gd.as_range()
                    .map(|r| text.pos_to_offset(r.start)..text.pos_to_offset(r.end))
            })
            .collect();
        self.matcher.groups = Rc::new(vec![GroupData::new(); self.matcher.re.groups as usize]);
        Match {
            range: text.pos_to_offset(start)..text.pos_to_offset(end),
            captures,
            group_names: self.matcher.re.group_names.clone(),
        }
    }

    /// \return the first position at or after \p pos where a match may begin.
    fn next_candidate(&self, input: &Utf16Input, pos: usize) -> Option<usize> {
        let units = input.units();
        match &self.matcher.re.start_pred {
            StartPredicate::Arbitrary | StartPredicate::StartAnchored => Some(pos),
            StartPredicate::LineStart => {
                if pos == 0 {
                    return Some(0);
                }
                (pos..=units.len()).find(|&p| is_line_terminator(*units.iat(p - 1) as u32))
            }
            StartPredicate::LeadingUnits(lead) => {
                let last = units.len().checked_sub(lead.len())?;
                (pos..=last).find(|&p| units[p..p + lead.len()] == **lead)
            }
        }
    }

    /// Search for a match starting at \p start, or only at \p start if
    /// \p sticky. \return the match and the position to resume searching.
    pub fn search<B: StepBudget + ?Sized>(
        &mut self,
        start: usize,
        sticky: bool,
        budget: &mut B,
    ) -> Result<Option<(Match, Option<usize>)>, Aborted> {
        let re = self.matcher.re;
        let unicode = re.flags.unicode || re.flags.unicode_sets;
        let units = self.text.units();
        let input = Utf16Input::new(units, unicode);
        let start = start.min(units.len());
        let single_attempt = sticky || re.start_pred == StartPredicate::StartAnchored;
        if single_attempt {
            tracing::debug!(start, sticky, "trying a single start position");
        }

        let mut pos = start;
        let end = loop {
            if !single_attempt {
                match self.next_candidate(&input, pos) {
                    Some(p) => pos = p,
                    None => return Ok(None),
                }
            }
            let attempt = self.matcher.try_at_pos(&input, 0, pos, budget);
            if attempt.is_err() {
                tracing::debug!(pos, "match aborted by budget");
            }
            if let Some(end) = attempt? {
                break end;
            }
            if single_attempt {
                return Ok(None);
            }
            // Didn't find it at this position, try the next one.
            self.matcher.groups = Rc::new(vec![GroupData::new(); re.groups as usize]);
            match input.next_right_pos(pos) {
                Some(p) => pos = p,
                None => return Ok(None),
            }
        };
        // If we matched the empty string, we have to increment.
        let next_start = if end != pos {
            Some(end)
        } else {
            input.next_right_pos(end)
        };
        Ok(Some((self.successful_match(pos, end), next_start)))
    }
}

impl<T: Text> exec::MatchProducer for BacktrackExecutor<'_, T> {
    fn next_match(&mut self, pos: usize, next_start: &mut Option<usize>) -> Option<Match> {
        let sticky = self.matcher.re.flags.sticky;
        match self.search(pos, sticky, &mut Unbounded) {
            Ok(Some((m, next))) => {
                *next_start = next;
                Some(m)
            }
            Ok(None) | Err(Aborted) => None,
        }
    }
}
