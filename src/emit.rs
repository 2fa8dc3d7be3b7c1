//! Regex compiler back-end: transforms IR into a CompiledRegex

use crate::charset::CharSet;
use crate::config::Options;
use crate::error::{Error, ErrorKind};
use crate::folds::CaseFold;
use crate::insn::{CompiledRegex, Insn, JumpTarget, LoopFields, Prereq};
use crate::ir;
use crate::ir::{NodeId, Node};
use crate::startpredicate;
use crate::types::LoopID;

/// \return an anchor instruction for a given IR anchor.
fn make_anchor(anchor_type: ir::AnchorType, multiline: bool) -> Insn {
    match anchor_type {
        ir::AnchorType::StartOfLine => Insn::StartOfLine { multiline },
        ir::AnchorType::EndOfLine => Insn::EndOfLine { multiline },
    }
}

fn too_complex() -> Error {
    Error::new(ErrorKind::ProgramTooComplex, 0)
}

/// Type which wraps up the context needed to emit a CompiledRegex.
struct Emitter<'a> {
    re: &'a ir::Regex,

    insns: Vec<Insn>,

    // Number of loops seen so far.
    next_loop_id: LoopID,

    // Whether each class has string alternatives.
    class_has_strings: Vec<bool>,

    max_depth: usize,
}

impl Emitter<'_> {
    /// Emit an instruction.
    fn emit_insn(&mut self, insn: Insn) {
        self.insns.push(insn);
    }

    /// Get an instruction at a given index.
    fn get_insn(&mut self, idx: JumpTarget) -> &mut Insn {
        &mut self.insns[idx as usize]
    }

    /// \return the offset of the next instruction emitted, which must fit in
    /// a jump operand.
    fn next_offset(&self) -> Result<JumpTarget, Error> {
        JumpTarget::try_from(self.insns.len()).map_err(|_| too_complex())
    }

    fn emit_insn_offset(&mut self, insn: Insn) -> Result<JumpTarget, Error> {
        let ret = self.next_offset()?;
        self.emit_insn(insn);
        Ok(ret)
    }

    /// \return a cheap test which any match of the node must pass at its
    /// first character, if there is one.
    fn first_prereq(&self, id: NodeId) -> Option<Prereq> {
        match self.re.node(id) {
            &Node::Char { c, icase, .. } => Some(if icase {
                Prereq::CharICase(c)
            } else {
                Prereq::Char(c)
            }),
            Node::Literal { chars, icase, .. } => {
                let c = *chars.first()?;
                Some(if *icase {
                    Prereq::CharICase(c)
                } else {
                    Prereq::Char(c)
                })
            }
            &Node::Class(idx) => {
                if self.re.flags.icase || self.class_has_strings[idx as usize] {
                    None
                } else {
                    Some(Prereq::Class(idx))
                }
            }
            &Node::CaptureGroup(contents, ..) => self.first_prereq(contents),
            Node::Cat(children) => self.first_prereq(*children.first()?),
            Node::Loop { loopee, quant, .. } | Node::Loop1CharBody { loopee, quant, .. }
                if quant.min > 0 =>
            {
                self.first_prereq(*loopee)
            }
            _ => None,
        }
    }

    /// Emit an alternation. Each alternative but the last is preceded by an
    /// Alt and followed by a jump to the exit.
    fn emit_alt(&mut self, alts: &[NodeId], depth: usize) -> Result<(), Error> {
        let Some((&last, init)) = alts.split_last() else {
            return Ok(());
        };
        let mut exit_jumps = Vec::with_capacity(init.len());
        for (idx, &alt) in init.iter().enumerate() {
            let is_last_pair = idx + 1 == init.len();
            let prereqs = if is_last_pair {
                self.first_prereq(alt).zip(self.first_prereq(last))
            } else {
                None
            };
            let alt_insn = self.emit_insn_offset(match prereqs {
                Some((left, right)) => Insn::AltPrereq {
                    secondary: 0,
                    left,
                    right,
                },
                None => Insn::Alt { secondary: 0 },
            })?;
            self.emit_node(alt, depth + 1)?;
            exit_jumps.push(self.emit_insn_offset(Insn::Jump { target: 0 })?);
            let next_branch = self.next_offset()?;
            match self.get_insn(alt_insn) {
                Insn::Alt { secondary } | Insn::AltPrereq { secondary, .. } => {
                    *secondary = next_branch
                }
                _ => rs_unreachable!("Should be an Alt instruction"),
            }
        }
        self.emit_node(last, depth + 1)?;

        // Fix up our jump targets.
        let exit = self.next_offset()?;
        for jump_insn in exit_jumps {
            match self.get_insn(jump_insn) {
                Insn::Jump { target } => *target = exit,
                _ => rs_unreachable!("Should be a Jump instruction"),
            }
        }
        Ok(())
    }

    /// Emit instructions corresponding to a given node.
    fn emit_node(&mut self, id: NodeId, depth: usize) -> Result<(), Error> {
        if depth > 4 * self.max_depth + 8 {
            return Err(Error::new(ErrorKind::NestingTooDeep, 0));
        }
        let re = self.re;
        match re.node(id) {
            Node::Empty => {}
            Node::Goal => self.emit_insn(Insn::Goal),
            &Node::Char { c, icase, .. } => {
                if icase {
                    self.emit_insn(Insn::CharICase(c))
                } else {
                    self.emit_insn(Insn::Char(c))
                }
            }
            Node::Literal { chars, icase, .. } => self.emit_insn(Insn::Literal {
                chars: chars.clone().into_boxed_slice(),
                icase: *icase,
            }),
            Node::Cat(children) => {
                for &child in children {
                    self.emit_node(child, depth + 1)?;
                }
            }
            Node::Alt(alts) => self.emit_alt(alts, depth)?,
            Node::MatchAny => self.emit_insn(Insn::MatchAny),
            Node::MatchAnyExceptLineTerminator => {
                self.emit_insn(Insn::MatchAnyExceptLineTerminator)
            }
            &Node::Anchor(anchor_type) => {
                self.emit_insn(make_anchor(anchor_type, re.flags.multiline))
            }
            &Node::WordBoundary { invert } => self.emit_insn(Insn::WordBoundary { invert }),
            &Node::CaptureGroup(contents, group) => {
                self.emit_insn(Insn::BeginCaptureGroup(group));
                self.emit_node(contents, depth + 1)?;
                self.emit_insn(Insn::EndCaptureGroup(group));
            }
            Node::BackRef(groups) => match groups.as_slice() {
                &[group] => self.emit_insn(Insn::BackRef(group)),
                _ => self.emit_insn(Insn::NamedBackRef(groups.clone().into_boxed_slice())),
            },
            &Node::Class(idx) => {
                if self.class_has_strings[idx as usize] {
                    self.emit_insn(Insn::ClassStrings(idx))
                } else {
                    self.emit_insn(Insn::Class(idx))
                }
            }
            &Node::LookaroundAssertion {
                negate,
                backwards,
                start_group,
                end_group,
                contents,
            } => {
                let lookaround = self.emit_insn_offset(Insn::Lookaround {
                    negate,
                    backwards,
                    start_group,
                    end_group,
                    continuation: 0,
                })?;
                self.emit_node(contents, depth + 1)?;
                self.emit_insn(Insn::LookaroundEnd);

                // Fix up the continuation.
                let next_insn = self.next_offset()?;
                match self.get_insn(lookaround) {
                    Insn::Lookaround { continuation, .. } => *continuation = next_insn,
                    _ => rs_unreachable!("Should be a Lookaround instruction"),
                }
            }
            Node::Loop {
                loopee,
                quant,
                enclosed_groups,
            } => {
                let loop_id = self.next_loop_id;
                self.next_loop_id = loop_id.checked_add(1).ok_or_else(too_complex)?;
                let loop_insn = self.emit_insn_offset(Insn::EnterLoop(LoopFields {
                    loop_id,
                    min_iters: quant.min,
                    max_iters: quant.max,
                    greedy: quant.greedy,
                    exit: 0,
                }))?;
                // Emit a sequence of ResetCaptureGroup for any contained groups.
                for gid in enclosed_groups.clone() {
                    self.emit_insn(Insn::ResetCaptureGroup(gid))
                }
                self.emit_node(*loopee, depth + 1)?;
                self.emit_insn(Insn::LoopAgain { begin: loop_insn });
                // Fix up our loop exit.
                let exit = self.next_offset()?;
                match self.get_insn(loop_insn) {
                    Insn::EnterLoop(fields) => fields.exit = exit,
                    _ => rs_unreachable!("Should be an EnterLoop instruction"),
                }
            }
            &Node::Loop1CharBody {
                loopee,
                quant,
                atomic,
            } => {
                self.emit_insn(Insn::Loop1CharBody {
                    min_iters: quant.min,
                    max_iters: quant.max,
                    greedy: quant.greedy,
                    atomic,
                });
                self.emit_node(loopee, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Compile the given IR to a CompiledRegex.
/// \p source is the pattern text, kept for display.
pub fn emit(re: &ir::Regex, options: &Options, source: String) -> Result<CompiledRegex, Error> {
    let mut emitter = Emitter {
        re,
        insns: Vec::with_capacity(re.estimate),
        next_loop_id: 0,
        class_has_strings: re.classes.iter().map(|c| c.has_strings()).collect(),
        max_depth: options.max_nesting_depth,
    };
    emitter.emit_node(re.root, 0)?;
    // Every instruction must be addressable by a jump.
    emitter.next_offset()?;

    let unicode = re.flags.unicode || re.flags.unicode_sets;
    let fold = re.flags.icase.then(|| CaseFold::for_mode(unicode));
    let extended_words = unicode && re.flags.icase;
    let classes = re
        .classes
        .iter()
        .map(|model| CharSet::new(model.clone(), fold, extended_words))
        .collect();

    Ok(CompiledRegex {
        insns: emitter.insns,
        classes,
        start_pred: startpredicate::predicate_for_re(re),
        loops: emitter.next_loop_id,
        groups: re.group_count,
        group_names: re.group_names.clone().into(),
        flags: re.flags,
        source,
        unicode_data: options.unicode_data.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Flags;
    use crate::parse;
    use crate::util::decode_elements;

    fn compile_with(pattern: &str, flags: Flags) -> Result<CompiledRegex, Error> {
        let options = Options::from(flags);
        let unicode = flags.unicode || flags.unicode_sets;
        let units: Vec<u16> = pattern.encode_utf16().collect();
        let mut re = parse::try_parse(&decode_elements(&units, unicode), &options)?;
        if !flags.no_opt {
            crate::optimizer::optimize(&mut re);
        }
        emit(&re, &options, pattern.to_string())
    }

    fn compile(pattern: &str, flags: &str) -> Result<CompiledRegex, Error> {
        compile_with(pattern, flags.parse().unwrap())
    }

    #[test]
    fn alternation_targets_are_resolved() {
        let cr = compile("ab|cd|ef", "").unwrap();
        let kinds: Vec<String> = cr.insns.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            kinds,
            vec![
                "Alt else -> 3",
                "Literal \"ab\"",
                "Jump -> 7",
                "AltPrereq ['c'] ['e'] else -> 6",
                "Literal \"cd\"",
                "Jump -> 7",
                "Literal \"ef\"",
                "Goal",
            ]
        );
    }

    #[test]
    fn prereqs_skip_optional_starts() {
        let cr = compile("a?b|c", "").unwrap();
        assert!(matches!(cr.insns[0], Insn::Alt { .. }));
        let cr = compile("(?:x+)y|[0-9]", "").unwrap();
        assert!(matches!(
            cr.insns[0],
            Insn::AltPrereq {
                left: Prereq::Char(0x78),
                right: Prereq::Class(0),
                ..
            }
        ));
    }

    #[test]
    fn loops_and_lookarounds() {
        let cr = compile("(?:a|b)*(?=c)", "").unwrap();
        assert!(matches!(&cr.insns[0], Insn::EnterLoop(f) if f.exit == 6));
        assert!(matches!(cr.insns[5], Insn::LoopAgain { begin: 0 }));
        assert!(matches!(
            cr.insns[6],
            Insn::Lookaround {
                continuation: 9,
                ..
            }
        ));
        assert!(matches!(cr.insns[8], Insn::LookaroundEnd));
        assert_eq!(cr.loops, 1);
    }

    #[test]
    fn oversized_programs_are_rejected() {
        let pattern = "a".repeat(70_000);
        // Optimized, the run of chars is a single literal.
        assert!(compile(&pattern, "").is_ok());
        let flags = Flags {
            no_opt: true,
            ..Flags::default()
        };
        let err = compile_with(&pattern, flags).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProgramTooComplex);
    }
}
