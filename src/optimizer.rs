//! Optimizations on regex IR

use crate::ir::*;

/// Things that a Pass may do.
pub enum PassAction {
    // Do nothing to the given node.
    Keep,

    // Notes that we modified the node in-place.
    Modified,

    // Remove the given node outright, effectively replacing it with empty.
    Remove,

    /// Replace the given node with a new Node.
    Replace(Node),
}

#[derive(Debug)]
struct Pass<'a, F>
where
    F: FnMut(&mut Regex, NodeId, &Walk) -> PassAction,
{
    // The function.
    func: &'a mut F,

    // Whether this pass has changed anything.
    changed: bool,
}

impl<'a, F> Pass<'a, F>
where
    F: FnMut(&mut Regex, NodeId, &Walk) -> PassAction,
{
    fn new(func: &'a mut F) -> Self {
        Pass {
            func,
            changed: false,
        }
    }

    /// Visit the reachable nodes in postorder. Ids are collected up front, so
    /// a node replaced by a pass is not revisited until the next round.
    fn run_postorder(&mut self, re: &mut Regex) {
        for (id, walk) in re.postorder() {
            match (self.func)(re, id, &walk) {
                PassAction::Keep => {}
                PassAction::Modified => {
                    self.changed = true;
                }
                PassAction::Remove => {
                    *re.node_mut(id) = Node::Empty;
                    self.changed = true;
                }
                PassAction::Replace(newnode) => {
                    *re.node_mut(id) = newnode;
                    self.changed = true;
                }
            }
        }
    }

    fn run_to_fixpoint(&mut self, re: &mut Regex) -> bool {
        let mut any = false;
        loop {
            self.changed = false;
            self.run_postorder(re);
            if !self.changed {
                break;
            }
            any = true;
        }
        any
    }
}

/// Run a "pass" on a regex, which is a function that inspects a node by id
/// and maybe replaces it. \return true if something changed.
fn run_pass<F>(r: &mut Regex, func: &mut F) -> bool
where
    F: FnMut(&mut Regex, NodeId, &Walk) -> PassAction,
{
    Pass::new(func).run_to_fixpoint(r)
}

/// \return whether the subtree at \p id contains a capture group.
fn contains_capture_groups(re: &Regex, id: NodeId) -> bool {
    match re.node(id) {
        Node::CaptureGroup(..) => true,
        n => n
            .children()
            .into_iter()
            .any(|child| contains_capture_groups(re, child)),
    }
}

// Remove excess cats.
fn decat(re: &mut Regex, id: NodeId, _w: &Walk) -> PassAction {
    let children = match re.node(id) {
        Node::Cat(children) => children.clone(),
        _ => return PassAction::Keep,
    };
    match children.len() {
        0 => PassAction::Remove,
        1 => PassAction::Replace(re.node(children[0]).clone()),
        _ if children.iter().any(|&c| re.node(c).is_cat()) => {
            let mut decatted = Vec::with_capacity(children.len());
            for c in children {
                match re.node(c) {
                    Node::Cat(grandchildren) => decatted.extend_from_slice(grandchildren),
                    _ => decatted.push(c),
                }
            }
            PassAction::Replace(Node::Cat(decatted))
        }
        _ => PassAction::Keep,
    }
}

// Remove empty Nodes.
fn remove_empties(re: &mut Regex, id: NodeId, _w: &Walk) -> PassAction {
    match re.node(id) {
        Node::Cat(children) => {
            let kept: Vec<NodeId> = children
                .iter()
                .copied()
                .filter(|&c| !re.node(c).is_empty())
                .collect();
            if kept.len() == children.len() {
                PassAction::Keep
            } else if kept.is_empty() {
                PassAction::Remove
            } else {
                PassAction::Replace(Node::Cat(kept))
            }
        }
        Node::Alt(alts) => {
            // An empty alternative may match the empty string.
            // Remove the alt only if every alternative is empty.
            if alts.iter().all(|&a| re.node(a).is_empty()) {
                PassAction::Remove
            } else {
                PassAction::Keep
            }
        }
        Node::Loop {
            loopee,
            quant,
            enclosed_groups,
        } => {
            // A loop is empty if it has an empty body, or 0 max iters.
            // But do not remove contained capture groups.
            if re.node(*loopee).is_empty()
                || (quant.max == 0 && enclosed_groups.start == enclosed_groups.end)
            {
                PassAction::Remove
            } else {
                PassAction::Keep
            }
        }
        Node::LookaroundAssertion {
            negate, contents, ..
        } => {
            // Negative lookarounds of empties always fail, and must stay.
            if !*negate && re.node(*contents).is_empty() {
                PassAction::Remove
            } else {
                PassAction::Keep
            }
        }
        _ => PassAction::Keep,
    }
}

/// \return whether the node always consumes exactly one character.
fn matches_exactly_one_char(re: &Regex, id: NodeId) -> bool {
    match re.node(id) {
        Node::Char { .. } | Node::MatchAny | Node::MatchAnyExceptLineTerminator => true,
        &Node::Class(idx) => !re.classes[idx as usize].has_strings(),
        _ => false,
    }
}

/// Replace Loops with 1Char loops whenever possible.
fn promote_1char_loops(re: &mut Regex, id: NodeId, _w: &Walk) -> PassAction {
    match re.node(id) {
        Node::Loop {
            loopee,
            quant,
            enclosed_groups,
        } => {
            if !matches_exactly_one_char(re, *loopee) {
                return PassAction::Keep;
            }
            debug_assert!(
                enclosed_groups.start >= enclosed_groups.end
                    && !contains_capture_groups(re, *loopee),
                "Should have no enclosed groups"
            );
            PassAction::Replace(Node::Loop1CharBody {
                loopee: *loopee,
                quant: *quant,
                atomic: false,
            })
        }
        _ => PassAction::Keep,
    }
}

/// The characters, case sensitivity and source span of a Char or Literal.
fn literal_parts(n: &Node) -> Option<(&[u32], bool, SourceSpan)> {
    match n {
        Node::Char { c, icase, src } => Some((core::slice::from_ref(c), *icase, *src)),
        Node::Literal { chars, icase, src } => Some((chars, *icase, *src)),
        _ => None,
    }
}

/// A literal being accumulated by form_literals.
struct PendingLiteral {
    chars: Vec<u32>,
    icase: bool,
    src: SourceSpan,
    merged: bool,
}

impl PendingLiteral {
    fn into_node(self) -> Node {
        Node::Literal {
            chars: self.chars,
            icase: self.icase,
            src: self.src,
        }
    }
}

/// Merge adjacent chars of a Cat into literals.
/// Chars merge only if they came from adjacent pattern text. In a
/// lookbehind the Cat is already reversed, so the spans run right to left.
fn form_literals(re: &mut Regex, id: NodeId, walk: &Walk) -> PassAction {
    let children = match re.node(id) {
        Node::Cat(children) => children.clone(),
        _ => return PassAction::Keep,
    };
    let backwards = walk.in_lookbehind;
    let mut modified = false;
    let mut result: Vec<NodeId> = Vec::with_capacity(children.len());
    let mut pending: Option<(NodeId, PendingLiteral)> = None;
    for child in children {
        let Some((chars, icase, src)) = literal_parts(re.node(child)) else {
            if let Some((first, lit)) = pending.take() {
                result.push(if lit.merged { re.add(lit.into_node()) } else { first });
            }
            result.push(child);
            continue;
        };
        if let Some((_, lit)) = &mut pending {
            let contiguous = if backwards {
                lit.src.start == src.end
            } else {
                lit.src.end == src.start
            };
            if lit.icase == icase && contiguous {
                lit.chars.extend_from_slice(chars);
                if backwards {
                    lit.src.start = src.start;
                } else {
                    lit.src.end = src.end;
                }
                lit.merged = true;
                modified = true;
                continue;
            }
        }
        let next = PendingLiteral {
            chars: chars.to_vec(),
            icase,
            src,
            merged: false,
        };
        if let Some((first, lit)) = pending.replace((child, next)) {
            result.push(if lit.merged { re.add(lit.into_node()) } else { first });
        }
    }
    if let Some((first, lit)) = pending.take() {
        result.push(if lit.merged { re.add(lit.into_node()) } else { first });
    }
    if modified {
        PassAction::Replace(Node::Cat(result))
    } else {
        PassAction::Keep
    }
}

/// Mark greedy one-char loops that are followed by a non-multiline `$` as
/// atomic: any shorter match would end before the end of input, where `$`
/// fails.
fn mark_atomic(re: &mut Regex, id: NodeId, walk: &Walk) -> PassAction {
    if re.flags.multiline || walk.in_lookbehind {
        return PassAction::Keep;
    }
    let children = match re.node(id) {
        Node::Cat(children) => children.clone(),
        _ => return PassAction::Keep,
    };
    let mut modified = false;
    for pair in children.windows(2) {
        let followed_by_eol = matches!(re.node(pair[1]), Node::Anchor(AnchorType::EndOfLine));
        if let Node::Loop1CharBody { quant, atomic, .. } = re.node_mut(pair[0]) {
            if followed_by_eol && quant.greedy && !*atomic {
                *atomic = true;
                modified = true;
            }
        }
    }
    if modified {
        PassAction::Modified
    } else {
        PassAction::Keep
    }
}

pub fn optimize(r: &mut Regex) {
    loop {
        let mut changed = false;
        changed |= run_pass(r, &mut decat);
        changed |= run_pass(r, &mut remove_empties);
        changed |= run_pass(r, &mut promote_1char_loops);
        if !changed {
            break;
        }
    }
    run_pass(r, &mut form_literals);
    run_pass(r, &mut decat);
    run_pass(r, &mut mark_atomic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::parse;
    use crate::util::decode_elements;

    fn optimized(pattern: &str, flags: &str) -> String {
        let options = Options::from(flags.parse::<crate::api::Flags>().unwrap());
        let unicode = options.flags.unicode || options.flags.unicode_sets;
        let units: Vec<u16> = pattern.encode_utf16().collect();
        let elements = decode_elements(&units, unicode);
        let mut re = parse::try_parse(&elements, &options).unwrap();
        optimize(&mut re);
        re.to_string()
    }

    #[test]
    fn literals_are_formed() {
        assert_eq!(optimized("abc", ""), "Cat\n..Literal \"abc\"\n..Goal\n");
        assert_eq!(
            optimized("ab(c)", ""),
            "Cat\n..Literal \"ab\"\n..CaptureGroup 0\n....'c'\n..Goal\n"
        );
    }

    #[test]
    fn lookbehind_literals_keep_matching_order() {
        let s = optimized("(?<=ab)", "");
        assert!(s.contains("Literal \"ba\""), "{}", s);
    }

    #[test]
    fn one_char_loops_are_promoted() {
        let s = optimized("a*b", "");
        assert!(s.contains("Loop1Char Quantifier"), "{}", s);
        let s = optimized("(a)*", "");
        assert!(!s.contains("Loop1Char"), "{}", s);
    }

    #[test]
    fn empties_are_removed() {
        assert_eq!(optimized("(?:)", ""), "Goal\n");
        assert_eq!(optimized("a{0}", ""), "Goal\n");
        // Groups inside a zero loop are kept.
        assert!(optimized("(a){0}", "").contains("CaptureGroup"));
        // Negative lookarounds of empties always fail.
        assert!(optimized("(?!)", "").contains("LookaroundAssertion"));
    }

    #[test]
    fn loops_before_end_become_atomic() {
        assert!(optimized("a+$", "").contains("(atomic)"));
        assert!(!optimized("a+$", "m").contains("(atomic)"));
        assert!(!optimized("a+?$", "").contains("(atomic)"));
        assert!(!optimized("a+b$", "").contains("(atomic)"));
    }
}
