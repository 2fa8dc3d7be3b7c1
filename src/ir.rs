//! Intermediate representation for a regex

use crate::api;
use crate::error::{Error, ErrorKind};
use crate::types::{CaptureGroupID, ClassID, ClassModel, GroupName};
use core::fmt;

/// An index into the node arena of a [`Regex`].
pub type NodeId = usize;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnchorType {
    StartOfLine, // ^
    EndOfLine,   // $
}

/// A Quantifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quantifier {
    /// Minimum number of iterations of the loop, inclusive.
    pub min: usize,

    /// Maximum number of iterations of the loop, inclusive.
    /// usize::MAX means unbounded.
    pub max: usize,

    /// Whether the loop is greedy.
    pub greedy: bool,
}

/// The element range of the pattern text that produced a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

/// The node types of our IR.
#[derive(Debug, Clone)]
pub enum Node {
    /// Matches the empty string.
    Empty,

    /// Reaching this node terminates the match successfully.
    Goal,

    /// Match a literal character.
    /// If icase is true, then `c` MUST be already canonicalized.
    Char {
        c: u32,
        icase: bool,
        src: SourceSpan,
    },

    /// Match a run of characters, in the order they are met when moving in
    /// the node's direction.
    Literal {
        chars: Vec<u32>,
        icase: bool,
        src: SourceSpan,
    },

    /// Match the catenation of multiple nodes.
    Cat(Vec<NodeId>),

    /// Match an alternation like a|b|c, trying alternatives in order.
    Alt(Vec<NodeId>),

    /// Match anything including newlines.
    MatchAny,

    /// Match anything except a newline.
    MatchAnyExceptLineTerminator,

    /// Match an anchor like ^ or $
    Anchor(AnchorType),

    /// Word boundary (\b or \B).
    WordBoundary { invert: bool },

    /// A capturing group.
    CaptureGroup(NodeId, CaptureGroupID),

    /// A backreference to one or more groups. A numbered reference has one
    /// group; a named reference has every group carrying the name.
    BackRef(Vec<CaptureGroupID>),

    /// A character class, indexing the regex's class list.
    Class(ClassID),

    /// A lookaround assertions like (?:) or (?!).
    LookaroundAssertion {
        negate: bool,
        backwards: bool,
        start_group: CaptureGroupID,
        end_group: CaptureGroupID,
        contents: NodeId,
    },

    /// A loop like /.*/ or /x{3, 5}?/
    Loop {
        loopee: NodeId,
        quant: Quantifier,
        enclosed_groups: core::ops::Range<u16>,
    },

    /// A loop whose body matches exactly one character.
    /// Enclosed capture groups are forbidden here.
    /// An atomic loop never gives back what it matched.
    Loop1CharBody {
        loopee: NodeId,
        quant: Quantifier,
        atomic: bool,
    },
}

impl Node {
    /// \return whether this is an Empty node.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// \return whether this is a Cat node.
    pub fn is_cat(&self) -> bool {
        matches!(self, Node::Cat(..))
    }

    /// \return the children of this node, in order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Cat(nodes) | Node::Alt(nodes) => nodes.clone(),
            Node::CaptureGroup(contents, ..)
            | Node::LookaroundAssertion { contents, .. }
            | Node::Loop {
                loopee: contents, ..
            }
            | Node::Loop1CharBody {
                loopee: contents, ..
            } => vec![*contents],
            _ => Vec::new(),
        }
    }

    /// A rough count of the instructions this node emits, not counting its
    /// children.
    pub fn insn_estimate(&self) -> usize {
        match self {
            Node::Empty | Node::Cat(..) => 0,
            Node::Alt(alts) => 2 * alts.len().saturating_sub(1),
            Node::CaptureGroup(..) => 2,
            Node::LookaroundAssertion { .. } => 2,
            Node::Loop { enclosed_groups, .. } => {
                3 + (enclosed_groups.end - enclosed_groups.start) as usize
            }
            Node::Loop1CharBody { .. } => 2,
            _ => 1,
        }
    }
}

/// A helper type for walking.
#[derive(Debug, Clone)]
pub struct Walk {
    // It set to true, skip the children of this node.
    pub skip_children: bool,

    // The current depth of the walk.
    pub depth: usize,

    // If true, we are in a lookbehind (and so the cursor will move backwards).
    pub in_lookbehind: bool,

    // If the regex is in unicode mode.
    pub unicode: bool,
}

impl Walk {
    fn new(unicode: bool) -> Self {
        Self {
            skip_children: false,
            depth: 0,
            in_lookbehind: false,
            unicode,
        }
    }
}

#[derive(Debug)]
struct Walker<'a, F>
where
    F: FnMut(NodeId, &Node, &mut Walk),
{
    re: &'a Regex,
    func: &'a mut F,
    postorder: bool,
    walk: Walk,
}

impl<F> Walker<'_, F>
where
    F: FnMut(NodeId, &Node, &mut Walk),
{
    fn process_children(&mut self, n: &Node) {
        match n {
            Node::LookaroundAssertion {
                backwards,
                contents,
                ..
            } => {
                let saved = self.walk.in_lookbehind;
                self.walk.in_lookbehind = *backwards;
                self.process(*contents);
                self.walk.in_lookbehind = saved;
            }
            _ => {
                for child in n.children() {
                    self.process(child);
                }
            }
        }
    }

    fn process(&mut self, id: NodeId) {
        let re = self.re;
        let n = re.node(id);
        self.walk.skip_children = false;
        if !self.postorder {
            (self.func)(id, n, &mut self.walk);
        }
        if !self.walk.skip_children {
            self.walk.depth += 1;
            self.process_children(n);
            self.walk.depth -= 1;
        }
        if self.postorder {
            (self.func)(id, n, &mut self.walk)
        }
    }
}

/// Call a function on every Node reachable from the root.
/// If \p postorder is true, then process children before the node;
/// otherwise process children after the node.
pub fn walk<F>(postorder: bool, re: &Regex, func: &mut F)
where
    F: FnMut(NodeId, &Node, &mut Walk),
{
    let mut walker = Walker {
        re,
        func,
        postorder,
        walk: Walk::new(re.flags.unicode || re.flags.unicode_sets),
    };
    walker.process(re.root);
}

/// A regex in IR form.
#[derive(Debug, Clone)]
pub struct Regex {
    /// The node arena. Nodes unreachable from `root` are garbage.
    pub nodes: Vec<Node>,
    pub root: NodeId,
    pub flags: api::Flags,

    /// Classes referenced by Class nodes.
    pub classes: Vec<ClassModel>,

    pub group_count: CaptureGroupID,
    pub group_names: Vec<GroupName>,
    pub loop_count: u16,

    /// An estimate of the instruction count, used to size the emit buffer.
    pub estimate: usize,
}

impl Regex {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Add a node to the arena, returning its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// \return the reachable nodes in postorder, with the walk state of each.
    pub fn postorder(&self) -> Vec<(NodeId, Walk)> {
        let mut result = Vec::new();
        walk(true, self, &mut |id, _n, w: &mut Walk| result.push((id, w.clone())));
        result
    }

    /// Rebuild the regex so that the catenations inside lookbehinds run
    /// right to left. The result has a fresh arena holding only reachable nodes.
    pub fn reverse_lookbehinds(&self, max_depth: usize) -> Result<Regex, Error> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let root = self.rebuild(self.root, false, 0, max_depth, &mut nodes)?;
        Ok(Regex {
            nodes,
            root,
            flags: self.flags,
            classes: self.classes.clone(),
            group_count: self.group_count,
            group_names: self.group_names.clone(),
            loop_count: self.loop_count,
            estimate: self.estimate,
        })
    }

    fn rebuild(
        &self,
        id: NodeId,
        in_lookbehind: bool,
        depth: usize,
        max_depth: usize,
        out: &mut Vec<Node>,
    ) -> Result<NodeId, Error> {
        // Each group level may add a few IR levels; allow for that.
        if depth > 4 * max_depth + 8 {
            return Err(Error::new(ErrorKind::NestingTooDeep, 0));
        }
        let sub = |child: NodeId, lb: bool, out: &mut Vec<Node>| {
            self.rebuild(child, lb, depth + 1, max_depth, out)
        };
        let new_node = match self.node(id) {
            Node::Cat(children) => {
                let mut new_children = Vec::with_capacity(children.len());
                for &child in children {
                    new_children.push(sub(child, in_lookbehind, out)?);
                }
                if in_lookbehind {
                    new_children.reverse();
                }
                Node::Cat(new_children)
            }
            Node::Alt(children) => {
                let mut new_children = Vec::with_capacity(children.len());
                for &child in children {
                    new_children.push(sub(child, in_lookbehind, out)?);
                }
                Node::Alt(new_children)
            }
            &Node::CaptureGroup(contents, group) => {
                Node::CaptureGroup(sub(contents, in_lookbehind, out)?, group)
            }
            &Node::LookaroundAssertion {
                negate,
                backwards,
                start_group,
                end_group,
                contents,
            } => Node::LookaroundAssertion {
                negate,
                backwards,
                start_group,
                end_group,
                contents: sub(contents, backwards, out)?,
            },
            Node::Loop {
                loopee,
                quant,
                enclosed_groups,
            } => Node::Loop {
                loopee: sub(*loopee, in_lookbehind, out)?,
                quant: *quant,
                enclosed_groups: enclosed_groups.clone(),
            },
            &Node::Loop1CharBody {
                loopee,
                quant,
                atomic,
            } => Node::Loop1CharBody {
                loopee: sub(loopee, in_lookbehind, out)?,
                quant,
                atomic,
            },
            leaf => leaf.clone(),
        };
        out.push(new_node);
        Ok(out.len() - 1)
    }
}

fn display_node(re: &Regex, node: &Node, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "..")?;
    }
    match node {
        Node::Empty => {
            writeln!(f, "Empty")?;
        }
        Node::Goal => {
            writeln!(f, "Goal")?;
        }
        &Node::Char { c, icase, .. } => {
            let ic = if icase { " (icase)" } else { "" };
            writeln!(f, "'{}'{}", crate::util::to_char_sat(c).escape_debug(), ic)?;
        }
        Node::Literal { chars, icase, .. } => {
            let s: String = chars.iter().map(|&c| crate::util::to_char_sat(c)).collect();
            let ic = if *icase { " (icase)" } else { "" };
            writeln!(f, "Literal {:?}{}", s, ic)?;
        }
        Node::Cat(..) => {
            writeln!(f, "Cat")?;
        }
        Node::Alt(..) => {
            writeln!(f, "Alt")?;
        }
        Node::MatchAny => {
            writeln!(f, "MatchAny")?;
        }
        Node::MatchAnyExceptLineTerminator => {
            writeln!(f, "MatchAnyExceptLineTerminator")?;
        }
        Node::Anchor(anchor_type) => {
            writeln!(f, "Anchor {:?}", anchor_type)?;
        }
        Node::Loop {
            quant,
            enclosed_groups,
            ..
        } => {
            writeln!(f, "Loop (groups {:?}) {:?}", enclosed_groups, quant)?;
        }
        Node::Loop1CharBody { quant, atomic, .. } => {
            let kind = if *atomic { "Loop1Char (atomic)" } else { "Loop1Char" };
            writeln!(f, "{} {:?}", kind, quant)?;
        }
        Node::CaptureGroup(_node, idx) => {
            let name = re
                .group_names
                .iter()
                .find(|gn| gn.indices.contains(idx))
                .map(|gn| gn.name.as_ref());
            match name {
                Some(name) => writeln!(f, "CaptureGroup {:?} {:?}", idx, name)?,
                None => writeln!(f, "CaptureGroup {:?}", idx)?,
            }
        }
        &Node::WordBoundary { invert } => {
            let kind = if invert { "\\B" } else { "\\b" };
            writeln!(f, "WordBoundary {:?} ", kind)?;
        }
        Node::BackRef(groups) => {
            writeln!(f, "BackRef {:?} ", groups)?;
        }
        &Node::Class(idx) => {
            writeln!(f, "Class {} {:?}", idx, re.classes[idx as usize])?;
        }

        &Node::LookaroundAssertion {
            negate,
            backwards,
            start_group,
            end_group,
            ..
        } => {
            let sense = if negate { "negative" } else { "positive" };
            let direction = if backwards { "backwards" } else { "forwards" };
            writeln!(
                f,
                "LookaroundAssertion {} {} {:?} {:?}",
                sense, direction, start_group, end_group
            )?;
        }
    }
    Ok(())
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = Ok(());
        walk(false, self, &mut |_id, node: &Node, walk: &mut Walk| {
            if result.is_ok() {
                result = display_node(self, node, walk.depth, f)
            }
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: char, at: usize) -> Node {
        Node::Char {
            c: c as u32,
            icase: false,
            src: SourceSpan {
                start: at,
                end: at + 1,
            },
        }
    }

    fn regex_with(nodes: Vec<Node>, root: NodeId) -> Regex {
        Regex {
            nodes,
            root,
            flags: api::Flags::default(),
            classes: Vec::new(),
            group_count: 0,
            group_names: Vec::new(),
            loop_count: 0,
            estimate: 0,
        }
    }

    #[test]
    fn lookbehind_cats_are_reversed() {
        // (?<=ab(?=cd))
        let nodes = vec![
            ch('a', 4),
            ch('b', 5),
            ch('c', 9),
            ch('d', 10),
            Node::Cat(vec![2, 3]),
            Node::LookaroundAssertion {
                negate: false,
                backwards: false,
                start_group: 0,
                end_group: 0,
                contents: 4,
            },
            Node::Cat(vec![0, 1, 5]),
            Node::LookaroundAssertion {
                negate: false,
                backwards: true,
                start_group: 0,
                end_group: 0,
                contents: 6,
            },
        ];
        let re = regex_with(nodes, 7).reverse_lookbehinds(50).unwrap();
        let mut chars = Vec::new();
        walk(false, &re, &mut |_id, n, _w| {
            if let Node::Char { c, .. } = n {
                chars.push(char::from_u32(*c).unwrap());
            }
        });
        // The lookahead keeps its order; the lookbehind is reversed.
        assert_eq!(chars, vec!['c', 'd', 'b', 'a']);
    }

    #[test]
    fn postorder_visits_children_first() {
        let nodes = vec![ch('x', 0), ch('y', 1), Node::Alt(vec![0, 1])];
        let re = regex_with(nodes, 2);
        let ids: Vec<NodeId> = re.postorder().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(re.to_string(), "Alt\n..'x'\n..'y'\n");
    }
}
