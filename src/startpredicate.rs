//! Support for quickly finding potential match locations.
use crate::insn::StartPredicate;
use crate::ir;
use crate::ir::{Node, NodeId};
use crate::util::split_utf16;

/// Check if a node is anchored to the start of the line/string.
/// Returns true if the node begins with a StartOfLine anchor.
fn is_start_anchored(re: &ir::Regex, id: NodeId) -> bool {
    match re.node(id) {
        Node::Anchor(ir::AnchorType::StartOfLine) => true,
        // For concatenation, check if the first node is start-anchored
        Node::Cat(nodes) => nodes.first().is_some_and(|&n| is_start_anchored(re, n)),
        &Node::CaptureGroup(child, ..) => is_start_anchored(re, child),
        // Every alternative must be anchored.
        Node::Alt(alts) => alts.iter().all(|&n| is_start_anchored(re, n)),
        _ => false,
    }
}

/// The "IR" for a start predicate.
#[derive(Debug)]
enum AbstractStartPredicate {
    /// The node consumes nothing, and so does not contribute.
    ZeroWidth,

    /// No predicate.
    Arbitrary,

    /// Matches begin with these characters.
    Sequence(Vec<u32>),
}

impl AbstractStartPredicate {
    /// \return the disjunction of two predicates: the shared prefix of two
    /// sequences, otherwise no predicate.
    fn disjunction(x: Self, y: Self) -> Self {
        match (x, y) {
            (Self::Sequence(s1), Self::Sequence(s2)) => {
                let shared_len = s1.iter().zip(s2.iter()).take_while(|(a, b)| a == b).count();
                if shared_len > 0 {
                    Self::Sequence(s1[..shared_len].to_vec())
                } else {
                    Self::Arbitrary
                }
            }
            _ => Self::Arbitrary,
        }
    }

    /// Resolve ourselves to a concrete start predicate.
    /// The search is by code unit, so the sequence stops before any surrogate
    /// code point, which could begin in the middle of a pair.
    fn resolve_to_insn(self) -> StartPredicate {
        let Self::Sequence(chars) = self else {
            return StartPredicate::Arbitrary;
        };
        let mut units = Vec::with_capacity(chars.len());
        for c in chars {
            if (0xD800..=0xDFFF).contains(&c) {
                break;
            }
            let (first, second) = split_utf16(c);
            units.push(first);
            units.extend(second);
        }
        if units.is_empty() {
            StartPredicate::Arbitrary
        } else {
            StartPredicate::LeadingUnits(units.into_boxed_slice())
        }
    }
}

/// \return the characters of a case-sensitive Char or Literal.
fn exact_chars(n: &Node) -> Option<&[u32]> {
    match n {
        Node::Char { c, icase: false, .. } => Some(core::slice::from_ref(c)),
        Node::Literal {
            chars,
            icase: false,
            ..
        } => Some(chars),
        _ => None,
    }
}

/// Compute any start-predicate for a node.
fn compute_start_predicate(re: &ir::Regex, id: NodeId) -> AbstractStartPredicate {
    let n = re.node(id);
    if let Some(chars) = exact_chars(n) {
        return AbstractStartPredicate::Sequence(chars.to_vec());
    }
    match n {
        // Zero-width nodes leave the first consumed character to what follows.
        Node::Empty
        | Node::Anchor(..)
        | Node::WordBoundary { .. }
        | Node::LookaroundAssertion { .. } => AbstractStartPredicate::ZeroWidth,

        // A Cat takes the first contributing child, extended by any literals
        // which immediately follow an exact literal.
        Node::Cat(nodes) => {
            let mut prefix: Vec<u32> = Vec::new();
            let mut extendable = false;
            for &child in nodes {
                if !prefix.is_empty() {
                    match exact_chars(re.node(child)) {
                        Some(chars) if extendable => prefix.extend_from_slice(chars),
                        _ => break,
                    }
                    continue;
                }
                match compute_start_predicate(re, child) {
                    AbstractStartPredicate::ZeroWidth => continue,
                    AbstractStartPredicate::Arbitrary => return AbstractStartPredicate::Arbitrary,
                    AbstractStartPredicate::Sequence(chars) => {
                        prefix = chars;
                        extendable = exact_chars(re.node(child)).is_some();
                    }
                }
            }
            if prefix.is_empty() {
                AbstractStartPredicate::ZeroWidth
            } else {
                AbstractStartPredicate::Sequence(prefix)
            }
        }

        // Capture groups delegate to their contents.
        &Node::CaptureGroup(child, ..) => compute_start_predicate(re, child),

        Node::Loop { loopee, quant, .. } | Node::Loop1CharBody { loopee, quant, .. } => {
            if quant.min > 0 {
                compute_start_predicate(re, *loopee)
            } else {
                AbstractStartPredicate::Arbitrary
            }
        }

        // The disjunction of the predicates of every alternative.
        // A zero-width alternative may match the empty string.
        Node::Alt(alts) => {
            let mut result: Option<AbstractStartPredicate> = None;
            for &alt in alts {
                let pred = match compute_start_predicate(re, alt) {
                    AbstractStartPredicate::ZeroWidth => AbstractStartPredicate::Arbitrary,
                    pred => pred,
                };
                result = Some(match result {
                    None => pred,
                    Some(prev) => AbstractStartPredicate::disjunction(prev, pred),
                });
            }
            result.unwrap_or(AbstractStartPredicate::Arbitrary)
        }

        _ => AbstractStartPredicate::Arbitrary,
    }
}

/// \return the start predicate for a Regex.
pub fn predicate_for_re(re: &ir::Regex) -> StartPredicate {
    // In multiline mode ^ can match at the beginning of any line, not just
    // the string start.
    if is_start_anchored(re, re.root) {
        return if re.flags.multiline {
            StartPredicate::LineStart
        } else {
            StartPredicate::StartAnchored
        };
    }
    compute_start_predicate(re, re.root).resolve_to_insn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Flags;
    use crate::config::Options;
    use crate::parse;
    use crate::util::decode_elements;

    fn predicate(pattern: &str, flags: &str) -> StartPredicate {
        let flags: Flags = flags.parse().unwrap();
        let options = Options::from(flags);
        let units: Vec<u16> = pattern.encode_utf16().collect();
        let unicode = flags.unicode || flags.unicode_sets;
        let mut re = parse::try_parse(&decode_elements(&units, unicode), &options).unwrap();
        crate::optimizer::optimize(&mut re);
        predicate_for_re(&re)
    }

    fn units(s: &str) -> StartPredicate {
        StartPredicate::LeadingUnits(s.encode_utf16().collect())
    }

    #[test]
    fn anchors() {
        assert_eq!(predicate("^abc", ""), StartPredicate::StartAnchored);
        assert_eq!(predicate("(^a)|^b", ""), StartPredicate::StartAnchored);
        assert_eq!(predicate("^abc", "m"), StartPredicate::LineStart);
        assert_eq!(predicate("^a|b", ""), StartPredicate::Arbitrary);
    }

    #[test]
    fn leading_literals() {
        assert_eq!(predicate("abc", ""), units("abc"));
        assert_eq!(predicate("(?=x)abc\\d", ""), units("abc"));
        assert_eq!(predicate("abc|abd", ""), units("ab"));
        assert_eq!(predicate("abc|x", ""), StartPredicate::Arbitrary);
        assert_eq!(predicate("a+b", ""), units("a"));
        assert_eq!(predicate("a*b", ""), StartPredicate::Arbitrary);
        assert_eq!(predicate("abc", "i"), StartPredicate::Arbitrary);
        assert_eq!(predicate("(?:)", ""), StartPredicate::Arbitrary);
        assert_eq!(predicate("\u{1F600}x", "u"), units("\u{1F600}x"));
    }

    #[test]
    fn unoptimized_chars_still_form_a_prefix() {
        let flags = Flags {
            no_opt: true,
            ..Flags::default()
        };
        let options = Options::from(flags);
        let units: Vec<u16> = "xyz".encode_utf16().collect();
        let re = parse::try_parse(&decode_elements(&units, false), &options).unwrap();
        assert_eq!(
            predicate_for_re(&re),
            StartPredicate::LeadingUnits(vec![0x78, 0x79, 0x7A].into_boxed_slice())
        );
    }
}
