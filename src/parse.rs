//! Parser from regex patterns to IR

use crate::api::Flags;
use crate::config::Options;
use crate::error::{Error, ErrorKind};
use crate::folds::CaseFold;
use crate::ir::{self, AnchorType, Node, NodeId, Quantifier, SourceSpan};
use crate::types::{
    CaptureGroupID, CharacterClassType, ClassEscape, ClassID, ClassModel, GroupName,
    MAX_CAPTURE_GROUPS, MAX_CLASSES, MAX_LOOPS,
};
use crate::unicode::PropertyEscape;
use crate::unicodedata::{self, UnicodeData};
use crate::util::{combine_surrogates, is_lead_surrogate, is_trail_surrogate, to_char_sat};
use icu_properties::sets;
use tracing::debug;

mod classparse;

type PResult<T> = Result<T, Error>;

/// The result of parsing `\p{...}`.
enum PropertyItem {
    /// A code point property.
    Escape(ClassEscape),
    /// A property of strings, expanded to its sequences.
    Strings(ClassModel),
}

/// A named group seen while parsing, with the alternatives enclosing it.
#[derive(Debug)]
struct NamedGroup {
    name: String,
    group: CaptureGroupID,
    /// (disjunction, alternative index) pairs from the outside in.
    path: Vec<(usize, usize)>,
}

/// \return whether two alternation paths can never both participate in a match.
/// That is the case if they diverge into different alternatives of the same
/// disjunction.
fn paths_exclusive(a: &[(usize, usize)], b: &[(usize, usize)]) -> bool {
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            return x.0 == y.0 && x.1 != y.1;
        }
    }
    false
}

/// What a previous parse of the same pattern found out.
#[derive(Debug, Copy, Clone)]
struct ParseHints {
    /// The total number of capture groups, if known. In legacy mode, decimal
    /// escapes above it are octal or identity escapes.
    group_count: Option<usize>,

    /// Whether `\k` begins a named reference.
    named_refs: bool,
}

fn is_syntax_char(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
    )
}

fn hex_value(c: u32) -> Option<u32> {
    to_char_sat(c).to_digit(16)
}

/// Represents the state used to parse a regex.
struct Parser<'a> {
    /// The pattern elements: code points in unicode mode, code units otherwise.
    input: &'a [u32],

    /// Index of the next element.
    pos: usize,

    /// Flags used.
    flags: Flags,

    /// Whether either the u or v flag is set.
    unicode: bool,

    /// Canonicalization for case-insensitive literals.
    fold: Option<CaseFold>,

    data: &'a dyn UnicodeData,

    max_depth: usize,
    depth: usize,

    nodes: Vec<Node>,
    classes: Vec<ClassModel>,

    /// Number of loops.
    loop_count: usize,

    /// Number of capturing groups.
    group_count: usize,

    /// Maximum backreference encountered, and where.
    max_backref: usize,
    max_backref_pos: usize,

    named_groups: Vec<NamedGroup>,

    /// The alternatives enclosing the current position.
    alt_path: Vec<(usize, usize)>,
    disjunction_count: usize,

    /// Named references, resolved once all groups are known.
    pending_named_refs: Vec<(NodeId, String, usize)>,

    hints: ParseHints,
    saw_k_identity: bool,

    /// Whether a lookbehind was encountered.
    has_lookbehind: bool,

    /// Running estimate of the instruction count.
    estimate: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u32], options: &'a Options, hints: ParseHints) -> Self {
        let flags = options.flags;
        let unicode = flags.unicode || flags.unicode_sets;
        Parser {
            input,
            pos: 0,
            flags,
            unicode,
            fold: if flags.icase {
                Some(CaseFold::for_mode(unicode))
            } else {
                None
            },
            data: options.unicode_data.as_ref(),
            max_depth: options.max_nesting_depth,
            depth: 0,
            nodes: Vec::new(),
            classes: Vec::new(),
            loop_count: 0,
            group_count: 0,
            max_backref: 0,
            max_backref_pos: 0,
            named_groups: Vec::new(),
            alt_path: Vec::new(),
            disjunction_count: 0,
            pending_named_refs: Vec::new(),
            hints,
            saw_k_identity: false,
            has_lookbehind: false,
            estimate: 1,
        }
    }

    fn error<T>(&self, kind: ErrorKind) -> PResult<T> {
        Err(Error::new(kind, self.pos))
    }

    fn error_at<T>(&self, kind: ErrorKind, pos: usize) -> PResult<T> {
        Err(Error::new(kind, pos))
    }

    /// Peek at the next element.
    #[inline]
    fn peek(&self) -> Option<u32> {
        self.input.get(self.pos).copied()
    }

    /// Peek at the element \p n past the next one.
    #[inline]
    fn peek_at(&self, n: usize) -> Option<u32> {
        self.input.get(self.pos + n).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.peek().map(to_char_sat)
    }

    fn peek_is(&self, c: char) -> bool {
        self.peek() == Some(c as u32)
    }

    /// \return the next element.
    fn next(&mut self) -> Option<u32> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Consume a character known to be next.
    fn consume(&mut self, c: char) {
        debug_assert!(self.peek_is(c), "char was not next");
        self.pos += 1;
    }

    /// If our contents begin with the char c, consume it from our contents
    /// and return true. Otherwise return false.
    fn try_consume(&mut self, c: char) -> bool {
        if self.peek_is(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// \return whether the remaining input begins with \p s.
    fn looking_at(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c as u32))
    }

    /// If our contents begin with the string \p s, consume it from our contents
    /// and return true. Otherwise return false.
    fn try_consume_str(&mut self, s: &str) -> bool {
        if self.looking_at(s) {
            self.pos += s.chars().count();
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return self.error(ErrorKind::NestingTooDeep);
        }
        Ok(())
    }

    fn exit(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth -= 1;
    }

    fn add_node(&mut self, node: Node) -> NodeId {
        self.estimate += node.insn_estimate();
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn make_cat(&mut self, nodes: Vec<NodeId>) -> NodeId {
        match nodes.len() {
            0 => self.add_node(Node::Empty),
            1 => nodes[0],
            _ => self.add_node(Node::Cat(nodes)),
        }
    }

    fn make_char(&mut self, c: u32, start: usize) -> NodeId {
        let node = Node::Char {
            c: self.fold.map_or(c, |f| f.canonicalize(c)),
            icase: self.fold.is_some(),
            src: SourceSpan {
                start,
                end: self.pos,
            },
        };
        self.add_node(node)
    }

    fn add_class(&mut self, model: ClassModel) -> PResult<NodeId> {
        if self.classes.len() >= MAX_CLASSES {
            return self.error(ErrorKind::ProgramTooComplex);
        }
        self.classes.push(model);
        let id = (self.classes.len() - 1) as ClassID;
        Ok(self.add_node(Node::Class(id)))
    }

    fn parse_pattern(&mut self) -> PResult<NodeId> {
        // Parse a disjunction. If we consume everything, it's success. If there's
        // something left, it's an excess closing paren.
        let body = self.consume_disjunction()?;
        match self.peek() {
            Some(_) => self.error(ErrorKind::UnmatchedParenthesis),
            None => Ok(body),
        }
    }

    /// Disjunction: alternatives separated by `|`.
    fn consume_disjunction(&mut self) -> PResult<NodeId> {
        let disjunction = self.disjunction_count;
        self.disjunction_count += 1;
        let mut alts = Vec::new();
        loop {
            self.alt_path.push((disjunction, alts.len()));
            let alt = self.consume_term();
            self.alt_path.pop();
            alts.push(alt?);
            if !self.try_consume('|') {
                break;
            }
        }
        Ok(if alts.len() == 1 {
            alts[0]
        } else {
            self.add_node(Node::Alt(alts))
        })
    }

    /// Alternative: a sequence of possibly quantified terms.
    fn consume_term(&mut self) -> PResult<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        loop {
            let start_group = self.group_count;
            let start_offset = result.len();
            let start = self.pos;
            let mut quantifier_allowed = true;

            let Some(c) = self.peek_char() else {
                break;
            };
            match c {
                // A catenation is terminated by closing parens or vertical bar (alternations).
                ')' | '|' => break,
                '^' => {
                    self.consume('^');
                    result.push(self.add_node(Node::Anchor(AnchorType::StartOfLine)));
                    quantifier_allowed = false;
                }

                '$' => {
                    self.consume('$');
                    result.push(self.add_node(Node::Anchor(AnchorType::EndOfLine)));
                    quantifier_allowed = false;
                }

                '\\' => {
                    self.consume('\\');
                    let (node, quantifiable) = self.consume_atom_escape(start)?;
                    result.push(node);
                    quantifier_allowed = quantifiable;
                }

                '.' => {
                    self.consume('.');
                    result.push(self.add_node(if self.flags.dot_all {
                        Node::MatchAny
                    } else {
                        Node::MatchAnyExceptLineTerminator
                    }));
                }

                '(' => {
                    let (node, quantifiable) = self.consume_group()?;
                    result.push(node);
                    quantifier_allowed = quantifiable;
                }

                '[' => {
                    let model = self.consume_class()?;
                    result.push(self.add_class(model)?);
                }

                '*' | '+' | '?' => {
                    return self.error(ErrorKind::NothingToRepeat);
                }

                '{' => {
                    // A well-formed quantifier here has nothing to repeat.
                    // Otherwise it is a literal brace, outside unicode mode.
                    if self.try_consume_quantifier()?.is_some() {
                        return self.error_at(ErrorKind::NothingToRepeat, start);
                    }
                    self.consume('{');
                    result.push(self.make_char('{' as u32, start));
                }

                '}' | ']' => {
                    if self.unicode {
                        let kind = if c == '}' {
                            ErrorKind::InvalidQuantifier
                        } else {
                            ErrorKind::InvalidClass
                        };
                        return self.error(kind);
                    }
                    self.consume(c);
                    result.push(self.make_char(c as u32, start));
                }

                _ => {
                    self.pos += 1;
                    let raw = self.input[start];
                    result.push(self.make_char(raw, start));
                }
            }

            // We just parsed a term; try parsing a quantifier.
            let quant_pos = self.pos;
            if let Some(quant) = self.try_consume_quantifier()? {
                if !quantifier_allowed {
                    return self.error_at(ErrorKind::NothingToRepeat, quant_pos);
                }
                // Validate the quantifier.
                // Note an incomplete quantifier is not recognized as a
                // quantifier in legacy mode: `/{3/` is valid.
                if quant.min > quant.max {
                    return self.error_at(ErrorKind::InvalidQuantifier, quant_pos);
                }
                if self.loop_count >= MAX_LOOPS {
                    return self.error_at(ErrorKind::ProgramTooComplex, quant_pos);
                }
                self.loop_count += 1;
                let quantifee = result.split_off(start_offset);
                let loopee = self.make_cat(quantifee);
                let node = self.add_node(Node::Loop {
                    loopee,
                    quant,
                    enclosed_groups: start_group as u16..self.group_count as u16,
                });
                result.push(node);
            }
        }
        Ok(self.make_cat(result))
    }

    /// Parse a group beginning with `(`.
    /// \return the node and whether it may be quantified.
    fn consume_group(&mut self) -> PResult<(NodeId, bool)> {
        let open_pos = self.pos;
        self.consume('(');
        self.enter()?;
        let mut quantifiable = true;
        let node = if self.try_consume_str("?=") {
            // Positive lookahead. Legacy mode allows quantifying lookaheads.
            quantifiable = !self.unicode;
            self.consume_lookaround_assertion(false, false)?
        } else if self.try_consume_str("?!") {
            // Negative lookahead.
            quantifiable = !self.unicode;
            self.consume_lookaround_assertion(true, false)?
        } else if self.try_consume_str("?<=") {
            // Positive lookbehind.
            quantifiable = false;
            self.has_lookbehind = true;
            self.consume_lookaround_assertion(false, true)?
        } else if self.try_consume_str("?<!") {
            // Negative lookbehind.
            quantifiable = false;
            self.has_lookbehind = true;
            self.consume_lookaround_assertion(true, true)?
        } else if self.try_consume_str("?:") {
            // Non-capturing group.
            self.consume_disjunction()?
        } else if self.try_consume_str("?<") {
            // Named capturing group.
            let name_pos = self.pos;
            let name = self.consume_group_name()?;
            let group = self.allocate_group()?;
            self.register_group_name(name, group, name_pos)?;
            self.consume_capture_group_contents(group)?
        } else if self.peek_is('?') {
            // Like (?i) or (?x: ...): the ? repeats nothing.
            return self.error(ErrorKind::NothingToRepeat);
        } else {
            let group = self.allocate_group()?;
            self.consume_capture_group_contents(group)?
        };
        if !self.try_consume(')') {
            return self.error_at(ErrorKind::UnterminatedGroup, open_pos);
        }
        self.exit();
        Ok((node, quantifiable))
    }

    fn allocate_group(&mut self) -> PResult<CaptureGroupID> {
        if self.group_count >= MAX_CAPTURE_GROUPS {
            return self.error(ErrorKind::ProgramTooComplex);
        }
        let group = self.group_count as CaptureGroupID;
        self.group_count += 1;
        Ok(group)
    }

    fn consume_capture_group_contents(&mut self, group: CaptureGroupID) -> PResult<NodeId> {
        let contents = self.consume_disjunction()?;
        Ok(self.add_node(Node::CaptureGroup(contents, group)))
    }

    fn register_group_name(
        &mut self,
        name: String,
        group: CaptureGroupID,
        pos: usize,
    ) -> PResult<()> {
        let clash = self
            .named_groups
            .iter()
            .any(|ng| ng.name == name && !paths_exclusive(&ng.path, &self.alt_path));
        if clash {
            return self.error_at(ErrorKind::InvalidGroupName, pos);
        }
        self.named_groups.push(NamedGroup {
            name,
            group,
            path: self.alt_path.clone(),
        });
        Ok(())
    }

    fn consume_lookaround_assertion(&mut self, negate: bool, backwards: bool) -> PResult<NodeId> {
        let start_group = self.group_count as CaptureGroupID;
        let contents = self.consume_disjunction()?;
        let end_group = self.group_count as CaptureGroupID;
        Ok(self.add_node(Node::LookaroundAssertion {
            negate,
            backwards,
            start_group,
            end_group,
            contents,
        }))
    }

    /// Parse a group name after its `<`, through the closing `>`.
    fn consume_group_name(&mut self) -> PResult<String> {
        let start = self.pos;
        let mut name = String::new();
        loop {
            let Some((cp, escaped)) = self.consume_group_name_char()? else {
                return self.error_at(ErrorKind::InvalidGroupName, start);
            };
            if cp == '>' as u32 && !escaped {
                break;
            }
            let valid = if name.is_empty() {
                cp == '$' as u32 || cp == '_' as u32 || sets::id_start().contains32(cp)
            } else {
                cp == '$' as u32
                    || cp == 0x200C
                    || cp == 0x200D
                    || sets::id_continue().contains32(cp)
            };
            match char::from_u32(cp) {
                Some(c) if valid => name.push(c),
                _ => return self.error_at(ErrorKind::InvalidGroupName, start),
            }
        }
        if name.is_empty() {
            return self.error_at(ErrorKind::InvalidGroupName, start);
        }
        Ok(name)
    }

    /// \return the next code point of a group name and whether it was escaped.
    /// Surrogate pairs are combined even outside unicode mode.
    fn consume_group_name_char(&mut self) -> PResult<Option<(u32, bool)>> {
        let Some(c) = self.next() else {
            return Ok(None);
        };
        if c == '\\' as u32 {
            if !self.try_consume('u') {
                return self.error(ErrorKind::InvalidGroupName);
            }
            let cp = if self.peek_is('{') {
                self.consume_braced_code_point()
            } else {
                self.consume_hex4_with_pair()
            };
            return match cp {
                Some(cp) => Ok(Some((cp, true))),
                None => self.error(ErrorKind::InvalidGroupName),
            };
        }
        if is_lead_surrogate(c) {
            if let Some(t) = self.peek().filter(|&t| is_trail_surrogate(t)) {
                self.pos += 1;
                return Ok(Some((combine_surrogates(c, t), false)));
            }
        }
        Ok(Some((c, false)))
    }

    fn try_consume_quantifier(&mut self) -> PResult<Option<Quantifier>> {
        let Some(c) = self.peek_char() else {
            return Ok(None);
        };
        let (min, max) = match c {
            '*' => (0, usize::MAX),
            '+' => (1, usize::MAX),
            '?' => (0, 1),
            '{' => {
                let saved = self.pos;
                match self.try_consume_braced_quantifier() {
                    Some(bounds) => {
                        self.pos -= 1;
                        bounds
                    }
                    None => {
                        self.pos = saved;
                        if self.unicode {
                            return self.error(ErrorKind::InvalidQuantifier);
                        }
                        return Ok(None);
                    }
                }
            }
            _ => return Ok(None),
        };
        // Consume the quantifier's last character.
        self.pos += 1;
        let greedy = !self.try_consume('?');
        Ok(Some(Quantifier { min, max, greedy }))
    }

    /// Parse `{n}`, `{n,}` or `{n,m}`, leaving the position on the closing
    /// brace's successor. \return None if malformed.
    fn try_consume_braced_quantifier(&mut self) -> Option<(usize, usize)> {
        self.consume('{');
        let min = self.try_consume_decimal_integer_literal()?;
        let max = if self.try_consume(',') {
            // Like {3,} or {3,4}
            self.try_consume_decimal_integer_literal()
                .unwrap_or(usize::MAX)
        } else {
            // Like {3}.
            min
        };
        if !self.try_consume('}') {
            return None;
        }
        Some((min, max))
    }

    /// DecimalIntegerLiteral.
    /// If the value would overflow, usize::MAX is returned.
    /// All decimal digits are consumed regardless.
    fn try_consume_decimal_integer_literal(&mut self) -> Option<usize> {
        let mut result: usize = 0;
        let mut char_count = 0;
        while let Some(digit) = self.peek_char().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            char_count += 1;
            result = result.saturating_mul(10);
            result = result.saturating_add(digit as usize);
        }
        if char_count > 0 {
            Some(result)
        } else {
            None
        }
    }

    /// Parse an escape outside a class, after its backslash.
    /// \return the node and whether it may be quantified.
    fn consume_atom_escape(&mut self, esc_pos: usize) -> PResult<(NodeId, bool)> {
        let Some(c) = self.peek_char() else {
            return self.error_at(ErrorKind::InvalidEscape, esc_pos);
        };
        let node = match c {
            'b' | 'B' => {
                self.consume(c);
                let node = self.add_node(Node::WordBoundary { invert: c == 'B' });
                return Ok((node, false));
            }

            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                self.consume(c);
                let escape = shorthand_escape(c);
                self.add_class(ClassModel::from_escape(escape))?
            }

            'p' | 'P' if self.unicode => {
                self.consume(c);
                let model = match self.consume_property_escape(c == 'P', esc_pos)? {
                    PropertyItem::Escape(escape) => ClassModel::from_escape(escape),
                    PropertyItem::Strings(model) => model,
                };
                self.add_class(model)?
            }

            '1'..='9' => {
                let digits_pos = self.pos;
                let val = self
                    .try_consume_decimal_integer_literal()
                    .unwrap_or(usize::MAX);
                match self.hints.group_count {
                    Some(count) if !self.unicode && val > count => {
                        // Not a backreference: an octal or identity escape.
                        self.pos = digits_pos;
                        let cp = self.consume_legacy_octal_or_identity();
                        self.make_char(cp, esc_pos)
                    }
                    _ => {
                        if val > self.max_backref {
                            self.max_backref = val;
                            self.max_backref_pos = esc_pos;
                        }
                        let group = CaptureGroupID::try_from(val - 1).unwrap_or(u16::MAX);
                        self.add_node(Node::BackRef(vec![group]))
                    }
                }
            }

            'k' if self.hints.named_refs => {
                self.consume('k');
                if !self.try_consume('<') {
                    return self.error(ErrorKind::InvalidGroupName);
                }
                let name = self.consume_group_name()?;
                let node = self.add_node(Node::BackRef(Vec::new()));
                self.pending_named_refs.push((node, name, esc_pos));
                node
            }

            _ => {
                if c == 'k' {
                    self.saw_k_identity = true;
                }
                let cp = self.consume_character_escape(false)?;
                self.make_char(cp, esc_pos)
            }
        };
        Ok((node, true))
    }

    /// Parse a legacy octal escape like `\12`, or an identity escape `\8`.
    /// The position is on the first digit.
    fn consume_legacy_octal_or_identity(&mut self) -> u32 {
        let first = self.next().unwrap_or(0);
        let Some(mut val) = to_char_sat(first).to_digit(8) else {
            // \8 or \9.
            return first;
        };
        let max_digits = if val <= 3 { 3 } else { 2 };
        for _ in 1..max_digits {
            match self.peek_char().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    val = val * 8 + d;
                    self.pos += 1;
                }
                None => break,
            }
        }
        val
    }

    /// Parse exactly four hex digits, or nothing.
    fn try_consume_hex4(&mut self) -> Option<u32> {
        let mut val = 0;
        for i in 0..4 {
            val = val * 16 + hex_value(self.peek_at(i)?)?;
        }
        self.pos += 4;
        Some(val)
    }

    /// Parse four hex digits after `\u`; a lead surrogate followed by
    /// `\u` and a trail surrogate combines with it.
    fn consume_hex4_with_pair(&mut self) -> Option<u32> {
        let lead = self.try_consume_hex4()?;
        if is_lead_surrogate(lead) && self.looking_at("\\u") {
            let saved = self.pos;
            self.pos += 2;
            match self.try_consume_hex4() {
                Some(trail) if is_trail_surrogate(trail) => {
                    return Some(combine_surrogates(lead, trail));
                }
                _ => self.pos = saved,
            }
        }
        Some(lead)
    }

    /// Parse `{hex}` after `\u`.
    fn consume_braced_code_point(&mut self) -> Option<u32> {
        let saved = self.pos;
        self.consume('{');
        let mut val: u32 = 0;
        let mut digits = 0;
        while let Some(d) = self.peek().and_then(hex_value) {
            self.pos += 1;
            digits += 1;
            val = val.saturating_mul(16).saturating_add(d);
        }
        if digits == 0 || val > 0x10FFFF || !self.try_consume('}') {
            self.pos = saved;
            return None;
        }
        Some(val)
    }

    /// Parse a CharacterEscape after its backslash, returning the code point.
    /// \p in_class enables the class-only legacy forms.
    fn consume_character_escape(&mut self, in_class: bool) -> PResult<u32> {
        let esc_pos = self.pos.saturating_sub(1);
        let Some(c) = self.peek_char() else {
            return self.error_at(ErrorKind::InvalidEscape, esc_pos);
        };
        match c {
            'f' => {
                self.consume('f');
                Ok(0xC)
            }
            'n' => {
                self.consume('n');
                Ok(0xA)
            }
            'r' => {
                self.consume('r');
                Ok(0xD)
            }
            't' => {
                self.consume('t');
                Ok(0x9)
            }
            'v' => {
                self.consume('v');
                Ok(0xB)
            }
            'c' => {
                // Control escape.
                let letter = self.peek_at(1).map(to_char_sat);
                match letter {
                    Some(l) if l.is_ascii_alphabetic() => {
                        self.pos += 2;
                        Ok(l as u32 % 32)
                    }
                    Some(l) if in_class && !self.unicode && (l.is_ascii_digit() || l == '_') => {
                        self.pos += 2;
                        Ok(l as u32 % 32)
                    }
                    _ if !self.unicode => {
                        // The backslash stands for itself; `c` is read again.
                        Ok('\\' as u32)
                    }
                    _ => self.error_at(ErrorKind::InvalidEscape, esc_pos),
                }
            }
            '0' if self.unicode => {
                // CharacterEscape :: "0 [lookahead != DecimalDigit]"
                self.consume('0');
                match self.peek_char() {
                    Some(d) if d.is_ascii_digit() => self.error_at(ErrorKind::InvalidEscape, esc_pos),
                    _ => Ok(0),
                }
            }
            '0'..='9' => {
                if self.unicode {
                    return self.error_at(ErrorKind::InvalidEscape, esc_pos);
                }
                Ok(self.consume_legacy_octal_or_identity())
            }
            'x' => {
                // HexEscapeSequence :: x HexDigit HexDigit
                self.consume('x');
                let x1 = self.peek().and_then(hex_value);
                let x2 = self.peek_at(1).and_then(hex_value);
                match (x1, x2) {
                    (Some(x1), Some(x2)) => {
                        self.pos += 2;
                        Ok(x1 * 16 + x2)
                    }
                    _ if self.unicode => self.error_at(ErrorKind::InvalidEscape, esc_pos),
                    _ => Ok('x' as u32),
                }
            }
            'u' => {
                self.consume('u');
                let cp = if self.unicode && self.peek_is('{') {
                    self.consume_braced_code_point()
                } else if self.unicode {
                    self.consume_hex4_with_pair()
                } else {
                    self.try_consume_hex4()
                };
                match cp {
                    Some(cp) => Ok(cp),
                    None if self.unicode => self.error_at(ErrorKind::InvalidEscape, esc_pos),
                    None => Ok('u' as u32),
                }
            }
            _ if self.unicode => {
                // Only syntax characters and / participate in IdentityEscape
                // in unicode mode; classes also allow \-.
                let allowed = is_syntax_char(c)
                    || c == '/'
                    || (in_class && c == '-')
                    || (in_class && self.flags.unicode_sets && classparse::is_reserved_punctuator(c));
                if allowed {
                    self.pos += 1;
                    Ok(c as u32)
                } else {
                    self.error_at(ErrorKind::InvalidEscape, esc_pos)
                }
            }
            _ => {
                // Legacy IdentityEscape: anything stands for itself.
                let raw = self.input[self.pos];
                self.pos += 1;
                Ok(raw)
            }
        }
    }

    /// Parse the body of `\p{...}` or `\P{...}`, after the `p`.
    fn consume_property_escape(&mut self, negate: bool, esc_pos: usize) -> PResult<PropertyItem> {
        if !self.try_consume('{') {
            return self.error_at(ErrorKind::InvalidEscape, esc_pos);
        }
        let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
        let mut name = String::new();
        let mut value: Option<String> = None;
        loop {
            let Some(c) = self.next().map(to_char_sat) else {
                return self.error_at(ErrorKind::InvalidEscape, esc_pos);
            };
            match c {
                '}' => break,
                '=' if value.is_none() => value = Some(String::new()),
                c if is_name_char(c) => match value.as_mut() {
                    Some(v) => v.push(c),
                    None => name.push(c),
                },
                _ => return self.error_at(ErrorKind::InvalidEscape, esc_pos),
            }
        }
        if name.is_empty() || value.as_deref() == Some("") {
            return self.error_at(ErrorKind::InvalidEscape, esc_pos);
        }

        if value.is_none() && unicodedata::is_string_property(&name) {
            if negate || !self.flags.unicode_sets {
                return self.error_at(ErrorKind::InvalidPropertyOfStrings, esc_pos);
            }
            let Some(seqs) = self.data.string_property_sequences(&name) else {
                return self.error_at(ErrorKind::UnknownUnicodeProperty, esc_pos);
            };
            let mut model = ClassModel::default();
            for seq in seqs {
                model.add_string(seq);
            }
            model.may_contain_strings = true;
            return Ok(PropertyItem::Strings(model));
        }

        match PropertyEscape::resolve(&name, value.as_deref(), self.data) {
            Some(property) => Ok(PropertyItem::Escape(ClassEscape::Property {
                property,
                positive: !negate,
            })),
            None => self.error_at(ErrorKind::UnknownUnicodeProperty, esc_pos),
        }
    }

    fn finish(mut self, body: NodeId) -> PResult<ir::Regex> {
        debug_assert!(self.loop_count <= MAX_LOOPS);
        debug_assert!(self.group_count <= MAX_CAPTURE_GROUPS);
        if self.max_backref > self.group_count {
            return self.error_at(ErrorKind::InvalidBackreference, self.max_backref_pos);
        }

        for (node, name, pos) in std::mem::take(&mut self.pending_named_refs) {
            let mut groups: Vec<CaptureGroupID> = self
                .named_groups
                .iter()
                .filter(|ng| ng.name == name)
                .map(|ng| ng.group)
                .collect();
            if groups.is_empty() {
                return self.error_at(ErrorKind::InvalidGroupName, pos);
            }
            groups.sort_unstable();
            self.nodes[node] = Node::BackRef(groups);
        }

        let mut group_names: Vec<GroupName> = Vec::new();
        for ng in &self.named_groups {
            if group_names.iter().any(|gn| *gn.name == *ng.name) {
                continue;
            }
            let mut indices: Vec<CaptureGroupID> = self
                .named_groups
                .iter()
                .filter(|other| other.name == ng.name)
                .map(|other| other.group)
                .collect();
            indices.sort_unstable();
            group_names.push(GroupName {
                name: ng.name.as_str().into(),
                indices: indices.into_boxed_slice(),
            });
        }

        let goal = self.add_node(Node::Goal);
        let root = self.add_node(Node::Cat(vec![body, goal]));
        let re = ir::Regex {
            nodes: self.nodes,
            root,
            flags: self.flags,
            classes: self.classes,
            group_count: self.group_count as CaptureGroupID,
            group_names,
            loop_count: self.loop_count as u16,
            estimate: self.estimate,
        };
        if self.has_lookbehind {
            re.reverse_lookbehinds(self.max_depth)
        } else {
            Ok(re)
        }
    }
}

/// \return the class escape for `\d`, `\W`, etc.
fn shorthand_escape(c: char) -> ClassEscape {
    let class_type = match c {
        'd' | 'D' => CharacterClassType::Digits,
        's' | 'S' => CharacterClassType::Spaces,
        _ => CharacterClassType::Words,
    };
    ClassEscape::Shorthand {
        class_type,
        positive: c.is_ascii_lowercase(),
    }
}

/// Try parsing a given pattern.
/// \p pattern holds code points in unicode mode, UTF-16 code units otherwise.
/// Return the resulting IR regex, or an error.
pub fn try_parse(pattern: &[u32], options: &Options) -> Result<ir::Regex, Error> {
    let unicode = options.flags.unicode || options.flags.unicode_sets;
    let first_hints = ParseHints {
        group_count: None,
        named_refs: unicode,
    };
    let mut p = Parser::new(pattern, options, first_hints);
    let body = p.parse_pattern()?;
    if unicode {
        return p.finish(body);
    }

    // Legacy patterns depend on facts only known after a full parse: whether a
    // decimal escape names an existing group, and whether there are named groups.
    let octal = p.max_backref > p.group_count;
    let named = !p.named_groups.is_empty() && p.saw_k_identity;
    if !octal && !named {
        return p.finish(body);
    }
    debug!(
        legacy_octal = octal,
        named_refs = named,
        "reparsing pattern"
    );
    let hints = ParseHints {
        group_count: Some(p.group_count),
        named_refs: !p.named_groups.is_empty(),
    };
    let mut p = Parser::new(pattern, options, hints);
    let body = p.parse_pattern()?;
    p.finish(body)
}
