//! Character class parsing: `[...]` in legacy, unicode and unicode-sets mode.

use super::{shorthand_escape, PResult, Parser, PropertyItem};
use crate::codepointset::Interval;
use crate::error::ErrorKind;
use crate::folds::CaseFold;
use crate::types::{ClassEscape, ClassModel, SetOp};
use crate::util::to_char_sat;

/// An atom of a legacy or unicode mode class.
enum ClassAtom {
    CodePoint(u32),
    Escape(ClassEscape),
}

/// An operand of a unicode-sets class.
enum SetOperand {
    Char(u32),
    Range(u32, u32),
    Class(ClassModel),
}

impl SetOperand {
    fn may_contain_strings(&self) -> bool {
        match self {
            SetOperand::Class(model) => model.may_contain_strings,
            _ => false,
        }
    }

    fn into_model(self) -> ClassModel {
        let mut model = ClassModel::default();
        add_to_union(&mut model, self);
        model
    }
}

/// Punctuators which may be escaped in a unicode-sets class.
pub(super) fn is_reserved_punctuator(c: char) -> bool {
    matches!(
        c,
        '&' | '-' | '!' | '#' | '%' | ',' | ':' | ';' | '<' | '=' | '>' | '@' | '`' | '~'
    )
}

/// Characters which may not appear doubled in a unicode-sets class.
fn is_double_punctuator_char(c: char) -> bool {
    matches!(
        c,
        '&' | '!'
            | '#'
            | '$'
            | '%'
            | '*'
            | '+'
            | ','
            | '.'
            | ':'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '^'
            | '`'
            | '~'
    )
}

/// Characters which must be escaped in a unicode-sets class.
fn is_set_syntax_char(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '[' | ']' | '{' | '}' | '/' | '-' | '\\' | '|'
    )
}

fn add_to_union(model: &mut ClassModel, operand: SetOperand) {
    match operand {
        SetOperand::Char(c) => model.cps.add_one(c),
        SetOperand::Range(first, last) => model.cps.add(Interval::new(first, last)),
        SetOperand::Class(nested) => {
            if nested.is_flattenable() {
                model.absorb(nested);
            } else {
                // The matcher only consults top-level strings.
                for s in &nested.strings {
                    model.add_string(s.clone());
                }
                model.may_contain_strings |= nested.may_contain_strings;
                model.nested.push(nested);
            }
        }
    }
}

impl Parser<'_> {
    /// Parse a class beginning with `[`.
    pub(super) fn consume_class(&mut self) -> PResult<ClassModel> {
        if self.flags.unicode_sets {
            self.consume_class_set()
        } else {
            self.consume_class_ranges()
        }
    }

    /// ClassRanges, in legacy and unicode mode.
    fn consume_class_ranges(&mut self) -> PResult<ClassModel> {
        let open_pos = self.pos;
        self.consume('[');
        self.enter()?;
        let mut result = ClassModel {
            negated: self.try_consume('^'),
            ..Default::default()
        };

        loop {
            match self.peek_char() {
                None => {
                    return self.error_at(ErrorKind::UnterminatedClass, open_pos);
                }
                Some(']') => {
                    self.consume(']');
                    break;
                }
                _ => {}
            }

            // Parse a code point or character class.
            let first_pos = self.pos;
            let first = self.consume_class_atom()?;

            // Check for a dash; we may have a range. A dash before the
            // closing bracket is literal, as in [a-].
            let is_range = self.peek_is('-')
                && self.peek_at(1).is_some()
                && self.peek_at(1) != Some(']' as u32);
            if !is_range {
                add_class_atom(&mut result, first);
                continue;
            }
            self.consume('-');
            let second = self.consume_class_atom()?;

            // Ranges can't contain character classes: [\d-z] is invalid,
            // except in legacy mode where the dash is literal.
            // Ranges must also be in order: z-a is invalid.
            match (first, second) {
                (ClassAtom::CodePoint(c1), ClassAtom::CodePoint(c2)) => {
                    if c1 > c2 {
                        return self.error_at(ErrorKind::InvalidClassRange, first_pos);
                    }
                    result.cps.add(Interval::new(c1, c2));
                }
                (first, second) => {
                    if self.unicode {
                        return self.error_at(ErrorKind::InvalidClassRange, first_pos);
                    }
                    add_class_atom(&mut result, first);
                    add_class_atom(&mut result, ClassAtom::CodePoint('-' as u32));
                    add_class_atom(&mut result, second);
                }
            }
        }
        self.exit();
        Ok(result)
    }

    fn consume_class_atom(&mut self) -> PResult<ClassAtom> {
        let esc_pos = self.pos;
        let Some(c) = self.next() else {
            return self.error(ErrorKind::UnterminatedClass);
        };
        if c != '\\' as u32 {
            return Ok(ClassAtom::CodePoint(c));
        }
        let Some(ec) = self.peek_char() else {
            return self.error_at(ErrorKind::InvalidEscape, esc_pos);
        };
        match ec {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                self.consume(ec);
                Ok(ClassAtom::Escape(shorthand_escape(ec)))
            }
            'p' | 'P' if self.unicode => {
                self.consume(ec);
                match self.consume_property_escape(ec == 'P', esc_pos)? {
                    PropertyItem::Escape(escape) => Ok(ClassAtom::Escape(escape)),
                    // Only reachable in unicode-sets mode, which has its own grammar.
                    PropertyItem::Strings(..) => {
                        self.error_at(ErrorKind::InvalidPropertyOfStrings, esc_pos)
                    }
                }
            }
            'b' => {
                // \b is BACKSPACE in a class.
                self.consume('b');
                Ok(ClassAtom::CodePoint(0x08))
            }
            _ => Ok(ClassAtom::CodePoint(self.consume_character_escape(true)?)),
        }
    }

    /// A class in unicode-sets mode: a union, or a chain of one set operation.
    fn consume_class_set(&mut self) -> PResult<ClassModel> {
        let open_pos = self.pos;
        self.consume('[');
        self.enter()?;
        let negated = self.try_consume('^');
        let mut model = ClassModel::default();

        if !self.try_consume(']') {
            let first = self.consume_set_operand_or_range()?;
            let op = self.peek_set_op();
            match op {
                Some(op) => {
                    // The left operand of an operation is one operand, never a range.
                    if matches!(first, SetOperand::Range(..)) {
                        return self.error(ErrorKind::InvalidSetOperand);
                    }
                    let mut may_contain_strings = first.may_contain_strings();
                    add_to_union(&mut model, first);
                    loop {
                        self.pos += 2;
                        if op == SetOp::Intersect && self.peek_is('&') {
                            return self.error(ErrorKind::InvalidSetOperand);
                        }
                        if self.peek_is(']') {
                            return self.error(ErrorKind::InvalidSetOperand);
                        }
                        let operand = self.consume_set_operand()?;
                        if op == SetOp::Intersect {
                            may_contain_strings &= operand.may_contain_strings();
                        }
                        model.ops.push((op, operand.into_model()));
                        if self.try_consume(']') {
                            break;
                        }
                        // Operators may not be mixed, and operands are not unioned.
                        if self.peek_set_op() != Some(op) {
                            if self.peek().is_none() {
                                return self.error_at(ErrorKind::UnterminatedClass, open_pos);
                            }
                            return self.error(ErrorKind::InvalidSetOperand);
                        }
                    }
                    apply_string_ops(&mut model, self.fold);
                    model.may_contain_strings = may_contain_strings;
                }
                None => {
                    add_to_union(&mut model, first);
                    loop {
                        if self.peek().is_none() {
                            return self.error_at(ErrorKind::UnterminatedClass, open_pos);
                        }
                        if self.try_consume(']') {
                            break;
                        }
                        if self.peek_set_op().is_some() {
                            return self.error(ErrorKind::InvalidSetOperand);
                        }
                        let operand = self.consume_set_operand_or_range()?;
                        add_to_union(&mut model, operand);
                    }
                }
            }
        }

        if negated && model.may_contain_strings {
            return self.error_at(ErrorKind::InvalidClass, open_pos);
        }
        model.negated = negated;
        self.exit();
        Ok(model)
    }

    /// \return the set operation at the cursor, if any.
    fn peek_set_op(&self) -> Option<SetOp> {
        if self.looking_at("--") {
            Some(SetOp::Subtract)
        } else if self.looking_at("&&") {
            Some(SetOp::Intersect)
        } else {
            None
        }
    }

    fn consume_set_operand_or_range(&mut self) -> PResult<SetOperand> {
        let start = self.pos;
        let operand = self.consume_set_operand()?;
        let dash = self.peek_is('-') && self.peek_at(1) != Some('-' as u32);
        if !dash {
            return Ok(operand);
        }
        let SetOperand::Char(first) = operand else {
            return self.error(ErrorKind::InvalidClassRange);
        };
        self.consume('-');
        match self.consume_set_operand()? {
            SetOperand::Char(last) if first <= last => Ok(SetOperand::Range(first, last)),
            _ => self.error_at(ErrorKind::InvalidClassRange, start),
        }
    }

    /// A ClassSetOperand: a character, a nested class, `\q{...}` or a class escape.
    fn consume_set_operand(&mut self) -> PResult<SetOperand> {
        let start = self.pos;
        let Some(c) = self.peek_char() else {
            return self.error(ErrorKind::UnterminatedClass);
        };
        if c == '[' {
            return Ok(SetOperand::Class(self.consume_class_set()?));
        }
        if c != '\\' {
            return self.consume_set_character().map(SetOperand::Char);
        }
        let Some(ec) = self.peek_at(1).map(to_char_sat) else {
            return self.error(ErrorKind::InvalidEscape);
        };
        match ec {
            'q' => {
                self.pos += 2;
                if !self.try_consume('{') {
                    return self.error_at(ErrorKind::InvalidEscape, start);
                }
                Ok(SetOperand::Class(self.consume_class_strings()?))
            }
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                self.pos += 2;
                Ok(SetOperand::Class(ClassModel::from_escape(shorthand_escape(
                    ec,
                ))))
            }
            'p' | 'P' => {
                self.pos += 2;
                Ok(SetOperand::Class(
                    match self.consume_property_escape(ec == 'P', start)? {
                        PropertyItem::Escape(escape) => ClassModel::from_escape(escape),
                        PropertyItem::Strings(model) => model,
                    },
                ))
            }
            _ => self.consume_set_character().map(SetOperand::Char),
        }
    }

    /// A ClassSetCharacter: an unescaped character that is not syntax, or an escape.
    fn consume_set_character(&mut self) -> PResult<u32> {
        let Some(c) = self.peek() else {
            return self.error(ErrorKind::UnterminatedClass);
        };
        let ch = to_char_sat(c);
        if ch == '\\' {
            self.pos += 1;
            if self.try_consume('b') {
                return Ok(0x08);
            }
            return self.consume_character_escape(true);
        }
        if is_set_syntax_char(ch) {
            return self.error(ErrorKind::InvalidClass);
        }
        if is_double_punctuator_char(ch) && self.peek_at(1) == Some(c) {
            return self.error(ErrorKind::InvalidClass);
        }
        self.pos += 1;
        Ok(c)
    }

    /// The body of `\q{...}`, after the brace: strings separated by `|`.
    fn consume_class_strings(&mut self) -> PResult<ClassModel> {
        let mut model = ClassModel::default();
        let mut current = Vec::new();
        loop {
            match self.peek_char() {
                None => return self.error(ErrorKind::UnterminatedClass),
                Some('}') => {
                    self.consume('}');
                    break;
                }
                Some('|') => {
                    self.consume('|');
                    model.may_contain_strings |= current.len() != 1;
                    model.add_string(std::mem::take(&mut current));
                }
                Some(_) => current.push(self.consume_set_character()?),
            }
        }
        model.may_contain_strings |= current.len() != 1;
        model.add_string(current);
        Ok(model)
    }
}

fn add_class_atom(model: &mut ClassModel, atom: ClassAtom) {
    match atom {
        ClassAtom::CodePoint(c) => model.cps.add_one(c),
        ClassAtom::Escape(escape) => model.escapes.push(escape),
    }
}

fn canonical(s: &[u32], fold: Option<CaseFold>) -> Vec<u32> {
    s.iter()
        .map(|&c| fold.map_or(c, |f| f.canonicalize(c)))
        .collect()
}

/// Apply the class's operations to its multi-character strings, comparing
/// them case-insensitively under \p fold.
fn apply_string_ops(model: &mut ClassModel, fold: Option<CaseFold>) {
    let mut strings = std::mem::take(&mut model.strings);
    for (op, operand) in &model.ops {
        let others: Vec<Vec<u32>> = operand.strings.iter().map(|s| canonical(s, fold)).collect();
        match op {
            SetOp::Subtract => strings.retain(|s| !others.contains(&canonical(s, fold))),
            SetOp::Intersect => strings.retain(|s| others.contains(&canonical(s, fold))),
        }
    }
    model.strings = strings;
}

#[cfg(test)]
mod tests {
    use crate::api::Flags;
    use crate::config::Options;
    use crate::error::ErrorKind;
    use crate::ir::Node;
    use crate::parse::try_parse;
    use crate::types::ClassModel;
    use crate::util::decode_elements;

    fn class(pattern: &str, flags: &str) -> Result<ClassModel, ErrorKind> {
        let options = Options::from(flags.parse::<Flags>().unwrap());
        let unicode = options.flags.unicode || options.flags.unicode_sets;
        let units: Vec<u16> = pattern.encode_utf16().collect();
        let re = try_parse(&decode_elements(&units, unicode), &options).map_err(|e| e.kind)?;
        assert!(re.nodes.iter().any(|n| matches!(n, Node::Class(0))));
        Ok(re.classes[0].clone())
    }

    #[test]
    fn ranges() {
        let model = class("[a-cx]", "").unwrap();
        assert!(model.cps.contains('b' as u32));
        assert!(model.cps.contains('x' as u32));
        assert!(!model.cps.contains('d' as u32));
        let model = class("[a-]", "u").unwrap();
        assert!(model.cps.contains('-' as u32));
        assert_eq!(class("[z-a]", "").unwrap_err(), ErrorKind::InvalidClassRange);
        assert_eq!(class(r"[\d-z]", "u").unwrap_err(), ErrorKind::InvalidClassRange);
        let model = class(r"[\d-z]", "").unwrap();
        assert!(model.cps.contains('-' as u32) && model.cps.contains('z' as u32));
        assert_eq!(class("[ab", "").unwrap_err(), ErrorKind::UnterminatedClass);
    }

    #[test]
    fn legacy_class_escapes() {
        let model = class(r"[\c1\b]", "").unwrap();
        assert!(model.cps.contains(0x11));
        assert!(model.cps.contains(0x08));
        let model = class(r"[\8]", "").unwrap();
        assert!(model.cps.contains('8' as u32));
        assert_eq!(class(r"[\1]", "u").unwrap_err(), ErrorKind::InvalidEscape);
    }

    #[test]
    fn set_operations() {
        let model = class(r"[\w--[aeiou]]", "v").unwrap();
        assert_eq!(model.ops.len(), 1);
        assert_eq!(
            class(r"[\w--a&&b]", "v").unwrap_err(),
            ErrorKind::InvalidSetOperand
        );
        assert_eq!(
            class(r"[ab--c]", "v").unwrap_err(),
            ErrorKind::InvalidSetOperand
        );
        assert_eq!(
            class(r"[a-z--c]", "v").unwrap_err(),
            ErrorKind::InvalidSetOperand
        );
        assert_eq!(class(r"[a&&&b]", "v").unwrap_err(), ErrorKind::InvalidSetOperand);
    }

    #[test]
    fn reserved_syntax() {
        assert_eq!(class(r"[a(]", "v").unwrap_err(), ErrorKind::InvalidClass);
        assert_eq!(class(r"[a!!b]", "v").unwrap_err(), ErrorKind::InvalidClass);
        assert!(class(r"[a\!!b]", "v").is_ok());
        assert!(class(r"[a!b]", "v").is_ok());
    }

    #[test]
    fn strings() {
        let model = class(r"[\q{abc|d|}]", "v").unwrap();
        assert!(model.cps.contains('d' as u32));
        assert_eq!(model.strings.len(), 2);
        assert!(model.may_contain_strings);
        assert_eq!(class(r"[^\q{ab}]", "v").unwrap_err(), ErrorKind::InvalidClass);
        assert!(class(r"[^\q{a}]", "v").is_ok());

        let model = class(r"[\q{ab|cd}--\q{ab}]", "v").unwrap();
        assert_eq!(model.strings, vec![vec!['c' as u32, 'd' as u32]]);
        let model = class(r"[\q{ab|cd}&&\q{cd|ef}]", "v").unwrap();
        assert_eq!(model.strings, vec![vec!['c' as u32, 'd' as u32]]);
        // Intersection with a code point class cannot contain strings.
        assert!(class(r"[^\q{ab}&&a]", "v").is_ok());
    }

    #[test]
    fn folded_string_operations() {
        let model = class(r"[\q{KK|LL}--\q{kk}]", "vi").unwrap();
        assert_eq!(model.strings, vec![vec!['L' as u32, 'L' as u32]]);
        let model = class(r"[\q{KK|LL}&&\q{ll}]", "vi").unwrap();
        assert_eq!(model.strings, vec![vec!['L' as u32, 'L' as u32]]);
        // Without the fold, case matters.
        let model = class(r"[\q{KK}--\q{kk}]", "v").unwrap();
        assert_eq!(model.strings.len(), 1);
    }

    #[test]
    fn nested_classes_flatten() {
        let model = class(r"[a[bc]]", "v").unwrap();
        assert!(model.nested.is_empty());
        assert!(model.cps.contains('c' as u32));
        let model = class(r"[a[^bc]]", "v").unwrap();
        assert_eq!(model.nested.len(), 1);
    }

    #[test]
    fn string_properties() {
        let model = class(r"[\p{Emoji_Keycap_Sequence}]", "v").unwrap();
        assert_eq!(model.strings.len(), 12);
        assert_eq!(
            class(r"[\p{Emoji_Keycap_Sequence}]", "u").unwrap_err(),
            ErrorKind::InvalidPropertyOfStrings
        );
        assert_eq!(
            class(r"[^\p{RGI_Emoji}]", "v").unwrap_err(),
            ErrorKind::InvalidClass
        );
    }
}
