//! Compiled character classes.
//!
//! A [`CharSet`] answers membership for one class. Membership below the
//! class's bitmap size is cached in a bitmap, built on first use; everything
//! else is computed from the class model.

use crate::charclasses;
use crate::folds::CaseFold;
use crate::types::{ClassEscape, ClassModel, SetOp};
use crate::unicodedata::UnicodeData;
use crate::util::DebugCheckIndex;
use std::sync::OnceLock;

/// The largest bitmap we build, in bits.
pub const MAX_BITMAP_SIZE: u32 = 0x10000;

/// The cached part of a compiled class.
#[derive(Debug)]
struct Bitmap {
    words: Box<[u64]>,
}

impl Bitmap {
    #[inline(always)]
    fn test(&self, cp: u32) -> bool {
        let word = *self.words.iat((cp / 64) as usize);
        word & (1 << (cp % 64)) != 0
    }
}

/// A compiled character class.
#[derive(Debug)]
pub struct CharSet {
    model: ClassModel,

    /// The canonicalization, if case-insensitive.
    fold: Option<CaseFold>,

    /// Whether \w includes the extra unicode case-insensitive word characters.
    extended_words: bool,

    /// Code points below this are answered by the bitmap.
    bmsize: u32,

    /// String alternatives of length two or more, longest first.
    long_strings: Box<[Box<[u32]>]>,

    /// Whether the empty string is an alternative.
    has_empty_string: bool,

    bitmap: OnceLock<Bitmap>,
}

impl CharSet {
    pub fn new(model: ClassModel, fold: Option<CaseFold>, extended_words: bool) -> CharSet {
        let mut long_strings: Vec<Box<[u32]>> = model
            .strings
            .iter()
            .filter(|s| s.len() >= 2)
            .map(|s| s.clone().into_boxed_slice())
            .collect();
        long_strings.sort_by(|a, b| b.len().cmp(&a.len()));
        let has_empty_string = model.strings.iter().any(|s| s.is_empty());
        let bmsize = bitmap_size(&model, fold);
        CharSet {
            model,
            fold,
            extended_words,
            bmsize,
            long_strings: long_strings.into_boxed_slice(),
            has_empty_string,
            bitmap: OnceLock::new(),
        }
    }

    /// \return the number of code points covered by the bitmap.
    pub fn bitmap_size(&self) -> u32 {
        self.bmsize
    }

    pub fn model(&self) -> &ClassModel {
        &self.model
    }

    /// \return whether the class has string alternatives.
    pub fn has_strings(&self) -> bool {
        !self.long_strings.is_empty() || self.has_empty_string
    }

    pub fn long_strings(&self) -> &[Box<[u32]>] {
        &self.long_strings
    }

    pub fn has_empty_string(&self) -> bool {
        self.has_empty_string
    }

    pub fn fold(&self) -> Option<CaseFold> {
        self.fold
    }

    /// \return whether the class contains the code point \p cp.
    #[inline]
    pub fn contains(&self, cp: u32, data: &dyn UnicodeData) -> bool {
        if cp < self.bmsize {
            self.bitmap.get_or_init(|| self.build_bitmap(data)).test(cp)
        } else {
            self.classify(cp, data)
        }
    }

    /// Whether the bitmap has been built.
    pub fn is_built(&self) -> bool {
        self.bitmap.get().is_some()
    }

    fn build_bitmap(&self, data: &dyn UnicodeData) -> Bitmap {
        let mut words = vec![0u64; ((self.bmsize + 63) / 64) as usize];
        for cp in 0..self.bmsize {
            if self.classify(cp, data) {
                *words.mat((cp / 64) as usize) |= 1 << (cp % 64);
            }
        }
        Bitmap {
            words: words.into_boxed_slice(),
        }
    }

    /// Compute membership from the model.
    fn classify(&self, cp: u32, data: &dyn UnicodeData) -> bool {
        match self.fold {
            None => self.raw_contains(&self.model, cp, data),
            Some(fold) => self.folded_contains(&self.model, fold.canonicalize(cp), fold, data),
        }
    }

    fn escape_contains(&self, escape: &ClassEscape, cp: u32, data: &dyn UnicodeData) -> bool {
        match escape {
            &ClassEscape::Shorthand {
                class_type,
                positive,
            } => charclasses::class_contains(class_type, cp, self.extended_words) == positive,
            ClassEscape::Property { property, positive } => {
                property.contains(cp, data) == *positive
            }
        }
    }

    /// Membership of the union part of \p model, before operations and negation.
    fn base_contains(&self, model: &ClassModel, cp: u32, data: &dyn UnicodeData) -> bool {
        model.cps.contains(cp) || model.escapes.iter().any(|e| self.escape_contains(e, cp, data))
    }

    fn raw_contains(&self, model: &ClassModel, cp: u32, data: &dyn UnicodeData) -> bool {
        let mut hit = self.base_contains(model, cp, data)
            || model.nested.iter().any(|m| self.raw_contains(m, cp, data));
        for (op, operand) in &model.ops {
            let other = self.raw_contains(operand, cp, data);
            hit = match op {
                SetOp::Subtract => hit && !other,
                SetOp::Intersect => hit && other,
            };
        }
        hit != model.negated
    }

    /// Membership of the canonical code point \p canon: a class contains it if
    /// any member canonicalizes to it. Operations act on canonicalized operands.
    fn folded_contains(
        &self,
        model: &ClassModel,
        canon: u32,
        fold: CaseFold,
        data: &dyn UnicodeData,
    ) -> bool {
        let mut hit = fold.closure_any(canon, |m| self.base_contains(model, m, data))
            || model
                .nested
                .iter()
                .any(|m| self.folded_contains(m, canon, fold, data));
        for (op, operand) in &model.ops {
            let other = self.folded_contains(operand, canon, fold, data);
            hit = match op {
                SetOp::Subtract => hit && !other,
                SetOp::Intersect => hit && other,
            };
        }
        hit != model.negated
    }
}

/// \return the number of code points the bitmap should cover: one past the
/// largest literal member (and its fold counterparts), or the maximum if the
/// class has escapes, nested classes or negation.
fn bitmap_size(model: &ClassModel, fold: Option<CaseFold>) -> u32 {
    if model.negated || !model.escapes.is_empty() || !model.nested.is_empty() {
        return MAX_BITMAP_SIZE;
    }
    let max = match fold {
        Some(fold) => fold
            .fold_code_points(&model.cps, MAX_BITMAP_SIZE)
            .max(),
        None => model.cps.max(),
    };
    match max {
        Some(max) if max < MAX_BITMAP_SIZE => max + 1,
        Some(_) => MAX_BITMAP_SIZE,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepointset::{CodePointSet, Interval};
    use crate::types::CharacterClassType;
    use crate::unicodedata::BuiltinUnicodeData;

    fn cps(ivs: &[(char, char)]) -> CodePointSet {
        let ivs: Vec<Interval> = ivs
            .iter()
            .map(|&(a, b)| Interval::new(a as u32, b as u32))
            .collect();
        CodePointSet::from_intervals(&ivs)
    }

    fn words() -> ClassEscape {
        ClassEscape::Shorthand {
            class_type: CharacterClassType::Words,
            positive: true,
        }
    }

    #[test]
    fn bitmap_size_follows_members() {
        let model = ClassModel::from_cps(cps(&[('a', 'z')]));
        let set = CharSet::new(model.clone(), None, false);
        assert_eq!(set.bitmap_size(), 'z' as u32 + 1);

        // Folding pulls in U+212A KELVIN SIGN.
        let set = CharSet::new(model, Some(CaseFold::Unicode), false);
        assert_eq!(set.bitmap_size(), 0x212B);

        let set = CharSet::new(ClassModel::from_escape(words()), None, false);
        assert_eq!(set.bitmap_size(), MAX_BITMAP_SIZE);
    }

    #[test]
    fn membership_with_operations() {
        let data = BuiltinUnicodeData;
        let mut model = ClassModel::from_escape(words());
        model
            .ops
            .push((SetOp::Subtract, ClassModel::from_cps(cps(&[('a', 'a'), ('e', 'e')]))));
        let set = CharSet::new(model, None, false);
        assert!(set.contains('b' as u32, &data));
        assert!(set.contains('1' as u32, &data));
        assert!(!set.contains('a' as u32, &data));
        assert!(!set.contains('-' as u32, &data));
        assert!(set.is_built());
    }

    #[test]
    fn folded_membership() {
        let data = BuiltinUnicodeData;
        let model = ClassModel::from_cps(cps(&[('k', 'k')]));
        let set = CharSet::new(model.clone(), Some(CaseFold::Unicode), false);
        assert!(set.contains('K' as u32, &data));
        assert!(set.contains(0x212A, &data));

        let set = CharSet::new(model.clone(), Some(CaseFold::Legacy), false);
        assert!(set.contains('K' as u32, &data));
        assert!(!set.contains(0x212A, &data));

        let mut negated = model;
        negated.negated = true;
        let set = CharSet::new(negated, Some(CaseFold::Unicode), false);
        assert!(!set.contains('K' as u32, &data));
        assert!(set.contains('j' as u32, &data));
    }

    #[test]
    fn folded_subtraction_uses_canonical_operands() {
        let data = BuiltinUnicodeData;
        let mut model = ClassModel::from_escape(words());
        model
            .ops
            .push((SetOp::Subtract, ClassModel::from_cps(cps(&[('a', 'a')]))));
        let set = CharSet::new(model, Some(CaseFold::Unicode), true);
        assert!(!set.contains('A' as u32, &data));
        assert!(set.contains('B' as u32, &data));
    }

    #[test]
    fn concurrent_build_matches_serial_build() {
        let data = BuiltinUnicodeData;
        let model = || {
            let mut model = ClassModel::from_escape(words());
            model.ops.push((
                SetOp::Subtract,
                ClassModel::from_cps(cps(&[('0', '9'), ('x', 'z')])),
            ));
            model
        };
        let serial = CharSet::new(model(), Some(CaseFold::Unicode), true);
        let expected: Vec<bool> = (0..0x3000).map(|cp| serial.contains(cp, &data)).collect();

        let shared = CharSet::new(model(), Some(CaseFold::Unicode), true);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..0x3000)
                            .map(|cp| shared.contains(cp, &BuiltinUnicodeData))
                            .collect::<Vec<bool>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
        assert!(shared.is_built());
    }

    #[test]
    fn supplementary_members_bypass_the_bitmap() {
        let data = BuiltinUnicodeData;
        let model = ClassModel::from_cps(CodePointSet::from_intervals(&[Interval::new(
            0x1F600, 0x1F64F,
        )]));
        let set = CharSet::new(model, None, false);
        assert_eq!(set.bitmap_size(), MAX_BITMAP_SIZE);
        assert!(set.contains(0x1F601, &data));
        assert!(!set.contains('a' as u32, &data));
    }
}
