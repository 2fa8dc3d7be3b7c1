//! Case folding for case-insensitive matching.

use crate::codepointset::CodePointSet;
use crate::util::is_lead_surrogate;
use icu_casemap::CaseMapper;
use std::collections::HashMap;
use std::sync::OnceLock;

pub(crate) const CASE_MATCHER: CaseMapper = CaseMapper::new();

/// Every code point with a simple case folding lies below this.
const FOLDABLE_LIMIT: u32 = 0x20000;

/// Which canonicalization a case-insensitive regex uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaseFold {
    /// Simple case folding, for unicode and unicode-sets regexes.
    Unicode,

    /// Single-character uppercasing, which never maps non-ASCII to ASCII.
    Legacy,
}

impl CaseFold {
    pub fn for_mode(unicode: bool) -> CaseFold {
        if unicode {
            CaseFold::Unicode
        } else {
            CaseFold::Legacy
        }
    }

    /// \return the canonical form of \p cp.
    pub fn canonicalize(self, cp: u32) -> u32 {
        let c = match char::from_u32(cp) {
            Some(c) => c,
            None => return cp,
        };
        match self {
            CaseFold::Unicode => CASE_MATCHER.simple_fold(c) as u32,
            CaseFold::Legacy => {
                if cp >= 0x10000 {
                    return cp;
                }
                let mut upper = c.to_uppercase();
                let u = match (upper.next(), upper.next()) {
                    (Some(u), None) => u as u32,
                    _ => return cp,
                };
                if cp >= 128 && u < 128 {
                    cp
                } else {
                    u
                }
            }
        }
    }

    /// \return the table from canonical values to every code point which
    /// canonicalizes to it. Only non-trivial classes are present.
    fn closure_table(self) -> &'static HashMap<u32, Box<[u32]>> {
        static UNICODE: OnceLock<HashMap<u32, Box<[u32]>>> = OnceLock::new();
        static LEGACY: OnceLock<HashMap<u32, Box<[u32]>>> = OnceLock::new();
        let (cell, limit) = match self {
            CaseFold::Unicode => (&UNICODE, FOLDABLE_LIMIT),
            CaseFold::Legacy => (&LEGACY, 0x10000),
        };
        cell.get_or_init(|| {
            let mut groups: HashMap<u32, Vec<u32>> = HashMap::new();
            for cp in 0..limit {
                if (0xD800..=0xDFFF).contains(&cp) {
                    continue;
                }
                let canon = self.canonicalize(cp);
                if canon != cp {
                    groups.entry(canon).or_insert_with(|| vec![canon]).push(cp);
                }
            }
            groups
                .into_iter()
                .map(|(k, mut v)| {
                    v.sort_unstable();
                    (k, v.into_boxed_slice())
                })
                .collect()
        })
    }

    /// \return whether any member of the fold closure of \p cp satisfies \p pred.
    /// The closure is every code point with the same canonical form, including \p cp.
    pub fn closure_any<F: FnMut(u32) -> bool>(self, cp: u32, mut pred: F) -> bool {
        let canon = self.canonicalize(cp);
        match self.closure_table().get(&canon) {
            Some(members) => members.iter().any(|&m| pred(m)),
            None => pred(canon) || (canon != cp && pred(cp)),
        }
    }

    /// \return every member of the fold closure of \p cp, sorted.
    pub fn closure(self, cp: u32) -> Vec<u32> {
        let mut result = Vec::new();
        self.closure_any(cp, |m| {
            result.push(m);
            false
        });
        result.sort_unstable();
        result.dedup();
        result
    }

    /// \return \p input plus the fold closure of each of its members.
    /// Only members below \p limit are expanded.
    pub fn fold_code_points(self, input: &CodePointSet, limit: u32) -> CodePointSet {
        let mut result = input.clone();
        for iv in input.intervals() {
            if iv.first >= limit {
                break;
            }
            for cp in iv.first..=core::cmp::min(iv.last, limit - 1) {
                if is_lead_surrogate(cp) || (0xDC00..=0xDFFF).contains(&cp) {
                    continue;
                }
                self.closure_any(cp, |m| {
                    result.add_one(m);
                    false
                });
            }
        }
        result
    }
}
