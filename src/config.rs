//! Compile options.

use crate::api::Flags;
use crate::error::{Error, ErrorKind};
use crate::types::DEFAULT_MAX_NESTING_DEPTH;
use crate::unicodedata::{BuiltinUnicodeData, UnicodeData};
use std::sync::Arc;

/// The edition of the language whose regex syntax is accepted.
/// Later editions accept more flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LanguageVersion {
    Es5,
    /// Adds the `u` and `y` flags.
    Es2015,
    /// Adds the `s` flag.
    Es2018,
    /// Adds the `d` flag.
    Es2022,
    /// Adds the `v` flag.
    #[default]
    Es2024,
}

impl LanguageVersion {
    /// \return whether this version accepts every flag set in \p flags.
    pub fn supports(self, flags: &Flags) -> bool {
        let needs = |set: bool, version: LanguageVersion| !set || self >= version;
        needs(flags.unicode || flags.sticky, LanguageVersion::Es2015)
            && needs(flags.dot_all, LanguageVersion::Es2018)
            && needs(flags.has_indices, LanguageVersion::Es2022)
            && needs(flags.unicode_sets, LanguageVersion::Es2024)
    }
}

/// Everything that controls how a pattern is compiled.
#[derive(Debug, Clone)]
pub struct Options {
    pub flags: Flags,
    pub version: LanguageVersion,

    /// The deepest nesting of groups, lookarounds and classes accepted.
    pub max_nesting_depth: usize,

    /// The source of script and emoji sequence data.
    pub unicode_data: Arc<dyn UnicodeData + Send + Sync>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            flags: Flags::default(),
            version: LanguageVersion::default(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            unicode_data: Arc::new(BuiltinUnicodeData),
        }
    }
}

impl From<Flags> for Options {
    fn from(flags: Flags) -> Self {
        Options {
            flags,
            ..Default::default()
        }
    }
}

impl Options {
    /// Check that the flags may be used together, and with our language version.
    pub fn validate(&self) -> Result<(), Error> {
        if self.flags.unicode && self.flags.unicode_sets {
            return Err(Error::new(ErrorKind::InvalidFlagCombination, 0));
        }
        if !self.version.supports(&self.flags) {
            return Err(Error::new(ErrorKind::InvalidFlagCombination, 0));
        }
        Ok(())
    }
}
