//! The Unicode data a regex consults beyond the general category and binary
//! properties: scripts and properties of strings.
//!
//! A provider is chosen once, when the regex is compiled, through
//! [`Options`](crate::Options). [`BuiltinUnicodeData`] is used by default.

use crate::emojitables;
use icu_properties::{maps, script, Script};
use std::fmt;

/// A script code, as understood by a [`UnicodeData`] provider.
pub type ScriptCode = u16;

/// The names of the properties of strings, usable only in unicode-sets mode.
pub const STRING_PROPERTY_NAMES: [&str; 7] = [
    "Basic_Emoji",
    "Emoji_Keycap_Sequence",
    "RGI_Emoji_Modifier_Sequence",
    "RGI_Emoji_Flag_Sequence",
    "RGI_Emoji_Tag_Sequence",
    "RGI_Emoji_ZWJ_Sequence",
    "RGI_Emoji",
];

/// \return whether \p name is a property of strings.
pub fn is_string_property(name: &str) -> bool {
    STRING_PROPERTY_NAMES.contains(&name)
}

/// A source of script and emoji sequence data.
pub trait UnicodeData: fmt::Debug {
    /// \return the code for a script name or alias, like `Greek` or `Grek`.
    fn script_from_name(&self, name: &str) -> Option<ScriptCode>;

    /// \return the Script property of \p cp.
    fn script_of(&self, cp: u32) -> ScriptCode;

    /// \return the Script_Extensions of \p cp.
    fn script_extensions(&self, cp: u32) -> Vec<ScriptCode>;

    /// \return whether \p code is among the Script_Extensions of \p cp.
    fn has_script_extension(&self, cp: u32, code: ScriptCode) -> bool {
        self.script_extensions(cp).contains(&code)
    }

    /// \return the sequences of a property of strings, longest first, or None
    /// if \p name is not a property of strings this provider knows.
    fn string_property_sequences(&self, name: &str) -> Option<Vec<Vec<u32>>>;
}

/// The built-in provider. Scripts come from ICU4X data; the emoji sequences
/// are the RGI set, generated into `emojitables.rs` by `gen-unicode`.
#[derive(Debug, Default, Copy, Clone)]
pub struct BuiltinUnicodeData;

impl UnicodeData for BuiltinUnicodeData {
    fn script_from_name(&self, name: &str) -> Option<ScriptCode> {
        Script::name_to_enum_mapper()
            .get_strict(name)
            .map(|sc| sc.0)
    }

    fn script_of(&self, cp: u32) -> ScriptCode {
        maps::script().get32(cp).0
    }

    fn script_extensions(&self, cp: u32) -> Vec<ScriptCode> {
        script::script_with_extensions()
            .get_script_extensions_val(cp)
            .iter()
            .map(|sc| sc.0)
            .collect()
    }

    fn has_script_extension(&self, cp: u32, code: ScriptCode) -> bool {
        script::script_with_extensions().has_script(cp, Script(code))
    }

    fn string_property_sequences(&self, name: &str) -> Option<Vec<Vec<u32>>> {
        let tables = emojitables::string_property_tables(name)?;
        let mut seqs: Vec<Vec<u32>> = tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|seq| seq.to_vec())
            .collect();
        seqs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        seqs.dedup();
        Some(seqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Regex;

    const VS16: u32 = 0xFE0F;
    const KEYCAP: u32 = 0x20E3;

    fn sequences(name: &str) -> Vec<Vec<u32>> {
        BuiltinUnicodeData.string_property_sequences(name).unwrap()
    }

    fn to_string(seq: &[u32]) -> String {
        seq.iter().filter_map(|&cp| char::from_u32(cp)).collect()
    }

    #[test]
    fn scripts() {
        let data = BuiltinUnicodeData;
        let greek = data.script_from_name("Greek").unwrap();
        assert_eq!(data.script_from_name("Grek"), Some(greek));
        assert_eq!(data.script_from_name("NotAScript"), None);
        assert_eq!(data.script_of(0x03B1), greek);
        assert!(data.has_script_extension(0x03B1, greek));
        assert_eq!(data.script_extensions(0x03B1), vec![greek]);
    }

    #[test]
    fn string_properties_are_longest_first() {
        let seqs = sequences("RGI_Emoji");
        assert!(seqs.windows(2).all(|w| w[0].len() >= w[1].len()));
        assert!(seqs.contains(&vec!['#' as u32, VS16, KEYCAP]));
        assert!(BuiltinUnicodeData
            .string_property_sequences("Emoji")
            .is_none());
    }

    #[test]
    fn sequence_counts() {
        assert_eq!(sequences("Basic_Emoji").len(), 1386);
        assert_eq!(sequences("Emoji_Keycap_Sequence").len(), 12);
        assert_eq!(sequences("RGI_Emoji_Modifier_Sequence").len(), 655);
        assert_eq!(sequences("RGI_Emoji_Flag_Sequence").len(), 258);
        assert_eq!(sequences("RGI_Emoji_Tag_Sequence").len(), 3);
        assert_eq!(sequences("RGI_Emoji_ZWJ_Sequence").len(), 1468);
        assert_eq!(sequences("RGI_Emoji").len(), 3782);
    }

    #[test]
    fn sequence_shapes() {
        assert!(sequences("RGI_Emoji_Flag_Sequence")
            .iter()
            .all(|s| s.len() == 2 && s.iter().all(|cp| (0x1F1E6..=0x1F1FF).contains(cp))));
        assert!(sequences("RGI_Emoji_Tag_Sequence")
            .iter()
            .all(|s| s.len() == 7 && s[0] == 0x1F3F4 && s[6] == 0xE007F));
        assert!(sequences("RGI_Emoji_Modifier_Sequence")
            .iter()
            .all(|s| s.len() == 2 && (0x1F3FB..=0x1F3FF).contains(&s[1])));
        assert!(sequences("RGI_Emoji_ZWJ_Sequence")
            .iter()
            .all(|s| s.contains(&0x200D)));
        // waving hand, medium skin tone
        assert!(sequences("RGI_Emoji_Modifier_Sequence").contains(&vec![0x1F44B, 0x1F3FD]));
        // Luxembourg
        assert!(sequences("RGI_Emoji_Flag_Sequence").contains(&vec![0x1F1F1, 0x1F1FA]));
    }

    #[test]
    fn every_rgi_emoji_matches() {
        let re = Regex::with_flags(r"^\p{RGI_Emoji}$", "v").unwrap();
        for seq in sequences("RGI_Emoji") {
            let text = to_string(&seq);
            assert!(re.find(&text).is_some(), "{:X?} should match", seq);
        }
        let flags = Regex::with_flags(r"^\p{RGI_Emoji_Flag_Sequence}+$", "v").unwrap();
        for seq in sequences("RGI_Emoji_Flag_Sequence") {
            assert!(flags.find(&to_string(&seq)).is_some());
        }
        // Two regional indicators that are not a region.
        assert!(flags.find("\u{1F1E6}\u{1F1E6}").is_none());
    }
}
