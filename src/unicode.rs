//! Unicode property escapes: `\p{...}` and `\P{...}`.

use crate::unicodedata::{ScriptCode, UnicodeData};
use icu_properties::{maps, sets, GeneralCategory, GeneralCategoryGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodePropertyBinary {
    Alphabetic,
    CaseIgnorable,
    Cased,
    ChangesWhenCasefolded,
    ChangesWhenCasemapped,
    ChangesWhenLowercased,
    ChangesWhenTitlecased,
    ChangesWhenUppercased,
    DefaultIgnorableCodePoint,
    GraphemeBase,
    GraphemeExtend,
    IDContinue,
    IDStart,
    Math,
    XIDContinue,
    XIDStart,
    ASCIIHexDigit,
    BidiControl,
    Dash,
    Deprecated,
    Diacritic,
    Extender,
    HexDigit,
    IDSBinaryOperator,
    IDSTrinaryOperator,
    Ideographic,
    JoinControl,
    LogicalOrderException,
    Lowercase,
    NoncharacterCodePoint,
    PatternSyntax,
    PatternWhiteSpace,
    QuotationMark,
    Radical,
    RegionalIndicator,
    SentenceTerminal,
    SoftDotted,
    TerminalPunctuation,
    UnifiedIdeograph,
    Uppercase,
    VariationSelector,
    WhiteSpace,
    Emoji,
    EmojiComponent,
    EmojiModifier,
    EmojiModifierBase,
    EmojiPresentation,
    ExtendedPictographic,
    ChangesWhenNFKCCasefolded,
    BidiMirrored,
    Ascii,
    Any,
    Assigned,
}

impl UnicodePropertyBinary {
    /// Look up a binary property by its name or alias. Matching is strict.
    fn from_name(s: &str) -> Option<Self> {
        use UnicodePropertyBinary::*;
        Some(match s {
            "Alpha" | "Alphabetic" => Alphabetic,
            "CI" | "Case_Ignorable" => CaseIgnorable,
            "Cased" => Cased,
            "CWCF" | "Changes_When_Casefolded" => ChangesWhenCasefolded,
            "CWCM" | "Changes_When_Casemapped" => ChangesWhenCasemapped,
            "CWL" | "Changes_When_Lowercased" => ChangesWhenLowercased,
            "CWT" | "Changes_When_Titlecased" => ChangesWhenTitlecased,
            "CWU" | "Changes_When_Uppercased" => ChangesWhenUppercased,
            "DI" | "Default_Ignorable_Code_Point" => DefaultIgnorableCodePoint,
            "Gr_Base" | "Grapheme_Base" => GraphemeBase,
            "Gr_Ext" | "Grapheme_Extend" => GraphemeExtend,
            "IDC" | "ID_Continue" => IDContinue,
            "IDS" | "ID_Start" => IDStart,
            "Math" => Math,
            "XIDC" | "XID_Continue" => XIDContinue,
            "XIDS" | "XID_Start" => XIDStart,
            "AHex" | "ASCII_Hex_Digit" => ASCIIHexDigit,
            "Bidi_C" | "Bidi_Control" => BidiControl,
            "Dash" => Dash,
            "Dep" | "Deprecated" => Deprecated,
            "Dia" | "Diacritic" => Diacritic,
            "Ext" | "Extender" => Extender,
            "Hex" | "Hex_Digit" => HexDigit,
            "IDSB" | "IDS_Binary_Operator" => IDSBinaryOperator,
            "IDST" | "IDS_Trinary_Operator" => IDSTrinaryOperator,
            "Ideo" | "Ideographic" => Ideographic,
            "Join_C" | "Join_Control" => JoinControl,
            "LOE" | "Logical_Order_Exception" => LogicalOrderException,
            "Lower" | "Lowercase" => Lowercase,
            "NChar" | "Noncharacter_Code_Point" => NoncharacterCodePoint,
            "Pat_Syn" | "Pattern_Syntax" => PatternSyntax,
            "Pat_WS" | "Pattern_White_Space" => PatternWhiteSpace,
            "QMark" | "Quotation_Mark" => QuotationMark,
            "Radical" => Radical,
            "RI" | "Regional_Indicator" => RegionalIndicator,
            "STerm" | "Sentence_Terminal" => SentenceTerminal,
            "SD" | "Soft_Dotted" => SoftDotted,
            "Term" | "Terminal_Punctuation" => TerminalPunctuation,
            "UIdeo" | "Unified_Ideograph" => UnifiedIdeograph,
            "Upper" | "Uppercase" => Uppercase,
            "VS" | "Variation_Selector" => VariationSelector,
            "space" | "White_Space" => WhiteSpace,
            "Emoji" => Emoji,
            "EComp" | "Emoji_Component" => EmojiComponent,
            "EMod" | "Emoji_Modifier" => EmojiModifier,
            "EBase" | "Emoji_Modifier_Base" => EmojiModifierBase,
            "EPres" | "Emoji_Presentation" => EmojiPresentation,
            "ExtPict" | "Extended_Pictographic" => ExtendedPictographic,
            "CWKCF" | "Changes_When_NFKC_Casefolded" => ChangesWhenNFKCCasefolded,
            "Bidi_M" | "Bidi_Mirrored" => BidiMirrored,
            "ASCII" => Ascii,
            "Any" => Any,
            "Assigned" => Assigned,
            _ => return None,
        })
    }

    fn contains(self, cp: u32) -> bool {
        use UnicodePropertyBinary::*;
        match self {
            Alphabetic => sets::alphabetic().contains32(cp),
            CaseIgnorable => sets::case_ignorable().contains32(cp),
            Cased => sets::cased().contains32(cp),
            ChangesWhenCasefolded => sets::changes_when_casefolded().contains32(cp),
            ChangesWhenCasemapped => sets::changes_when_casemapped().contains32(cp),
            ChangesWhenLowercased => sets::changes_when_lowercased().contains32(cp),
            ChangesWhenTitlecased => sets::changes_when_titlecased().contains32(cp),
            ChangesWhenUppercased => sets::changes_when_uppercased().contains32(cp),
            DefaultIgnorableCodePoint => sets::default_ignorable_code_point().contains32(cp),
            GraphemeBase => sets::grapheme_base().contains32(cp),
            GraphemeExtend => sets::grapheme_extend().contains32(cp),
            IDContinue => sets::id_continue().contains32(cp),
            IDStart => sets::id_start().contains32(cp),
            Math => sets::math().contains32(cp),
            XIDContinue => sets::xid_continue().contains32(cp),
            XIDStart => sets::xid_start().contains32(cp),
            ASCIIHexDigit => sets::ascii_hex_digit().contains32(cp),
            BidiControl => sets::bidi_control().contains32(cp),
            Dash => sets::dash().contains32(cp),
            Deprecated => sets::deprecated().contains32(cp),
            Diacritic => sets::diacritic().contains32(cp),
            Extender => sets::extender().contains32(cp),
            HexDigit => sets::hex_digit().contains32(cp),
            IDSBinaryOperator => sets::ids_binary_operator().contains32(cp),
            IDSTrinaryOperator => sets::ids_trinary_operator().contains32(cp),
            Ideographic => sets::ideographic().contains32(cp),
            JoinControl => sets::join_control().contains32(cp),
            LogicalOrderException => sets::logical_order_exception().contains32(cp),
            Lowercase => sets::lowercase().contains32(cp),
            NoncharacterCodePoint => sets::noncharacter_code_point().contains32(cp),
            PatternSyntax => sets::pattern_syntax().contains32(cp),
            PatternWhiteSpace => sets::pattern_white_space().contains32(cp),
            QuotationMark => sets::quotation_mark().contains32(cp),
            Radical => sets::radical().contains32(cp),
            RegionalIndicator => sets::regional_indicator().contains32(cp),
            SentenceTerminal => sets::sentence_terminal().contains32(cp),
            SoftDotted => sets::soft_dotted().contains32(cp),
            TerminalPunctuation => sets::terminal_punctuation().contains32(cp),
            UnifiedIdeograph => sets::unified_ideograph().contains32(cp),
            Uppercase => sets::uppercase().contains32(cp),
            VariationSelector => sets::variation_selector().contains32(cp),
            WhiteSpace => sets::white_space().contains32(cp),
            Emoji => sets::emoji().contains32(cp),
            EmojiComponent => sets::emoji_component().contains32(cp),
            EmojiModifier => sets::emoji_modifier().contains32(cp),
            EmojiModifierBase => sets::emoji_modifier_base().contains32(cp),
            EmojiPresentation => sets::emoji_presentation().contains32(cp),
            ExtendedPictographic => sets::extended_pictographic().contains32(cp),
            ChangesWhenNFKCCasefolded => sets::changes_when_nfkc_casefolded().contains32(cp),
            BidiMirrored => sets::bidi_mirrored().contains32(cp),
            Ascii => cp <= 0x7F,
            Any => cp <= 0x10FFFF,
            Assigned => maps::general_category().get32(cp) != GeneralCategory::Unassigned,
        }
    }
}

/// A resolved property escape.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropertyEscape {
    Binary(UnicodePropertyBinary),
    GeneralCategory(GeneralCategoryGroup),
    Script(ScriptCode),
    ScriptExtensions(ScriptCode),
}

impl PropertyEscape {
    /// Resolve the contents of `\p{...}`: either `name=value` or a lone
    /// general category value or binary property.
    /// Script names are resolved through \p data.
    pub fn resolve(name: &str, value: Option<&str>, data: &dyn UnicodeData) -> Option<Self> {
        match value {
            Some(value) => match name {
                "General_Category" | "gc" => GeneralCategoryGroup::name_to_enum_mapper()
                    .get_strict(value)
                    .map(PropertyEscape::GeneralCategory),
                "Script" | "sc" => data.script_from_name(value).map(PropertyEscape::Script),
                "Script_Extensions" | "scx" => data
                    .script_from_name(value)
                    .map(PropertyEscape::ScriptExtensions),
                _ => None,
            },
            None => UnicodePropertyBinary::from_name(name)
                .map(PropertyEscape::Binary)
                .or_else(|| {
                    GeneralCategoryGroup::name_to_enum_mapper()
                        .get_strict(name)
                        .map(PropertyEscape::GeneralCategory)
                }),
        }
    }

    pub fn contains(&self, cp: u32, data: &dyn UnicodeData) -> bool {
        match *self {
            PropertyEscape::Binary(b) => b.contains(cp),
            PropertyEscape::GeneralCategory(group) => {
                group.contains(maps::general_category().get32(cp))
            }
            PropertyEscape::Script(code) => data.script_of(cp) == code,
            PropertyEscape::ScriptExtensions(code) => data.has_script_extension(cp, code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicodedata::BuiltinUnicodeData;

    fn resolve(name: &str, value: Option<&str>) -> Option<PropertyEscape> {
        PropertyEscape::resolve(name, value, &BuiltinUnicodeData)
    }

    #[test]
    fn resolution() {
        assert!(resolve("L", None).is_some());
        assert!(resolve("Letter", None).is_some());
        assert!(resolve("gc", Some("Lu")).is_some());
        assert!(resolve("Alphabetic", None).is_some());
        assert!(resolve("sc", Some("Greek")).is_some());
        assert!(resolve("scx", Some("Grek")).is_some());
        // Scripts are not lone values, and matching is strict.
        assert!(resolve("Greek", None).is_none());
        assert!(resolve("letter", None).is_none());
        assert!(resolve("Alphabetic", Some("Yes")).is_none());
    }

    #[test]
    fn membership() {
        let data = BuiltinUnicodeData;
        let lu = resolve("Lu", None).unwrap();
        assert!(lu.contains('A' as u32, &data));
        assert!(!lu.contains('a' as u32, &data));
        let greek = resolve("Script", Some("Greek")).unwrap();
        assert!(greek.contains(0x03C9, &data));
        assert!(!greek.contains('w' as u32, &data));
        let any = resolve("Any", None).unwrap();
        assert!(any.contains(0xD800, &data));
        let assigned = resolve("Assigned", None).unwrap();
        assert!(!assigned.contains(0x378, &data));
    }
}
