use crate::GenUnicode;
use std::collections::BTreeMap;
use std::fmt::Write;

/// The properties of strings making up RGI_Emoji, in output order.
const PROPERTIES: [&str; 6] = [
    "Basic_Emoji",
    "Emoji_Keycap_Sequence",
    "RGI_Emoji_Modifier_Sequence",
    "RGI_Emoji_Flag_Sequence",
    "RGI_Emoji_Tag_Sequence",
    "RGI_Emoji_ZWJ_Sequence",
];

fn is_regional_indicator(cp: u32) -> bool {
    (0x1F1E6..=0x1F1FF).contains(&cp)
}

/// \return the property of strings an RGI emoji sequence belongs to.
fn classify(seq: &[u32]) -> &'static str {
    match seq {
        [a, b] if is_regional_indicator(*a) && is_regional_indicator(*b) => {
            "RGI_Emoji_Flag_Sequence"
        }
        [0x1F3F4, .., 0xE007F] => "RGI_Emoji_Tag_Sequence",
        [.., 0x20E3] => "Emoji_Keycap_Sequence",
        _ if seq.contains(&0x200D) => "RGI_Emoji_ZWJ_Sequence",
        [_, 0x1F3FB..=0x1F3FF] => "RGI_Emoji_Modifier_Sequence",
        _ => "Basic_Emoji",
    }
}

/// Collect the RGI set: every fully-qualified emoji and every component.
fn parse_sequences(text: &str) -> BTreeMap<&'static str, Vec<Vec<u32>>> {
    let mut properties: BTreeMap<&'static str, Vec<Vec<u32>>> = BTreeMap::new();
    for line in text.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(';');
        let codepoints = fields.next().unwrap().trim();
        let status = fields.next().unwrap().split('#').next().unwrap().trim();
        if status != "fully-qualified" && status != "component" {
            continue;
        }
        let seq: Vec<u32> = codepoints
            .split_whitespace()
            .map(|s| u32::from_str_radix(s, 16).unwrap())
            .collect();
        properties.entry(classify(&seq)).or_default().push(seq);
    }
    for seqs in properties.values_mut() {
        seqs.sort();
        seqs.dedup();
    }
    properties
}

fn emoji_version(text: &str) -> &str {
    text.lines()
        .find_map(|line| line.strip_prefix("# Version:"))
        .map_or("unknown", str::trim)
}

impl GenUnicode {
    pub(crate) fn generate_string_properties(&mut self, text: &str) {
        let properties = parse_sequences(text);
        let out = &mut self.scope;
        writeln!(
            out,
            "// Generated by gen-unicode from emoji-test.txt, Emoji {}. Do not edit.",
            emoji_version(text)
        )
        .unwrap();

        for name in PROPERTIES {
            writeln!(out, "\nconst {}: &[&[u32]] = &[", name.to_uppercase()).unwrap();
            for seq in properties.get(name).into_iter().flatten() {
                let cps: Vec<String> = seq.iter().map(|cp| format!("0x{:X}", cp)).collect();
                writeln!(out, "    &[{}],", cps.join(", ")).unwrap();
            }
            writeln!(out, "];").unwrap();
        }

        writeln!(out, "\nconst RGI_EMOJI: &[&[&[u32]]] = &[").unwrap();
        for name in PROPERTIES {
            writeln!(out, "    {},", name.to_uppercase()).unwrap();
        }
        writeln!(out, "];").unwrap();

        writeln!(
            out,
            "\n/// \\return the tables making up the property of strings \\p name.\n\
             pub(crate) fn string_property_tables(name: &str) -> Option<&'static [&'static [&'static [u32]]]> {{\n    \
             match name {{"
        )
        .unwrap();
        for name in PROPERTIES {
            writeln!(
                out,
                "        \"{}\" => Some(&[{}]),",
                name,
                name.to_uppercase()
            )
            .unwrap();
        }
        writeln!(out, "        \"RGI_Emoji\" => Some(RGI_EMOJI),").unwrap();
        writeln!(out, "        _ => None,\n    }}\n}}").unwrap();
    }
}
