use crate::error::{Error, Result};
use crate::normalizer::Normalizer;
use crate::types::{MojibakeRule, NormalizationForm};
use std::cmp::Reverse;
use std::fs;
use std::path::Path;

/// UTF-8 text decoded as Windows-1252 and encoded again, longest first.
/// Bytes 0x81, 0x8D, 0x8F, 0x90 and 0x9D have no Windows-1252 glyph and
/// survive as the matching C1 control character.
const BUILTIN_RULES: &[(&str, &str)] = &[
    // three byte sequences
    ("â€“", "–"),
    ("â€”", "—"),
    ("â€˜", "‘"),
    ("â€™", "’"),
    ("â€š", "‚"),
    ("â€œ", "“"),
    ("â€\u{9d}", "”"),
    ("â€ž", "„"),
    ("â€\u{a0}", "†"),
    ("â€¡", "‡"),
    ("â€¢", "•"),
    ("â€¦", "…"),
    ("â€°", "‰"),
    ("â€¹", "‹"),
    ("â€º", "›"),
    ("â‚¬", "€"),
    ("â„¢", "™"),
    // right quote whose last byte was lost
    ("â€", "”"),
    // U+00A0..U+00BF
    ("Â\u{a0}", "\u{a0}"),
    ("Â¡", "¡"),
    ("Â¢", "¢"),
    ("Â£", "£"),
    ("Â¤", "¤"),
    ("Â¥", "¥"),
    ("Â¦", "¦"),
    ("Â§", "§"),
    ("Â¨", "¨"),
    ("Â©", "©"),
    ("Âª", "ª"),
    ("Â«", "«"),
    ("Â¬", "¬"),
    ("Â\u{ad}", "\u{ad}"),
    ("Â®", "®"),
    ("Â¯", "¯"),
    ("Â°", "°"),
    ("Â±", "±"),
    ("Â²", "²"),
    ("Â³", "³"),
    ("Â´", "´"),
    ("Âµ", "µ"),
    ("Â¶", "¶"),
    ("Â·", "·"),
    ("Â¸", "¸"),
    ("Â¹", "¹"),
    ("Âº", "º"),
    ("Â»", "»"),
    ("Â¼", "¼"),
    ("Â½", "½"),
    ("Â¾", "¾"),
    ("Â¿", "¿"),
    // U+00C0..U+00DF
    ("Ã€", "À"),
    ("Ã\u{81}", "Á"),
    ("Ã‚", "Â"),
    ("Ãƒ", "Ã"),
    ("Ã„", "Ä"),
    ("Ã…", "Å"),
    ("Ã†", "Æ"),
    ("Ã‡", "Ç"),
    ("Ãˆ", "È"),
    ("Ã‰", "É"),
    ("ÃŠ", "Ê"),
    ("Ã‹", "Ë"),
    ("ÃŒ", "Ì"),
    ("Ã\u{8d}", "Í"),
    ("ÃŽ", "Î"),
    ("Ã\u{8f}", "Ï"),
    ("Ã\u{90}", "Ð"),
    ("Ã‘", "Ñ"),
    ("Ã’", "Ò"),
    ("Ã“", "Ó"),
    ("Ã”", "Ô"),
    ("Ã•", "Õ"),
    ("Ã–", "Ö"),
    ("Ã—", "×"),
    ("Ã˜", "Ø"),
    ("Ã™", "Ù"),
    ("Ãš", "Ú"),
    ("Ã›", "Û"),
    ("Ãœ", "Ü"),
    ("Ã\u{9d}", "Ý"),
    ("Ãž", "Þ"),
    ("ÃŸ", "ß"),
    // U+00E0..U+00FF
    ("Ã\u{a0}", "à"),
    ("Ã¡", "á"),
    ("Ã¢", "â"),
    ("Ã£", "ã"),
    ("Ã¤", "ä"),
    ("Ã¥", "å"),
    ("Ã¦", "æ"),
    ("Ã§", "ç"),
    ("Ã¨", "è"),
    ("Ã©", "é"),
    ("Ãª", "ê"),
    ("Ã«", "ë"),
    ("Ã¬", "ì"),
    ("Ã\u{ad}", "í"),
    ("Ã®", "î"),
    ("Ã¯", "ï"),
    ("Ã°", "ð"),
    ("Ã±", "ñ"),
    ("Ã²", "ò"),
    ("Ã³", "ó"),
    ("Ã´", "ô"),
    ("Ãµ", "õ"),
    ("Ã¶", "ö"),
    ("Ã·", "÷"),
    ("Ã¸", "ø"),
    ("Ã¹", "ù"),
    ("Ãº", "ú"),
    ("Ã»", "û"),
    ("Ã¼", "ü"),
    ("Ã½", "ý"),
    ("Ã¾", "þ"),
    ("Ã¿", "ÿ"),
    // à whose non-breaking space was lost
    ("Ã", "à"),
];

/// Ordered set of mojibake rules, longest corrupted sequence first.
///
/// The table is built once and never changes afterwards; extensions consume
/// the value and return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MojibakeTable {
    rules: Vec<MojibakeRule>,
}

impl Default for MojibakeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MojibakeTable {
    pub fn builtin() -> Self {
        Self::from_rules(
            BUILTIN_RULES
                .iter()
                .map(|(corrupted, correct)| MojibakeRule::new(*corrupted, *correct))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<MojibakeRule>) -> Self {
        Self::empty().extend(rules)
    }

    /// Rules with a corrupted sequence already in the table replace it,
    /// the rest are appended. Order is restored afterwards.
    pub fn extend(mut self, additional: impl IntoIterator<Item = MojibakeRule>) -> Self {
        for rule in additional {
            if rule.corrupted.is_empty() {
                continue;
            }
            match self
                .rules
                .iter_mut()
                .find(|existing| existing.corrupted == rule.corrupted)
            {
                Some(existing) => existing.correct = rule.correct,
                None => self.rules.push(rule),
            }
        }
        // stable: equal lengths keep their insertion order
        self.rules.sort_by_key(|rule| Reverse(rule.sequence_len()));
        self
    }

    /// Parses a JSON array of `{"corrupted": .., "correct": ..}` objects.
    pub fn rules_from_json(json: &str) -> Result<Vec<MojibakeRule>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_rules(path: &Path) -> Result<Vec<MojibakeRule>> {
        let json = fs::read_to_string(path).map_err(|source| Error::RulesFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::rules_from_json(&json)
    }

    pub fn rules(&self) -> &[MojibakeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Renders `text` the way it looks after double encoding.
    ///
    /// The correct side of every rule is normalized to `form` first so that
    /// composed and decomposed input both line up with the table. When the
    /// normalizer cannot do that the rules are used as written.
    pub fn corrupt<N: Normalizer>(
        &self,
        text: &str,
        form: NormalizationForm,
        normalizer: &N,
    ) -> String {
        let pairs: Vec<(String, &str)> = self
            .rules
            .iter()
            .filter(|rule| !rule.correct.is_empty())
            .map(|rule| {
                let correct = normalizer
                    .normalize(&rule.correct, form)
                    .unwrap_or_else(|_| rule.correct.clone());
                (correct, rule.corrupted.as_str())
            })
            .collect();

        substitute(text, pairs.iter().map(|(from, to)| (from.as_str(), *to)))
    }

    /// Reverses double encoding in `text`.
    pub fn repair(&self, text: &str) -> String {
        substitute(
            text,
            self.rules
                .iter()
                .map(|rule| (rule.corrupted.as_str(), rule.correct.as_str())),
        )
    }
}

/// Single left-to-right pass: at each position the first matching pair wins
/// and its replacement is never scanned again.
fn substitute<'a, I>(text: &str, pairs: I) -> String
where
    I: Iterator<Item = (&'a str, &'a str)> + Clone,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(c) = rest.chars().next() {
        for (from, to) in pairs.clone() {
            if !from.is_empty() && rest.starts_with(from) {
                out.push_str(to);
                rest = &rest[from.len()..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}
