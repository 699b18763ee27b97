use crate::normalizer::Normalizer;
use crate::types::{Filename, NormalizationForm};
use regex::Regex;

/// Characters that are not portable across filesystems and URLs.
const ILLEGAL_CHARS: &[char] = &[
    '?', '[', ']', '/', '\\', '=', '<', '>', ':', ';', ',', '\'', '"', '&', '$', '#', '*', '(',
    ')', '|', '~', '`', '!', '{', '}', '%', '+',
];

/// Turns accented upload names into plain printable ASCII.
///
/// Only the basename is rewritten; the directory is carried through as-is.
/// The output keeps its case, see [`crate::FilenameRescuer::sanitize_filename`]
/// for the lowercasing variant.
#[derive(Debug, Clone)]
pub struct DiacriticStripper {
    sanitize_special_chars: bool,
    whitespace_runs: Regex,
    dash_runs: Regex,
}

impl DiacriticStripper {
    pub fn new(sanitize_special_chars: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            sanitize_special_chars,
            whitespace_runs: Regex::new(r"[\s-]+")?,
            dash_runs: Regex::new(r"-{2,}")?,
        })
    }

    pub fn strip_accents<N: Normalizer>(&self, normalizer: &N, path: &str) -> String {
        let name = Filename::parse(path);

        // without normalization support the input is used as given
        let composed = normalizer
            .normalize(&name.basename, NormalizationForm::Composed)
            .unwrap_or_else(|_| name.basename.clone());

        let mut basename = transliterate(&composed);
        if self.sanitize_special_chars {
            basename = self.sanitize(&basename);
        }
        basename.retain(is_printable_ascii);

        name.with_basename(basename).to_path_string()
    }

    fn sanitize(&self, basename: &str) -> String {
        let dashed = self.whitespace_runs.replace_all(basename, "-");
        let portable: String = dashed
            .chars()
            .filter(|c| is_printable_ascii(*c) && !ILLEGAL_CHARS.contains(c))
            .collect();
        let collapsed = self.dash_runs.replace_all(&portable, "-");
        collapsed.trim_matches(['.', '-', '_']).to_string()
    }
}

pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7e}')
}

/// Applies the letter table to every character; unmapped ones pass through.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate_char(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}

pub fn transliterate_char(c: char) -> Option<&'static str> {
    let ascii = match c {
        // German, French, Spanish, Swedish, Hungarian
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' => "C",
        'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ð' => "D",
        'ð' => "d",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ő' | 'Ø' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ő' | 'ø' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ű' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ű' => "u",
        'Ý' | 'Ÿ' => "Y",
        'ý' | 'ÿ' => "y",
        'Þ' => "TH",
        'þ' => "th",
        'ß' => "ss",

        // Polish
        'Ą' => "A",
        'ą' => "a",
        'Ć' => "C",
        'ć' => "c",
        'Ę' => "E",
        'ę' => "e",
        'Ł' => "L",
        'ł' => "l",
        'Ń' => "N",
        'ń' => "n",
        'Ś' => "S",
        'ś' => "s",
        'Ź' | 'Ż' => "Z",
        'ź' | 'ż' => "z",

        // Czech
        'Č' => "C",
        'č' => "c",
        'Ď' => "D",
        'ď' => "d",
        'Ě' => "E",
        'ě' => "e",
        'Ň' => "N",
        'ň' => "n",
        'Ř' => "R",
        'ř' => "r",
        'Š' => "S",
        'š' => "s",
        'Ť' => "T",
        'ť' => "t",
        'Ů' => "U",
        'ů' => "u",
        'Ž' => "Z",
        'ž' => "z",

        // Greek
        'Α' | 'Ά' => "A",
        'α' | 'ά' => "a",
        'Β' => "B",
        'β' => "b",
        'Γ' => "G",
        'γ' => "g",
        'Δ' => "D",
        'δ' => "d",
        'Ε' | 'Έ' => "E",
        'ε' | 'έ' => "e",
        'Ζ' => "Z",
        'ζ' => "z",
        'Η' | 'Ή' => "H",
        'η' | 'ή' => "h",
        'Θ' | 'θ' => "8",
        'Ι' | 'Ί' | 'Ϊ' => "I",
        'ι' | 'ί' | 'ϊ' | 'ΐ' => "i",
        'Κ' => "K",
        'κ' => "k",
        'Λ' => "L",
        'λ' => "l",
        'Μ' => "M",
        'μ' => "m",
        'Ν' => "N",
        'ν' => "n",
        'Ξ' | 'ξ' => "3",
        'Ο' | 'Ό' => "O",
        'ο' | 'ό' => "o",
        'Π' => "P",
        'π' => "p",
        'Ρ' => "R",
        'ρ' => "r",
        'Σ' => "S",
        'σ' | 'ς' => "s",
        'Τ' => "T",
        'τ' => "t",
        'Υ' | 'Ύ' | 'Ϋ' => "Y",
        'υ' | 'ύ' | 'ϋ' | 'ΰ' => "y",
        'Φ' => "F",
        'φ' => "f",
        'Χ' => "X",
        'χ' => "x",
        'Ψ' => "PS",
        'ψ' => "ps",
        'Ω' | 'Ώ' => "W",
        'ω' | 'ώ' => "w",

        // Cyrillic
        'А' => "A",
        'а' => "a",
        'Б' => "B",
        'б' => "b",
        'В' => "V",
        'в' => "v",
        'Г' => "G",
        'г' => "g",
        'Ґ' => "G",
        'ґ' => "g",
        'Д' => "D",
        'д' => "d",
        'Е' => "E",
        'е' => "e",
        'Ё' => "Yo",
        'ё' => "yo",
        'Є' => "Ye",
        'є' => "ye",
        'Ж' => "Zh",
        'ж' => "zh",
        'З' => "Z",
        'з' => "z",
        'И' => "I",
        'и' => "i",
        'І' => "I",
        'і' => "i",
        'Ї' => "Yi",
        'ї' => "yi",
        'Й' => "J",
        'й' => "j",
        'К' => "K",
        'к' => "k",
        'Л' => "L",
        'л' => "l",
        'М' => "M",
        'м' => "m",
        'Н' => "N",
        'н' => "n",
        'О' => "O",
        'о' => "o",
        'П' => "P",
        'п' => "p",
        'Р' => "R",
        'р' => "r",
        'С' => "S",
        'с' => "s",
        'Т' => "T",
        'т' => "t",
        'У' => "U",
        'у' => "u",
        'Ф' => "F",
        'ф' => "f",
        'Х' => "H",
        'х' => "h",
        'Ц' => "C",
        'ц' => "c",
        'Ч' => "Ch",
        'ч' => "ch",
        'Ш' | 'Щ' => "Sh",
        'ш' | 'щ' => "sh",
        'Ъ' | 'ъ' | 'Ь' | 'ь' => "",
        'Ы' => "Y",
        'ы' => "y",
        'Э' => "E",
        'э' => "e",
        'Ю' => "Yu",
        'ю' => "yu",
        'Я' => "Ya",
        'я' => "ya",

        _ => return None,
    };
    Some(ascii)
}
