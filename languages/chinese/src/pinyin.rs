use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Accented forms per vowel, indexed by tone - 1. The fifth (neutral)
/// form is the bare letter.
const TONE_MARKS: [(char, [char; 5]); 12] = [
    ('a', ['ā', 'á', 'ǎ', 'à', 'a']),
    ('e', ['ē', 'é', 'ě', 'è', 'e']),
    ('i', ['ī', 'í', 'ǐ', 'ì', 'i']),
    ('o', ['ō', 'ó', 'ǒ', 'ò', 'o']),
    ('u', ['ū', 'ú', 'ǔ', 'ù', 'u']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À', 'A']),
    ('E', ['Ē', 'É', 'Ě', 'È', 'E']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì', 'I']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò', 'O']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù', 'U']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ', 'Ü']),
];

fn is_vowel(c: char) -> bool {
    TONE_MARKS.iter().any(|(v, _)| *v == c)
}

/// `u:` and `v` are the two ASCII spellings of `ü`
fn normalize_umlaut(syllable: &str) -> String {
    syllable
        .replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

/// Index (in chars) of the vowel that carries the tone mark
fn tone_position(chars: &[char]) -> Option<usize> {
    let lower: Vec<char> = chars.iter().map(|c| lowercase(*c)).collect();

    if let Some(pos) = lower.iter().position(|&c| c == 'a') {
        return Some(pos);
    }
    if let Some(pos) = lower.iter().position(|&c| c == 'e') {
        return Some(pos);
    }
    if let Some(pos) = lower.windows(2).position(|w| w == ['o', 'u']) {
        return Some(pos);
    }
    chars.iter().rposition(|&c| is_vowel(c))
}

fn lowercase(c: char) -> char {
    match c {
        'Ü' => 'ü',
        c => c.to_ascii_lowercase(),
    }
}

/// Convert one numbered-tone syllable (`hao3`) to its accented form (`hǎo`).
///
/// Total: input without a trailing tone digit comes back untouched, and a
/// syllable with no vowel comes back normalized with the digit dropped.
pub fn convert(syllable: &str) -> String {
    let Some(last) = syllable.chars().last() else {
        return String::new();
    };
    let tone = match last.to_digit(10) {
        Some(t @ 1..=5) => t as usize,
        _ => return syllable.to_string(),
    };

    let base = &syllable[..syllable.len() - last.len_utf8()];
    let mut chars: Vec<char> = normalize_umlaut(base).chars().collect();

    if let Some(pos) = tone_position(&chars) {
        let vowel = chars[pos];
        if let Some((_, marks)) = TONE_MARKS.iter().find(|(v, _)| *v == vowel) {
            chars[pos] = marks[tone - 1];
        }
    }

    chars.into_iter().collect()
}

/// Convert a space-delimited reading (`ni3 hao3`) syllable by syllable
pub fn accent_reading(reading: &str) -> String {
    reading
        .split_whitespace()
        .map(convert)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One romanized syllable as stored in the dataset, numbered-tone form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Syllable(String);

impl Syllable {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Split a space-delimited reading into syllables
    pub fn parse_reading(reading: &str) -> Vec<Syllable> {
        reading.split_whitespace().map(Syllable::new).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tone number 1-5, if the syllable ends with one
    pub fn tone(&self) -> Option<u8> {
        match self.0.chars().last()?.to_digit(10)? {
            t @ 1..=5 => Some(t as u8),
            _ => None,
        }
    }

    pub fn accented(&self) -> String {
        convert(&self.0)
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Display layers get both spellings so they never convert again
impl Serialize for Syllable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Syllable", 2)?;
        state.serialize_field("numbered", &self.0)?;
        state.serialize_field("accented", &self.accented())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tones() {
        assert_eq!(convert("ma1"), "mā");
        assert_eq!(convert("ma2"), "má");
        assert_eq!(convert("ma3"), "mǎ");
        assert_eq!(convert("ma4"), "mà");
        assert_eq!(convert("ma5"), "ma");
    }

    #[test]
    fn test_vowel_precedence() {
        // a beats o
        assert_eq!(convert("hao3"), "hǎo");
        // e beats i
        assert_eq!(convert("xie4"), "xiè");
        // ou marks the o
        assert_eq!(convert("dou1"), "dōu");
        // otherwise the last vowel
        assert_eq!(convert("gui4"), "guì");
        assert_eq!(convert("liu2"), "liú");
        assert_eq!(convert("shuo1"), "shuō");
    }

    #[test]
    fn test_umlaut_spellings() {
        assert_eq!(convert("lu:an4"), "lüàn");
        assert_eq!(convert("luan4"), "luàn");
        assert_eq!(convert("nu:3"), "nǚ");
        assert_eq!(convert("nv3"), "nǚ");
        assert_eq!(convert("lu:4"), convert("lv4"));
        assert_eq!(convert("lu:5"), "lü");
    }

    #[test]
    fn test_no_tone_digit_is_unchanged() {
        assert_eq!(convert("hao"), "hao");
        assert_eq!(convert("hǎo"), "hǎo");
        assert_eq!(convert("ma0"), "ma0");
        assert_eq!(convert("ma6"), "ma6");
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_no_vowel() {
        assert_eq!(convert("r5"), "r");
        assert_eq!(convert("m2"), "m");
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(convert("Bei3"), "Běi");
        assert_eq!(convert("Ou1"), "Ōu");
        assert_eq!(convert("E2"), "É");
    }

    #[test]
    fn test_accent_reading() {
        assert_eq!(accent_reading("ni3 hao3"), "nǐ hǎo");
        assert_eq!(accent_reading("  xue2   sheng5 "), "xué sheng");
    }

    #[test]
    fn test_syllable_tone() {
        assert_eq!(Syllable::new("ge4").tone(), Some(4));
        assert_eq!(Syllable::new("ge").tone(), None);
        assert_eq!(Syllable::new("ge4").accented(), "gè");
    }

    #[test]
    fn test_syllable_serializes_both_forms() {
        let json = serde_json::to_value(Syllable::new("chang2")).unwrap();
        assert_eq!(json["numbered"], "chang2");
        assert_eq!(json["accented"], "cháng");
    }
}
