use unicode_normalization::UnicodeNormalization;

/// NFKC applied one character at a time.
///
/// A character whose normal form is not exactly one character is kept as
/// is, so the result has the same character count as `text` and offsets
/// computed on it index into the original. Compatibility ideographs
/// (U+F900 block) and fullwidth forms fold to their unified code points.
pub fn fold_compatibility(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut folded = std::iter::once(c).nfkc();
            match (folded.next(), folded.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

/// A maximal stretch of Han characters inside a larger text.
///
/// `start` is a character offset into the text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub start: usize,
}

/// Whether `c` is a Han ideograph (unified, extensions, compatibility) or 〇
pub fn is_han(c: char) -> bool {
    matches!(
        c as u32,
        0x3007
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2EBEF
            | 0x2F800..=0x2FA1F
            | 0x30000..=0x3134F
    )
}

/// Split `text` into runs of Han characters, dropping everything else
/// (punctuation, whitespace, Latin, digits).
pub fn chinese_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut run_start: Option<(usize, usize)> = None;
    let mut char_idx = 0;

    for (byte_idx, c) in text.char_indices() {
        match (is_han(c), run_start) {
            (true, None) => run_start = Some((byte_idx, char_idx)),
            (false, Some((begin, start))) => {
                runs.push(TextRun {
                    text: &text[begin..byte_idx],
                    start,
                });
                run_start = None;
            }
            _ => {}
        }
        char_idx += 1;
    }

    if let Some((begin, start)) = run_start {
        runs.push(TextRun {
            text: &text[begin..],
            start,
        });
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_split_on_punctuation_and_latin() {
        let runs = chinese_runs("我们，走吧! OK 好");
        let texts: Vec<&str> = runs.iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["我们", "走吧", "好"]);
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[1].start, 3);
        assert_eq!(runs[2].start, 10);
    }

    #[test]
    fn test_runs_empty_and_non_han() {
        assert!(chinese_runs("").is_empty());
        assert!(chinese_runs("hello, world").is_empty());
    }

    #[test]
    fn test_fold_compatibility_keeps_char_count() {
        // U+F96F is the compatibility form of 說
        assert_eq!(fold_compatibility("\u{F96F}話"), "說話");
        assert_eq!(fold_compatibility("ＡＢ，中文"), "AB,中文");

        // ㍿ expands under NFKC and is left alone
        let text = "㍿中文";
        let folded = fold_compatibility(text);
        assert_eq!(folded, text);
        assert_eq!(folded.chars().count(), text.chars().count());
    }
}
