//! Parsing of raw sense strings (`/meaning; phrasing/CL:個|个[ge4]/`) into
//! typed gloss fragments.

use yuedu_core::preprocess::is_han;

use crate::model::{Gloss, GlossFragment, Sense};
use crate::pinyin::Syllable;

const CLASSIFIER_PREFIX: &str = "CL:";

/// Parse a slash-delimited sense string. Empty senses are dropped.
pub fn parse_senses(raw: &str) -> Vec<Sense> {
    raw.split('/').filter_map(parse_sense).collect()
}

/// Parse one sense; `None` when nothing but whitespace is left
pub fn parse_sense(raw: &str) -> Option<Sense> {
    let mut text = raw.trim();

    let is_classifier = match text.strip_prefix(CLASSIFIER_PREFIX) {
        Some(rest) => {
            text = rest;
            true
        }
        None => false,
    };

    let glosses: Vec<Gloss> = text
        .split(';')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(parse_gloss)
        .collect();

    if glosses.is_empty() {
        return None;
    }

    Some(Sense {
        glosses,
        is_classifier,
    })
}

/// A recognised `HEAD[pin1 yin1]`, `HEAD1|HEAD2[...]` or bare `[...]`
struct Match {
    start: usize,
    end: usize,
    fragments: Vec<GlossFragment>,
}

/// Parse one gloss into fragments.
///
/// Scans left to right. At each position a Han headword followed by a
/// bracketed reading is tried before a bare bracketed reading; whatever
/// lies between matches becomes trimmed `Text`.
pub fn parse_gloss(raw: &str) -> Gloss {
    let chars: Vec<char> = raw.chars().collect();
    let mut fragments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < chars.len() {
        let found = match_link(&chars, pos).or_else(|| match_romanization(&chars, pos));

        match found {
            Some(m) => {
                push_text(&mut fragments, &chars[text_start..m.start]);
                fragments.extend(m.fragments);
                pos = m.end;
                text_start = m.end;
            }
            None if is_han(chars[pos]) => {
                // No reading after this headword; skip the rest of the run
                while pos < chars.len() && is_han(chars[pos]) {
                    pos += 1;
                }
            }
            None => pos += 1,
        }
    }
    push_text(&mut fragments, &chars[text_start..]);

    if fragments.is_empty() && !raw.trim().is_empty() {
        fragments.push(GlossFragment::Text(raw.trim().to_string()));
    }

    Gloss { fragments }
}

fn push_text(fragments: &mut Vec<GlossFragment>, chars: &[char]) {
    let text: String = chars.iter().collect();
    let text = text.trim();
    if !text.is_empty() {
        fragments.push(GlossFragment::Text(text.to_string()));
    }
}

/// End of the Han run starting at `pos`, or `None` if there is none
fn han_run(chars: &[char], pos: usize) -> Option<usize> {
    let end = chars[pos..]
        .iter()
        .position(|&c| !is_han(c))
        .map_or(chars.len(), |len| pos + len);
    (end > pos).then_some(end)
}

/// Bracketed content starting at `pos`: (syllables, index after `]`)
fn bracketed(chars: &[char], pos: usize) -> Option<(Vec<Syllable>, usize)> {
    if chars.get(pos) != Some(&'[') {
        return None;
    }
    let close = pos + 1 + chars[pos + 1..].iter().position(|&c| c == ']')?;
    if close == pos + 1 {
        return None;
    }
    let inner: String = chars[pos + 1..close].iter().collect();
    Some((Syllable::parse_reading(&inner), close + 1))
}

fn match_link(chars: &[char], pos: usize) -> Option<Match> {
    let head_end = han_run(chars, pos)?;
    let traditional: String = chars[pos..head_end].iter().collect();

    let (simplified, bracket_pos) = if chars.get(head_end) == Some(&'|') {
        let simp_end = han_run(chars, head_end + 1)?;
        let simplified: String = chars[head_end + 1..simp_end].iter().collect();
        (simplified, simp_end)
    } else {
        (traditional.clone(), head_end)
    };

    let (syllables, end) = bracketed(chars, bracket_pos)?;

    Some(Match {
        start: pos,
        end,
        fragments: vec![
            GlossFragment::Link {
                traditional,
                simplified,
                romanization: Some(syllables.clone()),
            },
            GlossFragment::Romanization(syllables),
        ],
    })
}

fn match_romanization(chars: &[char], pos: usize) -> Option<Match> {
    let (syllables, end) = bracketed(chars, pos)?;
    Some(Match {
        start: pos,
        end,
        fragments: vec![GlossFragment::Romanization(syllables)],
    })
}
