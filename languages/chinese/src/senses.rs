use crate::model::{Gloss, GlossFragment, Sense};

/// A numbered meaning with the classifier senses attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedSense<'a> {
    /// 1-based, classifier senses do not take a number
    pub number: usize,
    pub sense: &'a Sense,
    pub classifiers: Vec<&'a Sense>,
}

/// Display structure of one reading's senses.
///
/// Follows the dataset convention: a classifier sense that is not last
/// belongs to the numbered sense before it, a trailing one applies to the
/// whole reading. This is positional, not semantic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SenseLayout<'a> {
    pub numbered: Vec<NumberedSense<'a>>,
    pub global_classifiers: Vec<&'a Sense>,
}

impl<'a> SenseLayout<'a> {
    pub fn new(senses: &'a [Sense]) -> Self {
        let mut layout = SenseLayout::default();
        let last = senses.len().saturating_sub(1);

        for (idx, sense) in senses.iter().enumerate() {
            if !sense.is_classifier {
                layout.numbered.push(NumberedSense {
                    number: layout.numbered.len() + 1,
                    sense,
                    classifiers: Vec::new(),
                });
                continue;
            }

            match layout.numbered.last_mut() {
                Some(prev) if idx != last => prev.classifiers.push(sense),
                // Trailing, or nothing numbered yet to attach to
                _ => layout.global_classifiers.push(sense),
            }
        }

        layout
    }

    /// Multi-line plain text, one numbered sense per line
    pub fn render_plain(&self) -> String {
        let mut lines = Vec::new();

        for numbered in &self.numbered {
            let mut line = format!("{}. {}", numbered.number, render_sense(numbered.sense));
            for cl in &numbered.classifiers {
                line.push_str(&format!(" (CL: {})", render_sense(cl)));
            }
            lines.push(line);
        }

        for cl in &self.global_classifiers {
            lines.push(format!("CL: {}", render_sense(cl)));
        }

        lines.join("\n")
    }
}

/// Glosses joined with `; `
pub fn render_sense(sense: &Sense) -> String {
    sense
        .glosses
        .iter()
        .map(render_gloss)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn render_gloss(gloss: &Gloss) -> String {
    let mut out = String::new();

    for fragment in &gloss.fragments {
        let piece = match fragment {
            GlossFragment::Text(text) => text.clone(),
            GlossFragment::Romanization(syllables) => {
                let accented: Vec<String> = syllables.iter().map(|s| s.accented()).collect();
                format!("[{}]", accented.join(" "))
            }
            GlossFragment::Link {
                traditional,
                simplified,
                ..
            } if traditional == simplified => traditional.clone(),
            GlossFragment::Link {
                traditional,
                simplified,
                ..
            } => format!("{traditional}|{simplified}"),
        };

        // Readings hug their headword, punctuation hugs what precedes it
        let glued = matches!(fragment, GlossFragment::Romanization(_))
            || piece.starts_with([',', '.', ';', ':', ')']);
        if !out.is_empty() && !glued {
            out.push(' ');
        }
        out.push_str(&piece);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gloss::{parse_gloss, parse_senses};

    #[test]
    fn test_trailing_classifier_is_global() {
        let senses = parse_senses("/book/letter/CL:本[ben3]/");
        let layout = SenseLayout::new(&senses);

        assert_eq!(layout.numbered.len(), 2);
        assert_eq!(layout.numbered[1].number, 2);
        assert!(layout.numbered.iter().all(|n| n.classifiers.is_empty()));
        assert_eq!(layout.global_classifiers.len(), 1);
    }

    #[test]
    fn test_inner_classifier_attaches_to_predecessor() {
        let senses = parse_senses("/table/CL:張|张[zhang1]/chart/");
        let layout = SenseLayout::new(&senses);

        assert_eq!(layout.numbered.len(), 2);
        assert_eq!(layout.numbered[0].classifiers.len(), 1);
        assert!(layout.numbered[1].classifiers.is_empty());
        assert_eq!(layout.numbered[1].number, 2);
        assert!(layout.global_classifiers.is_empty());
    }

    #[test]
    fn test_two_trailing_classifiers_degrade_gracefully() {
        let senses = parse_senses("/student/CL:個|个[ge4]/CL:名[ming2]/");
        let layout = SenseLayout::new(&senses);

        assert_eq!(layout.numbered.len(), 1);
        assert_eq!(layout.numbered[0].classifiers.len(), 1);
        assert_eq!(layout.global_classifiers.len(), 1);
    }

    #[test]
    fn test_leading_classifier_without_predecessor() {
        let senses = parse_senses("/CL:個|个[ge4]/thing/");
        let layout = SenseLayout::new(&senses);

        assert_eq!(layout.numbered.len(), 1);
        assert_eq!(layout.global_classifiers.len(), 1);
    }

    #[test]
    fn test_render_plain() {
        let senses = parse_senses("/book; volume/letter/CL:本[ben3],冊|册[ce4]/");
        let rendered = SenseLayout::new(&senses).render_plain();
        assert_eq!(
            rendered,
            "1. book; volume\n2. letter\nCL: 本[běn], 冊|册[cè]"
        );
    }

    #[test]
    fn test_render_gloss_link() {
        assert_eq!(
            render_gloss(&parse_gloss("variant of 舊|旧[jiu4]")),
            "variant of 舊|旧[jiù]"
        );
    }
}
