//! Dictionary-driven word segmentation.
//!
//! Dynamic programming over character positions: `best[j]` is the best
//! score of any tokenization of `run[..j]`. Multi-character edges exist only
//! for dictionary words; single characters are always allowed so every
//! position stays reachable.

use std::collections::HashMap;

use yuedu_config::segmentation::{DEFAULT_MAX_WORD_LENGTH, SegmentationConfig};
use yuedu_core::dictionary::{AsyncDictionary, Dictionary};
use yuedu_core::language::Token;

/// Edge weights of the search.
///
/// Empirical, not derived from a probability model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    /// Single character that is itself a dictionary entry
    pub known_char: f64,
    /// Single character missing from the dictionary
    pub unknown_char: f64,
    /// Per character of a multi-character dictionary word
    pub per_word_char: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            known_char: -0.5,
            unknown_char: -2.0,
            per_word_char: 1.5,
        }
    }
}

impl ScoringPolicy {
    /// Score of a `len`-character edge, `None` if the edge is not allowed
    pub fn edge_score(&self, len: usize, is_word: bool) -> Option<f64> {
        match (len, is_word) {
            (1, true) => Some(self.known_char),
            (1, false) => Some(self.unknown_char),
            (_, true) => Some(self.per_word_char * len as f64),
            (_, false) => None,
        }
    }
}

/// Substring -> membership answers already fetched from the dictionary.
///
/// Belongs to one caller; it is never shared behind the segmenter's back.
#[derive(Debug, Default)]
pub struct MembershipCache {
    known: HashMap<String, bool>,
}

impl MembershipCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains<D: Dictionary + ?Sized>(&mut self, dictionary: &D, word: &str) -> bool {
        if let Some(&hit) = self.known.get(word) {
            return hit;
        }
        let hit = dictionary.contains(word);
        self.known.insert(word.to_string(), hit);
        hit
    }

    pub fn get(&self, word: &str) -> Option<bool> {
        self.known.get(word).copied()
    }

    pub fn insert(&mut self, word: String, hit: bool) {
        self.known.insert(word, hit);
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn clear(&mut self) {
        self.known.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    max_word_length: usize,
    policy: ScoringPolicy,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORD_LENGTH)
    }
}

impl Segmenter {
    pub fn new(max_word_length: usize) -> Self {
        Self {
            max_word_length: max_word_length.max(1),
            policy: ScoringPolicy::default(),
        }
    }

    pub fn from_config(config: &SegmentationConfig) -> Self {
        Self::new(config.window())
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Best tokenization of `run` with a fresh membership cache
    pub fn segment<D: Dictionary + ?Sized>(&self, dictionary: &D, run: &str) -> Vec<Token> {
        let mut cache = MembershipCache::new();
        self.segment_with_cache(dictionary, run, &mut cache)
    }

    /// Same as [`Segmenter::segment`], reusing answers already in `cache`
    pub fn segment_with_cache<D: Dictionary + ?Sized>(
        &self,
        dictionary: &D,
        run: &str,
        cache: &mut MembershipCache,
    ) -> Vec<Token> {
        let chars: Vec<char> = run.chars().collect();
        self.best_path(&chars, |word| cache.contains(dictionary, word))
    }

    /// Awaitable variant for dictionaries that do I/O per query.
    ///
    /// Every candidate is reachable (single characters always are), so all
    /// memberships are fetched up front and the search then runs offline.
    pub async fn segment_async<D: AsyncDictionary + ?Sized>(
        &self,
        dictionary: &D,
        run: &str,
    ) -> Vec<Token> {
        let chars: Vec<char> = run.chars().collect();
        let mut cache = MembershipCache::new();

        for (_, _, candidate) in self.candidates(&chars) {
            if cache.get(&candidate).is_none() {
                let hit = dictionary.contains_async(&candidate).await;
                cache.insert(candidate, hit);
            }
        }

        self.best_path(&chars, |word| cache.get(word).unwrap_or(false))
    }

    /// Every `(start, end, substring)` the search may ask about
    fn candidates<'a>(
        &self,
        chars: &'a [char],
    ) -> impl Iterator<Item = (usize, usize, String)> + 'a {
        let n = chars.len();
        let window = self.max_word_length;
        (0..n).flat_map(move |i| {
            (i + 1..=n.min(i + window))
                .map(move |j| (i, j, chars[i..j].iter().collect::<String>()))
        })
    }

    fn best_path(&self, chars: &[char], mut is_word: impl FnMut(&str) -> bool) -> Vec<Token> {
        let n = chars.len();
        if n == 0 {
            return Vec::new();
        }

        let mut best = vec![f64::NEG_INFINITY; n + 1];
        let mut prev: Vec<Option<usize>> = vec![None; n + 1];
        best[0] = 0.0;

        for (i, j, candidate) in self.candidates(chars) {
            if !best[i].is_finite() {
                continue;
            }
            let Some(score) = self.policy.edge_score(j - i, is_word(&candidate)) else {
                continue;
            };
            if best[i] + score > best[j] {
                best[j] = best[i] + score;
                prev[j] = Some(i);
            }
        }

        // Backtrack; a missing link splits off one character
        let mut tokens = Vec::new();
        let mut end = n;
        while end > 0 {
            let start = prev[end].unwrap_or(end - 1);
            tokens.push(Token::new(chars[start..end].iter().collect::<String>(), start, end));
            end = start;
        }
        tokens.reverse();

        tracing::trace!("Segmented {} chars into {} tokens", n, tokens.len());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use yuedu_core::dictionary::DictionaryMetadata;

    use super::*;

    struct FakeDict {
        words: HashSet<String>,
        queries: AtomicUsize,
    }

    impl FakeDict {
        fn new(words: &[&str]) -> Self {
            Self {
                words: words.iter().map(|w| w.to_string()).collect(),
                queries: AtomicUsize::new(0),
            }
        }

        fn queries(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    impl Dictionary for FakeDict {
        type Entry = ();

        fn lookup(&self, word: &str) -> Option<()> {
            self.contains(word).then_some(())
        }

        fn contains(&self, word: &str) -> bool {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.words.contains(word)
        }

        fn metadata(&self) -> DictionaryMetadata {
            DictionaryMetadata {
                name: "fake".to_string(),
                version: "0".to_string(),
                language: "zh".to_string(),
                entry_count: self.words.len(),
                reading_count: self.words.len(),
                max_word_length: 0,
            }
        }
    }

    fn surfaces(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn assert_partition(tokens: &[Token], n: usize) {
        let mut expected_start = 0;
        for token in tokens {
            assert_eq!(token.start, expected_start);
            assert!(token.end > token.start);
            assert_eq!(token.text.chars().count(), token.len());
            expected_start = token.end;
        }
        assert_eq!(expected_start, n);
    }

    #[test]
    fn test_empty_input_issues_no_queries() {
        let dict = FakeDict::new(&["你好"]);
        let tokens = Segmenter::default().segment(&dict, "");
        assert!(tokens.is_empty());
        assert_eq!(dict.queries(), 0);
    }

    #[test]
    fn test_whole_run_word_wins() {
        let dict = FakeDict::new(&["你好"]);
        let tokens = Segmenter::default().segment(&dict, "你好");
        assert_eq!(tokens, vec![Token::new("你好", 0, 2)]);
    }

    #[test]
    fn test_longer_word_wins() {
        let dict = FakeDict::new(&["研究", "研究生", "命"]);
        let tokens = Segmenter::default().segment(&dict, "研究生命");
        assert_eq!(surfaces(&tokens), vec!["研究生", "命"]);
    }

    #[test]
    fn test_better_total_split_beats_greedy() {
        let dict = FakeDict::new(&["研究", "研究生", "生命"]);
        let tokens = Segmenter::default().segment(&dict, "研究生命");
        assert_eq!(surfaces(&tokens), vec!["研究", "生命"]);
    }

    #[test]
    fn test_unknown_chars_split_one_by_one() {
        let dict = FakeDict::new(&[]);
        let run = "鑫淼焱垚";
        let tokens = Segmenter::default().segment(&dict, run);
        assert_eq!(surfaces(&tokens), vec!["鑫", "淼", "焱", "垚"]);
        assert_partition(&tokens, 4);
    }

    #[test]
    fn test_offsets_are_chars_not_bytes() {
        let dict = FakeDict::new(&["中国", "人"]);
        let tokens = Segmenter::default().segment(&dict, "中国人");
        assert_eq!(
            tokens,
            vec![Token::new("中国", 0, 2), Token::new("人", 2, 3)]
        );
    }

    #[test]
    fn test_window_bounds_candidates() {
        let dict = FakeDict::new(&["一二三"]);
        let tokens = Segmenter::new(2).segment(&dict, "一二三");
        assert_eq!(surfaces(&tokens), vec!["一", "二", "三"]);

        let tokens = Segmenter::new(3).segment(&dict, "一二三");
        assert_eq!(surfaces(&tokens), vec!["一二三"]);
    }

    #[test]
    fn test_query_count_is_bounded_by_window() {
        let dict = FakeDict::new(&[]);
        let run = "一二三四五六七八九十";
        Segmenter::new(3).segment(&dict, run);
        // each start tries at most 3 ends, clamped at the end of the run
        assert_eq!(dict.queries(), 3 * 10 - 3);
    }

    #[test]
    fn test_warm_cache_skips_repeat_queries() {
        let dict = FakeDict::new(&["你好"]);
        let segmenter = Segmenter::default();
        let mut cache = MembershipCache::new();

        segmenter.segment_with_cache(&dict, "你好", &mut cache);
        let first = dict.queries();
        segmenter.segment_with_cache(&dict, "你好", &mut cache);

        assert_eq!(first, 3);
        assert_eq!(dict.queries(), first);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_partition_on_mixed_run() {
        let dict = FakeDict::new(&["我们", "学习", "中文", "我", "学"]);
        let run = "我们一起学习中文吧";
        let tokens = Segmenter::default().segment(&dict, run);
        assert_partition(&tokens, run.chars().count());
        assert_eq!(
            surfaces(&tokens),
            vec!["我们", "一", "起", "学习", "中文", "吧"]
        );
    }

    #[test]
    fn test_custom_policy() {
        // Rewarding unknown singletons over words flips the preference
        let policy = ScoringPolicy {
            known_char: 5.0,
            unknown_char: 5.0,
            per_word_char: 0.1,
        };
        let dict = FakeDict::new(&["你好"]);
        let tokens = Segmenter::default().with_policy(policy).segment(&dict, "你好");
        assert_eq!(surfaces(&tokens), vec!["你", "好"]);
    }

    #[test]
    fn test_unreachable_positions_fall_back_to_single_chars() {
        // Unknown characters can never be an edge, leaving positions
        // without a predecessor
        let policy = ScoringPolicy {
            unknown_char: f64::NEG_INFINITY,
            ..ScoringPolicy::default()
        };
        let segmenter = Segmenter::default().with_policy(policy);
        let dict = FakeDict::new(&["研究"]);

        let tokens = segmenter.segment(&dict, "研究生");
        assert_eq!(surfaces(&tokens), vec!["研究", "生"]);
        assert_partition(&tokens, 3);

        let tokens = segmenter.segment(&dict, "我研究");
        assert_eq!(surfaces(&tokens), vec!["我", "研", "究"]);
        assert_partition(&tokens, 3);
    }

    #[test]
    fn test_async_matches_sync() {
        let dict = FakeDict::new(&["研究", "研究生", "生命", "我们"]);
        let segmenter = Segmenter::default();
        let run = "我们研究生命";

        let sync = segmenter.segment(&dict, run);
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let asynced = runtime.block_on(segmenter.segment_async(&dict, run));

        assert_eq!(sync, asynced);
    }
}
