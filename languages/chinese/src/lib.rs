pub mod cedict;
pub mod gloss;
pub mod loader;
pub mod model;
pub mod pinyin;
pub mod processor;
pub mod segmenter;
pub mod senses;

pub use cedict::{Cedict, LoadStats, RawRecord};
pub use loader::CedictLoader;
pub use model::{DictionaryEntry, DictionaryResult, Gloss, GlossFragment, Reading, Sense};
pub use pinyin::{Syllable, accent_reading, convert};
pub use processor::ChineseProcessor;
pub use segmenter::{MembershipCache, ScoringPolicy, Segmenter};
pub use senses::SenseLayout;
