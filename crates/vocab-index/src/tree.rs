//! The per-document word index.
//!
//! A [`WordTree`] maps language → normalized word → chronologically ordered
//! [`WordTwig`]s, one twig per occurrence. Trees merge with [`WordTree::graft`]
//! and replay SuperMemo-2 over each word's history with
//! [`WordTree::harvest`].
//!
//! Twigs hold an `Arc` to the AST section that owns their word, so a tree
//! keeps its document's sections alive; replacing the tree drops them.

use crate::lemmatizer::Lemmatizer;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use vocab_parser::{Diagnostic, Language, VocabAst, VocabularySection, Word};
use vocab_sm2::{sm2, GRADE_BLACKOUT, GRADE_PERFECT, INITIAL_EASINESS_FACTOR};

/// Starting diagnostic attached when a twig's raw grade leaves `0..=5`
pub const GRADE_RANGE_MESSAGE: &str =
    "Expect grade to be from 0 to 5. Can also leave empty for the default 0";

/// One occurrence of a word in one dated section
#[derive(Debug, Clone)]
pub struct WordTwig {
    /// Grade clamped into `0..=5`
    pub grade: i32,
    /// The section's date; twigs only exist for sections with a valid date
    pub date: NaiveDate,
    /// The word as written
    pub word: Word,
    /// Owning section, kept alive by the tree
    pub section: Arc<VocabularySection>,
    /// Diagnostics recorded at insertion, surfaced when the twig is harvested
    pub starting_diagnostics: Vec<Diagnostic>,
}

impl WordTwig {
    /// Identity of the owning section; twigs with equal identity are
    /// byte-equivalent copies from the same parse.
    pub fn identity(&self) -> String {
        self.section.identity()
    }
}

/// All twigs for one language, keyed by normalized word
#[derive(Debug, Clone, Default)]
pub struct LanguageBranch {
    twigs: FxHashMap<String, Vec<WordTwig>>,
}

impl LanguageBranch {
    /// Append `other`'s twigs, deduplicate by section identity (last writer
    /// wins), and restore date order.
    fn graft(&mut self, other: LanguageBranch) {
        for (word, twigs) in other.twigs {
            self.twigs.entry(word).or_default().extend(twigs);
        }

        for twigs in self.twigs.values_mut() {
            let mut uniques: FxHashMap<String, WordTwig> = FxHashMap::default();
            for twig in twigs.drain(..) {
                uniques.insert(twig.identity(), twig);
            }
            twigs.extend(uniques.into_values());
            sort_twigs(twigs);
        }
    }
}

fn sort_twigs(twigs: &mut [WordTwig]) {
    twigs.sort_by(|a, b| {
        (a.date, a.word.line, &a.section.uri).cmp(&(b.date, b.word.line, &b.section.uri))
    });
}

/// Harvested summary of one `(language, normalized word)` pair
#[derive(Debug, Clone)]
pub struct WordFruit {
    pub language: Language,
    /// The normalized text
    pub text: String,
    /// Every contributing occurrence, in date order
    pub twigs: Vec<WordTwig>,
    /// Days until the next review is due, after replaying the history
    pub interval: f64,
    /// Date of the last occurrence
    pub last_seen: Option<NaiveDate>,
}

impl WordFruit {
    /// Every word object that contributed a twig
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.twigs.iter().map(|twig| &twig.word)
    }

    /// All starting diagnostics accumulated across the history
    pub fn starting_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.twigs.iter().flat_map(|twig| twig.starting_diagnostics.iter())
    }
}

/// Two-level index: language → normalized word → ordered occurrences
#[derive(Debug, Clone, Default)]
pub struct WordTree {
    branches: FxHashMap<Language, LanguageBranch>,
}

impl WordTree {
    pub fn new() -> Self {
        WordTree::default()
    }

    /// Twigs recorded for `word` under `language`, in date order
    pub fn twigs(&self, language: Language, word: &str) -> &[WordTwig] {
        self.branches.get(&language).and_then(|branch| branch.twigs.get(word)).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.branches.values().all(|branch| branch.twigs.is_empty())
    }

    /// Insert one occurrence. The raw grade is clamped into `0..=5`; leaving
    /// the interval earns the twig a starting warning at the word's span.
    /// Sections without a valid date are not indexable and are skipped.
    pub fn add_twig(
        &mut self,
        language: Language,
        word: &Word,
        section: &Arc<VocabularySection>,
        lemmatizer: &dyn Lemmatizer,
    ) {
        let Some(date) = section.date.as_ref().and_then(|date| date.time) else {
            return;
        };

        let grade = word.grade.clamp(GRADE_BLACKOUT, GRADE_PERFECT);
        let mut starting_diagnostics = Vec::new();
        if grade != word.grade {
            starting_diagnostics
                .push(Diagnostic::warning(GRADE_RANGE_MESSAGE, word.line, word.start, word.end));
        }

        let twig = WordTwig {
            grade,
            date,
            word: word.clone(),
            section: Arc::clone(section),
            starting_diagnostics,
        };

        let key = lemmatizer.normalize(language, word);
        let twigs = self.branches.entry(language).or_default().twigs.entry(key).or_default();
        twigs.push(twig);
        sort_twigs(twigs);
    }

    /// Merge `other` into this tree. Grafting is idempotent: twigs carrying
    /// an identity already present are collapsed to one representative.
    pub fn graft(&mut self, other: WordTree) {
        for (language, branch) in other.branches {
            match self.branches.entry(language) {
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(branch);
                }
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    entry.get_mut().graft(branch);
                }
            }
        }
    }

    /// Replay SuperMemo-2 over every word's history, oldest twig first.
    ///
    /// The interval handed to each step is the elapsed days since the
    /// previous sighting (zero for the first). Output is sorted by language
    /// and word for deterministic downstream diagnostics.
    pub fn harvest(&self) -> Vec<WordFruit> {
        let mut fruits = Vec::new();

        for (&language, branch) in &self.branches {
            for (text, twigs) in &branch.twigs {
                let mut repetition = 0u32;
                let mut easiness = INITIAL_EASINESS_FACTOR;
                let mut interval = 0.0;
                let mut last_seen: Option<NaiveDate> = None;

                for twig in twigs {
                    let elapsed =
                        last_seen.map_or(0.0, |previous| (twig.date - previous).num_days() as f64);
                    (repetition, interval, easiness) = sm2(twig.grade, repetition, elapsed, easiness);
                    last_seen = Some(twig.date);
                }

                fruits.push(WordFruit {
                    language,
                    text: text.clone(),
                    twigs: twigs.clone(),
                    interval,
                    last_seen,
                });
            }
        }

        fruits.sort_by(|a, b| (a.language.tag(), &a.text).cmp(&(b.language.tag(), &b.text)));
        fruits
    }

    /// Hover-style lookup: the fruit whose contributing word covers the
    /// given document-local coordinate.
    pub fn pick(&self, line: u32, column: u32) -> Option<WordFruit> {
        self.harvest().into_iter().find(|fruit| {
            fruit
                .words()
                .any(|word| word.line == line && word.start <= column && column < word.end)
        })
    }
}

/// Build a fresh tree from a parsed document: every word of every new and
/// reviewed words line becomes one twig. The tree takes ownership of the
/// AST's sections.
pub fn ast_to_word_tree(ast: VocabAst, lemmatizer: &dyn Lemmatizer) -> WordTree {
    let mut tree = WordTree::new();

    for section in ast.sections {
        let section = Arc::new(section);
        for words_section in section.words_sections() {
            for word in &words_section.words {
                tree.add_twig(words_section.language, word, &section, lemmatizer);
            }
        }
    }

    tree
}
