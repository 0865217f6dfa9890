//! The forest: one word tree per open document.
//!
//! Documents are (re)parsed on the worker pool, one in-flight rebuild per
//! uri. A harvest joins the pool, merges every per-document tree into a
//! transient one, replays SuperMemo-2, and translates the fruits into
//! per-document diagnostics.

use crate::lemmatizer::Lemmatizer;
use crate::pool::WorkerPool;
use crate::tree::{ast_to_word_tree, WordFruit, WordTree};
use crate::Logger;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use vocab_parser::{parse_document, Diagnostic, Language, Severity};

/// Review is due within a day (or overdue)
const DUE_WITHIN_DAYS: f64 = 1.0;
/// Review is coming up; worth a hint but not a published diagnostic
const SOON_WITHIN_DAYS: f64 = 3.0;

pub const REVIEW_NOW_MESSAGE: &str = "Review now!";

/// One harvested diagnostic plus the word it concerns. Parse diagnostics
/// carry no word or language.
#[derive(Debug, Clone)]
pub struct HarvestedDiagnostic {
    pub diagnostic: Diagnostic,
    pub word: Option<String>,
    pub language: Option<Language>,
}

/// Harvest output: every known uri maps to its diagnostics, possibly empty.
pub type HarvestReport = FxHashMap<String, Vec<HarvestedDiagnostic>>;

struct ForestInner {
    /// Per-document trees, replaced wholesale on each successful rebuild
    trees: Mutex<FxHashMap<String, WordTree>>,
    /// Per-document parse diagnostics, replaced together with the tree
    parse_diagnostics: Mutex<FxHashMap<String, Vec<Diagnostic>>>,
    /// Lock pool serializing same-uri rebuilds; acquired inside the job
    uri_locks: Vec<Mutex<()>>,
    /// Next submission sequence per uri
    generations: Mutex<FxHashMap<String, u64>>,
    /// Last sequence whose effect was applied per uri
    applied: Mutex<FxHashMap<String, u64>>,
    lemmatizer: Arc<dyn Lemmatizer>,
    logger: Logger,
}

impl ForestInner {
    fn log(&self, message: &str) {
        (self.logger.as_ref())(message);
    }

    fn uri_lock(&self, uri: &str) -> &Mutex<()> {
        let mut hasher = FxHasher::default();
        uri.hash(&mut hasher);
        &self.uri_locks[(hasher.finish() as usize) % self.uri_locks.len()]
    }

    fn next_generation(&self, uri: &str) -> u64 {
        let mut generations = self.generations.lock();
        let next = generations.entry(uri.to_string()).or_insert(0);
        *next += 1;
        *next
    }

    /// True when a newer submission for this uri already took effect.
    fn is_stale(&self, uri: &str, generation: u64) -> bool {
        self.applied.lock().get(uri).is_some_and(|&applied| applied >= generation)
    }

    fn mark_applied(&self, uri: &str, generation: u64) {
        self.applied.lock().insert(uri.to_string(), generation);
    }

    fn plant_job(&self, uri: String, text: String, generation: u64) {
        let _serialized = self.uri_lock(&uri).lock();
        if self.is_stale(&uri, generation) {
            return;
        }

        let lemmatizer = Arc::clone(&self.lemmatizer);
        let rebuilt = catch_unwind(AssertUnwindSafe(|| {
            let ast = parse_document(uri.clone(), &text);
            let diagnostics: Vec<Diagnostic> = ast.diagnostics().cloned().collect();
            let tree = ast_to_word_tree(ast, lemmatizer.as_ref());
            (tree, diagnostics)
        }));

        match rebuilt {
            Ok((tree, diagnostics)) => {
                self.trees.lock().insert(uri.clone(), tree);
                self.parse_diagnostics.lock().insert(uri.clone(), diagnostics);
                self.mark_applied(&uri, generation);
            }
            Err(_) => {
                self.log(&format!("vocab-ls: rebuild of {uri} panicked; keeping previous tree"));
            }
        }
    }

    fn remove_job(&self, uri: String, generation: u64) {
        let _serialized = self.uri_lock(&uri).lock();
        if self.is_stale(&uri, generation) {
            return;
        }
        self.trees.lock().remove(&uri);
        self.parse_diagnostics.lock().remove(&uri);
        self.mark_applied(&uri, generation);
    }
}

pub struct Forest {
    inner: Arc<ForestInner>,
    pool: WorkerPool,
    /// Serializes harvests against each other
    harvest_lock: Mutex<()>,
}

impl Forest {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>, logger: Logger) -> Self {
        let degree = std::thread::available_parallelism().map(usize::from).unwrap_or(4);
        let inner = Arc::new(ForestInner {
            trees: Mutex::new(FxHashMap::default()),
            parse_diagnostics: Mutex::new(FxHashMap::default()),
            uri_locks: (0..degree).map(|_| Mutex::new(())).collect(),
            generations: Mutex::new(FxHashMap::default()),
            applied: Mutex::new(FxHashMap::default()),
            lemmatizer,
            logger: Arc::clone(&logger),
        });
        let pool = WorkerPool::with_host_parallelism(logger);
        Forest { inner, pool, harvest_lock: Mutex::new(()) }
    }

    /// Schedule a full reparse of `uri`, replacing its tree and parse
    /// diagnostics. Effects for one uri land in submission order.
    pub fn plant(&self, uri: impl Into<String>, text: impl Into<String>) {
        let uri = uri.into();
        let text = text.into();
        let generation = self.inner.next_generation(&uri);
        let inner = Arc::clone(&self.inner);
        if !self.pool.execute(move || inner.plant_job(uri, text, generation)) {
            self.inner.log("vocab-ls: plant submitted after shutdown; dropped");
        }
    }

    /// Schedule removal of `uri` from the forest.
    pub fn remove(&self, uri: impl Into<String>) {
        let uri = uri.into();
        let generation = self.inner.next_generation(&uri);
        let inner = Arc::clone(&self.inner);
        if !self.pool.execute(move || inner.remove_job(uri, generation)) {
            self.inner.log("vocab-ls: remove submitted after shutdown; dropped");
        }
    }

    /// Join outstanding work, merge every tree, replay SuperMemo-2, and
    /// translate the result into per-document diagnostics. Every known uri
    /// appears as a key, even with nothing to report.
    pub fn harvest(&self) -> HarvestReport {
        self.pool.wait_all();
        let _exclusive = self.harvest_lock.lock();

        let trees = self.inner.trees.lock().clone();
        let mut merged = WordTree::new();
        for tree in trees.values() {
            merged.graft(tree.clone());
        }
        let fruits = merged.harvest();

        let mut report: HarvestReport =
            trees.keys().map(|uri| (uri.clone(), Vec::new())).collect();

        let now = Local::now().naive_local();
        for fruit in &fruits {
            report_fruit(&mut report, fruit, now);
        }

        for (uri, diagnostics) in self.inner.parse_diagnostics.lock().iter() {
            let entries = report.entry(uri.clone()).or_default();
            entries.extend(diagnostics.iter().map(|diagnostic| HarvestedDiagnostic {
                diagnostic: diagnostic.clone(),
                word: None,
                language: None,
            }));
        }

        report
    }

    /// Hover-style lookup against one document's own tree.
    pub fn pick(&self, uri: &str, line: u32, column: u32) -> Option<WordFruit> {
        self.pool.wait_all();
        self.inner.trees.lock().get(uri).and_then(|tree| tree.pick(line, column))
    }

    /// Refuse new submissions and wait for in-flight rebuilds to finish.
    pub fn shutdown(&mut self) {
        self.pool.shutdown();
    }
}

/// Translate one fruit into per-document diagnostics.
fn report_fruit(report: &mut HarvestReport, fruit: &WordFruit, now: NaiveDateTime) {
    // starting diagnostics surface wherever their twig lives
    for twig in &fruit.twigs {
        for diagnostic in &twig.starting_diagnostics {
            report.entry(twig.section.uri.clone()).or_default().push(HarvestedDiagnostic {
                diagnostic: diagnostic.clone(),
                word: Some(fruit.text.clone()),
                language: Some(fruit.language),
            });
        }
    }

    let Some(last_seen) = fruit.last_seen else {
        return;
    };

    let deadline = last_seen
        .checked_add_signed(Duration::days(fruit.interval.ceil() as i64))
        .unwrap_or(last_seen);
    let remaining_days = (deadline.and_time(NaiveTime::MIN) - now).num_seconds() as f64 / 86_400.0;

    let (severity, message) = if remaining_days <= DUE_WITHIN_DAYS {
        let message = if remaining_days < 0.0 {
            format!("{} days past deadline", (-remaining_days).ceil() as i64)
        } else {
            REVIEW_NOW_MESSAGE.to_string()
        };
        (Severity::Error, message)
    } else if remaining_days < SOON_WITHIN_DAYS {
        (Severity::Hint, String::new())
    } else {
        (Severity::Information, String::new())
    };

    // hints and information stay hover-only
    if severity != Severity::Error {
        return;
    }

    for twig in &fruit.twigs {
        let word = &twig.word;
        report.entry(twig.section.uri.clone()).or_default().push(HarvestedDiagnostic {
            diagnostic: Diagnostic::new(severity, message.clone(), word.line, word.start, word.end),
            word: Some(fruit.text.clone()),
            language: Some(fruit.language),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::Lowercase;
    use crate::null_logger;
    use pretty_assertions::assert_eq;

    fn new_forest() -> Forest {
        Forest::new(Arc::new(Lowercase), null_logger())
    }

    fn today_line() -> String {
        Local::now().date_naive().format("%d/%m/%Y").to_string()
    }

    #[test]
    fn harvest_reports_key_for_every_document_even_without_diagnostics() {
        let forest = new_forest();
        forest.plant("xxx", "20/05/2025");

        let report = forest.harvest();
        assert_eq!(report.len(), 1);
        assert!(report["xxx"].is_empty());
    }

    #[test]
    fn parse_errors_surface_under_their_uri() {
        let forest = new_forest();
        forest.plant("xxx", "> (it) la magia, bene,scorprire");

        let report = forest.harvest();
        let entries = &report["xxx"];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].diagnostic.severity, Severity::Error);
        assert_eq!(entries[0].word, None);
    }

    #[test]
    fn overdue_words_report_at_every_occurrence() {
        let forest = new_forest();
        forest.plant("xxx", "16/10/2025 \n> (it) `com'è`, risolvere");

        let report = forest.harvest();
        let entries = &report["xxx"];
        assert_eq!(entries.len(), 2);

        // fruits are ordered by word, so `com'è` comes first
        let first = &entries[0];
        assert_eq!(first.word.as_deref(), Some("com'è"));
        assert!(first.diagnostic.message.ends_with("days past deadline"));
        assert_eq!(first.diagnostic.range.start.character, 7);
        assert_eq!(first.diagnostic.range.end.character, 14);
        assert_eq!(first.diagnostic.range.start.line, 1);

        let second = &entries[1];
        assert_eq!(second.word.as_deref(), Some("risolvere"));
        assert_eq!(second.diagnostic.range.start.character, 16);
        assert_eq!(second.diagnostic.range.end.character, 25);
    }

    #[test]
    fn word_reviewed_today_asks_for_review_now() {
        let forest = new_forest();
        forest.plant("uri", "20/05/2025\n> (it) it_word1(0)");
        forest.plant("uri", format!("{}\n>> (it) it_word1(0)", today_line()));

        let report = forest.harvest();
        let entries = &report["uri"];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].diagnostic.message, REVIEW_NOW_MESSAGE);
        assert_eq!(entries[0].diagnostic.severity, Severity::Error);
        assert_eq!(entries[0].diagnostic.range.start.line, 1);
        assert_eq!(entries[0].diagnostic.range.start.character, 8);
        assert_eq!(entries[0].diagnostic.range.end.character, 16);
    }

    #[test]
    fn clamped_grade_warning_survives_to_harvest() {
        let forest = new_forest();
        forest.plant("xxx", format!("{}\n> (it) cosa(10)", today_line()));

        let report = forest.harvest();
        let warnings: Vec<_> = report["xxx"]
            .iter()
            .filter(|entry| entry.diagnostic.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].diagnostic.message, crate::tree::GRADE_RANGE_MESSAGE);
        assert_eq!(warnings[0].word.as_deref(), Some("cosa"));
    }

    #[test]
    fn replanting_clears_stale_diagnostics() {
        let forest = new_forest();
        forest.plant("doc-1", "> (it) la magia, bene,scorprire");
        let report = forest.harvest();
        assert!(!report["doc-1"].is_empty());

        // a clean wordless document leaves nothing behind
        forest.plant("doc-1", "20/05/2025");
        let report = forest.harvest();
        assert_eq!(report["doc-1"].len(), 0);

        // and the errors come back when the bad text does
        forest.plant("doc-1", "> (it) la magia, bene,scorprire");
        let report = forest.harvest();
        assert!(!report["doc-1"].is_empty());
    }

    #[test]
    fn removing_a_document_clears_its_key() {
        let forest = new_forest();
        forest.plant("doc-1", "20/05/2025");
        forest.plant("doc-2", "20/05/2025");
        assert_eq!(forest.harvest().len(), 2);

        forest.remove("doc-1");
        let report = forest.harvest();
        assert_eq!(report.len(), 1);
        assert!(report.contains_key("doc-2"));
    }

    #[test]
    fn cross_file_histories_merge_on_harvest() {
        let forest = new_forest();
        forest.plant("doc-1", "01/01/2025\n> (it) parola(5)");
        forest.plant("doc-2", "02/01/2025\n>> (it) parola(5)");

        let report = forest.harvest();
        // both occurrences are long overdue; the diagnostic lands in each file
        assert_eq!(report["doc-1"].len(), 1);
        assert_eq!(report["doc-2"].len(), 1);
        assert_eq!(report["doc-1"][0].word.as_deref(), Some("parola"));
        assert_eq!(report["doc-2"][0].word.as_deref(), Some("parola"));
    }

    #[test]
    fn bursts_on_one_uri_apply_in_submission_order() {
        let forest = new_forest();
        for i in 0..32 {
            forest.plant("doc", format!("20/05/2025\n> (it) word{i}"));
        }
        forest.plant("doc", "20/05/2025\n> (it) finale");

        let report = forest.harvest();
        let entries = &report["doc"];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word.as_deref(), Some("finale"));
    }

    #[test]
    fn pick_resolves_through_the_forest() {
        let forest = new_forest();
        forest.plant("doc", "20/05/2025\n> (it) la magia, bene");

        let fruit = forest.pick("doc", 1, 9).expect("inside la magia");
        assert_eq!(fruit.text, "la magia");
        assert!(forest.pick("doc", 0, 0).is_none());
        assert!(forest.pick("missing", 1, 9).is_none());
    }

    #[test]
    fn shutdown_refuses_new_work() {
        let mut forest = new_forest();
        forest.plant("doc", "20/05/2025");
        forest.shutdown();
        forest.plant("doc-2", "20/05/2025");

        let report = forest.harvest();
        assert!(report.contains_key("doc"));
        assert!(!report.contains_key("doc-2"));
    }
}
