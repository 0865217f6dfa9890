//! Normalization strategy for index keys.
//!
//! The tree never normalizes words itself; it asks the injected
//! [`Lemmatizer`]. The default is plain lowercasing. [`ArticleStripping`]
//! additionally removes a leading article for the word's language, so
//! `la magia` and `magia` land on the same key.

use vocab_parser::{Language, Word};

/// Maps a word occurrence to its index key.
pub trait Lemmatizer: Send + Sync {
    fn normalize(&self, language: Language, word: &Word) -> String;
}

/// `lowercase(text)`, the format's baseline normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Lemmatizer for Lowercase {
    fn normalize(&self, _language: Language, word: &Word) -> String {
        word.normalized_text()
    }
}

const GERMAN_ARTICLES: &[&str] = &[
    "der ", "den ", "dem ", "des ", "die ", "das ", "ein ", "einem ", "eines ", "eine ", "einer ",
];

const ITALIAN_ARTICLES: &[&str] =
    &["il ", "la ", "l'", "lo ", "i ", "gli ", "le ", "una ", "uno ", "un'"];

/// Lowercase, then strip one leading article for the word's language.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleStripping;

impl Lemmatizer for ArticleStripping {
    fn normalize(&self, language: Language, word: &Word) -> String {
        let lowered = word.normalized_text();
        match language {
            Language::German => strip(GERMAN_ARTICLES, &lowered, ' ').unwrap_or(lowered),
            Language::Italian => strip(ITALIAN_ARTICLES, &lowered, ' ')
                .or_else(|| strip(ITALIAN_ARTICLES, &lowered, '\''))
                .unwrap_or(lowered),
            Language::Unrecognized => lowered,
        }
    }
}

fn strip(articles: &[&str], word: &str, separator: char) -> Option<String> {
    let (head, rest) = word.split_once(separator)?;
    let candidate = format!("{head}{separator}");
    articles.contains(&candidate.as_str()).then(|| rest.to_string())
}
