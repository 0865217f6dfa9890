//! AST, parser, and diagnostic value types for `.vocab` documents.
//!
//! The pipeline into this crate is strictly upward: scanner tokens come in,
//! a [`VocabAst`] with embedded [`Diagnostic`]s comes out. The parser never
//! fails and never suspends; all recovery is per line.

pub mod ast;
pub mod diagnostics;
mod parser;

pub use ast::{
    DateSection, Language, UtteranceSection, VocabAst, VocabularySection, Word, WordsSection,
};
pub use diagnostics::{Diagnostic, Position, Range, Severity};
pub use parser::{parse_document, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    /// Strip the indentation the raw-string literals carry and drop blank
    /// lines, so fixtures read like real documents.
    fn trim_lines(text: &str) -> String {
        text.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>().join("\n")
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn only_date_section() {
        let ast = parse_document("xxx", "20/08/2025");

        assert_eq!(ast.sections.len(), 1);
        let section = &ast.sections[0];
        assert_eq!(section.diagnostics, vec![]);
        assert!(!section.has_words_section());

        let parsed = section.date.as_ref().unwrap();
        assert_eq!(parsed.time, Some(date(2025, 8, 20)));
        assert_eq!((parsed.start, parsed.end, parsed.line), (0, 10, 0));
    }

    #[test]
    fn padded_date_section() {
        let ast = parse_document("xxx", " 20/08/2025 ");
        let parsed = ast.sections[0].date.as_ref().unwrap();
        assert_eq!(parsed.time, Some(date(2025, 8, 20)));
        assert_eq!((parsed.start, parsed.end), (1, 11));
    }

    #[test]
    fn malformed_date_keeps_section_and_reports() {
        let ast = parse_document("xxx", "00/00/0000");

        assert_eq!(ast.sections.len(), 1);
        let section = &ast.sections[0];
        let parsed = section.date.as_ref().unwrap();
        assert_eq!(parsed.time, None);
        assert_eq!(parsed.text, "00/00/0000");

        assert_eq!(
            section.diagnostics,
            vec![Diagnostic::error(diagnostics::MALFORMED_DATE, 0, 0, 10)]
        );
    }

    #[test]
    fn incomplete_date_is_text_and_expects_date_section() {
        let ast = parse_document("xxx", "23/00");

        let section = &ast.sections[0];
        assert_eq!(section.date, None);
        assert_eq!(
            section.diagnostics,
            vec![Diagnostic::error(diagnostics::EXPECT_DATE_SECTION, 0, 0, 5)]
        );
    }

    #[test]
    fn prose_after_date_without_words_expects_vocab_section() {
        let ast = parse_document("xxx", "08/09/2025 foo");

        let diagnostics: Vec<_> = ast.diagnostics().cloned().collect();
        assert_eq!(
            diagnostics,
            vec![Diagnostic::error(diagnostics::EXPECT_VOCAB_SECTION, 0, 11, 14)]
        );
    }

    #[test]
    fn single_word_section() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) la magia, bene,scorprire
            >> (de) was
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 1);
        let section = &ast.sections[0];
        assert_eq!(section.diagnostics, vec![]);

        let parsed = section.date.as_ref().unwrap();
        assert_eq!(parsed.time, Some(date(2025, 8, 20)));
        assert_eq!((parsed.line, parsed.start, parsed.end), (0, 0, 10));

        assert_eq!(section.new_words.len(), 1);
        let new_words = &section.new_words[0];
        assert_eq!(new_words.language, Language::Italian);
        assert!(!new_words.reviewed);
        assert_eq!(new_words.line, 1);

        let words = &new_words.words;
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text, "la magia");
        assert_eq!((words[0].line, words[0].start, words[0].end), (1, 7, 15));
        assert!(!words[0].literally);
        assert_eq!(words[1].text, "bene");
        assert_eq!(words[2].text, "scorprire");

        assert_eq!(section.reviewed_words.len(), 1);
        let reviewed = &section.reviewed_words[0];
        assert_eq!(reviewed.language, Language::German);
        assert!(reviewed.reviewed);
        assert_eq!(reviewed.line, 2);
        assert_eq!(reviewed.words[0].text, "was");
    }

    #[test]
    fn words_without_date_synthesize_empty_section() {
        let ast = parse_document("xxx", "> (it) la magia, bene,scorprire");

        assert_eq!(ast.sections.len(), 1);
        let section = &ast.sections[0];
        assert_eq!(section.date, None);
        assert!(!section.has_words_section());
        assert_eq!(
            section.diagnostics,
            vec![Diagnostic::error(diagnostics::EXPECT_DATE_SECTION, 0, 0, 1)]
        );
    }

    #[test]
    fn backtick_literal_word() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) `la magia`, bene
            ",
        );
        let ast = parse_document("xxx", &text);

        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words[0].text, "la magia");
        assert!(words[0].literally);
        // span covers the backticks
        assert_eq!((words[0].start, words[0].end), (7, 17));
        assert_eq!(words[1].text, "bene");
        assert!(!words[1].literally);
    }

    #[test]
    fn unterminated_backtick_auto_closes_at_line_break() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) `la magia, bene
            21/08/2025
            > (de) `der Inhalt
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 2);

        let words1 = &ast.sections[0].new_words[0];
        assert_eq!(words1.language, Language::Italian);
        assert_eq!(words1.words.len(), 1);
        assert_eq!(words1.words[0].text, "la magia, bene");
        assert!(words1.words[0].literally);

        let words2 = &ast.sections[1].new_words[0];
        assert_eq!(words2.language, Language::German);
        assert_eq!(words2.line, 3);
        assert_eq!(words2.words.len(), 1);
        assert_eq!(words2.words[0].text, "der Inhalt");
        assert!(words2.words[0].literally);
    }

    #[test]
    fn grading() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) `la magia`(1), chiacchierare, caminare(0), cosa(10)
            ",
        );
        let ast = parse_document("xxx", &text);

        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words.len(), 4);
        assert_eq!(words[0].grade, 1);
        assert_eq!(words[1].grade, 0); // default, no score
        assert_eq!(words[2].grade, 0);
        assert_eq!(words[3].grade, 10); // raw; clamping happens in the index
    }

    #[test]
    fn grade_on_literal_at_end_of_input() {
        let ast = parse_document("xxx", "20/08/2025\n> (it) `com'è`(2)");
        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "com'è");
        assert_eq!(words[0].grade, 2);
    }

    #[test]
    fn invalid_grade_abandons_rest_of_line() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) `la magia`(xxx), these, should, not, count
            21/08/2025
            > (it) chiacchierare(4j2)
            22/08/2025
            > (it) chiacchierare()
            ",
        );
        let ast = parse_document("xxx", &text);

        let words1 = &ast.sections[0].new_words[0].words;
        assert_eq!(words1.len(), 1);
        assert_eq!(
            ast.sections[0].diagnostics,
            vec![Diagnostic::error(diagnostics::INVALID_SCORE, 1, 17, 22)]
        );

        let words2 = &ast.sections[1].new_words[0].words;
        assert_eq!(words2.len(), 0);
        assert_eq!(
            ast.sections[1].diagnostics,
            vec![Diagnostic::error(diagnostics::INVALID_SCORE, 3, 20, 25)]
        );

        let words3 = &ast.sections[2].new_words[0].words;
        assert_eq!(words3.len(), 0);
        assert_eq!(
            ast.sections[2].diagnostics,
            vec![Diagnostic::error(diagnostics::INVALID_SCORE, 5, 20, 22)]
        );
    }

    #[test]
    fn unrecognized_language_marks_section() {
        let text = trim_lines(
            "
            20/08/2025
            > (fr) le chat
            ",
        );
        let ast = parse_document("xxx", &text);

        let section = &ast.sections[0];
        assert_eq!(section.new_words.len(), 1);
        assert_eq!(section.new_words[0].language, Language::Unrecognized);
        assert_eq!(section.new_words[0].words, vec![]);
        assert_eq!(
            section.diagnostics,
            vec![Diagnostic::error(diagnostics::UNRECOGNIZED_LANGUAGE, 1, 2, 6)]
        );
    }

    #[test]
    fn words_with_digits_and_underscores() {
        let text = trim_lines(
            "
            20/05/2025
            > (it) it_word1, it_word2
            lorem ipsum...
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 1);
        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "it_word1");
        assert_eq!(words[1].text, "it_word2");
    }

    #[test]
    fn comments_are_ignored() {
        let text = trim_lines(
            "
            20/05/2025
            | hola
            > (it) it_word1, it_word2
            | amigo!
            lorem ipsum...
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 1);
        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "it_word1");
        assert_eq!(words[1].text, "it_word2");
        assert_eq!(ast.sections[0].diagnostics, vec![]);
    }

    #[test]
    fn duplicate_word_is_dropped_with_warning() {
        let text = trim_lines(
            "
            20/05/2025
            > (it) la magia, maga, la magia
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 1);
        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "la magia");
        assert_eq!(words[1].text, "maga");

        assert_eq!(
            ast.sections[0].diagnostics,
            vec![Diagnostic::warning(diagnostics::DUPLICATE_TOKEN, 1, 23, 31)]
        );
    }

    #[test]
    fn utterance_lines() {
        let text = trim_lines(
            "
            01/08/1997
            > (de) ablenken, ansprechen
            Das lenkt mich wirklich ab!
            Sag einfach Bescheid, was dir gerade am meisten anspricht!
            ",
        );
        let ast = parse_document("xxx", &text);

        let utterances = &ast.sections[0].utterances;
        assert_eq!(utterances.len(), 2);

        assert_eq!(utterances[0].text, "Das lenkt mich wirklich ab!");
        assert_eq!(utterances[0].line, 2);
        assert_eq!(utterances[0].start, 0);
        assert_eq!(utterances[0].end, "Das lenkt mich wirklich ab!".chars().count() as u32);

        assert_eq!(utterances[1].text, "Sag einfach Bescheid, was dir gerade am meisten anspricht!");
        assert_eq!(utterances[1].line, 3);
    }

    #[test]
    fn full_document_with_two_sections() {
        let text = trim_lines(
            "
            02/10/2025
            >> (it) la notizia, chiacchierare
            > (de) aufschlüsseln
            Guardando le notizie italiane. Che tipo di accento è questo?
            Kannst du mir diesen Satz aufschlüsseln?
            03/10/2025
            > (de) ansprechen, schnappen, ausfragen
            >> (de) anlegen,
            Sag einfach was dir so im Kopf rumgehen, und wir plaudern ein bisschen.
            ",
        );
        let ast = parse_document("xxx", &text);

        assert_eq!(ast.sections.len(), 2);

        let section1 = &ast.sections[0];
        assert_eq!(section1.date.as_ref().unwrap().time, Some(date(2025, 10, 2)));
        assert_eq!(section1.reviewed_words.len(), 1);
        let reviewed = &section1.reviewed_words[0];
        assert_eq!(reviewed.language, Language::Italian);
        assert_eq!(reviewed.line, 1);
        assert_eq!(reviewed.words.len(), 2);
        assert_eq!(reviewed.words[0].text, "la notizia");
        assert_eq!(reviewed.words[1].text, "chiacchierare");

        assert_eq!(section1.new_words.len(), 1);
        assert_eq!(section1.new_words[0].language, Language::German);
        assert_eq!(section1.new_words[0].words[0].text, "aufschlüsseln");
        assert_eq!(section1.utterances.len(), 2);

        let section2 = &ast.sections[1];
        assert_eq!(section2.date.as_ref().unwrap().time, Some(date(2025, 10, 3)));
        assert_eq!(section2.date.as_ref().unwrap().line, 5);
        let words = &section2.new_words[0];
        assert_eq!(words.words.len(), 3);
        assert_eq!(words.words[0].text, "ansprechen");
        assert_eq!(words.words[1].text, "schnappen");
        assert_eq!(words.words[2].text, "ausfragen");
        // trailing comma is accepted
        let reviewed2 = &section2.reviewed_words[0];
        assert_eq!(reviewed2.words.len(), 1);
        assert_eq!(reviewed2.words[0].text, "anlegen");
        assert_eq!(section2.utterances.len(), 1);
    }

    #[test]
    fn word_spans_stay_within_line_bounds() {
        let text = trim_lines(
            "
            20/08/2025
            > (it) la magia , bene
            >> (de) `der Satz`(3)
            prose line here
            ",
        );
        let lines: Vec<&str> = text.lines().collect();
        let ast = parse_document("xxx", &text);

        for section in &ast.sections {
            for words in section.words_sections() {
                for word in &words.words {
                    let line_len = lines[word.line as usize].chars().count() as u32;
                    assert!(word.start < word.end, "empty span for {:?}", word.text);
                    assert!(word.end <= line_len, "span past line end for {:?}", word.text);
                }
            }
            for utterance in &section.utterances {
                let line_len = lines[utterance.line as usize].chars().count() as u32;
                assert!(utterance.start < utterance.end);
                assert!(utterance.end <= line_len);
            }
        }

        // trailing whitespace is trimmed out of the span
        let words = &ast.sections[0].new_words[0].words;
        assert_eq!(words[0].text, "la magia");
        assert_eq!((words[0].start, words[0].end), (7, 15));
    }
}
