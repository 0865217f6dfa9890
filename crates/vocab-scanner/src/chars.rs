//! Character classification for the `.vocab` syntax.

/// Single-line whitespace. Line separators are deliberately not in this set.
pub fn is_whitespace_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' '             // space
        | '\t'          // tab
        | '\u{000B}'    // vertical tab
        | '\u{000C}'    // form feed
        | '\u{0085}'    // next line
        | '\u{00A0}'    // non-breaking space
        | '\u{1680}'    // ogham
        | '\u{2000}'..='\u{200B}' // en quad .. zero-width space
        | '\u{202F}'    // narrow no-break space
        | '\u{205F}'    // mathematical space
        | '\u{3000}'    // ideographic space
        | '\u{FEFF}' // byte order mark
    )
}

pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n'            // line feed
        | '\r'          // carriage return
        | '\u{2028}'    // line separator
        | '\u{2029}' // paragraph separator
    )
}

/// German and Italian letters outside ASCII.
pub fn is_german_or_italian_letter(ch: char) -> bool {
    matches!(
        ch,
        // German
        'Ä' | 'ä' | 'Ö' | 'ö' | 'Ü' | 'ü' | 'ß' |
        // Italian
        'À' | 'à' | 'È' | 'è' | 'É' | 'é' | 'Ì' | 'ì' | 'Ò' | 'ò' | 'Ù' | 'ù'
    )
}

/// A letter that may appear in a word: ASCII or one of the recognized
/// diacritics.
pub fn is_recognized_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || is_german_or_italian_letter(ch)
}
