//! Inter-run space synthesis.
//!
//! Source markup splits text into runs at every character-style boundary,
//! and the whitespace between words may live in either run or in neither.
//! [`needs_space_between`] guesses whether a space must be inserted between
//! two adjacent runs. It is a pattern heuristic, not a dictionary lookup: it
//! has no memory across pairs and will misjudge some splits.
//!
//! # Rules (first match wins)
//!
//! No space when:
//! 1. either text is empty, or the next run is a break;
//! 2. whitespace already sits at the boundary;
//! 3. the current run ends with `. , ; : ! ? )` or the next starts with
//!    `. , ; : ! ? (`;
//! 4. both runs carry the same explicit style token (a pure rendering split);
//! 5. the joined text looks like one split word: all capitals
//!    (`PORTFO|LIO`), letters then digits (`A|4`), digits then letters
//!    (`2|nd`), or letters joined by a hyphen or apostrophe (`don|'t`);
//! 6. both runs share paragraph style, size, and family and the joined text
//!    is alphabetic or at most [`FRAGMENT_MAX_CHARS`] characters.
//!
//! Otherwise a space is needed.

use pagefit_style::RunFormatting;

/// Longest joined text still treated as a word fragment under rule 6.
pub const FRAGMENT_MAX_CHARS: usize = 12;

const CLOSING_PUNCTUATION: [char; 7] = ['.', ',', ';', ':', '!', '?', ')'];
const OPENING_PUNCTUATION: [char; 7] = ['.', ',', ';', ':', '!', '?', '('];
const WORD_JOINERS: [char; 3] = ['-', '\'', '\u{2019}'];

/// `s` is a non-empty run of `head` chars followed by a non-empty run of
/// `tail` chars.
fn head_then_tail(s: &str, head: impl Fn(char) -> bool, tail: impl Fn(char) -> bool) -> bool {
    let Some(split) = s.find(|c: char| !head(c)) else {
        return false;
    };
    split > 0 && s[split..].chars().all(tail)
}

fn is_all_capitals(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}

fn is_joined_word(s: &str) -> bool {
    let Some(pos) = s.find(|c: char| WORD_JOINERS.contains(&c)) else {
        return false;
    };
    let joiner_len = s[pos..].chars().next().map_or(1, char::len_utf8);
    let (left, right) = (&s[..pos], &s[pos + joiner_len..]);
    !left.is_empty()
        && !right.is_empty()
        && left.chars().all(char::is_alphabetic)
        && right.chars().all(char::is_alphabetic)
}

/// Whether `joined` reads as a single word that was split across runs.
#[must_use]
pub fn is_split_word(joined: &str) -> bool {
    is_all_capitals(joined)
        || head_then_tail(joined, char::is_alphabetic, |c| c.is_ascii_digit())
        || head_then_tail(joined, |c| c.is_ascii_digit(), char::is_alphabetic)
        || is_joined_word(joined)
}

fn same_explicit<T: PartialEq>(a: Option<&T>, b: Option<&T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn shares_paragraph_font(a: &RunFormatting, b: &RunFormatting) -> bool {
    same_explicit(a.paragraph_style.as_ref(), b.paragraph_style.as_ref())
        && same_explicit(a.font_size.as_ref(), b.font_size.as_ref())
        && same_explicit(a.font_family.as_ref(), b.font_family.as_ref())
}

/// Decide whether a space must be synthesized between two adjacent runs.
#[must_use]
pub fn needs_space_between(
    current: &str,
    current_formatting: &RunFormatting,
    next: &str,
    next_formatting: &RunFormatting,
) -> bool {
    if next_formatting.is_break {
        return false;
    }
    let (Some(last), Some(first)) = (current.chars().next_back(), next.chars().next()) else {
        return false;
    };
    if last.is_whitespace() || first.is_whitespace() {
        return false;
    }
    if CLOSING_PUNCTUATION.contains(&last) || OPENING_PUNCTUATION.contains(&first) {
        return false;
    }
    if same_explicit(
        current_formatting.font_style.as_ref(),
        next_formatting.font_style.as_ref(),
    ) {
        return false;
    }

    let joined = format!("{}{}", current.trim(), next.trim());
    if is_split_word(&joined) {
        return false;
    }
    if shares_paragraph_font(current_formatting, next_formatting)
        && (joined.chars().all(char::is_alphabetic)
            || joined.chars().count() <= FRAGMENT_MAX_CHARS)
    {
        return false;
    }
    true
}
