//! Transcript formatting.
//!
//! Turns raw answer text into display paragraphs for the transcript
//! view, and into width-bounded lines for the document exporter.

use std::borrow::Cow;

/// Approximate character columns per layout unit (millimeter) at the
/// export body size; a 180 mm column wraps at 90 characters.
const UNITS_PER_COLUMN: u32 = 2;

/// Split answer text into display paragraphs.
///
/// A period ends a paragraph only when it is followed by whitespace or
/// end of input and is not preceded by a bare single word-character, so
/// initialisms and abbreviations like "e.g." stay intact. Fragments
/// that trim to empty are discarded; each retained fragment gets its
/// period back. Best-effort boundary, not a sentence splitter.
pub fn split_paragraphs(text: &str) -> Paragraphs<'_> {
    Paragraphs { rest: text, done: false }
}

/// Lazy iterator over display paragraphs. Finite; restartable by
/// calling [`split_paragraphs`] again (or cloning).
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    rest: &'a str,
    done: bool,
}

impl Iterator for Paragraphs<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while !self.done {
            let (fragment, rest) = match next_boundary(self.rest) {
                Some(idx) => (&self.rest[..idx], &self.rest[idx + 1..]),
                None => {
                    self.done = true;
                    (self.rest, "")
                }
            };
            self.rest = rest;

            let trimmed = fragment.trim();
            if !trimmed.is_empty() {
                return Some(format!("{trimmed}."));
            }
        }
        None
    }
}

/// Byte index of the next paragraph-ending period, if any.
fn next_boundary(s: &str) -> Option<usize> {
    let mut prev2: Option<char> = None;
    let mut prev1: Option<char> = None;
    let mut chars = s.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch == '.' {
            let followed_ok = match chars.peek() {
                Some((_, next)) => next.is_whitespace(),
                None => true,
            };
            // A single word-character token right before the period
            // marks an abbreviation boundary; don't split there.
            let after_abbreviation = prev1.is_some_and(is_word_char)
                && !prev2.is_some_and(is_word_char);
            if followed_ok && !after_abbreviation {
                return Some(idx);
            }
        }
        prev2 = prev1;
        prev1 = Some(ch);
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Wrap text to a width budget for the document exporter.
///
/// The budget is expressed in layout units (millimeters of the exported
/// page) and converted to character columns.
pub fn wrap_for_export(text: &str, max_width_units: u32) -> Vec<String> {
    let columns = (max_width_units / UNITS_PER_COLUMN).max(1) as usize;
    textwrap::wrap(text, columns)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}
