use std::ops::Range;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A case (and optionally accent) folded copy of a string that remembers,
/// for every folded byte, which character of the source produced it.
///
/// Folding can change byte lengths ("İ" lower-cases to two chars), so
/// offsets found in the folded text must never be used to slice the source
/// directly. `find` maps them back to char boundaries of the source.
pub struct FoldedText {
    folded: String,
    origin: Vec<Range<usize>>,
}

impl FoldedText {
    /// Lower-case folding only.
    pub fn lowercase(source: &str) -> Self {
        Self::build(source, |c, out| out.extend(lower(c)))
    }

    /// Lower-case, NFKD, combining marks dropped. "Café" folds to "cafe".
    pub fn normalized(source: &str) -> Self {
        Self::build(source, |c, out| {
            out.extend(lower(c).nfkd().filter(|d| !is_combining_mark(*d)));
        })
    }

    fn build(source: &str, fold: impl Fn(char, &mut String)) -> Self {
        let mut folded = String::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        let mut scratch = String::new();

        for (start, c) in source.char_indices() {
            scratch.clear();
            fold(c, &mut scratch);
            folded.push_str(&scratch);
            let span = start..start + c.len_utf8();
            origin.extend(std::iter::repeat(span).take(scratch.len()));
        }

        FoldedText { folded, origin }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Byte range in the source covering the first occurrence of an already
    /// folded needle. Empty needles never match.
    pub fn find(&self, folded_needle: &str) -> Option<Range<usize>> {
        if folded_needle.is_empty() {
            return None;
        }
        let at = self.folded.find(folded_needle)?;
        let last = at + folded_needle.len() - 1;
        Some(self.origin[at].start..self.origin[last].end)
    }
}

// Word-final sigma folds like any other sigma, independent of position.
fn lower(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|l| if l == 'ς' { 'σ' } else { l })
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_find_maps_to_source_case() {
        let source = "The quick Fox jumps";
        let folded = FoldedText::lowercase(source);
        let range = folded.find("fox").unwrap();
        assert_eq!(&source[range], "Fox");
    }

    #[test]
    fn normalized_ignores_accents() {
        let source = "Le Café est ouvert";
        let folded = FoldedText::normalized(source);
        let needle = FoldedText::normalized("CAFE");
        let range = folded.find(needle.as_str()).unwrap();
        assert_eq!(&source[range], "Café");
    }

    #[test]
    fn length_changing_fold_stays_on_char_boundaries() {
        let source = "xİstanbul";
        let folded = FoldedText::lowercase(source);
        let range = folded.find("stanbul").unwrap();
        assert_eq!(&source[range], "stanbul");
        // The dotted capital expands when folded; a match inside it covers the whole char.
        let range = folded.find("i").unwrap();
        assert_eq!(&source[range], "İ");
    }

    #[test]
    fn final_sigma_folds_to_plain_sigma() {
        let source = "ΟΔΟΣ και οδος";
        let folded = FoldedText::lowercase(source);
        assert_eq!(folded.as_str(), "οδοσ και οδοσ");
        let needle = FoldedText::lowercase("οδος");
        assert_eq!(&source[folded.find(needle.as_str()).unwrap()], "ΟΔΟΣ");
    }

    #[test]
    fn empty_or_missing_needle_is_none() {
        let folded = FoldedText::lowercase("abc");
        assert!(folded.find("").is_none());
        assert!(folded.find("zzz").is_none());
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
    }
}
