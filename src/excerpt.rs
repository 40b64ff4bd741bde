use crate::text::{FoldedText, collapse_whitespace};

/// Finds the first accent- and case-insensitive occurrence of `keyword` in
/// `text` and returns up to `context_chars` characters on each side of it,
/// with whitespace collapsed.
pub fn find_keyword_excerpt(text: &str, keyword: &str, context_chars: usize) -> Option<String> {
    let haystack = FoldedText::normalized(text);
    let needle = FoldedText::normalized(keyword);
    let hit = haystack.find(needle.as_str())?;

    let start = text[..hit.start]
        .char_indices()
        .rev()
        .take(context_chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(hit.start);
    let end = text[hit.end..]
        .char_indices()
        .nth(context_chars)
        .map(|(i, _)| hit.end + i)
        .unwrap_or(text.len());

    let excerpt = collapse_whitespace(&text[start..end]);
    if excerpt.is_empty() { None } else { Some(excerpt) }
}
