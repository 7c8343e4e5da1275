const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Backslash-escapes regex metacharacters so the text matches literally.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if REGEX_METACHARACTERS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Derives the single text filter sent to the log service.
///
/// A non-empty identifier query always wins and is always matched
/// literally, even in regex mode.
pub fn build_pattern(trid_query: &str, search_query: &str, use_regex: bool) -> Option<String> {
    if !trid_query.is_empty() {
        return Some(escape_literal(trid_query));
    }
    if search_query.is_empty() {
        return None;
    }
    if use_regex {
        return Some(search_query.to_string());
    }
    Some(escape_literal(search_query))
}
