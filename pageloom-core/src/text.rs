//! Plain-text cleanup applied to titles and other free-text fields.

/// Strip HTML tags from a string (simple angle-bracket stripping).
///
/// Everything from a `<` up to the matching `>` is removed; an unclosed `<`
/// swallows the rest of the input.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Clean a single-line text field: strip tags, collapse whitespace runs
/// (including newlines and tabs) to one space, and trim.
pub fn sanitize_text(input: &str) -> String {
    let stripped = strip_tags(input);
    let mut out = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
