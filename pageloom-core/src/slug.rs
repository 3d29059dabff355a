//! Title → URL slug conversion.
//!
//! Slugs are built from lowercase ASCII letters, digits and single hyphens:
//!
//! - `"About Us"` → `"about-us"`
//! - `"  Q&A -- 2024!  "` → `"qa-2024"`
//! - `"Café"` → `"caf"` (non-ASCII characters are dropped, not transliterated)

/// Default upper bound on slug length, in characters.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 72;

/// Convert a title to a URL-safe slug of at most `max_length` characters.
///
/// Lowercases, turns spaces into hyphens, drops everything outside
/// `[a-z0-9-]`, collapses hyphen runs and trims hyphens from both ends. If the
/// result is longer than `max_length` it is cut and any hyphen left dangling
/// by the cut is trimmed. Never fails; an empty result is possible.
pub fn slugify(title: &str, max_length: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        match c {
            ' ' | '-' => {
                // Leading hyphens are never emitted
                if !last_was_hyphen && !slug.is_empty() {
                    slug.push('-');
                    last_was_hyphen = true;
                }
            }
            'a'..='z' | '0'..='9' => {
                slug.push(c);
                last_was_hyphen = false;
            }
            // Stripped characters don't break a hyphen run: "a-!-b" → "a-b"
            _ => {}
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > max_length {
        // Only ASCII remains, so byte length is character length
        slug.truncate(max_length);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// [`slugify`] with [`DEFAULT_SLUG_MAX_LENGTH`].
pub fn slugify_default(title: &str) -> String {
    slugify(title, DEFAULT_SLUG_MAX_LENGTH)
}

/// Check that `slug` is non-empty and already in canonical slug form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[path = "tests/slug_tests.rs"]
mod tests;
