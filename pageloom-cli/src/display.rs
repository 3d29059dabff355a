//! Terminal styling helpers.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Parse a `#rrggbb` (or `rrggbb`) color.
pub(crate) fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Style a section heading in the brand color, or bold without one.
pub(crate) fn heading(text: &str, brand: Option<(u8, u8, u8)>) -> String {
    match brand {
        Some((r, g, b)) => text
            .if_supports_color(Stdout, |t| t.truecolor(r, g, b))
            .to_string(),
        None => text.if_supports_color(Stdout, |t| t.bold()).to_string(),
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
