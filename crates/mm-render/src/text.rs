//! Label layout: greedy word wrap and contrast-aware text color.

use mm_core::Color;

/// Break `text` into lines no wider than `max_width`.
///
/// Words are added to the current line until the next one would overflow,
/// then a new line starts. A single word wider than `max_width` gets a
/// line of its own rather than being split. Runs of whitespace collapse.
/// Only `"{line} {word}"` is measured; no trailing space is counted.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Pick `dark` or `light` text for a fill color: dark above luminance 0.5.
/// Unparseable colors get `light`.
pub fn contrast_color<'a>(fill: &str, dark: &'a str, light: &'a str) -> &'a str {
    match Color::from_hex(fill) {
        Some(c) if c.luminance() > 0.5 => dark,
        _ => light,
    }
}
