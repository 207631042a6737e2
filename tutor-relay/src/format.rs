//! Reply formatting for chat bubbles.
//!
//! Gemini answers in Markdown. LINE renders plain text, so emphasis markers
//! are dropped, bullets become indented `・` items and paragraphs are spaced
//! with one blank line.

use std::sync::LazyLock;

use regex::Regex;

/// Bold marker removed from model output.
const BOLD_MARKER: &str = "**";

/// Glyph used in place of Markdown bullets.
pub const BULLET_GLYPH: char = '・';

/// Indentation placed before every bullet line.
pub const BULLET_INDENT: &str = "    ";

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid newline regex"));

/// Normalize a model reply into the layout sent back to the chat.
///
/// Pure and total. Not idempotent: a formatted bullet line loses its
/// indentation on a second pass because `・` is not a bullet marker.
pub fn format_reply(text: &str) -> String {
    let text = text.replace(BOLD_MARKER, "");

    let lines: Vec<String> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(format_line)
        .collect();

    let joined = lines.join("\n\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&joined, "\n\n");

    collapsed.trim().to_string()
}

/// Rewrite a single trimmed, non-empty line.
fn format_line(line: &str) -> String {
    if is_bullet(line) {
        let item = line.trim_start_matches(['*', '-', ' ']).trim();
        format!("{}{}{}", BULLET_INDENT, BULLET_GLYPH, item)
    } else {
        line.to_string()
    }
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('*') || line.starts_with('-')
}
