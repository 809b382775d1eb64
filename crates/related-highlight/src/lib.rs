//! Terminal styling for `related` output.
//!
//! Provides ANSI-styled headers and status messages, colored score labels and bars for
//! ranking output, and syntax highlighting of TOML configuration.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Scores at or above this are shown as strong matches.
pub const STRONG_SCORE: f32 = 0.5;

/// Scores at or above this are shown as moderate matches.
pub const MODERATE_SCORE: f32 = 0.2;

/// Highlights TOML for terminal output.
pub struct TomlHighlighter {
    /// Syntax definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
}

impl Default for TomlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlHighlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights `content` as TOML. Falls back to plain text if TOML is unavailable.
    pub fn highlight(&self, content: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI escape codes.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text, for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text, for strong matches and success.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text, for moderate matches and warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text, for errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim text, for secondary information.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape codes and a reset.
fn paint(codes: &[&str], text: &str) -> String {
    format!("{}{text}{}", codes.concat(), colors::RESET)
}

/// Bold cyan header.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Bold subheader.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Dimmed text.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Green success message.
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Yellow warning.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Red error.
pub fn error(text: &str) -> String {
    paint(&[colors::RED], text)
}

/// Dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Color code for a score in `[0, 1]`.
fn score_color(value: f32) -> &'static str {
    if value >= STRONG_SCORE {
        colors::GREEN
    } else if value >= MODERATE_SCORE {
        colors::YELLOW
    } else {
        colors::DIM
    }
}

/// A score formatted to three decimals, colored by strength.
pub fn score(value: f32) -> String {
    paint(&[score_color(value)], &format!("{value:.3}"))
}

/// A horizontal bar `width` cells wide, filled in proportion to `value` in `[0, 1]`.
pub fn score_bar(value: f32, width: usize) -> String {
    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((value * width as f32).round() as usize).min(width);
    format!(
        "{}{}",
        paint(&[score_color(value)], &"█".repeat(filled)),
        dim(&"░".repeat(width - filled))
    )
}
