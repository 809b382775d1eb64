//! Markup stripping for keyword extraction.
//!
//! Post bodies arrive as markdown, HTML, or markdown with embedded HTML. Keyword extraction
//! only wants the words a reader sees. The body is rendered to HTML with `pulldown-cmark`
//! (raw HTML passes through untouched) and that HTML is turned into undecorated text with
//! `html2text`, which drops `<script>`/`<style>` content and decodes every entity.

use html2text::config;
use pulldown_cmark::{Event, Parser, TagEnd, html};
use tracing::debug;

/// Line width handed to the text renderer. Wide enough that paragraphs never wrap.
const RENDER_WIDTH: usize = 10_000;

/// Default maximum excerpt length in characters.
const EXCERPT_CHARS: usize = 200;

/// Converts markdown and/or HTML into plain text.
///
/// Never fails: if the HTML renderer gives up, the markdown text events are used as-is.
/// Whitespace runs are collapsed and blocks are separated by newlines.
pub fn strip_markup(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut rendered, Parser::new(text));

    let plain = match config::plain_no_decorate()
        .string_from_read(rendered.as_bytes(), RENDER_WIDTH)
    {
        Ok(plain) => plain,
        Err(e) => {
            debug!(error = %e, "html rendering failed, using markdown text only");
            markdown_text(text)
        }
    };

    normalize_whitespace(&plain)
}

/// Text and code events of `text`, one block per line, ignoring embedded HTML.
fn markdown_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for event in Parser::new(text) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote(_)
                | TagEnd::TableCell,
            ) => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Builds an excerpt from a body: the first non-empty paragraph of plain text, cut at a
/// word boundary.
pub fn excerpt_from(body: &str) -> String {
    let plain = strip_markup(body);
    let Some(first) = plain.lines().find(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    if first.chars().count() <= EXCERPT_CHARS {
        return first.to_string();
    }

    let cut: String = first.chars().take(EXCERPT_CHARS).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}

/// Collapses runs of spaces within lines and drops empty lines.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
