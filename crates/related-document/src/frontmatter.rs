//! YAML frontmatter for markdown posts.
//!
//! Frontmatter is metadata at the start of a post, delimited by `---`:
//!
//! ```markdown
//! ---
//! id: ems-dimagrimento
//! title: EMS e dimagrimento
//! category: fitness
//! published_at: 2024-05-01T09:00:00Z
//! keywords: [ems, dimagrimento]
//! ---
//!
//! Body starts here
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::DocumentStatus;

/// Parsed frontmatter of a markdown post.
///
/// Everything is optional here; the loader supplies fallbacks (file stem for the id,
/// slugified title for the slug, first paragraph for the excerpt).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFrontmatter {
    /// Post identifier.
    pub id: Option<String>,
    /// Post title.
    pub title: Option<String>,
    /// URL slug.
    pub slug: Option<String>,
    /// Short summary.
    pub excerpt: Option<String>,
    /// Taxonomy category.
    pub category: Option<String>,
    /// Publication time.
    #[serde(alias = "date")]
    pub published_at: Option<DateTime<Utc>>,
    /// Explicit keywords.
    #[serde(default, alias = "tags")]
    pub keywords: Vec<String>,
    /// Featured image reference.
    #[serde(alias = "image")]
    pub featured_image: Option<String>,
    /// Publication state.
    pub status: Option<DocumentStatus>,
}

/// Splits a post into its frontmatter YAML and the remaining body.
///
/// Returns `None` when the content does not start with a `---` line or the block is never
/// closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}'); // Strip BOM if present
    let after_opening = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let closing_pos = find_closing_delimiter(after_opening)?;

    let yaml = &after_opening[..closing_pos];
    let remaining = &after_opening[closing_pos..];

    let remaining = remaining.strip_prefix("---").unwrap_or(remaining);
    let remaining = remaining.trim_start_matches(['\r', '\n']);

    Some((yaml, remaining))
}

/// Finds the byte position of the closing `---` delimiter.
///
/// The delimiter must be on its own line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}
