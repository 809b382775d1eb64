//! Blog post model and loading for `related`.
//!
//! A [`Document`] is one blog post as fetched from the content store: identifier, title,
//! excerpt, body, optional category, publish timestamp and optional explicit keywords. This
//! crate loads documents from:
//! - markdown files with YAML frontmatter
//! - JSON arrays in the shape a database export returns
//! - directories containing either, walked recursively
//!
//! It also turns markdown or HTML bodies into plain text for keyword extraction.

#![warn(missing_docs)]

mod error;
mod frontmatter;
mod load;
mod markup;
mod slug;

use chrono::{DateTime, Utc};
pub use error::DocumentError;
pub use frontmatter::{PostFrontmatter, split_frontmatter};
pub use load::{load_dir, load_json, load_path, parse_post, parse_post_str};
pub use markup::{excerpt_from, strip_markup};
use serde::{Deserialize, Deserializer, Serialize};
pub use slug::{Slugifier, slug_for};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Visible on the site and eligible as a related article.
    #[default]
    Published,
    /// Work in progress, never offered as a related article.
    Draft,
}

/// A blog post.
///
/// Immutable for the duration of a ranking computation. Missing or `null` text fields
/// deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: String,
    /// Post title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// URL slug.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Short summary shown in listings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    /// Full body, markdown or HTML.
    #[serde(default, alias = "content", deserialize_with = "null_as_default")]
    pub body: String,
    /// Taxonomy category identifier.
    #[serde(default, alias = "category_id", alias = "categoryId")]
    pub category: Option<String>,
    /// Publication time.
    #[serde(alias = "publishedAt", alias = "date")]
    pub published_at: DateTime<Utc>,
    /// Explicit keywords set by the author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// Featured image reference.
    #[serde(default, alias = "featuredImage")]
    pub featured_image: Option<String>,
    /// Publication state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DocumentStatus,
}

impl Document {
    /// Creates a published document with the given id, title, body and publish time.
    ///
    /// The slug is derived from the title; other fields are empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: slug_for(&title),
            title,
            excerpt: String::new(),
            body: body.into(),
            category: None,
            published_at,
            keywords: Vec::new(),
            featured_image: None,
            status: DocumentStatus::Published,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the explicit keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Sets the publication state.
    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the post is published.
    pub fn is_published(&self) -> bool {
        self.status == DocumentStatus::Published
    }

    /// Plain text used for keyword extraction and term counting.
    ///
    /// Title, excerpt, markup-stripped body and explicit keywords, one per line.
    pub fn searchable_text(&self) -> String {
        let body = strip_markup(&self.body);
        let mut parts: Vec<&str> = vec![&self.title, &self.excerpt, &body];
        parts.extend(self.keywords.iter().map(String::as_str));
        parts.retain(|p| !p.is_empty());
        parts.join("\n")
    }

    /// Returns true if both documents have the same, present category.
    pub fn shares_category(&self, other: &Self) -> bool {
        matches!((&self.category, &other.category), (Some(a), Some(b)) if a == b)
    }
}

/// Keeps only published documents.
pub fn published(documents: Vec<Document>) -> Vec<Document> {
    documents.into_iter().filter(Document::is_published).collect()
}

/// Deserializes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_document_new_derives_slug() {
        let doc = Document::new("1", "Allenamento EMS a Milano", "", date());
        assert_eq!(doc.slug, "allenamento-ems-a-milano");
        assert!(doc.is_published());
        assert!(doc.category.is_none());
    }

    #[test]
    fn test_searchable_text_strips_markup_and_adds_keywords() {
        let doc = Document::new("1", "Titolo", "<p>Corpo <strong>forte</strong></p>", date())
            .with_excerpt("Riassunto")
            .with_keywords(["ems", "dimagrimento"]);

        let text = doc.searchable_text();
        assert!(text.contains("Titolo"));
        assert!(text.contains("Riassunto"));
        assert!(text.contains("Corpo forte"));
        assert!(text.contains("dimagrimento"));
        assert!(!text.contains("strong"));
    }

    #[test]
    fn test_shares_category() {
        let a = Document::new("a", "A", "", date()).with_category("fitness");
        let b = Document::new("b", "B", "", date()).with_category("fitness");
        let c = Document::new("c", "C", "", date()).with_category("nutrizione");
        let d = Document::new("d", "D", "", date());

        assert!(a.shares_category(&b));
        assert!(!a.shares_category(&c));
        assert!(!a.shares_category(&d));
        assert!(!d.shares_category(&d.clone()));
    }

    #[test]
    fn test_published_filter() {
        let docs = vec![
            Document::new("a", "A", "", date()),
            Document::new("b", "B", "", date()).with_status(DocumentStatus::Draft),
        ];
        let kept = published(docs);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }

    #[test]
    fn test_deserialize_nulls_as_empty() {
        let json = r#"{
            "id": "42",
            "title": "Proteine",
            "excerpt": null,
            "content": null,
            "category_id": "nutrizione",
            "publishedAt": "2024-05-01T09:00:00Z",
            "keywords": null,
            "featuredImage": "img/proteine.jpg"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.excerpt, "");
        assert_eq!(doc.body, "");
        assert!(doc.keywords.is_empty());
        assert_eq!(doc.category.as_deref(), Some("nutrizione"));
        assert_eq!(doc.featured_image.as_deref(), Some("img/proteine.jpg"));
        assert_eq!(doc.published_at, date());
        assert_eq!(doc.status, DocumentStatus::Published);
    }

    #[test]
    fn test_serde_roundtrip_keeps_status() {
        let doc = Document::new("1", "T", "b", date()).with_status(DocumentStatus::Draft);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"draft\""));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
