//! Loading documents from files and directories.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use chrono::DateTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Document, DocumentError, PostFrontmatter, Slugifier, excerpt_from, split_frontmatter};

/// File extensions treated as markdown posts.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Parses a markdown post with YAML frontmatter from disk.
pub fn parse_post(path: &Path) -> Result<Document, DocumentError> {
    let content = read(path)?;
    parse_post_str(&content, path)
}

/// Parses a markdown post from a string.
///
/// The `path` provides the fallback id (file stem) and is used for error reporting. A post
/// without `published_at` falls back to the Unix epoch and is logged.
pub fn parse_post_str(content: &str, path: &Path) -> Result<Document, DocumentError> {
    let (yaml, body) =
        split_frontmatter(content).ok_or_else(|| DocumentError::MissingFrontmatter {
            path: path.to_path_buf(),
        })?;

    let fm: PostFrontmatter = if yaml.trim().is_empty() {
        PostFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|source| DocumentError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?
    };

    let id = fm.id.unwrap_or_else(|| file_stem(path));
    let title = fm.title.unwrap_or_else(|| id.clone());
    let published_at = fm.published_at.unwrap_or_else(|| {
        warn!(path = %path.display(), "post has no published_at, treating as oldest");
        DateTime::UNIX_EPOCH
    });

    Ok(Document {
        slug: fm.slug.unwrap_or_default(),
        excerpt: fm.excerpt.unwrap_or_else(|| excerpt_from(body)),
        body: body.to_string(),
        category: fm.category,
        published_at,
        keywords: fm.keywords,
        featured_image: fm.featured_image,
        status: fm.status.unwrap_or_default(),
        id,
        title,
    })
}

/// Loads a JSON array of documents, the shape a database export returns.
pub fn load_json(path: &Path) -> Result<Vec<Document>, DocumentError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| DocumentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads documents from a single file, dispatching on the extension.
pub fn load_path(path: &Path) -> Result<Vec<Document>, DocumentError> {
    match extension(path).as_deref() {
        Some("json") => load_json(path),
        Some(ext) if MARKDOWN_EXTENSIONS.contains(&ext) => Ok(vec![parse_post(path)?]),
        _ => Err(DocumentError::UnsupportedFileType {
            path: path.to_path_buf(),
        }),
    }
}

/// Loads every markdown post and JSON dump under `dir`, recursively.
///
/// Hidden files and directories are skipped. Documents without a slug get one derived from
/// their title, unique across the collection. The result is sorted by id.
pub fn load_dir(dir: &Path) -> Result<Vec<Document>, DocumentError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = entry.map_err(|source| DocumentError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match load_path(path) {
            Ok(docs) => documents.extend(docs),
            Err(DocumentError::UnsupportedFileType { .. }) => {
                debug!(path = %path.display(), "skipping unsupported file");
            }
            Err(e) => return Err(e),
        }
    }

    assign_slugs(&mut documents);
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(dir = %dir.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Fills in missing slugs without colliding with explicit ones.
fn assign_slugs(documents: &mut [Document]) {
    let mut slugifier = Slugifier::new();
    for doc in documents.iter().filter(|d| !d.slug.is_empty()) {
        slugifier.reserve(&doc.slug);
    }
    for doc in documents.iter_mut().filter(|d| d.slug.is_empty()) {
        doc.slug = slugifier.slugify(&doc.title);
    }
}

/// Reads a file to a string.
fn read(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Lowercased file extension.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// File stem as a string, used as the fallback post id.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| PathBuf::from(path).display().to_string())
}

/// Returns true for dotfiles and dot-directories.
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::DocumentStatus;

    /// A complete post with frontmatter.
    const POST: &str = "---
id: ems-dimagrimento
title: EMS e dimagrimento
category: fitness
published_at: 2024-05-01T09:00:00Z
keywords: [ems, dimagrimento]
---

L'elettrostimolazione aiuta il **dimagrimento**.

Secondo paragrafo.
";

    /// Writes `content` to `rel` inside `dir`, creating parents.
    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parse_post_reads_frontmatter() {
        let doc = parse_post_str(POST, Path::new("posts/ems.md")).unwrap();
        assert_eq!(doc.id, "ems-dimagrimento");
        assert_eq!(doc.title, "EMS e dimagrimento");
        assert_eq!(doc.category.as_deref(), Some("fitness"));
        assert_eq!(doc.keywords, vec!["ems", "dimagrimento"]);
        assert_eq!(
            doc.published_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(doc.excerpt, "L'elettrostimolazione aiuta il dimagrimento.");
        assert!(doc.body.starts_with("L'elettrostimolazione"));
        assert_eq!(doc.status, DocumentStatus::Published);
    }

    #[test]
    fn parse_post_falls_back_to_file_stem() {
        let doc = parse_post_str("---\n---\nCorpo", Path::new("blog/pilates.md")).unwrap();
        assert_eq!(doc.id, "pilates");
        assert_eq!(doc.title, "pilates");
        assert_eq!(doc.published_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn parse_post_without_frontmatter_fails() {
        let err = parse_post_str("# Titolo", Path::new("x.md")).unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontmatter { .. }));
    }

    #[test]
    fn parse_post_with_bad_yaml_fails() {
        let err = parse_post_str("---\ntitle: [unclosed\n---\n", Path::new("x.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Frontmatter { .. }));
    }

    #[test]
    fn load_json_reads_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "posts.json",
            r#"[{"id": "1", "title": "Uno", "published_at": "2024-01-01T00:00:00Z"},
                {"id": "2", "title": "Due", "publishedAt": "2024-02-01T00:00:00Z", "content": null}]"#,
        );
        let docs = load_json(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].body, "");
    }

    #[test]
    fn load_json_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "posts.json", "{not json");
        assert!(matches!(
            load_json(&path).unwrap_err(),
            DocumentError::Json { .. }
        ));
    }

    #[test]
    fn load_path_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "image.png", "");
        assert!(matches!(
            load_path(&path).unwrap_err(),
            DocumentError::UnsupportedFileType { .. }
        ));
    }

    #[test]
    fn load_dir_walks_recursively_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(&dir, "2024/ems.md", POST);
        write(
            &dir,
            "2023/pilates.md",
            "---\ntitle: Pilates\npublished_at: 2023-03-01T00:00:00Z\n---\nCorpo",
        );
        write(
            &dir,
            "export.json",
            r#"[{"id": "zz", "title": "Pilates", "published_at": "2024-01-01T00:00:00Z"}]"#,
        );
        write(&dir, "notes.txt", "ignored");
        write(&dir, ".drafts/secret.md", "---\ntitle: Segreto\n---\n");

        let docs = load_dir(dir.path()).unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["ems-dimagrimento", "pilates", "zz"]);

        let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert!(slugs.contains(&"pilates"));
        assert!(slugs.contains(&"pilates-1"));
        assert!(slugs.contains(&"ems-e-dimagrimento"));
    }

    #[test]
    fn dot_names_are_hidden() {
        assert!(is_hidden(OsStr::new(".drafts")));
        assert!(is_hidden(OsStr::new(".DS_Store")));
        assert!(!is_hidden(OsStr::new("ems.md")));
        assert!(!is_hidden(OsStr::new("bozza.")));
    }

    #[test]
    fn load_dir_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.md", "no frontmatter here");
        assert!(load_dir(dir.path()).is_err());
    }
}
