//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use chrono::{DateTime, Utc};
pub use related_highlight::{dim, header, rule, subheader, success, warning};
use related_highlight::{score, score_bar};
use related_document::Document;
use related_rank::ScoredCandidate;
use serde::Serialize;

/// Width of the score bar in ranking output.
const BAR_WIDTH: usize = 10;

/// JSON output for a single related article.
#[derive(Serialize)]
struct JsonRelated<'a> {
    /// Post id.
    id: &'a str,
    /// Post title.
    title: &'a str,
    /// URL slug.
    slug: &'a str,
    /// Short summary.
    excerpt: &'a str,
    /// Category, if any.
    category: Option<&'a str>,
    /// Publication time.
    published_at: DateTime<Utc>,
    /// Featured image, if any.
    featured_image: Option<&'a str>,
    /// Cosine similarity to the target.
    similarity: f32,
    /// Category component before weighting.
    category_boost: f32,
    /// Recency component before weighting.
    recency: f32,
    /// Composite score.
    score: f32,
}

impl<'a> From<&'a ScoredCandidate> for JsonRelated<'a> {
    fn from(candidate: &'a ScoredCandidate) -> Self {
        let doc = &candidate.document;
        Self {
            id: &doc.id,
            title: &doc.title,
            slug: &doc.slug,
            excerpt: &doc.excerpt,
            category: doc.category.as_deref(),
            published_at: doc.published_at,
            featured_image: doc.featured_image.as_deref(),
            similarity: candidate.similarity,
            category_boost: candidate.category_boost,
            recency: candidate.recency,
            score: candidate.score,
        }
    }
}

/// JSON output for `related rank`.
#[derive(Serialize)]
struct JsonRanking<'a> {
    /// Id of the post the ranking is for.
    target: &'a str,
    /// Number of related articles.
    total: usize,
    /// Related articles, best first.
    results: Vec<JsonRelated<'a>>,
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outputs a ranking as JSON or text.
pub fn output_ranking(target: &Document, results: &[ScoredCandidate], json: bool) -> ExitCode {
    if json {
        return print_json(&JsonRanking {
            target: &target.id,
            total: results.len(),
            results: results.iter().map(JsonRelated::from).collect(),
        });
    }

    println!("{} {}", header(&target.title), dim(&format!("({})", target.id)));
    println!("{}", rule(40));

    if results.is_empty() {
        println!("{}", dim("No related articles."));
        return ExitCode::SUCCESS;
    }

    for (i, result) in results.iter().enumerate() {
        print!("{}", format_result(i + 1, result));
    }
    ExitCode::SUCCESS
}

/// Formats one ranked result as two lines: title, then score details.
fn format_result(position: usize, result: &ScoredCandidate) -> String {
    let doc = &result.document;
    let mut meta = vec![doc.id.clone(), doc.published_at.format("%Y-%m-%d").to_string()];
    if let Some(category) = &doc.category {
        meta.push(category.clone());
    }

    format!(
        "{position:>2}. {} {}\n    {} {}  {}\n",
        subheader(&doc.title),
        dim(&format!("[{}]", meta.join(" · "))),
        score_bar(result.similarity, BAR_WIDTH),
        score(result.score),
        dim(&format!(
            "similarity {:.3}, category {:.2}, recency {:.3}",
            result.similarity, result.category_boost, result.recency
        )),
    )
}
