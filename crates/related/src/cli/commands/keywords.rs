//! Implementation of `related keywords`.

use std::{cmp::Ordering, iter, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use related_document::Document;
use related_rank::{Corpus, IdfProvider, KeywordExtractor};
use serde::Serialize;

use crate::cli::{
    args::KeywordsCommand,
    context::{CommandContext, find_post, published_posts},
    output::{dim, header, print_json, subheader},
};

/// One keyword of the target post with its weight components.
#[derive(Debug, Serialize)]
struct WeightedTerm {
    /// The keyword.
    term: String,
    /// Occurrences in the post.
    count: u32,
    /// Count divided by the post's most frequent token.
    tf: f32,
    /// Posts in the collection containing the term.
    df: usize,
    /// Inverse document frequency over the collection.
    idf: f32,
    /// `tf * idf`, the value used for similarity.
    weight: f32,
}

/// JSON output for `related keywords`.
#[derive(Serialize)]
struct JsonKeywords<'a> {
    /// Post id.
    id: &'a str,
    /// Posts in the corpus, including the target.
    corpus_size: usize,
    /// Keywords, heaviest first.
    keywords: &'a [WeightedTerm],
}

/// Shows the keywords of a post weighted against the rest of the collection.
pub fn run(ctx: &CommandContext, cmd: &KeywordsCommand) -> ExitCode {
    let posts = match ctx
        .posts_path(cmd.posts.path.as_deref())
        .and_then(|path| published_posts(&path))
    {
        Ok(posts) => posts,
        Err(code) => return code,
    };
    let target = match find_post(&posts, &cmd.id) {
        Ok(target) => target,
        Err(code) => return code,
    };

    let extractor = KeywordExtractor::from_settings(&ctx.config.extract);
    let corpus = corpus_for(target, &posts);
    let terms = weigh_terms(&extractor, &corpus, target);

    if cmd.json {
        return print_json(&JsonKeywords {
            id: &target.id,
            corpus_size: corpus.len(),
            keywords: &terms,
        });
    }

    println!("{} {}", header(&target.title), dim(&format!("({})", target.id)));
    println!(
        "{}",
        dim(&format!("{} keywords, corpus of {} posts", terms.len(), corpus.len()))
    );
    println!();

    if terms.is_empty() {
        println!("{}", dim("(no keywords)"));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Keywords:"));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Term", "Count", "TF", "DF", "IDF", "Weight"]);
    for t in &terms {
        table.add_row(vec![
            Cell::new(&t.term),
            Cell::new(t.count.to_string()),
            Cell::new(format!("{:.3}", t.tf)),
            Cell::new(t.df.to_string()),
            Cell::new(format!("{:.3}", t.idf)),
            Cell::new(format!("{:.3}", t.weight)),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}

/// Corpus of the target (index 0) followed by every other post, as the ranker builds it.
fn corpus_for(target: &Document, posts: &[Document]) -> Corpus {
    let others = posts.iter().filter(|p| p.id != target.id);
    Corpus::new(iter::once(target).chain(others).map(Document::searchable_text))
}

/// Weight components of every keyword of `target`, heaviest first, then alphabetical.
fn weigh_terms(
    extractor: &KeywordExtractor,
    corpus: &Corpus,
    target: &Document,
) -> Vec<WeightedTerm> {
    let keywords = extractor.document_keywords(target);
    let vector = corpus.vector(&keywords, 0);
    let Some(counts) = corpus.counts(0) else {
        return Vec::new();
    };

    let mut terms: Vec<WeightedTerm> = keywords
        .iter()
        .map(|term| WeightedTerm {
            term: term.clone(),
            count: counts.count(term),
            tf: counts.tf(term),
            df: corpus.document_frequency(term),
            idf: corpus.idf(term).unwrap_or(0.0),
            weight: vector.get(term).copied().unwrap_or(0.0),
        })
        .collect();

    terms.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    terms
}
