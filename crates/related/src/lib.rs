//! related: related-article ranking for markdown blogs.
//!
//! Loads a directory of posts, extracts Italian keywords from each, weighs them with TF-IDF
//! over the collection and ranks the posts most related to a given one by cosine similarity,
//! shared category and recency. Rankings are cached between invocations so a static site
//! build asking for the same post twice does the work once.

#![warn(missing_docs)]

pub mod cli;
