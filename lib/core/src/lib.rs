//! # toonrec Core
//!
//! Core library for the toonrec content-based recommender.
//!
//! This crate provides the data side of the pipeline:
//!
//! - [`Item`] - A normalized webtoon record
//! - [`Corpus`] - Ordered items with a title index
//! - [`FeatureComposer`] - Builds the text document for each item
//! - [`TfidfModel`] - TF-IDF vectorizer over a fixed vocabulary
//! - [`SparseVector`] - Sparse weight vector with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use toonrec_core::{Corpus, DuplicatePolicy, FeatureComposer, ComposerConfig, Item, TfidfModel, VectorizerConfig};
//!
//! let items = vec![
//!     Item::new(1, "A").with_genre("Action").with_writer("W1").with_summary("hero fights villain"),
//!     Item::new(2, "B").with_genre("Action").with_writer("W2").with_summary("hero saves world"),
//! ];
//! let corpus = Corpus::new(items, DuplicatePolicy::Reject).unwrap();
//!
//! let docs = FeatureComposer::new(&ComposerConfig::default(), &corpus).compose_all(&corpus);
//! let (model, rows) = TfidfModel::fit_transform(&docs, &VectorizerConfig::default()).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert!(model.vocabulary().column("hero").is_some());
//! ```

pub mod error;
pub mod item;
pub mod popularity;
pub mod loader;
pub mod corpus;
pub mod compose;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use error::{Error, Result};
pub use item::{Item, ItemId, RawRecord, Status, clean_text, UNKNOWN_WRITER, UNCATEGORIZED};
pub use popularity::{parse_popularity, PopularityError};
pub use loader::{load_csv, load_csv_reader};
pub use corpus::{Corpus, DuplicatePolicy};
pub use compose::{compose, ComposerConfig, FeatureComposer};
pub use text::{Tokenizer, ENGLISH_STOP_WORDS};
pub use tfidf::{TfidfModel, VectorizerConfig, Vocabulary};
pub use vector::SparseVector;
