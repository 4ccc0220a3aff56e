//! # toonrec
//!
//! Content-based webtoon recommendations from text and category features.
//!
//! toonrec turns each title's genre, writer and synopsis into a TF-IDF
//! vector, computes cosine similarity between every pair of titles, and
//! returns the closest neighbours of a query title. No user history is
//! involved.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! toonrec recommend --data webtoons.csv --title "Lore Olympus" -k 5
//! toonrec evaluate --data webtoons.csv --sample 10
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use toonrec::prelude::*;
//!
//! let items = load_csv("webtoons.csv").unwrap();
//! let model = Model::build(items, ModelConfig::default()).unwrap();
//!
//! for rec in model.recommend("Lore Olympus", 5).unwrap() {
//!     println!("{} {:.3} {}", rec.rank, rec.score, rec.item.title);
//! }
//!
//! let report = evaluate(&model, &EvalConfig::default()).unwrap();
//! println!("coverage {:.1}%", report.genre_coverage_pct);
//! ```
//!
//! ## Crate Structure
//!
//! - [`toonrec-core`](toonrec_core) - Items, CSV loading, feature composition, TF-IDF
//! - [`toonrec-similarity`](toonrec_similarity) - Similarity matrix, recommender, explain, evaluation

// Re-export core types
pub use toonrec_core::{
    Item, ItemId, Status, RawRecord,
    Corpus, DuplicatePolicy,
    ComposerConfig, FeatureComposer,
    TfidfModel, VectorizerConfig, Vocabulary, Tokenizer,
    SparseVector,
    load_csv, load_csv_reader, parse_popularity, PopularityError,
    Error, Result,
};

// Re-export the engine
pub use toonrec_similarity::{
    Model, ModelConfig, DEFAULT_K,
    SimilarityMatrix, Recommendation,
    ExplainedRecommendation, RecommendResponse, TermContribution,
    evaluate, EvalConfig, EvaluationReport, SampleStrategy,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Item, ItemId, Corpus, DuplicatePolicy,
        VectorizerConfig, ComposerConfig,
        load_csv,
        Model, ModelConfig, Recommendation,
        evaluate, EvalConfig, EvaluationReport, SampleStrategy,
        Error, Result,
    };
}
