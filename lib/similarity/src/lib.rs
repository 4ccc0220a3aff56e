//! # toonrec Similarity
//!
//! Similarity engine, recommender and evaluator for toonrec.
//!
//! A [`Model`] is built once from a list of items. It holds the fitted
//! vectorizer, one weight vector per item and the full cosine similarity
//! matrix. Every query after that is read-only.
//!
//! ## Features
//!
//! - **Similarity Matrix**: Dense all-pairs cosine scores, computed in parallel
//! - **Recommendations**: Top-k neighbours by title, id or row
//! - **Explainability**: Per-term contribution breakdown for each result
//! - **Evaluation**: Genre diversity, coverage, rating quality over a query sample
//!
//! ## Example
//!
//! ```rust
//! use toonrec_core::Item;
//! use toonrec_similarity::{Model, ModelConfig};
//!
//! let items = vec![
//!     Item::new(1, "A").with_genre("Action").with_writer("W1").with_summary("hero fights villain"),
//!     Item::new(2, "B").with_genre("Action").with_writer("W2").with_summary("hero saves world"),
//!     Item::new(3, "C").with_genre("Romance").with_writer("W3").with_summary("two people fall in love"),
//! ];
//! let model = Model::build(items, ModelConfig::default()).unwrap();
//!
//! let recs = model.recommend("A", 2).unwrap();
//! assert_eq!(recs[0].item.title, "B");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Composer   │────>│   TF-IDF    │────>│   Matrix    │
//! │ (item→doc)  │     │ (doc→terms) │     │  (cosine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐            │
//!                     │  Recommend  │<───────────┘
//!                     │   (top-k)   │
//!                     └─────────────┘
//!                       │         │
//!              ┌─────────────┐ ┌─────────────┐
//!              │   Explain   │ │  Evaluate   │
//!              └─────────────┘ └─────────────┘
//! ```

pub mod matrix;
pub mod model;
pub mod recommend;
pub mod explain;
pub mod evaluate;

pub use matrix::{cosine_row, SimilarityMatrix};
pub use model::{Model, ModelConfig, DEFAULT_K};
pub use recommend::{rank_row, Recommendation};
pub use explain::{ExplainedRecommendation, RecommendResponse, TermContribution};
pub use evaluate::{evaluate, EvalConfig, EvaluationReport, SampleStrategy};
