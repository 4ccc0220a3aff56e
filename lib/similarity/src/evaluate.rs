//! Offline evaluation of recommendation lists
//!
//! Runs the recommender for a sample of query titles and aggregates genre
//! diversity, genre coverage, rating quality and average similarity. Queries
//! run in parallel; results are folded in sample order.

use crate::model::Model;
use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use toonrec_core::{Error, Result};
use tracing::{info, warn};

/// Which titles to use as queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStrategy {
    /// First `n` items in corpus order
    Head(usize),
    /// `n` distinct items drawn with a seeded RNG, in corpus order
    Random { n: usize, seed: u64 },
    /// Explicit titles; unknown ones are reported, not fatal
    Titles(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    pub k: usize,
    pub sample: SampleStrategy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            k: 10,
            sample: SampleStrategy::Head(10),
        }
    }
}

/// Aggregate statistics over one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub queries_requested: usize,
    pub queries_evaluated: usize,
    pub missing_titles: Vec<String>,
    /// Mean count of distinct genres per recommendation list
    pub avg_genre_diversity: f64,
    /// Distinct recommended genres over distinct corpus genres, in percent
    pub genre_coverage_pct: f64,
    /// Mean rating over every recommended item, repeats included
    pub avg_rating: Option<f64>,
    /// Population standard deviation of the same ratings
    pub std_rating: Option<f64>,
    /// Mean over queries of the mean returned score
    pub avg_similarity: f64,
    pub rated_items: usize,
}

struct QueryOutcome<'a> {
    genres: AHashSet<&'a str>,
    ratings: Vec<f64>,
    mean_score: f64,
}

impl SampleStrategy {
    /// Resolve to query titles against `model`'s corpus
    pub fn titles(&self, model: &Model) -> Vec<String> {
        let corpus = model.corpus();
        match self {
            SampleStrategy::Head(n) => corpus.titles().take(*n).map(str::to_string).collect(),
            SampleStrategy::Random { n, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let amount = (*n).min(corpus.len());
                let mut picked = rand::seq::index::sample(&mut rng, corpus.len(), amount).into_vec();
                picked.sort_unstable();
                picked
                    .into_iter()
                    .filter_map(|i| corpus.get(i).map(|item| item.title.clone()))
                    .collect()
            }
            SampleStrategy::Titles(titles) => titles.clone(),
        }
    }
}

/// Evaluate `model` over the queries selected by `config`
pub fn evaluate(model: &Model, config: &EvalConfig) -> Result<EvaluationReport> {
    if config.k == 0 {
        return Err(Error::InvalidArgument("k must be at least 1".into()));
    }

    let titles = config.sample.titles(model);
    let outcomes: Vec<Result<QueryOutcome<'_>>> = titles
        .par_iter()
        .map(|title| run_query(model, title, config.k))
        .collect();

    let mut missing_titles = Vec::new();
    let mut diversity_sum = 0usize;
    let mut covered: AHashSet<&str> = AHashSet::new();
    let mut ratings: Vec<f64> = Vec::new();
    let mut score_sum = 0.0f64;
    let mut evaluated = 0usize;

    for (title, outcome) in titles.iter().zip(outcomes) {
        match outcome {
            Ok(outcome) => {
                evaluated += 1;
                diversity_sum += outcome.genres.len();
                covered.extend(outcome.genres);
                ratings.extend(outcome.ratings);
                score_sum += outcome.mean_score;
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping query {:?}: {}", title, e);
                missing_titles.push(title.clone());
            }
            Err(e) => return Err(e),
        }
    }

    let corpus_genres = model.corpus().genres().len();
    let avg_genre_diversity = mean_or_zero(diversity_sum as f64, evaluated);
    let genre_coverage_pct = if corpus_genres == 0 {
        0.0
    } else {
        covered.len() as f64 / corpus_genres as f64 * 100.0
    };
    let (avg_rating, std_rating) = mean_std(&ratings).unzip();

    let report = EvaluationReport {
        queries_requested: titles.len(),
        queries_evaluated: evaluated,
        missing_titles,
        avg_genre_diversity,
        genre_coverage_pct,
        avg_rating,
        std_rating,
        avg_similarity: mean_or_zero(score_sum, evaluated),
        rated_items: ratings.len(),
    };

    info!(
        "Evaluated {}/{} queries: diversity {:.2}, coverage {:.2}%",
        report.queries_evaluated, report.queries_requested, report.avg_genre_diversity, report.genre_coverage_pct
    );
    Ok(report)
}

fn run_query<'a>(model: &'a Model, title: &str, k: usize) -> Result<QueryOutcome<'a>> {
    let recs = model.recommend(title, k)?;
    let genres = recs.iter().map(|r| r.item.genre.as_str()).collect();
    let ratings = recs.iter().filter_map(|r| r.item.rating).collect();
    let score_sum: f64 = recs.iter().map(|r| r.score as f64).sum();

    Ok(QueryOutcome {
        genres,
        ratings,
        mean_score: mean_or_zero(score_sum, recs.len()),
    })
}

#[inline]
fn mean_or_zero(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean and population standard deviation
fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}
