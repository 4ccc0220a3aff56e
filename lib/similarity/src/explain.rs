//! Explainability for recommendations
//!
//! Breaks a cosine score into per-term contributions so a result can show
//! which shared words made two items similar.

use crate::model::Model;
use crate::recommend::Recommendation;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use toonrec_core::{Error, Result};

/// Contribution of one shared vocabulary term to a similarity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    pub term: String,
    pub contribution: f32,
}

/// A recommendation with its strongest shared terms
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedRecommendation<'a> {
    #[serde(flatten)]
    pub recommendation: Recommendation<'a>,
    pub shared_terms: Vec<TermContribution>,
}

/// Response body for a recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse<'a> {
    pub query: String,
    pub result: Vec<ExplainedRecommendation<'a>>,
}

impl Model {
    /// Shared terms between rows `query` and `candidate`, largest first.
    ///
    /// Contributions are `w_q[t] * w_c[t] / (|q| |c|)`; over all shared terms
    /// they add up to the cosine score. `top_n == 0` returns every term.
    pub fn explain(&self, query: usize, candidate: usize, top_n: usize) -> Result<Vec<TermContribution>> {
        let (q, c) = match (self.vectors.get(query), self.vectors.get(candidate)) {
            (Some(q), Some(c)) => (q, c),
            _ => return Err(Error::ItemNotFound(format!("row {} or {}", query, candidate))),
        };

        let denom = q.norm() * c.norm();
        if denom == 0.0 {
            return Ok(Vec::new());
        }

        let vocab = self.vectorizer.vocabulary();
        let mut terms: Vec<TermContribution> = q
            .iter()
            .filter_map(|(col, wq)| {
                let wc = c.get(col);
                if wc == 0.0 {
                    return None;
                }
                vocab.term(col).map(|term| TermContribution {
                    term: term.to_string(),
                    contribution: wq * wc / denom,
                })
            })
            .collect();

        terms.sort_by_key(|t| Reverse(OrderedFloat(t.contribution)));
        if top_n > 0 {
            terms.truncate(top_n);
        }
        Ok(terms)
    }

    /// Recommendations for `title`, each with up to `top_n` shared terms
    pub fn recommend_explained(
        &self,
        title: &str,
        k: usize,
        top_n: usize,
    ) -> Result<RecommendResponse<'_>> {
        let query = self.corpus.index_of(title)?;
        let result = self
            .recommend_index(query, k)?
            .into_iter()
            .map(|rec| {
                let shared_terms = self.explain(query, rec.index, top_n)?;
                Ok(ExplainedRecommendation { recommendation: rec, shared_terms })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RecommendResponse {
            query: title.to_string(),
            result,
        })
    }
}
