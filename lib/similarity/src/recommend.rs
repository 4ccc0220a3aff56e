//! Ranked neighbours for a query item
//!
//! Scores come straight from a row of the similarity matrix. The query row
//! is always excluded, whatever its score.

use crate::model::Model;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use toonrec_core::{Error, Item, ItemId, Result};

/// One ranked neighbour
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    /// 1-based position in the result list
    pub rank: usize,
    /// Row of the item in the corpus
    pub index: usize,
    pub item: &'a Item,
    pub score: f32,
}

/// Order every column of `row` except `exclude` by descending score.
///
/// Ties keep ascending column order: the sort is stable and columns go in
/// already sorted.
pub fn rank_row(row: &[f32], exclude: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(j, _)| j != exclude)
        .collect();
    scored.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));
    scored
}

impl Model {
    /// Top `k` neighbours of the item titled `title`.
    ///
    /// Fails with [`Error::ItemNotFound`] for an unknown title and
    /// [`Error::InvalidArgument`] for `k == 0`. `k` larger than the corpus
    /// returns every other item.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation<'_>>> {
        let idx = self.corpus.index_of(title)?;
        self.recommend_index(idx, k)
    }

    /// Same as [`Model::recommend`] with the configured default `k`
    pub fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation<'_>>> {
        self.recommend(title, self.config.default_k)
    }

    pub fn recommend_by_id(&self, id: ItemId, k: usize) -> Result<Vec<Recommendation<'_>>> {
        let idx = self.corpus.index_of_id(id)?;
        self.recommend_index(idx, k)
    }

    pub fn recommend_index(&self, idx: usize, k: usize) -> Result<Vec<Recommendation<'_>>> {
        if k == 0 {
            return Err(Error::InvalidArgument("k must be at least 1".into()));
        }
        if idx >= self.corpus.len() {
            return Err(Error::ItemNotFound(format!("row {}", idx)));
        }

        let ranked = rank_row(self.similarity.row(idx), idx);
        Ok(ranked
            .into_iter()
            .take(k)
            .enumerate()
            .filter_map(|(pos, (j, score))| {
                self.corpus.get(j).map(|item| Recommendation {
                    rank: pos + 1,
                    index: j,
                    item,
                    score,
                })
            })
            .collect())
    }
}
