// TF-IDF vectorization over a fixed vocabulary
use crate::text::Tokenizer;
use crate::{Error, Result, SparseVector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub stop_words_english: bool,
    /// Shortest token kept, in characters
    pub min_token_len: usize,
    /// Use `1 + ln(tf)` instead of the raw count
    pub sublinear_tf: bool,
    /// L2-normalize each row
    pub normalize: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            stop_words_english: true,
            min_token_len: 2,
            sublinear_tf: false,
            normalize: true,
        }
    }
}

impl VectorizerConfig {
    pub fn tokenizer(&self) -> Tokenizer {
        let tok = Tokenizer::new(self.min_token_len);
        if self.stop_words_english {
            tok.with_english_stop_words()
        } else {
            tok
        }
    }
}

/// Fitted vocabulary: sorted terms and their inverse document frequencies
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f32>,
    columns: AHashMap<String, u32>,
}

impl Vocabulary {
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn term(&self, col: u32) -> Option<&str> {
        self.terms.get(col as usize).map(String::as_str)
    }

    pub fn column(&self, term: &str) -> Option<u32> {
        self.columns.get(term).copied()
    }

    pub fn idf(&self, col: u32) -> Option<f32> {
        self.idf.get(col as usize).copied()
    }
}

/// A vectorizer fitted once over a corpus of documents
#[derive(Debug, Clone)]
pub struct TfidfModel {
    config: VectorizerConfig,
    tokenizer: Tokenizer,
    vocabulary: Vocabulary,
    n_docs: usize,
}

impl TfidfModel {
    /// Fit the vocabulary and return one weight vector per document.
    ///
    /// idf(t) = ln((1 + n) / (1 + df(t))) + 1
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        config: &VectorizerConfig,
    ) -> Result<(Self, Vec<SparseVector>)> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        if config.min_token_len == 0 {
            return Err(Error::InvalidConfig("min_token_len must be at least 1".into()));
        }

        let tokenizer = config.tokenizer();
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenizer.tokenize(d.as_ref()))
            .collect();

        // term -> document frequency, ordered so columns are lexicographic
        let mut dfs: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *dfs.entry(term).or_insert(0) += 1;
            }
        }

        if dfs.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = documents.len() as f32;
        let mut terms = Vec::with_capacity(dfs.len());
        let mut idf = Vec::with_capacity(dfs.len());
        let mut columns = AHashMap::with_capacity(dfs.len());
        for (col, (term, df)) in dfs.into_iter().enumerate() {
            terms.push(term.to_string());
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
            columns.insert(term.to_string(), col as u32);
        }

        let model = Self {
            config: config.clone(),
            tokenizer,
            vocabulary: Vocabulary { terms, idf, columns },
            n_docs: documents.len(),
        };
        info!(
            "TF-IDF fitted: {} documents, {} terms",
            model.n_docs,
            model.vocabulary.len()
        );

        let rows = tokenized.iter().map(|t| model.weigh(t)).collect();
        Ok((model, rows))
    }

    /// Project a new document onto the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        self.weigh(&self.tokenizer.tokenize(document))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: AHashMap<u32, u32> = AHashMap::new();
        for token in tokens {
            if let Some(col) = self.vocabulary.column(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + (tf as f32).ln()
                } else {
                    tf as f32
                };
                (col, tf * self.vocabulary.idf[col as usize])
            })
            .collect();

        let mut row = SparseVector::from_pairs(pairs);
        if self.config.normalize {
            row.normalize();
        }
        row
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn n_docs(&self) -> usize {
        self.n_docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "Action W1 hero fights villain",
            "Action W2 hero saves world",
            "Romance W3 two people fall in love",
        ]
    }

    #[test]
    fn test_vocabulary_sorted_without_stop_words() {
        let (model, rows) = TfidfModel::fit_transform(&docs(), &VectorizerConfig::default()).unwrap();
        let vocab = model.vocabulary();
        let mut sorted = vocab.terms().to_vec();
        sorted.sort();
        assert_eq!(vocab.terms(), sorted.as_slice());
        assert!(vocab.column("two").is_none());
        assert!(vocab.column("in").is_none());
        assert!(vocab.column("action").is_some());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_idf_smoothing() {
        let (model, _) = TfidfModel::fit_transform(&docs(), &VectorizerConfig::default()).unwrap();
        let vocab = model.vocabulary();
        let hero = vocab.idf(vocab.column("hero").unwrap()).unwrap();
        let love = vocab.idf(vocab.column("love").unwrap()).unwrap();
        assert!((hero - ((4.0f32 / 3.0).ln() + 1.0)).abs() < 1e-6);
        assert!((love - ((4.0f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
        assert!(love > hero);
    }

    #[test]
    fn test_rows_normalized_and_non_negative() {
        let (_, rows) = TfidfModel::fit_transform(&docs(), &VectorizerConfig::default()).unwrap();
        for row in &rows {
            assert!((row.norm() - 1.0).abs() < 1e-5);
            assert!(row.values().iter().all(|w| *w >= 0.0));
        }
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<&str> = Vec::new();
        assert!(matches!(
            TfidfModel::fit_transform(&empty, &VectorizerConfig::default()),
            Err(Error::EmptyCorpus)
        ));
        assert!(matches!(
            TfidfModel::fit_transform(&["the and of", "  ", "a"], &VectorizerConfig::default()),
            Err(Error::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (model, rows) = TfidfModel::fit_transform(&docs(), &VectorizerConfig::default()).unwrap();
        let projected = model.transform("Action W1 hero fights villain zeppelin");
        assert_eq!(projected, rows[0]);
        assert_eq!(model.vocabulary().len(), model.vocabulary().terms().len());
    }
}
