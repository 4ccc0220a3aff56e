//! Model construction
//!
//! A [`Model`] bundles everything derived from one corpus: composed
//! documents, the fitted vectorizer, per-item weight vectors and the
//! similarity matrix. It is built once and never mutated.

use crate::matrix::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::path::Path;
use toonrec_core::{
    ComposerConfig, Corpus, DuplicatePolicy, Error, FeatureComposer, Item, Result,
    SparseVector, TfidfModel, VectorizerConfig,
};
use tracing::info;

/// Number of neighbours returned when the caller does not ask for a count
pub const DEFAULT_K: usize = 10;

fn default_k() -> usize {
    DEFAULT_K
}

/// Configuration for building a [`Model`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub duplicate_titles: DuplicatePolicy,
    #[serde(default = "default_k")]
    pub default_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            composer: ComposerConfig::default(),
            duplicate_titles: DuplicatePolicy::default(),
            default_k: DEFAULT_K,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_k == 0 {
            return Err(Error::InvalidConfig("default_k must be at least 1".into()));
        }
        if self.vectorizer.min_token_len == 0 {
            return Err(Error::InvalidConfig("vectorizer.min_token_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: ModelConfig =
            serde_json::from_str(&data).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Immutable recommendation model over one corpus
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) config: ModelConfig,
    pub(crate) corpus: Corpus,
    pub(crate) documents: Vec<String>,
    pub(crate) vectorizer: TfidfModel,
    pub(crate) vectors: Vec<SparseVector>,
    pub(crate) similarity: SimilarityMatrix,
}

impl Model {
    /// Compose, vectorize and compute all-pairs similarity
    pub fn build(items: Vec<Item>, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let corpus = Corpus::new(items, config.duplicate_titles)?;
        Self::from_corpus(corpus, config)
    }

    pub fn from_corpus(corpus: Corpus, config: ModelConfig) -> Result<Self> {
        config.validate()?;

        let composer = FeatureComposer::new(&config.composer, &corpus);
        let documents = composer.compose_all(&corpus);
        let (vectorizer, vectors) = TfidfModel::fit_transform(&documents, &config.vectorizer)?;
        let similarity = SimilarityMatrix::compute(&vectors);

        info!(
            "Model built: {} items, {} terms",
            corpus.len(),
            vectorizer.vocabulary().len()
        );

        Ok(Self {
            config,
            corpus,
            documents,
            vectorizer,
            vectors,
            similarity,
        })
    }

    #[inline]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Composed content document of row `idx`
    pub fn document(&self, idx: usize) -> Option<&str> {
        self.documents.get(idx).map(String::as_str)
    }

    #[inline]
    pub fn vectorizer(&self) -> &TfidfModel {
        &self.vectorizer
    }

    #[inline]
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    #[inline]
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
