//! Feature composition
//!
//! Turns an item into the one text document that gets vectorized:
//! `genre + " " + writer + " " + cleaned_summary`.

use crate::{Corpus, Item};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Append every genre the writer has worked on to the document
    #[serde(default)]
    pub include_writer_style: bool,
}

/// Compose the content document of a single item
pub fn compose(item: &Item) -> String {
    format!("{} {} {}", item.genre, item.writer, item.clean_summary())
}

/// Builds documents for a whole corpus
#[derive(Debug, Clone, Default)]
pub struct FeatureComposer {
    writer_styles: Option<AHashMap<String, String>>,
}

impl FeatureComposer {
    pub fn new(config: &ComposerConfig, corpus: &Corpus) -> Self {
        let writer_styles = config.include_writer_style.then(|| corpus.writer_styles());
        Self { writer_styles }
    }

    pub fn compose(&self, item: &Item) -> String {
        let mut doc = compose(item);
        if let Some(style) = self
            .writer_styles
            .as_ref()
            .and_then(|styles| styles.get(&item.writer))
        {
            doc.push(' ');
            doc.push_str(style);
        }
        doc
    }

    /// One document per item, in corpus order
    pub fn compose_all(&self, corpus: &Corpus) -> Vec<String> {
        corpus.items().iter().map(|item| self.compose(item)).collect()
    }
}
