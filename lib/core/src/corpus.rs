use crate::{Error, Item, ItemId, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when two items share a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the build with [`Error::DuplicateTitle`]
    #[default]
    Reject,
    /// The earliest row keeps the title
    KeepFirst,
    /// The latest row keeps the title
    KeepLast,
}

/// An ordered, immutable collection of items.
///
/// The position of an item is its row and column in every derived matrix.
#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<Item>,
    by_title: AHashMap<String, usize>,
    by_id: AHashMap<ItemId, usize>,
}

impl Corpus {
    pub fn new(items: Vec<Item>, policy: DuplicatePolicy) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut by_title: AHashMap<String, usize> = AHashMap::with_capacity(items.len());
        let mut by_id = AHashMap::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            by_id.entry(item.id).or_insert(idx);

            match by_title.get(&item.title).copied() {
                None => {
                    by_title.insert(item.title.clone(), idx);
                }
                Some(first) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateTitle {
                            title: item.title.clone(),
                            first,
                            second: idx,
                        });
                    }
                    DuplicatePolicy::KeepFirst => {
                        warn!("Duplicate title {:?} at row {}, keeping row {}", item.title, idx, first);
                    }
                    DuplicatePolicy::KeepLast => {
                        warn!("Duplicate title {:?} at row {}, replacing row {}", item.title, idx, first);
                        by_title.insert(item.title.clone(), idx);
                    }
                },
            }
        }

        debug!("Corpus built with {} items", items.len());
        Ok(Self { items, by_title, by_id })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Item> {
        self.items.get(idx)
    }

    /// Row of the item with exactly this title
    pub fn index_of(&self, title: &str) -> Result<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| Error::ItemNotFound(title.to_string()))
    }

    pub fn index_of_id(&self, id: ItemId) -> Result<usize> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or_else(|| Error::ItemNotFound(format!("id {}", id)))
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.title.as_str())
    }

    /// Distinct genres in first-seen order
    pub fn genres(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        self.items
            .iter()
            .map(|i| i.genre.as_str())
            .filter(|g| seen.insert(*g))
            .collect()
    }

    /// Writer → space-joined genres of all their works, in corpus order
    pub fn writer_styles(&self) -> AHashMap<String, String> {
        let mut styles: AHashMap<String, String> = AHashMap::new();
        for item in &self.items {
            styles
                .entry(item.writer.clone())
                .and_modify(|s| {
                    s.push(' ');
                    s.push_str(&item.genre);
                })
                .or_insert_with(|| item.genre.clone());
        }
        styles
    }
}
