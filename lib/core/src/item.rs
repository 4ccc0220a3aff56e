use serde::{Deserialize, Serialize};
use crate::popularity::parse_popularity_opt;
use crate::Error;

/// Filled in for items without a writer
pub const UNKNOWN_WRITER: &str = "Unknown Writer";
/// Filled in for items without a genre
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Raw update label that marks a finished series
pub const COMPLETED_LABEL: &str = "COMPLETED";

/// Identifier of an item as found in the source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id)
    }
}

/// Publication status derived from the update schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Completed,
    Ongoing,
}

impl Status {
    /// `Completed` only when the label is exactly `"COMPLETED"`
    pub fn from_update_label(label: &str) -> Self {
        if label == COMPLETED_LABEL {
            Status::Completed
        } else {
            Status::Ongoing
        }
    }
}

/// One row of the source table, before normalization.
///
/// Column names follow the webtoon dataset header. The id is kept as text
/// so one unreadable id does not fail the whole table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Likes", default)]
    pub likes: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Subscribers", default)]
    pub subscribers: Option<String>,
    #[serde(rename = "Summary", default)]
    pub summary: Option<String>,
    #[serde(rename = "Update", default)]
    pub update: Option<String>,
    #[serde(rename = "Reading Link", default)]
    pub reading_link: Option<String>,
}

/// A normalized, strongly typed content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub writer: String,
    pub genre: String,
    pub rating: Option<f64>,
    pub likes: Option<f64>,
    pub subscribers: Option<f64>,
    pub summary: String,
    pub update: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_link: Option<String>,
}

impl Item {
    /// Build an item with sentinel writer/genre and no counters.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            writer: UNKNOWN_WRITER.to_string(),
            genre: UNCATEGORIZED.to_string(),
            rating: None,
            likes: None,
            subscribers: None,
            summary: String::new(),
            update: String::new(),
            status: Status::Ongoing,
            reading_link: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_writer(mut self, writer: &str) -> Self {
        self.writer = normalize_or(Some(writer), UNKNOWN_WRITER);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = normalize_or(Some(genre), UNCATEGORIZED);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_update(mut self, label: &str) -> Self {
        self.update = label.to_string();
        self.status = Status::from_update_label(label);
        self
    }

    /// Lowercased summary with every non-word, non-space character
    /// replaced by a single space.
    pub fn clean_summary(&self) -> String {
        clean_text(&self.summary)
    }
}

impl TryFrom<RawRecord> for Item {
    type Error = Error;

    /// Fails only when the id is missing or not a non-negative integer
    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "row {:?} has no numeric id (got {:?})",
                    raw.name, raw.id
                ))
            })?;
        let rating = raw
            .rating
            .as_deref()
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite());
        let update = raw.update.unwrap_or_default();

        Ok(Self {
            id: ItemId(id),
            title: raw.name,
            writer: normalize_or(raw.writer.as_deref(), UNKNOWN_WRITER),
            genre: normalize_or(raw.genre.as_deref(), UNCATEGORIZED),
            rating,
            likes: parse_popularity_opt(raw.likes.as_deref()),
            subscribers: parse_popularity_opt(raw.subscribers.as_deref()),
            summary: raw.summary.unwrap_or_default(),
            status: Status::from_update_label(&update),
            update,
            reading_link: raw.reading_link.filter(|l| !l.trim().is_empty()),
        })
    }
}

fn normalize_or(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}

/// Word characters are alphanumerics and `_`
#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase and blank out punctuation, keeping whitespace as-is
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_label() {
        assert_eq!(Status::from_update_label("COMPLETED"), Status::Completed);
        assert_eq!(Status::from_update_label("Completed"), Status::Ongoing);
        assert_eq!(Status::from_update_label("UP EVERY SATURDAY"), Status::Ongoing);
        assert_eq!(Status::from_update_label(""), Status::Ongoing);
    }

    #[test]
    fn test_raw_record_normalization() {
        let raw = RawRecord {
            id: Some(" 7 ".to_string()),
            name: "Tower of God".to_string(),
            writer: None,
            likes: Some("1.2M".to_string()),
            genre: Some("  ".to_string()),
            rating: Some("9.84".to_string()),
            subscribers: Some("N/A".to_string()),
            summary: None,
            update: Some("COMPLETED".to_string()),
            reading_link: Some(String::new()),
        };

        let item = Item::try_from(raw).unwrap();
        assert_eq!(item.id, ItemId(7));
        assert_eq!(item.writer, UNKNOWN_WRITER);
        assert_eq!(item.genre, UNCATEGORIZED);
        assert_eq!(item.likes, Some(1_200_000.0));
        assert_eq!(item.subscribers, None);
        assert_eq!(item.rating, Some(9.84));
        assert_eq!(item.summary, "");
        assert_eq!(item.status, Status::Completed);
        assert!(item.reading_link.is_none());
    }

    #[test]
    fn test_unreadable_id_is_rejected() {
        for id in [None, Some(""), Some("abc"), Some("-3"), Some("1.5")] {
            let raw = RawRecord {
                id: id.map(str::to_string),
                name: "Nameless".to_string(),
                ..Default::default()
            };
            assert!(matches!(Item::try_from(raw), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_rating_keeps_full_precision() {
        let raw = RawRecord {
            id: Some("1".to_string()),
            name: "A".to_string(),
            rating: Some("9.84".to_string()),
            ..Default::default()
        };
        let item = Item::try_from(raw).unwrap();
        assert_eq!(item.rating, Some(9.84_f64));

        let raw = RawRecord {
            id: Some("2".to_string()),
            name: "B".to_string(),
            rating: Some("NaN".to_string()),
            ..Default::default()
        };
        assert_eq!(Item::try_from(raw).unwrap().rating, None);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("Hero's Journey!"), "hero s journey ");
        assert_eq!(clean_text("snake_case stays"), "snake_case stays");
        assert_eq!(clean_text("a-b\tc"), "a b\tc");
    }

    #[test]
    fn test_builder_sentinels() {
        let item = Item::new(1, "A").with_writer("").with_genre("Action");
        assert_eq!(item.writer, UNKNOWN_WRITER);
        assert_eq!(item.genre, "Action");
    }
}
