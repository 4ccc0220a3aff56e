use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("Empty vocabulary: every document is empty after stop-word removal")]
    EmptyVocabulary,

    #[error("Duplicate title '{title}' at rows {first} and {second}")]
    DuplicateTitle {
        title: String,
        first: usize,
        second: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for per-item failures a caller can report and move past
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ItemNotFound(_))
    }
}
