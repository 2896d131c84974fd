//! Error types for the lookup pipeline

use std::time::Duration;

use thiserror::Error;

use crate::dataset::Dataset;

/// Failure to fetch or parse one dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks a column the record type needs
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors surfaced by a lookup, each rendered as a single red entry
#[derive(Error, Debug)]
pub enum LookupError {
    /// ZIP code is not exactly five digits
    #[error("invalid ZIP code {0:?}")]
    InvalidInput(String),

    #[error("failed to load {dataset} data: {source}")]
    Load {
        dataset: Dataset,
        #[source]
        source: LoadError,
    },

    /// No row matched the join key of the given dataset
    #[error("no match in {0} data")]
    NotFound(Dataset),
}

impl LookupError {
    /// Message shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Please enter a valid 5-digit zip code.",
            Self::Load { dataset, .. } => match dataset {
                Dataset::ZipCodes => "Error loading ZIP code data.",
                Dataset::House => "Error loading House representative data.",
                Dataset::Senate => "Error loading Senate representative data.",
            },
            Self::NotFound(dataset) => match dataset {
                Dataset::ZipCodes => "No matching district found for this ZIP code.",
                Dataset::House => "No matching House representative found for this district.",
                Dataset::Senate => "No matching Senate representatives found for this state.",
            },
        }
    }
}
