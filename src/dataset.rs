//! Loading of the three CSV datasets.
//!
//! Each dataset is read from a local file or fetched over HTTP, then
//! deserialized into typed records. The header row is checked against the
//! columns the record type needs before any row is parsed, so a schema
//! mismatch fails the load instead of producing empty matches later.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::timeout;

use crate::error::{LoadError, LookupError};
use crate::types::{HouseScoreRecord, SenateScoreRecord, ZipDistrictRecord};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_ZIP_CSV: &str = "zipcodes.csv";
const DEFAULT_HOUSE_CSV: &str = "scoreSheetHouse.csv";
const DEFAULT_SENATE_CSV: &str = "scoreSheetSenate.csv";
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The three tables a lookup joins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    ZipCodes,
    House,
    Senate,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZipCodes => write!(f, "ZIP code"),
            Self::House => write!(f, "House"),
            Self::Senate => write!(f, "Senate"),
        }
    }
}

/// A record type that can be read from one dataset
pub trait TableRecord: DeserializeOwned {
    const DATASET: Dataset;
    /// Header columns that must be present
    const COLUMNS: &'static [&'static str];
}

impl TableRecord for ZipDistrictRecord {
    const DATASET: Dataset = Dataset::ZipCodes;
    const COLUMNS: &'static [&'static str] = &["zcta", "state_abbr", "cd"];
}

impl TableRecord for HouseScoreRecord {
    const DATASET: Dataset = Dataset::House;
    const COLUMNS: &'static [&'static str] =
        &["DistrictNumber", "RepFirst", "RepLast", "totalScore"];
}

impl TableRecord for SenateScoreRecord {
    const DATASET: Dataset = Dataset::Senate;
    const COLUMNS: &'static [&'static str] = &["State", "RepFirst", "RepLast", "totalScore"];
}

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// Interpret a configured value: `http(s)://` URLs are fetched remotely,
    /// anything else is a path relative to `base_dir` (absolute paths win).
    pub fn parse(value: &str, base_dir: &Path) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::Path(base_dir.join(value))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Dataset locations and fetch settings
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub zip_codes: DatasetSource,
    pub house: DatasetSource,
    pub senate: DatasetSource,
    pub fetch_timeout: Duration,
}

impl DatasetConfig {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            zip_codes: DatasetSource::Path(dir.join(DEFAULT_ZIP_CSV)),
            house: DatasetSource::Path(dir.join(DEFAULT_HOUSE_CSV)),
            senate: DatasetSource::Path(dir.join(DEFAULT_SENATE_CSV)),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Read configuration from `REPSCORE_*` environment variables
    pub fn from_env() -> Self {
        let data_dir =
            PathBuf::from(env::var("REPSCORE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into()));
        let source = |key: &str, default: &str| {
            let value = env::var(key).unwrap_or_else(|_| default.to_string());
            DatasetSource::parse(&value, &data_dir)
        };

        Self {
            zip_codes: source("REPSCORE_ZIP_CSV", DEFAULT_ZIP_CSV),
            house: source("REPSCORE_HOUSE_CSV", DEFAULT_HOUSE_CSV),
            senate: source("REPSCORE_SENATE_CSV", DEFAULT_SENATE_CSV),
            fetch_timeout: env::var("REPSCORE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
        }
    }

    fn source(&self, dataset: Dataset) -> &DatasetSource {
        match dataset {
            Dataset::ZipCodes => &self.zip_codes,
            Dataset::House => &self.house,
            Dataset::Senate => &self.senate,
        }
    }
}

/// Parse CSV bytes into records, validating the header first
pub fn parse_table<R: TableRecord>(bytes: &[u8]) -> Result<Vec<R>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if let Some(missing) = R::COLUMNS
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(LoadError::MissingColumn(missing));
    }

    reader
        .deserialize()
        .collect::<Result<Vec<R>, csv::Error>>()
        .map_err(LoadError::from)
}

/// Reads datasets from their configured sources. Every call fetches fresh.
pub struct DatasetLoader {
    config: DatasetConfig,
    http_client: reqwest::Client,
}

impl DatasetLoader {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn load_zip_table(&self) -> Result<Vec<ZipDistrictRecord>, LookupError> {
        self.load().await
    }

    pub async fn load_house_table(&self) -> Result<Vec<HouseScoreRecord>, LookupError> {
        self.load().await
    }

    pub async fn load_senate_table(&self) -> Result<Vec<SenateScoreRecord>, LookupError> {
        self.load().await
    }

    async fn load<R: TableRecord>(&self) -> Result<Vec<R>, LookupError> {
        let source = self.config.source(R::DATASET);
        tracing::debug!("Loading {} data from {}", R::DATASET, source);

        let rows = self
            .fetch(source)
            .await
            .and_then(|bytes| parse_table::<R>(&bytes))
            .map_err(|source_err| {
                tracing::error!("Error loading {} data from {}: {}", R::DATASET, source, source_err);
                LookupError::Load {
                    dataset: R::DATASET,
                    source: source_err,
                }
            })?;

        tracing::debug!("Loaded {} {} rows", rows.len(), R::DATASET);
        Ok(rows)
    }

    async fn fetch(&self, source: &DatasetSource) -> Result<Vec<u8>, LoadError> {
        let limit = self.config.fetch_timeout;
        let fetch = async {
            match source {
                DatasetSource::Path(path) => Ok::<_, LoadError>(tokio::fs::read(path).await?),
                DatasetSource::Url(url) => {
                    let response = self.http_client.get(url).send().await?.error_for_status()?;
                    Ok(response.bytes().await?.to_vec())
                }
            }
        };

        timeout(limit, fetch)
            .await
            .map_err(|_| LoadError::Timeout(limit))?
    }
}
