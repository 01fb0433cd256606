//! Ordered data sources for reference data (cities, services).
//!
//! Each source is one strategy behind `DataSource<T>`. Sources are tried in
//! order and the first non-empty list wins; errors and empty results are
//! logged and fall through to the next source.

use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{decode_records, Record};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// One place reference data can come from.
///
/// `Ok(None)` means the source is absent or not configured; it is not an error.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_all(&self) -> Result<Option<Vec<T>>, SourceError>;
}

/// Tries each source in order and returns the first non-empty result.
/// Returns an empty list only when every source came up empty.
pub async fn load_first_non_empty<T>(sources: &[Box<dyn DataSource<T>>]) -> Vec<T> {
    for source in sources {
        match source.fetch_all().await {
            Ok(Some(records)) if !records.is_empty() => {
                info!("Loaded {} records from {}", records.len(), source.name());
                return records;
            }
            Ok(Some(_)) => warn!("Source {} returned no valid records, falling back", source.name()),
            Ok(None) => info!("Source {} unavailable, falling back", source.name()),
            Err(e) => warn!("Source {} failed, falling back: {e}", source.name()),
        }
    }

    warn!("All data sources came up empty");
    Vec::new()
}

/// A JSON array on disk. A missing file is `Ok(None)`; unreadable or malformed JSON is an error.
pub struct JsonFileSource<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileSource<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record + Send + 'static> DataSource<T> for JsonFileSource<T> {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn fetch_all(&self) -> Result<Option<Vec<T>>, SourceError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SourceError::Io {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        let values: Vec<Value> = serde_json::from_str(&contents)?;
        Ok(Some(decode_records(values)))
    }
}

/// A fixed in-memory list; the last link of every chain.
pub struct StaticSource<T> {
    records: Vec<T>,
}

impl<T> StaticSource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> DataSource<T> for StaticSource<T> {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_all(&self) -> Result<Option<Vec<T>>, SourceError> {
        Ok(Some(self.records.clone()))
    }
}
