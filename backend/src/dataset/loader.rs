use std::{path::PathBuf, sync::Arc, time::Instant};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{info, warn};

use crate::midwares::app_state::AppError;
use super::{parser::parse_dataset, record::RawTable};

/// Where the raw CSV bytes come from. Swapped for an in-memory fixture in tests.
#[async_trait]
pub trait DatasetSource: Send + Sync {
  /// Stable identifier of the dataset, used as the cache key.
  fn location(&self) -> &str;
  async fn fetch(&self) -> Result<Vec<u8>, AppError>;
}

pub struct HttpSource {
  client: reqwest::Client,
  url: String,
}

impl HttpSource {
  pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

#[async_trait]
impl DatasetSource for HttpSource {
  fn location(&self) -> &str {
    &self.url
  }

  async fn fetch(&self) -> Result<Vec<u8>, AppError> {
    let response = self.client.get(&self.url)
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|e| AppError::FetchError(format!("GET {} failed: {}", self.url, e)))?;

    let body = response.bytes()
      .await
      .map_err(|e| AppError::FetchError(format!("reading body of {} failed: {}", self.url, e)))?;

    Ok(body.to_vec())
  }
}

/// Local copy of the dataset, handy when working offline.
pub struct FileSource {
  path: PathBuf,
  location: String,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let location = path.display().to_string();
    Self { path, location }
  }
}

#[async_trait]
impl DatasetSource for FileSource {
  fn location(&self) -> &str {
    &self.location
  }

  async fn fetch(&self) -> Result<Vec<u8>, AppError> {
    tokio::fs::read(&self.path)
      .await
      .map_err(|e| AppError::FetchError(format!("reading {} failed: {}", self.location, e)))
  }
}

/// Picks the source implementation from the shape of the configured location.
pub fn source_for(location: &str, client: reqwest::Client) -> Arc<dyn DatasetSource> {
  if location.starts_with("http://") || location.starts_with("https://") {
    Arc::new(HttpSource::new(client, location))
  } else {
    Arc::new(FileSource::new(location))
  }
}

/// Process-wide memo of the parsed raw table, keyed on the source location.
/// Concurrent first requests share a single fetch; failures are not cached.
#[derive(Clone)]
pub struct DatasetCache {
  source: Arc<dyn DatasetSource>,
  tables: Cache<String, Arc<RawTable>>,
}

impl DatasetCache {
  pub fn new(source: Arc<dyn DatasetSource>) -> Self {
    Self {
      source,
      tables: Cache::builder().max_capacity(1).build(),
    }
  }

  pub fn location(&self) -> &str {
    self.source.location()
  }

  pub async fn get(&self) -> Result<Arc<RawTable>, AppError> {
    let source = self.source.clone();
    let load = async move {
      let start = Instant::now();
      let contents = source.fetch().await?;
      let table = parse_dataset(&contents)?;
      info!(location = source.location(), rows = table.len(), bytes = contents.len(), elapsed = ?start.elapsed(), "dataset loaded");
      Ok::<_, AppError>(Arc::new(table))
    };

    self.tables.try_get_with(self.location().to_string(), load)
      .await
      .map_err(|e| {
        warn!(location = self.location(), error = %e, "dataset load failed");
        (*e).clone()
      })
  }

  /// Forgets the memoized table so the next `get` fetches again.
  pub async fn clear(&self) {
    self.tables.invalidate(self.location()).await;
    info!(location = self.location(), "dataset cache cleared");
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::Ordering;
  use crate::dataset::testing::{StaticSource, SAMPLE_CSV};
  use super::*;

  #[tokio::test]
  async fn loads_once_and_memoizes() {
    let source = Arc::new(StaticSource::new(SAMPLE_CSV));
    let cache = DatasetCache::new(source.clone());

    let first = cache.get().await.expect("fixture parses");
    let second = cache.get().await.expect("fixture parses");

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 6);
  }

  #[tokio::test]
  async fn concurrent_first_requests_share_one_fetch() {
    let source = Arc::new(StaticSource::new(SAMPLE_CSV));
    let cache = DatasetCache::new(source.clone());

    let (a, b, c) = tokio::join!(cache.get(), cache.get(), cache.get());
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn clear_forces_a_refetch() {
    let source = Arc::new(StaticSource::new(SAMPLE_CSV));
    let cache = DatasetCache::new(source.clone());

    cache.get().await.expect("fixture parses");
    cache.clear().await;
    cache.get().await.expect("fixture parses");

    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn failures_surface_and_are_not_cached() {
    let source = Arc::new(StaticSource::new("name,symbol\nBitcoin,btc\n"));
    let cache = DatasetCache::new(source.clone());

    assert!(matches!(cache.get().await, Err(AppError::MissingColumns(_))));
    assert!(matches!(cache.get().await, Err(AppError::MissingColumns(_))));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn missing_file_is_a_fetch_error() {
    let source = FileSource::new("/definitely/not/here.csv");
    assert!(matches!(source.fetch().await, Err(AppError::FetchError(_))));
  }

  #[test]
  fn picks_source_by_scheme() {
    let client = reqwest::Client::new();
    assert_eq!(source_for("https://example.com/a.csv", client.clone()).location(), "https://example.com/a.csv");
    assert_eq!(source_for("data/a.csv", client).location(), "data/a.csv");
  }
}
