use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UniversityData;
use crate::services::loader::UniversitySource;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Dataset reload produced no universities")]
    EmptyDataset,
}

const DATASET_KEY: &str = "universities";

/// Process-wide cache of the university dataset
///
/// The dataset is loaded through the injected source on first use and kept
/// until invalidated or until the TTL (if any) expires. Empty loads are not
/// cached, so a failed fetch is retried by the next caller.
pub struct UniversityCache<S> {
    source: S,
    cache: moka::future::Cache<&'static str, Arc<Vec<UniversityData>>>,
}

impl<S: UniversitySource> UniversityCache<S> {
    /// Create a new cache; a `ttl_secs` of zero keeps the dataset indefinitely
    pub fn new(source: S, ttl_secs: u64) -> Self {
        let mut builder = moka::future::CacheBuilder::new(1);
        if ttl_secs > 0 {
            builder = builder.time_to_live(Duration::from_secs(ttl_secs));
        }

        Self {
            source,
            cache: builder.build(),
        }
    }

    /// Get the dataset, loading it if not cached
    pub async fn get(&self) -> Arc<Vec<UniversityData>> {
        if let Some(dataset) = self.cache.get(&DATASET_KEY).await {
            tracing::trace!("University cache hit ({} entries)", dataset.len());
            return dataset;
        }

        let loaded = self
            .cache
            .optionally_get_with(DATASET_KEY, async {
                let universities = self.source.load().await;
                if universities.is_empty() {
                    None
                } else {
                    Some(Arc::new(universities))
                }
            })
            .await;

        match loaded {
            Some(dataset) => {
                tracing::debug!("University cache populated with {} entries", dataset.len());
                dataset
            }
            None => {
                tracing::warn!("University dataset unavailable, serving empty collection");
                Arc::default()
            }
        }
    }

    /// Drop the cached dataset
    pub async fn invalidate(&self) {
        self.cache.invalidate(&DATASET_KEY).await;
        tracing::debug!("Invalidated university cache");
    }

    /// Invalidate and reload the dataset
    pub async fn refresh(&self) -> Result<Arc<Vec<UniversityData>>, CacheError> {
        self.invalidate().await;
        let dataset = self.get().await;
        if dataset.is_empty() {
            return Err(CacheError::EmptyDataset);
        }
        Ok(dataset)
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let universities = self
            .cache
            .get(&DATASET_KEY)
            .await
            .map(|dataset| dataset.len())
            .unwrap_or(0);

        CacheStats {
            loaded: universities > 0,
            universities,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub loaded: bool,
    pub universities: usize,
}
