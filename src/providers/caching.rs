use crate::core::cache::Cache;
use crate::core::config::ProjectConfig;
use crate::core::model::ProjectSnapshot;
use crate::core::project::ProjectProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub type SnapshotCache = dyn Cache<String, Arc<ProjectSnapshot>>;

/// Keeps the last successful snapshot of each project for `ttl`.
///
/// Failed loads are not cached. Two loads running at the same time for the
/// same key both reach the inner provider.
pub struct CachingProjectProvider<T: ProjectProvider> {
    inner: T,
    cache: Arc<SnapshotCache>,
    ttl: Duration,
}

impl<T: ProjectProvider> CachingProjectProvider<T> {
    pub fn new(inner: T, cache: Arc<SnapshotCache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    async fn load_and_store(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>> {
        let snapshot = self.inner.fetch_project(key, project).await?;
        self.cache
            .put(key.to_string(), Arc::clone(&snapshot), Some(self.ttl))
            .await;
        Ok(snapshot)
    }
}

#[async_trait]
impl<T: ProjectProvider + Send + Sync> ProjectProvider for CachingProjectProvider<T> {
    async fn fetch_project(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>> {
        if let Some(snapshot) = self.cache.get(&key.to_string()).await {
            debug!("Cache hit for project: {}", key);
            return Ok(snapshot);
        }
        debug!("Cache miss for project: {}", key);
        self.load_and_store(key, project).await
    }

    async fn refresh_project(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>> {
        debug!("Refreshing project: {}", key);
        self.cache.remove(&key.to_string()).await;
        self.load_and_store(key, project).await
    }
}
