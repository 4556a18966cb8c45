//! Project loading abstractions

use crate::core::config::ProjectConfig;
use crate::core::model::ProjectSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ProjectProvider: Send + Sync {
    /// Fetches and parses all sheets of `project`, published under `key`.
    async fn fetch_project(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>>;

    /// Like [`ProjectProvider::fetch_project`] but bypasses any cached copy.
    async fn refresh_project(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>> {
        self.fetch_project(key, project).await
    }
}
