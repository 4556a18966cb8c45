use crate::core::config::{HttpConfig, ProjectConfig};
use crate::core::model::ProjectSnapshot;
use crate::core::parser::{SheetTexts, parse_project};
use crate::core::project::ProjectProvider;
use crate::providers::util::with_retry;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

const RETRY_DELAY_MS: u64 = 500;

/// Loads projects from spreadsheets published as CSV.
pub struct PublishedSheetsProvider {
    client: reqwest::Client,
    retries: usize,
}

impl PublishedSheetsProvider {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&http.user_agent);
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            retries: http.retries,
        })
    }

    async fn fetch_sheet(&self, sheet: &str, url: &str) -> Result<String> {
        debug!("Requesting {} sheet from {}", sheet, url);
        let response = with_retry(
            || async { self.client.get(url).send().await?.error_for_status() },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
        .with_context(|| format!("Failed to fetch {sheet} sheet from {url}"))?;

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read {sheet} sheet from {url}"))?;
        debug!("Received {} bytes for {} sheet", text.len(), sheet);
        Ok(text)
    }
}

#[async_trait]
impl ProjectProvider for PublishedSheetsProvider {
    #[instrument(skip(self, project), fields(project = %project.name))]
    async fn fetch_project(
        &self,
        key: &str,
        project: &ProjectConfig,
    ) -> Result<Arc<ProjectSnapshot>> {
        let sources = &project.sources;
        let (budget, expenses, capital) = futures::try_join!(
            self.fetch_sheet("budget", &sources.budget),
            self.fetch_sheet("expenses", &sources.expenses),
            self.fetch_sheet("capital", &sources.capital),
        )
        .with_context(|| format!("Failed to load project: {key}"))?;

        let data = parse_project(&SheetTexts {
            budget,
            expenses,
            capital,
        });
        info!(
            expenses = data.expenses.len(),
            houses = data.budget.houses.len(),
            "Loaded project {}",
            key
        );

        Ok(Arc::new(ProjectSnapshot {
            key: key.to_string(),
            name: project.name.clone(),
            fetched_at: Utc::now(),
            data,
        }))
    }
}
