pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::ui;
use crate::core::analytics::{self, ExpenseFilter};
use crate::core::config::{AppConfig, ProjectConfig};
use crate::core::model::ProjectSnapshot;
use crate::core::project::ProjectProvider;
use crate::providers::{CachingProjectProvider, PublishedSheetsProvider, SnapshotCache};
use crate::store::MemoryCache;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Summary,
    Budget,
    Indicators,
    Houses,
    Sales,
    Expenses {
        filter: ExpenseFilter,
        limit: Option<usize>,
    },
    Export,
}

/// Options shared by every command that shows a project.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub project: Option<String>,
    pub password: Option<String>,
    /// Skip any cached copy and fetch the sheets again.
    pub refresh: bool,
}

/// Loads configured projects through a shared snapshot cache.
pub struct Dashboard {
    config: AppConfig,
    provider: CachingProjectProvider<PublishedSheetsProvider>,
}

impl Dashboard {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache: Arc<SnapshotCache> = Arc::new(MemoryCache::<String, Arc<ProjectSnapshot>>::new());
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: AppConfig, cache: Arc<SnapshotCache>) -> Result<Self> {
        let inner = PublishedSheetsProvider::new(&config.http)?;
        let provider = CachingProjectProvider::new(inner, cache, config.cache_ttl());
        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolves the project from `key`/`password` and returns its snapshot.
    pub async fn load(
        &self,
        key: Option<&str>,
        password: Option<&str>,
        refresh: bool,
    ) -> Result<(&ProjectConfig, Arc<ProjectSnapshot>)> {
        let (key, project) = self.config.select_project(key, password)?;
        let snapshot = if refresh {
            self.provider.refresh_project(key, project).await?
        } else {
            self.provider.fetch_project(key, project).await?
        };
        Ok((project, snapshot))
    }
}

/// Renders `command` for an already loaded project.
pub fn render(
    command: &AppCommand,
    project: &ProjectConfig,
    snapshot: &ProjectSnapshot,
) -> Result<String> {
    let data = &snapshot.data;
    let output = match command {
        AppCommand::Summary => {
            cli::summary::render(snapshot, project.photos_folder.as_deref())
        }
        AppCommand::Budget => {
            cli::budget::display_budget(&analytics::budget_vs_actual(data))
        }
        AppCommand::Indicators => cli::indicators::display_indicators(&data.capital),
        AppCommand::Houses => cli::houses::display_houses(&data.budget.houses),
        AppCommand::Sales => analytics::sales_summary(&data.budget).display_as_table(),
        AppCommand::Expenses { filter, limit } => {
            cli::expenses::display_expenses(&data.expenses, filter, *limit)
        }
        AppCommand::Export => cli::export::export_json(snapshot)?,
    };
    Ok(output)
}

pub async fn run_command(command: AppCommand, options: &RunOptions) -> Result<()> {
    info!("obra starting...");

    let config = match options.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded {} project(s) from config", config.projects.len());

    let dashboard = Dashboard::new(config)?;

    let spinner = ui::new_spinner("Loading project sheets...");
    let loaded = dashboard
        .load(
            options.project.as_deref(),
            options.password.as_deref(),
            options.refresh,
        )
        .await;
    spinner.finish_and_clear();
    let (project, snapshot) = loaded?;

    let output = render(&command, project, &snapshot)?;
    println!("{output}");
    Ok(())
}
