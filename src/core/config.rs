use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SheetSources {
    pub budget: String,
    pub expenses: String,
    pub capital: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub photos_folder: Option<String>,
    pub sources: SheetSources,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub retries: usize,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    format!("obra/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            user_agent: default_user_agent(),
            retries: 0,
            timeout_secs: None,
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub projects: BTreeMap<String, ProjectConfig>,
    #[serde(default)]
    pub default_project: Option<String>,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub http: HttpConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "obra", "obra")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Picks the project to show.
    ///
    /// An explicit key wins, then the project whose password matches, then
    /// `default_project`, then the only configured project. A project with a
    /// password is only returned when the matching password is given.
    pub fn select_project(
        &self,
        key: Option<&str>,
        password: Option<&str>,
    ) -> Result<(&str, &ProjectConfig)> {
        let selected = match (key, password) {
            (Some(key), _) => self
                .projects
                .get_key_value(key)
                .ok_or_else(|| anyhow!("Unknown project: {key}"))?,
            (None, Some(password)) => self
                .projects
                .iter()
                .find(|(_, p)| p.password.as_deref() == Some(password))
                .ok_or_else(|| anyhow!("No project matches the given password"))?,
            (None, None) => match &self.default_project {
                Some(default) => self
                    .projects
                    .get_key_value(default.as_str())
                    .ok_or_else(|| anyhow!("Default project not configured: {default}"))?,
                None if self.projects.len() == 1 => self
                    .projects
                    .iter()
                    .next()
                    .context("No projects configured")?,
                None => bail!("Several projects configured, choose one with --project"),
            },
        };

        let (key, project) = selected;
        match (project.password.as_deref(), password) {
            (Some(_), None) => bail!("Password required for project: {key}"),
            (Some(expected), Some(given)) if expected != given => {
                bail!("Wrong password for project: {key}")
            }
            _ => {}
        }
        debug!("Selected project {}", key);
        Ok((key.as_str(), project))
    }
}
