//! Where commands read tasks from.

use clap::Args;
use std::path::PathBuf;
use taskline_core::source::load_timeline_data;
use taskline_core::storage::Config;
use taskline_core::{HttpSource, JsonFileSource, Project, Task};

/// Task input options shared by the read commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Read tasks from a JSON export instead of the API
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// API base URL (overrides config and TASKLINE_API_URL)
    #[arg(long, conflicts_with = "file")]
    pub api_url: Option<String>,
    /// Bearer token (overrides config and TASKLINE_TOKEN)
    #[arg(long, conflicts_with = "file")]
    pub token: Option<String>,
}

/// An opened task source.
pub enum Input {
    File(JsonFileSource),
    Http(HttpSource),
}

impl InputArgs {
    /// Load config and open the selected source.
    ///
    /// File reads never write a config file and tolerate a broken one; the
    /// API path loads it strictly and applies environment and flag overrides.
    pub fn open(&self) -> Result<(Config, Input), Box<dyn std::error::Error>> {
        if let Some(path) = &self.file {
            let source = JsonFileSource::new(path);
            tracing::debug!(path = %source.path().display(), "reading tasks from file");
            return Ok((Config::load_or_default(), Input::File(source)));
        }

        let config = Config::load()?
            .with_env_overrides()
            .apply_overrides(self.api_url.clone(), self.token.clone());
        let source = HttpSource::from_config(&config.api)?;
        tracing::debug!(base = %source.base_url(), "reading tasks from API");
        Ok((config, Input::Http(source)))
    }
}

impl Input {
    /// Fetch projects and tasks, blocking on a fresh runtime.
    pub fn load(
        &self,
        project_id: Option<&str>,
    ) -> Result<(Vec<Project>, Vec<Task>), Box<dyn std::error::Error>> {
        let runtime = tokio::runtime::Runtime::new()?;
        let data = match self {
            Input::File(source) => runtime.block_on(load_timeline_data(source, project_id))?,
            Input::Http(source) => runtime.block_on(load_timeline_data(source, project_id))?,
        };
        Ok(data)
    }
}
