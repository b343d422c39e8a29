//! Where tasks and projects come from.
//!
//! The dashboard backend is an external collaborator; this module only reads
//! from it. [`JsonFileSource`] serves exported payloads from disk and
//! [`HttpSource`] talks to the REST API.

mod file;
mod http;

use std::future::Future;

use crate::error::Result;
use crate::task::{Project, Task};

pub use file::JsonFileSource;
pub use http::{normalize_base_url, HttpSource};

/// Read-only access to tasks and projects.
pub trait TaskSource {
    /// Tasks, optionally restricted to one project.
    fn fetch_tasks(&self, project_id: Option<&str>) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// All projects visible to the caller.
    fn fetch_projects(&self) -> impl Future<Output = Result<Vec<Project>>> + Send;
}

/// Fetch projects and tasks concurrently.
pub async fn load_timeline_data<S: TaskSource + Sync>(
    source: &S,
    project_id: Option<&str>,
) -> Result<(Vec<Project>, Vec<Task>)> {
    let (projects, tasks) = tokio::try_join!(source.fetch_projects(), source.fetch_tasks(project_id))?;
    tracing::debug!(projects = projects.len(), tasks = tasks.len(), "loaded timeline data");
    Ok((projects, tasks))
}
