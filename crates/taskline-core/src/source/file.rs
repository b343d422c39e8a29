//! Task source backed by a JSON export on disk.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::TaskSource;
use crate::error::{Result, SourceError};
use crate::task::{Project, Task};

/// Reads a JSON file holding either a task array or
/// `{ "projects": [...], "tasks": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Value> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        let doc = serde_json::from_str(&content).map_err(|source| self.malformed(source))?;
        Ok(doc)
    }

    fn malformed(&self, source: serde_json::Error) -> SourceError {
        SourceError::Malformed {
            origin: self.path.display().to_string(),
            source,
        }
    }

    /// Non-array sections are treated as empty.
    fn section<T: DeserializeOwned>(&self, doc: &Value, key: &str) -> Result<Vec<T>> {
        let section = match doc {
            Value::Array(_) if key == "tasks" => doc,
            Value::Object(map) => match map.get(key) {
                Some(value @ Value::Array(_)) => value,
                _ => return Ok(Vec::new()),
            },
            _ => return Ok(Vec::new()),
        };
        let items = Vec::<T>::deserialize(section).map_err(|e| self.malformed(e))?;
        Ok(items)
    }
}

impl TaskSource for JsonFileSource {
    async fn fetch_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let doc = self.read_document()?;
        let mut tasks: Vec<Task> = self.section(&doc, "tasks")?;
        if let Some(pid) = project_id.filter(|p| !p.is_empty()) {
            tasks.retain(|t| t.project_id.as_deref() == Some(pid));
        }
        tracing::debug!(path = %self.path.display(), tasks = tasks.len(), "read tasks from file");
        Ok(tasks)
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>> {
        let doc = self.read_document()?;
        self.section(&doc, "projects")
    }
}
