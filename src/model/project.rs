use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::task::Task;

/// Id prefix marking a project created on this device.
pub const LOCAL_PROJECT_PREFIX: &str = "local-project-";

/// A project (called a "customer" on the list surface; same entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Absent until the first task is added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    /// Fields this model doesn't know about, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Create a bare project with just an id and a name
    pub fn new(id: String, name: String) -> Self {
        Project {
            id,
            name,
            description: None,
            created_at: None,
            tasks: None,
            extra: Map::new(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_PROJECT_PREFIX)
    }

    /// Tasks in stored order, empty when none were ever added
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or(&[])
    }

    /// Locally created tasks, in stored order
    pub fn pending_tasks(&self) -> Vec<Task> {
        self.tasks().iter().filter(|t| t.is_pending()).cloned().collect()
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == task_id)
    }

    /// The `{id, name}` shape stored in the list collection
    pub fn summary(&self) -> Project {
        Project::new(self.id.clone(), self.name.clone())
    }
}
