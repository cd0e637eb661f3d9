use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Id prefix marking a task created on this device.
pub const LOCAL_TASK_PREFIX: &str = "local-";

/// A single task inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Task body. Older template records store this under `title`.
    #[serde(alias = "title", default)]
    pub description: String,
    /// Image reference (upload is not wired up, so this is only ever set by hand)
    #[serde(default)]
    pub image: Option<String>,
    /// Never toggled; kept so stored records keep their shape
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Create a not-done task
    pub fn new(id: String, description: String, image: Option<String>) -> Self {
        Task {
            id,
            description,
            image,
            done: false,
            extra: Map::new(),
        }
    }

    /// Whether this task was created locally and has not been reconciled
    /// with any other source.
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(LOCAL_TASK_PREFIX)
    }

    /// Text shown in the pending list
    pub fn display_text(&self) -> &str {
        if self.description.is_empty() {
            "new item"
        } else {
            &self.description
        }
    }
}

/// The values being composed in the task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub description: String,
    pub image: Option<String>,
}

impl TaskDraft {
    pub fn new(description: impl Into<String>, image: Option<String>) -> Self {
        TaskDraft {
            description: description.into(),
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_decided_by_prefix() {
        let local = Task::new("local-01J0".into(), "fix".into(), None);
        let other = Task::new("t1".into(), "fix".into(), None);
        assert!(local.is_pending());
        assert!(!other.is_pending());
    }

    #[test]
    fn test_legacy_title_key_reads_as_description() {
        let task: Task = serde_json::from_str(r#"{"id":"t2","title":"Example B","done":true}"#).unwrap();
        assert_eq!(task.description, "Example B");
        assert!(task.done);
        assert!(task.image.is_none());
        assert!(task.extra.is_empty());
    }

    #[test]
    fn test_null_image_round_trips_as_null() {
        let task = Task::new("local-1".into(), "a".into(), None);
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":"local-1","description":"a","image":null,"done":false}"#);
    }

    #[test]
    fn test_empty_description_displays_placeholder() {
        let task = Task::new("local-1".into(), String::new(), None);
        assert_eq!(task.display_text(), "new item");
    }
}
