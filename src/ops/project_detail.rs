use tracing::debug;

use crate::model::task::TaskDraft;
use crate::ops::task_store::{ProjectTasks, ResolvedProject, SavedTask, TaskError};

/// The add/edit form on the detail surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskForm {
    #[default]
    Idle,
    Composing {
        /// `Some` when editing an existing task, `None` when adding
        editing_task_id: Option<String>,
        draft: TaskDraft,
    },
}

impl TaskForm {
    pub fn is_open(&self) -> bool {
        matches!(self, TaskForm::Composing { .. })
    }

    fn draft_mut(&mut self) -> Result<&mut TaskDraft, TaskError> {
        match self {
            TaskForm::Composing { draft, .. } => Ok(draft),
            TaskForm::Idle => Err(TaskError::FormNotOpen),
        }
    }
}

/// State behind the project detail surface: the resolved project, its
/// pending tasks and the task form.
pub struct ProjectDetail {
    tasks: ProjectTasks,
    view: ResolvedProject,
    form: TaskForm,
}

impl ProjectDetail {
    /// Resolve `id` and open the surface on it
    pub async fn open(tasks: ProjectTasks, id: &str) -> Self {
        let view = tasks.resolve(id).await;
        debug!(requested = id, resolved = %view.project.id, origin = ?view.origin, "detail opened");
        ProjectDetail {
            tasks,
            view,
            form: TaskForm::Idle,
        }
    }

    pub fn view(&self) -> &ResolvedProject {
        &self.view
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Open an empty form for a new task
    pub fn add(&mut self) {
        self.form = TaskForm::Composing {
            editing_task_id: None,
            draft: TaskDraft::default(),
        };
    }

    /// Open the form on an existing task, looked up among pending tasks
    /// first and then all tasks. Returns false (form unchanged) when the
    /// id matches nothing.
    pub fn edit(&mut self, task_id: &str) -> bool {
        let found = self
            .view
            .pending
            .iter()
            .find(|t| t.id == task_id)
            .or_else(|| self.view.project.find_task(task_id));
        let Some(task) = found else {
            return false;
        };
        self.form = TaskForm::Composing {
            editing_task_id: Some(task.id.clone()),
            draft: TaskDraft::new(task.description.clone(), task.image.clone()),
        };
        true
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), TaskError> {
        self.form.draft_mut()?.description = description.into();
        Ok(())
    }

    pub fn set_image(&mut self, image: Option<String>) -> Result<(), TaskError> {
        self.form.draft_mut()?.image = image;
        Ok(())
    }

    /// Picking an image from the device is not wired up
    pub fn request_image_upload(&self) -> Result<(), TaskError> {
        Err(TaskError::ImageUploadUnsupported)
    }

    pub fn cancel(&mut self) {
        self.form = TaskForm::Idle;
    }

    /// Save the form. On success the form closes and the view shows the
    /// persisted project; on any error the form stays open for a retry.
    pub async fn save(&mut self) -> Result<SavedTask, TaskError> {
        let TaskForm::Composing {
            editing_task_id,
            draft,
        } = &self.form
        else {
            return Err(TaskError::FormNotOpen);
        };

        let saved = self
            .tasks
            .save_task(&self.view.project.id, draft, editing_task_id.as_deref())
            .await?;
        self.view = saved.resolved.clone();
        self.form = TaskForm::Idle;
        Ok(saved)
    }
}
