use serde::Serialize;
use tracing::info;

use crate::model::project::Project;
use crate::model::task::{Task, TaskDraft};
use crate::ops::ids::LocalIdGenerator;
use crate::ops::repository::{PersistError, ProjectRepository};
use crate::ops::resolver::{ProjectOrigin, ResolverChain};
use crate::ops::validation::{ValidationError, is_blank};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not save task: {0}")]
    Persist(#[from] PersistError),
    #[error("the task form is not open")]
    FormNotOpen,
    #[error("image upload is not supported yet")]
    ImageUploadUnsupported,
}

/// A project as shown on the detail surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    pub project: Project,
    pub origin: ProjectOrigin,
    /// Locally created tasks, in stored order
    pub pending: Vec<Task>,
}

impl ResolvedProject {
    pub fn new(project: Project, origin: ProjectOrigin) -> Self {
        let pending = project.pending_tasks();
        ResolvedProject {
            project,
            origin,
            pending,
        }
    }
}

/// Whether a save added a task or changed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Result of a successful save
#[derive(Debug, Clone)]
pub struct SavedTask {
    pub task_id: String,
    pub outcome: SaveOutcome,
    /// The project as persisted
    pub resolved: ResolvedProject,
}

/// Apply a draft to a project's tasks. An edit of an existing id keeps the
/// task's position and `done`; anything else prepends a new task.
/// Returns the affected task id.
pub fn apply_draft(
    project: &mut Project,
    draft: &TaskDraft,
    editing_task_id: Option<&str>,
    ids: &LocalIdGenerator,
) -> (String, SaveOutcome) {
    let tasks = project.tasks.get_or_insert_with(Vec::new);

    if let Some(editing) = editing_task_id
        && let Some(task) = tasks.iter_mut().find(|t| t.id == editing)
    {
        task.description = draft.description.clone();
        task.image = draft.image.clone();
        return (task.id.clone(), SaveOutcome::Updated);
    }

    let task = Task::new(ids.task_id(), draft.description.clone(), draft.image.clone());
    let id = task.id.clone();
    tasks.insert(0, task);
    (id, SaveOutcome::Created)
}

/// Task editing for one project at a time, backed by `localProjects`.
pub struct ProjectTasks {
    repo: ProjectRepository,
    chain: ResolverChain,
}

impl ProjectTasks {
    pub fn new(repo: ProjectRepository, chain: ResolverChain) -> Self {
        ProjectTasks { repo, chain }
    }

    /// Local projects, then bundled samples, then the offline template
    pub fn standard(repo: ProjectRepository) -> Self {
        let chain = ResolverChain::standard(repo.clone());
        Self::new(repo, chain)
    }

    /// Resolve a project by id. Never fails: unknown ids get the template.
    pub async fn resolve(&self, id: &str) -> ResolvedProject {
        let (project, origin) = self.chain.resolve(id).await;
        ResolvedProject::new(project, origin)
    }

    /// Create a task (or edit `editing_task_id` when it exists) in the
    /// project `project_id` resolves to, then persist that whole project
    /// into `localProjects`.
    pub async fn save_task(
        &self,
        project_id: &str,
        draft: &TaskDraft,
        editing_task_id: Option<&str>,
    ) -> Result<SavedTask, TaskError> {
        if is_blank(&draft.description) {
            return Err(ValidationError::EmptyTaskDescription.into());
        }

        let (mut project, origin) = self.chain.resolve(project_id).await;
        let (task_id, outcome) = apply_draft(&mut project, draft, editing_task_id, self.repo.ids());
        self.repo.upsert_local(&project).await?;
        info!(project = %project.id, task = %task_id, ?outcome, "task saved");

        // Once persisted the project is local, whatever it resolved from
        let origin = match origin {
            ProjectOrigin::Sample | ProjectOrigin::Template => ProjectOrigin::Local,
            ProjectOrigin::Local => origin,
        };
        Ok(SavedTask {
            task_id,
            outcome,
            resolved: ResolvedProject::new(project, origin),
        })
    }
}
