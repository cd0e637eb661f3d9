use tracing::info;

use crate::model::project::Project;
use crate::ops::repository::{PersistError, ProjectError, ProjectRepository};

/// State behind the project list surface.
///
/// The rendered list lives here; it is rebuilt from the store on every
/// `refresh` (mount and focus) and updated optimistically on create.
pub struct ProjectList {
    repo: ProjectRepository,
    projects: Vec<Project>,
}

impl ProjectList {
    pub fn new(repo: ProjectRepository) -> Self {
        ProjectList {
            repo,
            projects: Vec::new(),
        }
    }

    /// The rendered list
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Reload and re-merge from the store
    pub async fn refresh(&mut self) -> &[Project] {
        self.projects = self.repo.load().await;
        &self.projects
    }

    /// Add a project named `name` (trimmed). The new entry is in the
    /// rendered list before persistence runs and stays there if
    /// persistence fails.
    pub async fn create(&mut self, name: &str) -> Result<Project, ProjectError> {
        let project = self.repo.new_project(name)?;
        self.projects.push(project.clone());
        info!(id = %project.id, name = %project.name, "project created");

        self.repo.persist_created(&self.projects, &project).await?;
        Ok(project)
    }

    /// Delete every persisted project. The rendered list is emptied only
    /// once both collections are gone.
    pub async fn clear(&mut self) -> Result<(), PersistError> {
        self.repo.clear().await?;
        self.projects.clear();
        info!("projects cleared");
        Ok(())
    }
}
