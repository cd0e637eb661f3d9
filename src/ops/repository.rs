use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::io::store::{ALL_CUSTOMERS_KEY, KeyValueStore, LOCAL_PROJECTS_KEY, StoreError};
use crate::model::project::Project;
use crate::ops::ids::LocalIdGenerator;
use crate::ops::validation::{ValidationError, is_blank};

/// A write path could not complete
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("stored {key} is not a valid project list: {source}")]
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Error type for project list operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not save projects: {0}")]
    Persist(#[from] PersistError),
}

/// Canonical list first, then local-only projects in their stored order.
/// A local project whose id is already in `all` is dropped.
pub fn merge(all: Vec<Project>, local: Vec<Project>) -> Vec<Project> {
    let known: HashSet<String> = all.iter().map(|p| p.id.clone()).collect();
    let mut merged = all;
    merged.extend(local.into_iter().filter(|p| !known.contains(&p.id)));
    merged
}

/// Access to the two persisted project collections.
///
/// Both collections are JSON arrays in the injected store. They are written
/// independently and can drift: task edits only reach `localProjects`.
#[derive(Clone)]
pub struct ProjectRepository {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<LocalIdGenerator>,
}

impl ProjectRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ids(store, Arc::new(LocalIdGenerator::new()))
    }

    pub fn with_ids(store: Arc<dyn KeyValueStore>, ids: Arc<LocalIdGenerator>) -> Self {
        ProjectRepository { store, ids }
    }

    pub fn ids(&self) -> &LocalIdGenerator {
        &self.ids
    }

    /// Read a collection for display. Missing, unreadable and unparseable
    /// values all read as empty.
    async fn read_soft(&self, key: &'static str) -> Vec<Project> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "store read failed, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => projects,
            Err(e) => {
                warn!(key, error = %e, "stored value is not a project list, treating as empty");
                Vec::new()
            }
        }
    }

    /// Read a collection before modifying it. Failures are returned so a
    /// bad read never gets written back over real data.
    async fn read_strict(&self, key: &'static str) -> Result<Vec<Project>, PersistError> {
        match self.store.get(key).await? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| PersistError::Corrupt { key, source })
            }
        }
    }

    async fn write(&self, key: &'static str, projects: &[Project]) -> Result<(), PersistError> {
        let json = serde_json::to_string(projects).map_err(StoreError::from)?;
        self.store.set(key, json).await?;
        debug!(key, count = projects.len(), "collection written");
        Ok(())
    }

    /// The full project records (with tasks), soft on failure
    pub async fn local_projects(&self) -> Vec<Project> {
        self.read_soft(LOCAL_PROJECTS_KEY).await
    }

    /// Load the list to render: `allCustomers` merged with local-only projects.
    pub async fn load(&self) -> Vec<Project> {
        let all = self.read_soft(ALL_CUSTOMERS_KEY).await;
        let local = self.local_projects().await;
        let merged = merge(all, local);
        debug!(count = merged.len(), "projects loaded");
        merged
    }

    /// Build a new local project from a raw name. Nothing is stored.
    pub fn new_project(&self, name: &str) -> Result<Project, ValidationError> {
        if is_blank(name) {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(Project::new(self.ids.project_id(), name.trim().to_string()))
    }

    /// Persist a project just added to `rendered`: the rendered list becomes
    /// `allCustomers`, and the project is put at the front of
    /// `localProjects`. Both writes are attempted; the first failure is
    /// returned.
    pub async fn persist_created(
        &self,
        rendered: &[Project],
        project: &Project,
    ) -> Result<(), PersistError> {
        let summaries: Vec<Project> = rendered.iter().map(Project::summary).collect();
        let customers = self.write(ALL_CUSTOMERS_KEY, &summaries).await;
        if let Err(e) = &customers {
            error!(key = ALL_CUSTOMERS_KEY, error = %e, "persisting new project failed");
        }

        let local = self.prepend_local(project).await;
        if let Err(e) = &local {
            error!(key = LOCAL_PROJECTS_KEY, error = %e, "persisting new project failed");
        }

        customers.and(local)
    }

    async fn prepend_local(&self, project: &Project) -> Result<(), PersistError> {
        let mut local = self.read_strict(LOCAL_PROJECTS_KEY).await?;
        local.insert(0, project.clone());
        self.write(LOCAL_PROJECTS_KEY, &local).await
    }

    /// Write a project into `localProjects`, replacing the record with the
    /// same id or inserting at the front when there is none.
    pub async fn upsert_local(&self, project: &Project) -> Result<(), PersistError> {
        let mut local = self.read_strict(LOCAL_PROJECTS_KEY).await?;
        match local.iter().position(|p| p.id == project.id) {
            Some(idx) => local[idx] = project.clone(),
            None => local.insert(0, project.clone()),
        }
        let result = self.write(LOCAL_PROJECTS_KEY, &local).await;
        if let Err(e) = &result {
            error!(key = LOCAL_PROJECTS_KEY, project = %project.id, error = %e, "persisting project failed");
        }
        result
    }

    /// Remove both collections. Both removes are attempted; the first
    /// failure is returned.
    pub async fn clear(&self) -> Result<(), PersistError> {
        let mut first_err = None;
        for key in [ALL_CUSTOMERS_KEY, LOCAL_PROJECTS_KEY] {
            if let Err(e) = self.store.remove(key).await {
                error!(key, error = %e, "removing collection failed");
                first_err.get_or_insert(PersistError::Storage(e));
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
