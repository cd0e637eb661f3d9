use std::path::PathBuf;
use std::sync::Arc;

use crate::io::file_store::FileStore;
use crate::io::store::{KeyValueStore, MemoryStore};
use crate::ops::project_detail::ProjectDetail;
use crate::ops::project_list::ProjectList;
use crate::ops::repository::ProjectRepository;
use crate::ops::session::Session;
use crate::ops::task_store::ProjectTasks;

/// Wires one store into the three surfaces. Every surface built from the
/// same `Siteboard` shares the store and the id generator, and nothing
/// else: each keeps its own in-memory state.
#[derive(Clone)]
pub struct Siteboard {
    store: Arc<dyn KeyValueStore>,
    repo: ProjectRepository,
}

impl Siteboard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = ProjectRepository::new(store.clone());
        Siteboard { store, repo }
    }

    /// Backed by `<dir>/<key>.json` files
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// Backed by an in-process map
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn session(&self) -> Session {
        Session::new(self.store.clone())
    }

    /// A fresh project list, already loaded
    pub async fn project_list(&self) -> ProjectList {
        let mut list = ProjectList::new(self.repo.clone());
        list.refresh().await;
        list
    }

    pub fn project_tasks(&self) -> ProjectTasks {
        ProjectTasks::standard(self.repo.clone())
    }

    /// The detail surface opened on `id`
    pub async fn project_detail(&self, id: &str) -> ProjectDetail {
        ProjectDetail::open(self.project_tasks(), id).await
    }
}
