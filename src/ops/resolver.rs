use serde::Serialize;

use crate::io::store::PinFuture;
use crate::model::project::Project;
use crate::model::samples;
use crate::ops::repository::ProjectRepository;

/// Where a resolved project came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectOrigin {
    Local,
    Sample,
    Template,
}

/// One step of the lookup chain
pub trait ProjectResolver: Send + Sync {
    fn origin(&self) -> ProjectOrigin;

    fn try_resolve<'a>(&'a self, id: &'a str) -> PinFuture<'a, Option<Project>>;
}

/// Looks in the persisted `localProjects` collection
pub struct LocalResolver {
    repo: ProjectRepository,
}

impl LocalResolver {
    pub fn new(repo: ProjectRepository) -> Self {
        LocalResolver { repo }
    }
}

impl ProjectResolver for LocalResolver {
    fn origin(&self) -> ProjectOrigin {
        ProjectOrigin::Local
    }

    fn try_resolve<'a>(&'a self, id: &'a str) -> PinFuture<'a, Option<Project>> {
        Box::pin(async move {
            self.repo
                .local_projects()
                .await
                .into_iter()
                .find(|p| p.id == id)
        })
    }
}

/// Looks in a fixed in-memory set (the bundled samples)
pub struct StaticResolver {
    projects: Vec<Project>,
}

impl StaticResolver {
    pub fn new(projects: Vec<Project>) -> Self {
        StaticResolver { projects }
    }

    pub fn samples() -> Self {
        Self::new(samples::sample_projects())
    }
}

impl ProjectResolver for StaticResolver {
    fn origin(&self) -> ProjectOrigin {
        ProjectOrigin::Sample
    }

    fn try_resolve<'a>(&'a self, id: &'a str) -> PinFuture<'a, Option<Project>> {
        let found = self.projects.iter().find(|p| p.id == id).cloned();
        Box::pin(async move { found })
    }
}

/// Ordered lookup ending in the offline template, so every id resolves
/// to something.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ProjectResolver>>,
    fallback: fn() -> Project,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn ProjectResolver>>, fallback: fn() -> Project) -> Self {
        ResolverChain {
            resolvers,
            fallback,
        }
    }

    /// Local projects, then bundled samples, then the offline template
    pub fn standard(repo: ProjectRepository) -> Self {
        Self::new(
            vec![
                Box::new(LocalResolver::new(repo)),
                Box::new(StaticResolver::samples()),
            ],
            samples::offline_template,
        )
    }

    pub async fn resolve(&self, id: &str) -> (Project, ProjectOrigin) {
        for resolver in &self.resolvers {
            if let Some(project) = resolver.try_resolve(id).await {
                return (project, resolver.origin());
            }
        }
        ((self.fallback)(), ProjectOrigin::Template)
    }
}
