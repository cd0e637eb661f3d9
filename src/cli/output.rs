use serde::Serialize;

use crate::model::project::Project;
use crate::model::task::Task;
use crate::ops::resolver::ProjectOrigin;
use crate::ops::task_store::{ResolvedProject, SaveOutcome, SavedTask};

/// Badge printed next to pending tasks
pub const PENDING_BADGE: &str = "awaiting sync";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectListJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub projects: &'a [Project],
}

#[derive(Serialize)]
pub struct ProjectDetailJson<'a> {
    pub origin: ProjectOrigin,
    pub project: &'a Project,
    pub pending: &'a [Task],
}

#[derive(Serialize)]
pub struct SavedTaskJson<'a> {
    pub project: &'a str,
    pub task: &'a str,
    pub outcome: SaveOutcome,
}

pub fn detail_to_json(view: &ResolvedProject) -> ProjectDetailJson<'_> {
    ProjectDetailJson {
        origin: view.origin,
        project: &view.project,
        pending: &view.pending,
    }
}

pub fn saved_to_json(saved: &SavedTask) -> SavedTaskJson<'_> {
    SavedTaskJson {
        project: &saved.resolved.project.id,
        task: &saved.task_id,
        outcome: saved.outcome,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn format_project_line(project: &Project) -> String {
    format!("{}  {}", project.id, project.name)
}

pub fn format_project_list(nickname: Option<&str>, projects: &[Project]) -> String {
    let mut out = String::new();
    if let Some(name) = nickname {
        out.push_str(&format!("Signed in as {}\n\n", name));
    }
    if projects.is_empty() {
        out.push_str("No projects.\n");
        return out;
    }
    for project in projects {
        out.push_str(&format_project_line(project));
        out.push('\n');
    }
    out
}

fn origin_label(origin: ProjectOrigin) -> &'static str {
    match origin {
        ProjectOrigin::Local => "local",
        ProjectOrigin::Sample => "sample",
        ProjectOrigin::Template => "offline template",
    }
}

pub fn format_task_line(task: &Task) -> String {
    let check = if task.done { 'x' } else { ' ' };
    let mut line = format!("[{}] {}  {}", check, task.id, task.display_text());
    if task.image.is_some() {
        line.push_str("  (image)");
    }
    line
}

pub fn format_detail(view: &ResolvedProject) -> String {
    let project = &view.project;
    let mut out = format!("{} ({})\n", project.name, origin_label(view.origin));
    out.push_str(&format!("id: {}\n", project.id));
    if let Some(desc) = &project.description {
        out.push_str(&format!("description: {}\n", desc));
    }
    if let Some(created) = &project.created_at {
        out.push_str(&format!("created: {}\n", created));
    }

    if !view.pending.is_empty() {
        out.push_str("\nPending:\n");
        for task in &view.pending {
            out.push_str(&format!("  {}  {}  [{}]\n", task.id, task.display_text(), PENDING_BADGE));
        }
    }

    let others: Vec<&Task> = project.tasks().iter().filter(|t| !t.is_pending()).collect();
    if !others.is_empty() {
        out.push_str("\nTasks:\n");
        for task in others {
            out.push_str(&format!("  {}\n", format_task_line(task)));
        }
    }
    out
}

pub fn format_saved(saved: &SavedTask) -> String {
    let verb = match saved.outcome {
        SaveOutcome::Created => "Added",
        SaveOutcome::Updated => "Updated",
    };
    format!("{} {} in {}", verb, saved.task_id, saved.resolved.project.id)
}
