//! Projects shipped with the app: read-only samples and the offline template.

use chrono::Local;

use super::project::Project;
use super::task::Task;

/// Id of the single offline template
pub const TEMPLATE_ID: &str = "template-1";

fn sample(id: &str, name: &str, description: &str, created_at: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        created_at: Some(created_at.to_string()),
        tasks: None,
        extra: Default::default(),
    }
}

/// The bundled sample projects
pub fn sample_projects() -> Vec<Project> {
    vec![
        sample("1", "Backend API system", "Build a complete RESTful API", "2025-01-01"),
        sample("2", "Company website", "Rebuild with React + Vite", "2025-02-12"),
        sample("3", "Collaborative notes", "Real-time sync over sockets", "2025-03-08"),
    ]
}

/// The offline template shown when nothing else matches. Its creation
/// date is today's local date.
pub fn offline_template() -> Project {
    let mut done = Task::new("t2".to_string(), "Example task B".to_string(), None);
    done.done = true;
    Project {
        id: TEMPLATE_ID.to_string(),
        name: "Offline template: single-page task board".to_string(),
        description: Some(
            "Template with task fields and example tasks, for trying the board offline."
                .to_string(),
        ),
        created_at: Some(Local::now().format("%Y-%m-%d").to_string()),
        tasks: Some(vec![
            Task::new("t1".to_string(), "Example task A".to_string(), None),
            done,
        ]),
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_have_small_fixed_ids() {
        let ids: Vec<String> = sample_projects().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_template_has_no_pending_tasks() {
        let t = offline_template();
        assert_eq!(t.id, TEMPLATE_ID);
        assert_eq!(t.tasks().len(), 2);
        assert!(t.pending_tasks().is_empty());
        assert!(t.tasks()[1].done);
    }
}
