/// User input rejected before any state changes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a name")]
    EmptyNickname,
    #[error("please enter a project name")]
    EmptyProjectName,
    #[error("please enter a task description")]
    EmptyTaskDescription,
}

/// Whether the input has anything left after trimming
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
