use std::sync::Mutex;

use ulid::{Generator, Ulid};

use crate::model::project::LOCAL_PROJECT_PREFIX;
use crate::model::task::LOCAL_TASK_PREFIX;

/// Generates identifiers for entities created on this device.
///
/// Ids are `<prefix><ULID>`: the millisecond timestamp plus 80 random bits,
/// and strictly increasing for ids drawn from the same generator, so two
/// creations in the same millisecond still get distinct ids.
pub struct LocalIdGenerator {
    inner: Mutex<Generator>,
}

impl Default for LocalIdGenerator {
    fn default() -> Self {
        LocalIdGenerator {
            inner: Mutex::new(Generator::new()),
        }
    }
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ulid(&self) -> Ulid {
        let mut generator = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Overflow only happens after 2^80 ids in one millisecond
        generator.generate().unwrap_or_else(|_| Ulid::new())
    }

    pub fn project_id(&self) -> String {
        format!("{}{}", LOCAL_PROJECT_PREFIX, self.next_ulid())
    }

    pub fn task_id(&self) -> String {
        format!("{}{}", LOCAL_TASK_PREFIX, self.next_ulid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_carry_their_prefix() {
        let ids = LocalIdGenerator::new();
        assert!(ids.project_id().starts_with("local-project-"));
        assert!(ids.task_id().starts_with("local-"));
    }

    #[test]
    fn test_rapid_ids_are_distinct_and_increasing() {
        let ids = LocalIdGenerator::new();
        let batch: Vec<String> = (0..1000).map(|_| ids.task_id()).collect();
        let unique: HashSet<&String> = batch.iter().collect();
        assert_eq!(unique.len(), batch.len());
        assert!(batch.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_task_ids_are_not_project_ids() {
        let ids = LocalIdGenerator::new();
        assert!(!ids.task_id().starts_with(LOCAL_PROJECT_PREFIX));
    }
}
