use thiserror::Error;

use crate::models::Task;

/// The ordered, in-memory task list.
///
/// Insertion order is display order. Internally the list is a 0-indexed
/// `Vec`; every public operation speaks 1-indexed ordinals, the numbering the
/// user sees in `list` output. An ordinal is a position, not an identity:
/// deleting task 2 renumbers everything after it.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("there is no task {ordinal}; the list has {len} task(s)")]
    OrdinalOutOfRange { ordinal: usize, len: usize },
    #[error("task {ordinal} is already marked as {}", if *.done { "done" } else { "not done" })]
    NoStatusChange { ordinal: usize, done: bool },
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Appends a task and returns its new 1-indexed ordinal.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn get(&self, ordinal: usize) -> Result<&Task, StoreError> {
        let index = self.checked_index(ordinal)?;
        Ok(&self.tasks[index])
    }

    /// Removes and returns the task at `ordinal`. Later tasks shift down by
    /// one position.
    pub fn delete(&mut self, ordinal: usize) -> Result<Task, StoreError> {
        let index = self.checked_index(ordinal)?;
        Ok(self.tasks.remove(index))
    }

    /// Sets the completion flag, rejecting a no-op transition: marking an
    /// already-done task (or unmarking a pending one) is an explicit error
    /// rather than silently idempotent.
    pub fn set_done(&mut self, ordinal: usize, done: bool) -> Result<&Task, StoreError> {
        let index = self.checked_index(ordinal)?;
        let task = &mut self.tasks[index];
        if task.done == done {
            return Err(StoreError::NoStatusChange { ordinal, done });
        }
        task.done = done;
        Ok(&self.tasks[index])
    }

    /// Lazily yields `(ordinal, task)` pairs whose description contains
    /// `keyword`, in list order. The match is case-sensitive. An empty
    /// keyword is a caller error; the parser never produces one.
    pub fn find<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| task.description.contains(keyword))
            .map(|(index, task)| (index + 1, task))
    }

    fn checked_index(&self, ordinal: usize) -> Result<usize, StoreError> {
        if ordinal == 0 || ordinal > self.tasks.len() {
            return Err(StoreError::OrdinalOutOfRange {
                ordinal,
                len: self.tasks.len(),
            });
        }
        Ok(ordinal - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(Task::todo("read book"));
        store.add(Task::deadline("hand in report", "Friday"));
        store.add(Task::event("go out", "2pm", "4pm"));
        store
    }

    #[test]
    fn add_returns_one_indexed_ordinal() {
        let mut store = TaskStore::new();
        assert_eq!(store.add(Task::todo("a")), 1);
        assert_eq!(store.add(Task::todo("b")), 2);
    }

    #[test]
    fn ordinals_are_valid_exactly_within_list_length() {
        let store = sample_store();
        for ordinal in 1..=3 {
            assert!(store.get(ordinal).is_ok());
        }
        for ordinal in [0, 4, 100] {
            assert_eq!(
                store.get(ordinal),
                Err(StoreError::OrdinalOutOfRange { ordinal, len: 3 })
            );
        }
    }

    #[test]
    fn every_ordinal_is_out_of_range_on_an_empty_list() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.delete(1),
            Err(StoreError::OrdinalOutOfRange { ordinal: 1, len: 0 })
        );
        assert_eq!(
            store.set_done(1, true),
            Err(StoreError::OrdinalOutOfRange { ordinal: 1, len: 0 })
        );
    }

    #[test]
    fn delete_shifts_later_ordinals_down() {
        let mut store = sample_store();
        let removed = store.delete(2).expect("ordinal 2 exists");
        assert_eq!(removed.description, "hand in report");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).expect("shifted task").description, "go out");
    }

    #[test]
    fn marking_twice_is_rejected_the_second_time() {
        let mut store = sample_store();
        assert!(store.set_done(1, true).is_ok());
        assert_eq!(
            store.set_done(1, true),
            Err(StoreError::NoStatusChange {
                ordinal: 1,
                done: true
            })
        );
        // And back the other way.
        assert!(store.set_done(1, false).is_ok());
        assert_eq!(
            store.set_done(1, false),
            Err(StoreError::NoStatusChange {
                ordinal: 1,
                done: false
            })
        );
    }

    #[test]
    fn unmarking_a_fresh_task_is_a_no_status_change() {
        let mut store = sample_store();
        assert_eq!(
            store.set_done(2, false),
            Err(StoreError::NoStatusChange {
                ordinal: 2,
                done: false
            })
        );
    }

    #[test]
    fn find_matches_substrings_case_sensitively() {
        let store = sample_store();
        let hits: Vec<usize> = store.find("o").map(|(ordinal, _)| ordinal).collect();
        assert_eq!(hits, vec![1, 2, 3]);

        let hits: Vec<usize> = store.find("report").map(|(ordinal, _)| ordinal).collect();
        assert_eq!(hits, vec![2]);

        // Case matters.
        assert_eq!(store.find("Report").count(), 0);
    }

    #[test]
    fn find_is_restartable() {
        let store = sample_store();
        assert_eq!(store.find("go").count(), 1);
        assert_eq!(store.find("go").count(), 1);
    }
}
