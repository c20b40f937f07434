use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::capture::{validate_text, CaptureError};
use crate::model::{Filter, SortOrder, Task, TaskCounts, TaskId};
use crate::view;

/// In-memory state of the task list: the task sequence plus the view state
/// that is never persisted.
///
/// Mutations here are pure: they touch only this value. Persistence is the
/// caller's job, see [`crate::services::TasksService`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    tasks: Vec<Task>,
    input: String,
    filter: Filter,
    sort: SortOrder,
    error: Option<CaptureError>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from a loaded sequence, dropping records whose id repeats
    /// an earlier one. Returns the state and the number of dropped records.
    pub fn from_tasks(tasks: Vec<Task>) -> (Self, usize) {
        let mut seen = HashSet::new();
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .collect();
        let dropped = before - tasks.len();
        (
            Self {
                tasks,
                ..Self::default()
            },
            dropped,
        )
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn error(&self) -> Option<CaptureError> {
        self.error
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Replace the pending input. Any validation error is cleared.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }

    /// Validate `raw` and append a new task. On failure the error slot is set
    /// and the task list is left untouched.
    pub fn add(
        &mut self,
        raw: &str,
        id: TaskId,
        now: DateTime<Utc>,
    ) -> Result<&Task, CaptureError> {
        let text = match validate_text(raw, &self.tasks) {
            Ok(text) => text.to_string(),
            Err(err) => {
                self.error = Some(err);
                return Err(err);
            }
        };
        self.tasks.push(Task::new(id, text, now));
        self.input.clear();
        self.error = None;
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Whether `id` is already taken by a task in the list.
    pub fn contains_id(&self, id: &TaskId) -> bool {
        self.tasks.iter().any(|task| &task.id == id)
    }

    /// Flip `completed` on the matching task and return the new value.
    pub fn toggle(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| &task.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        self.tasks.len() != before
    }

    /// Drop every completed task, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        before - self.tasks.len()
    }

    pub fn visible(&self) -> Vec<&Task> {
        view::visible_tasks(&self.tasks, self.filter, self.sort)
    }

    pub fn counts(&self) -> TaskCounts {
        view::counts(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn add(state: &mut TodoState, id: &str, text: &str) -> Result<TaskId, CaptureError> {
        state.add(text, id.into(), now()).map(|task| task.id.clone())
    }

    #[test]
    fn add_appends_incomplete_task_and_clears_input() {
        let mut state = TodoState::new();
        state.set_input("Buy milk");
        let input = state.input().to_string();
        add(&mut state, "1", &input).unwrap();

        assert_eq!(state.tasks().len(), 1);
        let task = &state.tasks()[0];
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.created_at, now());
        assert_eq!(state.input(), "");
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failed_add_sets_error_and_keeps_input() {
        let mut state = TodoState::new();
        add(&mut state, "1", "Buy milk").unwrap();
        state.set_input("buy milk");

        let err = add(&mut state, "2", "buy milk").unwrap_err();
        assert_eq!(err, CaptureError::DuplicateTask);
        assert_eq!(state.error(), Some(CaptureError::DuplicateTask));
        assert_eq!(state.input(), "buy milk");
        assert_eq!(state.tasks().len(), 1);

        state.set_input("buy milk!");
        assert_eq!(state.error(), None);
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut state = TodoState::new();
        let id = add(&mut state, "1", "Read").unwrap();
        assert_eq!(state.toggle(&id), Some(true));
        assert_eq!(state.toggle(&id), Some(false));
        assert_eq!(state.toggle(&"missing".into()), None);
        assert_eq!(state.tasks().len(), 1);
    }

    #[test]
    fn clear_completed_removes_only_completed() {
        let mut state = TodoState::new();
        let a = add(&mut state, "a", "A").unwrap();
        add(&mut state, "b", "B").unwrap();
        let c = add(&mut state, "c", "C").unwrap();
        state.toggle(&a);
        state.toggle(&c);

        assert_eq!(state.clear_completed(), 2);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].text, "B");
        assert_eq!(state.clear_completed(), 0);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut state = TodoState::new();
        let id = add(&mut state, "1", "Call mom").unwrap();
        assert!(!state.remove(&"nope".into()));
        assert!(state.remove(&id));
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn from_tasks_drops_duplicate_ids() {
        let tasks = vec![
            Task::new("1".into(), "first", now()),
            Task::new("1".into(), "second", now()),
            Task::new("2".into(), "third", now()),
        ];
        let (state, dropped) = TodoState::from_tasks(tasks);
        assert_eq!(dropped, 1);
        assert_eq!(state.tasks().len(), 2);
        assert_eq!(state.tasks()[0].text, "first");
    }
}
