use tracing::{debug, warn};

use crate::capture::CaptureError;
use crate::clock::{Clock, SystemClock};
use crate::model::{Filter, SortOrder, Task, TaskCounts, TaskId};
use crate::state::TodoState;
use crate::storage::Persistence;

/// Owned copy of what a front-end needs to draw one frame.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub filter: Filter,
    pub sort: SortOrder,
    pub tasks: Vec<Task>,
    pub counts: TaskCounts,
}

impl ViewSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn can_clear_completed(&self) -> bool {
        self.counts.completed > 0
    }
}

/// The task list manager: owns the state, saves after every change and
/// derives the visible list on demand.
///
/// Persistence is best effort. Load and save failures are logged and never
/// reach the user; a failed save keeps the in-memory change.
pub struct TasksService {
    state: TodoState,
    persistence: Box<dyn Persistence>,
    clock: Box<dyn Clock>,
}

impl TasksService {
    pub fn open(persistence: Box<dyn Persistence>, clock: Box<dyn Clock>) -> Self {
        let state = match persistence.load() {
            Ok(Some(tasks)) => {
                let (state, dropped) = TodoState::from_tasks(tasks);
                if dropped > 0 {
                    warn!(dropped, "dropped stored tasks with duplicate ids");
                }
                debug!(count = state.tasks().len(), "loaded tasks");
                state
            }
            Ok(None) => TodoState::new(),
            Err(err) => {
                warn!("failed to load tasks, starting empty: {err:#}");
                TodoState::new()
            }
        };
        Self {
            state,
            persistence,
            clock,
        }
    }

    pub fn with_system_clock(persistence: Box<dyn Persistence>) -> Self {
        Self::open(persistence, Box::new(SystemClock))
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.state.visible()
    }

    pub fn counts(&self) -> TaskCounts {
        self.state.counts()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            filter: self.state.filter(),
            sort: self.state.sort(),
            tasks: self.visible().into_iter().cloned().collect(),
            counts: self.counts(),
        }
    }

    pub fn input(&self) -> &str {
        self.state.input()
    }

    pub fn error(&self) -> Option<CaptureError> {
        self.state.error()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.state.set_input(input);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.set_filter(filter);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.set_sort(sort);
    }

    /// Find a task by full id or by a unique id prefix.
    pub fn resolve_id(&self, needle: &str) -> Option<TaskId> {
        if let Some(task) = self.tasks().iter().find(|task| task.id.as_str() == needle) {
            return Some(task.id.clone());
        }
        let mut matches = self
            .tasks()
            .iter()
            .filter(|task| !needle.is_empty() && task.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task.id.clone()),
            _ => None,
        }
    }

    pub fn add(&mut self, text: &str) -> Result<Task, CaptureError> {
        let id = self.fresh_id();
        let now = self.clock.now();
        let task = self.state.add(text, id, now)?.clone();
        debug!(task_id = %task.id, "task added");
        self.persist();
        Ok(task)
    }

    /// Add a task from the pending input buffer.
    pub fn submit(&mut self) -> Result<Task, CaptureError> {
        let input = self.state.input().to_string();
        self.add(&input)
    }

    pub fn toggle(&mut self, id: &TaskId) -> Option<bool> {
        let completed = self.state.toggle(id)?;
        debug!(task_id = %id, completed, "task toggled");
        self.persist();
        Some(completed)
    }

    pub fn remove(&mut self, id: &TaskId) -> bool {
        if !self.state.remove(id) {
            return false;
        }
        debug!(task_id = %id, "task removed");
        self.persist();
        true
    }

    pub fn clear_completed(&mut self) -> usize {
        let removed = self.state.clear_completed();
        if removed > 0 {
            debug!(removed, "cleared completed tasks");
            self.persist();
        }
        removed
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if !self.state.contains_id(&id) {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = self.persistence.save(self.state.tasks()) {
            warn!("failed to save tasks: {err:#}");
        }
    }
}
