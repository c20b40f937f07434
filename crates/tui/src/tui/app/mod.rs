use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::buffer::TextBuffer;
use super::constants::STATUS_TTL;
use crate::core::TasksService;
use crate::model::{Task, TaskId};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }
}

pub(crate) struct App {
    service: TasksService,
    storage_label: String,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: TextBuffer,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(service: TasksService, storage_label: impl Into<String>) -> Self {
        let mut app = Self {
            service,
            storage_label: storage_label.into(),
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, text: T) {
        self.status = Some(StatusMessage::new(text));
    }

    fn visible_len(&self) -> usize {
        self.service.visible().len()
    }

    fn selected_task(&self) -> Option<Task> {
        self.service.visible().get(self.selected).map(|task| (*task).clone())
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.service
            .visible()
            .get(self.selected)
            .map(|task| task.id.clone())
    }

    /// Keep the selection inside the visible list after any change to it.
    fn sync_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_task_by_id(&mut self, id: &TaskId) {
        if let Some(idx) = self
            .service
            .visible()
            .iter()
            .position(|task| &task.id == id)
        {
            self.selected = idx;
        }
        self.sync_selection();
    }

    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        self.selected = 0;
        self.sync_selection();
    }

    fn select_last(&mut self) {
        self.selected = self.visible_len().saturating_sub(1);
        self.sync_selection();
    }
}
