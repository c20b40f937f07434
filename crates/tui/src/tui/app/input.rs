use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::constants::{
    STATUS_CONFIRM_DELETE, STATUS_ENTER_ADD, STATUS_HELP, STATUS_NOTHING_SELECTED,
    STATUS_NOTHING_TO_CLEAR,
};

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    ShowHelp,
    ToggleComplete,
    Delete,
    ClearCompleted,
    NextFilter,
    PrevFilter,
    NextSort,
    PrevSort,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::ToggleComplete),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('c') => Some(Self::ClearCompleted),
            KeyCode::Char('f') | KeyCode::Tab => Some(Self::NextFilter),
            KeyCode::Char('F') | KeyCode::BackTab => Some(Self::PrevFilter),
            KeyCode::Char('s') => Some(Self::NextSort),
            KeyCode::Char('S') => Some(Self::PrevSort),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterAdd => {
                self.input_mode = InputMode::Add;
                self.input.clear();
                self.service.set_input("");
                self.set_status_info(STATUS_ENTER_ADD);
            }
            NormalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
                self.set_status_info(STATUS_HELP);
            }
            NormalAction::ToggleComplete => self.toggle_selected(),
            NormalAction::Delete => {
                if self.selected_id().is_some() {
                    self.confirm_choice = ConfirmChoice::No;
                    self.input_mode = InputMode::ConfirmDelete;
                    self.set_status_info(STATUS_CONFIRM_DELETE);
                } else {
                    self.set_status_info(STATUS_NOTHING_SELECTED);
                }
            }
            NormalAction::ClearCompleted => self.clear_completed(),
            NormalAction::NextFilter => {
                let filter = self.service.state().filter().next();
                self.apply_filter(filter);
            }
            NormalAction::PrevFilter => {
                let filter = self.service.state().filter().prev();
                self.apply_filter(filter);
            }
            NormalAction::NextSort => {
                let sort = self.service.state().sort().next();
                self.apply_sort(sort);
            }
            NormalAction::PrevSort => {
                let sort = self.service.state().sort().prev();
                self.apply_sort(sort);
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
        }
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.service.set_input("");
                self.input_mode = InputMode::Normal;
                self.set_status_info("Add cancelled");
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.backspace();
                self.service.set_input(self.input.as_str());
            }
            KeyCode::Delete => {
                self.input.delete_char();
                self.service.set_input(self.input.as_str());
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.input.insert_char(ch);
                self.service.set_input(self.input.as_str());
            }
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('q')
        ) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.confirm_choice = ConfirmChoice::Yes;
                self.finish_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_choice = ConfirmChoice::No;
                self.finish_delete();
            }
            KeyCode::Enter => self.finish_delete(),
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        // On failure the error stays in the service and is drawn under the input.
        if let Ok(task) = self.service.submit() {
            self.input.clear();
            self.input_mode = InputMode::Normal;
            self.select_task_by_id(&task.id);
            self.set_status_info(format!("Added \"{}\"", task.text));
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if let Some(completed) = self.service.toggle(&id) {
            let label = if completed { "completed" } else { "active" };
            self.set_status_info(format!("Marked task {}", label));
        }
        self.sync_selection();
    }

    fn finish_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.confirm_choice != ConfirmChoice::Yes {
            self.set_status_info("Delete cancelled");
            return;
        }
        if let Some(id) = self.selected_id() {
            if self.service.remove(&id) {
                self.set_status_info("Deleted task");
            }
        }
        self.confirm_choice = ConfirmChoice::No;
        self.sync_selection();
    }

    fn clear_completed(&mut self) {
        if !self.service.snapshot().can_clear_completed() {
            self.set_status_info(STATUS_NOTHING_TO_CLEAR);
            return;
        }
        let removed = self.service.clear_completed();
        self.set_status_info(format!(
            "Cleared {} completed task{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
        self.sync_selection();
    }

    fn apply_filter(&mut self, filter: crate::model::Filter) {
        self.service.set_filter(filter);
        self.selected = 0;
        self.sync_selection();
        self.set_status_info(format!("Filter: {}", filter.label()));
    }

    fn apply_sort(&mut self, sort: crate::model::SortOrder) {
        let keep = self.selected_id();
        self.service.set_sort(sort);
        match keep {
            Some(id) => self.select_task_by_id(&id),
            None => self.sync_selection(),
        }
        self.set_status_info(format!("Sort by: {}", sort.label()));
    }
}
