use chrono::{Duration, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use super::{App, ConfirmChoice, InputMode};
use crate::core::{FixedClock, KeyValuePersistence, MemoryStore, TasksService};
use crate::model::{Filter, SortOrder};
use crate::tui::helpers::{centered_rect, inset_rect, short_id};

fn app() -> App {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let service = TasksService::open(
        Box::new(KeyValuePersistence::new(MemoryStore::new())),
        Box::new(FixedClock::stepping(start, Duration::seconds(1))),
    );
    App::new(service, "memory")
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn add_task(app: &mut App, text: &str) {
    press(app, KeyCode::Char('a'));
    type_text(app, text);
    press(app, KeyCode::Enter);
}

fn visible_texts(app: &App) -> Vec<String> {
    app.service
        .visible()
        .iter()
        .map(|task| task.text.clone())
        .collect()
}

#[test]
fn adding_through_keys_selects_new_task() {
    let mut app = app();
    add_task(&mut app, "Water plants");
    add_task(&mut app, "Buy milk");

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(visible_texts(&app), vec!["Buy milk", "Water plants"]);
    assert_eq!(app.selected, 0);
    assert_eq!(app.table_state.selected(), Some(0));
    assert!(app.input.is_empty());
}

#[test]
fn invalid_input_keeps_add_mode_with_error() {
    let mut app = app();
    add_task(&mut app, "Buy milk");

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "  BUY MILK ");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.input_mode, InputMode::Add);
    assert_eq!(
        app.service.error().map(|err| err.to_string()).as_deref(),
        Some("Task already exists")
    );
    assert_eq!(app.service.tasks().len(), 1);

    // Editing the buffer clears the message.
    press(&mut app, KeyCode::Backspace);
    assert!(app.service.error().is_none());
}

#[test]
fn escape_cancels_add_without_changes() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Draft");
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.service.tasks().is_empty());
    assert_eq!(app.service.input(), "");
}

#[test]
fn space_toggles_selected_task() {
    let mut app = app();
    add_task(&mut app, "Finish report");

    press(&mut app, KeyCode::Char(' '));
    assert!(app.service.tasks()[0].completed);
    assert_eq!(app.service.counts().completed, 1);

    press(&mut app, KeyCode::Enter);
    assert!(!app.service.tasks()[0].completed);
}

#[test]
fn delete_requires_confirmation() {
    let mut app = app();
    add_task(&mut app, "Keep me");

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.input_mode, InputMode::ConfirmDelete);
    assert_eq!(app.confirm_choice, ConfirmChoice::No);

    // Enter on the default choice cancels.
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.service.tasks().len(), 1);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.service.tasks().is_empty());
    assert_eq!(app.table_state.selected(), None);
}

#[test]
fn filter_cycle_hides_completed_tasks() {
    let mut app = app();
    add_task(&mut app, "First");
    add_task(&mut app, "Second");
    // Newest first, so "Second" is selected; complete it.
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.service.state().filter(), Filter::Active);
    assert_eq!(visible_texts(&app), vec!["First"]);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.service.state().filter(), Filter::Completed);
    assert_eq!(visible_texts(&app), vec!["Second"]);

    press(&mut app, KeyCode::Char('F'));
    press(&mut app, KeyCode::Char('F'));
    assert_eq!(app.service.state().filter(), Filter::All);
    assert_eq!(app.service.counts().total, 2);
}

#[test]
fn sort_cycle_keeps_selected_task() {
    let mut app = app();
    add_task(&mut app, "banana");
    add_task(&mut app, "apple");
    add_task(&mut app, "cherry");
    press(&mut app, KeyCode::End);
    assert_eq!(app.selected_task().map(|task| task.text).as_deref(), Some("banana"));

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.service.state().sort(), SortOrder::Oldest);
    assert_eq!(visible_texts(&app), vec!["banana", "apple", "cherry"]);
    assert_eq!(app.selected, 0);

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.service.state().sort(), SortOrder::Alphabetical);
    assert_eq!(visible_texts(&app), vec!["apple", "banana", "cherry"]);
    assert_eq!(app.selected, 1);

    press(&mut app, KeyCode::Char('S'));
    press(&mut app, KeyCode::Char('S'));
    assert_eq!(app.service.state().sort(), SortOrder::Newest);
}

#[test]
fn clear_completed_removes_only_completed() {
    let mut app = app();
    add_task(&mut app, "One");
    add_task(&mut app, "Two");
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(visible_texts(&app), vec!["One"]);
    assert_eq!(app.service.counts().completed, 0);

    // Nothing left to clear; the list stays as is.
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.service.tasks().len(), 1);
}

#[test]
fn selection_stays_in_bounds() {
    let mut app = app();
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.table_state.selected(), None);

    add_task(&mut app, "A");
    add_task(&mut app, "B");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected, 1);
    press(&mut app, KeyCode::Char('k'));
    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected, 0);
}

#[test]
fn help_and_quit_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.input_mode, InputMode::Help);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);

    app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[test]
fn draws_empty_state_and_tasks() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).expect("terminal");

    terminal.draw(|f| app.draw(f)).expect("draw");
    let screen = buffer_text(&terminal);
    assert!(screen.contains("No tasks yet"));

    add_task(&mut app, "Water plants");
    terminal.draw(|f| app.draw(f)).expect("draw");
    let screen = buffer_text(&terminal);
    assert!(screen.contains("Water plants"));
    assert!(screen.contains("Total: 1"));
}

#[test]
fn draws_clear_hint_and_input_error() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).expect("terminal");

    add_task(&mut app, "Buy milk");
    terminal.draw(|f| app.draw(f)).expect("draw");
    assert!(!buffer_text(&terminal).contains("Clear Completed"));

    press(&mut app, KeyCode::Char(' '));
    terminal.draw(|f| app.draw(f)).expect("draw");
    assert!(buffer_text(&terminal).contains("[c] Clear Completed"));

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "buy milk");
    press(&mut app, KeyCode::Enter);
    terminal.draw(|f| app.draw(f)).expect("draw");
    assert!(buffer_text(&terminal).contains("Task already exists"));
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert_eq!(rect, Rect::new(20, 7, 40, 10));

    let clamped = centered_rect(200, 50, area);
    assert_eq!(clamped, area);
}

#[test]
fn inset_rect_shrinks_each_side() {
    let rect = inset_rect(Rect::new(0, 0, 10, 6), 1);
    assert_eq!(rect, Rect::new(1, 1, 8, 4));
}

#[test]
fn short_id_truncates_long_ids() {
    assert_eq!(short_id("abc"), "abc");
    assert_eq!(short_id("01HZX3K9ABCDEFG"), "01HZX3K9");
}
