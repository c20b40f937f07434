use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::core::view::empty_state;
use crate::model::MAX_TASK_LEN;
use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, checkbox, format_created, inset_rect, short_id,
    BG_ACCENT, BG_BASE, BG_PANEL,
};

use super::{App, ConfirmChoice, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_controls(f, chunks[1]);
        self.draw_tasks(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Add => self.draw_input_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!(" ✨ Todo List v{} ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Stay organized and productive"),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.storage_label),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_controls(&self, f: &mut Frame<'_>, area: Rect) {
        let snapshot = self.service.snapshot();
        let counts = snapshot.counts;
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Total: ", label),
            Span::styled(counts.total.to_string(), value),
            Span::raw("  "),
            Span::styled("Active: ", label),
            Span::styled(counts.active.to_string(), value),
            Span::raw("  "),
            Span::styled("Completed: ", label),
            Span::styled(counts.completed.to_string(), value),
            Span::raw("    "),
            Span::styled("Filter: ", label),
            Span::styled(snapshot.filter.label(), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled("Sort by: ", label),
            Span::styled(snapshot.sort.label(), Style::default().fg(Color::Yellow)),
        ];
        if snapshot.can_clear_completed() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "[c] Clear Completed",
                Style::default().fg(Color::Red),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Tasks"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let visible = self.service.visible();
        if visible.is_empty() {
            let empty = empty_state(&self.service.counts());
            let lines = vec![
                Line::from(Span::raw("🎯")),
                Line::from(Span::styled(
                    empty.title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(empty.hint, Style::default().fg(Color::DarkGray))),
            ];
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL));
            let inner = block.inner(area);
            f.render_widget(Clear, area);
            f.render_widget(block, area);

            if inner.width == 0 || inner.height == 0 {
                return;
            }

            let width = inner.width.min(80).max(1);
            let height = (lines.len() as u16).saturating_add(2).min(inner.height);
            let content_area = centered_rect(width, height, inner);
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL));
            f.render_widget(paragraph, content_area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Done"),
            Cell::from("📝 Task"),
            Cell::from("📅 Created"),
            Cell::from("ID"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = visible
            .iter()
            .map(|task| {
                let text_style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(checkbox(task.completed)),
                    Cell::from(task.text.clone()).style(text_style),
                    Cell::from(format_created(task.created_at)),
                    Cell::from(short_id(task.id.as_str())),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Length(11),
            Constraint::Length(9),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | a add ✚ | space toggle ✅ | x delete 🗑️ | f filter 🔍 | s sort ↕ | c clear completed | h help ❔ | q quit"
            }
            InputMode::Add => "Enter to add ✍️ • Esc to cancel",
            InputMode::Help => "Enter/Esc to close ❔",
            InputMode::ConfirmDelete => "←/→ choose • y/n • Enter confirm • Esc cancel",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 80);
        let popup_area = centered_rect(width, 6, area);
        f.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ Add Task"))
            .border_style(Style::default().fg(if self.service.error().is_some() {
                Color::Red
            } else {
                Color::DarkGray
            }))
            .style(Style::default().bg(BG_PANEL));
        let input_area = input_block.inner(chunks[0]);
        f.render_widget(input_block, chunks[0]);
        f.render_widget(
            Paragraph::new(self.input.as_str()).style(Style::default().bg(BG_PANEL)),
            input_area,
        );
        if input_area.width > 0 {
            let column = (self.input.cursor_column() as u16).min(input_area.width - 1);
            f.set_cursor(input_area.x + column, input_area.y);
        }

        let detail = match self.service.error() {
            Some(err) => Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                format!(
                    "{}/{} characters",
                    self.input.as_str().trim().chars().count(),
                    MAX_TASK_LEN
                ),
                Style::default().fg(Color::DarkGray),
            )),
        };
        let detail_block = Block::default().style(Style::default().bg(BG_PANEL));
        let detail_area = detail_block.inner(chunks[1]);
        f.render_widget(detail_block, chunks[1]);
        f.render_widget(Paragraph::new(detail), detail_area);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 90);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{combo:<16}"), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();

        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_text = self
            .selected_task()
            .map(|task| task.text)
            .unwrap_or_else(|| String::from("selected task"));

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(vec![Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )]),
            Line::from(vec![Span::styled(
                format!("Delete '{}'?", task_text),
                Style::default().fg(Color::White),
            )]),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
