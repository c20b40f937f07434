use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, DeleteArgs, IdArgs, ListArgs};
use crate::core::TasksService;
use crate::model::{DeleteResult, TaskId};
use crate::tui::helpers::format_created;

/// Run a one-shot command against `service`, writing a summary to `writer`.
pub fn execute<W: Write>(
    service: &mut TasksService,
    command: CliCommand,
    mut writer: W,
) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(service, &args, &mut writer),
        CliCommand::List(args) => handle_list(service, &args, &mut writer),
        CliCommand::Toggle(args) => handle_toggle(service, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(service, &args, &mut writer),
        CliCommand::ClearCompleted => {
            let removed = service.clear_completed();
            writeln!(writer, "Cleared {} completed task{}", removed, plural(removed))?;
            Ok(())
        }
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<W: Write>(service: &mut TasksService, args: &AddArgs, mut writer: W) -> Result<()> {
    let task = service.add(&args.joined())?;
    writeln!(writer, "Added {} {}", task.id, task.text)?;
    Ok(())
}

fn handle_list<W: Write>(
    service: &mut TasksService,
    args: &ListArgs,
    mut writer: W,
) -> Result<()> {
    service.set_filter(args.filter);
    service.set_sort(args.sort);
    let snapshot = service.snapshot();

    if snapshot.is_empty() {
        let empty = crate::core::view::empty_state(&snapshot.counts);
        writeln!(writer, "{}", empty.title)?;
        writeln!(writer, "{}", empty.hint)?;
    }
    for task in &snapshot.tasks {
        writeln!(
            writer,
            "[{}] {}  {}  {}",
            if task.completed { "x" } else { " " },
            task.id,
            format_created(task.created_at),
            task.text
        )?;
    }
    writeln!(
        writer,
        "Total: {}  Active: {}  Completed: {}",
        snapshot.counts.total, snapshot.counts.active, snapshot.counts.completed
    )?;
    Ok(())
}

fn handle_toggle<W: Write>(
    service: &mut TasksService,
    args: &IdArgs,
    mut writer: W,
) -> Result<()> {
    let Some(id) = service.resolve_id(&args.id) else {
        writeln!(writer, "Not found: {}", args.id)?;
        return Ok(());
    };
    if let Some(completed) = service.toggle(&id) {
        let state = if completed { "completed" } else { "active" };
        writeln!(writer, "Marked {} {}", id, state)?;
    }
    Ok(())
}

fn handle_delete<W: Write>(
    service: &mut TasksService,
    args: &DeleteArgs,
    mut writer: W,
) -> Result<()> {
    let results: Vec<DeleteResult> = args
        .ids
        .iter()
        .map(|raw| match service.resolve_id(raw) {
            Some(id) => DeleteResult {
                deleted: service.remove(&id),
                id,
            },
            None => DeleteResult {
                id: TaskId::from(raw.as_str()),
                deleted: false,
            },
        })
        .collect();
    let summary = DeleteSummary::from_results(&results);
    summary.write_to(&mut writer)?;
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<String>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteResult]) -> Self {
        let mut deleted = 0usize;
        let mut missing = Vec::new();
        for result in results {
            if result.deleted {
                deleted += 1;
            } else {
                missing.push(result.id.to_string());
            }
        }
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", self.missing.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(f, "Deleted {} task{}", count, plural(*count)),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}
