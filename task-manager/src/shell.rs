//! Interactive, line-oriented front end.
//!
//! Each input line is one command. Problems with a single command (blank
//! fields, an unknown ID, a failed save) are reported on the output and the
//! loop keeps going. Errors on the input or output streams end it, and so
//! does a failed save on the way out, since nothing is left to retry it.

use crate::manager::{ManagerError, TaskId, TaskManager};
use log::{debug, warn};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("tasks were not saved on exit: {0}")]
    Save(#[source] ManagerError),
}

const PROMPT: &str = "> ";
const HELP: &str = "\
Commands:
  add <title> | <description> | <category>   add a pending task
  list                                        show all tasks (alias: view)
  complete <id>                               mark a task completed (alias: done)
  delete <id>                                 remove a task (alias: rm)
  save                                        write tasks to disk
  quit                                        save and leave (alias: exit)
  help                                        show this message";

#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    Add {
        title: String,
        description: String,
        category: String,
    },
    List,
    Complete(TaskId),
    Delete(TaskId),
    Save,
    Quit,
    Help,
}

impl Command {
    /// Parses one input line. `Ok(None)` means the line was blank.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "add" => {
                let mut fields = rest.splitn(3, '|').map(str::trim);
                let title = fields.next().unwrap_or_default().to_string();
                let description = fields.next().unwrap_or_default().to_string();
                let category = fields.next().unwrap_or_default().to_string();
                Command::Add {
                    title,
                    description,
                    category,
                }
            }
            "list" | "view" => Command::List,
            "complete" | "done" => Command::Complete(parse_id(rest)?),
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "save" => Command::Save,
            "quit" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            other => return Err(format!("Unknown command `{other}`; type `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_id(value: &str) -> Result<TaskId, String> {
    if value.is_empty() {
        return Err("Please select a task by ID".to_string());
    }
    value
        .trim_start_matches('#')
        .parse::<u32>()
        .map(TaskId::from)
        .map_err(|_| format!("`{value}` is not a task ID"))
}

/// Runs the command loop until `quit` or end of input. Both save the task
/// list before returning if it has unsaved changes.
pub fn run<R: BufRead, W: Write>(
    manager: &mut TaskManager,
    input: R,
    mut output: W,
) -> Result<(), ShellError> {
    writeln!(output, "{}", manager.render())?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(manager, command, &mut output)?,
            Ok(None) => {}
            Err(message) => writeln!(output, "Input error: {message}")?,
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    if !manager.is_dirty() {
        return Ok(());
    }
    if let Err(err) = manager.save() {
        writeln!(output, "Save error: {err}")?;
        return Err(ShellError::Save(err));
    }
    writeln!(output, "Tasks have been saved successfully!")?;
    Ok(())
}

fn execute<W: Write>(
    manager: &mut TaskManager,
    command: Command,
    output: &mut W,
) -> std::io::Result<()> {
    debug!("Executing {command:?}");
    match command {
        Command::Add {
            title,
            description,
            category,
        } => match manager.add(title, description, category) {
            Ok(id) => writeln!(output, "Task added with ID {id}"),
            Err(err) => writeln!(output, "Input error: {err}"),
        },
        Command::List => writeln!(output, "{}", manager.render()),
        Command::Complete(id) => match manager.complete(id) {
            Ok(task) => writeln!(output, "#{id} {task}"),
            Err(err) => writeln!(output, "Selection error: {err}"),
        },
        Command::Delete(id) => match manager.delete(id) {
            Ok(task) => writeln!(output, "Deleted task {id}: {}", task.title()),
            Err(err) => writeln!(output, "Selection error: {err}"),
        },
        Command::Save => save(manager, output),
        Command::Help => writeln!(output, "{HELP}"),
        Command::Quit => Ok(()),
    }
}

fn save<W: Write>(manager: &mut TaskManager, output: &mut W) -> std::io::Result<()> {
    match manager.save() {
        Ok(()) => writeln!(output, "Tasks have been saved successfully!"),
        Err(err) => {
            warn!("Save failed: {err}");
            writeln!(output, "Save error: {err}")
        }
    }
}
