//! Interactive session.
//!
//! Keeps one controller alive across many actions, so the volatile fallback
//! store and the auto-dismissing notices behave as they would in a long-lived
//! UI. Each loop iteration first lets expired notices go, then reads a line.

use super::{load_config, open};
use crate::libs::controller::TaskListController;
use crate::libs::messages::Message;
use crate::libs::task::TaskId;
use crate::libs::view::{TaskAction, TaskView, TerminalView};
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Action(TaskAction),
    List,
    Help,
    Quit,
    Empty,
    InvalidId(String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "toggle" | "t" | "done" => parse_id(rest).map_or_else(ShellCommand::InvalidId, |id| ShellCommand::Action(TaskAction::Toggle(id))),
        "delete" | "del" | "rm" => parse_id(rest).map_or_else(ShellCommand::InvalidId, |id| ShellCommand::Action(TaskAction::Delete(id))),
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(head.to_string()),
    }
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    raw.parse::<TaskId>().map_err(|_| raw.to_string())
}

/// Applies one command. Returns `false` when the session should end.
pub fn execute<V: TaskView>(controller: &mut TaskListController<V>, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Add(text) => {
            if let Ok(id) = controller.submit_task(&text) {
                msg_success!(Message::TaskAdded(id, text.trim().to_string()));
            }
        }
        ShellCommand::Action(action) => {
            if !controller.dispatch(action) {
                let (TaskAction::Toggle(id) | TaskAction::Delete(id)) = action;
                msg_info!(Message::TaskNotFoundWithId(id));
            }
        }
        ShellCommand::List => {
            controller.render();
        }
        ShellCommand::Help => msg_print!(Message::ShellHelp),
        ShellCommand::Quit => return false,
        ShellCommand::Empty => {}
        ShellCommand::InvalidId(raw) => msg_error!(Message::ShellInvalidId(raw)),
        ShellCommand::Unknown(head) => msg_error!(Message::ShellUnknownCommand(head)),
    }
    true
}

pub fn cmd() -> Result<()> {
    let config = load_config();
    msg_print!(Message::ShellWelcome);
    let mut controller = open(&config, TerminalView::new());

    loop {
        controller.tick();
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptShellCommand.to_string())
            .allow_empty(true)
            .interact_text()?;
        if !execute(&mut controller, parse_command(&line)) {
            break;
        }
    }

    msg_print!(Message::ShellGoodbye);
    Ok(())
}
