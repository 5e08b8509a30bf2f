//! Display implementation for tasklist messages.
//!
//! All user-facing text lives in this one `match`, so wording stays consistent
//! between the banner, the shell and the one-shot commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskDescriptionRequired => "Please enter a task description".to_string(),
            Message::TaskAdded(id, text) => format!("Task {} added: {}", id, text),
            Message::TaskToggled(id, completed) => {
                format!("Task {} marked as {}", id, if *completed { "complete" } else { "incomplete" })
            }
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskIdsExhausted => "No task IDs left. Delete the task with the largest ID to add new ones.".to_string(),
            Message::TasksEmptyState => "No tasks yet. Add one to get started!".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),

            // === STORAGE MESSAGES ===
            Message::DurableStorageUnavailable => {
                "Durable storage is not available. For full persistence, make the data directory writable.".to_string()
            }
            Message::TemporaryStorageInUse => "Using temporary storage. Tasks will be lost when the session ends.".to_string(),
            Message::TasksSaveFailed => "Failed to save tasks. Changes may not persist.".to_string(),
            Message::TasksLoadFailed => "Failed to load saved tasks. Starting fresh.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigLoadFailed(error) => format!("Failed to read configuration, using defaults: {}", error),
            Message::ConfigDataDirectory(path) => format!("Tasks are stored in {}", path),

            // === SHELL MESSAGES ===
            Message::ShellWelcome => "Interactive task list. Type 'help' for commands.".to_string(),
            Message::ShellHelp => [
                "add <text>    add a task",
                "toggle <id>   mark a task complete or incomplete",
                "delete <id>   delete a task",
                "list          show the list again",
                "quit          leave the shell",
            ]
            .join("\n"),
            Message::ShellUnknownCommand(command) => format!("Unknown command '{}'. Type 'help' for commands.", command),
            Message::ShellInvalidId(raw) => format!("'{}' is not a valid task ID", raw),
            Message::ShellGoodbye => "Bye!".to_string(),

            // === PROMPTS ===
            Message::PromptShellCommand => "tasks".to_string(),
            Message::PromptDataDirectory => "Data directory (empty for default)".to_string(),
            Message::PromptStorageKey => "Storage key".to_string(),
        };
        write!(f, "{}", text)
    }
}
