//! Projection of the task collection onto what a frontend displays.
//!
//! [`render_tasks`] turns the in-memory collection into a [`RenderedList`]:
//! either the empty state, or the tasks sorted incomplete-first and
//! newest-first within each group. Frontends implement [`TaskView`] and wire
//! each item's controls back to the controller through [`TaskAction`].

use super::notice::{Notice, Severity};
use super::task::{Task, TaskId};
use crate::libs::messages::Message;
use crate::{msg_error, msg_info, msg_print, msg_warning};
use chrono::{DateTime, Local, Utc};
use prettytable::{row, Table};
use std::cmp::Reverse;

/// What a rendered item control asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Toggle(TaskId),
    Delete(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: TaskId,
    pub checked: bool,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl TaskItem {
    fn from_task(task: &Task) -> Self {
        TaskItem {
            id: task.id,
            checked: task.completed,
            text: task.text.clone(),
            created_at: task.created_at,
        }
    }

    pub fn escaped_text(&self) -> String {
        escape_html(&self.text)
    }

    pub fn checkbox_label(&self) -> &'static str {
        if self.checked {
            "Mark task as incomplete"
        } else {
            "Mark task as complete"
        }
    }

    pub fn toggle_action(&self) -> TaskAction {
        TaskAction::Toggle(self.id)
    }

    pub fn delete_action(&self) -> TaskAction {
        TaskAction::Delete(self.id)
    }

    pub fn to_html(&self) -> String {
        let text = self.escaped_text();
        format!(
            concat!(
                "<div class=\"task-item{completed}\" data-task-id=\"{id}\">",
                "<input type=\"checkbox\" class=\"task-checkbox\"{checked} aria-label=\"{label}\">",
                "<span class=\"task-text\" title=\"{text}\">{text}</span>",
                "<button class=\"delete-button\" aria-label=\"Delete task\">\u{00d7}</button>",
                "</div>"
            ),
            completed = if self.checked { " completed" } else { "" },
            id = self.id,
            checked = if self.checked { " checked" } else { "" },
            label = self.checkbox_label(),
            text = text,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedList {
    pub empty_state_visible: bool,
    pub items: Vec<TaskItem>,
}

impl RenderedList {
    pub fn order(&self) -> Vec<TaskId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Markup for the list container; the empty state renders as an empty string.
    pub fn to_html(&self) -> String {
        self.items.iter().map(TaskItem::to_html).collect::<Vec<_>>().join("\n")
    }
}

/// Sorted copy of `tasks`: incomplete before completed, newest first within a group.
pub fn sort_for_display(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| (task.completed, Reverse(task.created_at)));
    sorted
}

pub fn render_tasks(tasks: &[Task]) -> RenderedList {
    if tasks.is_empty() {
        return RenderedList {
            empty_state_visible: true,
            items: Vec::new(),
        };
    }
    RenderedList {
        empty_state_visible: false,
        items: sort_for_display(tasks).iter().map(TaskItem::from_task).collect(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The surface a controller draws on: list container with its empty state,
/// a notice banner and the text input.
pub trait TaskView {
    fn draw_list(&mut self, list: &RenderedList);

    /// `None` hides the banner.
    fn draw_notice(&mut self, notice: Option<&Notice>);

    /// Clears the input field and gives it focus again.
    fn reset_input(&mut self) {}
}

/// Banner markup for `notice`, styled by its severity.
pub fn notice_html(notice: &Notice) -> String {
    format!(r#"<div class="{}" role="alert">{}</div>"#, notice.css_class(), escape_html(&notice.message))
}

/// Draws to the terminal.
#[derive(Debug, Default)]
pub struct TerminalView {
    html: bool,
    muted: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints list markup instead of a table.
    pub fn html() -> Self {
        TerminalView { html: true, muted: false }
    }

    /// Draws nothing until unmuted.
    pub fn muted() -> Self {
        TerminalView { html: false, muted: true }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl TaskView for TerminalView {
    fn draw_list(&mut self, list: &RenderedList) {
        if self.muted {
            return;
        }
        if self.html {
            println!("{}", list.to_html());
            return;
        }
        if list.empty_state_visible {
            msg_info!(Message::TasksEmptyState);
            return;
        }

        let mut table = Table::new();
        table.add_row(row!["ID", "DONE", "TASK", "CREATED"]);
        for item in &list.items {
            let done = if item.checked { "[x]" } else { "[ ]" };
            let created = item.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
            table.add_row(row![item.id, done, item.text, created]);
        }
        msg_print!(Message::TasksHeader);
        table.printstd();
    }

    fn draw_notice(&mut self, notice: Option<&Notice>) {
        let Some(notice) = notice.filter(|_| !self.muted) else {
            return;
        };
        if self.html {
            println!("{}", notice_html(notice));
            return;
        }
        match notice.severity {
            Severity::Error => msg_error!(notice.message),
            Severity::Warning => msg_warning!(notice.message),
            Severity::Info => msg_info!(notice.message),
        }
    }
}
